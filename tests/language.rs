use std::{fs, path::Path};

use pascaline::{execute, interpreter::io::ScriptedInput};
use walkdir::WalkDir;

/// Runs every `tests/programs/*.pas` file and compares what it writes with
/// the matching `.out` file. A matching `.in` file, if present, supplies the
/// input lines.
#[test]
fn sample_programs_produce_expected_output() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "pas"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = read_sibling(path, "out").unwrap_or_else(|| panic!("{path:?} has no .out file"));
        let lines = read_sibling(path, "in").unwrap_or_default();

        count += 1;
        let mut input = ScriptedInput::new(lines.lines());
        match execute(&source, &mut input, 64) {
            Ok(execution) => assert_eq!(execution.output, expected, "output of {path:?}"),
            Err(e) => panic!("Program {path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No programs found in tests/programs");
}

fn read_sibling(path: &Path, extension: &str) -> Option<String> {
    fs::read_to_string(path.with_extension(extension)).ok()
}
