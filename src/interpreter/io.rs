use std::collections::VecDeque;

/// Supplies the lines consumed by `READ` and `READLN`.
///
/// The evaluator calls [`LineReader::read_line`] once per target variable.
pub trait LineReader {
    /// Returns the next line without its terminator, or `None` when the
    /// input is exhausted.
    fn read_line(&mut self) -> Option<String>;
}

/// Reads lines from the process's standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinReader;

impl LineReader for StdinReader {
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Some(line)
            },
        }
    }
}

/// Serves a fixed list of lines, in order.
///
/// # Example
/// ```
/// use pascaline::interpreter::io::{LineReader, ScriptedInput};
///
/// let mut input = ScriptedInput::new(["3", "abc"]);
///
/// assert_eq!(input.read_line().as_deref(), Some("3"));
/// assert_eq!(input.read_line().as_deref(), Some("abc"));
/// assert_eq!(input.read_line(), None);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    /// Creates a reader serving `lines`.
    pub fn new<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { lines: lines.into_iter().map(Into::into).collect() }
    }
}

impl LineReader for ScriptedInput {
    fn read_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}

/// A reader with no input at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInput;

impl LineReader for NoInput {
    fn read_line(&mut self) -> Option<String> {
        None
    }
}
