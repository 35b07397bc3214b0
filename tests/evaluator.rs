use pascaline::{
    error::{ErrorCode, ErrorKind},
    execute,
    interpreter::{
        call_stack::{DEFAULT_MAX_CALL_DEPTH, MAX_CALL_DEPTH_LIMIT},
        io::ScriptedInput,
        value::Value,
    },
    run_program,
};
use rstest::rstest;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn binding(source: &str, name: &str) -> Value {
    init();
    let execution = run_program(source).unwrap_or_else(|e| panic!("{source}\nfailed: {e}"));
    execution.bindings
             .get(name)
             .cloned()
             .unwrap_or_else(|| panic!("{name} is not bound"))
}

fn output(source: &str) -> String {
    init();
    run_program(source).unwrap_or_else(|e| panic!("{source}\nfailed: {e}")).output
}

fn failure(source: &str) -> ErrorCode {
    init();
    let error = run_program(source).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Runtime, "{error}");
    error.code()
}

#[rstest]
#[case::precedence("2 + 3 * 4", 14)]
#[case::parentheses("(2 + 3) * 4", 20)]
#[case::integer_division("8 div 4", 2)]
#[case::truncating_division("-7 div 2", -3)]
#[case::modulo("7 mod 3", 1)]
#[case::negative_modulo("-7 mod 2", -1)]
#[case::left_associative("8 - 4 - 2", 2)]
#[case::unary_chain("- - 5", 5)]
fn integer_arithmetic(#[case] expr: &str, #[case] expected: i64) {
    let source = format!("PROGRAM p; VAR a: INTEGER; BEGIN a := {expr} END.");
    assert_eq!(binding(&source, "A"), Value::Integer(expected));
}

#[rstest]
#[case::real_division("7 / 2", 3.5)]
#[case::exact_real_division("8 / 4", 2.0)]
#[case::mixed_addition("1 + 0.5", 1.5)]
#[case::promoted_store("3", 3.0)]
fn real_arithmetic(#[case] expr: &str, #[case] expected: f64) {
    let source = format!("PROGRAM p; VAR r: REAL; BEGIN r := {expr} END.");
    assert_eq!(binding(&source, "R"), Value::Real(expected));
}

#[rstest]
#[case("1 < 2", true)]
#[case("2.5 >= 3", false)]
#[case("1 = 1.0", true)]
#[case("NOT (1 > 2) AND TRUE", true)]
#[case("FALSE OR (3 <> 3)", false)]
#[case("TRUE = FALSE", false)]
fn boolean_expressions(#[case] expr: &str, #[case] expected: bool) {
    let source = format!("PROGRAM p; VAR b: BOOLEAN; BEGIN b := {expr} END.");
    assert_eq!(binding(&source, "B"), Value::Boolean(expected));
}

#[test]
fn writeln_concatenates_its_arguments() {
    assert_eq!(output("PROGRAM p; BEGIN WRITELN('X=', 1 + 1) END."), "X=2\n");
}

#[test]
fn write_does_not_end_the_line() {
    let source = "PROGRAM p; BEGIN WRITE('a'); WRITE('b', 2.0, TRUE); WRITELN; WRITELN() END.";
    assert_eq!(output(source), "ab2.0TRUE\n\n");
}

#[test]
fn unassigned_variable_holds_the_null_marker() {
    let source = "PROGRAM p; VAR a: INTEGER; BEGIN WRITELN(a) END.";

    assert_eq!(output(source), "NULL\n");
    assert_eq!(binding(source, "A"), Value::Null);
}

#[test]
fn constants_are_bound_in_their_frame() {
    let source = "PROGRAM p; CONST limit = 10; greeting = 'hi'; BEGIN WRITELN(greeting, limit) END.";

    assert_eq!(output(source), "hi10\n");
    assert_eq!(binding(source, "LIMIT"), Value::Integer(10));
}

#[test]
fn while_loop_sums() {
    let source = "PROGRAM p;
                  VAR i, sum: INTEGER;
                  BEGIN
                      i := 1; sum := 0;
                      WHILE i <= 10 DO
                      BEGIN
                          sum := sum + i;
                          i := i + 1
                      END
                  END.";

    assert_eq!(binding(source, "SUM"), Value::Integer(55));
}

#[test]
fn dangling_else_binds_to_nearest_if() {
    let source = "PROGRAM p;
                  VAR a: INTEGER;
                  BEGIN
                      a := 0;
                      IF FALSE THEN IF TRUE THEN a := 1 ELSE a := 2
                  END.";

    assert_eq!(binding(source, "A"), Value::Integer(0));
}

#[test]
fn recursive_factorial() {
    let source = "PROGRAM f;
                  VAR r: INTEGER;
                  FUNCTION fact(n: INTEGER): INTEGER;
                  BEGIN
                      IF n <= 1 THEN fact := 1 ELSE fact := n * fact(n - 1)
                  END;
                  BEGIN r := fact(5) END.";

    assert_eq!(binding(source, "R"), Value::Integer(120));
}

#[test]
fn nested_procedure_updates_enclosing_variables() {
    let source = "PROGRAM p;
                  VAR x: INTEGER;
                  PROCEDURE outer;
                      VAR y: INTEGER;
                      PROCEDURE inner;
                      BEGIN x := x + 10; y := 2 END;
                  BEGIN y := 1; inner; x := x + y END;
                  BEGIN x := 1; outer END.";

    assert_eq!(binding(source, "X"), Value::Integer(13));
}

#[test]
fn names_resolve_through_the_calling_frame() {
    let source = "PROGRAM d;
                  VAR x: INTEGER;
                  PROCEDURE p;
                  BEGIN x := x + 1 END;
                  PROCEDURE q;
                      VAR x: INTEGER;
                  BEGIN x := 100; p; WRITELN(x) END;
                  BEGIN x := 1; q; WRITELN(x) END.";

    assert_eq!(output(source), "101\n1\n");
}

#[test]
fn arguments_are_coerced_to_parameter_types() {
    let source = "PROGRAM p;
                  VAR r: REAL;
                  FUNCTION half(x: REAL): REAL; BEGIN half := x / 2 END;
                  BEGIN r := half(5); WRITELN(half(4)) END.";

    assert_eq!(output(source), "2.0\n");
    assert_eq!(binding(source, "R"), Value::Real(2.5));
}

#[test]
fn function_without_result_yields_null() {
    let source = "PROGRAM p;
                  VAR a: INTEGER;
                  FUNCTION f: INTEGER; BEGIN END;
                  BEGIN a := f END.";

    assert_eq!(binding(source, "A"), Value::Null);
}

#[test]
fn routine_frames_do_not_leak_into_the_program_frame() {
    let source = "PROGRAM p;
                  VAR a: INTEGER;
                  PROCEDURE q(n: INTEGER); VAR t: INTEGER; BEGIN t := n END;
                  BEGIN q(3); a := 1 END.";
    init();
    let bindings = run_program(source).unwrap().bindings;

    assert_eq!(bindings.keys().collect::<Vec<_>>(), ["A"]);
}

#[test]
fn unbounded_recursion_overflows_the_stack() {
    init();
    let source = "PROGRAM p; PROCEDURE r; BEGIN r END; BEGIN r END.";
    let error = execute(source, &mut ScriptedInput::default(), 16).unwrap_err();

    assert_eq!(error.code(), ErrorCode::StackOverflow);
}

#[test]
fn recursion_within_the_limit_succeeds() {
    init();
    let source = "PROGRAM p;
                  VAR r: INTEGER;
                  FUNCTION depth(n: INTEGER): INTEGER;
                  BEGIN IF n = 0 THEN depth := 0 ELSE depth := 1 + depth(n - 1) END;
                  BEGIN r := depth(14) END.";
    let execution = execute(source, &mut ScriptedInput::default(), 16).unwrap();

    assert_eq!(execution.bindings["R"], Value::Integer(14));
}

#[rstest]
#[case::integer_division_by_zero("a := 1 div 0", ErrorCode::DivisionByZero)]
#[case::modulo_by_zero("a := 1 mod 0", ErrorCode::DivisionByZero)]
#[case::real_division_by_zero("r := 1 / 0", ErrorCode::DivisionByZero)]
#[case::addition_overflow("a := 9223372036854775807 + 1", ErrorCode::Overflow)]
#[case::multiplication_overflow("a := 4611686018427387904 * 2", ErrorCode::Overflow)]
#[case::inexact_promotion("r := 9007199254740993 + 0.5", ErrorCode::Overflow)]
#[case::inexact_negative_promotion("r := -9007199254740993 * 1.0", ErrorCode::Overflow)]
#[case::unassigned_operand("a := b + 1", ErrorCode::UnassignedValue)]
#[case::unassigned_negation("a := -b", ErrorCode::UnassignedValue)]
#[case::unassigned_condition("IF c THEN a := 1", ErrorCode::UnassignedValue)]
fn runtime_failures(#[case] statement: &str, #[case] expected: ErrorCode) {
    let source = format!("PROGRAM p; VAR a, b: INTEGER; r: REAL; c: BOOLEAN; BEGIN {statement} END.");
    assert_eq!(failure(&source), expected);
}

#[test]
fn readln_fills_targets_line_by_line() {
    init();
    let source = "PROGRAM p;
                  VAR n: INTEGER; s: STRING; ok: BOOLEAN; r: REAL;
                  BEGIN READLN(n, s); READ(ok, r); WRITELN(s, ' ', n * 2) END.";
    let mut input = ScriptedInput::new(["21", "hello world", " true ", "3"]);
    let execution = execute(source, &mut input, 8).unwrap();

    assert_eq!(execution.output, "hello world 42\n");
    assert_eq!(execution.bindings["OK"], Value::Boolean(true));
    assert_eq!(execution.bindings["R"], Value::Real(3.0));
}

#[rstest]
#[case::not_a_number(vec!["abc"])]
#[case::real_for_integer(vec!["1.5"])]
#[case::exhausted(vec![])]
fn bad_input(#[case] lines: Vec<&str>) {
    init();
    let source = "PROGRAM p; VAR n: INTEGER; BEGIN READLN(n) END.";
    let error = execute(source, &mut ScriptedInput::new(lines), 8).unwrap_err();

    assert_eq!(error.code(), ErrorCode::InvalidInput);
}

#[test]
fn nothing_runs_when_analysis_fails() {
    init();
    let source = "PROGRAM p; VAR s: STRING; BEGIN WRITELN('side effect'); s := 1 END.";

    assert_eq!(run_program(source).unwrap_err().kind(), ErrorKind::Semantic);
}

const NESTED_RECURSION: &str = "PROGRAM p;
    VAR r: INTEGER;
    FUNCTION d(n: INTEGER): INTEGER;
    VAR t: INTEGER;
    BEGIN
        BEGIN
            IF n = 0 THEN t := 0
            ELSE IF n > 0 THEN t := ((((1 + d(n - 1)))))
        END;
        d := t
    END;
    BEGIN r := d(DEPTH) END.";

fn nested_recursion(depth: usize) -> String {
    NESTED_RECURSION.replace("DEPTH", &depth.to_string())
}

/// Runs `f` on a thread whose stack is far smaller than the default.
fn on_small_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new().stack_size(256 * 1024)
                               .spawn(f)
                               .unwrap()
                               .join()
                               .unwrap()
}

#[test]
fn recursion_up_to_the_default_depth_succeeds() {
    init();
    let source = nested_recursion(DEFAULT_MAX_CALL_DEPTH - 2);
    let execution = on_small_stack(move || run_program(&source).map(|e| e.bindings["R"].clone()));

    assert_eq!(execution.unwrap(), Value::Integer(126));
}

#[test]
fn recursion_past_the_default_depth_overflows() {
    init();
    let source = nested_recursion(200);
    let error = on_small_stack(move || run_program(&source).unwrap_err());

    assert_eq!(error.code(), ErrorCode::StackOverflow);
}

#[test]
fn oversized_depth_limit_is_clamped() {
    init();
    let source = "PROGRAM p; PROCEDURE r; BEGIN r END; BEGIN r END.";
    let error = on_small_stack(move || execute(source, &mut ScriptedInput::default(), 10_000_000).unwrap_err());

    assert_eq!(error.code(), ErrorCode::StackOverflow);
    assert!(error.to_string().contains(&MAX_CALL_DEPTH_LIMIT.to_string()), "{error}");
}
