use pascaline::{
    analyze,
    ast::{DataType, Declaration, Expr, Program, Statement},
    error::{ErrorCode, ErrorKind, SemanticError},
    interpreter::{
        analyzer::core::SemanticAnalyzer,
        lexer::{Position, Token},
        symbol::SymbolKind,
    },
    parse,
};
use rstest::rstest;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn code_of(source: &str) -> ErrorCode {
    analyze(source).unwrap_err().code()
}

#[test]
fn well_typed_program_passes() {
    init();
    let source = "PROGRAM ok;
                  CONST scale = 2.5; name = 'box';
                  VAR i: INTEGER; r: REAL; s: STRING; b: BOOLEAN;
                  FUNCTION twice(n: INTEGER): INTEGER;
                  BEGIN twice := n * 2 END;
                  BEGIN
                      i := twice(3) MOD 4;
                      r := i / 3 + scale;
                      s := name;
                      b := (i <> 0) OR NOT (r >= 1.0);
                      WHILE i > 0 DO i := i - 1
                  END.";

    assert!(analyze(source).is_ok());
}

#[test]
fn duplicate_in_one_scope_is_rejected() {
    init();
    let error = analyze("PROGRAM p; VAR x: INTEGER; x: REAL; BEGIN END.").unwrap_err();

    assert_eq!(error.code(), ErrorCode::DuplicateIdentifier);
    assert_eq!(error.kind(), ErrorKind::Semantic);
}

#[test]
fn shadowing_in_a_nested_scope_is_allowed() {
    init();
    let source = "PROGRAM p;
                  VAR x: INTEGER;
                  PROCEDURE q; VAR x: REAL; BEGIN x := 1.5 END;
                  BEGIN x := 1; q END.";

    assert!(analyze(source).is_ok());
}

#[test]
fn local_variable_may_not_repeat_a_parameter() {
    init();
    let source = "PROGRAM p;
                  PROCEDURE q(a: INTEGER); VAR a: REAL; BEGIN END;
                  BEGIN END.";

    assert_eq!(code_of(source), ErrorCode::DuplicateIdentifier);
}

#[test]
fn integers_promote_to_reals_but_not_back() {
    init();
    assert!(analyze("PROGRAM p; VAR r: REAL; BEGIN r := 1 END.").is_ok());
    assert_eq!(code_of("PROGRAM p; VAR i: INTEGER; BEGIN i := 1.5 END."),
               ErrorCode::TypeMismatch);
    assert_eq!(code_of("PROGRAM p; VAR i: INTEGER; BEGIN i := 4 / 2 END."),
               ErrorCode::TypeMismatch);
}

#[rstest]
#[case::string_from_integer("PROGRAM p; VAR s: STRING; BEGIN s := 1 END.")]
#[case::integer_plus_boolean("PROGRAM p; VAR i: INTEGER; BEGIN i := 1 + TRUE END.")]
#[case::numeric_condition("PROGRAM p; VAR i: INTEGER; BEGIN IF i THEN i := 1 END.")]
#[case::numeric_loop_condition("PROGRAM p; VAR i: INTEGER; BEGIN WHILE 1 DO i := 1 END.")]
#[case::argument_type(
    "PROGRAM p; PROCEDURE q(b: BOOLEAN); BEGIN END; BEGIN q(1) END."
)]
fn type_mismatches(#[case] source: &str) {
    init();
    assert_eq!(code_of(source), ErrorCode::TypeMismatch);
}

#[rstest]
#[case::mod_on_reals("PROGRAM p; VAR r: REAL; BEGIN r := r MOD 2 END.")]
#[case::div_on_reals("PROGRAM p; VAR r: REAL; BEGIN r := 2.0 DIV 1 END.")]
#[case::string_concatenation("PROGRAM p; VAR s: STRING; BEGIN s := s + s END.")]
#[case::string_equality("PROGRAM p; VAR b: BOOLEAN; s: STRING; BEGIN b := s = 'x' END.")]
#[case::string_ordering("PROGRAM p; VAR b: BOOLEAN; BEGIN b := 'a' < 'b' END.")]
#[case::not_on_integer("PROGRAM p; VAR i: INTEGER; BEGIN i := NOT i END.")]
#[case::minus_on_boolean("PROGRAM p; VAR b: BOOLEAN; BEGIN b := -b END.")]
#[case::and_on_integers("PROGRAM p; VAR i: INTEGER; BEGIN i := i AND 1 END.")]
#[case::assign_constant("PROGRAM p; CONST n = 1; BEGIN n := 2 END.")]
#[case::procedure_as_value(
    "PROGRAM p; VAR i: INTEGER; PROCEDURE q; BEGIN END; BEGIN i := q END."
)]
#[case::function_result_outside_body(
    "PROGRAM p; FUNCTION f: INTEGER; BEGIN f := 1 END; BEGIN f := 2 END."
)]
#[case::read_into_constant("PROGRAM p; CONST n = 1; BEGIN READ(n) END.")]
fn invalid_operations(#[case] source: &str) {
    init();
    assert_eq!(code_of(source), ErrorCode::InvalidOperation);
}

#[rstest]
#[case::too_many("PROGRAM p; PROCEDURE q(a: INTEGER); BEGIN END; BEGIN q(1, 2) END.")]
#[case::too_few("PROGRAM p; PROCEDURE q(a, b: INTEGER); BEGIN END; BEGIN q(1) END.")]
#[case::function_without_arguments(
    "PROGRAM p; VAR i: INTEGER; FUNCTION f(a: INTEGER): INTEGER; BEGIN f := a END; BEGIN i := f END."
)]
fn argument_counts(#[case] source: &str) {
    init();
    assert_eq!(code_of(source), ErrorCode::IncorrectArgumentCount);
}

#[test]
fn nested_function_may_set_the_enclosing_result() {
    init();
    let source = "PROGRAM p;
                  FUNCTION outer: INTEGER;
                      PROCEDURE inner; BEGIN outer := 7 END;
                  BEGIN inner END;
                  BEGIN END.";

    assert!(analyze(source).is_ok());
}

#[test]
fn calls_and_targets_are_annotated() {
    init();
    let source = "PROGRAM p;
                  VAR r: REAL;
                  FUNCTION half(n: INTEGER): REAL; BEGIN half := n / 2 END;
                  BEGIN r := half(3); READ(r) END.";
    let program = analyze(source).unwrap();
    let body = &program.block.body;

    let Statement::Assign { value: Expr::FunctionCall(call),
                            target_type, .. } = &body[0]
    else {
        panic!("expected an assignment of a call");
    };
    assert_eq!(*target_type, Some(DataType::Real));
    let symbol = call.symbol.as_ref().unwrap();
    assert!(matches!(symbol.kind, SymbolKind::Function(_)));
    assert_eq!(symbol.scope_level, 1);

    let Statement::Input { targets, .. } = &body[1] else {
        panic!("expected an input statement");
    };
    assert_eq!(targets[0].data_type, Some(DataType::Real));
}

/// Parses `source`, lets `edit` change the tree and analyzes the result.
///
/// The edits produce trees the parser's own scope checks would never let
/// through, so only the analyzer stands between them and execution.
fn analyze_edited(source: &str, edit: impl FnOnce(&mut Program)) -> SemanticError {
    init();
    let mut program = parse(source).unwrap();
    edit(&mut program);
    SemanticAnalyzer::new().analyze(&mut program).unwrap_err()
}

#[test]
fn analyzer_rejects_a_duplicate_the_parser_never_saw() {
    let error = analyze_edited("PROGRAM p; VAR x: INTEGER; BEGIN x := 1 END.", |program| {
        program.block.declarations.push(Declaration::Variable { name:      "X".into(),
                                                                data_type: DataType::Real,
                                                                position:  Position::new(9, 1), });
    });

    match error {
        SemanticError::DuplicateIdentifier { token } => {
            assert_eq!(token.token, Token::Identifier("X".into()));
            assert_eq!(token.position, Position::new(9, 1));
        },
        other => panic!("expected a duplicate, found {other}"),
    }
}

#[test]
fn analyzer_rejects_a_reference_the_parser_never_saw() {
    let error = analyze_edited("PROGRAM p; VAR x, y: INTEGER; BEGIN x := y END.", |program| {
        let Statement::Assign { value: Expr::Identifier { name, .. }, .. } = &mut program.block.body[0] else {
            panic!("expected an assignment of a name");
        };
        *name = "GHOST".into();
    });

    match error {
        SemanticError::IdentifierNotFound { token } => {
            assert_eq!(token.token, Token::Identifier("GHOST".into()));
        },
        other => panic!("expected an unknown name, found {other}"),
    }
}

#[test]
fn analyzer_rejects_an_assignment_to_an_undeclared_target() {
    let error = analyze_edited("PROGRAM p; VAR x: INTEGER; BEGIN x := 1 END.", |program| {
        let Statement::Assign { target, .. } = &mut program.block.body[0] else {
            panic!("expected an assignment");
        };
        *target = "GHOST".into();
    });

    assert_eq!(error.code(), ErrorCode::IdentifierNotFound);
}
