use pascaline::{
    ast::{BinaryOperator, Declaration, Expr, LiteralValue, Statement},
    error::{Error, ErrorCode, ParseError},
    parse,
};
use rstest::rstest;

fn body(source: &str) -> Vec<Statement> {
    parse(source).unwrap().block.body
}

fn assigned(statement: &Statement) -> &Expr {
    match statement {
        Statement::Assign { value, .. } => value,
        other => panic!("expected an assignment, found {other:?}"),
    }
}

fn is_int(expr: &Expr, expected: i64) -> bool {
    matches!(expr, Expr::Constant { value: LiteralValue::Integer(v), .. } if *v == expected)
}

#[test]
fn minimal_program() {
    let program = parse("program Empty; begin end.").unwrap();

    assert_eq!(program.name, "EMPTY");
    assert!(program.block.declarations.is_empty());
    assert_eq!(program.block.body, vec![Statement::NoOp]);
}

#[test]
fn program_parameter_list_is_ignored() {
    assert!(parse("PROGRAM p(input, output); BEGIN END.").is_ok());
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let body = body("PROGRAM p; VAR a: INTEGER; BEGIN a := 1 + 2 * 3 END.");

    let Expr::BinaryOp { left, op, right, .. } = assigned(&body[0]) else {
        panic!("expected a binary operation");
    };
    assert_eq!(*op, BinaryOperator::Add);
    assert!(is_int(left, 1));
    assert!(matches!(**right, Expr::BinaryOp { op: BinaryOperator::Mul, .. }));
}

#[test]
fn operators_of_one_level_associate_left() {
    let body = body("PROGRAM p; VAR a: INTEGER; BEGIN a := 8 - 4 - 2 END.");

    let Expr::BinaryOp { left, op, right, .. } = assigned(&body[0]) else {
        panic!("expected a binary operation");
    };
    assert_eq!(*op, BinaryOperator::Sub);
    assert!(matches!(**left, Expr::BinaryOp { op: BinaryOperator::Sub, .. }));
    assert!(is_int(right, 2));
}

#[test]
fn relational_operators_bind_loosest() {
    let body = body("PROGRAM p; VAR b: BOOLEAN; BEGIN b := 1 + 1 = 2 END.");

    assert!(matches!(assigned(&body[0]), Expr::BinaryOp { op: BinaryOperator::Equal, .. }));
}

#[test]
fn identifier_statements_are_classified_by_scope() {
    let source = "PROGRAM p;
                  VAR a: INTEGER;
                  PROCEDURE show; BEGIN WRITELN(a) END;
                  FUNCTION one: INTEGER; BEGIN one := 1 END;
                  BEGIN
                      a := one;
                      show;
                      WRITE('x');
                      READLN(a)
                  END.";
    let body = body(source);

    assert!(matches!(assigned(&body[0]), Expr::FunctionCall(call) if call.arguments.is_empty()));
    assert!(matches!(&body[1], Statement::ProcedureCall(call) if call.name == "SHOW"));
    assert!(matches!(&body[2], Statement::Output { newline: false, .. }));
    assert!(matches!(&body[3], Statement::Input { newline: true, targets, .. } if targets.len() == 1));
}

#[test]
fn empty_statements_are_kept() {
    assert_eq!(body("PROGRAM p; BEGIN ; ; END.").len(), 3);
}

#[test]
fn declarations_keep_source_order() {
    let source = "PROGRAM p;
                  CONST limit = -5; greeting = 'hi';
                  VAR a, b: INTEGER; r: REAL;
                  PROCEDURE q(x, y: INTEGER; z: REAL); BEGIN END;
                  BEGIN END.";
    let declarations = parse(source).unwrap().block.declarations;
    let names: Vec<&str> = declarations.iter().map(Declaration::name).collect();

    assert_eq!(names, ["LIMIT", "GREETING", "A", "B", "R", "Q"]);
    assert!(matches!(&declarations[0],
                     Declaration::Constant { value: LiteralValue::Integer(-5), .. }));
    let Declaration::Procedure(q) = &declarations[5] else {
        panic!("expected a procedure");
    };
    assert_eq!(q.params.len(), 3);
}

#[test]
fn undeclared_identifier_is_rejected_while_parsing() {
    let error = parse("PROGRAM p; BEGIN x := 1 END.").unwrap_err();

    assert_eq!(error.code(), ErrorCode::IdentifierNotFound);
    assert_eq!(error.position().line, 1);
}

#[test]
fn routine_is_unknown_before_its_declaration() {
    let source = "PROGRAM p;
                  PROCEDURE a; BEGIN b END;
                  PROCEDURE b; BEGIN END;
                  BEGIN END.";

    assert_eq!(parse(source).unwrap_err().code(), ErrorCode::IdentifierNotFound);
}

#[test]
fn parameters_are_not_visible_outside_their_routine() {
    let source = "PROGRAM p;
                  PROCEDURE q(n: INTEGER); BEGIN n := 1 END;
                  BEGIN n := 2 END.";

    assert_eq!(parse(source).unwrap_err().code(), ErrorCode::IdentifierNotFound);
}

#[rstest]
#[case::missing_semicolon("PROGRAM p; VAR a: INTEGER; BEGIN a := 1 a := 2 END.")]
#[case::missing_dot("PROGRAM p; BEGIN END")]
#[case::text_after_dot("PROGRAM p; BEGIN END. VAR")]
#[case::missing_assign("PROGRAM p; VAR a: INTEGER; BEGIN a END.")]
#[case::unknown_type("PROGRAM p; VAR a: CHAR; BEGIN END.")]
#[case::unclosed_paren("PROGRAM p; VAR a: INTEGER; BEGIN a := (1 + 2 END.")]
fn grammar_violations(#[case] source: &str) {
    assert_eq!(parse(source).unwrap_err().code(), ErrorCode::UnexpectedToken);
}

#[test]
fn missing_program_name() {
    assert_eq!(parse("PROGRAM 1; BEGIN END.").unwrap_err().code(),
               ErrorCode::ExpectedIdentifier);
}

#[test]
fn premature_end_of_input_is_flagged() {
    let Err(Error::Parse(error)) = parse("PROGRAM p; BEGIN") else {
        panic!("expected a parse error");
    };
    assert!(error.is_end_of_input());
    assert!(matches!(error, ParseError::UnexpectedToken { .. }));
}

#[rstest]
#[case::variables("PROGRAM p; VAR a, a: INTEGER; BEGIN END.")]
#[case::constant_and_variable("PROGRAM p; CONST a = 1; VAR a: REAL; BEGIN END.")]
#[case::parameters("PROGRAM p; PROCEDURE q(n: INTEGER; n: REAL); BEGIN END; BEGIN END.")]
#[case::builtin_name("PROGRAM p; VAR writeln: INTEGER; BEGIN END.")]
fn duplicates_are_rejected_while_parsing(#[case] source: &str) {
    assert_eq!(parse(source).unwrap_err().code(), ErrorCode::DuplicateIdentifier);
}

fn nesting_failure(source: &str) -> ErrorCode {
    let error = parse(source).unwrap_err();
    assert!(matches!(error, Error::Parse(ParseError::NestingTooDeep { .. })), "{error}");
    error.code()
}

#[test]
fn deeply_parenthesized_expression_is_rejected() {
    let depth = 20_000;
    let source = format!("PROGRAM p; VAR a: INTEGER; BEGIN a := {}1{} END.",
                         "(".repeat(depth),
                         ")".repeat(depth));

    assert_eq!(nesting_failure(&source), ErrorCode::NestingTooDeep);
}

#[test]
fn long_prefix_operator_chain_is_rejected() {
    let source = format!("PROGRAM p; VAR a: INTEGER; BEGIN a := {}1 END.", "- ".repeat(20_000));

    assert_eq!(nesting_failure(&source), ErrorCode::NestingTooDeep);
}

#[test]
fn deeply_nested_blocks_are_rejected() {
    let depth = 20_000;
    let source = format!("PROGRAM p; BEGIN {} {} END.", "BEGIN ".repeat(depth), "END ".repeat(depth));

    assert_eq!(nesting_failure(&source), ErrorCode::NestingTooDeep);
}

#[test]
fn deeply_nested_routines_are_rejected() {
    let depth = 1_000;
    let source = format!("PROGRAM p; {} BEGIN END.",
                         "PROCEDURE q; ".repeat(depth) + &"BEGIN END; ".repeat(depth));

    assert_eq!(nesting_failure(&source), ErrorCode::NestingTooDeep);
}

#[test]
fn moderate_nesting_still_parses() {
    let source = format!("PROGRAM p; VAR a: INTEGER; BEGIN a := {}1{} END.",
                         "(".repeat(100),
                         ")".repeat(100));
    let body = body(&source);

    assert!(is_int(assigned(&body[0]), 1));
}
