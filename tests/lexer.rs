use pascaline::{
    error::LexicalErrorKind,
    interpreter::lexer::{Position, Token, tokenize},
};
use rstest::rstest;

fn kinds(source: &str) -> Vec<Token> {
    tokenize(source).unwrap().into_iter().map(|l| l.token).collect()
}

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(kinds("BEGIN begin BeGiN"),
               vec![Token::Begin, Token::Begin, Token::Begin, Token::EndOfInput]);
    assert_eq!(kinds("div Mod aNd"),
               vec![Token::Div, Token::Mod, Token::And, Token::EndOfInput]);
}

#[test]
fn identifiers_are_uppercased() {
    assert_eq!(kinds("fooBar _tmp1"),
               vec![Token::Identifier("FOOBAR".into()),
                    Token::Identifier("_TMP1".into()),
                    Token::EndOfInput]);
}

#[test]
fn keyword_prefix_is_an_identifier() {
    assert_eq!(kinds("ender doit"),
               vec![Token::Identifier("ENDER".into()),
                    Token::Identifier("DOIT".into()),
                    Token::EndOfInput]);
}

#[rstest]
#[case("42", Token::Integer(42))]
#[case("3.25", Token::Real(3.25))]
#[case("'hello'", Token::String("hello".into()))]
#[case("\"it's\"", Token::String("it's".into()))]
#[case("TRUE", Token::Boolean(true))]
#[case("false", Token::Boolean(false))]
#[case("integer", Token::IntegerType)]
#[case(":=", Token::Assign)]
#[case("<>", Token::NotEqual)]
#[case("<=", Token::LessEqual)]
#[case(">=", Token::GreaterEqual)]
fn single_tokens(#[case] source: &str, #[case] expected: Token) {
    assert_eq!(kinds(source), vec![expected, Token::EndOfInput]);
}

#[test]
fn both_comment_styles_are_skipped() {
    let source = "a { brace\ncomment } b (* block\n * comment *) c";
    let lexemes = tokenize(source).unwrap();

    let names: Vec<Token> = lexemes.iter().map(|l| l.token.clone()).collect();
    assert_eq!(names,
               vec![Token::Identifier("A".into()),
                    Token::Identifier("B".into()),
                    Token::Identifier("C".into()),
                    Token::EndOfInput]);
    assert_eq!(lexemes[1].position, Position::new(2, 11));
    assert_eq!(lexemes[2].position, Position::new(3, 15));
}

#[test]
fn positions_track_lines_and_columns() {
    let lexemes = tokenize("x\n  y := 1").unwrap();

    assert_eq!(lexemes[0].position, Position::new(1, 1));
    assert_eq!(lexemes[1].position, Position::new(2, 3));
    assert_eq!(lexemes[2].position, Position::new(2, 5));
    assert_eq!(lexemes[3].position, Position::new(2, 8));
}

#[rstest]
#[case::stray_character("x := 1 @", LexicalErrorKind::UnexpectedCharacter, "@", Position::new(1, 8))]
#[case::open_block_comment("x (* never closed", LexicalErrorKind::UnterminatedComment, "(*", Position::new(1, 3))]
#[case::open_brace_comment("x := 1;\n  { never closed\n", LexicalErrorKind::UnterminatedComment, "{", Position::new(2, 3))]
#[case::huge_integer("x := 99999999999999999999", LexicalErrorKind::LiteralOutOfRange, "99999999999999999999", Position::new(1, 6))]
fn lexical_errors_carry_their_reason(#[case] source: &str,
                                     #[case] kind: LexicalErrorKind,
                                     #[case] text: &str,
                                     #[case] position: Position) {
    let error = tokenize(source).unwrap_err();

    assert_eq!(error.kind, kind);
    assert_eq!(error.text, text);
    assert_eq!(error.position, position);
}

#[test]
fn lexical_error_message_names_the_reason() {
    let message = tokenize("(* open").unwrap_err().to_string();

    assert!(message.contains("unterminated comment"), "{message}");
    assert!(message.contains("line 1, column 1"), "{message}");
}

#[test]
fn closed_brace_comment_after_an_open_one_is_not_confused() {
    assert_eq!(kinds("{ a } b"), vec![Token::Identifier("B".into()), Token::EndOfInput]);
    assert_eq!(tokenize("{ a } b {").unwrap_err().kind, LexicalErrorKind::UnterminatedComment);
}

#[test]
fn printed_tokens_tokenize_to_the_same_sequence() {
    let source = "PROGRAM Demo; CONST pi = 3.14; VAR a, b: integer; s: STRING;\n\
                  BEGIN { body }\n  a := -(1 + 2) * 3 div 4 mod 5; s := 'x';\n\
                  IF (a <> b) and not FALSE THEN writeln(a / 2.5, s) END.";
    let first = kinds(source);
    let printed = first.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");

    assert_eq!(kinds(&printed), first);
}
