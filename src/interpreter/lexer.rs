use logos::{FilterResult, Logos};

use crate::error::{LexicalError, LexicalErrorKind};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
///
/// Keywords are matched regardless of case and identifiers are normalized to
/// uppercase, so `Begin`, `BEGIN` and `begin` are the same token.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexicalErrorKind)]
pub enum Token {
    /// Real literal tokens, such as `3.14`. Exponents are not supported.
    #[regex(r"[0-9]+\.[0-9]+", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens, quoted with `'` or `"`. The payload excludes
    /// the quotes.
    #[regex(r"'[^'\n]*'", parse_string, allow_greedy = true)]
    #[regex(r#""[^"\n]*""#, parse_string, allow_greedy = true)]
    String(String),
    /// Boolean literal tokens, `TRUE` or `FALSE`.
    #[token("true", |_| true, ignore(case))]
    #[token("false", |_| false, ignore(case))]
    Boolean(bool),
    /// `PROGRAM`
    #[token("program", ignore(case))]
    Program,
    /// `PROCEDURE`
    #[token("procedure", ignore(case))]
    Procedure,
    /// `FUNCTION`
    #[token("function", ignore(case))]
    Function,
    /// `VAR`
    #[token("var", ignore(case))]
    Var,
    /// `CONST`
    #[token("const", ignore(case))]
    Const,
    /// `BEGIN`
    #[token("begin", ignore(case))]
    Begin,
    /// `END`
    #[token("end", ignore(case))]
    End,
    /// `IF`
    #[token("if", ignore(case))]
    If,
    /// `THEN`
    #[token("then", ignore(case))]
    Then,
    /// `ELSE`
    #[token("else", ignore(case))]
    Else,
    /// `WHILE`
    #[token("while", ignore(case))]
    While,
    /// `DO`
    #[token("do", ignore(case))]
    Do,
    /// `DIV`
    #[token("div", ignore(case))]
    Div,
    /// `MOD`
    #[token("mod", ignore(case))]
    Mod,
    /// `AND`
    #[token("and", ignore(case))]
    And,
    /// `OR`
    #[token("or", ignore(case))]
    Or,
    /// `NOT`
    #[token("not", ignore(case))]
    Not,
    /// `INTEGER`
    #[token("integer", ignore(case))]
    IntegerType,
    /// `REAL`
    #[token("real", ignore(case))]
    RealType,
    /// `STRING`
    #[token("string", ignore(case))]
    StringType,
    /// `BOOLEAN`
    #[token("boolean", ignore(case))]
    BooleanType,
    /// Identifier tokens, such as `x` or `factorial`, stored in uppercase.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_ascii_uppercase())]
    Identifier(String),
    /// `:=`
    #[token(":=")]
    Assign,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `=`
    #[token("=")]
    Equal,
    /// `<>`
    #[token("<>")]
    NotEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `{ Comments. }`
    #[regex(r"\{[^}]*\}", |lex| {
        skip_newlines(lex);
        logos::Skip
    }, allow_greedy = true)]
    #[regex(r"\{[^}]*", unterminated_comment, allow_greedy = true)]
    BraceComment,
    /// `(* Comments. *)`
    #[token("(*", block_comment)]
    BlockComment,
    /// Line breaks.
    #[token("\n", |lex| {
        lex.extras.line      += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// Sentinel appended by [`tokenize`] after the last token.
    EndOfInput,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(v) => {
                let text = v.to_string();
                if text.contains('.') { write!(f, "{text}") } else { write!(f, "{text}.0") }
            },
            Self::Integer(v) => write!(f, "{v}"),
            Self::String(s) if s.contains('\'') => write!(f, "\"{s}\""),
            Self::String(s) => write!(f, "'{s}'"),
            Self::Boolean(true) => write!(f, "TRUE"),
            Self::Boolean(false) => write!(f, "FALSE"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Program => write!(f, "PROGRAM"),
            Self::Procedure => write!(f, "PROCEDURE"),
            Self::Function => write!(f, "FUNCTION"),
            Self::Var => write!(f, "VAR"),
            Self::Const => write!(f, "CONST"),
            Self::Begin => write!(f, "BEGIN"),
            Self::End => write!(f, "END"),
            Self::If => write!(f, "IF"),
            Self::Then => write!(f, "THEN"),
            Self::Else => write!(f, "ELSE"),
            Self::While => write!(f, "WHILE"),
            Self::Do => write!(f, "DO"),
            Self::Div => write!(f, "DIV"),
            Self::Mod => write!(f, "MOD"),
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::Not => write!(f, "NOT"),
            Self::IntegerType => write!(f, "INTEGER"),
            Self::RealType => write!(f, "REAL"),
            Self::StringType => write!(f, "STRING"),
            Self::BooleanType => write!(f, "BOOLEAN"),
            Self::Assign => write!(f, ":="),
            Self::Colon => write!(f, ":"),
            Self::Semicolon => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Equal => write!(f, "="),
            Self::NotEqual => write!(f, "<>"),
            Self::Less => write!(f, "<"),
            Self::LessEqual => write!(f, "<="),
            Self::Greater => write!(f, ">"),
            Self::GreaterEqual => write!(f, ">="),
            Self::BraceComment
            | Self::BlockComment
            | Self::NewLine
            | Self::Ignored
            | Self::EndOfInput => Ok(()),
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset the line starts at, so
/// every token can be given a line and column.
pub struct LexerExtras {
    /// The current line number in the source being tokenized, starting at 1.
    pub line:       usize,
    /// The byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// A 1-based line and column in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// The line number.
    pub line:   usize,
    /// The column number, counted in bytes from the start of the line.
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A token together with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    /// The token.
    pub token:    Token,
    /// Where the token starts.
    pub position: Position,
}

impl Lexeme {
    /// Creates a new lexeme.
    #[must_use]
    pub const fn new(token: Token, position: Position) -> Self {
        Self { token, position }
    }
}

impl std::fmt::Display for Lexeme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.token {
            Token::EndOfInput => write!(f, "end of input at {}", self.position),
            token => write!(f, "'{token}' at {}", self.position),
        }
    }
}

/// Converts source text into a token stream terminated by
/// [`Token::EndOfInput`].
///
/// Whitespace and both comment styles are skipped. Newlines inside comments
/// still advance the line counter.
///
/// # Parameters
/// - `source`: The program text.
///
/// # Returns
/// Every token in source order, each with its position.
///
/// # Errors
/// Returns a [`LexicalError`] whose [`LexicalErrorKind`] tells apart a
/// character that cannot start a token, an unterminated comment and a
/// numeric literal out of range.
///
/// # Example
/// ```
/// use pascaline::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x := 1 { set x }").unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|l| l.token).collect();
///
/// assert_eq!(kinds,
///            vec![Token::Identifier("X".into()),
///                 Token::Assign,
///                 Token::Integer(1),
///                 Token::EndOfInput]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Lexeme>, LexicalError> {
    let mut lexer = Token::lexer(source);
    let mut lexemes = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let position = Position::new(lexer.extras.line, span.start - lexer.extras.line_start + 1);

        match result {
            Ok(token) => lexemes.push(Lexeme::new(token, position)),
            Err(kind) => {
                let slice = lexer.slice();
                let text = match kind {
                    LexicalErrorKind::UnexpectedCharacter => slice.chars().take(1).collect(),
                    LexicalErrorKind::UnterminatedComment if slice.starts_with("(*") => "(*".into(),
                    LexicalErrorKind::UnterminatedComment => "{".into(),
                    LexicalErrorKind::LiteralOutOfRange => slice.to_string(),
                };
                return Err(LexicalError { kind, text, position });
            },
        }
    }

    let end = Position::new(lexer.extras.line, source.len() - lexer.extras.line_start + 1);
    lexemes.push(Lexeme::new(Token::EndOfInput, end));

    Ok(lexemes)
}

/// Advances the line counter past every newline in the current slice.
fn skip_newlines(lex: &mut logos::Lexer<Token>) {
    let start = lex.span().start;
    for (offset, _) in lex.slice().match_indices('\n') {
        lex.extras.line      += 1;
        lex.extras.line_start = start + offset + 1;
    }
}

/// Skips a `(* ... *)` comment whose opening delimiter was just matched.
///
/// # Returns
/// - `FilterResult::Skip` once the closing `*)` has been consumed.
/// - `FilterResult::Error` if the input ends inside the comment.
fn block_comment(lex: &mut logos::Lexer<Token>) -> FilterResult<(), LexicalErrorKind> {
    let Some(end) = lex.remainder().find("*)") else {
        return FilterResult::Error(LexicalErrorKind::UnterminatedComment);
    };
    lex.bump(end + 2);
    skip_newlines(lex);

    FilterResult::Skip
}

/// Rejects a `{` comment that runs to the end of the input.
fn unterminated_comment(_: &mut logos::Lexer<Token>) -> FilterResult<(), LexicalErrorKind> {
    FilterResult::Error(LexicalErrorKind::UnterminatedComment)
}

/// Parses a real literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Ok(f64)`: The parsed value if it is finite.
/// - `Err(LexicalErrorKind::LiteralOutOfRange)`: Otherwise.
fn parse_real(lex: &logos::Lexer<Token>) -> Result<f64, LexicalErrorKind> {
    lex.slice()
       .parse()
       .ok()
       .filter(|v: &f64| v.is_finite())
       .ok_or(LexicalErrorKind::LiteralOutOfRange)
}
/// Parses an integer literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Ok(i64)`: The parsed integer value if successful.
/// - `Err(LexicalErrorKind::LiteralOutOfRange)`: If the literal does not fit
///   into an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexicalErrorKind> {
    lex.slice().parse().map_err(|_| LexicalErrorKind::LiteralOutOfRange)
}
/// Strips the surrounding quotes from a string literal.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}
