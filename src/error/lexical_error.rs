use thiserror::Error;

use crate::interpreter::lexer::Position;

/// Why the tokenizer stopped.
///
/// Doubles as the error type of the logos lexer; input that matches no
/// token pattern produces the default kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
pub enum LexicalErrorKind {
    /// The input cannot start any token.
    #[default]
    #[error("unexpected character")]
    UnexpectedCharacter,
    /// A `{ ... }` or `(* ... *)` comment reaches the end of the input.
    #[error("unterminated comment")]
    UnterminatedComment,
    /// A numeric literal has no 64-bit or finite real representation.
    #[error("literal out of range")]
    LiteralOutOfRange,
}

/// Input the tokenizer could not consume.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexical error at line {}, column {}: {kind} '{text}'.", position.line, position.column)]
pub struct LexicalError {
    /// What went wrong.
    pub kind:     LexicalErrorKind,
    /// The offending source text: the character, the comment opener or the
    /// literal.
    pub text:     String,
    /// Where the text starts in the source.
    pub position: Position,
}
