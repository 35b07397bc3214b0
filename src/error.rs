/// Lexical errors.
///
/// Raised by the tokenizer when a character cannot start any token, when a
/// comment is never closed, or when an integer literal does not fit into 64
/// bits.
pub mod lexical_error;
/// Parsing errors.
///
/// Defines the errors raised when the token stream matches no grammar
/// alternative, including a premature end of input, and when the source
/// nests too deeply.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing an analyzed
/// program: stack overflow, division by zero, integer overflow, use of an
/// unassigned value, malformed input, and internal inconsistencies between
/// the static and dynamic scope models.
pub mod runtime_error;
/// Semantic errors.
///
/// Raised by the scope checks in the parser and by the semantic analyzer:
/// duplicate or unknown identifiers, wrong argument counts, type mismatches
/// and operations a type does not support.
pub mod semantic_error;

pub use lexical_error::{LexicalError, LexicalErrorKind};
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;
use thiserror::Error;

use crate::interpreter::lexer::Position;

/// Every failure the pipeline can report, collapsed into one enumeration.
///
/// The numeric value of a code doubles as the process exit status of the
/// command-line driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Input the tokenizer cannot consume; the [`LexicalErrorKind`] says why.
    UnexpectedCharacter = 100,
    /// A token that matches no grammar alternative.
    UnexpectedToken = 101,
    /// An identifier was required.
    ExpectedIdentifier = 102,
    /// An identifier was used without a visible declaration.
    IdentifierNotFound = 103,
    /// An identifier was declared twice in the same scope.
    DuplicateIdentifier = 104,
    /// A call passed the wrong number of arguments.
    IncorrectArgumentCount = 105,
    /// Two types that must agree do not.
    TypeMismatch = 106,
    /// An operator or statement is not applicable to its operands.
    InvalidOperation = 107,
    /// The call-depth limit was exceeded.
    StackOverflow = 108,
    /// Division or modulo by zero.
    DivisionByZero = 109,
    /// Integer arithmetic overflowed.
    Overflow = 110,
    /// A declared but never assigned value was used as an operand.
    UnassignedValue = 111,
    /// A line read for `READ`/`READLN` could not be parsed or was missing.
    InvalidInput = 112,
    /// The static and dynamic scope models disagree.
    Internal = 113,
    /// The source nests deeper than the parser accepts.
    NestingTooDeep = 114,
}

impl ErrorCode {
    /// Returns the short human-readable description of the code.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::UnexpectedCharacter => "Unexpected character",
            Self::UnexpectedToken => "Unexpected token",
            Self::ExpectedIdentifier => "Expected identifier",
            Self::IdentifierNotFound => "Identifier not found",
            Self::DuplicateIdentifier => "Duplicate identifier",
            Self::IncorrectArgumentCount => "Incorrect number of arguments",
            Self::TypeMismatch => "Type mismatch",
            Self::InvalidOperation => "Invalid operation",
            Self::StackOverflow => "Stack overflow",
            Self::DivisionByZero => "Division by zero",
            Self::Overflow => "Integer overflow",
            Self::UnassignedValue => "Unassigned value",
            Self::InvalidInput => "Invalid input",
            Self::Internal => "Internal error",
            Self::NestingTooDeep => "Nesting too deep",
        }
    }

    /// Returns the process exit status associated with the code.
    ///
    /// # Example
    /// ```
    /// use pascaline::error::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::IdentifierNotFound.status(), 103);
    /// ```
    #[must_use]
    pub const fn status(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// The pipeline phase an error originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised while tokenizing.
    Lexical,
    /// Raised while matching the grammar.
    Parse,
    /// Raised by scope or type checks, in the parser or the analyzer.
    Semantic,
    /// Raised while executing.
    Runtime,
}

/// The crate-level error returned by every public entry point.
///
/// Callers receive a structured `(kind, code, position, message)` view of the
/// failure through [`Error::kind`], [`Error::code`], [`Error::position`] and
/// the `Display` implementation.
#[derive(Debug, Error)]
pub enum Error {
    /// See [`LexicalError`].
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    /// See [`ParseError`].
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// See [`SemanticError`].
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    /// See [`RuntimeError`].
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the phase the error was raised in.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Lexical(_) => ErrorKind::Lexical,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Semantic(_) => ErrorKind::Semantic,
            Self::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// Returns the unified error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Lexical(_) => ErrorCode::UnexpectedCharacter,
            Self::Parse(e) => e.code(),
            Self::Semantic(e) => e.code(),
            Self::Runtime(e) => e.code(),
        }
    }

    /// Returns the source position the error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Lexical(e) => e.position,
            Self::Parse(e) => e.position(),
            Self::Semantic(e) => e.position(),
            Self::Runtime(e) => e.position(),
        }
    }

    /// Returns the non-zero process status for this error.
    #[must_use]
    pub const fn status(&self) -> i32 {
        self.code().status()
    }
}
