use thiserror::Error;

use crate::{
    ast::DataType,
    error::ErrorCode,
    interpreter::lexer::{Lexeme, Position},
};

/// Represents the failures of the scope and type checks.
///
/// The parser raises the identifier-related variants while it consults the
/// open scope; the semantic analyzer raises all of them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    /// A name was declared twice in the same scope.
    #[error("Error on line {}: Duplicate identifier {token}.", token.position.line)]
    DuplicateIdentifier {
        /// The second declaration.
        token: Lexeme,
    },
    /// A name has no visible declaration.
    #[error("Error on line {}: Identifier not found {token}.", token.position.line)]
    IdentifierNotFound {
        /// The unresolved reference.
        token: Lexeme,
    },
    /// A call passed a different number of arguments than the callee
    /// declares.
    #[error("Error on line {}: Incorrect number of arguments for {token}: expected {expected}, found {found}.",
            token.position.line)]
    IncorrectArgumentCount {
        /// The call site.
        token:    Lexeme,
        /// The number of formal parameters.
        expected: usize,
        /// The number of actual arguments.
        found:    usize,
    },
    /// Two types that must agree do not.
    #[error("Error on line {}: Type mismatch at {token}: expected {expected}, found {found}.",
            token.position.line)]
    TypeMismatch {
        /// The construct being checked.
        token:    Lexeme,
        /// The type the construct requires.
        expected: DataType,
        /// The type that was supplied.
        found:    DataType,
    },
    /// An operator or statement is not applicable here.
    #[error("Error on line {}: Invalid operation at {token}: {details}.", token.position.line)]
    InvalidOperation {
        /// The construct being checked.
        token:   Lexeme,
        /// Why the operation is rejected.
        details: String,
    },
}

impl SemanticError {
    /// Returns the unified error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateIdentifier { .. } => ErrorCode::DuplicateIdentifier,
            Self::IdentifierNotFound { .. } => ErrorCode::IdentifierNotFound,
            Self::IncorrectArgumentCount { .. } => ErrorCode::IncorrectArgumentCount,
            Self::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            Self::InvalidOperation { .. } => ErrorCode::InvalidOperation,
        }
    }

    /// Returns the offending token.
    #[must_use]
    pub const fn token(&self) -> &Lexeme {
        match self {
            Self::DuplicateIdentifier { token }
            | Self::IdentifierNotFound { token }
            | Self::IncorrectArgumentCount { token, .. }
            | Self::TypeMismatch { token, .. }
            | Self::InvalidOperation { token, .. } => token,
        }
    }

    /// Returns the position of the offending token.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.token().position
    }
}
