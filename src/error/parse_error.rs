use thiserror::Error;

use crate::{
    error::ErrorCode,
    interpreter::lexer::{Lexeme, Position, Token},
};

/// Represents all errors raised when the token stream does not match the
/// grammar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Found a token no grammar alternative accepts at this point. Running
    /// into [`Token::EndOfInput`] early is reported through this variant too.
    #[error("Error on line {}: Unexpected token {found}, expected {expected}.", found.position.line)]
    UnexpectedToken {
        /// The token encountered.
        found:    Lexeme,
        /// A description of what the grammar accepts here.
        expected: String,
    },
    /// An identifier was required but something else was found.
    #[error("Error on line {}: Expected identifier, found {found}.", found.position.line)]
    ExpectedIdentifier {
        /// The token encountered.
        found: Lexeme,
    },
    /// Statements, expressions or routine declarations are nested deeper
    /// than the parser accepts.
    #[error("Error on line {}: Nesting exceeds {limit} levels at {found}.", found.position.line)]
    NestingTooDeep {
        /// The token opening the level that exceeded the limit.
        found: Lexeme,
        /// The nesting limit.
        limit: usize,
    },
}

impl ParseError {
    /// Builds an [`ParseError::UnexpectedToken`] from the offending lexeme.
    pub fn unexpected(found: &Lexeme, expected: impl Into<String>) -> Self {
        Self::UnexpectedToken { found:    found.clone(),
                                expected: expected.into(), }
    }

    /// Returns the unified error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnexpectedToken { .. } => ErrorCode::UnexpectedToken,
            Self::ExpectedIdentifier { .. } => ErrorCode::ExpectedIdentifier,
            Self::NestingTooDeep { .. } => ErrorCode::NestingTooDeep,
        }
    }

    /// Returns the offending token.
    #[must_use]
    pub const fn token(&self) -> &Lexeme {
        match self {
            Self::UnexpectedToken { found, .. }
            | Self::ExpectedIdentifier { found }
            | Self::NestingTooDeep { found, .. } => found,
        }
    }

    /// Returns the position of the offending token.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.token().position
    }

    /// Returns `true` if the parser ran out of tokens.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        self.token().token == Token::EndOfInput
    }
}
