use thiserror::Error;

use crate::{ast::DataType, error::ErrorCode, interpreter::lexer::Position};

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// A call would exceed the configured call-depth limit.
    #[error("Error on line {}: Stack overflow calling {routine}: call depth limit of {limit} reached.",
            position.line)]
    StackOverflow {
        /// The routine being called.
        routine:  String,
        /// The configured limit.
        limit:    usize,
        /// The call site.
        position: Position,
    },
    /// Division or modulo by zero.
    #[error("Error on line {}: Division by zero.", position.line)]
    DivisionByZero {
        /// The operator position.
        position: Position,
    },
    /// Integer arithmetic left the 64-bit range, or an integer could not be
    /// promoted to a real without losing precision.
    #[error("Error on line {}: Integer overflow.", position.line)]
    Overflow {
        /// The operator position.
        position: Position,
    },
    /// An operand holds the value of a variable that was never assigned.
    #[error("Error on line {}: Operand of {operator} is used before it is assigned.", position.line)]
    UnassignedValue {
        /// The operator or statement using the value.
        operator: String,
        /// The position of the use.
        position: Position,
    },
    /// A condition did not evaluate to a boolean.
    #[error("Error on line {}: Expected a boolean condition.", position.line)]
    ExpectedBoolean {
        /// The position of the condition.
        position: Position,
    },
    /// Operand values do not fit the operator.
    #[error("Error on line {}: Type error: {details}.", position.line)]
    TypeMismatch {
        /// Details about the mismatch.
        details:  String,
        /// The operator position.
        position: Position,
    },
    /// An input line could not be parsed into the declared type.
    #[error("Error on line {}: Invalid input {text:?} for {expected}.", position.line)]
    InvalidInput {
        /// The line read.
        text:     String,
        /// The declared type of the target variable.
        expected: DataType,
        /// The position of the target.
        position: Position,
    },
    /// The input reader had no further line.
    #[error("Error on line {}: Input exhausted while reading {name}.", position.line)]
    InputExhausted {
        /// The target variable.
        name:     String,
        /// The position of the target.
        position: Position,
    },
    /// A name the analyzer accepted has no binding on the static-parent
    /// chain, or a call site was never annotated.
    #[error("Error on line {}: Unresolved identifier {name}.", position.line)]
    UnresolvedIdentifier {
        /// The name that could not be resolved.
        name:     String,
        /// The position of the reference.
        position: Position,
    },
}

impl RuntimeError {
    /// Returns the unified error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::StackOverflow { .. } => ErrorCode::StackOverflow,
            Self::DivisionByZero { .. } => ErrorCode::DivisionByZero,
            Self::Overflow { .. } => ErrorCode::Overflow,
            Self::UnassignedValue { .. } => ErrorCode::UnassignedValue,
            Self::ExpectedBoolean { .. } | Self::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            Self::InvalidInput { .. } | Self::InputExhausted { .. } => ErrorCode::InvalidInput,
            Self::UnresolvedIdentifier { .. } => ErrorCode::Internal,
        }
    }

    /// Returns the source position the error refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::StackOverflow { position, .. }
            | Self::DivisionByZero { position }
            | Self::Overflow { position }
            | Self::UnassignedValue { position, .. }
            | Self::ExpectedBoolean { position }
            | Self::TypeMismatch { position, .. }
            | Self::InvalidInput { position, .. }
            | Self::InputExhausted { position, .. }
            | Self::UnresolvedIdentifier { position, .. } => *position,
        }
    }
}
