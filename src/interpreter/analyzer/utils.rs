use crate::{
    ast::{BinaryOperator, DataType, UnaryOperator},
    interpreter::lexer::{Lexeme, Position, Token},
};

/// Builds the identifier token reported for `name`.
pub(in crate::interpreter::analyzer) fn name_token(name: &str, position: Position) -> Lexeme {
    Lexeme::new(Token::Identifier(name.to_string()), position)
}

/// Builds the token reported for a binary operator.
pub(in crate::interpreter::analyzer) const fn binary_token(op: BinaryOperator,
                                                           position: Position)
                                                           -> Lexeme {
    let token = match op {
        BinaryOperator::Add => Token::Plus,
        BinaryOperator::Sub => Token::Minus,
        BinaryOperator::Mul => Token::Star,
        BinaryOperator::RealDiv => Token::Slash,
        BinaryOperator::IntDiv => Token::Div,
        BinaryOperator::Mod => Token::Mod,
        BinaryOperator::Equal => Token::Equal,
        BinaryOperator::NotEqual => Token::NotEqual,
        BinaryOperator::Less => Token::Less,
        BinaryOperator::LessEqual => Token::LessEqual,
        BinaryOperator::Greater => Token::Greater,
        BinaryOperator::GreaterEqual => Token::GreaterEqual,
        BinaryOperator::And => Token::And,
        BinaryOperator::Or => Token::Or,
    };
    Lexeme::new(token, position)
}

/// Builds the token reported for a unary operator.
pub(in crate::interpreter::analyzer) const fn unary_token(op: UnaryOperator,
                                                          position: Position)
                                                          -> Lexeme {
    let token = match op {
        UnaryOperator::Plus => Token::Plus,
        UnaryOperator::Minus => Token::Minus,
        UnaryOperator::Not => Token::Not,
    };
    Lexeme::new(token, position)
}

/// Returns `true` if `op` may be applied to two operands of type
/// `data_type`.
///
/// | type      | operators                                  |
/// |-----------|--------------------------------------------|
/// | `INTEGER` | `+ - * / DIV MOD`, relational              |
/// | `REAL`    | `+ - * /`, relational                      |
/// | `BOOLEAN` | `AND OR`, relational                       |
/// | `STRING`  | none                                       |
///
/// # Example
/// ```
/// use pascaline::{
///     ast::{BinaryOperator, DataType},
///     interpreter::analyzer::utils::supports,
/// };
///
/// assert!(supports(DataType::Integer, BinaryOperator::Mod));
/// assert!(!supports(DataType::Real, BinaryOperator::IntDiv));
/// assert!(!supports(DataType::String, BinaryOperator::Equal));
/// ```
#[must_use]
pub const fn supports(data_type: DataType, op: BinaryOperator) -> bool {
    use BinaryOperator::{Add, And, IntDiv, Mod, Mul, Or, RealDiv, Sub};

    match data_type {
        DataType::Integer => {
            matches!(op, Add | Sub | Mul | RealDiv | IntDiv | Mod) || op.is_relational()
        },
        DataType::Real => matches!(op, Add | Sub | Mul | RealDiv) || op.is_relational(),
        DataType::Boolean => matches!(op, And | Or) || op.is_relational(),
        DataType::String => false,
    }
}

/// Returns the type of `left op right` given the promoted operand type.
#[must_use]
pub const fn result_type(operand: DataType, op: BinaryOperator) -> DataType {
    match op {
        _ if op.is_relational() => DataType::Boolean,
        BinaryOperator::And | BinaryOperator::Or => DataType::Boolean,
        BinaryOperator::RealDiv => DataType::Real,
        _ => operand,
    }
}
