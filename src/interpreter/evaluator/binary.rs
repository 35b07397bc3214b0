use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::Value,
    },
};

impl Context<'_, '_> {
    /// Evaluates a binary operation between two values.
    ///
    /// Integer arithmetic is checked. Mixing an integer with a real promotes
    /// the integer, and `/` always yields a real. `DIV` and `MOD` truncate
    /// toward zero. Comparisons accept two numbers or two booleans, and
    /// `AND`/`OR` accept two booleans.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Operator position for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Errors
    /// - `UnassignedValue` if either operand is [`Value::Null`].
    /// - `DivisionByZero` for a zero divisor.
    /// - `Overflow` if integer arithmetic leaves the 64-bit range.
    /// - `TypeMismatch` for operand types the operator does not accept.
    ///
    /// # Example
    /// ```
    /// use pascaline::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, lexer::Position, value::Value},
    /// };
    ///
    /// let at = Position::new(1, 1);
    ///
    /// let v = Context::eval_binary(BinaryOperator::IntDiv, &Value::Integer(8), &Value::Integer(4), at);
    /// assert_eq!(v.unwrap(), Value::Integer(2));
    ///
    /// let v = Context::eval_binary(BinaryOperator::RealDiv, &Value::Integer(7), &Value::Integer(2), at);
    /// assert_eq!(v.unwrap(), Value::Real(3.5));
    ///
    /// let v = Context::eval_binary(BinaryOperator::Add, &Value::Null, &Value::Integer(1), at);
    /// assert!(v.is_err());
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       position: Position)
                       -> EvalResult<Value> {
        use BinaryOperator::{And, IntDiv, Mod, Or, RealDiv};
        use Value::{Boolean, Integer, Null};

        if matches!(left, Null) || matches!(right, Null) {
            return Err(RuntimeError::UnassignedValue { operator: op.to_string(),
                                                       position });
        }

        match op {
            _ if op.is_relational() => Self::eval_comparison(op, left, right, position),

            And | Or => match (left, right) {
                (Boolean(a), Boolean(b)) => Ok(Boolean(if op == And { *a && *b } else { *a || *b })),
                _ => Err(mismatch(op, left, right, position)),
            },

            RealDiv => {
                let divisor = right.as_real(position)?;
                if divisor == 0.0 {
                    return Err(RuntimeError::DivisionByZero { position });
                }
                Ok(Value::Real(left.as_real(position)? / divisor))
            },

            IntDiv | Mod => match (left, right) {
                (Integer(_), Integer(0)) => Err(RuntimeError::DivisionByZero { position }),
                (Integer(a), Integer(b)) => {
                    let result = if op == IntDiv { a.checked_div(*b) } else { a.checked_rem(*b) };
                    result.map(Integer).ok_or(RuntimeError::Overflow { position })
                },
                _ => Err(mismatch(op, left, right, position)),
            },

            _ => Self::eval_arithmetic(op, left, right, position),
        }
    }

    /// Evaluates `+`, `-` and `*`.
    fn eval_arithmetic(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       position: Position)
                       -> EvalResult<Value> {
        use BinaryOperator::{Add, Mul, Sub};

        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => {
                let result = match op {
                    Add => a.checked_add(*b),
                    Sub => a.checked_sub(*b),
                    Mul => a.checked_mul(*b),
                    _ => return Err(mismatch(op, left, right, position)),
                };
                result.map(Value::Integer).ok_or(RuntimeError::Overflow { position })
            },
            (Value::Integer(_) | Value::Real(_), Value::Integer(_) | Value::Real(_)) => {
                let (a, b) = (left.as_real(position)?, right.as_real(position)?);
                match op {
                    Add => Ok(Value::Real(a + b)),
                    Sub => Ok(Value::Real(a - b)),
                    Mul => Ok(Value::Real(a * b)),
                    _ => Err(mismatch(op, left, right, position)),
                }
            },
            _ => Err(mismatch(op, left, right, position)),
        }
    }

    /// Evaluates the relational operators.
    fn eval_comparison(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       position: Position)
                       -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let ordering = match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Integer(_) | Value::Real(_), Value::Integer(_) | Value::Real(_)) => {
                let (a, b) = (left.as_real(position)?, right.as_real(position)?);
                a.partial_cmp(&b)
                 .ok_or_else(|| mismatch(op, left, right, position))?
            },
            _ => return Err(mismatch(op, left, right, position)),
        };

        let result = match op {
            Equal => ordering == Ordering::Equal,
            NotEqual => ordering != Ordering::Equal,
            Less => ordering == Ordering::Less,
            LessEqual => ordering != Ordering::Greater,
            Greater => ordering == Ordering::Greater,
            GreaterEqual => ordering != Ordering::Less,
            _ => return Err(mismatch(op, left, right, position)),
        };
        Ok(Value::Boolean(result))
    }
}

fn mismatch(op: BinaryOperator, left: &Value, right: &Value, position: Position) -> RuntimeError {
    RuntimeError::TypeMismatch { details: format!("cannot use {op} on {} and {}",
                                                  left.type_name(),
                                                  right.type_name()),
                                 position }
}
