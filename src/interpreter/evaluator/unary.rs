use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::Value,
    },
};

impl Context<'_, '_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Plus`: identity on integers and reals.
    /// - `Minus`: checked negation on integers, negation on reals.
    /// - `Not`: boolean negation.
    ///
    /// # Errors
    /// - `UnassignedValue` if the operand is [`Value::Null`].
    /// - `Overflow` when negating `i64::MIN`.
    /// - `TypeMismatch` for any other operand type.
    ///
    /// # Example
    /// ```
    /// use pascaline::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, lexer::Position, value::Value},
    /// };
    ///
    /// let at = Position::new(1, 1);
    ///
    /// let v = Context::eval_unary(UnaryOperator::Minus, Value::Integer(5), at).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, Value::Boolean(false), at).unwrap();
    /// assert_eq!(v, Value::Boolean(true));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: Value, position: Position) -> EvalResult<Value> {
        match (op, value) {
            (_, Value::Null) => Err(RuntimeError::UnassignedValue { operator: op.to_string(),
                                                                    position }),
            (UnaryOperator::Plus, value @ (Value::Integer(_) | Value::Real(_))) => Ok(value),
            (UnaryOperator::Minus, Value::Integer(n)) => {
                n.checked_neg().map(Value::Integer).ok_or(RuntimeError::Overflow { position })
            },
            (UnaryOperator::Minus, Value::Real(r)) => Ok(Value::Real(-r)),
            (UnaryOperator::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
            (op, value) => {
                Err(RuntimeError::TypeMismatch { details: format!("cannot use {op} on {}",
                                                                  value.type_name()),
                                                 position })
            },
        }
    }
}
