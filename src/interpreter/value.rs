use crate::{
    ast::{DataType, LiteralValue},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::Position},
};

/// Largest magnitude an `INTEGER` may have to be promoted to `REAL`
/// exactly (`2^53`).
pub const MAX_PROMOTABLE_INTEGER: u64 = 1 << 53;

/// Represents a runtime value in the interpreter.
///
/// This enum models all the values that can appear in expressions,
/// assignments, function results and conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Real(f64),
    /// A string.
    String(String),
    /// A boolean value, produced by relational and logical operators and
    /// required by `IF` and `WHILE` conditions.
    Boolean(bool),
    /// The value of a declared variable that has not been assigned yet.
    /// Printing it is allowed; using it as an operand is an error.
    Null,
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(v) => Self::Integer(*v),
            LiteralValue::Real(v) => Self::Real(*v),
            LiteralValue::String(s) => Self::String(s.clone()),
            LiteralValue::Boolean(b) => Self::Boolean(*b),
        }
    }
}

impl Value {
    /// Returns the type of the value, or `None` for [`Value::Null`].
    #[must_use]
    pub const fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Integer(_) => Some(DataType::Integer),
            Self::Real(_) => Some(DataType::Real),
            Self::String(_) => Some(DataType::String),
            Self::Boolean(_) => Some(DataType::Boolean),
            Self::Null => None,
        }
    }

    /// Returns the name of the value's type for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self.data_type() {
            Some(data_type) => data_type.name(),
            None => "NULL",
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Accepts `Value::Real` and `Value::Integer`.
    /// For integers, conversion fails if the value is too large to be
    /// represented as `f64` exactly.
    ///
    /// # Parameters
    /// - `position`: Source position for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If value is real or a safe integer.
    /// - `Err(RuntimeError::Overflow)`: If the integer is not representable.
    /// - `Err(RuntimeError::TypeMismatch)`: If the value is not numeric.
    ///
    /// # Example
    /// ```
    /// use pascaline::interpreter::{
    ///     lexer::Position,
    ///     value::{MAX_PROMOTABLE_INTEGER, Value},
    /// };
    ///
    /// let at = Position::new(1, 1);
    /// assert_eq!(Value::Integer(10).as_real(at).unwrap(), 10.0);
    ///
    /// // 2^53 + 1 has no exact REAL counterpart.
    /// let odd = Value::Integer(MAX_PROMOTABLE_INTEGER as i64 + 1);
    /// assert!(odd.as_real(at).is_err());
    /// ```
    pub fn as_real(&self, position: Position) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => promote(*n, position),
            _ => Err(RuntimeError::TypeMismatch { details: format!("expected a number, found {}",
                                                                   self.type_name()),
                                                  position }),
        }
    }

    /// Converts a value to the declared type of the variable or parameter it
    /// is stored in.
    ///
    /// An `INTEGER` stored into a `REAL` is promoted. [`Value::Null`] is kept
    /// as is, so passing an unassigned variable passes the marker along.
    ///
    /// # Errors
    /// - `Overflow` if an integer cannot be promoted exactly.
    /// - `TypeMismatch` if the value has a different type.
    pub fn coerce(self, target: DataType, position: Position) -> EvalResult<Self> {
        match (self, target) {
            (Self::Integer(n), DataType::Real) => {
                Ok(Self::Real(promote(n, position)?))
            },
            (value, target) if value.data_type().is_none_or(|t| t == target) => Ok(value),
            (value, target) => {
                Err(RuntimeError::TypeMismatch { details: format!("cannot store {} in {target}",
                                                                  value.type_name()),
                                                 position })
            },
        }
    }

    /// Parses one line of input as a value of the given type.
    ///
    /// Numbers and booleans may be surrounded by whitespace, booleans are
    /// `TRUE` or `FALSE` in any case, and a `REAL` accepts integer notation.
    /// Strings are taken verbatim.
    ///
    /// # Parameters
    /// - `text`: The line, without its terminator.
    /// - `data_type`: The declared type of the target variable.
    /// - `position`: The position of the target, for error reporting.
    ///
    /// # Errors
    /// `InvalidInput` if the line is not a value of that type.
    ///
    /// # Example
    /// ```
    /// use pascaline::{
    ///     ast::DataType,
    ///     interpreter::{lexer::Position, value::Value},
    /// };
    ///
    /// let at = Position::new(1, 1);
    ///
    /// assert_eq!(Value::parse(" 42 ", DataType::Integer, at).unwrap(), Value::Integer(42));
    /// assert_eq!(Value::parse("true", DataType::Boolean, at).unwrap(), Value::Boolean(true));
    /// assert!(Value::parse("4.2", DataType::Integer, at).is_err());
    /// ```
    pub fn parse(text: &str, data_type: DataType, position: Position) -> EvalResult<Self> {
        let trimmed = text.trim();
        let parsed = match data_type {
            DataType::Integer => trimmed.parse().ok().map(Self::Integer),
            DataType::Real => {
                trimmed.parse::<f64>().ok().filter(|r| r.is_finite()).map(Self::Real)
            },
            DataType::Boolean => match trimmed.to_ascii_uppercase().as_str() {
                "TRUE" => Some(Self::Boolean(true)),
                "FALSE" => Some(Self::Boolean(false)),
                _ => None,
            },
            DataType::String => Some(Self::String(text.to_string())),
        };

        parsed.ok_or_else(|| RuntimeError::InvalidInput { text: text.to_string(),
                                                          expected: data_type,
                                                          position })
    }
}

impl std::fmt::Display for Value {
    /// Formats the value the way `WRITE` prints it.
    ///
    /// Reals always show a fractional digit, booleans print as `TRUE` or
    /// `FALSE`, and an unassigned value prints as `NULL`.
    ///
    /// # Example
    /// ```
    /// use pascaline::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Real(2.0).to_string(), "2.0");
    /// assert_eq!(Value::Real(0.25).to_string(), "0.25");
    /// assert_eq!(Value::Boolean(false).to_string(), "FALSE");
    /// assert_eq!(Value::Null.to_string(), "NULL");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => {
                let text = r.to_string();
                if text.contains('.') || !r.is_finite() {
                    write!(f, "{text}")
                } else {
                    write!(f, "{text}.0")
                }
            },
            Self::String(s) => write!(f, "{s}"),
            Self::Boolean(true) => write!(f, "TRUE"),
            Self::Boolean(false) => write!(f, "FALSE"),
            Self::Null => write!(f, "NULL"),
        }
    }
}

/// Promotes an `INTEGER` to a `REAL`.
///
/// # Errors
/// `Overflow` if the magnitude exceeds [`MAX_PROMOTABLE_INTEGER`], where
/// the nearest `f64` would no longer equal the integer.
#[allow(clippy::cast_precision_loss)]
const fn promote(n: i64, position: Position) -> EvalResult<f64> {
    if n.unsigned_abs() > MAX_PROMOTABLE_INTEGER {
        return Err(RuntimeError::Overflow { position });
    }
    Ok(n as f64)
}
