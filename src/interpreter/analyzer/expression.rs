use crate::{
    ast::{Call, DataType, Expr, UnaryOperator},
    error::SemanticError,
    interpreter::{
        analyzer::{
            core::{AnalysisResult, SemanticAnalyzer},
            utils::{binary_token, name_token, result_type, supports, unary_token},
        },
        symbol::SymbolKind,
    },
    util::stack::guarded,
};

impl SemanticAnalyzer {
    /// Computes the static type of an expression.
    ///
    /// Function calls inside the expression are resolved and annotated.
    ///
    /// # Parameters
    /// - `expr`: The expression to check.
    ///
    /// # Returns
    /// The expression's type after `INTEGER` to `REAL` promotion.
    ///
    /// # Errors
    /// - `IdentifierNotFound` for an undeclared name.
    /// - `TypeMismatch` for operands of incompatible types.
    /// - `InvalidOperation` for an operator the operand type does not allow,
    ///   or a name that has no value.
    pub(in crate::interpreter::analyzer) fn expression(&mut self,
                                                       expr: &mut Expr)
                                                       -> AnalysisResult<DataType> {
        guarded(|| self.expression_type(expr))
    }

    fn expression_type(&mut self, expr: &mut Expr) -> AnalysisResult<DataType> {
        match expr {
            Expr::Constant { value, .. } => Ok(value.data_type()),
            Expr::Identifier { name, position } => {
                let symbol = self.resolve(name, *position)?;
                match (&symbol.kind, symbol.data_type) {
                    (SymbolKind::Variable | SymbolKind::Constant, Some(data_type)) => Ok(data_type),
                    _ => Err(SemanticError::InvalidOperation {
                        token:   name_token(name, *position),
                        details: format!("{} {name} has no value", symbol.kind_name()),
                    }),
                }
            },
            Expr::UnaryOp { op, expr, position } => {
                let operand = self.expression(expr)?;
                let valid = match op {
                    UnaryOperator::Plus | UnaryOperator::Minus => operand.is_numeric(),
                    UnaryOperator::Not => operand == DataType::Boolean,
                };
                if !valid {
                    return Err(SemanticError::InvalidOperation {
                        token:   unary_token(*op, *position),
                        details: format!("operator {op} is not applicable to {operand}"),
                    });
                }
                Ok(operand)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             position, } => {
                let left = self.expression(left)?;
                let right = self.expression(right)?;

                let operand = if left == right {
                    left
                } else if left.is_numeric() && right.is_numeric() {
                    DataType::Real
                } else {
                    return Err(SemanticError::TypeMismatch { token:    binary_token(*op, *position),
                                                             expected: left,
                                                             found:    right, });
                };

                if !supports(operand, *op) {
                    return Err(SemanticError::InvalidOperation {
                        token:   binary_token(*op, *position),
                        details: format!("operator {op} is not applicable to {operand}"),
                    });
                }
                Ok(result_type(operand, *op))
            },
            Expr::FunctionCall(call) => {
                self.call(call, true)?
                    .ok_or_else(|| SemanticError::InvalidOperation {
                        token:   name_token(&call.name, call.position),
                        details: format!("procedure {} has no value", call.name),
                    })
            },
        }
    }

    /// Resolves a call, checks its arguments and annotates it.
    ///
    /// # Parameters
    /// - `call`: The call node; its `symbol` is set on success.
    /// - `function`: Whether the call appears in an expression.
    ///
    /// # Returns
    /// The result type for functions, `None` for procedures.
    ///
    /// # Errors
    /// - `IdentifierNotFound` if the callee is not declared.
    /// - `InvalidOperation` if the callee is not a routine of the expected
    ///   kind.
    /// - `IncorrectArgumentCount` if the argument count differs from the
    ///   parameter count.
    /// - `TypeMismatch` if an argument cannot be passed to its parameter.
    pub(in crate::interpreter::analyzer) fn call(&mut self,
                                                 call: &mut Call,
                                                 function: bool)
                                                 -> AnalysisResult<Option<DataType>> {
        let symbol = self.resolve(&call.name, call.position)?;
        let routine = match (&symbol.kind, function) {
            (SymbolKind::Function(routine), true) | (SymbolKind::Procedure(routine), false) => {
                routine
            },
            _ => {
                let expected = if function { "function" } else { "procedure" };
                return Err(SemanticError::InvalidOperation {
                    token:   name_token(&call.name, call.position),
                    details: format!("{} {} is not a {expected}", symbol.kind_name(), call.name),
                });
            },
        };

        if routine.params.len() != call.arguments.len() {
            return Err(SemanticError::IncorrectArgumentCount { token:    name_token(&call.name,
                                                                                    call.position),
                                                               expected: routine.params.len(),
                                                               found:    call.arguments.len(), });
        }

        for (argument, param) in call.arguments.iter_mut().zip(&routine.params) {
            let found = self.expression(argument)?;
            if !param.data_type.accepts(found) {
                return Err(SemanticError::TypeMismatch { token:    name_token(&call.name,
                                                                              argument.position()),
                                                         expected: param.data_type,
                                                         found });
            }
        }

        let data_type = symbol.data_type;
        call.symbol = Some(symbol);
        Ok(data_type)
    }
}
