use crate::{
    ast::{DataType, Expr, InputTarget, Statement},
    error::SemanticError,
    interpreter::{
        analyzer::{
            core::{AnalysisResult, SemanticAnalyzer},
            utils::name_token,
        },
        lexer::{Lexeme, Position, Token},
        symbol::SymbolKind,
    },
    util::stack::guarded,
};

impl SemanticAnalyzer {
    /// Checks a single statement and annotates it.
    pub(in crate::interpreter::analyzer) fn statement(&mut self,
                                                      statement: &mut Statement)
                                                      -> AnalysisResult<()> {
        guarded(|| self.check_statement(statement))
    }

    fn check_statement(&mut self, statement: &mut Statement) -> AnalysisResult<()> {
        match statement {
            Statement::Compound(statements) => {
                for statement in statements {
                    self.statement(statement)?;
                }
                Ok(())
            },
            Statement::Assign { target,
                                value,
                                position,
                                target_type, } => {
                let expected = self.assignment_target(target, *position)?;
                let found = self.expression(value)?;
                if !expected.accepts(found) {
                    return Err(SemanticError::TypeMismatch { token: name_token(target, *position),
                                                             expected,
                                                             found });
                }
                *target_type = Some(expected);
                Ok(())
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            position, } => {
                self.condition(condition, Lexeme::new(Token::If, *position))?;
                self.statement(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.statement(else_branch)?;
                }
                Ok(())
            },
            Statement::While { condition,
                               body,
                               position, } => {
                self.condition(condition, Lexeme::new(Token::While, *position))?;
                self.statement(body)
            },
            Statement::ProcedureCall(call) => self.call(call, false).map(|_| ()),
            Statement::Input { targets, .. } => {
                for target in targets {
                    self.input_target(target)?;
                }
                Ok(())
            },
            Statement::Output { arguments, .. } => {
                for argument in arguments {
                    self.expression(argument)?;
                }
                Ok(())
            },
            Statement::NoOp => Ok(()),
        }
    }

    /// Resolves the target of an assignment and returns its declared type.
    ///
    /// Variables are assignable. A function name is assignable only inside
    /// that function's body, where it sets the result.
    ///
    /// # Errors
    /// - `IdentifierNotFound` if the target is not declared.
    /// - `InvalidOperation` for constants, procedures, types, builtins and
    ///   functions outside their own body.
    fn assignment_target(&self, target: &str, position: Position) -> AnalysisResult<DataType> {
        let symbol = self.resolve(target, position)?;
        let assignable = match symbol.kind {
            SymbolKind::Variable => true,
            SymbolKind::Function(_) => self.functions.iter().any(|f| f == target),
            _ => false,
        };

        match symbol.data_type {
            Some(data_type) if assignable => Ok(data_type),
            _ => {
                Err(SemanticError::InvalidOperation { token:   name_token(target, position),
                                                      details: format!("cannot assign to {} {target}",
                                                                       symbol.kind_name()), })
            },
        }
    }

    /// Checks that a condition has type `BOOLEAN`.
    fn condition(&mut self, condition: &mut Expr, token: Lexeme) -> AnalysisResult<()> {
        let found = self.expression(condition)?;
        if found != DataType::Boolean {
            return Err(SemanticError::TypeMismatch { token,
                                                     expected: DataType::Boolean,
                                                     found });
        }
        Ok(())
    }

    /// Checks that an input target is a variable and records its type.
    fn input_target(&self, target: &mut InputTarget) -> AnalysisResult<()> {
        let symbol = self.resolve(&target.name, target.position)?;
        match (&symbol.kind, symbol.data_type) {
            (SymbolKind::Variable, Some(data_type)) => {
                target.data_type = Some(data_type);
                Ok(())
            },
            _ => Err(SemanticError::InvalidOperation { token:   name_token(&target.name,
                                                                           target.position),
                                                       details: format!("cannot read into {} {}",
                                                                        symbol.kind_name(),
                                                                        target.name), }),
        }
    }
}
