use crate::{
    ast::{Block, Declaration, Expr, InputTarget, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::Position,
        value::Value,
    },
    util::stack::guarded,
};

impl Context<'_, '_> {
    /// Executes a block in the current frame.
    ///
    /// Every variable declared directly in the block is bound to
    /// [`Value::Null`] and every constant to its value before the first
    /// statement runs.
    pub fn block(&mut self, block: &Block) -> EvalResult<()> {
        for declaration in &block.declarations {
            let (name, value) = match declaration {
                Declaration::Variable { name, .. } => (name, Value::Null),
                Declaration::Constant { name, value, .. } => (name, Value::from(value)),
                Declaration::Procedure(_) | Declaration::Function(_) => continue,
            };
            if let Some(frame) = self.call_stack.top_mut() {
                frame.define(name.as_str(), value);
            }
        }
        for statement in &block.body {
            self.execute(statement)?;
        }
        Ok(())
    }

    /// Executes a single statement.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    ///
    /// # Errors
    /// Any runtime error raised while evaluating the statement's
    /// expressions, calls or input.
    pub fn execute(&mut self, statement: &Statement) -> EvalResult<()> {
        guarded(|| self.execute_inner(statement))
    }

    fn execute_inner(&mut self, statement: &Statement) -> EvalResult<()> {
        match statement {
            Statement::Compound(statements) => {
                for statement in statements {
                    self.execute(statement)?;
                }
                Ok(())
            },
            Statement::Assign { target,
                                value,
                                position,
                                target_type, } => {
                let mut value = self.eval(value)?;
                if let Some(data_type) = target_type {
                    value = value.coerce(*data_type, *position)?;
                }
                self.assign(target, value, *position)
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            position, } => {
                if self.condition(condition, *position)? {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            },
            Statement::While { condition,
                               body,
                               position, } => {
                while self.condition(condition, *position)? {
                    self.execute(body)?;
                }
                Ok(())
            },
            Statement::ProcedureCall(call) => self.call(call).map(|_| ()),
            Statement::Input { targets, .. } => {
                for target in targets {
                    self.read(target)?;
                }
                Ok(())
            },
            Statement::Output { newline,
                                arguments,
                                .. } => {
                let mut text = String::new();
                for argument in arguments {
                    text.push_str(&self.eval(argument)?.to_string());
                }
                if *newline {
                    text.push('\n');
                }
                self.output.push_str(&text);
                Ok(())
            },
            Statement::NoOp => Ok(()),
        }
    }

    /// Evaluates an `IF` or `WHILE` condition.
    ///
    /// # Errors
    /// - `UnassignedValue` if the condition is an unassigned variable.
    /// - `ExpectedBoolean` for any other non-boolean value.
    fn condition(&mut self, condition: &Expr, position: Position) -> EvalResult<bool> {
        match self.eval(condition)? {
            Value::Boolean(b) => Ok(b),
            Value::Null => Err(RuntimeError::UnassignedValue { operator: "condition".to_string(),
                                                               position }),
            _ => Err(RuntimeError::ExpectedBoolean { position }),
        }
    }

    /// Reads one line into an input target.
    ///
    /// # Errors
    /// - `InputExhausted` if the reader has no further line.
    /// - `InvalidInput` if the line does not parse as the target's type.
    fn read(&mut self, target: &InputTarget) -> EvalResult<()> {
        let unresolved = || RuntimeError::UnresolvedIdentifier { name:     target.name.clone(),
                                                                 position: target.position, };
        let data_type = target.data_type.ok_or_else(unresolved)?;
        let line = self.input
                       .read_line()
                       .ok_or_else(|| RuntimeError::InputExhausted { name:     target.name.clone(),
                                                                     position: target.position, })?;
        let value = Value::parse(&line, data_type, target.position)?;

        self.assign(&target.name, value, target.position)
    }

    /// Overwrites an existing binding found through the static-parent chain.
    ///
    /// # Errors
    /// `UnresolvedIdentifier` if no frame on the chain binds `name`.
    pub(in crate::interpreter::evaluator) fn assign(&mut self,
                                                    name: &str,
                                                    value: Value,
                                                    position: Position)
                                                    -> EvalResult<()> {
        if self.call_stack.assign(name, value) {
            return Ok(());
        }
        Err(RuntimeError::UnresolvedIdentifier { name: name.to_string(),
                                                 position })
    }
}
