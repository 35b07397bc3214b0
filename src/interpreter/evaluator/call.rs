use crate::{
    ast::Call,
    error::RuntimeError,
    interpreter::{
        activation::{ActivationRecord, FrameKind},
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
    util::stack::guarded,
};

impl Context<'_, '_> {
    /// Calls a procedure or function.
    ///
    /// Arguments are evaluated left to right in the caller's frame and
    /// coerced to the parameter types. The callee frame is created at the
    /// callee's scope level plus one, and its static parent is the frame on
    /// top of the call stack when the call is made. For a function, a slot
    /// named after the function is bound to [`Value::Null`] before the
    /// parameters and read back as the result before the frame is popped.
    ///
    /// # Parameters
    /// - `call`: An annotated call node.
    ///
    /// # Returns
    /// The function result, or [`Value::Null`] for a procedure.
    ///
    /// # Errors
    /// - `StackOverflow` if the call exceeds the call-depth limit.
    /// - `UnresolvedIdentifier` if the call was never annotated.
    /// - Any error raised by the arguments or the callee body.
    pub fn call(&mut self, call: &Call) -> EvalResult<Value> {
        guarded(|| self.invoke(call))
    }

    fn invoke(&mut self, call: &Call) -> EvalResult<Value> {
        let unresolved = || RuntimeError::UnresolvedIdentifier { name:     call.name.clone(),
                                                                 position: call.position, };
        let symbol = call.symbol.as_ref().ok_or_else(unresolved)?;
        let routine = symbol.routine().ok_or_else(unresolved)?;
        let decl = *self.routines.get(&routine.id).ok_or_else(unresolved)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for (argument, param) in call.arguments.iter().zip(&decl.params) {
            let value = self.eval(argument)?;
            arguments.push(value.coerce(param.data_type, argument.position())?);
        }

        let kind = if decl.return_type.is_some() { FrameKind::Function } else { FrameKind::Procedure };
        let mut frame = ActivationRecord::new(decl.name.as_str(),
                                              kind,
                                              symbol.scope_level + 1,
                                              self.call_stack.top_index());
        if kind == FrameKind::Function {
            frame.define(decl.name.as_str(), Value::Null);
        }
        for (param, value) in decl.params.iter().zip(arguments) {
            frame.define(param.name.as_str(), value);
        }
        self.call_stack.push(frame, call.position)?;

        self.block(&decl.block)?;

        let result = match kind {
            FrameKind::Function => {
                self.call_stack.top().and_then(|f| f.get(&decl.name)).cloned().unwrap_or(Value::Null)
            },
            _ => Value::Null,
        };
        self.call_stack.pop();

        Ok(result)
    }
}
