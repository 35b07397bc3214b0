use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::{
    ast::{Block, Declaration, Expr, Program, RoutineDecl, RoutineId},
    error::RuntimeError,
    interpreter::{
        activation::{ActivationRecord, FrameKind},
        call_stack::CallStack,
        io::LineReader,
        value::Value,
    },
    util::stack::guarded,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The final bindings of the program frame, ordered by name.
pub type Bindings = BTreeMap<String, Value>;

/// The observable result of running a program.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// The final bindings of the outermost frame.
    pub bindings: Bindings,
    /// Everything written by `WRITE` and `WRITELN`, in call order.
    pub output:   String,
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state for one run of one analyzed
/// program: the declarations routines are looked up in, the call stack, the
/// output buffer and the input reader.
///
/// ## Usage
///
/// A `Context` is created for a single program and consumed by
/// [`Context::run`]. It is not reentrant.
pub struct Context<'p, 'i> {
    /// The analyzed program.
    pub(in crate::interpreter::evaluator) program:    &'p Program,
    /// Routine declarations by identifier, collected from the whole tree.
    pub(in crate::interpreter::evaluator) routines:   HashMap<RoutineId, &'p RoutineDecl>,
    /// The live activation records.
    pub(in crate::interpreter::evaluator) call_stack: CallStack,
    /// Text written so far.
    pub(in crate::interpreter::evaluator) output:     String,
    /// Source of `READ` and `READLN` lines.
    pub(in crate::interpreter::evaluator) input:      &'i mut dyn LineReader,
}

impl<'p, 'i> Context<'p, 'i> {
    /// Creates a context for `program`.
    ///
    /// # Parameters
    /// - `program`: An analyzed program. Call nodes must carry their resolved
    ///   symbols.
    /// - `input`: Supplies lines to `READ` and `READLN`.
    /// - `max_call_depth`: The largest number of live frames, program frame
    ///   included.
    pub fn new(program: &'p Program,
               input: &'i mut dyn LineReader,
               max_call_depth: usize)
               -> Self {
        let mut routines = HashMap::new();
        collect_routines(&program.block, &mut routines);

        Self { program,
               routines,
               call_stack: CallStack::new(max_call_depth),
               output: String::new(),
               input }
    }

    /// Runs the program.
    ///
    /// Pushes the program frame at level 1, executes the program block and
    /// pops the frame again.
    ///
    /// # Returns
    /// The program frame's final bindings and the output buffer.
    ///
    /// # Errors
    /// The first `RuntimeError` raised. Frames are not unwound on error.
    ///
    /// # Example
    /// ```
    /// use pascaline::{
    ///     analyze,
    ///     interpreter::{evaluator::core::Context, io::NoInput, value::Value},
    /// };
    ///
    /// let program = analyze("PROGRAM p; VAR a: INTEGER; BEGIN a := 2 + 3 * 4 END.").unwrap();
    /// let mut input = NoInput;
    /// let execution = Context::new(&program, &mut input, 16).run().unwrap();
    ///
    /// assert_eq!(execution.bindings["A"], Value::Integer(14));
    /// ```
    pub fn run(mut self) -> EvalResult<Execution> {
        let program = self.program;
        let frame = ActivationRecord::new(program.name.as_str(), FrameKind::Program, 1, None);
        self.call_stack.push(frame, program.position)?;

        self.block(&program.block)?;

        let bindings = self.call_stack
                           .pop()
                           .map(ActivationRecord::into_members)
                           .unwrap_or_default();
        debug!("Program {} finished with {} bindings", program.name, bindings.len());

        Ok(Execution { bindings,
                       output: self.output })
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant: literals,
    /// identifiers, unary and binary operations and function calls.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression. Reading an unassigned variable yields
    /// [`Value::Null`].
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        guarded(|| self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Constant { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, position } => {
                self.call_stack
                    .lookup(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UnresolvedIdentifier { name:     name.clone(),
                                                                        position: *position, })
            },
            Expr::UnaryOp { op, expr, position } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, value, *position)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             position, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, *position)
            },
            Expr::FunctionCall(call) => self.call(call),
        }
    }
}

/// Records every routine declared in `block` and, recursively, in the
/// routines' own blocks.
fn collect_routines<'p>(block: &'p Block, routines: &mut HashMap<RoutineId, &'p RoutineDecl>) {
    for declaration in &block.declarations {
        if let Declaration::Procedure(decl) | Declaration::Function(decl) = declaration {
            routines.insert(decl.id, decl);
            collect_routines(&decl.block, routines);
        }
    }
}
