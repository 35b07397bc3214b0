use log::{debug, trace};

use crate::{
    error::RuntimeError,
    interpreter::{
        activation::ActivationRecord, evaluator::core::EvalResult, lexer::Position, value::Value,
    },
};

/// The call depth allowed unless configured otherwise.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 128;

/// The largest call depth a stack accepts. Larger requests are clamped.
pub const MAX_CALL_DEPTH_LIMIT: usize = 4096;

/// The stack of live activation records.
///
/// The order of the records is the call/return order. Name resolution does
/// not follow that order: it starts at the top record and follows each
/// record's static parent.
///
/// # Example
/// ```
/// use pascaline::interpreter::{
///     activation::{ActivationRecord, FrameKind},
///     call_stack::CallStack,
///     lexer::Position,
///     value::Value,
/// };
///
/// let at = Position::new(1, 1);
/// let mut stack = CallStack::new(8);
///
/// let mut program = ActivationRecord::new("MAIN", FrameKind::Program, 1, None);
/// program.define("X", Value::Integer(1));
/// stack.push(program, at).unwrap();
///
/// let parent = stack.top_index();
/// stack.push(ActivationRecord::new("P", FrameKind::Procedure, 2, parent), at).unwrap();
///
/// assert!(stack.assign("X", Value::Integer(2)));
/// assert_eq!(stack.depth(), 2);
/// stack.pop();
/// assert_eq!(stack.lookup("X"), Some(&Value::Integer(2)));
/// ```
#[derive(Debug, Clone)]
pub struct CallStack {
    records:   Vec<ActivationRecord>,
    max_depth: usize,
}

impl CallStack {
    /// Creates an empty stack holding at most `max_depth` records, or
    /// [`MAX_CALL_DEPTH_LIMIT`] records if `max_depth` is larger.
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        let max_depth = if max_depth > MAX_CALL_DEPTH_LIMIT { MAX_CALL_DEPTH_LIMIT } else { max_depth };
        Self { records: Vec::new(),
               max_depth }
    }

    /// Pushes a record.
    ///
    /// # Parameters
    /// - `record`: The new top frame.
    /// - `position`: The call site, for error reporting.
    ///
    /// # Errors
    /// `StackOverflow` if the stack already holds `max_depth` records.
    pub fn push(&mut self, record: ActivationRecord, position: Position) -> EvalResult<()> {
        if self.depth() >= self.max_depth {
            return Err(RuntimeError::StackOverflow { routine: record.name().to_string(),
                                                     limit: self.max_depth,
                                                     position });
        }
        debug!("Entering {} {} at level {}, depth {}",
               record.kind(),
               record.name(),
               record.level(),
               self.depth() + 1);
        self.records.push(record);
        Ok(())
    }

    /// Pops and returns the top record.
    pub fn pop(&mut self) -> Option<ActivationRecord> {
        let record = self.records.pop()?;
        debug!("Leaving {} {}", record.kind(), record.name());
        trace!("{record}");
        Some(record)
    }

    /// Returns the top record.
    #[must_use]
    pub fn top(&self) -> Option<&ActivationRecord> {
        self.records.last()
    }

    /// Returns the top record mutably.
    pub fn top_mut(&mut self) -> Option<&mut ActivationRecord> {
        self.records.last_mut()
    }

    /// Returns the index of the top record, used as the static parent of the
    /// next frame.
    #[must_use]
    pub fn top_index(&self) -> Option<usize> {
        self.records.len().checked_sub(1)
    }

    /// Returns the number of live records.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.records.len()
    }

    /// Finds the index of the first record on the static-parent chain of the
    /// top record that binds `name`.
    fn resolve(&self, name: &str) -> Option<usize> {
        let mut index = self.top_index();
        while let Some(i) = index {
            let record = &self.records[i];
            if record.get(name).is_some() {
                return Some(i);
            }
            index = record.static_parent();
        }
        None
    }

    /// Reads `name` through the static-parent chain of the top record.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.resolve(name).and_then(|i| self.records[i].get(name))
    }

    /// Overwrites the first existing binding of `name` on the static-parent
    /// chain of the top record.
    ///
    /// # Returns
    /// `false` if no record on the chain binds `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        let Some(slot) = self.resolve(name).and_then(|i| self.records[i].get_mut(name)) else {
            return false;
        };
        *slot = value;
        true
    }
}
