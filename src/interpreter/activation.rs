use std::collections::{BTreeMap, HashMap};

use crate::interpreter::value::Value;

/// What kind of invocation a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// The main program.
    Program,
    /// A procedure call.
    Procedure,
    /// A function call.
    Function,
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Program => "PROGRAM",
            Self::Procedure => "PROCEDURE",
            Self::Function => "FUNCTION",
        };
        write!(f, "{s}")
    }
}

/// The runtime record of one program, procedure or function invocation.
///
/// A record owns the bindings created in it. Names it does not bind are
/// looked up in its static parent, which is referenced by its index in the
/// [`CallStack`](crate::interpreter::call_stack::CallStack).
#[derive(Debug, Clone)]
pub struct ActivationRecord {
    name:          String,
    kind:          FrameKind,
    level:         usize,
    static_parent: Option<usize>,
    members:       HashMap<String, Value>,
}

impl ActivationRecord {
    /// Creates an empty record.
    ///
    /// # Parameters
    /// - `name`: The program or routine name.
    /// - `kind`: What is being invoked.
    /// - `level`: The nesting level, 1 for the program.
    /// - `static_parent`: Index of the frame names are resolved in when this
    ///   one does not bind them.
    #[must_use]
    pub fn new(name: impl Into<String>,
               kind: FrameKind,
               level: usize,
               static_parent: Option<usize>)
               -> Self {
        Self { name: name.into(),
               kind,
               level,
               static_parent,
               members: HashMap::new() }
    }

    /// Creates or overwrites a binding in this frame only.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.members.insert(name.into(), value);
    }

    /// Returns the binding for `name` in this frame only.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }

    /// Returns a mutable reference to the binding for `name` in this frame
    /// only.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.members.get_mut(name)
    }

    /// Returns the program or routine name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the frame kind.
    #[must_use]
    pub const fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Returns the nesting level.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the call-stack index of the static parent.
    #[must_use]
    pub const fn static_parent(&self) -> Option<usize> {
        self.static_parent
    }

    /// Consumes the record and returns its bindings ordered by name.
    #[must_use]
    pub fn into_members(self) -> BTreeMap<String, Value> {
        self.members.into_iter().collect()
    }
}

impl std::fmt::Display for ActivationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} {} (level {})", self.kind, self.name, self.level)?;
        let mut names: Vec<&String> = self.members.keys().collect();
        names.sort();
        for name in names {
            if let Some(value) = self.members.get(name) {
                writeln!(f, "  {name:<12} = {value}")?;
            }
        }
        Ok(())
    }
}
