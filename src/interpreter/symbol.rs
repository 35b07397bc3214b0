use crate::ast::{DataType, Parameter, RoutineId};

/// The builtin I/O routines every program can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoBuiltin {
    /// `WRITE`
    Write,
    /// `WRITELN`
    WriteLn,
    /// `READ`
    Read,
    /// `READLN`
    ReadLn,
}

impl IoBuiltin {
    /// All builtins, in the order they are seeded into the global scope.
    pub const ALL: [Self; 4] = [Self::Write, Self::WriteLn, Self::Read, Self::ReadLn];

    /// Returns the builtin's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Write => "WRITE",
            Self::WriteLn => "WRITELN",
            Self::Read => "READ",
            Self::ReadLn => "READLN",
        }
    }

    /// Returns `true` for `WRITE` and `WRITELN`.
    #[must_use]
    pub const fn is_output(self) -> bool {
        matches!(self, Self::Write | Self::WriteLn)
    }

    /// Returns `true` for the variants ending a line.
    #[must_use]
    pub const fn is_line(self) -> bool {
        matches!(self, Self::WriteLn | Self::ReadLn)
    }
}

/// The signature of a user-defined procedure or function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routine {
    /// The declaration this routine was created from.
    pub id:     RoutineId,
    /// Formal parameters in declaration order.
    pub params: Vec<Parameter>,
}

/// What a name denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// A variable or formal parameter.
    Variable,
    /// A `CONST` binding.
    Constant,
    /// One of the primitive type names.
    Type,
    /// A user-defined procedure.
    Procedure(Routine),
    /// A user-defined function.
    Function(Routine),
    /// A builtin I/O routine.
    Builtin(IoBuiltin),
}

/// A named entity recorded in a scope.
///
/// The semantic analyzer copies resolved symbols into call nodes, so a
/// `Symbol` is a plain value and holds no reference into the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The uppercased name.
    pub name:        String,
    /// The declared type. Procedures and builtins have none; a function's
    /// type is its result type.
    pub data_type:   Option<DataType>,
    /// What the name denotes.
    pub kind:        SymbolKind,
    /// The level of the scope the symbol was inserted into. Stamped by
    /// [`ScopedSymbolTable::insert`](crate::interpreter::scope::ScopedSymbolTable::insert).
    pub scope_level: usize,
}

impl Symbol {
    /// Creates a variable symbol.
    #[must_use]
    pub fn variable(name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(name.into(), Some(data_type), SymbolKind::Variable)
    }

    /// Creates a constant symbol.
    #[must_use]
    pub fn constant(name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(name.into(), Some(data_type), SymbolKind::Constant)
    }

    /// Creates the symbol for a primitive type name.
    #[must_use]
    pub fn type_name(data_type: DataType) -> Self {
        Self::new(data_type.name().to_string(), Some(data_type), SymbolKind::Type)
    }

    /// Creates a procedure symbol.
    #[must_use]
    pub fn procedure(name: impl Into<String>, routine: Routine) -> Self {
        Self::new(name.into(), None, SymbolKind::Procedure(routine))
    }

    /// Creates a function symbol whose type is the result type.
    #[must_use]
    pub fn function(name: impl Into<String>, return_type: DataType, routine: Routine) -> Self {
        Self::new(name.into(), Some(return_type), SymbolKind::Function(routine))
    }

    /// Creates the symbol for a builtin I/O routine.
    #[must_use]
    pub fn builtin(builtin: IoBuiltin) -> Self {
        Self::new(builtin.name().to_string(), None, SymbolKind::Builtin(builtin))
    }

    const fn new(name: String, data_type: Option<DataType>, kind: SymbolKind) -> Self {
        Self { name,
               data_type,
               kind,
               scope_level: 0 }
    }

    /// Returns the signature of a procedure or function symbol.
    #[must_use]
    pub const fn routine(&self) -> Option<&Routine> {
        match &self.kind {
            SymbolKind::Procedure(routine) | SymbolKind::Function(routine) => Some(routine),
            _ => None,
        }
    }

    /// Returns a short description of the symbol's kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self.kind {
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
            SymbolKind::Type => "type",
            SymbolKind::Procedure(_) => "procedure",
            SymbolKind::Function(_) => "function",
            SymbolKind::Builtin(_) => "builtin",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} {}", self.kind_name(), self.name)?;
        if let Some(routine) = self.routine() {
            let params: Vec<String> =
                routine.params.iter().map(|p| format!("{}: {}", p.name, p.data_type)).collect();
            write!(f, "({})", params.join("; "))?;
        }
        if let Some(data_type) = self.data_type
           && !matches!(self.kind, SymbolKind::Type)
        {
            write!(f, ": {data_type}")?;
        }
        write!(f, ">")
    }
}
