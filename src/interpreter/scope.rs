use std::collections::HashMap;

use log::trace;

use crate::{
    ast::DataType,
    interpreter::symbol::{IoBuiltin, Symbol},
};

/// One lexical scope: a name, a nesting level and the symbols declared in it.
#[derive(Debug, Clone)]
pub struct Scope {
    name:      String,
    level:     usize,
    enclosing: Option<usize>,
    symbols:   HashMap<String, Symbol>,
}

impl Scope {
    /// Returns the nesting level, 1 for the global scope.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SCOPE {} (level {})", self.name, self.level)?;
        let mut names: Vec<&String> = self.symbols.keys().collect();
        names.sort();
        for name in names {
            if let Some(symbol) = self.symbols.get(name) {
                writeln!(f, "  {name:<12} {symbol}")?;
            }
        }
        Ok(())
    }
}

/// A chain of nested scopes.
///
/// Scopes live in an arena and point back to their enclosing scope by
/// index. Only the innermost scope is ever discarded, so the arena behaves
/// like a stack whose last element is the current scope.
///
/// # Example
/// ```
/// use pascaline::{
///     ast::DataType,
///     interpreter::{scope::ScopedSymbolTable, symbol::Symbol},
/// };
///
/// let mut table = ScopedSymbolTable::new();
/// table.enter_scope("GLOBAL");
/// table.insert(Symbol::variable("X", DataType::Integer));
/// table.enter_scope("P");
/// table.insert(Symbol::variable("X", DataType::Real));
///
/// assert_eq!(table.lookup("X", false).unwrap().data_type, Some(DataType::Real));
/// table.leave_scope();
/// assert_eq!(table.lookup("X", true).unwrap().scope_level, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScopedSymbolTable {
    scopes: Vec<Scope>,
}

impl ScopedSymbolTable {
    /// Creates a table with no open scope.
    #[must_use]
    pub const fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Opens a scope one level deeper than the current one.
    ///
    /// The first scope opened is the global scope at level 1. It is seeded
    /// with the primitive type names and the builtin I/O routines.
    pub fn enter_scope(&mut self, name: &str) {
        let enclosing = self.scopes.len().checked_sub(1);
        let level = self.current_level() + 1;
        trace!("Entering scope {name} at level {level}");

        self.scopes.push(Scope { name: name.to_string(),
                                 level,
                                 enclosing,
                                 symbols: HashMap::new() });
        if enclosing.is_none() {
            for data_type in DataType::ALL {
                self.insert(Symbol::type_name(data_type));
            }
            for builtin in IoBuiltin::ALL {
                self.insert(Symbol::builtin(builtin));
            }
        }
    }

    /// Discards the innermost scope and returns it.
    pub fn leave_scope(&mut self) -> Option<Scope> {
        let scope = self.scopes.pop()?;
        trace!("Leaving scope\n{scope}");
        Some(scope)
    }

    /// Adds a symbol to the current scope, replacing any symbol of the same
    /// name in that scope. The symbol's level is set to the scope's level.
    /// Does nothing when no scope is open.
    pub fn insert(&mut self, mut symbol: Symbol) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        symbol.scope_level = scope.level;
        scope.symbols.insert(symbol.name.clone(), symbol);
    }

    /// Finds the nearest definition of `name`.
    ///
    /// # Parameters
    /// - `name`: The uppercased name.
    /// - `current_scope_only`: Whether to stop after the current scope.
    ///
    /// # Returns
    /// The symbol, or `None` if no visible scope declares the name.
    #[must_use]
    pub fn lookup(&self, name: &str, current_scope_only: bool) -> Option<&Symbol> {
        let mut index = self.scopes.len().checked_sub(1);
        while let Some(i) = index {
            let scope = &self.scopes[i];
            if let Some(symbol) = scope.symbols.get(name) {
                return Some(symbol);
            }
            if current_scope_only {
                return None;
            }
            index = scope.enclosing;
        }
        None
    }

    /// Returns the level of the current scope, or 0 when none is open.
    #[must_use]
    pub fn current_level(&self) -> usize {
        self.scopes.last().map_or(0, Scope::level)
    }
}
