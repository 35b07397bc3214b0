use log::debug;

use crate::{
    ast::Program,
    error::SemanticError,
    interpreter::{
        analyzer::utils::name_token,
        lexer::Position,
        scope::ScopedSymbolTable,
        symbol::Symbol,
    },
};

/// Result type used by the semantic analyzer.
pub type AnalysisResult<T> = Result<T, SemanticError>;

/// The second pass over a parsed program.
///
/// The analyzer rebuilds the scope chain from scratch, independently of the
/// one the parser used, and checks the program against it. It stops at the
/// first violation.
///
/// On success the tree is annotated in place: every call node carries its
/// resolved [`Symbol`], and assignment and input targets carry their
/// declared type.
///
/// # Example
/// ```
/// use pascaline::{
///     interpreter::{analyzer::core::SemanticAnalyzer, lexer::tokenize, parser::core::Parser},
/// };
///
/// let source = "PROGRAM p; VAR s: STRING; BEGIN s := 1 END.";
/// let mut program = Parser::new(tokenize(source).unwrap()).parse().unwrap();
///
/// assert!(SemanticAnalyzer::new().analyze(&mut program).is_err());
/// ```
#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    pub(in crate::interpreter::analyzer) scopes:    ScopedSymbolTable,
    /// Names of the functions whose bodies are being analyzed, innermost
    /// last. Assigning to one of these names sets that function's result.
    pub(in crate::interpreter::analyzer) functions: Vec<String>,
}

impl SemanticAnalyzer {
    /// Creates an analyzer with no open scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzes a whole program.
    ///
    /// # Parameters
    /// - `program`: The parsed program, annotated in place.
    ///
    /// # Errors
    /// The first [`SemanticError`] found.
    pub fn analyze(&mut self, program: &mut Program) -> AnalysisResult<()> {
        self.scopes.enter_scope("GLOBAL");
        self.block(&mut program.block)?;
        self.scopes.leave_scope();
        debug!("Semantic analysis of {} finished", program.name);

        Ok(())
    }

    /// Resolves `name` through every open scope.
    ///
    /// # Errors
    /// [`SemanticError::IdentifierNotFound`] if no scope declares the name.
    pub(in crate::interpreter::analyzer) fn resolve(&self,
                                                    name: &str,
                                                    position: Position)
                                                    -> AnalysisResult<Symbol> {
        self.scopes
            .lookup(name, false)
            .cloned()
            .ok_or_else(|| SemanticError::IdentifierNotFound { token: name_token(name, position) })
    }

    /// Inserts `symbol` into the current scope.
    ///
    /// # Errors
    /// [`SemanticError::DuplicateIdentifier`] if the current scope already
    /// declares the name.
    pub(in crate::interpreter::analyzer) fn declare(&mut self,
                                                    symbol: Symbol,
                                                    position: Position)
                                                    -> AnalysisResult<()> {
        if self.scopes.lookup(&symbol.name, true).is_some() {
            return Err(SemanticError::DuplicateIdentifier { token: name_token(&symbol.name,
                                                                              position) });
        }
        self.scopes.insert(symbol);
        Ok(())
    }
}
