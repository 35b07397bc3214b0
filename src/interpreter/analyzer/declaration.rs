use crate::{
    ast::{Block, DataType, Declaration, RoutineDecl},
    error::SemanticError,
    interpreter::{
        analyzer::{
            core::{AnalysisResult, SemanticAnalyzer},
            utils::name_token,
        },
        lexer::Position,
        symbol::{Routine, Symbol, SymbolKind},
    },
};

impl SemanticAnalyzer {
    /// Declares everything in `block`, then checks its statements.
    ///
    /// The caller opens the scope the block's declarations go into.
    pub(in crate::interpreter::analyzer) fn block(&mut self, block: &mut Block) -> AnalysisResult<()> {
        for declaration in &mut block.declarations {
            self.declaration(declaration)?;
        }
        for statement in &mut block.body {
            self.statement(statement)?;
        }
        Ok(())
    }

    fn declaration(&mut self, declaration: &mut Declaration) -> AnalysisResult<()> {
        match declaration {
            Declaration::Variable { name,
                                    data_type,
                                    position, } => {
                self.check_type_name(*data_type, *position)?;
                self.declare(Symbol::variable(name.as_str(), *data_type), *position)
            },
            Declaration::Constant { name, value, position } => {
                self.declare(Symbol::constant(name.as_str(), value.data_type()), *position)
            },
            Declaration::Procedure(decl) | Declaration::Function(decl) => self.routine(decl),
        }
    }

    /// Declares a routine in the current scope and analyzes its body in a
    /// new scope holding the formal parameters.
    ///
    /// The routine is declared before its body is analyzed, so recursive
    /// calls resolve.
    ///
    /// # Errors
    /// - `DuplicateIdentifier` if the routine name or a parameter name is
    ///   already declared in its scope.
    /// - Any error found in the routine body.
    fn routine(&mut self, decl: &mut RoutineDecl) -> AnalysisResult<()> {
        let routine = Routine { id:     decl.id,
                                params: decl.params.clone(), };
        let symbol = match decl.return_type {
            Some(data_type) => {
                self.check_type_name(data_type, decl.position)?;
                Symbol::function(decl.name.as_str(), data_type, routine)
            },
            None => Symbol::procedure(decl.name.as_str(), routine),
        };
        self.declare(symbol, decl.position)?;

        self.scopes.enter_scope(&decl.name);
        for param in &decl.params {
            self.check_type_name(param.data_type, param.position)?;
            self.declare(Symbol::variable(param.name.as_str(), param.data_type), param.position)?;
        }

        let is_function = decl.return_type.is_some();
        if is_function {
            self.functions.push(decl.name.clone());
        }
        let result = self.block(&mut decl.block);
        if is_function {
            self.functions.pop();
        }
        self.scopes.leave_scope();

        result
    }

    /// Checks that a declared type name resolves to a primitive type symbol.
    ///
    /// # Errors
    /// `IdentifierNotFound` if the visible symbol of that name is not a type.
    fn check_type_name(&self, data_type: DataType, position: Position) -> AnalysisResult<()> {
        match self.scopes.lookup(data_type.name(), false) {
            Some(symbol) if symbol.kind == SymbolKind::Type => Ok(()),
            _ => Err(SemanticError::IdentifierNotFound { token: name_token(data_type.name(),
                                                                           position) }),
        }
    }
}
