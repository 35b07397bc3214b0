use crate::{
    ast::{Block, DataType, Declaration, LiteralValue, Parameter, RoutineDecl},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
        symbol::{Routine, Symbol},
    },
};

impl Parser {
    /// Parses a block: its declarations followed by a compound statement.
    ///
    /// Grammar: `block := declarations compound`
    ///
    /// The caller is responsible for opening the block's scope.
    pub(in crate::interpreter::parser) fn block(&mut self) -> ParseResult<Block> {
        let declarations = self.declarations()?;
        let body = self.compound()?;

        Ok(Block { declarations,
                   body })
    }

    /// Parses the declaration part of a block.
    ///
    /// Grammar:
    /// ```text
    /// declarations := (CONST (const_decl ';')+ | VAR (var_decl ';')+)*
    ///                 (proc_decl | func_decl)*
    /// ```
    ///
    /// # Returns
    /// All declarations in source order. A variable list declares one
    /// [`Declaration::Variable`] per name.
    fn declarations(&mut self) -> ParseResult<Vec<Declaration>> {
        let mut declarations = Vec::new();

        loop {
            if self.eat(&Token::Const) {
                loop {
                    declarations.push(self.constant_declaration()?);
                    self.expect(&Token::Semicolon, "';'")?;
                    if !matches!(self.peek().token, Token::Identifier(_)) {
                        break;
                    }
                }
            } else if self.eat(&Token::Var) {
                loop {
                    declarations.extend(self.variable_declaration()?);
                    self.expect(&Token::Semicolon, "';'")?;
                    if !matches!(self.peek().token, Token::Identifier(_)) {
                        break;
                    }
                }
            } else {
                break;
            }
        }

        loop {
            match self.peek().token {
                Token::Procedure => {
                    declarations.push(self.nested(|p| p.routine_declaration(false))?);
                },
                Token::Function => declarations.push(self.nested(|p| p.routine_declaration(true))?),
                _ => break,
            }
        }

        Ok(declarations)
    }

    /// Parses `ident '=' constant` and declares the constant.
    ///
    /// # Errors
    /// `DuplicateIdentifier` if the open scope already declares the name.
    fn constant_declaration(&mut self) -> ParseResult<Declaration> {
        let (name, position) = self.expect_identifier()?;
        self.expect(&Token::Equal, "'='")?;
        let value = self.constant_literal()?;
        self.declare(Symbol::constant(&name, value.data_type()), position)?;

        Ok(Declaration::Constant { name,
                                   value,
                                   position })
    }

    /// Parses the right-hand side of a constant declaration: an optionally
    /// signed number, a string or a boolean.
    fn constant_literal(&mut self) -> ParseResult<LiteralValue> {
        let negative = self.at(&Token::Minus);
        let signed = negative || self.at(&Token::Plus);
        if signed {
            self.advance();
        }

        let lexeme = self.advance();
        match lexeme.token {
            Token::Integer(v) => Ok(LiteralValue::Integer(if negative { -v } else { v })),
            Token::Real(v) => Ok(LiteralValue::Real(if negative { -v } else { v })),
            Token::String(s) if !signed => Ok(LiteralValue::String(s)),
            Token::Boolean(b) if !signed => Ok(LiteralValue::Boolean(b)),
            _ => Err(ParseError::unexpected(&lexeme, "constant value").into()),
        }
    }

    /// Parses `ident (',' ident)* ':' type_spec` and declares each variable.
    fn variable_declaration(&mut self) -> ParseResult<Vec<Declaration>> {
        let names = self.identifier_list()?;
        self.expect(&Token::Colon, "':'")?;
        let data_type = self.type_spec()?;

        let mut declarations = Vec::with_capacity(names.len());
        for (name, position) in names {
            self.declare(Symbol::variable(&name, data_type), position)?;
            declarations.push(Declaration::Variable { name,
                                                      data_type,
                                                      position });
        }
        Ok(declarations)
    }

    /// Parses a primitive type name.
    ///
    /// Grammar: `type_spec := INTEGER | REAL | STRING | BOOLEAN`
    pub(in crate::interpreter::parser) fn type_spec(&mut self) -> ParseResult<DataType> {
        let lexeme = self.advance();
        match lexeme.token {
            Token::IntegerType => Ok(DataType::Integer),
            Token::RealType => Ok(DataType::Real),
            Token::StringType => Ok(DataType::String),
            Token::BooleanType => Ok(DataType::Boolean),
            _ => Err(ParseError::unexpected(&lexeme, "type name").into()),
        }
    }

    /// Parses a procedure or function declaration.
    ///
    /// Grammar:
    /// ```text
    /// proc_decl := PROCEDURE ident ['(' [params] ')'] ';' block ';'
    /// func_decl := FUNCTION ident ['(' [params] ')'] ':' type_spec ';' block ';'
    /// ```
    ///
    /// The routine symbol is declared in the enclosing scope before its body
    /// is parsed, so the body may call it recursively. The body is parsed in
    /// a new scope holding the formal parameters.
    ///
    /// # Parameters
    /// - `is_function`: Whether the declaration starts with `FUNCTION`.
    ///
    /// # Returns
    /// A [`Declaration::Procedure`] or [`Declaration::Function`].
    fn routine_declaration(&mut self, is_function: bool) -> ParseResult<Declaration> {
        self.advance();
        let (name, position) = self.expect_identifier()?;

        let mut params = Vec::new();
        if self.eat(&Token::LParen) {
            if !self.at(&Token::RParen) {
                params = self.formal_parameters()?;
            }
            self.expect(&Token::RParen, "')'")?;
        }

        let return_type = if is_function {
            self.expect(&Token::Colon, "':'")?;
            Some(self.type_spec()?)
        } else {
            None
        };
        self.expect(&Token::Semicolon, "';'")?;

        let id = self.next_routine_id();
        let routine = Routine { id,
                                params: params.clone() };
        let symbol = match return_type {
            Some(data_type) => Symbol::function(&name, data_type, routine),
            None => Symbol::procedure(&name, routine),
        };
        self.declare(symbol, position)?;

        self.scopes.enter_scope(&name);
        for param in &params {
            self.declare(Symbol::variable(&param.name, param.data_type), param.position)?;
        }
        let block = self.block()?;
        self.scopes.leave_scope();
        self.expect(&Token::Semicolon, "';'")?;

        let decl = RoutineDecl { id,
                                 name,
                                 params,
                                 return_type,
                                 block,
                                 position };
        Ok(if is_function { Declaration::Function(decl) } else { Declaration::Procedure(decl) })
    }

    /// Parses a formal parameter list.
    ///
    /// Grammar:
    /// ```text
    /// params      := param_group (';' param_group)*
    /// param_group := ident (',' ident)* ':' type_spec
    /// ```
    fn formal_parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        let mut params = Vec::new();
        loop {
            let names = self.identifier_list()?;
            self.expect(&Token::Colon, "':'")?;
            let data_type = self.type_spec()?;
            params.extend(names.into_iter().map(|(name, position)| Parameter { name,
                                                                                data_type,
                                                                                position }));
            if !self.eat(&Token::Semicolon) {
                break;
            }
        }
        Ok(params)
    }
}
