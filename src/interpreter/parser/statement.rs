use crate::{
    ast::{Call, InputTarget, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token},
        parser::core::{ParseResult, Parser},
        symbol::{IoBuiltin, SymbolKind},
    },
};

impl Parser {
    /// Parses a compound statement.
    ///
    /// Grammar: `compound := BEGIN statement (';' statement)* END`
    ///
    /// # Returns
    /// The statements between `BEGIN` and `END`. Empty statements are kept as
    /// [`Statement::NoOp`].
    ///
    /// # Errors
    /// Returns a `ParseError` if `BEGIN` or `END` is missing, which includes
    /// two statements not separated by `;`.
    pub(in crate::interpreter::parser) fn compound(&mut self) -> ParseResult<Vec<Statement>> {
        self.expect(&Token::Begin, "'BEGIN'")?;
        let mut statements = vec![self.statement()?];
        while self.eat(&Token::Semicolon) {
            statements.push(self.statement()?);
        }
        self.expect(&Token::End, "';' or 'END'")?;

        Ok(statements)
    }

    /// Parses a single statement.
    ///
    /// A statement may be one of:
    /// - a compound statement,
    /// - an `IF` or `WHILE` statement,
    /// - a statement starting with an identifier (see
    ///   [`Parser::identifier_statement`]),
    /// - the empty statement.
    ///
    /// Any other token yields [`Statement::NoOp`] without being consumed;
    /// the enclosing compound statement then reports it.
    fn statement(&mut self) -> ParseResult<Statement> {
        self.nested(Self::statement_kind)
    }

    fn statement_kind(&mut self) -> ParseResult<Statement> {
        match self.peek().token {
            Token::Begin => Ok(Statement::Compound(self.compound()?)),
            Token::If => self.if_statement(),
            Token::While => self.while_statement(),
            Token::Identifier(_) => self.identifier_statement(),
            _ => Ok(Statement::NoOp),
        }
    }

    /// Parses a statement that starts with an identifier.
    ///
    /// The identifier is looked up in the open scope:
    /// - `WRITE`/`WRITELN` start an output statement,
    /// - `READ`/`READLN` start an input statement,
    /// - a procedure starts a procedure call,
    /// - anything else must be followed by `:=`.
    ///
    /// # Errors
    /// - `IdentifierNotFound` if the identifier is not declared.
    /// - `UnexpectedToken` if an assignment lacks its `:=`.
    fn identifier_statement(&mut self) -> ParseResult<Statement> {
        let lexeme = self.peek().clone();
        let Token::Identifier(name) = &lexeme.token else {
            return Err(ParseError::ExpectedIdentifier { found: lexeme }.into());
        };
        let symbol = self.resolve(name, &lexeme)?;

        match symbol.kind {
            SymbolKind::Builtin(builtin) if builtin.is_output() => self.output_statement(builtin),
            SymbolKind::Builtin(builtin) => self.input_statement(builtin),
            SymbolKind::Procedure(_) => {
                self.advance();
                let arguments = self.optional_arguments()?;
                Ok(Statement::ProcedureCall(Call::new(name.clone(), arguments, lexeme.position)))
            },
            _ if self.peek_next() == &Token::Assign => self.assignment(),
            _ => {
                self.advance();
                Err(ParseError::unexpected(self.peek(), "':='").into())
            },
        }
    }

    /// Parses an assignment.
    ///
    /// Grammar: `assign := ident ':=' expr`
    fn assignment(&mut self) -> ParseResult<Statement> {
        let (target, position) = self.expect_identifier()?;
        self.expect(&Token::Assign, "':='")?;
        let value = self.expression()?;

        Ok(Statement::Assign { target,
                               value,
                               position,
                               target_type: None })
    }

    /// Parses an `IF` statement. A dangling `ELSE` binds to the nearest
    /// `IF`.
    ///
    /// Grammar: `if := IF expr THEN statement [ELSE statement]`
    fn if_statement(&mut self) -> ParseResult<Statement> {
        let Lexeme { position, .. } = self.advance();
        let condition = self.expression()?;
        self.expect(&Token::Then, "'THEN'")?;
        let then_branch = Box::new(self.statement()?);
        let else_branch =
            if self.eat(&Token::Else) { Some(Box::new(self.statement()?)) } else { None };

        Ok(Statement::If { condition,
                           then_branch,
                           else_branch,
                           position })
    }

    /// Parses a `WHILE` statement.
    ///
    /// Grammar: `while := WHILE expr DO statement`
    fn while_statement(&mut self) -> ParseResult<Statement> {
        let Lexeme { position, .. } = self.advance();
        let condition = self.expression()?;
        self.expect(&Token::Do, "'DO'")?;
        let body = Box::new(self.statement()?);

        Ok(Statement::While { condition,
                              body,
                              position })
    }

    /// Parses `WRITE` or `WRITELN` with its optional argument list.
    fn output_statement(&mut self, builtin: IoBuiltin) -> ParseResult<Statement> {
        let Lexeme { position, .. } = self.advance();
        let arguments = self.optional_arguments()?;

        Ok(Statement::Output { newline: builtin.is_line(),
                               arguments,
                               position })
    }

    /// Parses `READ` or `READLN` with its optional list of target variables.
    ///
    /// Grammar: `input := (READ | READLN) ['(' [ident (',' ident)*] ')']`
    ///
    /// # Errors
    /// `IdentifierNotFound` if a target is not declared.
    fn input_statement(&mut self, builtin: IoBuiltin) -> ParseResult<Statement> {
        let Lexeme { position, .. } = self.advance();

        let mut targets = Vec::new();
        if self.eat(&Token::LParen) && !self.eat(&Token::RParen) {
            loop {
                let lexeme = self.peek().clone();
                let (name, position) = self.expect_identifier()?;
                self.resolve(&name, &lexeme)?;
                targets.push(InputTarget { name,
                                           position,
                                           data_type: None });
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
            self.expect(&Token::RParen, "',' or ')'")?;
        }

        Ok(Statement::Input { newline: builtin.is_line(),
                              targets,
                              position })
    }
}
