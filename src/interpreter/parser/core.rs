use log::debug;

use crate::{
    ast::{Program, RoutineId},
    error::{Error, ParseError, SemanticError},
    interpreter::{
        lexer::{Lexeme, Position, Token},
        scope::ScopedSymbolTable,
        symbol::Symbol,
    },
    util::stack::guarded,
};

/// How deeply statements, expressions and routine declarations may nest.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Result type used by the parser.
///
/// Parsing fails with either a [`ParseError`] or, when a scope check fails,
/// a [`SemanticError`]; both are carried by the crate-level [`Error`].
pub type ParseResult<T> = Result<T, Error>;

/// A recursive-descent parser over a token stream.
///
/// The parser owns a [`ScopedSymbolTable`] that it fills while it reads
/// declarations. Statements and factors starting with an identifier consult
/// that table to decide what they are, so a name is only usable after its
/// declaration has been parsed.
///
/// # Example
/// ```
/// use pascaline::interpreter::{lexer::tokenize, parser::core::Parser};
///
/// let tokens = tokenize("PROGRAM p; VAR a: INTEGER; BEGIN a := 1 END.").unwrap();
/// let program = Parser::new(tokens).parse().unwrap();
///
/// assert_eq!(program.name, "P");
/// assert_eq!(program.block.declarations.len(), 1);
/// ```
pub struct Parser {
    tokens:       Vec<Lexeme>,
    current:      usize,
    next_routine: usize,
    depth:        usize,
    pub(in crate::interpreter::parser) scopes: ScopedSymbolTable,
}

impl Parser {
    /// Creates a parser over `tokens`. A missing [`Token::EndOfInput`]
    /// sentinel is appended.
    #[must_use]
    pub fn new(mut tokens: Vec<Lexeme>) -> Self {
        if tokens.last().is_none_or(|l| l.token != Token::EndOfInput) {
            let position = tokens.last().map_or(Position::new(1, 1), |l| l.position);
            tokens.push(Lexeme::new(Token::EndOfInput, position));
        }
        Self { tokens,
               current: 0,
               next_routine: 0,
               depth: 0,
               scopes: ScopedSymbolTable::new() }
    }

    /// Parses a complete program.
    ///
    /// Grammar: `program := PROGRAM ident ['(' ident_list ')'] ';' block '.'`
    ///
    /// The global scope is opened before the program block and closed after
    /// it. The parameter list after the program name is accepted and
    /// ignored.
    ///
    /// # Returns
    /// The [`Program`] root.
    ///
    /// # Errors
    /// - [`ParseError::UnexpectedToken`] when the input does not follow the
    ///   grammar or continues after the final `.`.
    /// - [`SemanticError::IdentifierNotFound`] when a statement or factor
    ///   names an undeclared identifier.
    /// - [`SemanticError::DuplicateIdentifier`] when a scope declares a name
    ///   twice.
    pub fn parse(mut self) -> ParseResult<Program> {
        let start = self.expect(&Token::Program, "'PROGRAM'")?;
        let (name, _) = self.expect_identifier()?;
        if self.eat(&Token::LParen) {
            self.identifier_list()?;
            self.expect(&Token::RParen, "')'")?;
        }
        self.expect(&Token::Semicolon, "';'")?;

        self.scopes.enter_scope("GLOBAL");
        let block = self.block()?;
        self.scopes.leave_scope();

        self.expect(&Token::Dot, "'.'")?;
        self.expect(&Token::EndOfInput, "end of input")?;
        debug!("Parsed program {name}");

        Ok(Program { name,
                     block,
                     position: start.position })
    }

    /// Returns the current token without consuming it.
    pub(in crate::interpreter::parser) fn peek(&self) -> &Lexeme {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    /// Returns the token after the current one without consuming anything.
    pub(in crate::interpreter::parser) fn peek_next(&self) -> &Token {
        &self.tokens[(self.current + 1).min(self.tokens.len() - 1)].token
    }

    /// Consumes and returns the current token. The end-of-input sentinel is
    /// never consumed.
    pub(in crate::interpreter::parser) fn advance(&mut self) -> Lexeme {
        let lexeme = self.peek().clone();
        if lexeme.token != Token::EndOfInput {
            self.current += 1;
        }
        lexeme
    }

    /// Returns `true` if the current token is `token`.
    pub(in crate::interpreter::parser) fn at(&self, token: &Token) -> bool {
        &self.peek().token == token
    }

    /// Consumes the current token if it is `token`.
    pub(in crate::interpreter::parser) fn eat(&mut self, token: &Token) -> bool {
        if self.at(token) {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes the current token, which must be `token`.
    ///
    /// # Parameters
    /// - `token`: The required token.
    /// - `expected`: How to describe `token` in the error message.
    ///
    /// # Errors
    /// [`ParseError::UnexpectedToken`] if the current token differs.
    pub(in crate::interpreter::parser) fn expect(&mut self,
                                                 token: &Token,
                                                 expected: &str)
                                                 -> ParseResult<Lexeme> {
        if self.at(token) {
            return Ok(self.advance());
        }
        Err(ParseError::unexpected(self.peek(), expected).into())
    }

    /// Consumes an identifier and returns its name and position.
    ///
    /// # Errors
    /// [`ParseError::ExpectedIdentifier`] if the current token is not an
    /// identifier.
    pub(in crate::interpreter::parser) fn expect_identifier(&mut self)
                                                            -> ParseResult<(String, Position)> {
        let lexeme = self.peek().clone();
        match lexeme.token {
            Token::Identifier(name) => {
                self.advance();
                Ok((name, lexeme.position))
            },
            _ => Err(ParseError::ExpectedIdentifier { found: lexeme }.into()),
        }
    }

    /// Looks `name` up through every open scope.
    ///
    /// # Errors
    /// [`SemanticError::IdentifierNotFound`] carrying `lexeme` if no scope
    /// declares the name.
    pub(in crate::interpreter::parser) fn resolve(&self,
                                                  name: &str,
                                                  lexeme: &Lexeme)
                                                  -> ParseResult<Symbol> {
        self.scopes
            .lookup(name, false)
            .cloned()
            .ok_or_else(|| SemanticError::IdentifierNotFound { token: lexeme.clone() }.into())
    }

    /// Inserts `symbol` into the open scope.
    ///
    /// # Errors
    /// [`SemanticError::DuplicateIdentifier`] if the open scope already
    /// declares the name.
    pub(in crate::interpreter::parser) fn declare(&mut self,
                                                  symbol: Symbol,
                                                  position: Position)
                                                  -> ParseResult<()> {
        if self.scopes.lookup(&symbol.name, true).is_some() {
            let token = Lexeme::new(Token::Identifier(symbol.name), position);
            return Err(SemanticError::DuplicateIdentifier { token }.into());
        }
        self.scopes.insert(symbol);
        Ok(())
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// # Errors
    /// [`ParseError::NestingTooDeep`] if [`MAX_NESTING_DEPTH`] levels are
    /// already open, otherwise whatever `parse` returns.
    pub(in crate::interpreter::parser) fn nested<T>(&mut self,
                                                    parse: impl FnOnce(&mut Self) -> ParseResult<T>)
                                                    -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep { found: self.peek().clone(),
                                                    limit: MAX_NESTING_DEPTH, }.into());
        }
        self.depth += 1;
        let result = guarded(|| parse(self));
        self.depth -= 1;
        result
    }

    /// Hands out the next routine identifier.
    pub(in crate::interpreter::parser) const fn next_routine_id(&mut self) -> RoutineId {
        let id = RoutineId(self.next_routine);
        self.next_routine += 1;
        id
    }
}
