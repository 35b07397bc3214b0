use crate::{
    ast::{BinaryOperator, Call, Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            core::{ParseResult, Parser},
            utils::{additive_operator, multiplicative_operator, relational_operator},
        },
        symbol::SymbolKind,
    },
};

impl Parser {
    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing. It begins at the
    /// lowest-precedence level, the relational operators, and descends
    /// through the precedence hierarchy. Every level is left-associative.
    ///
    /// Grammar: `expr := simple_expr (relop simple_expr)*`
    ///
    /// # Returns
    /// The parsed expression node.
    pub(in crate::interpreter::parser) fn expression(&mut self) -> ParseResult<Expr> {
        self.binary_level(Self::simple_expression, relational_operator)
    }

    /// Grammar: `simple_expr := term (('+' | '-' | OR) term)*`
    fn simple_expression(&mut self) -> ParseResult<Expr> {
        self.binary_level(Self::term, additive_operator)
    }

    /// Grammar: `term := factor (('*' | '/' | DIV | MOD | AND) factor)*`
    fn term(&mut self) -> ParseResult<Expr> {
        self.binary_level(Self::factor, multiplicative_operator)
    }

    /// Parses one left-associative precedence level.
    ///
    /// # Parameters
    /// - `operand`: Parses the next-higher precedence level.
    /// - `operator`: Maps a token to an operator of this level.
    fn binary_level(&mut self,
                    operand: fn(&mut Self) -> ParseResult<Expr>,
                    operator: fn(&Token) -> Option<BinaryOperator>)
                    -> ParseResult<Expr> {
        let mut left = operand(self)?;
        while let Some(op) = operator(&self.peek().token) {
            let position = self.advance().position;
            let right = operand(self)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    position };
        }
        Ok(left)
    }

    /// Parses a factor.
    ///
    /// Grammar:
    /// ```text
    /// factor := ('+' | '-' | NOT) factor
    ///         | INTEGER_CONST | REAL_CONST | STRING_CONST | BOOLEAN_CONST
    ///         | '(' expr ')'
    ///         | func_call
    ///         | ident
    /// ```
    ///
    /// An identifier naming a function is a call, with or without an
    /// argument list. Any other declared identifier is a reference.
    ///
    /// # Errors
    /// - `IdentifierNotFound` if the identifier is not declared.
    /// - `UnexpectedToken` if no factor starts at the current token.
    /// - `NestingTooDeep` if parentheses and prefix operators nest too deeply.
    fn factor(&mut self) -> ParseResult<Expr> {
        self.nested(Self::primary)
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let lexeme = self.advance();
        let position = lexeme.position;

        match lexeme.token {
            Token::Plus => self.unary(UnaryOperator::Plus, position),
            Token::Minus => self.unary(UnaryOperator::Minus, position),
            Token::Not => self.unary(UnaryOperator::Not, position),
            Token::Integer(v) => Ok(Expr::Constant { value: LiteralValue::Integer(v),
                                                     position }),
            Token::Real(v) => Ok(Expr::Constant { value: LiteralValue::Real(v),
                                                  position }),
            Token::String(s) => Ok(Expr::Constant { value: LiteralValue::String(s),
                                                    position }),
            Token::Boolean(b) => Ok(Expr::Constant { value: LiteralValue::Boolean(b),
                                                     position }),
            Token::LParen => {
                let expr = self.expression()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(expr)
            },
            Token::Identifier(ref name) => {
                let symbol = self.resolve(name, &lexeme)?;
                if let SymbolKind::Function(_) = symbol.kind {
                    let arguments = self.optional_arguments()?;
                    return Ok(Expr::FunctionCall(Call::new(name.clone(), arguments, position)));
                }
                Ok(Expr::Identifier { name: name.clone(),
                                      position })
            },
            _ => Err(ParseError::unexpected(&lexeme, "expression").into()),
        }
    }

    /// Parses the operand of a prefix operator whose token was consumed.
    fn unary(&mut self, op: UnaryOperator, position: Position) -> ParseResult<Expr> {
        let expr = Box::new(self.factor()?);
        Ok(Expr::UnaryOp { op,
                           expr,
                           position })
    }
}
