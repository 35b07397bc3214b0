use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Position, Token},
        parser::core::{ParseResult, Parser},
    },
};

/// Maps a relational operator token to its operator.
pub(in crate::interpreter::parser) const fn relational_operator(token: &Token)
                                                                -> Option<BinaryOperator> {
    match token {
        Token::Equal => Some(BinaryOperator::Equal),
        Token::NotEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}

/// Maps an additive operator token (`+`, `-`, `OR`) to its operator.
pub(in crate::interpreter::parser) const fn additive_operator(token: &Token)
                                                              -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}

/// Maps a multiplicative operator token (`*`, `/`, `DIV`, `MOD`, `AND`) to
/// its operator.
pub(in crate::interpreter::parser) const fn multiplicative_operator(token: &Token)
                                                                    -> Option<BinaryOperator> {
    match token {
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::RealDiv),
        Token::Div => Some(BinaryOperator::IntDiv),
        Token::Mod => Some(BinaryOperator::Mod),
        Token::And => Some(BinaryOperator::And),
        _ => None,
    }
}

impl Parser {
    /// Parses a comma-separated list of identifiers.
    ///
    /// Grammar: `ident_list := ident (',' ident)*`
    ///
    /// # Returns
    /// Each name with its position, in source order.
    ///
    /// # Errors
    /// Returns a `ParseError` if an identifier is missing.
    pub(in crate::interpreter::parser) fn identifier_list(&mut self)
                                                          -> ParseResult<Vec<(String, Position)>> {
        let mut names = vec![self.expect_identifier()?];
        while self.eat(&Token::Comma) {
            names.push(self.expect_identifier()?);
        }
        Ok(names)
    }

    /// Parses an optional parenthesized argument list.
    ///
    /// Grammar: `args := ['(' [expr (',' expr)*] ')']`
    ///
    /// This utility is shared by procedure calls, function calls and the
    /// output builtins. A missing list and `()` both produce no arguments.
    ///
    /// # Returns
    /// The argument expressions in source order.
    ///
    /// # Errors
    /// Returns an error if an argument fails to parse or the closing `)` is
    /// missing.
    pub(in crate::interpreter::parser) fn optional_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let mut arguments = Vec::new();
        if !self.eat(&Token::LParen) {
            return Ok(arguments);
        }
        if self.eat(&Token::RParen) {
            return Ok(arguments);
        }
        loop {
            arguments.push(self.expression()?);
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::RParen, "',' or ')'")?;

        Ok(arguments)
    }
}
