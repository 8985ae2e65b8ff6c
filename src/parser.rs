use crate::{
    ast::{Binary, Expression, Grouping, Literal, Operator, Unary},
    token::{Token, TokenKind},
};
use thiserror::Error;

/// First syntax error hit by a parse attempt. The parser stops there: unlike
/// lexical errors, a syntax error invalidates the rest of the expression, so
/// there is nothing useful to accumulate.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    /// No grammar alternative matched the current token.
    #[error("[line {line}] Error{context}: {message}")]
    UnexpectedToken {
        line: u32,
        context: String,
        message: String,
    },
    /// A required delimiter was absent.
    #[error("[line {line}] Error{context}: {message}")]
    MissingToken {
        line: u32,
        context: String,
        message: String,
    },
}

impl ParseError {
    pub fn line(&self) -> u32 {
        match self {
            ParseError::UnexpectedToken { line, .. } | ParseError::MissingToken { line, .. } => {
                *line
            }
        }
    }

    pub fn context(&self) -> &str {
        match self {
            ParseError::UnexpectedToken { context, .. }
            | ParseError::MissingToken { context, .. } => context,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ParseError::UnexpectedToken { message, .. }
            | ParseError::MissingToken { message, .. } => message,
        }
    }
}

pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    current: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    /// The token slice must end with an `Eof` sentinel, as produced by the
    /// scanner.
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, current: 0 }
    }

    pub fn parse(&mut self) -> Result<Expression, ParseError> {
        self.expression()
    }

    fn expression(&mut self) -> Result<Expression, ParseError> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expression, ParseError> {
        use TokenKind::*;

        let mut expression = self.comparison()?;
        while self.match_any(&[BangEqual, EqualEqual]) {
            let operator = Operator::from(self.previous());
            let right = self.comparison()?;
            expression = Binary::new(expression, operator, right).into();
        }
        Ok(expression)
    }

    fn comparison(&mut self) -> Result<Expression, ParseError> {
        use TokenKind::*;

        let mut expression = self.term()?;
        while self.match_any(&[Greater, GreaterEqual, Less, LessEqual]) {
            let operator = Operator::from(self.previous());
            let right = self.term()?;
            expression = Binary::new(expression, operator, right).into();
        }
        Ok(expression)
    }

    fn term(&mut self) -> Result<Expression, ParseError> {
        use TokenKind::*;

        let mut expression = self.factor()?;
        while self.match_any(&[Minus, Plus]) {
            let operator = Operator::from(self.previous());
            let right = self.factor()?;
            expression = Binary::new(expression, operator, right).into();
        }
        Ok(expression)
    }

    fn factor(&mut self) -> Result<Expression, ParseError> {
        use TokenKind::*;

        let mut expression = self.unary()?;
        while self.match_any(&[Slash, Star]) {
            let operator = Operator::from(self.previous());
            let right = self.unary()?;
            expression = Binary::new(expression, operator, right).into();
        }
        Ok(expression)
    }

    fn unary(&mut self) -> Result<Expression, ParseError> {
        use TokenKind::*;

        if self.match_any(&[Bang, Minus]) {
            let operator = Operator::from(self.previous());
            let right = self.unary()?;
            return Ok(Unary::new(operator, right).into());
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expression, ParseError> {
        use TokenKind::*;

        if self.match_any(&[False]) {
            return Ok(Literal::new(false).into());
        }
        if self.match_any(&[True]) {
            return Ok(Literal::new(true).into());
        }
        if self.match_any(&[Nil]) {
            return Ok(Literal::nil().into());
        }
        if self.match_any(&[Number, String]) {
            return Ok(Literal::new(self.previous().literal.clone()).into());
        }
        if self.match_any(&[LeftParen]) {
            let inner = self.expression()?;
            self.consume(RightParen, "Expect ')' after expression.")?;
            return Ok(Grouping::new(inner).into());
        }

        Err(self.unexpected("Expect expression."))
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            return true;
        }
        false
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<&Token<'a>, ParseError> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        let token = self.peek();
        Err(ParseError::MissingToken {
            line: token.line,
            context: context_for(token),
            message: message.to_string(),
        })
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token<'a> {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token<'a> {
        &self.tokens[self.current - 1]
    }

    fn unexpected(&self, message: &str) -> ParseError {
        let token = self.peek();
        ParseError::UnexpectedToken {
            line: token.line,
            context: context_for(token),
            message: message.to_string(),
        }
    }
}

fn context_for(token: &Token<'_>) -> String {
    if token.kind == TokenKind::Eof {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}
