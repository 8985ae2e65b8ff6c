use crate::{
    report::DiagnosticSink,
    token::{Literal, Token, TokenKind},
};
use std::{iter::Peekable, str::CharIndices};
use unicode_xid::UnicodeXID;

/// Scan `source` into an ordered token sequence, reporting every lexical
/// error through `sink`. The sequence always ends with exactly one `Eof`
/// token, whatever the input looked like.
pub fn scan<'a>(source: &'a str, sink: &mut dyn DiagnosticSink) -> Vec<Token<'a>> {
    Scanner::new(source, sink).scan_tokens()
}

pub struct Scanner<'a, 'r> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    start: usize,
    current: usize,
    line: u32,
    tokens: Vec<Token<'a>>,
    sink: &'r mut dyn DiagnosticSink,
}

impl<'a, 'r> Scanner<'a, 'r> {
    pub fn new(source: &'a str, sink: &'r mut dyn DiagnosticSink) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            sink,
        }
    }

    pub fn scan_tokens(mut self) -> Vec<Token<'a>> {
        while let Some(&(start, _)) = self.chars.peek() {
            self.start = start;
            self.scan_token();
        }
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: "",
            literal: Literal::Nil,
            line: self.line,
        });
        self.tokens
    }

    fn scan_token(&mut self) {
        use TokenKind::*;

        let Some(c) = self.advance() else { return };
        match c {
            '(' => self.add_token(LeftParen),
            ')' => self.add_token(RightParen),
            '{' => self.add_token(LeftBrace),
            '}' => self.add_token(RightBrace),
            ',' => self.add_token(Comma),
            '.' => self.add_token(Dot),
            '-' => self.add_token(Minus),
            '+' => self.add_token(Plus),
            ';' => self.add_token(Semicolon),
            '*' => self.add_token(Star),
            '!' => {
                let kind = if self.match_char('=') { BangEqual } else { Bang };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_char('=') { EqualEqual } else { Equal };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_char('=') { LessEqual } else { Less };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_char('=') { GreaterEqual } else { Greater };
                self.add_token(kind);
            }
            '/' => {
                if self.match_char('/') {
                    // comment runs to the end of the line and emits nothing
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.add_token(Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(),
            '0'..='9' => self.number(),
            c if is_identifier_start(c) => self.identifier(),
            c => {
                let message = format!("Unexpected character '{c}'.");
                self.sink.report(self.line, "", &message);
            }
        }
    }

    fn string(&mut self) {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.peek().is_none() {
            self.sink.report(self.line, "", "Unterminated string.");
            return;
        }

        // closing quote
        self.advance();

        let value = &self.source[self.start + 1..self.current - 1];
        self.add_literal(TokenKind::String, Literal::String(value.into()));
    }

    fn number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // the dot belongs to the number only when a digit follows it
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let lexeme = self.lexeme();
        match lexeme.parse() {
            Ok(value) => self.add_literal(TokenKind::Number, Literal::Number(value)),
            Err(_) => {
                let message = format!("Invalid number literal '{lexeme}'.");
                self.sink.report(self.line, "", &message);
            }
        }
    }

    fn identifier(&mut self) {
        while self.peek().is_some_and(is_identifier_continue) {
            self.advance();
        }
        let kind = TokenKind::keyword(self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn advance(&mut self) -> Option<char> {
        let (index, c) = self.chars.next()?;
        self.current = index + c.len_utf8();
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn peek_next(&self) -> Option<char> {
        // Peekable only looks one ahead; a clone of the iterator goes further
        let mut lookahead = self.chars.clone();
        lookahead.next();
        lookahead.next().map(|(_, c)| c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            return true;
        }
        false
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal(kind, Literal::Nil);
    }

    fn add_literal(&mut self, kind: TokenKind, literal: Literal) {
        self.tokens.push(Token {
            kind,
            lexeme: self.lexeme(),
            literal,
            line: self.line,
        });
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || UnicodeXID::is_xid_start(c)
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || UnicodeXID::is_xid_continue(c)
}
