//! Token cursor
//!
//! A forward-only view over the token stream for the recursive descent. The stream always
//! ends with `Eof`; reading past the end keeps returning it.

use crate::testdoc::ast::range::{Position, Range};
use crate::testdoc::ast::{ParseError, ParseResult};
use crate::testdoc::lexing::{Token, TokenKind};

pub(crate) struct TokenCursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenCursor {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| &t.kind) != Some(&TokenKind::Eof) {
            let end = tokens
                .last()
                .map(|t| Range::at(t.range.span.end, t.range.end))
                .unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, "", end));
        }
        Self { tokens, pos: 0 }
    }

    pub fn peek(&self) -> &Token {
        self.nth(0)
    }

    pub fn nth(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    /// The most recently consumed token (the first token if nothing was consumed yet)
    pub fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    pub fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    pub fn position(&self) -> Position {
        self.peek().range.start
    }

    pub fn at(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it has the given kind
    pub fn eat(&mut self, kind: &TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub fn expect(&mut self, kind: &TokenKind, context: &str) -> ParseResult<Token> {
        self.eat(kind).ok_or_else(|| {
            self.unexpected(&format!("expected {} {}", kind.describe(), context))
        })
    }

    /// Structural error at the current token, naming what was found
    pub fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::structural(
            self.position(),
            format!("{}, found {}", expected, self.peek_kind().describe()),
        )
    }

    /// Take the tokens of one logical line, consuming its terminating Newline
    pub fn take_line(&mut self) -> ParseResult<Vec<Token>> {
        let mut line = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::Newline => {
                    self.advance();
                    return Ok(line);
                }
                TokenKind::Eof | TokenKind::Indent | TokenKind::Dedent | TokenKind::TextLine(_) => {
                    return Err(self.unexpected("expected end of line"));
                }
                _ => line.push(self.advance()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdoc::lexing::tokenize;

    #[test]
    fn test_reading_past_the_end_stays_on_eof() {
        let mut cursor = TokenCursor::new(tokenize("x\n").expect("tokenize"));
        assert!(matches!(cursor.advance().kind, TokenKind::Identifier(_)));
        assert_eq!(cursor.advance().kind, TokenKind::Newline);
        assert_eq!(cursor.advance().kind, TokenKind::Eof);
        assert_eq!(cursor.advance().kind, TokenKind::Eof);
    }

    #[test]
    fn test_take_line_stops_at_newline() {
        let mut cursor = TokenCursor::new(tokenize("a = 1\nb\n").expect("tokenize"));
        let line = cursor.take_line().expect("line");
        assert_eq!(line.len(), 3);
        assert!(matches!(cursor.peek_kind(), TokenKind::Identifier(name) if name == "b"));
    }

    #[test]
    fn test_expect_reports_found_token() {
        let mut cursor = TokenCursor::new(tokenize("x\n").expect("tokenize"));
        let error = cursor
            .expect(&TokenKind::Colon, "after the header")
            .unwrap_err();
        assert_eq!(
            error.message(),
            "expected ':' after the header, found identifier 'x'"
        );
    }

    #[test]
    fn test_empty_stream_gets_eof() {
        let cursor = TokenCursor::new(Vec::new());
        assert_eq!(cursor.peek_kind(), &TokenKind::Eof);
    }
}
