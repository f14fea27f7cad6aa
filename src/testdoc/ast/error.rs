//! Error types for parsing
//!
//! Every failure is fatal to the parse of the current file: there is no per-line recovery.
//! Callers that want partial results catch the error per file and fall back to treating that
//! file as plain, unstructured text.
//!
//! All errors carry the position of the token (or character) where the mismatch was detected,
//! so editors can show them directly in a gutter.

use super::range::Position;
use crate::testdoc::lexing::TokenizationError;
use std::fmt;

/// The broad class of a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Malformed string literal, inconsistent indentation width, stray character
    Tokenization,
    /// Empty block body, test case without assertion, unexpected token
    Structural,
    /// None of the expression alternatives matched
    Expression,
    /// Input size or nesting depth guard tripped
    LimitExceeded,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorKind::Tokenization => "Tokenization error",
            ParseErrorKind::Structural => "Structural parse error",
            ParseErrorKind::Expression => "Expression parse error",
            ParseErrorKind::LimitExceeded => "Limit exceeded",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while parsing a file into a [`Program`](super::Program)
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Tokenization(TokenizationError),
    Structural { position: Position, message: String },
    Expression { position: Position, message: String },
    LimitExceeded { position: Position, message: String },
}

impl ParseError {
    pub fn structural(position: Position, message: impl Into<String>) -> Self {
        ParseError::Structural {
            position,
            message: message.into(),
        }
    }

    pub fn expression(position: Position, message: impl Into<String>) -> Self {
        ParseError::Expression {
            position,
            message: message.into(),
        }
    }

    pub fn limit(position: Position, message: impl Into<String>) -> Self {
        ParseError::LimitExceeded {
            position,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::Tokenization(_) => ParseErrorKind::Tokenization,
            ParseError::Structural { .. } => ParseErrorKind::Structural,
            ParseError::Expression { .. } => ParseErrorKind::Expression,
            ParseError::LimitExceeded { .. } => ParseErrorKind::LimitExceeded,
        }
    }

    /// 0-based position of the offending token
    pub fn position(&self) -> Position {
        match self {
            ParseError::Tokenization(err) => err.position(),
            ParseError::Structural { position, .. }
            | ParseError::Expression { position, .. }
            | ParseError::LimitExceeded { position, .. } => *position,
        }
    }

    pub fn line(&self) -> usize {
        self.position().line
    }

    pub fn column(&self) -> usize {
        self.position().column
    }

    /// The message without the kind or position prefix
    pub fn message(&self) -> String {
        match self {
            ParseError::Tokenization(err) => err.message(),
            ParseError::Structural { message, .. }
            | ParseError::Expression { message, .. }
            | ParseError::LimitExceeded { message, .. } => message.clone(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind(), self.position(), self.message())
    }
}

impl std::error::Error for ParseError {}

impl From<TokenizationError> for ParseError {
    fn from(err: TokenizationError) -> Self {
        ParseError::Tokenization(err)
    }
}

/// Type alias for parser results
pub type ParseResult<T> = Result<T, ParseError>;

/// Format source code context around an error position
///
/// Shows 2 lines before the error, the error line with >> marker, a caret under the error
/// column, and 2 lines after. All lines are numbered for easy reference.
pub fn format_source_context(source: &str, position: Position) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = position.line;

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for (line_num, line) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        let display_line_num = line_num + 1; // 1-indexed for display

        context.push_str(&format!("{} {:3} | {}\n", marker, display_line_num, line));
        if line_num == error_line {
            context.push_str(&format!("{}^\n", " ".repeat(9 + position.column)));
        }
    }

    context
}
