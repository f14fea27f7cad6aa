//! Shared lexing types

use crate::testdoc::ast::range::Position;
use std::fmt;

/// Errors that can occur during tokenization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizationError {
    /// A `"` with no closing quote on the same line
    UnterminatedString { position: Position },
    /// A dedent to a width that matches no enclosing indentation level
    IndentationMismatch { position: Position, width: usize },
    /// Indentation that neither extends nor returns to an open level, e.g. tabs where
    /// spaces opened the block
    InconsistentIndentation { position: Position },
    /// A character that starts no token
    UnexpectedCharacter { position: Position, found: char },
}

impl TokenizationError {
    pub fn position(&self) -> Position {
        match self {
            TokenizationError::UnterminatedString { position }
            | TokenizationError::IndentationMismatch { position, .. }
            | TokenizationError::InconsistentIndentation { position }
            | TokenizationError::UnexpectedCharacter { position, .. } => *position,
        }
    }

    pub fn message(&self) -> String {
        match self {
            TokenizationError::UnterminatedString { .. } => {
                "unterminated string literal".to_string()
            }
            TokenizationError::IndentationMismatch { width, .. } => format!(
                "unindent to width {} does not match any outer indentation level",
                width
            ),
            TokenizationError::InconsistentIndentation { .. } => {
                "inconsistent use of tabs and spaces in indentation".to_string()
            }
            TokenizationError::UnexpectedCharacter { found, .. } => {
                format!("unexpected character {:?}", found)
            }
        }
    }

    /// True for the two indentation failures
    pub fn is_indentation_error(&self) -> bool {
        matches!(
            self,
            TokenizationError::IndentationMismatch { .. }
                | TokenizationError::InconsistentIndentation { .. }
        )
    }
}

impl fmt::Display for TokenizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message(), self.position())
    }
}

impl std::error::Error for TokenizationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_one_based_position() {
        let error = TokenizationError::UnterminatedString {
            position: Position::new(2, 4),
        };
        assert_eq!(error.to_string(), "unterminated string literal at 3:5");
    }

    #[test]
    fn test_indentation_errors() {
        let mismatch = TokenizationError::IndentationMismatch {
            position: Position::new(0, 0),
            width: 3,
        };
        assert!(mismatch.is_indentation_error());
        assert!(mismatch.message().contains("width 3"));
        let stray = TokenizationError::UnexpectedCharacter {
            position: Position::new(0, 0),
            found: '$',
        };
        assert!(!stray.is_indentation_error());
    }
}
