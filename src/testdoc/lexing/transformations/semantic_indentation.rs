//! Semantic indentation
//!
//!     Indentation tokens per se are not useful to the parser: it does not care how many
//!     spaces a line starts with, it cares about levels and what is inside each one. This
//!     stage tracks the indentation of every logical line against a stack of open levels and
//!     turns changes into Indent and Dedent events. Indent and Dedent could be replaced with
//!     open/close braces in c-style languages with the same effect.
//!
//! Algorithm
//!
//!     The stack holds the literal whitespace of every open level, starting with "".
//!     For each logical line, compare its indentation with the top of the stack:
//!        - Equal: no event
//!        - Extends the top (top is a strict prefix): push, emit one Indent
//!        - Otherwise: pop levels while the top is longer than the line's indentation,
//!          emitting one Dedent per pop. The popping must land exactly on the line's
//!          indentation; anything else is an indentation error.
//!     Blank and comment-only lines never reach this stage. At end of input every open
//!     level is closed with a Dedent.
//!
//!     The stack is owned by a single tokenizer run; nothing here is shared between parses.

use crate::testdoc::lexing::common::TokenizationError;
use crate::testdoc::ast::range::Position;
use tracing::trace;

/// What a new logical line does to the indentation structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentChange {
    Same,
    Indent,
    Dedent(usize),
}

/// Stack of open indentation levels
#[derive(Debug, Clone)]
pub struct IndentationStack {
    levels: Vec<String>,
}

impl IndentationStack {
    pub fn new() -> Self {
        Self {
            levels: vec![String::new()],
        }
    }

    /// Number of open levels above the module level
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Whitespace of the innermost open level
    pub fn current(&self) -> &str {
        self.levels.last().map(String::as_str).unwrap_or("")
    }

    /// Apply the indentation of a new logical line.
    ///
    /// `position` is where the line's first token starts; errors are reported there.
    pub fn transition(
        &mut self,
        indent: &str,
        position: Position,
    ) -> Result<IndentChange, TokenizationError> {
        let top = self.current();
        if indent == top {
            return Ok(IndentChange::Same);
        }
        if indent.len() > top.len() {
            if !indent.starts_with(top) {
                return Err(TokenizationError::InconsistentIndentation { position });
            }
            self.levels.push(indent.to_string());
            trace!(depth = self.depth(), "indent");
            return Ok(IndentChange::Indent);
        }

        let mut popped = 0;
        while self.current().len() > indent.len() {
            self.levels.pop();
            popped += 1;
        }
        if self.current() != indent {
            return Err(if self.current().len() == indent.len() {
                TokenizationError::InconsistentIndentation { position }
            } else {
                TokenizationError::IndentationMismatch {
                    position,
                    width: indent.len(),
                }
            });
        }
        trace!(depth = self.depth(), popped, "dedent");
        Ok(IndentChange::Dedent(popped))
    }

    /// Close every open level, returning how many Dedents are owed
    pub fn close(&mut self) -> usize {
        let open = self.depth();
        self.levels.truncate(1);
        open
    }
}

impl Default for IndentationStack {
    fn default() -> Self {
        Self::new()
    }
}
