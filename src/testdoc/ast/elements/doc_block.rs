//! Doc block element
//!
//!  A doc block holds free-form documentation lines for the definition it follows. Its body
//!  is never lexed or parsed: each line is kept verbatim, minus the block's base indentation
//!  (the smallest indentation among its non-blank lines). Blank lines between text lines are
//!  kept as empty lines; trailing blank lines are not part of the block.
//!
//! Syntax:
//!     "doc" ":" <newline>
//!     <indent> <text-line>+ <dedent>
//!
//! Examples:
//!     doc:
//!         Adds two numbers.
//!
//!             Indented lines keep their extra indentation.

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocLine {
    pub text: String,
    /// Covers the text after base indentation is removed
    pub location: Range,
}

impl DocLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocBlock {
    pub lines: Vec<DocLine>,
    pub location: Range,
    pub header_location: Range,
}

impl DocBlock {
    pub fn new(lines: Vec<DocLine>) -> Self {
        Self {
            lines,
            location: Range::default(),
            header_location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    /// Lines joined with `\n`
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl AstNode for DocBlock {
    fn node_type(&self) -> &'static str {
        "DocBlock"
    }

    fn display_label(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.trim())
            .find(|text| !text.is_empty())
            .unwrap_or_default()
            .to_string()
    }

    fn range(&self) -> &Range {
        &self.location
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_doc_block(self);
        for line in &self.lines {
            visitor.visit_doc_line(line);
        }
        visitor.leave_doc_block(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_lines() {
        let block = DocBlock::new(vec![
            DocLine::new("Adds two numbers."),
            DocLine::new(""),
            DocLine::new("    Example: add(1, 2)"),
        ]);
        assert_eq!(block.text(), "Adds two numbers.\n\n    Example: add(1, 2)");
        assert_eq!(block.display_label(), "Adds two numbers.");
    }
}
