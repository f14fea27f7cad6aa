//! Line classification for syntax highlighting
//!
//! Walks the tree and re-derives a role for every physical line from node locations.
//! Lines that belong to no DSL construct are `Code`, which is also what every line becomes
//! when a file does not parse.
//!
//! Assertion lines also carry the column spans of their operands and message, so an editor
//! can inject host-language highlighting into the operands and string highlighting into
//! the message. Columns are 0-based byte offsets, end exclusive.

use crate::testdoc::ast::range::Range;
use crate::testdoc::ast::{
    Assertion, AstNode, DocBlock, DocLine, Program, TestBlock, TestCase, Visitor,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpan {
    pub start: usize,
    pub end: usize,
}

impl ColumnSpan {
    /// The part of `range` that lies on `line`, given that line's length
    fn clip(range: &Range, line: usize, line_length: usize) -> Self {
        let start = if range.start.line == line {
            range.start.column
        } else {
            0
        };
        let end = if range.end.line == line {
            range.end.column
        } else {
            line_length
        };
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum LineRole {
    Code,
    TestHeader,
    TestStatement,
    Assertion {
        left: ColumnSpan,
        right: ColumnSpan,
        message: ColumnSpan,
    },
    DocHeader,
    DocText,
}

impl LineRole {
    pub fn name(&self) -> &'static str {
        match self {
            LineRole::Code => "code",
            LineRole::TestHeader => "test-header",
            LineRole::TestStatement => "test-statement",
            LineRole::Assertion { .. } => "assertion",
            LineRole::DocHeader => "doc-header",
            LineRole::DocText => "doc-text",
        }
    }

    pub fn is_dsl(&self) -> bool {
        !matches!(self, LineRole::Code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineClass {
    /// 0-based line number
    pub line: usize,
    pub role: LineRole,
}

struct Classifier<'s> {
    lines: Vec<&'s str>,
    roles: Vec<LineRole>,
}

impl<'s> Classifier<'s> {
    fn set(&mut self, line: usize, role: LineRole) {
        if let Some(slot) = self.roles.get_mut(line) {
            *slot = role;
        }
    }

    fn set_range(&mut self, range: &Range, role: LineRole) {
        for line in range.lines() {
            self.set(line, role.clone());
        }
    }

    fn line_length(&self, line: usize) -> usize {
        self.lines.get(line).map(|text| text.len()).unwrap_or(0)
    }
}

impl Visitor for Classifier<'_> {
    fn visit_test_block(&mut self, block: &TestBlock) {
        self.set(block.header_location.start.line, LineRole::TestHeader);
    }

    fn visit_test_case(&mut self, case: &TestCase) {
        for statement in &case.setup {
            self.set_range(&statement.location, LineRole::TestStatement);
        }
    }

    fn visit_assertion(&mut self, assertion: &Assertion) {
        self.set_range(&assertion.location, LineRole::TestStatement);
        let line = assertion.location.start.line;
        let length = self.line_length(line);
        self.set(
            line,
            LineRole::Assertion {
                left: ColumnSpan::clip(&assertion.left_location, line, length),
                right: ColumnSpan::clip(&assertion.right_location, line, length),
                message: ColumnSpan::clip(&assertion.message_location, line, length),
            },
        );
    }

    fn visit_doc_block(&mut self, block: &DocBlock) {
        self.set(block.header_location.start.line, LineRole::DocHeader);
    }

    fn visit_doc_line(&mut self, line: &DocLine) {
        self.set(line.location.start.line, LineRole::DocText);
    }
}

/// Role of every physical line of `source`
pub fn classify_lines(program: &Program, source: &str) -> Vec<LineClass> {
    let lines: Vec<&str> = source.lines().collect();
    let mut classifier = Classifier {
        roles: vec![LineRole::Code; lines.len()],
        lines,
    };
    program.accept(&mut classifier);
    classifier
        .roles
        .into_iter()
        .enumerate()
        .map(|(line, role)| LineClass { line, role })
        .collect()
}
