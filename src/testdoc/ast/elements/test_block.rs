//! Test block element
//!
//!  A test block holds the inline test cases of the definition it follows. Each test case is
//!  zero or more setup statements followed by exactly one assertion. The trailing comma after
//!  an assertion is optional everywhere and carries no meaning.
//!
//! Syntax:
//!     "test" ":" <newline>
//!     <indent>
//!         (<statement> <newline>)* <expression> "==" <expression> ":" <string> ","? <newline>
//!         ...
//!     <dedent>
//!
//! Examples:
//!     test:
//!         add(2, 3) == 5: "basic",
//!         s = Stack()
//!         s.push(1)
//!         s.size() == 1: "push grows the stack"

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use super::expression::Expression;
use super::statement::Statement;
use serde::Serialize;
use std::fmt;

/// `left == right: "message"`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assertion {
    pub left: Expression,
    pub right: Expression,
    /// The message text without its quotes
    pub message: String,
    pub left_location: Range,
    pub right_location: Range,
    /// Covers the quoted message including both quotes
    pub message_location: Range,
    pub location: Range,
}

impl Assertion {
    pub fn new(left: Expression, right: Expression, message: impl Into<String>) -> Self {
        Self {
            left,
            right,
            message: message.into(),
            left_location: Range::default(),
            right_location: Range::default(),
            message_location: Range::default(),
            location: Range::default(),
        }
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} == {}: \"{}\"", self.left, self.right, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    pub setup: Vec<Statement>,
    pub assertion: Assertion,
    /// Whether the case was written with its optional trailing comma
    pub trailing_comma: bool,
    pub location: Range,
}

impl TestCase {
    pub fn new(setup: Vec<Statement>, assertion: Assertion) -> Self {
        Self {
            setup,
            assertion,
            trailing_comma: false,
            location: Range::default(),
        }
    }
}

impl AstNode for TestCase {
    fn node_type(&self) -> &'static str {
        "TestCase"
    }

    fn display_label(&self) -> String {
        self.assertion.message.clone()
    }

    fn range(&self) -> &Range {
        &self.location
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_test_case(self);
        for statement in &self.setup {
            statement.accept(visitor);
        }
        visitor.visit_assertion(&self.assertion);
        visitor.leave_test_case(self);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestBlock {
    pub cases: Vec<TestCase>,
    /// From the `test` keyword through the last line of the last case
    pub location: Range,
    pub header_location: Range,
}

impl TestBlock {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self {
            cases,
            location: Range::default(),
            header_location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    pub fn assertions(&self) -> impl Iterator<Item = &Assertion> {
        self.cases.iter().map(|case| &case.assertion)
    }
}

impl AstNode for TestBlock {
    fn node_type(&self) -> &'static str {
        "TestBlock"
    }

    fn display_label(&self) -> String {
        match self.cases.len() {
            1 => "1 case".to_string(),
            n => format!("{} cases", n),
        }
    }

    fn range(&self) -> &Range {
        &self.location
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_test_block(self);
        for case in &self.cases {
            case.accept(visitor);
        }
        visitor.leave_test_block(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_display() {
        let assertion = Assertion::new(
            Expression::call("add", vec![Expression::number("0"), Expression::number("0")]),
            Expression::number("0"),
            "zero",
        );
        assert_eq!(assertion.to_string(), "add(0, 0) == 0: \"zero\"");
    }

    #[test]
    fn test_block_label_counts_cases() {
        let case = TestCase::new(
            vec![],
            Assertion::new(Expression::identifier("a"), Expression::identifier("b"), "m"),
        );
        let one = TestBlock::new(vec![case.clone()]);
        let two = TestBlock::new(vec![case.clone(), case]);
        assert_eq!(one.display_label(), "1 case");
        assert_eq!(two.display_label(), "2 cases");
        assert_eq!(two.assertions().count(), 2);
    }
}
