//! Statement element
//!
//!  Any line of host code that is not a definition header, a decorator, or a `test:`/`doc:`
//!  header is a statement. Simple statements are leaves. Compound statements (`if x:`,
//!  `for a in b:`, `try:` ...) own the indented body that follows them.
//!
//! Syntax:
//!     <expression>
//!     <expression> <assign-op> <expression>            = += -= *= /=
//!     "return" <expression>?
//!     <keyword> <expression>?                          pass break continue raise yield assert del
//!     ("import" | "from") <anything>                   kept as raw text
//!     <compound-keyword> <expression>? ":" <newline> <indent> <items> <dedent>

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use super::expression::Expression;
use super::program_node::ProgramNode;
use serde::Serialize;
use std::fmt;

/// Keywords that open a compound statement with an indented body
pub const COMPOUND_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "with", "try", "except", "finally",
];

/// Keywords that form a simple statement with an optional argument
pub const SIMPLE_KEYWORDS: &[&str] = &[
    "pass", "break", "continue", "raise", "yield", "assert", "del",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StatementKind {
    Expression(Expression),
    Assignment {
        target: Expression,
        operator: String,
        value: Expression,
    },
    Return(Option<Expression>),
    Keyword {
        keyword: String,
        argument: Option<Expression>,
    },
    /// `import x` / `from x import y`, verbatim
    Import(String),
    Compound {
        keyword: String,
        header: Option<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub kind: StatementKind,
    /// Body of a compound statement; always empty for simple statements
    pub children: Vec<ProgramNode>,
    pub location: Range,
}

impl Statement {
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            location: Range::default(),
        }
    }

    pub fn with_children(mut self, children: Vec<ProgramNode>) -> Self {
        self.children = children;
        self
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    pub fn is_compound(&self) -> bool {
        matches!(self.kind, StatementKind::Compound { .. })
    }

    /// The expression carried by an expression statement, if that is what this is
    pub fn expression(&self) -> Option<&Expression> {
        match &self.kind {
            StatementKind::Expression(expr) => Some(expr),
            _ => None,
        }
    }
}

/// Renders only the statement's own line, never its body
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StatementKind::Expression(expr) => write!(f, "{}", expr),
            StatementKind::Assignment {
                target,
                operator,
                value,
            } => write!(f, "{} {} {}", target, operator, value),
            StatementKind::Return(None) => f.write_str("return"),
            StatementKind::Return(Some(value)) => write!(f, "return {}", value),
            StatementKind::Keyword {
                keyword,
                argument: None,
            } => f.write_str(keyword),
            StatementKind::Keyword {
                keyword,
                argument: Some(argument),
            } => write!(f, "{} {}", keyword, argument),
            StatementKind::Import(text) => f.write_str(text),
            StatementKind::Compound {
                keyword,
                header: None,
            } => write!(f, "{}:", keyword),
            StatementKind::Compound {
                keyword,
                header: Some(header),
            } => write!(f, "{} {}:", keyword, header),
        }
    }
}

impl AstNode for Statement {
    fn node_type(&self) -> &'static str {
        "Statement"
    }

    fn display_label(&self) -> String {
        self.to_string()
    }

    fn range(&self) -> &Range {
        &self.location
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_statement(self);
        for child in &self.children {
            child.accept(visitor);
        }
        visitor.leave_statement(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_header_line_only() {
        let body = ProgramNode::Statement(Statement::new(StatementKind::Keyword {
            keyword: "pass".to_string(),
            argument: None,
        }));
        let stmt = Statement::new(StatementKind::Compound {
            keyword: "if".to_string(),
            header: Some(Expression::identifier("ready")),
        })
        .with_children(vec![body]);

        assert!(stmt.is_compound());
        assert_eq!(stmt.to_string(), "if ready:");
    }

    #[test]
    fn test_display_assignment_and_return() {
        let assign = Statement::new(StatementKind::Assignment {
            target: Expression::identifier("total"),
            operator: "+=".to_string(),
            value: Expression::number("1"),
        });
        let ret = Statement::new(StatementKind::Return(None));

        assert_eq!(assign.to_string(), "total += 1");
        assert_eq!(ret.to_string(), "return");
        assert!(assign.expression().is_none());
    }
}
