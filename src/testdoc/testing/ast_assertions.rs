//! Fluent assertion API for trees

use crate::testdoc::ast::{
    AstNode, ClassDef, DocBlock, FunctionDef, Program, ProgramNode, Statement, TestBlock,
    TestCase,
};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a program
pub fn assert_program(program: &Program) -> ProgramAssertion<'_> {
    ProgramAssertion { program }
}

fn summarize_items(items: &[ProgramNode]) -> String {
    items
        .iter()
        .map(|item| format!("{}({})", item.node_type(), item.display_label()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_child<'a, F>(children: &'a [ProgramNode], index: usize, context: &str, assertion: F)
where
    F: FnOnce(NodeAssertion<'a>),
{
    assert!(
        index < children.len(),
        "{}: child index {} out of bounds ({} children: [{}])",
        context,
        index,
        children.len(),
        summarize_items(children)
    );
    assertion(NodeAssertion {
        node: &children[index],
        context: format!("{}.children[{}]", context, index),
    });
}

fn check_child_count(children: &[ProgramNode], expected: usize, context: &str) {
    assert_eq!(
        children.len(),
        expected,
        "{}: expected {} children, found {}: [{}]",
        context,
        expected,
        children.len(),
        summarize_items(children)
    );
}

// ============================================================================
// Program Assertions
// ============================================================================

pub struct ProgramAssertion<'a> {
    program: &'a Program,
}

impl<'a> ProgramAssertion<'a> {
    /// Assert the number of top-level items
    pub fn item_count(self, expected: usize) -> Self {
        check_child_count(&self.program.children, expected, "program");
        self
    }

    /// Assert on a top-level item by index
    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        check_child(&self.program.children, index, "program", assertion);
        self
    }
}

// ============================================================================
// Node Assertions
// ============================================================================

pub struct NodeAssertion<'a> {
    node: &'a ProgramNode,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    fn wrong_type(&self, expected: &str) -> ! {
        panic!(
            "{}: expected {}, found {}({})",
            self.context,
            expected,
            self.node.node_type(),
            self.node.display_label()
        )
    }

    pub fn assert_function_def(self) -> FunctionAssertion<'a> {
        match self.node {
            ProgramNode::FunctionDef(def) => FunctionAssertion {
                def,
                context: self.context,
            },
            _ => self.wrong_type("FunctionDef"),
        }
    }

    pub fn assert_method_def(self) -> FunctionAssertion<'a> {
        match self.node {
            ProgramNode::MethodDef(def) => FunctionAssertion {
                def,
                context: self.context,
            },
            _ => self.wrong_type("MethodDef"),
        }
    }

    pub fn assert_class_def(self) -> ClassAssertion<'a> {
        match self.node {
            ProgramNode::ClassDef(class) => ClassAssertion {
                class,
                context: self.context,
            },
            _ => self.wrong_type("ClassDef"),
        }
    }

    pub fn assert_test_block(self) -> TestBlockAssertion<'a> {
        match self.node {
            ProgramNode::TestBlock(block) => TestBlockAssertion {
                block,
                context: self.context,
            },
            _ => self.wrong_type("TestBlock"),
        }
    }

    pub fn assert_doc_block(self) -> DocBlockAssertion<'a> {
        match self.node {
            ProgramNode::DocBlock(block) => DocBlockAssertion {
                block,
                context: self.context,
            },
            _ => self.wrong_type("DocBlock"),
        }
    }

    pub fn assert_statement(self) -> StatementAssertion<'a> {
        match self.node {
            ProgramNode::Statement(statement) => StatementAssertion {
                statement,
                context: self.context,
            },
            _ => self.wrong_type("Statement"),
        }
    }
}

// ============================================================================
// Definition Assertions
// ============================================================================

pub struct FunctionAssertion<'a> {
    def: &'a FunctionDef,
    context: String,
}

impl<'a> FunctionAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.def.name, expected, "{}: wrong name", self.context);
        self
    }

    /// Assert the rendered signature, e.g. `add(a, b=1) -> int`
    pub fn signature(self, expected: &str) -> Self {
        assert_eq!(
            self.def.signature(),
            expected,
            "{}: wrong signature",
            self.context
        );
        self
    }

    pub fn decorator_count(self, expected: usize) -> Self {
        assert_eq!(
            self.def.decorators.len(),
            expected,
            "{}: wrong decorator count",
            self.context
        );
        self
    }

    pub fn test_block_count(self, expected: usize) -> Self {
        let actual = self
            .def
            .children
            .iter()
            .filter(|child| child.as_test_block().is_some())
            .count();
        assert_eq!(actual, expected, "{}: wrong test block count", self.context);
        self
    }

    pub fn doc_block_count(self, expected: usize) -> Self {
        let actual = self
            .def
            .children
            .iter()
            .filter(|child| child.as_doc_block().is_some())
            .count();
        assert_eq!(actual, expected, "{}: wrong doc block count", self.context);
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        check_child_count(&self.def.children, expected, &self.context);
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        check_child(&self.def.children, index, &self.context, assertion);
        self
    }

    /// Assert the definition spans the given 0-based lines, inclusive
    pub fn lines(self, start: usize, end: usize) -> Self {
        let range = self.def.range();
        assert_eq!(
            (range.start.line, range.end.line),
            (start, end),
            "{}: wrong line span",
            self.context
        );
        self
    }
}

pub struct ClassAssertion<'a> {
    class: &'a ClassDef,
    context: String,
}

impl<'a> ClassAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.class.name, expected, "{}: wrong name", self.context);
        self
    }

    pub fn base_count(self, expected: usize) -> Self {
        assert_eq!(
            self.class.bases.len(),
            expected,
            "{}: wrong base count",
            self.context
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        check_child_count(&self.class.children, expected, &self.context);
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        check_child(&self.class.children, index, &self.context, assertion);
        self
    }
}

// ============================================================================
// DSL Block Assertions
// ============================================================================

pub struct TestBlockAssertion<'a> {
    block: &'a TestBlock,
    context: String,
}

impl<'a> TestBlockAssertion<'a> {
    pub fn case_count(self, expected: usize) -> Self {
        assert_eq!(
            self.block.cases.len(),
            expected,
            "{}: wrong case count, messages: {:?}",
            self.context,
            self.block
                .cases
                .iter()
                .map(|case| case.assertion.message.as_str())
                .collect::<Vec<_>>()
        );
        self
    }

    pub fn case<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(TestCaseAssertion<'a>),
    {
        assert!(
            index < self.block.cases.len(),
            "{}: case index {} out of bounds ({} cases)",
            self.context,
            index,
            self.block.cases.len()
        );
        assertion(TestCaseAssertion {
            case: &self.block.cases[index],
            context: format!("{}.cases[{}]", self.context, index),
        });
        self
    }
}

pub struct TestCaseAssertion<'a> {
    case: &'a TestCase,
    context: String,
}

impl<'a> TestCaseAssertion<'a> {
    pub fn setup_count(self, expected: usize) -> Self {
        assert_eq!(
            self.case.setup.len(),
            expected,
            "{}: wrong setup statement count",
            self.context
        );
        self
    }

    /// Assert the rendered text of a setup statement
    pub fn setup(self, index: usize, expected: &str) -> Self {
        let statement = self.case.setup.get(index).unwrap_or_else(|| {
            panic!(
                "{}: setup index {} out of bounds ({} statements)",
                self.context,
                index,
                self.case.setup.len()
            )
        });
        assert_eq!(
            statement.to_string(),
            expected,
            "{}: wrong setup[{}]",
            self.context,
            index
        );
        self
    }

    /// Assert the canonical rendering of the left operand
    pub fn left(self, expected: &str) -> Self {
        assert_eq!(
            self.case.assertion.left.to_string(),
            expected,
            "{}: wrong left operand",
            self.context
        );
        self
    }

    pub fn right(self, expected: &str) -> Self {
        assert_eq!(
            self.case.assertion.right.to_string(),
            expected,
            "{}: wrong right operand",
            self.context
        );
        self
    }

    /// Assert the expression kind of the left operand, e.g. `MethodCall`
    pub fn left_kind(self, expected: &str) -> Self {
        assert_eq!(
            self.case.assertion.left.kind_name(),
            expected,
            "{}: wrong left operand kind",
            self.context
        );
        self
    }

    pub fn right_kind(self, expected: &str) -> Self {
        assert_eq!(
            self.case.assertion.right.kind_name(),
            expected,
            "{}: wrong right operand kind",
            self.context
        );
        self
    }

    pub fn message(self, expected: &str) -> Self {
        assert_eq!(
            self.case.assertion.message, expected,
            "{}: wrong message",
            self.context
        );
        self
    }
}

pub struct DocBlockAssertion<'a> {
    block: &'a DocBlock,
    context: String,
}

impl<'a> DocBlockAssertion<'a> {
    pub fn line_count(self, expected: usize) -> Self {
        assert_eq!(
            self.block.lines.len(),
            expected,
            "{}: wrong line count, text: {:?}",
            self.context,
            self.block.text()
        );
        self
    }

    pub fn line(self, index: usize, expected: &str) -> Self {
        let actual = self.block.lines.get(index).map(|line| line.text.as_str());
        assert_eq!(actual, Some(expected), "{}: wrong line {}", self.context, index);
        self
    }

    /// Assert the whole text, lines joined with `\n`
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(self.block.text(), expected, "{}: wrong text", self.context);
        self
    }
}

// ============================================================================
// Host Statement Assertions
// ============================================================================

pub struct StatementAssertion<'a> {
    statement: &'a Statement,
    context: String,
}

impl<'a> StatementAssertion<'a> {
    /// Assert the rendered statement line
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.statement.to_string(),
            expected,
            "{}: wrong statement",
            self.context
        );
        self
    }

    pub fn is_compound(self) -> Self {
        assert!(
            self.statement.is_compound(),
            "{}: expected a compound statement, found {}",
            self.context,
            self.statement
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        check_child_count(&self.statement.children, expected, &self.context);
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        check_child(&self.statement.children, index, &self.context, assertion);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdoc::parse;

    #[test]
    fn test_fluent_walk() {
        let source = "\
class Stack(Base):
    def push(self, x):
        pass
    test:
        s = Stack()
        s.push(1) == None: \"push\"
";
        let program = parse(source).expect("source should parse");
        assert_program(&program).item_count(1).item(0, |item| {
            item.assert_class_def()
                .name("Stack")
                .base_count(1)
                .child_count(1)
                .child(0, |method| {
                    method
                        .assert_method_def()
                        .signature("push(self, x)")
                        .test_block_count(1)
                        .child(1, |block| {
                            block.assert_test_block().case_count(1).case(0, |case| {
                                case.setup_count(1)
                                    .setup(0, "s = Stack()")
                                    .left("s.push(1)")
                                    .left_kind("MethodCall")
                                    .right_kind("Identifier")
                                    .message("push");
                            });
                        });
                });
        });
    }

    #[test]
    #[should_panic(expected = "expected FunctionDef")]
    fn test_wrong_type_panics() {
        let program = parse("x = 1\n").expect("source should parse");
        assert_program(&program).item(0, |item| {
            item.assert_function_def();
        });
    }
}
