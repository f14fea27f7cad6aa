//! AST traits - Common interfaces for uniform node access
//!
//! This module defines the common traits that provide uniform access
//! to tree node information across all node types.

use super::elements::{
    Assertion, ClassDef, DocBlock, DocLine, FunctionDef, ProgramNode, Statement, TestBlock,
    TestCase,
};
use super::range::{Position, Range};

/// Visitor trait for traversing the tree
///
/// Implement this trait to walk a [`Program`](super::Program). Each visit method corresponds to
/// a node type. Default implementations are empty, so you only need to override the methods
/// you care about.
///
/// # Example
///
/// ```ignore
/// struct TestCounter(usize);
///
/// impl Visitor for TestCounter {
///     fn visit_test_case(&mut self, _case: &TestCase) {
///         self.0 += 1;
///     }
/// }
///
/// let mut counter = TestCounter(0);
/// program.accept(&mut counter);
/// ```
pub trait Visitor {
    // Definitions with names and children
    fn visit_class_def(&mut self, _class: &ClassDef) {}
    fn leave_class_def(&mut self, _class: &ClassDef) {}

    fn visit_function_def(&mut self, _function: &FunctionDef) {}
    fn leave_function_def(&mut self, _function: &FunctionDef) {}

    fn visit_method_def(&mut self, _method: &FunctionDef) {}
    fn leave_method_def(&mut self, _method: &FunctionDef) {}

    // DSL blocks
    fn visit_test_block(&mut self, _block: &TestBlock) {}
    fn leave_test_block(&mut self, _block: &TestBlock) {}

    fn visit_test_case(&mut self, _case: &TestCase) {}
    fn leave_test_case(&mut self, _case: &TestCase) {}

    fn visit_assertion(&mut self, _assertion: &Assertion) {}

    fn visit_doc_block(&mut self, _block: &DocBlock) {}
    fn leave_doc_block(&mut self, _block: &DocBlock) {}

    fn visit_doc_line(&mut self, _line: &DocLine) {}

    // Host code
    fn visit_statement(&mut self, _statement: &Statement) {}
    fn leave_statement(&mut self, _statement: &Statement) {}
}

/// Helper function to visit all nodes in a ProgramNode slice
pub fn visit_children(visitor: &mut dyn Visitor, items: &[ProgramNode]) {
    for item in items {
        item.accept(visitor);
    }
}

/// Common interface for all tree nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
    fn range(&self) -> &Range;
    fn start_position(&self) -> Position {
        self.range().start
    }

    /// Accept a visitor for traversing this node and its children
    fn accept(&self, visitor: &mut dyn Visitor);
}

/// Trait for named definitions that own child nodes (classes, functions, methods)
pub trait Definition: AstNode {
    fn name(&self) -> &str;
    fn children(&self) -> &[ProgramNode];

    /// Test blocks owned by this definition, in source order
    fn test_blocks(&self) -> Vec<&TestBlock> {
        self.children()
            .iter()
            .filter_map(ProgramNode::as_test_block)
            .collect()
    }

    /// Doc blocks owned by this definition, in source order
    fn doc_blocks(&self) -> Vec<&DocBlock> {
        self.children()
            .iter()
            .filter_map(ProgramNode::as_doc_block)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::elements::{Expression, StatementKind};
    use super::*;

    #[test]
    fn test_visitor_traversal() {
        let statement = ProgramNode::Statement(Statement::new(StatementKind::Return(Some(
            Expression::identifier("x"),
        ))));
        let function = FunctionDef::new("identity").with_children(vec![statement]);
        let class = ClassDef::new("Box")
            .with_children(vec![ProgramNode::MethodDef(FunctionDef::method("get"))]);

        #[derive(Default)]
        struct CountingVisitor {
            classes: usize,
            functions: usize,
            methods: usize,
            statements: usize,
        }

        impl Visitor for CountingVisitor {
            fn visit_class_def(&mut self, _: &ClassDef) {
                self.classes += 1;
            }
            fn visit_function_def(&mut self, _: &FunctionDef) {
                self.functions += 1;
            }
            fn visit_method_def(&mut self, _: &FunctionDef) {
                self.methods += 1;
            }
            fn visit_statement(&mut self, _: &Statement) {
                self.statements += 1;
            }
        }

        let mut visitor = CountingVisitor::default();
        ProgramNode::FunctionDef(function).accept(&mut visitor);
        assert_eq!(visitor.functions, 1);
        assert_eq!(visitor.statements, 1);
        assert_eq!(visitor.methods, 0);

        ProgramNode::ClassDef(class).accept(&mut visitor);
        assert_eq!(visitor.classes, 1);
        assert_eq!(visitor.methods, 1);
        assert_eq!(visitor.functions, 1);
    }
}
