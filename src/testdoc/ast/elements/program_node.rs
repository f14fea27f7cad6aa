//! ProgramNode - the tagged union of everything that can appear in a scope
//!
//!  Nesting rules, enforced by the parser:
//!
//! | Parent              | Allowed children                                           |
//! |---------------------|------------------------------------------------------------|
//! | Program             | ClassDef, FunctionDef, TestBlock, DocBlock, Statement      |
//! | ClassDef            | MethodDef, ClassDef, TestBlock, DocBlock, Statement        |
//! | FunctionDef/Method  | FunctionDef, ClassDef, TestBlock, DocBlock, Statement      |
//! | Statement(compound) | FunctionDef, ClassDef, Statement                           |
//! | TestBlock/DocBlock  | (none; they own test cases / text lines instead)           |
//!
//!  Every node is owned exactly once by its parent. There are no back references.

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use super::definition::{ClassDef, FunctionDef};
use super::doc_block::DocBlock;
use super::statement::Statement;
use super::test_block::TestBlock;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ProgramNode {
    ClassDef(ClassDef),
    FunctionDef(FunctionDef),
    MethodDef(FunctionDef),
    TestBlock(TestBlock),
    DocBlock(DocBlock),
    Statement(Statement),
}

impl ProgramNode {
    /// Name of the node, for definitions
    pub fn name(&self) -> Option<&str> {
        match self {
            ProgramNode::ClassDef(class) => Some(&class.name),
            ProgramNode::FunctionDef(def) | ProgramNode::MethodDef(def) => Some(&def.name),
            _ => None,
        }
    }

    /// Direct child nodes. Test and doc blocks report none: their content is test cases and
    /// text lines, reachable through their own types.
    pub fn children(&self) -> &[ProgramNode] {
        match self {
            ProgramNode::ClassDef(class) => &class.children,
            ProgramNode::FunctionDef(def) | ProgramNode::MethodDef(def) => &def.children,
            ProgramNode::Statement(statement) => &statement.children,
            ProgramNode::TestBlock(_) | ProgramNode::DocBlock(_) => &[],
        }
    }

    pub fn is_definition(&self) -> bool {
        matches!(
            self,
            ProgramNode::ClassDef(_) | ProgramNode::FunctionDef(_) | ProgramNode::MethodDef(_)
        )
    }

    pub fn as_class_def(&self) -> Option<&ClassDef> {
        match self {
            ProgramNode::ClassDef(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_function_def(&self) -> Option<&FunctionDef> {
        match self {
            ProgramNode::FunctionDef(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_method_def(&self) -> Option<&FunctionDef> {
        match self {
            ProgramNode::MethodDef(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_test_block(&self) -> Option<&TestBlock> {
        match self {
            ProgramNode::TestBlock(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_doc_block(&self) -> Option<&DocBlock> {
        match self {
            ProgramNode::DocBlock(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_statement(&self) -> Option<&Statement> {
        match self {
            ProgramNode::Statement(statement) => Some(statement),
            _ => None,
        }
    }

    /// Mutable access to the children of a node that can own test and doc blocks
    pub(crate) fn definition_children_mut(&mut self) -> Option<&mut Vec<ProgramNode>> {
        match self {
            ProgramNode::ClassDef(class) => Some(&mut class.children),
            ProgramNode::FunctionDef(def) | ProgramNode::MethodDef(def) => Some(&mut def.children),
            _ => None,
        }
    }

    /// Mutable access to the location of any node
    pub(crate) fn location_mut(&mut self) -> &mut Range {
        match self {
            ProgramNode::ClassDef(class) => &mut class.location,
            ProgramNode::FunctionDef(def) | ProgramNode::MethodDef(def) => &mut def.location,
            ProgramNode::TestBlock(block) => &mut block.location,
            ProgramNode::DocBlock(block) => &mut block.location,
            ProgramNode::Statement(statement) => &mut statement.location,
        }
    }
}

impl AstNode for ProgramNode {
    fn node_type(&self) -> &'static str {
        match self {
            ProgramNode::ClassDef(class) => class.node_type(),
            ProgramNode::FunctionDef(def) | ProgramNode::MethodDef(def) => def.node_type(),
            ProgramNode::TestBlock(block) => block.node_type(),
            ProgramNode::DocBlock(block) => block.node_type(),
            ProgramNode::Statement(statement) => statement.node_type(),
        }
    }

    fn display_label(&self) -> String {
        match self {
            ProgramNode::ClassDef(class) => class.display_label(),
            ProgramNode::FunctionDef(def) | ProgramNode::MethodDef(def) => def.display_label(),
            ProgramNode::TestBlock(block) => block.display_label(),
            ProgramNode::DocBlock(block) => block.display_label(),
            ProgramNode::Statement(statement) => statement.display_label(),
        }
    }

    fn range(&self) -> &Range {
        match self {
            ProgramNode::ClassDef(class) => class.range(),
            ProgramNode::FunctionDef(def) | ProgramNode::MethodDef(def) => def.range(),
            ProgramNode::TestBlock(block) => block.range(),
            ProgramNode::DocBlock(block) => block.range(),
            ProgramNode::Statement(statement) => statement.range(),
        }
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            ProgramNode::ClassDef(class) => class.accept(visitor),
            ProgramNode::FunctionDef(def) | ProgramNode::MethodDef(def) => def.accept(visitor),
            ProgramNode::TestBlock(block) => block.accept(visitor),
            ProgramNode::DocBlock(block) => block.accept(visitor),
            ProgramNode::Statement(statement) => statement.accept(visitor),
        }
    }
}
