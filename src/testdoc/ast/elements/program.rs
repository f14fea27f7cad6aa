//! Program - the root of the tree for one file

use super::super::range::Range;
use super::super::traits::{visit_children, AstNode, Visitor};
use super::program_node::ProgramNode;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub children: Vec<ProgramNode>,
    pub location: Range,
}

impl Program {
    pub fn new(children: Vec<ProgramNode>) -> Self {
        Self {
            children,
            location: Range::default(),
        }
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    /// Depth-first, pre-order walk over every node in the tree
    pub fn iter_all_nodes(&self) -> Vec<&ProgramNode> {
        fn walk<'a>(nodes: &'a [ProgramNode], out: &mut Vec<&'a ProgramNode>) {
            for node in nodes {
                out.push(node);
                walk(node.children(), out);
            }
        }
        let mut out = Vec::new();
        walk(&self.children, &mut out);
        out
    }
}

impl AstNode for Program {
    fn node_type(&self) -> &'static str {
        "Program"
    }

    fn display_label(&self) -> String {
        match self.children.len() {
            1 => "1 item".to_string(),
            n => format!("{} items", n),
        }
    }

    fn range(&self) -> &Range {
        &self.location
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visit_children(visitor, &self.children);
    }
}
