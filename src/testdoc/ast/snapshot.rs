//! AST Snapshot - a normalized intermediate representation of the tree
//!
//! This module provides a canonical, format-agnostic representation of the tree
//! suitable for line-oriented renderers (treeviz) and for comparing trees in tests.
//!
//! The snapshot captures the complete tree structure with node types, labels,
//! attributes, and children - allowing each serializer to focus solely on
//! presentation without reimplementing traversal logic. Unlike the tree itself,
//! snapshots also have nodes for test cases, assertions and doc lines.

use super::elements::{Assertion, DocLine, Program, ProgramNode, Statement, TestCase};
use super::range::Range;
use super::traits::AstNode;
use serde::Serialize;
use std::collections::BTreeMap;

/// A snapshot of a tree node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "FunctionDef", "TestBlock", "Assertion")
    pub node_type: String,

    /// The primary label or text content of the node
    pub label: String,

    /// Additional attributes specific to the node type
    pub attributes: BTreeMap<String, String>,

    pub range: Range,

    /// Child nodes in the tree
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    /// Create a new snapshot with the given node type and label
    pub fn new(node_type: impl Into<String>, label: impl Into<String>, range: Range) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            attributes: BTreeMap::new(),
            range,
            children: Vec::new(),
        }
    }

    /// Add an attribute to this snapshot
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add multiple children
    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    /// Total number of nodes in this snapshot, itself included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }
}

// ============================================================================
// Snapshot Building Functions
// ============================================================================

/// Create a snapshot of the whole program
pub fn snapshot_from_program(program: &Program) -> AstSnapshot {
    AstSnapshot::new("Program", program.display_label(), program.location.clone())
        .with_children(program.children.iter().map(snapshot_node).collect())
}

/// Create a snapshot of a single node and all its descendants
pub fn snapshot_node(node: &ProgramNode) -> AstSnapshot {
    let base = AstSnapshot::new(node.node_type(), node.display_label(), node.range().clone());

    match node {
        ProgramNode::ClassDef(class) => base
            .with_attribute("name", class.name.clone())
            .with_attribute("decorators", class.decorators.len().to_string())
            .with_children(class.children.iter().map(snapshot_node).collect()),
        ProgramNode::FunctionDef(def) | ProgramNode::MethodDef(def) => base
            .with_attribute("name", def.name.clone())
            .with_attribute("parameters", def.parameters.len().to_string())
            .with_attribute("decorators", def.decorators.len().to_string())
            .with_children(def.children.iter().map(snapshot_node).collect()),
        ProgramNode::TestBlock(block) => base
            .with_attribute("cases", block.cases.len().to_string())
            .with_children(block.cases.iter().map(snapshot_test_case).collect()),
        ProgramNode::DocBlock(block) => base
            .with_attribute("lines", block.lines.len().to_string())
            .with_children(block.lines.iter().map(snapshot_doc_line).collect()),
        ProgramNode::Statement(statement) => snapshot_statement(statement),
    }
}

fn snapshot_statement(statement: &Statement) -> AstSnapshot {
    AstSnapshot::new(
        statement.node_type(),
        statement.display_label(),
        statement.location.clone(),
    )
    .with_children(statement.children.iter().map(snapshot_node).collect())
}

fn snapshot_test_case(case: &TestCase) -> AstSnapshot {
    let mut children: Vec<AstSnapshot> = case.setup.iter().map(snapshot_statement).collect();
    children.push(snapshot_assertion(&case.assertion));
    AstSnapshot::new(case.node_type(), case.display_label(), case.location.clone())
        .with_attribute("trailing_comma", case.trailing_comma.to_string())
        .with_children(children)
}

fn snapshot_assertion(assertion: &Assertion) -> AstSnapshot {
    AstSnapshot::new(
        "Assertion",
        format!("{} == {}", assertion.left, assertion.right),
        assertion.location.clone(),
    )
    .with_attribute("left", assertion.left.kind_name())
    .with_attribute("right", assertion.right.kind_name())
    .with_attribute("message", assertion.message.clone())
}

fn snapshot_doc_line(line: &DocLine) -> AstSnapshot {
    AstSnapshot::new("DocLine", line.text.clone(), line.location.clone())
}
