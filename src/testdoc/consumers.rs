//! Consumer views
//!
//!     Editors, test runners and documentation renderers never re-parse raw text. They take
//!     a [Program](crate::testdoc::ast::Program) and derive what they need from the node
//!     locations recorded during parsing:
//!
//!         highlighting   per-line role of every DSL construct, with assertion sub-spans
//!         visibility     line ranges of test and doc blocks, and the text with them hidden
//!         extraction     test cases and doc text grouped by owning definition
//!
//!     When a file fails to parse there is no tree, and callers fall back to treating the
//!     file as plain text.

pub mod extraction;
pub mod highlighting;
pub mod visibility;

use crate::testdoc::ast::{Program, ProgramNode};

/// Every test and doc block in source order, with owners qualified like `Class.method`.
/// Blocks owned by the program itself have no owner.
pub(crate) fn owned_blocks(program: &Program) -> Vec<(Option<String>, &ProgramNode)> {
    fn walk<'p>(
        nodes: &'p [ProgramNode],
        owner: Option<&str>,
        out: &mut Vec<(Option<String>, &'p ProgramNode)>,
    ) {
        for node in nodes {
            match node {
                ProgramNode::TestBlock(_) | ProgramNode::DocBlock(_) => {
                    out.push((owner.map(str::to_string), node));
                }
                _ => {
                    let qualified = node.name().map(|name| match owner {
                        Some(parent) => format!("{}.{}", parent, name),
                        None => name.to_string(),
                    });
                    walk(node.children(), qualified.as_deref().or(owner), out);
                }
            }
        }
    }

    let mut out = Vec::new();
    walk(&program.children, None, &mut out);
    out
}
