//! Block visibility
//!
//! Editors fold or hide test and doc blocks without touching unrelated lines. A block range
//! covers the header line through the block's last content line; blank lines after it are
//! not part of it.

use super::owned_blocks;
use crate::testdoc::ast::{AstNode, Program, ProgramNode};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Test,
    Doc,
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Test => "test",
            BlockKind::Doc => "doc",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Line span of one block. Lines are 0-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockRange {
    pub kind: BlockKind,
    pub start_line: usize,
    pub end_line: usize,
    /// Qualified name of the owning definition, `None` at program level
    pub owner: Option<String>,
}

impl BlockRange {
    pub fn contains_line(&self, line: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }

    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// Ranges of every test and doc block, in source order
pub fn block_ranges(program: &Program) -> Vec<BlockRange> {
    owned_blocks(program)
        .into_iter()
        .filter_map(|(owner, node)| {
            let kind = match node {
                ProgramNode::TestBlock(_) => BlockKind::Test,
                ProgramNode::DocBlock(_) => BlockKind::Doc,
                _ => return None,
            };
            let range = node.range();
            Some(BlockRange {
                kind,
                start_line: range.start.line,
                end_line: range.end.line,
                owner,
            })
        })
        .collect()
}

/// The source with every line of the selected block kinds removed
pub fn hide_blocks(source: &str, program: &Program, kinds: &[BlockKind]) -> String {
    let hidden: Vec<BlockRange> = block_ranges(program)
        .into_iter()
        .filter(|range| kinds.contains(&range.kind))
        .collect();
    source
        .split_inclusive('\n')
        .enumerate()
        .filter(|(line, _)| !hidden.iter().any(|range| range.contains_line(*line)))
        .map(|(_, text)| text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdoc::parse;

    const SOURCE: &str = "\
class Stack:
    def push(self, x):
        self.items.append(x)
    test:
        s = Stack()
        s.push(1) == None: \"push\"
    doc:
        Adds an item.

def top():
    return 1
";

    #[test]
    fn test_ranges_and_owners() {
        let program = parse(SOURCE).expect("source should parse");
        let ranges = block_ranges(&program);
        assert_eq!(
            ranges,
            vec![
                BlockRange {
                    kind: BlockKind::Test,
                    start_line: 3,
                    end_line: 5,
                    owner: Some("Stack.push".to_string()),
                },
                BlockRange {
                    kind: BlockKind::Doc,
                    start_line: 6,
                    end_line: 7,
                    owner: Some("Stack.push".to_string()),
                },
            ]
        );
        assert_eq!(ranges[0].line_count(), 3);
    }

    #[test]
    fn test_hide_only_selected_kinds() {
        let program = parse(SOURCE).expect("source should parse");
        let without_docs = hide_blocks(SOURCE, &program, &[BlockKind::Doc]);
        assert!(!without_docs.contains("Adds an item."));
        assert!(without_docs.contains("s.push(1)"));
        assert!(without_docs.contains("def top():"));

        let plain = hide_blocks(SOURCE, &program, &[BlockKind::Test, BlockKind::Doc]);
        assert_eq!(
            plain,
            "class Stack:\n    def push(self, x):\n        self.items.append(x)\n\ndef top():\n    return 1\n"
        );
    }
}
