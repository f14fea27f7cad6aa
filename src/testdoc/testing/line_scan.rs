//! Line-based block scanner
//!
//! Finds test and doc blocks from indentation alone. A block starts at a `test:` or `doc:`
//! header line and runs while the following lines are blank or indented deeper than the
//! header. Inside test blocks comment-only lines are ignored; inside doc blocks they are
//! text like any other line. The block ends at its last non-blank line.
//!
//! Only meaningful for sources that parse.

use crate::testdoc::consumers::visibility::BlockKind;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([ \t]*)(test|doc)[ \t]*:[ \t]*(#.*)?$").expect("header pattern is valid")
});

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*#").expect("comment pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedBlock {
    pub kind: BlockKind,
    /// 0-based, inclusive
    pub start_line: usize,
    pub end_line: usize,
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Every test and doc block header with the line its body ends on
pub fn scan_block_ranges(source: &str) -> Vec<ScannedBlock> {
    let lines: Vec<&str> = source.lines().collect();
    let mut blocks = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let Some(captures) = HEADER.captures(lines[index]) else {
            index += 1;
            continue;
        };
        let header_width = captures.get(1).map_or(0, |m| m.as_str().len());
        let kind = match captures.get(2).map(|m| m.as_str()) {
            Some("test") => BlockKind::Test,
            _ => BlockKind::Doc,
        };

        let start_line = index;
        let mut end_line = index;
        index += 1;
        while let Some(line) = lines.get(index) {
            if line.trim().is_empty() {
                index += 1;
                continue;
            }
            let is_comment = COMMENT.is_match(line);
            if kind == BlockKind::Test && is_comment {
                index += 1;
                continue;
            }
            if indent_width(line) <= header_width {
                break;
            }
            end_line = index;
            index += 1;
        }
        // Resume right after the block so a header in a body is never rescanned.
        index = end_line + 1;
        blocks.push(ScannedBlock {
            kind,
            start_line,
            end_line,
        });
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_skips_comments_in_tests_only() {
        let source = "\
def f():
    pass
test:
    f() == None: \"none\"
# trailing comment
doc:
    Text.
    # shown as text

x = 1
";
        assert_eq!(
            scan_block_ranges(source),
            vec![
                ScannedBlock {
                    kind: BlockKind::Test,
                    start_line: 2,
                    end_line: 3,
                },
                ScannedBlock {
                    kind: BlockKind::Doc,
                    start_line: 5,
                    end_line: 7,
                },
            ]
        );
    }

    #[test]
    fn test_header_with_comment() {
        let blocks = scan_block_ranges("test:  # cases\n    a == b: \"m\"\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].end_line, 1);
    }

    #[test]
    fn test_doc_text_is_not_rescanned() {
        let blocks = scan_block_ranges("doc:\n    test:\n        not a block\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Doc);
        assert_eq!(blocks[0].end_line, 2);
    }
}
