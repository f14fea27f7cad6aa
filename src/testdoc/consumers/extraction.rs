//! Test and documentation extraction
//!
//! Flattens the tree into records a test runner or doc renderer can consume without knowing
//! the node types. Expressions are carried in their canonical rendering; setup statements
//! are carried as written.

use super::owned_blocks;
use crate::testdoc::ast::{DocBlock, Program, ProgramNode, TestBlock, TestCase};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedCase {
    pub setup: Vec<String>,
    pub left: String,
    pub right: String,
    pub message: String,
    /// 1-based line of the assertion
    pub line: usize,
}

impl ExtractedCase {
    fn from_case(case: &TestCase, source: &str) -> Self {
        let assertion = &case.assertion;
        Self {
            setup: case
                .setup
                .iter()
                .map(|statement| {
                    source
                        .get(statement.location.span.clone())
                        .map(str::to_string)
                        .unwrap_or_else(|| statement.to_string())
                })
                .collect(),
            left: assertion.left.to_string(),
            right: assertion.right.to_string(),
            message: assertion.message.clone(),
            line: assertion.location.start.line + 1,
        }
    }
}

/// All test cases of one owner, merged across its test blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedTests {
    pub owner: Option<String>,
    pub cases: Vec<ExtractedCase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedDoc {
    pub owner: Option<String>,
    /// Doc lines joined with newlines, blank lines preserved
    pub text: String,
    /// 1-based line of the `doc:` header
    pub line: usize,
}

/// Test cases grouped by owner, in order of each owner's first test block
pub fn extract_tests(program: &Program, source: &str) -> Vec<ExtractedTests> {
    let mut groups: Vec<ExtractedTests> = Vec::new();
    for (owner, node) in owned_blocks(program) {
        let Some(block) = node.as_test_block() else {
            continue;
        };
        let cases = cases_of(block, source);
        match groups.iter_mut().find(|group| group.owner == owner) {
            Some(group) => group.cases.extend(cases),
            None => groups.push(ExtractedTests { owner, cases }),
        }
    }
    groups
}

fn cases_of(block: &TestBlock, source: &str) -> Vec<ExtractedCase> {
    block
        .cases
        .iter()
        .map(|case| ExtractedCase::from_case(case, source))
        .collect()
}

/// Every doc block with its owner, in source order
pub fn extract_docs(program: &Program) -> Vec<ExtractedDoc> {
    owned_blocks(program)
        .into_iter()
        .filter_map(|(owner, node)| match node {
            ProgramNode::DocBlock(block) => Some(doc_of(owner, block)),
            _ => None,
        })
        .collect()
}

fn doc_of(owner: Option<String>, block: &DocBlock) -> ExtractedDoc {
    ExtractedDoc {
        owner,
        text: block.text(),
        line: block.header_location.start.line + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdoc::parse;

    const SOURCE: &str = "\
def add(a, b):
    return a + b
test:
    add(2, 3) == 5: \"basic\",
    total = add(1, 1)
    total == 2: \"via setup\"
doc:
    Adds two numbers.

    Works on ints.

class Counter:
    def inc(self):
        return 1
    test:
        Counter().inc() == 1: \"increments\"
test:
    add(0, 0) == 0: \"zero\"
";

    #[test]
    fn test_cases_grouped_by_owner() {
        let program = parse(SOURCE).expect("source should parse");
        let groups = extract_tests(&program, SOURCE);
        assert_eq!(groups.len(), 3);

        assert_eq!(groups[0].owner.as_deref(), Some("add"));
        assert_eq!(groups[0].cases.len(), 2);
        assert_eq!(
            groups[0].cases[0],
            ExtractedCase {
                setup: vec![],
                left: "add(2, 3)".to_string(),
                right: "5".to_string(),
                message: "basic".to_string(),
                line: 4,
            }
        );
        assert_eq!(groups[0].cases[1].setup, vec!["total = add(1, 1)"]);

        assert_eq!(groups[1].owner.as_deref(), Some("Counter.inc"));
        assert_eq!(groups[1].cases[0].left, "Counter().inc()");
        assert_eq!(groups[1].cases[0].message, "increments");

        assert_eq!(groups[2].owner.as_deref(), Some("Counter"));
        assert_eq!(groups[2].cases[0].left, "add(0, 0)");
    }

    #[test]
    fn test_docs_keep_interior_blank_lines() {
        let program = parse(SOURCE).expect("source should parse");
        let docs = extract_docs(&program);
        assert_eq!(
            docs,
            vec![ExtractedDoc {
                owner: Some("add".to_string()),
                text: "Adds two numbers.\n\nWorks on ints.".to_string(),
                line: 7,
            }]
        );
    }
}
