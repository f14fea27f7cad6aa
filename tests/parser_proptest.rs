//! Property-based tests for the parser
//!
//! Sources are generated from small building blocks (functions, classes, test and doc
//! blocks) so that every generated file is valid and the properties can be checked on the
//! resulting trees.

use proptest::prelude::*;
use testdoc::testdoc::ast::Expression;
use testdoc::testdoc::consumers::visibility::block_ranges;
use testdoc::testdoc::parse;
use testdoc::testdoc::testing::scan_block_ranges;

const OPERATORS: &[&str] = &["+", "-", "*", "/", "==", "!=", "<", "and", "or"];

fn operand() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,5}".prop_filter("not a word operator", |name| {
            !matches!(
                name.as_str(),
                "and" | "or" | "in" | "is" | "as" | "def" | "class" | "test" | "doc"
            )
        }),
        (0u32..1000).prop_map(|n| n.to_string()),
        "[a-z]{1,4}".prop_map(|name| format!("{}(1, x)", name)),
        "[a-z]{1,4}".prop_map(|name| format!("obj.{}()", name)),
        Just("\"text\"".to_string()),
    ]
}

fn assertion_line() -> impl Strategy<Value = String> {
    (operand(), operand(), "[a-z ]{1,12}", any::<bool>()).prop_map(
        |(left, right, message, comma)| {
            format!(
                "{} == {}: \"{}\"{}",
                left,
                right,
                message,
                if comma { "," } else { "" }
            )
        },
    )
}

fn setup_line() -> impl Strategy<Value = String> {
    prop_oneof![
        operand().prop_map(|value| format!("value = {}", value)),
        "[a-z]{1,4}".prop_map(|name| format!("obj.{}(2)", name)),
    ]
}

/// A test case: setup lines followed by its assertion
fn test_case() -> impl Strategy<Value = Vec<String>> {
    (prop::collection::vec(setup_line(), 0..3), assertion_line()).prop_map(
        |(mut lines, assertion)| {
            lines.push(assertion);
            lines
        },
    )
}

fn test_block(indent: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(test_case(), 1..4).prop_map(move |cases| {
        let mut block = format!("{}test:\n", indent);
        for line in cases.iter().flatten() {
            block.push_str(&format!("{}    {}\n", indent, line));
        }
        block
    })
}

fn doc_block(indent: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[A-Za-z][A-Za-z ,.()=\"]{0,30}".prop_map(Some),
            Just(None),
        ],
        1..5,
    )
    .prop_filter("needs a text line", |lines| lines.iter().any(Option::is_some))
    .prop_map(move |lines| {
        let mut block = format!("{}doc:\n", indent);
        for line in &lines {
            match line {
                Some(text) => block.push_str(&format!("{}    {}\n", indent, text.trim_end())),
                None => block.push('\n'),
            }
        }
        block
    })
}

/// Optional test block then optional doc block, the way they follow a definition
fn dsl_blocks(indent: &'static str) -> impl Strategy<Value = String> {
    (
        prop::option::of(test_block(indent)),
        prop::option::of(doc_block(indent)),
    )
        .prop_map(|(test, doc)| format!("{}{}", test.unwrap_or_default(), doc.unwrap_or_default()))
}

fn function(index: usize) -> impl Strategy<Value = String> {
    dsl_blocks("").prop_map(move |blocks| {
        format!("def f{}(a, b=1):\n    return a + b\n{}\n", index, blocks)
    })
}

fn class(index: usize) -> impl Strategy<Value = String> {
    (dsl_blocks("    "), dsl_blocks("")).prop_map(move |(method_blocks, class_blocks)| {
        format!(
            "class C{}:\n    def m(self):\n        pass\n{}{}\n",
            index, method_blocks, class_blocks
        )
    })
}

fn program() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), 1..5).prop_flat_map(|kinds| {
        let parts: Vec<BoxedStrategy<String>> = kinds
            .iter()
            .enumerate()
            .map(|(index, is_class)| {
                if *is_class {
                    class(index).boxed()
                } else {
                    function(index).boxed()
                }
            })
            .collect();
        parts.prop_map(|parts| parts.concat())
    })
}

/// True if no binary operator has another binary operator as its left operand
fn groups_right(expression: &Expression) -> bool {
    match expression {
        Expression::BinaryOp { left, right, .. } => {
            !matches!(**left, Expression::BinaryOp { .. }) && groups_right(right)
        }
        _ => true,
    }
}

proptest! {
    #[test]
    fn generated_programs_parse_deterministically(source in program()) {
        let first = parse(&source);
        prop_assert!(first.is_ok(), "failed to parse:\n{}\n{:?}", source, first);
        prop_assert_eq!(first.ok(), parse(&source).ok());
    }

    #[test]
    fn block_ranges_match_line_scan(source in program()) {
        let program = parse(&source).map_err(|err| TestCaseError::fail(err.to_string()))?;
        let from_tree: Vec<(String, usize, usize)> = block_ranges(&program)
            .into_iter()
            .map(|range| (range.kind.to_string(), range.start_line, range.end_line))
            .collect();
        let from_scan: Vec<(String, usize, usize)> = scan_block_ranges(&source)
            .into_iter()
            .map(|block| (block.kind.to_string(), block.start_line, block.end_line))
            .collect();
        prop_assert_eq!(from_tree, from_scan, "source:\n{}", source);
    }

    #[test]
    fn operator_chains_group_to_the_right(
        first in "[a-z]{1,3}",
        rest in prop::collection::vec((0..OPERATORS.len(), "[a-z]{1,3}"), 1..6),
    ) {
        prop_assume!(!matches!(first.as_str(), "and" | "or" | "in" | "is" | "as" | "def"));
        prop_assume!(rest.iter().all(|(_, name)| {
            !matches!(name.as_str(), "and" | "or" | "in" | "is" | "as" | "def")
        }));
        let mut chain = first;
        for (op, name) in &rest {
            chain.push_str(&format!(" {} {}", OPERATORS[*op], name));
        }
        let source = format!("test:\n    ({}) == x: \"chain\"\n", chain);
        let program = parse(&source).map_err(|err| TestCaseError::fail(err.to_string()))?;
        let block = program.children[0].as_test_block().expect("a test block");
        let Expression::Parenthesized(inner) = &block.cases[0].assertion.left else {
            return Err(TestCaseError::fail("left operand is not parenthesized"));
        };
        prop_assert!(groups_right(inner), "{:?}", inner);
        prop_assert_eq!(inner.to_string(), chain);
    }

    #[test]
    fn commas_never_change_case_count(commas in prop::collection::vec(any::<bool>(), 1..6)) {
        let mut source = String::from("test:\n");
        for (index, comma) in commas.iter().enumerate() {
            source.push_str(&format!(
                "    f({}) == {}: \"case {}\"{}\n",
                index,
                index,
                index,
                if *comma { "," } else { "" }
            ));
        }
        let program = parse(&source).map_err(|err| TestCaseError::fail(err.to_string()))?;
        let block = program.children[0].as_test_block().expect("a test block");
        prop_assert_eq!(block.cases.len(), commas.len());
    }

    #[test]
    fn arbitrary_input_never_panics(source in "[a-z0-9 :=()\\[\\],.\"#@+\\-\\n]{0,120}") {
        let _ = parse(&source);
    }
}
