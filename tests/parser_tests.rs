//! End-to-end parser tests over whole source files

use rstest::rstest;
use testdoc::testdoc::ast::{BinaryOperator, Expression, ParseErrorKind};
use testdoc::testdoc::parse;
use testdoc::testdoc::testing::assert_program;

const ADD_SOURCE: &str = "\
def add(a, b):
    return a + b
test:
    add(2, 3) == 5: \"basic\",
    add(0, 0) == 0: \"zero\"
doc:
    Adds two numbers.
";

#[test]
fn test_documented_function() {
    let program = parse(ADD_SOURCE).expect("source should parse");
    assert_program(&program).item_count(1).item(0, |item| {
        item.assert_function_def()
            .name("add")
            .signature("add(a, b)")
            .child_count(3)
            .test_block_count(1)
            .doc_block_count(1)
            .lines(0, 6)
            .child(0, |statement| {
                statement.assert_statement().text("return a + b");
            })
            .child(1, |block| {
                block
                    .assert_test_block()
                    .case_count(2)
                    .case(0, |case| {
                        case.setup_count(0)
                            .left("add(2, 3)")
                            .left_kind("FunctionCall")
                            .right("5")
                            .right_kind("Literal")
                            .message("basic");
                    })
                    .case(1, |case| {
                        case.left("add(0, 0)").right("0").message("zero");
                    });
            })
            .child(2, |block| {
                block
                    .assert_doc_block()
                    .line_count(1)
                    .line(0, "Adds two numbers.");
            });
    });
}

#[test]
fn test_reparse_is_identical() {
    let first = parse(ADD_SOURCE).expect("source should parse");
    let second = parse(ADD_SOURCE).expect("source should parse");
    assert_eq!(first, second);
}

#[rstest]
#[case::both_commas("    a == 1: \"one\",\n    b == 2: \"two\",\n")]
#[case::first_comma("    a == 1: \"one\",\n    b == 2: \"two\"\n")]
#[case::no_commas("    a == 1: \"one\"\n    b == 2: \"two\"\n")]
#[case::second_comma("    a == 1: \"one\"\n    b == 2: \"two\",\n")]
fn test_trailing_comma_never_changes_case_count(#[case] body: &str) {
    let source = format!("test:\n{}", body);
    let program = parse(&source).expect("source should parse");
    assert_program(&program).item_count(1).item(0, |item| {
        item.assert_test_block().case_count(2);
    });
}

#[test]
fn test_chains_group_to_the_right() {
    let program = parse("test:\n    a + b + c == a + (b + c): \"grouping\"\n")
        .expect("source should parse");
    let block = program.children[0]
        .as_test_block()
        .expect("a test block");
    let expected = Expression::binary(
        Expression::identifier("a"),
        BinaryOperator::Add,
        Expression::binary(
            Expression::identifier("b"),
            BinaryOperator::Add,
            Expression::identifier("c"),
        ),
    );
    assert_eq!(block.cases[0].assertion.left, expected);
}

#[test]
fn test_mixed_operators_have_no_precedence() {
    let program =
        parse("test:\n    2 * 3 + 4 == 14: \"right to left\"\n").expect("source should parse");
    let block = program.children[0]
        .as_test_block()
        .expect("a test block");
    let expected = Expression::binary(
        Expression::number("2"),
        BinaryOperator::Multiply,
        Expression::binary(
            Expression::number("3"),
            BinaryOperator::Add,
            Expression::number("4"),
        ),
    );
    assert_eq!(block.cases[0].assertion.left, expected);
}

#[rstest]
#[case("obj.method(x)", "MethodCall")]
#[case("obj.attr", "Attribute")]
#[case("make(1).size", "Attribute")]
#[case("make(1).size()", "MethodCall")]
#[case("(a)", "Parenthesized")]
#[case("-3.5", "Literal")]
#[case("2.", "Literal")]
#[case("\"text\"", "Literal")]
#[case("True", "Literal")]
#[case("name", "Identifier")]
fn test_operand_kinds(#[case] operand: &str, #[case] kind: &str) {
    let source = format!("test:\n    {} == x: \"kind\"\n", operand);
    let program = parse(&source).expect("source should parse");
    assert_program(&program).item(0, |item| {
        item.assert_test_block().case(0, |case| {
            case.left(operand).left_kind(kind);
        });
    });
}

#[test]
fn test_setup_statements_belong_to_the_next_assertion() {
    let source = "\
class Stack:
    def push(self, x):
        self.items.append(x)
    test:
        s = Stack()
        s.push(1)
        s.size() == 1: \"push grows the stack\",
        s.push(2)
        s.size() == 2: \"twice\"
";
    let program = parse(source).expect("source should parse");
    assert_program(&program).item(0, |item| {
        item.assert_class_def().child_count(1).child(0, |method| {
            method
                .assert_method_def()
                .test_block_count(1)
                .child(1, |block| {
                    block
                        .assert_test_block()
                        .case_count(2)
                        .case(0, |case| {
                            case.setup_count(2)
                                .setup(0, "s = Stack()")
                                .setup(1, "s.push(1)")
                                .left_kind("MethodCall");
                        })
                        .case(1, |case| {
                            case.setup_count(1).setup(0, "s.push(2)").message("twice");
                        });
                });
        });
    });
}

#[test]
fn test_class_level_blocks_and_decorators() {
    let source = "\
@dataclass
class Point(Base):
    @staticmethod
    def origin() -> Point:
        return Point(0, 0)
test:
    Point.origin() == Point(0, 0): \"origin\"
doc:
    A point in the plane.

    Immutable.
";
    let program = parse(source).expect("source should parse");
    assert_program(&program).item_count(1).item(0, |item| {
        item.assert_class_def()
            .name("Point")
            .base_count(1)
            .child_count(3)
            .child(0, |method| {
                method
                    .assert_method_def()
                    .decorator_count(1)
                    .signature("origin() -> Point");
            })
            .child(2, |doc| {
                doc.assert_doc_block()
                    .text("A point in the plane.\n\nImmutable.");
            });
    });
}

#[test]
fn test_compound_statements_own_their_bodies() {
    let source = "\
def sign(x):
    if x > 0:
        return 1
    else:
        return -1
test:
    sign(5) == 1: \"positive\"
";
    let program = parse(source).expect("source should parse");
    assert_program(&program).item(0, |item| {
        item.assert_function_def()
            .child_count(3)
            .child(0, |statement| {
                statement
                    .assert_statement()
                    .is_compound()
                    .text("if x > 0:")
                    .child_count(1);
            })
            .child(1, |statement| {
                statement.assert_statement().text("else:");
            });
    });
}

#[test]
fn test_return_of_number_with_trailing_point() {
    let program = parse("def half():\n    return 1.\n").expect("source should parse");
    assert_program(&program).item(0, |item| {
        item.assert_function_def().child(0, |statement| {
            statement.assert_statement().text("return 1.");
        });
    });
}

#[test]
fn test_doc_text_is_not_lexed() {
    let source = "\
def f():
    pass
doc:
    Unbalanced ( brackets and \"quotes are fine
      def not_a_function():
    test: not a block either
";
    let program = parse(source).expect("source should parse");
    assert_program(&program).item(0, |item| {
        item.assert_function_def().child(1, |doc| {
            doc.assert_doc_block()
                .line_count(3)
                .line(0, "Unbalanced ( brackets and \"quotes are fine")
                .line(1, "  def not_a_function():")
                .line(2, "test: not a block either");
        });
    });
}

#[test]
fn test_comments_and_blank_lines_do_not_move_indentation() {
    let source = "\
def f():
    x = 1

# a comment at column zero
        # a deeply indented comment
    return x
test:
    f() == 1: \"one\"  # trailing comment
";
    let program = parse(source).expect("source should parse");
    assert_program(&program).item(0, |item| {
        item.assert_function_def().child_count(3);
    });
}

#[test]
fn test_implicit_line_joining_in_brackets() {
    let source = "\
test:
    add(
        1,
            2) == 3: \"joined\"
";
    let program = parse(source).expect("source should parse");
    assert_program(&program).item(0, |item| {
        item.assert_test_block().case(0, |case| {
            case.left("add(1, 2)").message("joined");
        });
    });
}

#[rstest]
#[case::dedent_to_unknown_width("def f():\n        a = 1\n    b = 2\n", ParseErrorKind::Tokenization, 2)]
#[case::unterminated_string("test:\n    a == 1: \"open\n", ParseErrorKind::Tokenization, 1)]
#[case::empty_test_block("def f():\n    pass\ntest:\nx = 1\n", ParseErrorKind::Structural, 3)]
#[case::test_block_at_eof("test:\n", ParseErrorKind::Structural, 1)]
#[case::empty_doc_block("doc:\ndef f():\n    pass\n", ParseErrorKind::Structural, 1)]
#[case::missing_assertion("test:\n    x = 1\n", ParseErrorKind::Structural, 1)]
#[case::missing_message("test:\n    a == 1\n", ParseErrorKind::Structural, 1)]
#[case::empty_function_body("def f():\nx = 1\n", ParseErrorKind::Structural, 1)]
#[case::nested_test_block("test:\n    test:\n        a == 1: \"m\"\n", ParseErrorKind::Structural, 1)]
#[case::block_in_if("def f():\n    if x:\n        test:\n            a == 1: \"m\"\n", ParseErrorKind::Structural, 2)]
#[case::trailing_comma_in_call("test:\n    f(1,) == 1: \"m\"\n", ParseErrorKind::Expression, 1)]
#[case::collection_literal("test:\n    [1, 2] == x: \"m\"\n", ParseErrorKind::Expression, 1)]
fn test_rejected_sources(
    #[case] source: &str,
    #[case] kind: ParseErrorKind,
    #[case] line: usize,
) {
    let error = parse(source).expect_err("source should be rejected");
    assert_eq!(error.kind(), kind, "unexpected error: {}", error);
    assert_eq!(error.line(), line, "unexpected error: {}", error);
}

#[rstest]
#[case::assignment("x = a{}\n", " + a")]
#[case::return_value("def f():\n    return a{}\n", " * a")]
#[case::assertion("test:\n    a{} == 1: \"long\"\n", ".b")]
fn test_long_chains_are_rejected_under_default_limits(
    #[case] template: &str,
    #[case] step: &str,
) {
    let source = template.replace("{}", &step.repeat(100_000));
    let error = parse(&source).expect_err("chain should exceed the nesting limit");
    assert_eq!(error.kind(), ParseErrorKind::LimitExceeded, "{}", error);
}

#[test]
fn test_parses_run_independently_on_threads() {
    let expected = parse(ADD_SOURCE).expect("source should parse");
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| parse(ADD_SOURCE)))
        .collect();
    for handle in handles {
        let program = handle
            .join()
            .expect("thread should not panic")
            .expect("source should parse");
        assert_eq!(program, expected);
    }
}
