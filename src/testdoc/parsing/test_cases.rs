//! Test-case parser
//!
//!     Parses the body of a `test:` block. Every line is either an assertion or a setup
//!     statement; a test case is any number of setup statements followed by one assertion.
//!
//!         test-case := statement* assertion
//!         assertion := expression "==" expression ":" string ","?
//!
//!     A line is an assertion if and only if, outside any brackets, it contains `==` and ends
//!     with `:` followed by a string (optionally followed by one comma). The left operand is
//!     everything before the first top-level `==`; the right operand runs up to the `:`
//!     before the message. The trailing comma is optional on every case, the last one
//!     included, and only recorded.
//!
//!     Setup statements left over at the end of the block have no assertion to belong to,
//!     which is an error.

use super::cursor::TokenCursor;
use super::expressions::{parse_expression, span_of};
use super::statements::{find_top_level, is_balanced, parse_statement_line};
use crate::testdoc::ast::range::Range;
use crate::testdoc::ast::{Assertion, ParseError, ParseResult, Statement, TestCase};
use crate::testdoc::lexing::{Token, TokenKind};
use tracing::trace;

/// The pieces of an assertion line, before the operands are parsed
struct AssertionParts<'t> {
    left: &'t [Token],
    equals: &'t Token,
    right: &'t [Token],
    colon: &'t Token,
    message: &'t Token,
    trailing_comma: bool,
}

fn split_assertion(line: &[Token]) -> Option<AssertionParts<'_>> {
    let (body, trailing_comma) = match line.split_last() {
        Some((last, rest)) if last.kind == TokenKind::Comma => (rest, true),
        _ => (line, false),
    };
    let (message, rest) = body.split_last()?;
    let (colon, operands) = rest.split_last()?;
    if !matches!(message.kind, TokenKind::Str(_))
        || colon.kind != TokenKind::Colon
        || !is_balanced(operands)
    {
        return None;
    }
    let equals = find_top_level(operands, |kind| {
        matches!(kind, TokenKind::Operator(op) if op == "==")
    })?;
    Some(AssertionParts {
        left: &operands[..equals],
        equals: &operands[equals],
        right: &operands[equals + 1..],
        colon,
        message,
        trailing_comma,
    })
}

/// True if the tokens of a logical line form an assertion
pub fn is_assertion_line(line: &[Token]) -> bool {
    split_assertion(line).is_some()
}

fn parse_assertion(
    parts: AssertionParts<'_>,
    line: &[Token],
    max_depth: Option<usize>,
) -> ParseResult<Assertion> {
    let left = parse_expression(parts.left, parts.equals.range.start, max_depth)?;
    let right = parse_expression(parts.right, parts.colon.range.start, max_depth)?;
    let message = match &parts.message.kind {
        TokenKind::Str(text) => text.clone(),
        _ => String::new(),
    };

    let mut assertion = Assertion::new(left, right, message);
    assertion.left_location = span_of(parts.left).unwrap_or_default();
    assertion.right_location = span_of(parts.right).unwrap_or_default();
    assertion.message_location = parts.message.range.clone();
    assertion.location = span_of(line).unwrap_or_default();
    Ok(assertion)
}

fn test_case(setup: Vec<Statement>, assertion: Assertion, trailing_comma: bool) -> TestCase {
    let location = setup
        .first()
        .map(|first| first.location.join(&assertion.location))
        .unwrap_or_else(|| assertion.location.clone());
    let mut case = TestCase::new(setup, assertion);
    case.trailing_comma = trailing_comma;
    case.location = location;
    case
}

/// Parse test cases up to, not including, the Dedent that closes the block
pub(crate) fn parse_test_body(
    cursor: &mut TokenCursor,
    source: &str,
    max_depth: Option<usize>,
) -> ParseResult<Vec<TestCase>> {
    let mut cases = Vec::new();
    let mut setup: Vec<Statement> = Vec::new();

    loop {
        match cursor.peek_kind() {
            TokenKind::Dedent | TokenKind::Eof => break,
            TokenKind::Indent => {
                return Err(ParseError::structural(
                    cursor.position(),
                    "unexpected indent in test block",
                ))
            }
            TokenKind::Def | TokenKind::Class | TokenKind::At => {
                return Err(cursor.unexpected("expected a test case"));
            }
            TokenKind::Test | TokenKind::Doc if cursor.nth(1).kind == TokenKind::Colon => {
                return Err(ParseError::structural(
                    cursor.position(),
                    "test and doc blocks cannot be nested",
                ));
            }
            _ => {}
        }

        let line = cursor.take_line()?;
        if let Some(parts) = split_assertion(&line) {
            let trailing_comma = parts.trailing_comma;
            let assertion = parse_assertion(parts, &line, max_depth)?;
            trace!(message = %assertion.message, setup = setup.len(), "test case");
            cases.push(test_case(std::mem::take(&mut setup), assertion, trailing_comma));
            continue;
        }

        let statement = parse_statement_line(&line, source, max_depth)?;
        if statement.is_compound() {
            return Err(ParseError::structural(
                statement.location.start,
                "compound statements are not allowed in test blocks",
            ));
        }
        setup.push(statement);
    }

    if let Some(orphan) = setup.first() {
        return Err(ParseError::structural(
            orphan.location.start,
            "test case has no assertion",
        ));
    }
    Ok(cases)
}

/// Range of a whole test case list, for block locations
pub fn cases_span(cases: &[TestCase]) -> Option<Range> {
    Range::bounding_box(cases.iter().map(|case| &case.location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdoc::ast::{Expression, ParseErrorKind};
    use crate::testdoc::lexing::tokenize;
    use rstest::rstest;

    fn line(source: &str) -> Vec<Token> {
        tokenize(source)
            .expect("source should tokenize")
            .into_iter()
            .take_while(|t| t.kind != TokenKind::Newline)
            .collect()
    }

    fn body(source: &str) -> ParseResult<Vec<TestCase>> {
        let mut cursor = TokenCursor::new(tokenize(source).expect("source should tokenize"));
        parse_test_body(&mut cursor, source, None)
    }

    #[rstest]
    #[case("add(2, 3) == 5: \"basic\"", true)]
    #[case("add(2, 3) == 5: \"basic\",", true)]
    #[case("x == y", false)]
    #[case("f(a == b): \"m\"", false)]
    #[case("x = 1", false)]
    #[case("check(\"a\", \"b\")", false)]
    #[case("x == 1: y", false)]
    fn test_assertion_detection(#[case] source: &str, #[case] expected: bool) {
        assert_eq!(is_assertion_line(&line(source)), expected);
    }

    #[test]
    fn test_operands_and_message() {
        let cases = body("x = 2\nx == 2: \"two\",\nf(x) == (x == 2): \"nested\"\n").expect("body");
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].setup.len(), 1);
        assert!(cases[0].trailing_comma);
        assert_eq!(cases[0].assertion.left, Expression::identifier("x"));
        assert_eq!(cases[0].assertion.message, "two");
        assert!(!cases[1].trailing_comma);
        assert_eq!(cases[1].assertion.right.kind_name(), "Parenthesized");
    }

    #[test]
    fn test_operand_locations() {
        let cases = body("add(2, 3) == 5: \"basic\"\n").expect("body");
        let assertion = &cases[0].assertion;
        assert_eq!(assertion.left_location.span, 0..9);
        assert_eq!(assertion.right_location.span, 13..14);
        assert_eq!(assertion.message_location.span, 16..23);
    }

    #[test]
    fn test_trailing_setup_is_rejected() {
        let error = body("x == 1: \"one\"\ny = 2\n").unwrap_err();
        assert_eq!(error.kind(), ParseErrorKind::Structural);
        assert_eq!(error.line(), 1);
    }

    #[test]
    fn test_missing_operand_is_an_expression_error() {
        let error = body("== 1: \"one\"\n").unwrap_err();
        assert_eq!(error.kind(), ParseErrorKind::Expression);
    }
}
