//! Host statements
//!
//!     Everything that is not a definition or a DSL block is a statement. A statement is
//!     parsed from the tokens of one logical line:
//!
//!         compound   := ("if" | "elif" | "else" | "for" | ...) expression? ":"
//!         return     := "return" expression?
//!         keyword    := ("pass" | "break" | "raise" | ...) expression?
//!         import     := ("import" | "from") ...          (kept verbatim)
//!         assignment := expression ("=" | "+=" | ...) expression
//!         expression := expression
//!
//!     Host keywords are not reserved by the lexer; they are recognized here by the leading
//!     identifier. The body of a compound statement is parsed by the block recognizer.

use super::expressions::{parse_expression, span_of};
use crate::testdoc::ast::range::Position;
use crate::testdoc::ast::{
    Expression, ParseError, ParseResult, Statement, StatementKind, COMPOUND_KEYWORDS,
    SIMPLE_KEYWORDS,
};
use crate::testdoc::lexing::{Token, TokenKind};

/// Index of the first token at bracket depth zero matching `predicate`
pub fn find_top_level(tokens: &[Token], predicate: impl Fn(&TokenKind) -> bool) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        if depth == 0 && predicate(&token.kind) {
            return Some(index);
        }
        if token.kind.opens_bracket() {
            depth += 1;
        } else if token.kind.closes_bracket() {
            depth = depth.saturating_sub(1);
        }
    }
    None
}

/// True if every bracket opened in `tokens` is closed again
pub fn is_balanced(tokens: &[Token]) -> bool {
    let mut depth = 0isize;
    for token in tokens {
        if token.kind.opens_bracket() {
            depth += 1;
        } else if token.kind.closes_bracket() {
            depth -= 1;
        }
    }
    depth == 0
}

fn leading_keyword(line: &[Token]) -> Option<&str> {
    match &line.first()?.kind {
        TokenKind::Identifier(name) => Some(name.as_str()),
        _ => None,
    }
}

fn optional_expression(
    tokens: &[Token],
    end: Position,
    max_depth: Option<usize>,
) -> ParseResult<Option<Expression>> {
    if tokens.is_empty() {
        Ok(None)
    } else {
        parse_expression(tokens, end, max_depth).map(Some)
    }
}

/// Parse one logical line as a statement. A compound header comes back with no children.
pub fn parse_statement_line(
    line: &[Token],
    source: &str,
    max_depth: Option<usize>,
) -> ParseResult<Statement> {
    let Some(location) = span_of(line) else {
        return Err(ParseError::structural(
            Position::default(),
            "expected a statement",
        ));
    };
    let end = location.end;

    let kind = match leading_keyword(line) {
        Some(keyword) if COMPOUND_KEYWORDS.contains(&keyword) => {
            let Some((colon, header)) = line[1..].split_last() else {
                return Err(ParseError::structural(
                    end,
                    format!("expected ':' after '{}'", keyword),
                ));
            };
            if colon.kind != TokenKind::Colon {
                return Err(ParseError::structural(
                    colon.range.end,
                    format!("expected ':' at the end of the '{}' header", keyword),
                ));
            }
            StatementKind::Compound {
                keyword: keyword.to_string(),
                header: optional_expression(header, colon.range.start, max_depth)?,
            }
        }
        Some("return") => {
            StatementKind::Return(optional_expression(&line[1..], end, max_depth)?)
        }
        Some(keyword) if SIMPLE_KEYWORDS.contains(&keyword) => StatementKind::Keyword {
            keyword: keyword.to_string(),
            argument: optional_expression(&line[1..], end, max_depth)?,
        },
        Some("import") | Some("from") => {
            StatementKind::Import(source[location.span.clone()].to_string())
        }
        _ => match find_top_level(line, |kind| matches!(kind, TokenKind::Assign(_))) {
            Some(index) => {
                let operator = &line[index];
                if index == 0 {
                    return Err(ParseError::expression(
                        operator.range.start,
                        "expected an assignment target",
                    ));
                }
                StatementKind::Assignment {
                    target: parse_expression(&line[..index], operator.range.start, max_depth)?,
                    operator: operator.text.clone(),
                    value: parse_expression(&line[index + 1..], end, max_depth)?,
                }
            }
            None => StatementKind::Expression(parse_expression(line, end, max_depth)?),
        },
    };

    Ok(Statement::new(kind).at(location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdoc::ast::ParseErrorKind;
    use crate::testdoc::lexing::tokenize;
    use rstest::rstest;

    fn first_line(source: &str) -> Vec<Token> {
        tokenize(source)
            .expect("source should tokenize")
            .into_iter()
            .take_while(|t| t.kind != TokenKind::Newline)
            .collect()
    }

    fn statement(source: &str) -> Statement {
        parse_statement_line(&first_line(source), source, None).expect("statement should parse")
    }

    #[rstest]
    #[case("x = add(1, 2)", "x = add(1, 2)")]
    #[case("total += x", "total += x")]
    #[case("return a + b", "return a + b")]
    #[case("return", "return")]
    #[case("pass", "pass")]
    #[case("raise ValueError(\"bad\")", "raise ValueError(\"bad\")")]
    #[case("import os.path", "import os.path")]
    #[case("from a import  b", "from a import  b")]
    #[case("else:", "else:")]
    #[case("for x in items:", "for x in items:")]
    #[case("print(x)", "print(x)")]
    fn test_statement_rendering(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(statement(source).to_string(), expected);
    }

    #[test]
    fn test_compound_header_has_expression() {
        let statement = statement("while count < 3:");
        assert!(statement.is_compound());
        match statement.kind {
            StatementKind::Compound { keyword, header } => {
                assert_eq!(keyword, "while");
                assert_eq!(header.map(|h| h.kind_name()), Some("BinaryOp"));
            }
            other => panic!("expected compound statement, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_target_and_value() {
        let statement = statement("self.count = 0");
        match statement.kind {
            StatementKind::Assignment { target, value, .. } => {
                assert_eq!(target.kind_name(), "Attribute");
                assert_eq!(value, Expression::number("0"));
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[rstest]
    #[case("if ready", ParseErrorKind::Structural)]
    #[case("= 3", ParseErrorKind::Expression)]
    #[case("x = ", ParseErrorKind::Expression)]
    #[case("a, b = f()", ParseErrorKind::Expression)]
    fn test_rejected_statements(#[case] source: &str, #[case] kind: ParseErrorKind) {
        let error = parse_statement_line(&first_line(source), source, None).unwrap_err();
        assert_eq!(error.kind(), kind, "{}", error);
    }

    #[test]
    fn test_find_top_level_skips_brackets() {
        let line = first_line("f(a == b) == c");
        let index = find_top_level(&line, |k| matches!(k, TokenKind::Operator(op) if op == "=="));
        assert_eq!(index, Some(6));
        assert!(is_balanced(&line));
    }
}
