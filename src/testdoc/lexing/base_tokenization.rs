//! Base tokenization
//!
//!     Runs the logos lexer over the content of one physical line and turns its output into
//!     positioned tokens. Indentation and line structure are not handled here; see
//!     [`semantic_indentation`](super::transformations::semantic_indentation).
//!
//!     One adjustment is made on top of the raw logos output: a `+` or `-` directly followed
//!     by a number is folded into the number when it cannot be a binary operator, i.e. when
//!     the token before it does not end an operand. `x - 1` stays three tokens, `f(-1)` yields
//!     the number `-1`.

use super::common::TokenizationError;
use super::line_classification::SourceLine;
use super::tokens::{Token, TokenKind};
use crate::testdoc::ast::range::SourceLocation;
use logos::Logos;

/// Tokenize the content of one physical line.
///
/// `preceding` is the last significant token of the logical line so far, used when a
/// logical line continues across physical lines inside brackets.
pub fn tokenize_line(
    line: &SourceLine<'_>,
    preceding: Option<&TokenKind>,
    locator: &SourceLocation,
) -> Result<Vec<Token>, TokenizationError> {
    let content = line.content();
    let offset = line.end() - content.len();

    let mut raw: Vec<(TokenKind, std::ops::Range<usize>)> = Vec::new();
    let mut lexer = TokenKind::lexer(content);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let absolute = offset + span.start..offset + span.end;
        match result {
            Ok(TokenKind::UnterminatedStr) => {
                return Err(TokenizationError::UnterminatedString {
                    position: locator.byte_to_position(absolute.start),
                })
            }
            Ok(kind) => raw.push((kind, absolute)),
            Err(()) => {
                let found = content[span.start..].chars().next().unwrap_or('\0');
                return Err(TokenizationError::UnexpectedCharacter {
                    position: locator.byte_to_position(absolute.start),
                    found,
                });
            }
        }
    }

    let mut tokens: Vec<Token> = Vec::with_capacity(raw.len());
    let mut iter = raw.into_iter().peekable();
    while let Some((kind, span)) = iter.next() {
        let previous = tokens.last().map(|t| &t.kind).or(preceding);
        let is_sign = matches!(&kind, TokenKind::Operator(op) if op == "-" || op == "+");
        let can_sign = !previous.is_some_and(TokenKind::ends_operand);

        let adjacent_number = matches!(
            iter.peek(),
            Some((TokenKind::Number(_), next)) if next.start == span.end
        );

        if is_sign && can_sign && adjacent_number {
            if let Some((_, next_span)) = iter.next() {
                let merged = span.start..next_span.end;
                let text = &line.text[merged.start - line.start..merged.end - line.start];
                tokens.push(Token::new(
                    TokenKind::Number(text.to_string()),
                    text,
                    locator.byte_range_to_range(&merged),
                ));
                continue;
            }
        }

        let text = &line.text[span.start - line.start..span.end - line.start];
        tokens.push(Token::new(kind, text, locator.byte_range_to_range(&span)));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::super::line_classification::split_lines;
    use super::*;

    fn line_kinds(source: &str) -> Vec<TokenKind> {
        let locator = SourceLocation::new(source);
        let lines = split_lines(source);
        tokenize_line(&lines[0], None, &locator)
            .expect("line should tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_positions_are_absolute() {
        let source = "x = 1\n    add(2, 3)";
        let locator = SourceLocation::new(source);
        let lines = split_lines(source);
        let tokens = tokenize_line(&lines[1], None, &locator).expect("line should tokenize");
        assert_eq!(tokens[0].text, "add");
        assert_eq!(tokens[0].range.span, 10..13);
        assert_eq!(tokens[0].line(), 1);
        assert_eq!(tokens[0].column(), 4);
    }

    #[test]
    fn test_sign_folds_into_number_after_operator() {
        assert_eq!(
            line_kinds("f(-1) == -2.5"),
            vec![
                TokenKind::Identifier("f".to_string()),
                TokenKind::LParen,
                TokenKind::Number("-1".to_string()),
                TokenKind::RParen,
                TokenKind::Operator("==".to_string()),
                TokenKind::Number("-2.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_sign_depends_on_previous_token() {
        assert_eq!(
            line_kinds("x -1"),
            vec![
                TokenKind::Identifier("x".to_string()),
                TokenKind::Operator("-".to_string()),
                TokenKind::Number("1".to_string()),
            ]
        );
        assert_eq!(
            line_kinds("return -1"),
            vec![
                TokenKind::Identifier("return".to_string()),
                TokenKind::Number("-1".to_string()),
            ]
        );
        // Not adjacent to the digits
        assert_eq!(
            line_kinds("- 1"),
            vec![
                TokenKind::Operator("-".to_string()),
                TokenKind::Number("1".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_reported_at_quote() {
        let source = "x == \"open";
        let locator = SourceLocation::new(source);
        let lines = split_lines(source);
        let error = tokenize_line(&lines[0], None, &locator).unwrap_err();
        assert_eq!(
            error,
            TokenizationError::UnterminatedString {
                position: crate::testdoc::ast::range::Position::new(0, 5)
            }
        );
    }

    #[test]
    fn test_unexpected_character() {
        let source = "x = $";
        let locator = SourceLocation::new(source);
        let lines = split_lines(source);
        let error = tokenize_line(&lines[0], None, &locator).unwrap_err();
        assert!(matches!(
            error,
            TokenizationError::UnexpectedCharacter { found: '$', .. }
        ));
    }
}
