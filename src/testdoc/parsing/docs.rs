//! Doc-content collector
//!
//! The tokenizer has already stripped the base indentation of a doc body and handed every
//! line over as a TextLine. Collecting is a matter of taking them in order; no grammar
//! applies to the text.

use super::cursor::TokenCursor;
use crate::testdoc::ast::{DocLine, ParseResult};
use crate::testdoc::lexing::TokenKind;

/// Collect text lines up to, not including, the Dedent that closes the block
pub(crate) fn parse_doc_body(cursor: &mut TokenCursor) -> ParseResult<Vec<DocLine>> {
    let mut lines = Vec::new();
    while let TokenKind::TextLine(text) = cursor.peek_kind() {
        let text = text.clone();
        let token = cursor.advance();
        cursor.expect(&TokenKind::Newline, "after doc text")?;
        lines.push(DocLine::new(text).at(token.range));
    }
    if lines.is_empty() {
        return Err(cursor.unexpected("expected doc text"));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdoc::lexing::tokenize;

    #[test]
    fn test_collects_lines_verbatim() {
        let source = "doc:\n    First line.\n      indented (x == 1): \"kept\"\n";
        let mut cursor = TokenCursor::new(tokenize(source).expect("source should tokenize"));
        // doc : Newline Indent
        for _ in 0..4 {
            cursor.advance();
        }
        let lines = parse_doc_body(&mut cursor).expect("doc body");
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["First line.", "  indented (x == 1): \"kept\""]);
        assert_eq!(lines[0].location.start.column, 4);
        assert_eq!(cursor.peek_kind(), &TokenKind::Dedent);
    }
}
