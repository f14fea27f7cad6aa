//! Parser
//!
//!     Turns source text into a [Program]. The pipeline is a single synchronous pass:
//!
//!         source -> tokenizer -> block recognizer -> program
//!                                  |-- test-case parser  (per test block)
//!                                  |-- doc collector     (per doc block)
//!                                  `-- expression parser (per operand / statement)
//!
//!     Every call owns its own tokenizer state and produces a fresh tree, so files can be
//!     parsed concurrently from independent threads. A re-parse never reuses nodes from a
//!     previous tree.
//!
//!     The first error ends the parse. Callers that want partial results catch the error
//!     per file and treat that file as plain text.

pub mod blocks;
pub(crate) mod cursor;
pub mod docs;
pub mod expressions;
pub mod options;
pub mod statements;
pub mod test_cases;

pub use expressions::parse_expression;
pub use options::ParseOptions;

use crate::testdoc::ast::range::Position;
use crate::testdoc::ast::{ParseError, ParseResult, Program};
use crate::testdoc::lexing::tokenize;
use blocks::BlockParser;
use tracing::{debug, instrument};

/// Parse a source file with the default limits
pub fn parse(source: &str) -> ParseResult<Program> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parse a source file
#[instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn parse_with_options(source: &str, options: &ParseOptions) -> ParseResult<Program> {
    if let Some(limit) = options.max_input_bytes {
        if source.len() > limit {
            return Err(ParseError::limit(
                Position::default(),
                format!(
                    "input is {} bytes, larger than the {} byte limit",
                    source.len(),
                    limit
                ),
            ));
        }
    }

    let tokens = tokenize(source)?;
    let program = BlockParser::new(source, tokens, *options).parse_program()?;
    debug!(items = program.children.len(), "parsed program");
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdoc::ast::ParseErrorKind;

    #[test]
    fn test_input_limit() {
        let options = ParseOptions::unlimited().with_max_input_bytes(4);
        let error = parse_with_options("x = 12345\n", &options).unwrap_err();
        assert_eq!(error.kind(), ParseErrorKind::LimitExceeded);
    }

    #[test]
    fn test_tokenization_errors_pass_through() {
        let error = parse("def f():\n        a\n    b\n").unwrap_err();
        assert_eq!(error.kind(), ParseErrorKind::Tokenization);
        assert_eq!(error.line(), 2);
    }

    #[test]
    fn test_empty_source_is_an_empty_program() {
        let program = parse("").expect("empty source should parse");
        assert!(program.children.is_empty());
    }
}
