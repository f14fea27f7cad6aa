//! Lexer
//!
//!     This module turns source text into a stream of positioned tokens for the block
//!     recognizer. Lexing runs in two stages.
//!
//! The Lexing Pipeline
//!
//!         1. Core tokenization using the logos lexer. See [base_tokenization].
//!            Each physical line's content (after its indentation) is lexed on its own into
//!            identifiers, keywords, literals, operators and punctuation. Comments and
//!            inline whitespace are dropped here.
//!
//!         2. Semantic indentation. See
//!            [semantic_indentation](transformations::semantic_indentation).
//!            The indentation of each logical line is compared against a stack of open
//!            levels and becomes Indent and Dedent events, which map nicely to brace tokens
//!            in more standard syntaxes.
//!
//!     The [Tokenizer] drives both stages lazily, one physical line at a time.
//!
//! Indentation Handling
//!
//!     Indentation is only significant at the start of a logical line. Inside open brackets
//!     physical lines join into one logical line, and blank or comment-only lines are skipped
//!     entirely, so neither affects the indentation stack.
//!
//!     Doc bodies are the one place where lines are not lexed at all: after a `doc:` header,
//!     every line that is blank or deeper than the header is emitted as a raw TextLine.
//!     Keeping indentation as a separate stage is what makes this easy: the verbatim lines
//!     are wrapped in an Indent/Dedent pair without ever being pushed on the stack.

pub mod base_tokenization;
pub mod common;
pub mod line_classification;
pub mod tokenizer;
pub mod tokens;
pub mod transformations;

pub use common::TokenizationError;
pub use tokenizer::Tokenizer;
pub use tokens::{Token, TokenKind};

use tracing::debug;

/// Tokenize a whole source text eagerly.
///
/// Stops at the first error; the tokens before it are discarded.
pub fn tokenize(source: &str) -> Result<Vec<Token>, TokenizationError> {
    let tokens: Vec<Token> = Tokenizer::new(source).collect::<Result<_, _>>()?;
    debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}
