//! The syntax tree for one parsed file
//!
//!     A parse produces one [`Program`] owning a strict tree of [`ProgramNode`]s. Nodes are
//!     built bottom-up during a single pass and are never mutated afterwards; a re-parse
//!     discards the previous tree wholesale.
//!
//!     Every node carries a [`Range`] with both the byte span and the line:column positions,
//!     which is what the consumers (highlighting, block visibility, extraction) work from.
//!     They never re-parse raw text.

pub mod elements;
pub mod error;
pub mod range;
pub mod snapshot;
pub mod traits;

pub use elements::{
    Assertion, BinaryOperator, ClassDef, DocBlock, DocLine, Expression, FunctionDef, Literal,
    Parameter, Program, ProgramNode, Statement, StatementKind, TestBlock, TestCase,
    COMPOUND_KEYWORDS, SIMPLE_KEYWORDS,
};
pub use error::{format_source_context, ParseError, ParseErrorKind, ParseResult};
pub use range::{Position, Range, SourceLocation};
pub use snapshot::{snapshot_from_program, AstSnapshot};
pub use traits::{AstNode, Definition, Visitor};
