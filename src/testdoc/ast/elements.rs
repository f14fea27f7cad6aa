//! Element types for the syntax tree

pub mod definition;
pub mod doc_block;
pub mod expression;
pub mod parameter;
pub mod program;
pub mod program_node;
pub mod statement;
pub mod test_block;

pub use definition::{ClassDef, FunctionDef};
pub use doc_block::{DocBlock, DocLine};
pub use expression::{BinaryOperator, Expression, Literal};
pub use parameter::Parameter;
pub use program::Program;
pub use program_node::ProgramNode;
pub use statement::{Statement, StatementKind, COMPOUND_KEYWORDS, SIMPLE_KEYWORDS};
pub use test_block::{Assertion, TestBlock, TestCase};
