//! Token stream transformations applied after base tokenization

pub mod semantic_indentation;

pub use semantic_indentation::{IndentChange, IndentationStack};
