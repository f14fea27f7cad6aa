//! Main module for testdoc library functionality

pub mod ast;
pub mod consumers;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod testing;

pub use ast::{ParseError, Program};
pub use parsing::{parse, parse_with_options, ParseOptions};
