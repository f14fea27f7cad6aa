//! # testdoc
//!
//! A parser for inline `test:` and `doc:` blocks embedded after function, method and class
//! definitions inside otherwise ordinary, indentation-structured source files.
//!
//! File Layout
//!
//!     src/testdoc
//!       ├── lexing      Tokenizer: logos core tokens + semantic indentation
//!       ├── parsing     Recursive descent: blocks, statements, test cases, expressions, docs
//!       ├── ast         The Program tree, locations and errors
//!       ├── consumers   Views for highlighting, block visibility and test/doc extraction
//!       ├── formats     Treeviz, JSON and YAML renderings
//!       └── testing     Fluent AST assertions and an independent line scanner
//!
//! For comprehensive testing guidelines, see the [testing module](testdoc::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod testdoc;
