//! Testing utilities
//!
//!     Two tools for tests of the parser and its consumers:
//!
//!     1. [assert_program](fn@ast_assertions::assert_program), a fluent API for checking the
//!        shape and content of a whole tree at once. Prefer it over node counts: a test that
//!        only counts nodes passes for the wrong tree.
//!
//!     2. [scan_block_ranges](fn@line_scan::scan_block_ranges), a line-based scanner that
//!        finds test and doc blocks with regular expressions alone. It shares no code with the
//!        tokenizer, so agreement between the two is a meaningful cross-check of block
//!        ranges.
//!
//!     Example:
//!
//!         assert_program(&program)
//!             .item_count(1)
//!             .item(0, |item| {
//!                 item.assert_function_def()
//!                     .name("add")
//!                     .test_block_count(1)
//!                     .child(1, |child| {
//!                         child.assert_test_block()
//!                             .case_count(1)
//!                             .case(0, |case| {
//!                                 case.left("add(2, 3)").right("5").message("basic");
//!                             });
//!                     });
//!             });

pub mod ast_assertions;
pub mod line_scan;

pub use ast_assertions::assert_program;
pub use line_scan::{scan_block_ranges, ScannedBlock};
