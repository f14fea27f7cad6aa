//! Output formats for parsed programs
//!
//! Every format renders a whole [Program](crate::testdoc::ast::Program):
//! - treeviz: one line per node, for reading trees in a terminal and in snapshot tests
//! - json / yaml: the serde form of the tree, for tooling

pub mod registry;
pub mod serialized;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serialized::{to_json_str, to_yaml_str, JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_line_numbers, TreevizFormatter};
