//! Parser limits
//!
//! Parsing is bounded only by memory and stack. Callers handling untrusted input guard it
//! with these limits; the defaults match `defaults/testdoc.default.toml` in the config crate.

use testdoc_config::ParserConfig;

pub const DEFAULT_MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject sources larger than this many bytes
    pub max_input_bytes: Option<usize>,
    /// Reject blocks, parenthesized groups or operator and attribute chains nested deeper
    /// than this
    pub max_nesting_depth: Option<usize>,
}

impl ParseOptions {
    /// No limits at all
    pub fn unlimited() -> Self {
        Self {
            max_input_bytes: None,
            max_nesting_depth: None,
        }
    }

    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }

    pub fn with_max_nesting_depth(mut self, limit: usize) -> Self {
        self.max_nesting_depth = Some(limit);
        self
    }

    pub(crate) fn depth_exceeded(&self, depth: usize) -> bool {
        self.max_nesting_depth.is_some_and(|limit| depth > limit)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
            max_nesting_depth: Some(DEFAULT_MAX_NESTING_DEPTH),
        }
    }
}

impl From<&ParserConfig> for ParseOptions {
    fn from(config: &ParserConfig) -> Self {
        Self {
            max_input_bytes: config.input_limit(),
            max_nesting_depth: config.depth_limit(),
        }
    }
}
