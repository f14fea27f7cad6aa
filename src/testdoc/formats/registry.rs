//! Format registry
//!
//! Holds one [`Formatter`] per [`OutputFormat`]. Rendering takes the whole [`OutputConfig`],
//! so the configured format and its options (line numbers for treeviz) travel together from
//! the config file, the environment or the command line down to the renderer.

use crate::testdoc::ast::Program;
use std::collections::HashMap;
use std::fmt;
use testdoc_config::{OutputConfig, OutputFormat};

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter registered for the requested format
    Unregistered(OutputFormat),
    Serialization {
        format: OutputFormat,
        message: String,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Unregistered(format) => write!(f, "no formatter for '{}'", format),
            FormatError::Serialization { format, message } => {
                write!(f, "{} serialization failed: {}", format, message)
            }
        }
    }
}

impl std::error::Error for FormatError {}

pub trait Formatter: Send + Sync {
    fn format(&self) -> OutputFormat;

    fn render(&self, program: &Program, output: &OutputConfig) -> Result<String, FormatError>;
}

pub struct FormatRegistry {
    formatters: HashMap<OutputFormat, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// A registry with nothing registered
    pub fn empty() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, returning the one it replaces
    pub fn register<F>(&mut self, formatter: F) -> Option<Box<dyn Formatter>>
    where
        F: Formatter + 'static,
    {
        self.formatters.insert(formatter.format(), Box::new(formatter))
    }

    /// Registered formats in declaration order
    pub fn formats(&self) -> Vec<OutputFormat> {
        OutputFormat::ALL
            .into_iter()
            .filter(|format| self.formatters.contains_key(format))
            .collect()
    }

    pub fn render(&self, program: &Program, output: &OutputConfig) -> Result<String, FormatError> {
        let formatter = self
            .formatters
            .get(&output.format)
            .ok_or(FormatError::Unregistered(output.format))?;
        formatter.render(program, output)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingFormatter;

    impl Formatter for CountingFormatter {
        fn format(&self) -> OutputFormat {
            OutputFormat::Json
        }

        fn render(&self, program: &Program, _output: &OutputConfig) -> Result<String, FormatError> {
            Ok(program.children.len().to_string())
        }
    }

    fn output(format: OutputFormat) -> OutputConfig {
        OutputConfig {
            format,
            show_line_numbers: false,
        }
    }

    #[test]
    fn test_register_replaces_by_format() {
        let mut registry = FormatRegistry::default();
        assert!(registry.register(CountingFormatter).is_some());
        assert_eq!(
            registry.render(&Program::new(vec![]), &output(OutputFormat::Json)),
            Ok("0".to_string())
        );
    }

    #[test]
    fn test_unregistered_format() {
        let mut registry = FormatRegistry::empty();
        assert!(registry.register(CountingFormatter).is_none());
        assert_eq!(
            registry.render(&Program::new(vec![]), &output(OutputFormat::Yaml)),
            Err(FormatError::Unregistered(OutputFormat::Yaml))
        );
    }

    #[test]
    fn test_defaults_cover_every_format() {
        assert_eq!(FormatRegistry::default().formats(), OutputFormat::ALL.to_vec());
    }
}
