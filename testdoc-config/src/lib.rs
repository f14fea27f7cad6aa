//! Layered configuration for the testdoc toolchain.
//!
//! Settings resolve from lowest to highest precedence:
//!
//! ```text
//! embedded defaults   defaults/testdoc.default.toml, compiled in
//! files               in the order they were added to the Loader
//! environment         TESTDOC_<SECTION>__<KEY>, e.g. TESTDOC_PARSER__MAX_NESTING_DEPTH=0
//! overrides           dotted keys set by the caller, e.g. from command-line flags
//! ```
//!
//! The merged result deserializes into [`TestdocConfig`].

use config::{Config, Environment, File, FileFormat, Value};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/testdoc.default.toml");

/// Top-level configuration consumed by testdoc applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TestdocConfig {
    pub parser: ParserConfig,
    pub output: OutputConfig,
}

/// Guards applied before and during a parse. A value of 0 disables the guard.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub max_input_bytes: usize,
    pub max_nesting_depth: usize,
}

impl ParserConfig {
    pub fn input_limit(&self) -> Option<usize> {
        (self.max_input_bytes > 0).then_some(self.max_input_bytes)
    }

    pub fn depth_limit(&self) -> Option<usize> {
        (self.max_nesting_depth > 0).then_some(self.max_nesting_depth)
    }
}

/// Controls how parsed trees are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_line_numbers: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Treeviz,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Treeviz,
        OutputFormat::Json,
        OutputFormat::Yaml,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| format!("unknown output format '{}'", s))
    }
}

#[derive(Debug, Clone)]
enum Layer {
    File { path: PathBuf, required: bool },
    Environment { prefix: String },
}

/// Collects configuration layers; nothing is read until [`Loader::build`].
#[derive(Debug, Clone, Default)]
pub struct Loader {
    layers: Vec<Layer>,
    overrides: Vec<(String, Value)>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer a TOML file. A missing file fails the build.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.layers.push(Layer::File {
            path: path.as_ref().to_path_buf(),
            required: true,
        });
        self
    }

    /// Layer a TOML file if it exists.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.layers.push(Layer::File {
            path: path.as_ref().to_path_buf(),
            required: false,
        });
        self
    }

    /// Layer `<PREFIX>_<SECTION>__<KEY>` environment variables.
    pub fn with_environment(mut self, prefix: &str) -> Self {
        self.layers.push(Layer::Environment {
            prefix: prefix.to_string(),
        });
        self
    }

    /// Set one dotted key (`output.format`). Overrides win over every layer.
    pub fn set_override(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.overrides.push((key.to_string(), value.into()));
        self
    }

    pub fn build(self) -> Result<TestdocConfig, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        for layer in self.layers {
            builder = match layer {
                Layer::File { path, required } => builder.add_source(
                    File::from(path.as_path())
                        .format(FileFormat::Toml)
                        .required(required),
                ),
                Layer::Environment { prefix } => builder.add_source(
                    Environment::with_prefix(&prefix)
                        .prefix_separator("_")
                        .separator("__")
                        .try_parsing(true),
                ),
            };
        }
        for (key, value) in self.overrides {
            builder = builder.set_override(key, value)?;
        }
        builder.build()?.try_deserialize()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<TestdocConfig, ConfigError> {
    Loader::new().build()
}
