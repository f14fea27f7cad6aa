//! JSON and YAML renderings
//!
//! Both are the serde form of the tree, ranges included.

use super::registry::{FormatError, Formatter};
use crate::testdoc::ast::Program;
use testdoc_config::{OutputConfig, OutputFormat};

pub fn to_json_str(program: &Program) -> Result<String, FormatError> {
    serde_json::to_string_pretty(program).map_err(|err| FormatError::Serialization {
        format: OutputFormat::Json,
        message: err.to_string(),
    })
}

pub fn to_yaml_str(program: &Program) -> Result<String, FormatError> {
    serde_yaml::to_string(program).map_err(|err| FormatError::Serialization {
        format: OutputFormat::Yaml,
        message: err.to_string(),
    })
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn render(&self, program: &Program, _output: &OutputConfig) -> Result<String, FormatError> {
        to_json_str(program).map(|json| json + "\n")
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Yaml
    }

    fn render(&self, program: &Program, _output: &OutputConfig) -> Result<String, FormatError> {
        to_yaml_str(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdoc::parse;

    const SOURCE: &str = "def one():\n    return 1\ntest:\n    one() == 1: \"one\"\n";

    #[test]
    fn test_json_carries_assertion_operands() {
        let program = parse(SOURCE).expect("source should parse");
        let json = to_json_str(&program).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let function = &value["children"][0];
        assert_eq!(function["type"], "FunctionDef");
        let block = &function["children"][1];
        assert_eq!(block["type"], "TestBlock");
        let assertion = &block["cases"][0]["assertion"];
        assert_eq!(assertion["message"], "one");
        assert_eq!(assertion["right"]["Literal"]["Number"], "1");
    }

    #[test]
    fn test_yaml_mentions_every_node() {
        let program = parse(SOURCE).expect("source should parse");
        let yaml = to_yaml_str(&program).expect("yaml");
        assert!(yaml.contains("FunctionDef"));
        assert!(yaml.contains("TestBlock"));
        assert!(yaml.contains("message: one"));
    }
}
