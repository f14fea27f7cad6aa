//! Parameter element
//!
//! Syntax:
//!     <identifier> (":" <expression>)? ("=" <expression>)?
//!
//!  Names are expected to be unique within one parameter list, but that is a host-language
//!  concern and is not checked here.

use super::super::range::Range;
use super::expression::Expression;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub annotation: Option<Expression>,
    pub default: Option<Expression>,
    pub location: Range,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            default: None,
            location: Range::default(),
        }
    }

    pub fn with_default(mut self, default: Expression) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_annotation(mut self, annotation: Expression) -> Self {
        self.annotation = Some(annotation);
        self
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(annotation) = &self.annotation {
            write!(f, ": {}", annotation)?;
        }
        if let Some(default) = &self.default {
            if self.annotation.is_some() {
                write!(f, " = {}", default)?;
            } else {
                write!(f, "={}", default)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_follows_host_conventions() {
        let plain = Parameter::new("a");
        let default = Parameter::new("b").with_default(Expression::number("1"));
        let annotated = Parameter::new("c")
            .with_annotation(Expression::identifier("int"))
            .with_default(Expression::number("0"));

        assert_eq!(plain.to_string(), "a");
        assert_eq!(default.to_string(), "b=1");
        assert_eq!(annotated.to_string(), "c: int = 0");
    }
}
