//! Definition elements: classes, functions and methods
//!
//!  Definitions are what `test:` and `doc:` blocks attach to. A block written right after a
//!  definition, at the definition's own indentation, is owned by that definition.
//!
//! Syntax:
//!     ("@" <expression> <newline>)*
//!     "class" <identifier> ("(" <expression> ("," <expression>)* ")")? ":" <newline>
//!     <indent> <items> <dedent>
//!
//!     ("@" <expression> <newline>)*
//!     "def" <identifier> "(" <parameters> ")" ("->" <expression>)? ":" <newline>
//!     <indent> <items> <dedent>
//!
//!  A `def` written directly in a class body is a method; anywhere else it is a function.
//!
//! Examples:
//!     def add(a, b):
//!         return a + b
//!     test:
//!         add(2, 3) == 5: "basic"
//!
//!     class Stack:
//!         def push(self, item):
//!             self.items.append(item)
//!         doc:
//!             Pushes an item on top.

use super::super::range::Range;
use super::super::traits::{visit_children, AstNode, Definition, Visitor};
use super::expression::Expression;
use super::parameter::Parameter;
use super::program_node::ProgramNode;
use serde::Serialize;

/// A function or method definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
    pub name: String,
    pub is_method: bool,
    pub decorators: Vec<Expression>,
    pub parameters: Vec<Parameter>,
    pub return_annotation: Option<Expression>,
    pub children: Vec<ProgramNode>,
    /// From the first decorator (or `def`) through the last owned line
    pub location: Range,
    /// The `def ...:` line only
    pub header_location: Range,
}

impl FunctionDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_method: false,
            decorators: Vec::new(),
            parameters: Vec::new(),
            return_annotation: None,
            children: Vec::new(),
            location: Range::default(),
            header_location: Range::default(),
        }
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self {
            is_method: true,
            ..Self::new(name)
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_children(mut self, children: Vec<ProgramNode>) -> Self {
        self.children = children;
        self
    }

    /// Preferred builder
    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    /// Rendered signature, e.g. `add(a, b=1)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
        let mut signature = format!("{}({})", self.name, params.join(", "));
        if let Some(annotation) = &self.return_annotation {
            signature.push_str(&format!(" -> {}", annotation));
        }
        signature
    }
}

impl AstNode for FunctionDef {
    fn node_type(&self) -> &'static str {
        if self.is_method {
            "MethodDef"
        } else {
            "FunctionDef"
        }
    }

    fn display_label(&self) -> String {
        self.signature()
    }

    fn range(&self) -> &Range {
        &self.location
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        if self.is_method {
            visitor.visit_method_def(self);
            visit_children(visitor, &self.children);
            visitor.leave_method_def(self);
        } else {
            visitor.visit_function_def(self);
            visit_children(visitor, &self.children);
            visitor.leave_function_def(self);
        }
    }
}

impl Definition for FunctionDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[ProgramNode] {
        &self.children
    }
}

/// A class definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDef {
    pub name: String,
    pub decorators: Vec<Expression>,
    pub bases: Vec<Expression>,
    pub children: Vec<ProgramNode>,
    pub location: Range,
    pub header_location: Range,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decorators: Vec::new(),
            bases: Vec::new(),
            children: Vec::new(),
            location: Range::default(),
            header_location: Range::default(),
        }
    }

    pub fn with_children(mut self, children: Vec<ProgramNode>) -> Self {
        self.children = children;
        self
    }

    pub fn at(mut self, location: Range) -> Self {
        self.location = location;
        self
    }

    /// Methods defined directly in the class body
    pub fn methods(&self) -> impl Iterator<Item = &FunctionDef> {
        self.children.iter().filter_map(|child| match child {
            ProgramNode::MethodDef(method) => Some(method),
            _ => None,
        })
    }
}

impl AstNode for ClassDef {
    fn node_type(&self) -> &'static str {
        "ClassDef"
    }

    fn display_label(&self) -> String {
        if self.bases.is_empty() {
            self.name.clone()
        } else {
            let bases: Vec<String> = self.bases.iter().map(|b| b.to_string()).collect();
            format!("{}({})", self.name, bases.join(", "))
        }
    }

    fn range(&self) -> &Range {
        &self.location
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_class_def(self);
        visit_children(visitor, &self.children);
        visitor.leave_class_def(self);
    }
}

impl Definition for ClassDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[ProgramNode] {
        &self.children
    }
}
