//! Expression element
//!
//!  Expressions are recognized structurally, never evaluated. They show up as assertion
//!  operands, statement bodies, parameter defaults, decorators and base classes.
//!
//! Syntax:
//!     <operand> (<binary-operator> <expression>)?
//!
//!     operand, tried in this order:
//!         <identifier> "(" <arguments> ")"                  function call
//!         <receiver> "." <identifier> "(" <arguments> ")"   method call
//!         <receiver> "." <identifier>                       attribute
//!         <number> | <string> | <boolean>                   literal
//!         <identifier>                                      identifier
//!         "(" <expression> ")"                              parenthesized
//!
//!  There is no operator precedence. A binary operator binds the whole remainder of the
//!  expression as its right operand, so `a + b * c` is `a + (b * c)` and `a * b + c` is
//!  `a * (b + c)`. Accepted programs depend on this grouping, so it is kept as is.

use serde::Serialize;
use std::fmt;

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    /// The number exactly as written, sign included (`-3`, `2.5`)
    Number(String),
    /// The text between the quotes
    String(String),
    Boolean(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(text) => f.write_str(text),
            Literal::String(text) => write!(f, "\"{}\"", text),
            Literal::Boolean(true) => f.write_str("True"),
            Literal::Boolean(false) => f.write_str("False"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "//")]
    FloorDivide,
    #[serde(rename = "%")]
    Modulo,
    #[serde(rename = "**")]
    Power,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "as")]
    As,
}

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Subtract,
            "*" => BinaryOperator::Multiply,
            "/" => BinaryOperator::Divide,
            "//" => BinaryOperator::FloorDivide,
            "%" => BinaryOperator::Modulo,
            "**" => BinaryOperator::Power,
            "==" => BinaryOperator::Equal,
            "!=" => BinaryOperator::NotEqual,
            "<" => BinaryOperator::Less,
            "<=" => BinaryOperator::LessEqual,
            ">" => BinaryOperator::Greater,
            ">=" => BinaryOperator::GreaterEqual,
            "and" => BinaryOperator::And,
            "or" => BinaryOperator::Or,
            "in" => BinaryOperator::In,
            "is" => BinaryOperator::Is,
            "as" => BinaryOperator::As,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::FloorDivide => "//",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Power => "**",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
            BinaryOperator::In => "in",
            BinaryOperator::Is => "is",
            BinaryOperator::As => "as",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A structurally recognized expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    FunctionCall {
        name: String,
        arguments: Vec<Expression>,
    },
    MethodCall {
        receiver: Box<Expression>,
        method: String,
        arguments: Vec<Expression>,
    },
    Attribute {
        object: Box<Expression>,
        attribute: String,
    },
    Literal(Literal),
    Identifier(String),
    BinaryOp {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    Parenthesized(Box<Expression>),
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    pub fn number(text: impl Into<String>) -> Self {
        Expression::Literal(Literal::Number(text.into()))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(text.into()))
    }

    pub fn call(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            arguments,
        }
    }

    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        Expression::BinaryOp {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Short variant name, used by snapshots and assertion messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::FunctionCall { .. } => "FunctionCall",
            Expression::MethodCall { .. } => "MethodCall",
            Expression::Attribute { .. } => "Attribute",
            Expression::Literal(_) => "Literal",
            Expression::Identifier(_) => "Identifier",
            Expression::BinaryOp { .. } => "BinaryOp",
            Expression::Parenthesized(_) => "Parenthesized",
        }
    }
}

fn write_arguments(f: &mut fmt::Formatter<'_>, arguments: &[Expression]) -> fmt::Result {
    f.write_str("(")?;
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", argument)?;
    }
    f.write_str(")")
}

/// Canonical source form: single spaces around operators, `", "` between arguments
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::FunctionCall { name, arguments } => {
                f.write_str(name)?;
                write_arguments(f, arguments)
            }
            Expression::MethodCall {
                receiver,
                method,
                arguments,
            } => {
                write!(f, "{}.{}", receiver, method)?;
                write_arguments(f, arguments)
            }
            Expression::Attribute { object, attribute } => write!(f, "{}.{}", object, attribute),
            Expression::Literal(literal) => write!(f, "{}", literal),
            Expression::Identifier(name) => f.write_str(name),
            Expression::BinaryOp {
                left,
                operator,
                right,
            } => write!(f, "{} {} {}", left, operator, right),
            Expression::Parenthesized(inner) => write!(f, "({})", inner),
        }
    }
}
