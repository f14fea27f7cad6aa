//! Token definitions
//!
//! This module defines all the tokens that can be produced by the tokenizer. The core tokens
//! are defined using the logos derive macro; the structural ones (`Newline`, `Indent`,
//! `Dedent`, `TextLine`, `Eof`) are synthetic and produced by the semantic indentation stage.
//!
//! Token Layers
//!
//!     Core Tokens:
//!         Word and punctuation level tokens produced by logos over the code portion of a
//!         line: identifiers, numbers, strings, booleans, keywords, operators, punctuation.
//!         Whitespace between tokens and `#` comments are skipped here.
//!
//!     Structural Tokens:
//!         Newline, Indent, Dedent, Eof. Indent and Dedent work like open/close braces in
//!         c-style languages.
//!
//!     Verbatim Tokens:
//!         TextLine. The body of a `doc:` block is never lexed; each of its lines becomes one
//!         TextLine carrying the raw text.
use crate::testdoc::ast::range::Range;
use crate::testdoc::ast::{COMPOUND_KEYWORDS, SIMPLE_KEYWORDS};
use logos::Logos;
use serde::Serialize;
use std::fmt;

/// All possible token kinds
#[derive(Logos, Debug, PartialEq, Clone, Serialize)]
#[logos(skip r"[ \t\f\r]+")]
#[logos(skip r"#[^\n]*")]
pub enum TokenKind {
    // Keywords. `test` and `doc` are contextual: the parser accepts them as identifiers
    // inside expressions.
    #[token("test")]
    Test,
    #[token("doc")]
    Doc,
    #[token("def")]
    Def,
    #[token("class")]
    Class,

    #[token("True", |_| true)]
    #[token("true", |_| true)]
    #[token("False", |_| false)]
    #[token("false", |_| false)]
    Boolean(bool),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // The sign is attached later, by base tokenization, when it cannot be a binary operator
    #[regex(r"[0-9]+(\.[0-9]*)?", |lex| lex.slice().to_string())]
    Number(String),

    // Double quoted, no escapes, no newlines. Holds the text between the quotes.
    #[regex(r#""[^"\n]*""#, |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    })]
    Str(String),

    // A quote with no closing quote before the end of the line
    #[regex(r#""[^"\n]*"#)]
    UnterminatedStr,

    #[regex(r"==|!=|<=|>=|//|\*\*|[+\-*/%<>]", |lex| lex.slice().to_string())]
    #[token("and", |lex| lex.slice().to_string())]
    #[token("or", |lex| lex.slice().to_string())]
    #[token("in", |lex| lex.slice().to_string())]
    #[token("is", |lex| lex.slice().to_string())]
    #[token("as", |lex| lex.slice().to_string())]
    Operator(String),

    #[regex(r"=|\+=|-=|\*=|/=", |lex| lex.slice().to_string())]
    Assign(String),

    #[token("->")]
    Arrow,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("@")]
    At,

    // Synthetic tokens
    Newline,
    Indent,
    Dedent,
    TextLine(String),
    Eof,
}

impl TokenKind {
    /// Human readable description used in error messages
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Test => "keyword 'test'".to_string(),
            TokenKind::Doc => "keyword 'doc'".to_string(),
            TokenKind::Def => "keyword 'def'".to_string(),
            TokenKind::Class => "keyword 'class'".to_string(),
            TokenKind::Boolean(value) => format!("boolean '{}'", value),
            TokenKind::Identifier(name) => format!("identifier '{}'", name),
            TokenKind::Number(text) => format!("number '{}'", text),
            TokenKind::Str(text) => format!("string \"{}\"", text),
            TokenKind::UnterminatedStr => "unterminated string".to_string(),
            TokenKind::Operator(op) => format!("operator '{}'", op),
            TokenKind::Assign(op) => format!("'{}'", op),
            TokenKind::Arrow => "'->'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::At => "'@'".to_string(),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Indent => "indent".to_string(),
            TokenKind::Dedent => "dedent".to_string(),
            TokenKind::TextLine(_) => "doc text".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }

    /// Tokens after which a `+`/`-` is a binary operator rather than a sign.
    /// Host statement keywords (`return -1`, `else -1`) do not end an operand.
    pub fn ends_operand(&self) -> bool {
        if let TokenKind::Identifier(name) = self {
            return name != "return"
                && !COMPOUND_KEYWORDS.contains(&name.as_str())
                && !SIMPLE_KEYWORDS.contains(&name.as_str());
        }
        matches!(
            self,
            TokenKind::Number(_)
                | TokenKind::Str(_)
                | TokenKind::Boolean(_)
                | TokenKind::Test
                | TokenKind::Doc
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
        )
    }

    pub fn opens_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace
        )
    }

    pub fn closes_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
        )
    }

    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent | TokenKind::Eof
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A positioned token. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The literal source text (the indentation for Indent, empty for Dedent and Eof)
    pub text: String,
    pub range: Range,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, range: Range) -> Self {
        Self {
            kind,
            text: text.into(),
            range,
        }
    }

    pub fn line(&self) -> usize {
        self.range.start.line
    }

    pub fn column(&self) -> usize {
        self.range.start.column
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.range.start)
    }
}
