//! Treeviz formatter
//!
//! One line per node, nesting drawn with box connectors, which makes trees quick to scan and
//! diff. Labels are truncated to 30 characters.
//!
//! Format:
//!     <line number>? <prefix><connector> <icon> <label>
//!
//! Example:
//!     ⧉ 1 item
//!     └─ ƒ add(a, b)
//!       ├─ ◦ return a + b
//!       └─ ✓ 1 case
//!         └─ • basic
//!           └─ ≡ add(2, 3) == 5
//!
//! Icons
//!     Program: ⧉
//!     ClassDef: ◇
//!     FunctionDef: ƒ
//!     MethodDef: ⨍
//!     TestBlock: ✓
//!     TestCase: •
//!     Assertion: ≡
//!     DocBlock: ¶
//!     DocLine: ↵
//!     Statement: ◦

use super::registry::{FormatError, Formatter};
use crate::testdoc::ast::{snapshot_from_program, AstSnapshot, Program};
use testdoc_config::{OutputConfig, OutputFormat};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Program" => "⧉",
        "ClassDef" => "◇",
        "FunctionDef" => "ƒ",
        "MethodDef" => "⨍",
        "TestBlock" => "✓",
        "TestCase" => "•",
        "Assertion" => "≡",
        "DocBlock" => "¶",
        "DocLine" => "↵",
        "Statement" => "◦",
        _ => "○",
    }
}

fn format_snapshot(
    snapshot: &AstSnapshot,
    prefix: &str,
    is_last: bool,
    show_linum: bool,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    let linum_prefix = if show_linum {
        format!("{:02} ", snapshot.range.start.line + 1)
    } else {
        String::new()
    };

    output.push_str(&format!(
        "{}{}{} {} {}\n",
        linum_prefix,
        prefix,
        connector,
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, 30)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(snapshot, &child_prefix, show_linum, output);
}

fn format_children(snapshot: &AstSnapshot, prefix: &str, show_linum: bool, output: &mut String) {
    let count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, prefix, i + 1 == count, show_linum, output);
    }
}

fn format_program_snapshot(snapshot: &AstSnapshot, show_linum: bool) -> String {
    let mut output = format!(
        "{} {}\n",
        get_icon(&snapshot.node_type),
        truncate(&snapshot.label, 30)
    );
    format_children(snapshot, "", show_linum, &mut output);
    output
}

pub fn to_treeviz_str(program: &Program) -> String {
    format_program_snapshot(&snapshot_from_program(program), false)
}

/// Same as [`to_treeviz_str`], with each node line prefixed by its 1-based source line
pub fn to_treeviz_str_with_line_numbers(program: &Program) -> String {
    format_program_snapshot(&snapshot_from_program(program), true)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Treeviz
    }

    fn render(&self, program: &Program, output: &OutputConfig) -> Result<String, FormatError> {
        Ok(format_program_snapshot(
            &snapshot_from_program(program),
            output.show_line_numbers,
        ))
    }
}
