//! Physical line splitting
//!
//! Splits source into physical lines and separates each line's leading indentation from its
//! content. Classification here is purely textual: whether a line is blank or starts a `doc:`
//! body is decided later, once the line's tokens are known.

/// One physical line of source, without its line terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 0-based line index
    pub index: usize,
    /// Byte offset of the first character of the line
    pub start: usize,
    /// The full line text, minus `\n` and a trailing `\r`
    pub text: &'a str,
}

impl<'a> SourceLine<'a> {
    /// Leading run of spaces and tabs
    pub fn indent(&self) -> &'a str {
        let width = self
            .text
            .bytes()
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();
        &self.text[..width]
    }

    /// Text after the indentation
    pub fn content(&self) -> &'a str {
        &self.text[self.indent().len()..]
    }

    /// Whitespace only (comments are not blank at this level)
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Byte offset just past the line's text
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// True when this line is indented strictly deeper than `indent`, sharing it as a prefix
    pub fn is_deeper_than(&self, indent: &str) -> bool {
        let own = self.indent();
        own.len() > indent.len() && own.starts_with(indent)
    }
}

/// Split source into physical lines. A trailing newline does not produce an extra line.
pub fn split_lines(source: &str) -> Vec<SourceLine<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (index, raw) in source.split_inclusive('\n').enumerate() {
        let text = raw.strip_suffix('\n').unwrap_or(raw);
        let text = text.strip_suffix('\r').unwrap_or(text);
        lines.push(SourceLine { index, start, text });
        start += raw.len();
    }
    lines
}
