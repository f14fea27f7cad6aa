//! The tokenizer
//!
//!     Drives the two lexing stages line by line and yields tokens lazily. Each call to
//!     `next` hands out tokens already queued for the current logical line; when the queue
//!     runs dry the next physical line is lexed. Nothing is shared between tokenizers, so
//!     independent parses can run concurrently.
//!
//!     Structure of the output for a logical line:
//!
//!         [Dedent* | Indent] <tokens of the line> Newline
//!
//!     Logical lines span physical lines while a bracket is open; the continuation lines
//!     contribute tokens only. A `doc:` header line is followed by its verbatim body:
//!
//!         Indent (TextLine Newline)+ Dedent
//!
//!     The body never touches the indentation stack. After the last line come one Dedent per
//!     open level and a single Eof.

use super::base_tokenization::tokenize_line;
use super::common::TokenizationError;
use super::line_classification::{split_lines, SourceLine};
use super::tokens::{Token, TokenKind};
use super::transformations::semantic_indentation::{IndentChange, IndentationStack};
use crate::testdoc::ast::range::{Range, SourceLocation};
use std::collections::VecDeque;

/// Lazy, restartable token stream over one source text
pub struct Tokenizer<'a> {
    source: &'a str,
    lines: Vec<SourceLine<'a>>,
    locator: SourceLocation,
    next_line: usize,
    stack: IndentationStack,
    bracket_depth: usize,
    /// Last token of the logical line being assembled, if it is still open
    open_line: Option<TokenKind>,
    pending: VecDeque<Token>,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lines: split_lines(source),
            locator: SourceLocation::new(source),
            next_line: 0,
            stack: IndentationStack::new(),
            bracket_depth: 0,
            open_line: None,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn locator(&self) -> &SourceLocation {
        &self.locator
    }

    /// Rewind to the start of the same text
    pub fn restart(&mut self) {
        self.next_line = 0;
        self.stack = IndentationStack::new();
        self.bracket_depth = 0;
        self.open_line = None;
        self.pending.clear();
        self.finished = false;
    }

    fn advance_line(&mut self) -> Result<(), TokenizationError> {
        let line = self.lines[self.next_line];
        self.next_line += 1;

        let continuing = self.bracket_depth > 0;
        let preceding = if continuing {
            self.open_line.as_ref()
        } else {
            None
        };
        let tokens = tokenize_line(&line, preceding, &self.locator)?;
        let Some(first) = tokens.first() else {
            // Blank or comment-only
            return Ok(());
        };

        if !continuing {
            let start = first.range.start;
            let offset = first.range.span.start;
            match self.stack.transition(line.indent(), start)? {
                IndentChange::Same => {}
                IndentChange::Indent => {
                    let span = line.start..line.start + line.indent().len();
                    let range = self.locator.byte_range_to_range(&span);
                    self.pending
                        .push_back(Token::new(TokenKind::Indent, line.indent(), range));
                }
                IndentChange::Dedent(count) => {
                    for _ in 0..count {
                        self.pending
                            .push_back(Token::new(TokenKind::Dedent, "", Range::at(offset, start)));
                    }
                }
            }
        }

        let opens_doc = !continuing
            && tokens.len() == 2
            && tokens[0].kind == TokenKind::Doc
            && tokens[1].kind == TokenKind::Colon;

        for token in tokens {
            if token.kind.opens_bracket() {
                self.bracket_depth += 1;
            } else if token.kind.closes_bracket() {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
            }
            self.open_line = Some(token.kind.clone());
            self.pending.push_back(token);
        }

        if self.bracket_depth == 0 {
            self.push_newline(line.end());
        }
        if opens_doc {
            self.collect_doc_body(&line);
        }
        Ok(())
    }

    fn push_newline(&mut self, at: usize) {
        let rest = &self.source[at..];
        let width = if rest.starts_with("\r\n") {
            2
        } else if rest.starts_with('\n') {
            1
        } else {
            0
        };
        let span = at..at + width;
        let range = self.locator.byte_range_to_range(&span);
        self.pending
            .push_back(Token::new(TokenKind::Newline, &self.source[span], range));
        self.open_line = None;
    }

    /// Queue the verbatim body of a `doc:` block: every following line that is blank or
    /// deeper than the header, minus leading and trailing blank lines.
    fn collect_doc_body(&mut self, header: &SourceLine<'a>) {
        let header_indent = header.indent();
        let mut first = None;
        let mut end = self.next_line;
        let mut index = self.next_line;
        while let Some(line) = self.lines.get(index) {
            if line.is_blank() {
                index += 1;
                continue;
            }
            if !line.is_deeper_than(header_indent) {
                break;
            }
            if first.is_none() {
                first = Some(index);
            }
            index += 1;
            end = index;
        }
        let Some(first) = first else {
            return;
        };

        let body: Vec<SourceLine<'a>> = self.lines[first..end].to_vec();
        let base = body
            .iter()
            .filter(|line| !line.is_blank())
            .map(|line| line.indent())
            .min_by_key(|indent| indent.len())
            .unwrap_or(header_indent);

        let indent_span = body[0].start..body[0].start + base.len();
        let indent_range = self.locator.byte_range_to_range(&indent_span);
        self.pending
            .push_back(Token::new(TokenKind::Indent, base, indent_range));

        for line in &body {
            let cut = base.len().min(line.text.len());
            let text = if line.is_blank() { "" } else { &line.text[cut..] };
            let span = line.start + cut..line.end();
            let range = self.locator.byte_range_to_range(&span);
            self.pending.push_back(Token::new(
                TokenKind::TextLine(text.to_string()),
                text,
                range,
            ));
            self.push_newline(line.end());
        }

        let close = self.pending.back().map(|t| t.range.span.end).unwrap_or(0);
        let position = self.locator.byte_to_position(close);
        self.pending
            .push_back(Token::new(TokenKind::Dedent, "", Range::at(close, position)));
        self.next_line = end;
    }

    fn finish(&mut self) {
        let end = self.source.len();
        if self.open_line.is_some() {
            self.push_newline(end);
        }
        let position = self.locator.byte_to_position(end);
        for _ in 0..self.stack.close() {
            self.pending
                .push_back(Token::new(TokenKind::Dedent, "", Range::at(end, position)));
        }
        self.pending
            .push_back(Token::new(TokenKind::Eof, "", Range::at(end, position)));
        self.finished = true;
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, TokenizationError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.finished {
                return None;
            }
            if self.next_line < self.lines.len() {
                if let Err(error) = self.advance_line() {
                    self.pending.clear();
                    self.finished = true;
                    return Some(Err(error));
                }
            } else {
                self.finish();
            }
        }
    }
}
