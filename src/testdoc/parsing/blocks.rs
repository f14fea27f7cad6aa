//! Block recognizer
//!
//!     Builds the node tree top-down by recursive descent over the token stream. Each scope
//!     (the module, a class body, a function body, a compound statement body) is a sequence
//!     of items read until the Dedent that closes it:
//!
//!         item       := decorator* (class | def) | test-block | doc-block | statement
//!         class      := "class" NAME ("(" bases ")")? ":" block
//!         def        := "def" NAME "(" parameters ")" ("->" expression)? ":" block
//!         test-block := "test" ":" NEWLINE INDENT test-case+ DEDENT
//!         doc-block  := "doc" ":" NEWLINE INDENT (TEXT_LINE NEWLINE)+ DEDENT
//!         block      := NEWLINE INDENT item+ DEDENT
//!
//!     A test or doc block ends at the Dedent back to its header's level. Since sibling
//!     `def`, `class`, `@`, `test:` and `doc:` lines at the header's level or lower always
//!     come after that Dedent, reaching one of them also ends the block.
//!
//! Ownership
//!
//!     A test or doc block belongs to the definition immediately before it in the same scope;
//!     blocks already attached to that definition do not break the adjacency, so
//!
//!         def add(a, b): ...
//!         test: ...
//!         doc: ...
//!
//!     gives `add` both blocks. With no definition right before it, a block belongs to the
//!     enclosing class or function, or to the program. Blocks are never allowed inside a
//!     compound statement body.
//!
//!     There is no recovery: the first structural mismatch fails the whole parse.

use super::cursor::TokenCursor;
use super::docs::parse_doc_body;
use super::expressions::{parse_expression, span_of};
use super::options::ParseOptions;
use super::statements::parse_statement_line;
use super::test_cases::{cases_span, parse_test_body};
use crate::testdoc::ast::range::{Position, Range};
use crate::testdoc::ast::{
    AstNode, ClassDef, DocBlock, Expression, FunctionDef, ParseError, ParseResult, Parameter,
    Program, ProgramNode, TestBlock,
};
use crate::testdoc::lexing::{Token, TokenKind};
use tracing::trace;

/// The kind of scope whose items are being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Module,
    Class,
    Function,
    Compound,
}

pub(crate) struct BlockParser<'s> {
    cursor: TokenCursor,
    source: &'s str,
    options: ParseOptions,
    depth: usize,
}

impl<'s> BlockParser<'s> {
    pub fn new(source: &'s str, tokens: Vec<Token>, options: ParseOptions) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            source,
            options,
            depth: 0,
        }
    }

    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let children = self.parse_items(Scope::Module)?;
        let eof = self.cursor.expect(&TokenKind::Eof, "at module level")?;
        let location = Range::new(0..self.source.len(), Position::default(), eof.range.end);
        Ok(Program::new(children).at(location))
    }

    fn max_depth(&self) -> Option<usize> {
        self.options.max_nesting_depth
    }

    fn parse_items(&mut self, scope: Scope) -> ParseResult<Vec<ProgramNode>> {
        let mut nodes: Vec<ProgramNode> = Vec::new();
        let mut decorators: Vec<(Expression, Range)> = Vec::new();

        loop {
            let kind = self.cursor.peek_kind().clone();
            let opens_block = self.cursor.nth(1).kind == TokenKind::Colon;
            match kind {
                TokenKind::Eof | TokenKind::Dedent => break,
                TokenKind::Indent => {
                    return Err(ParseError::structural(
                        self.cursor.position(),
                        "unexpected indent",
                    ))
                }
                TokenKind::At => decorators.push(self.parse_decorator()?),
                TokenKind::Def => {
                    let function = self.parse_function(std::mem::take(&mut decorators), scope)?;
                    nodes.push(function);
                }
                TokenKind::Class => {
                    let class = self.parse_class(std::mem::take(&mut decorators))?;
                    nodes.push(class);
                }
                TokenKind::Test | TokenKind::Doc if opens_block => {
                    reject_dangling_decorators(&decorators)?;
                    if scope == Scope::Compound {
                        return Err(ParseError::structural(
                            self.cursor.position(),
                            format!(
                                "'{}:' blocks must follow a definition, not sit inside a statement body",
                                self.cursor.peek().text
                            ),
                        ));
                    }
                    let block = if kind == TokenKind::Test {
                        self.parse_test_block()?
                    } else {
                        self.parse_doc_block()?
                    };
                    attach(&mut nodes, block);
                }
                _ => {
                    reject_dangling_decorators(&decorators)?;
                    let statement = self.parse_statement()?;
                    nodes.push(statement);
                }
            }
        }

        if !decorators.is_empty() {
            return Err(self
                .cursor
                .unexpected("expected 'def' or 'class' after decorator"));
        }
        Ok(nodes)
    }

    /// NEWLINE INDENT item+ DEDENT
    fn parse_block(&mut self, scope: Scope) -> ParseResult<Vec<ProgramNode>> {
        self.cursor.expect(&TokenKind::Newline, "after ':'")?;
        self.parse_indented(scope)
    }

    /// INDENT item+ DEDENT, for headers whose Newline is already consumed
    fn parse_indented(&mut self, scope: Scope) -> ParseResult<Vec<ProgramNode>> {
        self.open_block()?;
        let children = self.parse_items(scope)?;
        self.close_block()?;
        if children.is_empty() {
            return Err(ParseError::structural(
                self.cursor.position(),
                "expected an indented block",
            ));
        }
        Ok(children)
    }

    fn open_block(&mut self) -> ParseResult<()> {
        if !self.cursor.at(&TokenKind::Indent) {
            return Err(ParseError::structural(
                self.cursor.position(),
                "expected an indented block",
            ));
        }
        let indent = self.cursor.advance();
        self.depth += 1;
        if self.options.depth_exceeded(self.depth) {
            return Err(ParseError::limit(
                indent.range.start,
                format!(
                    "blocks nested deeper than {} levels",
                    self.options.max_nesting_depth.unwrap_or_default()
                ),
            ));
        }
        Ok(())
    }

    fn close_block(&mut self) -> ParseResult<()> {
        self.cursor
            .expect(&TokenKind::Dedent, "at the end of the block")?;
        self.depth -= 1;
        Ok(())
    }

    fn expect_name(&mut self, context: &str) -> ParseResult<Token> {
        match self.cursor.peek_kind() {
            TokenKind::Identifier(_) | TokenKind::Test | TokenKind::Doc => {
                Ok(self.cursor.advance())
            }
            _ => Err(self.cursor.unexpected(&format!("expected a name {}", context))),
        }
    }

    /// Tokens up to the first bracket-depth-zero token matching `stop`, not consuming it.
    /// Never crosses a line boundary.
    fn collect_until(&mut self, stop: impl Fn(&TokenKind) -> bool) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        loop {
            let kind = self.cursor.peek_kind();
            if kind.is_structural() || (depth == 0 && stop(kind)) {
                break;
            }
            if kind.opens_bracket() {
                depth += 1;
            } else if kind.closes_bracket() {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            tokens.push(self.cursor.advance());
        }
        tokens
    }

    fn parse_fragment(&mut self, stop: impl Fn(&TokenKind) -> bool) -> ParseResult<Expression> {
        let tokens = self.collect_until(stop);
        parse_expression(&tokens, self.cursor.position(), self.max_depth())
    }

    fn parse_decorator(&mut self) -> ParseResult<(Expression, Range)> {
        let at = self.cursor.advance();
        let line = self.cursor.take_line()?;
        let end = span_of(&line)
            .map(|range| range.end)
            .unwrap_or(at.range.end);
        let expression = parse_expression(&line, end, self.max_depth())?;
        let range = span_of(&line)
            .map(|range| at.range.join(&range))
            .unwrap_or(at.range);
        Ok((expression, range))
    }

    /// Parameters up to, not including, the closing parenthesis
    fn parse_parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        let mut parameters = Vec::new();
        loop {
            if self.cursor.at(&TokenKind::RParen) {
                return Ok(parameters);
            }
            let start = self.cursor.peek().range.clone();

            let mut name = String::new();
            if let TokenKind::Operator(op) = self.cursor.peek_kind() {
                if op == "*" || op == "**" || op == "/" {
                    name.push_str(op);
                    self.cursor.advance();
                }
            }
            let bare_marker = name == "*" || name == "/";
            match self.cursor.peek_kind() {
                TokenKind::Identifier(_) | TokenKind::Test | TokenKind::Doc if name != "/" => {
                    name.push_str(&self.cursor.advance().text);
                }
                TokenKind::Comma | TokenKind::RParen if bare_marker => {}
                _ => return Err(self.cursor.unexpected("expected a parameter name")),
            }

            let mut parameter = Parameter::new(name);
            let ends_parameter =
                |kind: &TokenKind| matches!(kind, TokenKind::Comma | TokenKind::RParen);
            if self.cursor.eat(&TokenKind::Colon).is_some() {
                let annotation = self.parse_fragment(|kind| {
                    ends_parameter(kind) || matches!(kind, TokenKind::Assign(op) if op == "=")
                })?;
                parameter = parameter.with_annotation(annotation);
            }
            if matches!(self.cursor.peek_kind(), TokenKind::Assign(op) if op == "=") {
                self.cursor.advance();
                let default = self.parse_fragment(ends_parameter)?;
                parameter = parameter.with_default(default);
            }
            let end = self.cursor.previous().range.clone();
            parameters.push(parameter.at(start.join(&end)));

            match self.cursor.peek_kind() {
                TokenKind::Comma => {
                    self.cursor.advance();
                }
                TokenKind::RParen => {}
                _ => return Err(self.cursor.unexpected("expected ',' or ')' in parameter list")),
            }
        }
    }

    fn parse_function(
        &mut self,
        decorators: Vec<(Expression, Range)>,
        scope: Scope,
    ) -> ParseResult<ProgramNode> {
        let def = self.cursor.advance();
        let name = self.expect_name("after 'def'")?;
        self.cursor
            .expect(&TokenKind::LParen, "after the function name")?;
        let parameters = self.parse_parameters()?;
        self.cursor
            .expect(&TokenKind::RParen, "to close the parameter list")?;
        let return_annotation = if self.cursor.eat(&TokenKind::Arrow).is_some() {
            Some(self.parse_fragment(|kind| *kind == TokenKind::Colon)?)
        } else {
            None
        };
        let colon = self
            .cursor
            .expect(&TokenKind::Colon, "at the end of the function header")?;
        let header_location = def.range.join(&colon.range);

        trace!(name = %name.text, depth = self.depth, "function");
        let children = self.parse_block(Scope::Function)?;

        let mut function = if scope == Scope::Class {
            FunctionDef::method(name.text)
        } else {
            FunctionDef::new(name.text)
        }
        .with_parameters(parameters)
        .with_children(children);
        function.return_annotation = return_annotation;
        function.location = definition_location(&decorators, &header_location, &function.children);
        function.header_location = header_location;
        function.decorators = decorators.into_iter().map(|(expr, _)| expr).collect();

        Ok(if function.is_method {
            ProgramNode::MethodDef(function)
        } else {
            ProgramNode::FunctionDef(function)
        })
    }

    fn parse_class(&mut self, decorators: Vec<(Expression, Range)>) -> ParseResult<ProgramNode> {
        let class_token = self.cursor.advance();
        let name = self.expect_name("after 'class'")?;

        let mut bases = Vec::new();
        if self.cursor.eat(&TokenKind::LParen).is_some() {
            while self.cursor.eat(&TokenKind::RParen).is_none() {
                bases.push(self.parse_fragment(|kind| *kind == TokenKind::Comma)?);
                match self.cursor.peek_kind() {
                    TokenKind::Comma => {
                        self.cursor.advance();
                    }
                    TokenKind::RParen => {}
                    _ => return Err(self.cursor.unexpected("expected ',' or ')' in base list")),
                }
            }
        }
        let colon = self
            .cursor
            .expect(&TokenKind::Colon, "at the end of the class header")?;
        let header_location = class_token.range.join(&colon.range);

        trace!(name = %name.text, depth = self.depth, "class");
        let children = self.parse_block(Scope::Class)?;

        let mut class = ClassDef::new(name.text).with_children(children);
        class.bases = bases;
        class.location = definition_location(&decorators, &header_location, &class.children);
        class.header_location = header_location;
        class.decorators = decorators.into_iter().map(|(expr, _)| expr).collect();
        Ok(ProgramNode::ClassDef(class))
    }

    fn parse_test_block(&mut self) -> ParseResult<ProgramNode> {
        let keyword = self.cursor.advance();
        let colon = self.cursor.advance();
        let header_location = keyword.range.join(&colon.range);
        self.cursor.expect(&TokenKind::Newline, "after 'test:'")?;

        self.open_block()?;
        let max_depth = self.max_depth();
        let cases = parse_test_body(&mut self.cursor, self.source, max_depth)?;
        self.close_block()?;
        if cases.is_empty() {
            return Err(ParseError::structural(
                header_location.start,
                "test block has no test cases",
            ));
        }

        trace!(cases = cases.len(), line = header_location.start.line, "test block");
        let location = cases_span(&cases)
            .map(|span| header_location.join(&span))
            .unwrap_or_else(|| header_location.clone());
        let mut block = TestBlock::new(cases).at(location);
        block.header_location = header_location;
        Ok(ProgramNode::TestBlock(block))
    }

    fn parse_doc_block(&mut self) -> ParseResult<ProgramNode> {
        let keyword = self.cursor.advance();
        let colon = self.cursor.advance();
        let header_location = keyword.range.join(&colon.range);
        self.cursor.expect(&TokenKind::Newline, "after 'doc:'")?;

        self.open_block()?;
        let lines = parse_doc_body(&mut self.cursor)?;
        self.close_block()?;

        trace!(lines = lines.len(), line = header_location.start.line, "doc block");
        let location = Range::bounding_box(lines.iter().map(|line| &line.location))
            .map(|span| header_location.join(&span))
            .unwrap_or_else(|| header_location.clone());
        let mut block = DocBlock::new(lines).at(location);
        block.header_location = header_location;
        Ok(ProgramNode::DocBlock(block))
    }

    fn parse_statement(&mut self) -> ParseResult<ProgramNode> {
        let line = self.cursor.take_line()?;
        let mut statement = parse_statement_line(&line, self.source, self.max_depth())?;
        if statement.is_compound() {
            let children = self.parse_indented(Scope::Compound)?;
            if let Some(body) = Range::bounding_box(children.iter().map(|child| child.range())) {
                statement.location = statement.location.join(&body);
            }
            statement.children = children;
        }
        Ok(ProgramNode::Statement(statement))
    }
}

fn reject_dangling_decorators(decorators: &[(Expression, Range)]) -> ParseResult<()> {
    match decorators.first() {
        Some((_, range)) => Err(ParseError::structural(
            range.start,
            "decorator must be followed by 'def' or 'class'",
        )),
        None => Ok(()),
    }
}

/// From the first decorator (or the header) through the last child
fn definition_location(
    decorators: &[(Expression, Range)],
    header: &Range,
    children: &[ProgramNode],
) -> Range {
    let ranges = decorators
        .iter()
        .map(|(_, range)| range)
        .chain(std::iter::once(header))
        .chain(children.iter().map(|child| child.range()));
    Range::bounding_box(ranges).unwrap_or_else(|| header.clone())
}

/// Give a test or doc block to the definition right before it, or keep it in scope
fn attach(nodes: &mut Vec<ProgramNode>, block: ProgramNode) {
    if let Some(owner) = nodes.last_mut().filter(|node| node.is_definition()) {
        let range = block.range().clone();
        if let Some(children) = owner.definition_children_mut() {
            children.push(block);
        }
        let location = owner.location_mut();
        *location = location.join(&range);
        return;
    }
    nodes.push(block);
}
