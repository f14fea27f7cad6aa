//! Expression parser
//!
//!     Parses one expression out of a slice of tokens. The grammar has no precedence:
//!
//!         expression := primary (operator expression)?
//!         primary    := call | method-call | attribute | literal | name | "(" expression ")"
//!                       followed by any number of ".name" / ".name(args)"
//!
//!     Primaries are recognized by ordered alternative trial: a function call is tried before
//!     a method call, a method call before a bare attribute access, then literals, names and
//!     parenthesized groups. `a.b()` is therefore always a method call and never an attribute
//!     access followed by a stray argument list.
//!
//!     An operator binds everything to its right, so `a + b * c` is `a + (b * c)` and
//!     `a - b - c` is `a - (b - c)`. Chains are folded iteratively from the right.
//!
//!     Argument lists are comma separated with no trailing comma. Collection literals are not
//!     part of the grammar.

use crate::testdoc::ast::range::{Position, Range};
use crate::testdoc::ast::{BinaryOperator, Expression, Literal, ParseError, ParseResult};
use crate::testdoc::lexing::{Token, TokenKind};

/// Parse `tokens` as exactly one expression.
///
/// `end` is where the slice ends in the source; errors about missing input point there.
pub fn parse_expression(
    tokens: &[Token],
    end: Position,
    max_depth: Option<usize>,
) -> ParseResult<Expression> {
    let mut parser = ExpressionParser {
        tokens,
        pos: 0,
        end,
        depth: 0,
        max_depth,
    };
    let expression = parser.expression()?;
    if let Some(extra) = parser.tokens.get(parser.pos) {
        return Err(ParseError::expression(
            extra.range.start,
            format!("unexpected {} after expression", extra.kind.describe()),
        ));
    }
    Ok(expression)
}

/// Bounding range of a token slice
pub fn span_of(tokens: &[Token]) -> Option<Range> {
    Range::bounding_box(tokens.iter().map(|t| &t.range))
}

struct ExpressionParser<'t> {
    tokens: &'t [Token],
    pos: usize,
    end: Position,
    depth: usize,
    max_depth: Option<usize>,
}

impl<'t> ExpressionParser<'t> {
    fn kind_at(&self, offset: usize) -> Option<&'t TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn name_at(&self, offset: usize) -> Option<&'t str> {
        match self.kind_at(offset)? {
            TokenKind::Identifier(name) => Some(name),
            TokenKind::Test => Some("test"),
            TokenKind::Doc => Some("doc"),
            _ => None,
        }
    }

    fn position(&self) -> Position {
        self.tokens
            .get(self.pos)
            .map(|t| t.range.start)
            .unwrap_or(self.end)
    }

    fn error(&self, expected: &str) -> ParseError {
        let found = self
            .kind_at(0)
            .map(TokenKind::describe)
            .unwrap_or_else(|| "end of expression".to_string());
        ParseError::expression(self.position(), format!("{}, found {}", expected, found))
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> ParseResult<()> {
        if self.kind_at(0) == Some(kind) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    fn expression(&mut self) -> ParseResult<Expression> {
        let mut operands = vec![self.primary()?];
        let mut operators = Vec::new();
        while let Some(TokenKind::Operator(symbol)) = self.kind_at(0) {
            let operator = BinaryOperator::from_symbol(symbol)
                .ok_or_else(|| self.error("expected a binary operator"))?;
            // Each operator nests the rest of the chain one level deeper.
            self.enter()?;
            self.pos += 1;
            operators.push(operator);
            operands.push(self.primary()?);
        }
        self.depth -= operators.len();

        let mut result = operands.pop().ok_or_else(|| self.error("expected an expression"))?;
        while let (Some(operator), Some(left)) = (operators.pop(), operands.pop()) {
            result = Expression::binary(left, operator, result);
        }
        Ok(result)
    }

    fn primary(&mut self) -> ParseResult<Expression> {
        let base = self.alternative()?;
        self.postfix(base)
    }

    fn alternative(&mut self) -> ParseResult<Expression> {
        // name(args)
        if let (Some(name), Some(TokenKind::LParen)) = (self.name_at(0), self.kind_at(1)) {
            self.pos += 2;
            let arguments = self.arguments()?;
            return Ok(Expression::call(name, arguments));
        }

        // name.method(args)
        if let (Some(receiver), Some(TokenKind::Dot), Some(method), Some(TokenKind::LParen)) = (
            self.name_at(0),
            self.kind_at(1),
            self.name_at(2),
            self.kind_at(3),
        ) {
            self.pos += 4;
            let arguments = self.arguments()?;
            return Ok(Expression::MethodCall {
                receiver: Box::new(Expression::identifier(receiver)),
                method: method.to_string(),
                arguments,
            });
        }

        // name.attribute
        if let (Some(object), Some(TokenKind::Dot), Some(attribute)) =
            (self.name_at(0), self.kind_at(1), self.name_at(2))
        {
            self.pos += 3;
            return Ok(Expression::Attribute {
                object: Box::new(Expression::identifier(object)),
                attribute: attribute.to_string(),
            });
        }

        if let Some(literal) = self.literal() {
            self.pos += 1;
            return Ok(Expression::Literal(literal));
        }

        if let Some(name) = self.name_at(0) {
            self.pos += 1;
            return Ok(Expression::identifier(name));
        }

        if let Some(TokenKind::LParen) = self.kind_at(0) {
            self.enter()?;
            self.pos += 1;
            let inner = self.expression()?;
            self.expect(&TokenKind::RParen, "expected ')' to close the group")?;
            self.depth -= 1;
            return Ok(Expression::Parenthesized(Box::new(inner)));
        }

        Err(self.error("expected an expression"))
    }

    fn literal(&self) -> Option<Literal> {
        match self.kind_at(0)? {
            TokenKind::Number(text) => Some(Literal::Number(text.clone())),
            TokenKind::Str(text) => Some(Literal::String(text.clone())),
            TokenKind::Boolean(value) => Some(Literal::Boolean(*value)),
            _ => None,
        }
    }

    /// Chained `.name` and `.name(args)` after a primary
    fn postfix(&mut self, mut expression: Expression) -> ParseResult<Expression> {
        let entered = self.depth;
        while let Some(TokenKind::Dot) = self.kind_at(0) {
            self.enter()?;
            let Some(name) = self.name_at(1) else {
                self.pos += 1;
                return Err(self.error("expected a name after '.'"));
            };
            if let Some(TokenKind::LParen) = self.kind_at(2) {
                self.pos += 3;
                let arguments = self.arguments()?;
                expression = Expression::MethodCall {
                    receiver: Box::new(expression),
                    method: name.to_string(),
                    arguments,
                };
            } else {
                self.pos += 2;
                expression = Expression::Attribute {
                    object: Box::new(expression),
                    attribute: name.to_string(),
                };
            }
        }
        self.depth = entered;
        Ok(expression)
    }

    /// Arguments after an opening parenthesis, through the closing one
    fn arguments(&mut self) -> ParseResult<Vec<Expression>> {
        self.enter()?;
        let mut arguments = Vec::new();
        if let Some(TokenKind::RParen) = self.kind_at(0) {
            self.pos += 1;
            self.depth -= 1;
            return Ok(arguments);
        }
        loop {
            arguments.push(self.expression()?);
            match self.kind_at(0) {
                Some(TokenKind::Comma) => {
                    self.pos += 1;
                    if let Some(TokenKind::RParen) = self.kind_at(0) {
                        return Err(self.error("expected an argument after ','"));
                    }
                }
                Some(TokenKind::RParen) => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("expected ',' or ')' in argument list")),
            }
        }
        self.depth -= 1;
        Ok(arguments)
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        match self.max_depth {
            Some(limit) if self.depth > limit => Err(ParseError::limit(
                self.position(),
                format!("expression nesting deeper than {} levels", limit),
            )),
            _ => Ok(()),
        }
    }
}
