//! Pattern parsing (node descriptions, relations, groups).

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

impl Parser {
    /// expr := node_term relation*
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        let start = self.peek().span;
        let head = self.parse_node_term()?;

        let mut relations = Vec::new();
        loop {
            // '&' between relations is accepted and means nothing extra.
            while self.eat(&TokenKind::Amp) {}
            if !self.check(&TokenKind::Bang) && !self.peek().kind.is_relation_op() {
                break;
            }
            relations.push(self.parse_relation()?);
        }

        Ok(Expr {
            head,
            relations,
            span: self.span_from(start),
        })
    }

    fn parse_node_term(&mut self) -> ParseResult<NodeTerm> {
        match self.peek().kind {
            TokenKind::LBrace => Ok(NodeTerm::Node(self.parse_node()?)),
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(NodeTerm::Group(Box::new(expr)))
            }
            _ => {
                let token = self.peek();
                Err(ParseError::unexpected_token(
                    token.span,
                    "{ or (",
                    token.kind.name(),
                ))
            }
        }
    }

    /// node := '{' (item (';' item)*)? '}' ('=' NAME)?
    fn parse_node(&mut self) -> ParseResult<NodeDesc> {
        let start = self.expect(&TokenKind::LBrace)?.span;
        let mut constraints = Vec::new();
        let mut root_only = false;

        if !self.check(&TokenKind::RBrace) {
            loop {
                if self.eat(&TokenKind::Dollar) {
                    root_only = true;
                } else {
                    constraints.push(self.parse_attr_constraint()?);
                }
                if !self.eat(&TokenKind::Semicolon) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RBrace)?;

        let name = self.parse_capture_name()?;

        Ok(NodeDesc {
            constraints,
            root_only,
            name,
            span: self.span_from(start),
        })
    }

    /// item := KEY ':' '!'? value ('|' value)*
    fn parse_attr_constraint(&mut self) -> ParseResult<AttrConstraint> {
        let start = self.peek().span;
        let key = self.expect_word("attribute name")?;
        self.expect(&TokenKind::Colon)?;
        let negated = self.eat(&TokenKind::Bang);
        let values = self.parse_alternatives("attribute value")?;

        Ok(AttrConstraint {
            key,
            negated,
            values,
            span: self.span_from(start),
        })
    }

    fn parse_alternatives(&mut self, what: &str) -> ParseResult<Vec<ValueLiteral>> {
        let mut values = vec![self.parse_value(what)?];
        while self.eat(&TokenKind::Pipe) {
            values.push(self.parse_value(what)?);
        }
        Ok(values)
    }

    fn parse_value(&mut self, what: &str) -> ParseResult<ValueLiteral> {
        match self.peek().kind.clone() {
            TokenKind::Str(s) => {
                self.advance();
                Ok(ValueLiteral::Exact(s))
            }
            TokenKind::Regex(r) => {
                self.advance();
                Ok(ValueLiteral::Regex(r))
            }
            _ => Ok(ValueLiteral::Exact(self.expect_compound_word(what)?)),
        }
    }

    /// relation := '!'? op labels? ('=' NAME)? node_term
    fn parse_relation(&mut self) -> ParseResult<RelationExpr> {
        let start = self.peek().span;
        let negated = self.eat(&TokenKind::Bang);

        let token = self.advance();
        let op = match token.kind {
            TokenKind::Gt => RelOp::Child,
            TokenKind::Lt => RelOp::Parent,
            TokenKind::GtGt => RelOp::Descendant,
            TokenKind::LtLt => RelOp::Ancestor,
            other => {
                return Err(ParseError::unexpected_token(
                    token.span,
                    "relation operator",
                    other.name(),
                ))
            }
        };

        let labels = match self.peek().kind {
            TokenKind::Word(_) | TokenKind::Str(_) | TokenKind::Regex(_) => {
                self.parse_alternatives("relation name")?
            }
            _ => Vec::new(),
        };
        let name = self.parse_capture_name()?;
        let target = self.parse_node_term()?;

        Ok(RelationExpr {
            negated,
            op,
            labels,
            name,
            target,
            span: self.span_from(start),
        })
    }

    fn parse_capture_name(&mut self) -> ParseResult<Option<String>> {
        if self.eat(&TokenKind::Eq) {
            Ok(Some(self.expect_word("capture name")?))
        } else {
            Ok(None)
        }
    }
}
