//! Parser for pattern text.
//!
//! The grammar, informally:
//!
//! ```text
//! expr      := node_term relation*
//! node_term := node | '(' expr ')'
//! node      := '{' (item (';' item)*)? '}' ('=' NAME)?
//! item      := '$' | KEY ':' '!'? value ('|' value)*
//! relation  := '&'? '!'? ('>' | '<' | '>>' | '<<') labels? ('=' NAME)? node_term
//! labels    := value ('|' value)*
//! value     := WORD | STRING | REGEX
//! ```
//!
//! Grammar productions live in the `pattern` submodule.

mod pattern;

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};

// ==================== PARSER STATE ====================

/// Parser state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
}

impl Parser {
    /// Create a new parser from source text.
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        let eof = tokens
            .last()
            .cloned()
            .unwrap_or_else(|| Token::eof(input.len(), 1, 1));
        Ok(Self {
            tokens,
            pos: 0,
            eof,
        })
    }
}

// ==================== TOKEN HELPERS ====================

impl Parser {
    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    /// Consume the token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            Err(ParseError::unexpected_token(
                token.span,
                kind.name(),
                token.kind.name(),
            ))
        }
    }

    pub(crate) fn expect_word(&mut self, what: &str) -> ParseResult<String> {
        match self.peek().kind.clone() {
            TokenKind::Word(word) => {
                self.advance();
                Ok(word)
            }
            _ => {
                let token = self.peek();
                Err(ParseError::unexpected_token(
                    token.span,
                    what,
                    token.kind.name(),
                ))
            }
        }
    }

    /// A word that may contain colons, such as `nsubj:pass`. The lexer splits
    /// at ':', so adjacent word and colon tokens with no gap are rejoined.
    pub(crate) fn expect_compound_word(&mut self, what: &str) -> ParseResult<String> {
        let first = self.peek().clone();
        let mut text = self.expect_word(what)?;
        let mut end = first.span.end;

        loop {
            let next = self.peek();
            if next.span.start != end {
                break;
            }
            match &next.kind {
                TokenKind::Word(word) => text.push_str(word),
                TokenKind::Colon => text.push(':'),
                _ => break,
            }
            end = next.span.end;
            self.advance();
        }
        Ok(text)
    }

    pub(crate) fn span_from(&self, start: Span) -> Span {
        let end_token = if self.pos > 0 {
            &self.tokens[self.pos - 1]
        } else {
            self.peek()
        };
        Span::new(start.start, end_token.span.end, start.line, start.column)
    }
}

// ==================== PUBLIC API ====================

/// Parse a complete pattern.
pub fn parse_pattern(input: &str) -> ParseResult<Expr> {
    let mut parser = Parser::new(input)?;
    let expr = parser.parse_expr()?;
    let token = parser.peek();
    if !matches!(token.kind, TokenKind::Eof) {
        return Err(ParseError::trailing_input(token.span, token.kind.name()));
    }
    Ok(expr)
}

// ==================== TESTS ====================
