//! Lexer (tokenizer) for pattern text.

use crate::{ParseError, ParseResult, Span};

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// A run of ordinary characters: attribute keys, values, relation
    /// names and capture names.
    Word(String),
    /// A double-quoted string.
    Str(String),
    /// A `/regex/` literal, delimiters stripped.
    Regex(String),

    // Symbols
    LBrace,    // {
    RBrace,    // }
    LParen,    // (
    RParen,    // )
    Semicolon, // ;
    Colon,     // :
    Eq,        // =
    Pipe,      // |
    Bang,      // !
    Amp,       // &
    Dollar,    // $
    Gt,        // >
    Lt,        // <
    GtGt,      // >>
    LtLt,      // <<

    // End of file
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Word(_) => "word",
            TokenKind::Str(_) => "string",
            TokenKind::Regex(_) => "regex",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Eq => "=",
            TokenKind::Pipe => "|",
            TokenKind::Bang => "!",
            TokenKind::Amp => "&",
            TokenKind::Dollar => "$",
            TokenKind::Gt => ">",
            TokenKind::Lt => "<",
            TokenKind::GtGt => ">>",
            TokenKind::LtLt => "<<",
            TokenKind::Eof => "end of input",
        }
    }

    /// Returns true if the token starts a relation operator.
    pub fn is_relation_op(&self) -> bool {
        matches!(
            self,
            TokenKind::Gt | TokenKind::Lt | TokenKind::GtGt | TokenKind::LtLt
        )
    }
}

/// Characters that end a word.
fn is_special(c: char) -> bool {
    matches!(
        c,
        '{' | '}' | '(' | ')' | ';' | ':' | '=' | '|' | '!' | '&' | '$' | '<' | '>' | '"' | '/'
    )
}

/// A token with its span.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(pos: usize, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(pos, pos, line, column),
        }
    }
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize all input into a vector of tokens.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn current_span(&self) -> Span {
        Span::new(self.pos, self.pos, self.line, self.column)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        self.skip_whitespace();

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Ok(Token::eof(self.pos, self.line, self.column));
        };

        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '=' => TokenKind::Eq,
            '|' => TokenKind::Pipe,
            '!' => TokenKind::Bang,
            '&' => TokenKind::Amp,
            '$' => TokenKind::Dollar,
            '>' => {
                if self.peek_char() == Some('>') {
                    self.next_char();
                    TokenKind::GtGt
                } else {
                    TokenKind::Gt
                }
            }
            '<' => {
                if self.peek_char() == Some('<') {
                    self.next_char();
                    TokenKind::LtLt
                } else {
                    TokenKind::Lt
                }
            }
            '"' => self.scan_string(start, start_line, start_col)?,
            '/' => self.scan_regex(start, start_line, start_col)?,
            c => self.scan_word(c),
        };

        Ok(Token::new(
            kind,
            self.span_from(start, start_line, start_col),
        ))
    }

    fn scan_word(&mut self, first: char) -> TokenKind {
        let mut word = String::new();
        word.push(first);
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || is_special(c) {
                break;
            }
            word.push(c);
            self.next_char();
        }
        TokenKind::Word(word)
    }

    fn scan_string(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut value = String::new();

        loop {
            match self.next_char() {
                None => {
                    return Err(ParseError::new(
                        "unterminated string literal",
                        self.span_from(start, start_line, start_col),
                    ));
                }
                Some('"') => break,
                Some('\\') => {
                    let escaped = match self.next_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('\\') => '\\',
                        Some('"') => '"',
                        Some(c) => {
                            return Err(ParseError::new(
                                format!("invalid escape sequence '\\{}'", c),
                                self.current_span(),
                            ));
                        }
                        None => {
                            return Err(ParseError::new(
                                "unterminated escape sequence",
                                self.current_span(),
                            ));
                        }
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }

        Ok(TokenKind::Str(value))
    }

    /// `/.../` with `\/` for a literal slash. Other escapes pass through to
    /// the regex engine untouched.
    fn scan_regex(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        let mut value = String::new();

        loop {
            match self.next_char() {
                None => {
                    return Err(ParseError::new(
                        "unterminated regex literal",
                        self.span_from(start, start_line, start_col),
                    ));
                }
                Some('/') => break,
                Some('\\') => match self.next_char() {
                    Some('/') => value.push('/'),
                    Some(c) => {
                        value.push('\\');
                        value.push(c);
                    }
                    None => {
                        return Err(ParseError::new(
                            "unterminated regex literal",
                            self.span_from(start, start_line, start_col),
                        ));
                    }
                },
                Some(c) => value.push(c),
            }
        }

        Ok(TokenKind::Regex(value))
    }
}
