//! Tokenizer for filter expressions

use crate::schema::{FALSE_TOKENS, TRUE_TOKENS};

use super::ast::{CompareOp, Span};
use super::errors::{ExprError, ExprResult};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Op(CompareOp),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl TokenKind {
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Ident(_) => "column name",
            TokenKind::Str(_) => "string literal",
            TokenKind::Integer(_) => "integer literal",
            TokenKind::Decimal(_) => "decimal literal",
            TokenKind::Boolean(_) => "boolean literal",
            TokenKind::Op(_) => "comparison operator",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Not => "'not'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Splits an expression into tokens with source spans
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Tokenizes the whole input
    pub fn tokenize(src: &'a str) -> ExprResult<Vec<Token>> {
        let mut lexer = Lexer::new(src);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, char::is_whitespace) {
            self.bump();
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            span: Span::new(start, self.pos),
        }
    }

    pub fn next_token(&mut self) -> ExprResult<Option<Token>> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let token = match c {
            '(' => {
                self.bump();
                self.token(TokenKind::LParen, start)
            }
            ')' => {
                self.bump();
                self.token(TokenKind::RParen, start)
            }
            '=' | '!' | '<' | '>' => self.operator(start)?,
            '\'' | '"' => self.string(c, start)?,
            '`' => self.quoted_ident(start)?,
            c if c.is_ascii_digit() => self.number(start)?,
            '-' | '.' if self.peek_second().map_or(false, |n| n.is_ascii_digit() || n == '.') => {
                self.number(start)?
            }
            c if c.is_alphabetic() || c == '_' => self.word(start),
            other => {
                return Err(ExprError::UnexpectedChar {
                    fragment: other.to_string(),
                    offset: start,
                })
            }
        };

        Ok(Some(token))
    }

    fn operator(&mut self, start: usize) -> ExprResult<Token> {
        let first = self.bump().unwrap_or_default();
        let followed_by_eq = self.peek() == Some('=');
        let op = match (first, followed_by_eq) {
            ('=', true) => CompareOp::Eq,
            ('!', true) => CompareOp::Ne,
            ('<', true) => CompareOp::Le,
            ('>', true) => CompareOp::Ge,
            ('<', false) => CompareOp::Lt,
            ('>', false) => CompareOp::Gt,
            _ => {
                return Err(ExprError::UnexpectedChar {
                    fragment: first.to_string(),
                    offset: start,
                })
            }
        };
        if followed_by_eq {
            self.bump();
        }
        Ok(self.token(TokenKind::Op(op), start))
    }

    fn string(&mut self, quote: char, start: usize) -> ExprResult<Token> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => break,
                Some('\\') => match self.bump() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(self.unterminated(start)),
                },
                Some(c) => value.push(c),
                None => return Err(self.unterminated(start)),
            }
        }
        Ok(self.token(TokenKind::Str(value), start))
    }

    fn quoted_ident(&mut self, start: usize) -> ExprResult<Token> {
        self.bump();
        let body_start = self.pos;
        while let Some(c) = self.bump() {
            if c == '`' {
                let name = self.src[body_start..self.pos - 1].to_string();
                return Ok(self.token(TokenKind::Ident(name), start));
            }
        }
        Err(self.unterminated(start))
    }

    fn unterminated(&self, start: usize) -> ExprError {
        ExprError::Unterminated {
            fragment: self.src[start..].to_string(),
            offset: start,
        }
    }

    fn eat_digits(&mut self) -> usize {
        let mut count = 0;
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.bump();
            count += 1;
        }
        count
    }

    fn number(&mut self, start: usize) -> ExprResult<Token> {
        if self.peek() == Some('-') {
            self.bump();
        }
        let mut digits = self.eat_digits();
        let mut decimal = false;

        if self.peek() == Some('.') {
            self.bump();
            decimal = true;
            digits += self.eat_digits();
        }

        if digits > 0 && matches!(self.peek(), Some('e' | 'E')) {
            let mark = self.pos;
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            if self.eat_digits() == 0 {
                self.pos = mark;
            } else {
                decimal = true;
            }
        }

        let text = &self.src[start..self.pos];
        if digits == 0 {
            return Err(ExprError::UnexpectedChar {
                fragment: text.to_string(),
                offset: start,
            });
        }

        let kind = if decimal {
            text.parse().map(TokenKind::Decimal).ok()
        } else {
            text.parse()
                .map(TokenKind::Integer)
                .or_else(|_| text.parse().map(TokenKind::Decimal))
                .ok()
        };

        kind.map(|k| self.token(k, start))
            .ok_or_else(|| ExprError::UnexpectedChar {
                fragment: text.to_string(),
                offset: start,
            })
    }

    fn word(&mut self, start: usize) -> Token {
        while self
            .peek()
            .map_or(false, |c| c.is_alphanumeric() || c == '_')
        {
            self.bump();
        }
        let word = &self.src[start..self.pos];
        let kind = if word.eq_ignore_ascii_case("and") {
            TokenKind::And
        } else if word.eq_ignore_ascii_case("or") {
            TokenKind::Or
        } else if word.eq_ignore_ascii_case("not") {
            TokenKind::Not
        } else if TRUE_TOKENS.contains(&word) {
            TokenKind::Boolean(true)
        } else if FALSE_TOKENS.contains(&word) {
            TokenKind::Boolean(false)
        } else {
            TokenKind::Ident(word.to_string())
        };
        self.token(kind, start)
    }
}
