//! Recursive-descent parser for filter expressions
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! or_expr    := and_expr ("or" and_expr)*
//! and_expr   := not_expr ("and" not_expr)*
//! not_expr   := "not" not_expr | primary
//! primary    := "(" or_expr ")" | comparison
//! comparison := column op literal
//! ```
//!
//! Input is bounded: at most [`MAX_TOKENS`] tokens and [`MAX_DEPTH`] levels
//! of parentheses or `not`. The resulting tree is walked recursively by
//! compilation, evaluation and drop, so both limits keep its depth small.

use super::ast::{Expr, Literal, Span};
use super::errors::{ExprError, ExprResult};
use super::lexer::{Lexer, Token, TokenKind};

/// Deepest allowed nesting of parentheses and `not`
pub const MAX_DEPTH: usize = 64;

/// Most tokens a single filter may contain
pub const MAX_TOKENS: usize = 512;

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Parses a complete expression
    pub fn parse(source: &'a str) -> ExprResult<Expr> {
        let tokens = Lexer::tokenize(source)?;
        if tokens.len() > MAX_TOKENS {
            return Err(ExprError::TooLong {
                tokens: tokens.len(),
                limit: MAX_TOKENS,
            });
        }
        let mut parser = Parser {
            source,
            tokens,
            current: 0,
            depth: 0,
        };

        let expr = parser.parse_or_expr()?;
        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(parser.unexpected(token, "'and', 'or' or end of expression")),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned();
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    fn next_is(&self, kind: &TokenKind) -> bool {
        self.peek().map_or(false, |t| &t.kind == kind)
    }

    fn unexpected(&self, token: &Token, expected: &'static str) -> ExprError {
        ExprError::UnexpectedToken {
            expected,
            fragment: token.span.fragment(self.source).to_string(),
            offset: token.span.start,
        }
    }

    fn expect_next(&mut self, expected: &'static str) -> ExprResult<Token> {
        self.advance()
            .ok_or(ExprError::UnexpectedEnd { expected })
    }

    /// Enters one nesting level; the caller must `leave` on success
    fn enter(&mut self) -> ExprResult<()> {
        if self.depth >= MAX_DEPTH {
            let offset = self.peek().map_or(self.source.len(), |t| t.span.start);
            return Err(ExprError::TooDeep {
                limit: MAX_DEPTH,
                offset,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_or_expr(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_and_expr()?;
        while self.next_is(&TokenKind::Or) {
            self.advance();
            let right = self.parse_and_expr()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and_expr(&mut self) -> ExprResult<Expr> {
        let mut left = self.parse_not_expr()?;
        while self.next_is(&TokenKind::And) {
            self.advance();
            let right = self.parse_not_expr()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not_expr(&mut self) -> ExprResult<Expr> {
        if self.next_is(&TokenKind::Not) {
            self.enter()?;
            self.advance();
            let inner = self.parse_not_expr()?;
            self.leave();
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ExprResult<Expr> {
        if self.next_is(&TokenKind::LParen) {
            self.enter()?;
            self.advance();
            let expr = self.parse_or_expr()?;
            let close = self.expect_next("')'")?;
            if close.kind != TokenKind::RParen {
                return Err(self.unexpected(&close, "')'"));
            }
            self.leave();
            return Ok(expr);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> ExprResult<Expr> {
        let column_token = self.expect_next("column name")?;
        let TokenKind::Ident(column) = column_token.kind.clone() else {
            return Err(self.unexpected(&column_token, "column name"));
        };

        let op_token = self.expect_next("comparison operator")?;
        let TokenKind::Op(op) = op_token.kind else {
            return Err(self.unexpected(&op_token, "comparison operator"));
        };

        let literal_token = self.expect_next("literal")?;
        let literal = match &literal_token.kind {
            TokenKind::Str(s) => Literal::Str(s.clone()),
            TokenKind::Integer(i) => Literal::Integer(*i),
            TokenKind::Decimal(d) => Literal::Decimal(*d),
            TokenKind::Boolean(b) => Literal::Boolean(*b),
            _ => return Err(self.unexpected(&literal_token, "literal")),
        };

        Ok(Expr::Comparison {
            column,
            op,
            literal,
            span: Span::new(column_token.span.start, literal_token.span.end),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ast::CompareOp;

    fn cmp(column: &str, op: CompareOp, literal: Literal, start: usize, end: usize) -> Expr {
        Expr::Comparison {
            column: column.to_string(),
            op,
            literal,
            span: Span::new(start, end),
        }
    }

    #[test]
    fn test_single_comparison() {
        assert_eq!(
            Parser::parse("age >= 18").unwrap(),
            cmp("age", CompareOp::Ge, Literal::Integer(18), 0, 9)
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let expr = Parser::parse("a == 1 or b == 2 and c == 3").unwrap();
        match expr {
            Expr::Or(left, right) => {
                assert!(matches!(*left, Expr::Comparison { .. }));
                assert!(matches!(*right, Expr::And(_, _)));
            }
            other => panic!("expected Or, got {:?}", other),
        }
    }

    #[test]
    fn test_not_binds_tighter_than_and() {
        let expr = Parser::parse("not a == 1 and b == 2").unwrap();
        match expr {
            Expr::And(left, _) => assert!(matches!(*left, Expr::Not(_))),
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn test_parentheses_group() {
        let expr = Parser::parse("(a == 1 or b == 2) and c == 3").unwrap();
        match expr {
            Expr::And(left, _) => assert!(matches!(*left, Expr::Or(_, _))),
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn test_double_not() {
        let expr = Parser::parse("not not a == 'x'").unwrap();
        assert!(matches!(expr, Expr::Not(inner) if matches!(*inner, Expr::Not(_))));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(
            Parser::parse(""),
            Err(ExprError::UnexpectedEnd { expected: "column name" })
        ));
        assert!(matches!(
            Parser::parse("age >="),
            Err(ExprError::UnexpectedEnd { expected: "literal" })
        ));
        assert!(matches!(
            Parser::parse("(age >= 1"),
            Err(ExprError::UnexpectedEnd { expected: "')'" })
        ));
        assert!(matches!(
            Parser::parse("age 18"),
            Err(ExprError::UnexpectedToken { expected: "comparison operator", .. })
        ));
        assert!(matches!(
            Parser::parse("18 < age"),
            Err(ExprError::UnexpectedToken { expected: "column name", .. })
        ));
        assert!(matches!(
            Parser::parse("a == 1 b == 2"),
            Err(ExprError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            Parser::parse("a == b"),
            Err(ExprError::UnexpectedToken { expected: "literal", .. })
        ));
    }

    #[test]
    fn test_error_fragment_points_at_token() {
        let err = Parser::parse("age >= 18 xyz").unwrap_err();
        assert_eq!(err.fragment(), Some("xyz"));
    }

    #[test]
    fn test_nesting_limit() {
        let at_limit = format!("{}a == 1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(Parser::parse(&at_limit).is_ok());

        let too_deep = format!("{}a == 1{}", "(".repeat(5000), ")".repeat(5000));
        assert!(matches!(
            Parser::parse(&too_deep),
            Err(ExprError::TooDeep { limit: MAX_DEPTH, offset: 64 })
        ));

        let nots = format!("{}a == 1", "not ".repeat(MAX_DEPTH + 1));
        assert!(matches!(
            Parser::parse(&nots),
            Err(ExprError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_token_limit() {
        // three tokens per comparison plus one connective between each
        let chain = vec!["a == 1"; 128].join(" or ");
        assert!(Parser::parse(&chain).is_ok());

        let chain = vec!["a == 1"; 129].join(" or ");
        assert!(matches!(
            Parser::parse(&chain),
            Err(ExprError::TooLong { tokens: 515, .. })
        ));

        let chain = vec!["a == 1"; 2000].join(" and ");
        assert_eq!(
            Parser::parse(&chain),
            Err(ExprError::TooLong {
                tokens: 7999,
                limit: MAX_TOKENS
            })
        );
    }
}
