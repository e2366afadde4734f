//! Filter expression syntax tree
//!
//! Produced by the parser, untyped. The compiler resolves columns and
//! checks literal types against the schema.

use std::cmp::Ordering;
use std::fmt;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    /// Tests an ordering produced by comparing `column` with `literal`
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Literal as written, before type checking
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
}

impl Literal {
    /// Syntactic kind, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Integer(_) => "integer",
            Literal::Decimal(_) => "decimal",
            Literal::Boolean(_) => "boolean",
        }
    }
}

/// Byte range into the source expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Slices the source text covered by this span
    pub fn fragment<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or(source)
    }
}

/// Parsed boolean expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Comparison {
        column: String,
        op: CompareOp,
        literal: Literal,
        span: Span,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}
