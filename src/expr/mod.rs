//! Filter expression language
//!
//! A filter is a boolean expression over `column op literal` comparisons
//! joined by `and`, `or`, `not` and parentheses. Operators are `==`, `!=`,
//! `<`, `<=`, `>`, `>=`; literals are quoted strings, integers, decimals
//! and `true`/`false`. No arithmetic, function calls or regex.
//!
//! # Type rules
//!
//! | Literal | Column types |
//! |---|---|
//! | integer, decimal | Integer, Float (promoted to Float when mixed) |
//! | string | Text, DateTime (ISO literal) |
//! | boolean | Boolean |
//!
//! Compilation fails on any syntax error, unknown column or type mismatch,
//! and on filters past the parser's token or nesting limits.

mod ast;
mod compile;
mod errors;
mod lexer;
mod parser;

pub use ast::{CompareOp, Expr, Literal, Span};
pub use compile::{CompiledPredicate, Predicate};
pub use errors::{ExprError, ExprResult};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{Parser, MAX_DEPTH, MAX_TOKENS};
