//! Type checking and evaluation of filter expressions
//!
//! Compilation resolves every column against the schema and converts each
//! literal into the typed operand it will be compared with. A compiled
//! predicate is a pure function of the row it is evaluated on.

use crate::dataset::{Row, Value};
use crate::schema::{parse_datetime, InferredType, Schema};

use super::ast::{CompareOp, Expr, Literal, Span};
use super::errors::{ExprError, ExprResult};
use super::parser::Parser;

/// Typed, column-resolved expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        position: usize,
        op: CompareOp,
        operand: Value,
    },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    /// Evaluates against one row.
    ///
    /// A comparison whose cell is Null is false for every operator.
    pub fn evaluate(&self, row: &Row) -> bool {
        match self {
            Predicate::Compare {
                position,
                op,
                operand,
            } => row
                .get(*position)
                .partial_compare(operand)
                .map_or(false, |ordering| op.holds(ordering)),
            Predicate::And(left, right) => left.evaluate(row) && right.evaluate(row),
            Predicate::Or(left, right) => left.evaluate(row) || right.evaluate(row),
            Predicate::Not(inner) => !inner.evaluate(row),
        }
    }
}

/// A parsed and type-checked filter expression
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPredicate {
    source: String,
    root: Predicate,
}

impl CompiledPredicate {
    /// Parses `source` and checks it against `schema`
    pub fn compile(source: &str, schema: &Schema) -> ExprResult<Self> {
        let expr = Parser::parse(source)?;
        let root = Compiler { source, schema }.lower(&expr)?;
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    pub fn evaluate(&self, row: &Row) -> bool {
        self.root.evaluate(row)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Predicate {
        &self.root
    }
}

struct Compiler<'a> {
    source: &'a str,
    schema: &'a Schema,
}

impl Compiler<'_> {
    fn lower(&self, expr: &Expr) -> ExprResult<Predicate> {
        match expr {
            Expr::Comparison {
                column,
                op,
                literal,
                span,
            } => self.lower_comparison(column, *op, literal, *span),
            Expr::And(left, right) => Ok(Predicate::And(
                Box::new(self.lower(left)?),
                Box::new(self.lower(right)?),
            )),
            Expr::Or(left, right) => Ok(Predicate::Or(
                Box::new(self.lower(left)?),
                Box::new(self.lower(right)?),
            )),
            Expr::Not(inner) => Ok(Predicate::Not(Box::new(self.lower(inner)?))),
        }
    }

    fn lower_comparison(
        &self,
        column: &str,
        op: CompareOp,
        literal: &Literal,
        span: Span,
    ) -> ExprResult<Predicate> {
        let fragment = || span.fragment(self.source).to_string();

        let column_schema =
            self.schema
                .column(column)
                .ok_or_else(|| ExprError::UnknownColumn {
                    column: column.to_string(),
                    fragment: fragment(),
                })?;

        let mismatch = || ExprError::TypeMismatch {
            column: column.to_string(),
            column_type: column_schema.inferred_type,
            literal_kind: literal.kind(),
            fragment: fragment(),
        };

        let operand = match (column_schema.inferred_type, literal) {
            (ty, Literal::Integer(i)) if ty.is_numeric() => Value::Integer(*i),
            (ty, Literal::Decimal(d)) if ty.is_numeric() => Value::Float(*d),
            (InferredType::Text, Literal::Str(s)) => Value::Text(s.clone()),
            (InferredType::DateTime, Literal::Str(s)) => parse_datetime(s)
                .map(Value::DateTime)
                .ok_or_else(|| ExprError::InvalidDateTime {
                    fragment: fragment(),
                })?,
            (InferredType::Boolean, Literal::Boolean(b)) => Value::Boolean(*b),
            _ => return Err(mismatch()),
        };

        Ok(Predicate::Compare {
            position: column_schema.position,
            op,
            operand,
        })
    }
}
