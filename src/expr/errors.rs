//! Filter expression error types

use thiserror::Error;

use crate::schema::InferredType;

/// Result type for expression compilation
pub type ExprResult<T> = Result<T, ExprError>;

/// Why a filter expression failed to compile.
///
/// Most variants carry the offending fragment of the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// Character that starts no token
    #[error("unexpected character '{fragment}' at offset {offset}")]
    UnexpectedChar { fragment: String, offset: usize },

    /// String or backtick identifier without its closing quote
    #[error("unterminated literal starting at offset {offset}: {fragment}")]
    Unterminated { fragment: String, offset: usize },

    /// Token where the grammar expects something else
    #[error("expected {expected} but found '{fragment}' at offset {offset}")]
    UnexpectedToken {
        expected: &'static str,
        fragment: String,
        offset: usize,
    },

    /// Input ended while the grammar still expects a token
    #[error("expected {expected} but the expression ended")]
    UnexpectedEnd { expected: &'static str },

    /// Comparison against a column the dataset does not have
    #[error("unknown column '{column}' in '{fragment}'")]
    UnknownColumn { column: String, fragment: String },

    /// Literal type cannot be compared with the column's inferred type
    #[error("cannot compare {column_type} column '{column}' with {literal_kind} literal in '{fragment}'")]
    TypeMismatch {
        column: String,
        column_type: InferredType,
        literal_kind: &'static str,
        fragment: String,
    },

    /// Text literal compared against a DateTime column that is not a date
    #[error("invalid date-time literal in '{fragment}'")]
    InvalidDateTime { fragment: String },

    /// Parentheses or `not` nested deeper than the parser allows
    #[error("expression nests deeper than {limit} levels at offset {offset}")]
    TooDeep { limit: usize, offset: usize },

    /// More tokens than a single filter may contain
    #[error("expression has {tokens} tokens, the limit is {limit}")]
    TooLong { tokens: usize, limit: usize },
}

impl ExprError {
    /// Returns the offending fragment, if one is attached
    pub fn fragment(&self) -> Option<&str> {
        match self {
            ExprError::UnexpectedChar { fragment, .. }
            | ExprError::Unterminated { fragment, .. }
            | ExprError::UnexpectedToken { fragment, .. }
            | ExprError::UnknownColumn { fragment, .. }
            | ExprError::TypeMismatch { fragment, .. }
            | ExprError::InvalidDateTime { fragment } => Some(fragment),
            ExprError::UnexpectedEnd { .. }
            | ExprError::TooDeep { .. }
            | ExprError::TooLong { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_is_exposed() {
        let err = ExprError::UnknownColumn {
            column: "x".into(),
            fragment: "x == 1".into(),
        };
        assert_eq!(err.fragment(), Some("x == 1"));
        assert!(err.to_string().contains("unknown column 'x'"));
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = ExprError::TypeMismatch {
            column: "age".into(),
            column_type: InferredType::Integer,
            literal_kind: "string",
            fragment: "age == 'x'".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot compare Integer column 'age' with string literal in 'age == 'x''"
        );
    }
}
