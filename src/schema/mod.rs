//! Schema inference for tabserve
//!
//! Assigns one [`InferredType`] per column using a fixed precedence:
//!
//! 1. Integer: whole numbers, no fraction or exponent
//! 2. Float: decimal numbers
//! 3. Boolean: `true`/`True`/`TRUE`/`false`/`False`/`FALSE`
//! 4. DateTime: ISO dates and date-times
//! 5. Text: fallback, and the type of an all-null column
//!
//! The same schema drives the introspection report and the type checking
//! of filter expressions.

mod inference;
mod types;

pub use inference::{
    convert_cell, parse_boolean, parse_datetime, parse_float, parse_integer, SchemaInferencer,
    FALSE_TOKENS, TRUE_TOKENS,
};
pub use types::{ColumnSchema, InferredType, Schema};
