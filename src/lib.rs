// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! # pg-select - Validated single-table SELECT compiler for PostgreSQL
//!
//! Turns a structured query request - selected columns (optionally
//! aggregated), a source table, and a boolean filter tree - into a
//! PostgreSQL `SELECT` statement. Every identifier and operator is checked
//! against closed whitelists before any SQL is rendered, so malformed or
//! injectable input never reaches the database.
//!
//! Control flow is strictly validate-then-compile:
//!
//! ```
//! use pg_select::{QueryRequest, SelectField, compile, validate};
//!
//! let request = QueryRequest {
//!     select_fields: vec![
//!         SelectField::plain("id"),
//!         SelectField::aggregated("sum", "amount"),
//!     ],
//!     table_name: "orders".to_string(),
//!     filter: None,
//! };
//!
//! validate(&request).unwrap();
//! assert_eq!(
//!     compile(&request),
//!     r#"SELECT "id",SUM("amount") as "SUM(amount)" FROM "orders" "#
//! );
//! ```
//!
//! Requests usually arrive as JSON. [`QueryRequest::parse`] accepts the wire
//! format directly:
//!
//! ```
//! use pg_select::{QueryRequest, compile, validate};
//!
//! let request = QueryRequest::parse(r#"{
//!     "selectFields": [{"type": "count", "value": "*"}],
//!     "tableName": "users",
//!     "whereClause": {"type": "simple", "operator": "=", "value1": "status", "value2": "'active'"}
//! }"#).unwrap();
//!
//! validate(&request).unwrap();
//! assert_eq!(
//!     compile(&request),
//!     r#"SELECT COUNT(*) as "COUNT(*)" FROM "users"  WHERE ("status" = 'active')"#
//! );
//! ```
//!
//! ## Filter trees
//!
//! A `WHERE` clause is a tree of comparisons combined with `and` / `or`
//! groups. Comparison operands are either bare column identifiers or
//! single-quoted string literals; a leading `'` is what marks a literal.
//!
//! ```
//! use pg_select::{QueryRequest, SelectField, and, comparison, compile, validate};
//!
//! let request = QueryRequest {
//!     select_fields: vec![SelectField::plain("name")],
//!     table_name: "users".to_string(),
//!     filter: Some(and(vec![
//!         comparison("status", "=", "'active'"),
//!         comparison("age", ">=", "'18'"),
//!     ])),
//! };
//!
//! validate(&request).unwrap();
//! assert_eq!(
//!     compile(&request),
//!     r#"SELECT "name" FROM "users"  WHERE (("status" = 'active') AND ("age" >= '18'))"#
//! );
//! ```
//!
//! ## Validation contract
//!
//! [`validate`] is fail-fast: the first violation found anywhere in the
//! (possibly nested) request aborts validation and is the only one reported.
//! [`compile`] assumes a validated request - compiling an unvalidated
//! request with out-of-whitelist operators is a caller bug and panics on the
//! internal-invariant branch rather than producing unsafe SQL.

mod compile;
mod request;
mod validate;

pub use compile::compile;
pub use request::{
    Aggregation, CombineOp, Comparison, ComparisonOp, FilterNode, Group, ParseError, QueryRequest,
    SelectField, and, comparison, or,
};
pub use validate::{
    RequestValidator, ValidationError, is_valid_clause_token, is_valid_field_name,
    is_valid_table_name, validate,
};

/// Prelude module for convenient imports.
///
/// ```
/// use pg_select::prelude::*;
///
/// let request = QueryRequest {
///     select_fields: vec![SelectField::plain("id")],
///     table_name: "users".to_string(),
///     filter: None,
/// };
/// assert!(validate(&request).is_ok());
/// ```
pub mod prelude {
    pub use crate::{
        Aggregation, CombineOp, Comparison, ComparisonOp, FilterNode, Group, ParseError,
        QueryRequest, RequestValidator, SelectField, ValidationError, and, comparison, compile,
        or, validate,
    };
}


// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
