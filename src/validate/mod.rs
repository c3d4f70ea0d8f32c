//! Whitelist validation for incoming query requests.
//!
//! Everything here is a pure check over immutable input: identifier shape
//! rules in [`ident`], whole-request validation and the error taxonomy in
//! [`request`]. Nothing is mutated and the whitelists never change at
//! runtime.

mod ident;
mod request;

pub use ident::{is_valid_clause_token, is_valid_field_name, is_valid_table_name};
pub use request::{RequestValidator, ValidationError, validate};
