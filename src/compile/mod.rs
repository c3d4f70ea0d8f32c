//! SQL compilation for validated query requests.
//!
//! `compile` is a pure function from request to SQL text. It assumes the
//! request already passed [`crate::validate`]; operator and aggregation
//! values outside the whitelists hit internal-invariant panic branches
//! rather than producing unsafe SQL.

mod filter;
mod select;

use crate::request::QueryRequest;

/// Compile a validated request into a PostgreSQL `SELECT` statement.
///
/// Output layout is fixed: the select list joined with `,`, then
/// `FROM "table" ` with a trailing space, then - only when a filter is
/// present - ` WHERE ` and the parenthesized filter rendering. No trailing
/// semicolon. Identifiers are double-quoted, string literals pass through
/// in their single quotes.
///
/// # Example
///
/// ```
/// use pg_select::{QueryRequest, SelectField, comparison, compile, validate};
///
/// let request = QueryRequest {
///     select_fields: vec![SelectField::aggregated("count", "*")],
///     table_name: "users".to_string(),
///     filter: Some(comparison("status", "=", "'active'")),
/// };
///
/// validate(&request).unwrap();
/// assert_eq!(
///     compile(&request),
///     r#"SELECT COUNT(*) as "COUNT(*)" FROM "users"  WHERE ("status" = 'active')"#
/// );
/// ```
#[must_use]
pub fn compile(request: &QueryRequest) -> String {
    let select_list = select::render_select_list(&request.select_fields);
    let mut sql = format!("SELECT {select_list} FROM \"{}\" ", request.table_name);

    if let Some(node) = &request.filter {
        sql.push_str(" WHERE ");
        sql.push_str(&filter::render_filter(node));
    }

    sql
}
