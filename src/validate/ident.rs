//! Identifier and clause-token shape rules for PostgreSQL.
//!
//! These are the whitelist shapes every name in a request must match before
//! it is ever interpolated into SQL. Identifier quoting downstream uses
//! double quotes and literals use single quotes; these rules guarantee a
//! bare identifier contains neither.

/// `^[a-z_][a-z0-9_]*$`, case-insensitive: ASCII letter or underscore, then
/// ASCII alphanumerics or underscores.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Valid select-field name: a bare identifier, or exactly `*`.
///
/// # Example
///
/// ```
/// use pg_select::is_valid_field_name;
///
/// assert!(is_valid_field_name("user_id"));
/// assert!(is_valid_field_name("*"));
/// assert!(!is_valid_field_name("user.id"));
/// assert!(!is_valid_field_name("1abc"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_field_name(s: &str) -> bool {
    s == "*" || is_identifier(s)
}

/// Valid table name: a bare identifier, with no `*` exception.
#[inline]
#[must_use]
pub fn is_valid_table_name(s: &str) -> bool {
    is_identifier(s)
}

/// Valid comparison operand: either a single-quoted string literal with no
/// embedded quotes, or a bare identifier.
///
/// # Example
///
/// ```
/// use pg_select::is_valid_clause_token;
///
/// assert!(is_valid_clause_token("status"));
/// assert!(is_valid_clause_token("'active'"));
/// assert!(is_valid_clause_token("''"));
/// assert!(!is_valid_clause_token("'unterminated"));
/// assert!(!is_valid_clause_token("'it''s'"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_clause_token(s: &str) -> bool {
    match s.strip_prefix('\'') {
        Some(rest) => match rest.strip_suffix('\'') {
            Some(body) => !body.contains('\''),
            None => false,
        },
        None => is_identifier(s),
    }
}
