//! Select-list rendering.

use crate::request::{Aggregation, SelectField};

/// Render the select list in order, joined with `,`.
pub(super) fn render_select_list(fields: &[SelectField]) -> String {
    fields
        .iter()
        .map(render_field)
        .collect::<Vec<_>>()
        .join(",")
}

/// Render one select entry. The column is identifier-quoted first (`*`
/// stays bare), then wrapped in the aggregate function if there is one.
fn render_field(field: &SelectField) -> String {
    let column = if field.column == "*" {
        "*".to_string()
    } else {
        format!("\"{}\"", field.column)
    };

    match Aggregation::from_name(&field.aggregation) {
        Some(agg) => match agg.sql_function() {
            None => column,
            Some(func) => render_aggregate(func, &column),
        },
        // Compiling an unvalidated request is a caller bug, not a user
        // error; validation already excluded every other name.
        None => unreachable!(
            "aggregation '{}' escaped validation",
            field.aggregation
        ),
    }
}

/// `FUNC("col") as "FUNC(col)"` - the alias strips embedded double quotes
/// so it stays one syntactically valid quoted identifier.
fn render_aggregate(func: &str, column: &str) -> String {
    let alias = column.replace('"', "");
    format!("{func}({column}) as \"{func}({alias})\"")
}
