//! Recursive `WHERE` clause rendering over the filter tree.

use crate::request::{CombineOp, Comparison, ComparisonOp, FilterNode, Group};

/// Render a filter node recursively.
pub(super) fn render_filter(node: &FilterNode) -> String {
    match node {
        FilterNode::Comparison(cmp) => render_comparison(cmp),
        FilterNode::Group(group) => render_group(group),
    }
}

/// `(left OP right)` with each operand rendered through [`render_operand`].
fn render_comparison(cmp: &Comparison) -> String {
    let operator = match ComparisonOp::from_symbol(&cmp.operator) {
        Some(op) => op.symbol(),
        None => unreachable!("comparison operator '{}' escaped validation", cmp.operator),
    };

    format!(
        "({} {} {})",
        render_operand(&cmp.left),
        operator,
        render_operand(&cmp.right)
    )
}

/// Children joined with the uppercased combine keyword, wrapped in one pair
/// of parens.
fn render_group(group: &Group) -> String {
    let keyword = match CombineOp::from_name(&group.operator) {
        Some(op) => op.sql_keyword(),
        None => unreachable!("combining operator '{}' escaped validation", group.operator),
    };

    let separator = format!(" {keyword} ");
    let joined = group
        .children
        .iter()
        .map(render_filter)
        .collect::<Vec<_>>()
        .join(&separator);

    format!("({joined})")
}

/// Literal-vs-identifier disambiguation is purely syntactic: a leading
/// single quote marks an already-quoted string literal and passes through
/// unchanged; anything else is double-quoted as a column identifier. This
/// is the only place that rule lives.
fn render_operand(operand: &str) -> String {
    if operand.starts_with('\'') {
        operand.to_string()
    } else {
        format!("\"{operand}\"")
    }
}
