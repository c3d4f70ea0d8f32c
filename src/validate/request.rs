//! Whole-request validation against the closed whitelists.
//!
//! Checks run in a fixed order - select fields, table name, then the filter
//! tree - and are fail-fast: the first violation found anywhere in the
//! (possibly nested) structure aborts validation and is the only one
//! reported. Every variant of [`ValidationError`] is a client-input error.

use std::fmt;

use super::ident::{is_valid_clause_token, is_valid_field_name, is_valid_table_name};
use crate::request::{
    Aggregation, CombineOp, Comparison, ComparisonOp, FilterNode, Group, QueryRequest, SelectField,
};

/// Default maximum filter-tree nesting depth.
const DEFAULT_MAX_DEPTH: usize = 64;

/// Validation configuration for incoming query requests.
///
/// The whitelists themselves are fixed at compile time; the only knob is the
/// filter-tree depth limit.
///
/// # Example
///
/// ```
/// use pg_select::{QueryRequest, RequestValidator, SelectField, comparison};
///
/// let request = QueryRequest {
///     select_fields: vec![SelectField::plain("id")],
///     table_name: "users".to_string(),
///     filter: Some(comparison("status", "=", "'active'")),
/// };
///
/// let validator = RequestValidator::new().max_depth(8);
/// assert!(validator.validate(&request).is_ok());
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RequestValidator {
    /// Maximum nesting depth for the filter tree.
    pub max_depth: usize,
}

impl RequestValidator {
    /// Create a validator with the default depth limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum filter-tree nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Validate a request.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, in check order: select
    /// fields, table name, filter tree.
    pub fn validate(&self, request: &QueryRequest) -> Result<(), ValidationError> {
        for field in &request.select_fields {
            validate_select_field(field)?;
        }

        validate_table_name(&request.table_name)?;

        match &request.filter {
            None => Ok(()),
            Some(node) => self.validate_node(node, 0),
        }
    }

    fn validate_node(&self, node: &FilterNode, depth: usize) -> Result<(), ValidationError> {
        if depth > self.max_depth {
            return Err(ValidationError::NestingTooDeep {
                max: self.max_depth,
                actual: depth,
            });
        }

        match node {
            FilterNode::Comparison(cmp) => validate_comparison(cmp),
            FilterNode::Group(group) => self.validate_group(group, depth),
        }
    }

    fn validate_group(&self, group: &Group, depth: usize) -> Result<(), ValidationError> {
        if CombineOp::from_name(&group.operator).is_none() {
            return Err(ValidationError::UnsupportedCombineOperator(
                group.operator.clone(),
            ));
        }

        if group.children.len() < 2 {
            return Err(ValidationError::TooFewConditions(group.children.len()));
        }

        for child in &group.children {
            self.validate_node(child, depth + 1)?;
        }

        Ok(())
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_select_field(field: &SelectField) -> Result<(), ValidationError> {
    if Aggregation::from_name(&field.aggregation).is_none() {
        return Err(ValidationError::UnsupportedAggregation(
            field.aggregation.clone(),
        ));
    }

    if field.column.is_empty() {
        return Err(ValidationError::EmptySelectField);
    }

    if !is_valid_field_name(&field.column) {
        return Err(ValidationError::InvalidSelectField(field.column.clone()));
    }

    Ok(())
}

fn validate_table_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyTableName);
    }

    if !is_valid_table_name(name) {
        return Err(ValidationError::InvalidTableName(name.to_string()));
    }

    Ok(())
}

fn validate_comparison(cmp: &Comparison) -> Result<(), ValidationError> {
    if ComparisonOp::from_symbol(&cmp.operator).is_none() {
        return Err(ValidationError::UnsupportedComparisonOperator(
            cmp.operator.clone(),
        ));
    }

    if cmp.left.is_empty() || cmp.right.is_empty() {
        return Err(ValidationError::EmptyClauseToken);
    }

    if !is_valid_clause_token(&cmp.left) {
        return Err(ValidationError::MalformedClauseToken(cmp.left.clone()));
    }

    if !is_valid_clause_token(&cmp.right) {
        return Err(ValidationError::MalformedClauseToken(cmp.right.clone()));
    }

    Ok(())
}

/// Validate a request with the default configuration.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate(request: &QueryRequest) -> Result<(), ValidationError> {
    RequestValidator::new().validate(request)
}

/// Validation failure. Every variant is a client-input error; none are
/// transient or retryable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// Aggregation name outside `none`/`avg`/`count`/`sum`.
    UnsupportedAggregation(String),
    /// A select field with an empty column.
    EmptySelectField,
    /// A select field that is neither an identifier nor `*`.
    InvalidSelectField(String),
    /// An empty table name.
    EmptyTableName,
    /// A table name that is not a bare identifier.
    InvalidTableName(String),
    /// Comparison operator outside the six relational operators.
    UnsupportedComparisonOperator(String),
    /// A comparison operand that is empty.
    EmptyClauseToken,
    /// A comparison operand that is neither an identifier nor a quoted
    /// literal.
    MalformedClauseToken(String),
    /// Combine operator outside `and`/`or`.
    UnsupportedCombineOperator(String),
    /// A group with fewer than two children.
    TooFewConditions(usize),
    /// Filter tree nesting exceeds the configured maximum.
    NestingTooDeep {
        /// The maximum allowed nesting depth.
        max: usize,
        /// The depth at which validation stopped.
        actual: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedAggregation(name) => {
                write!(f, "aggregation function '{name}' is not supported")
            },
            Self::EmptySelectField => {
                write!(f, "empty fields are not allowed in PostgreSQL")
            },
            Self::InvalidSelectField(field) => {
                write!(f, "field '{field}' is not a valid PostgreSQL field")
            },
            Self::EmptyTableName => {
                write!(f, "empty table names are not allowed in PostgreSQL")
            },
            Self::InvalidTableName(name) => {
                write!(f, "table name '{name}' is not a valid PostgreSQL table name")
            },
            Self::UnsupportedComparisonOperator(op) => {
                write!(f, "comparison operator '{op}' is not supported")
            },
            Self::EmptyClauseToken => {
                write!(f, "query clause should not be empty")
            },
            Self::MalformedClauseToken(token) => {
                write!(
                    f,
                    "query clause '{token}' is malformed, maybe you meant to use a literal"
                )
            },
            Self::UnsupportedCombineOperator(op) => {
                write!(f, "combining operator '{op}' is not supported")
            },
            Self::TooFewConditions(_) => {
                write!(f, "combination of conditions must contain at least 2 entries")
            },
            Self::NestingTooDeep { max, actual } => {
                write!(f, "filter nesting depth {actual} exceeds maximum {max}")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{and, comparison, or};

    fn request(
        select_fields: Vec<SelectField>,
        table_name: &str,
        filter: Option<FilterNode>,
    ) -> QueryRequest {
        QueryRequest {
            select_fields,
            table_name: table_name.to_string(),
            filter,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let req = request(
            vec![
                SelectField::plain("id"),
                SelectField::plain("*"),
                SelectField::aggregated("avg", "age"),
            ],
            "users",
            Some(and(vec![
                comparison("status", "=", "'active'"),
                comparison("age", ">=", "'18'"),
            ])),
        );
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_absent_filter_is_valid() {
        let req = request(vec![SelectField::plain("id")], "users", None);
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_empty_select_list_is_not_rejected() {
        // Pre-existing looseness, deliberately preserved: an empty select
        // list passes validation.
        let req = request(vec![], "users", None);
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_star_passes_for_any_aggregation() {
        // Also preserved looseness: `*` is not restricted to the plain
        // field case, so AVG(*) validates and fails only at the engine.
        let req = request(vec![SelectField::aggregated("avg", "*")], "users", None);
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_unsupported_aggregation() {
        let req = request(vec![SelectField::aggregated("max", "id")], "users", None);
        let err = validate(&req).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedAggregation("max".into()));
        assert_eq!(
            err.to_string(),
            "aggregation function 'max' is not supported"
        );
    }

    #[test]
    fn test_empty_and_malformed_select_field_are_distinct() {
        let empty = request(vec![SelectField::plain("")], "users", None);
        assert_eq!(
            validate(&empty).unwrap_err(),
            ValidationError::EmptySelectField
        );

        let malformed = request(vec![SelectField::plain("1abc")], "users", None);
        assert_eq!(
            validate(&malformed).unwrap_err(),
            ValidationError::InvalidSelectField("1abc".into())
        );
    }

    #[test]
    fn test_table_name_checks() {
        let empty = request(vec![SelectField::plain("id")], "", None);
        assert_eq!(validate(&empty).unwrap_err(), ValidationError::EmptyTableName);

        let invalid = request(vec![SelectField::plain("id")], "1abc", None);
        let err = validate(&invalid).unwrap_err();
        assert_eq!(err, ValidationError::InvalidTableName("1abc".into()));
        assert_eq!(
            err.to_string(),
            "table name '1abc' is not a valid PostgreSQL table name"
        );

        let star = request(vec![SelectField::plain("id")], "*", None);
        assert_eq!(
            validate(&star).unwrap_err(),
            ValidationError::InvalidTableName("*".into())
        );
    }

    #[test]
    fn test_unsupported_comparison_operator() {
        let req = request(
            vec![SelectField::plain("id")],
            "users",
            Some(comparison("a", "<>", "b")),
        );
        assert_eq!(
            validate(&req).unwrap_err(),
            ValidationError::UnsupportedComparisonOperator("<>".into())
        );
    }

    #[test]
    fn test_operand_checks_name_the_offender() {
        let empty = request(
            vec![SelectField::plain("id")],
            "users",
            Some(comparison("", "=", "'x'")),
        );
        assert_eq!(
            validate(&empty).unwrap_err(),
            ValidationError::EmptyClauseToken
        );

        let left = request(
            vec![SelectField::plain("id")],
            "users",
            Some(comparison("bad token", "=", "'x'")),
        );
        assert_eq!(
            validate(&left).unwrap_err(),
            ValidationError::MalformedClauseToken("bad token".into())
        );

        let right = request(
            vec![SelectField::plain("id")],
            "users",
            Some(comparison("status", "=", "'unterminated")),
        );
        assert_eq!(
            validate(&right).unwrap_err(),
            ValidationError::MalformedClauseToken("'unterminated".into())
        );
    }

    #[test]
    fn test_unsupported_combine_operator() {
        let req = request(
            vec![SelectField::plain("id")],
            "users",
            Some(FilterNode::Group(Group {
                operator: "xor".to_string(),
                children: vec![
                    comparison("a", "=", "b"),
                    comparison("c", "=", "d"),
                ],
            })),
        );
        assert_eq!(
            validate(&req).unwrap_err(),
            ValidationError::UnsupportedCombineOperator("xor".into())
        );
    }

    #[test]
    fn test_group_needs_at_least_two_children() {
        let one = request(
            vec![SelectField::plain("id")],
            "users",
            Some(and(vec![comparison("a", "=", "b")])),
        );
        let err = validate(&one).unwrap_err();
        assert_eq!(err, ValidationError::TooFewConditions(1));
        assert_eq!(
            err.to_string(),
            "combination of conditions must contain at least 2 entries"
        );

        let zero = request(vec![SelectField::plain("id")], "users", Some(or(vec![])));
        assert_eq!(
            validate(&zero).unwrap_err(),
            ValidationError::TooFewConditions(0)
        );
    }

    #[test]
    fn test_nested_child_failure_short_circuits() {
        // The bad operand is buried two levels deep; it is still the error
        // that comes back, and the later (also invalid) sibling is never
        // reached.
        let req = request(
            vec![SelectField::plain("id")],
            "users",
            Some(and(vec![
                or(vec![
                    comparison("a", "=", "b"),
                    comparison("not valid", "=", "'x'"),
                ]),
                comparison("later", "<>", "'also bad'"),
            ])),
        );
        assert_eq!(
            validate(&req).unwrap_err(),
            ValidationError::MalformedClauseToken("not valid".into())
        );
    }

    #[test]
    fn test_check_order_select_then_table_then_filter() {
        let req = request(
            vec![SelectField::aggregated("median", "id")],
            "not a table",
            Some(comparison("a", "<>", "b")),
        );
        assert!(matches!(
            validate(&req).unwrap_err(),
            ValidationError::UnsupportedAggregation(_)
        ));

        let req = request(
            vec![SelectField::plain("id")],
            "not a table",
            Some(comparison("a", "<>", "b")),
        );
        assert!(matches!(
            validate(&req).unwrap_err(),
            ValidationError::InvalidTableName(_)
        ));
    }

    #[test]
    fn test_depth_limit() {
        // Chain of nested groups deeper than the limit.
        let mut node = and(vec![
            comparison("a", "=", "b"),
            comparison("c", "=", "d"),
        ]);
        for _ in 0..4 {
            node = and(vec![node, comparison("e", "=", "f")]);
        }

        let req = request(vec![SelectField::plain("id")], "users", Some(node));
        assert!(RequestValidator::new().validate(&req).is_ok());

        let err = RequestValidator::new()
            .max_depth(3)
            .validate(&req)
            .unwrap_err();
        assert!(matches!(err, ValidationError::NestingTooDeep { max: 3, .. }));
    }

    #[test]
    fn test_error_display_messages() {
        assert_eq!(
            ValidationError::InvalidSelectField("user.id".into()).to_string(),
            "field 'user.id' is not a valid PostgreSQL field"
        );
        assert_eq!(
            ValidationError::UnsupportedComparisonOperator("<>".into()).to_string(),
            "comparison operator '<>' is not supported"
        );
        assert_eq!(
            ValidationError::MalformedClauseToken("a b".into()).to_string(),
            "query clause 'a b' is malformed, maybe you meant to use a literal"
        );
        assert_eq!(
            ValidationError::UnsupportedCombineOperator("xor".into()).to_string(),
            "combining operator 'xor' is not supported"
        );
        assert_eq!(
            ValidationError::NestingTooDeep { max: 3, actual: 4 }.to_string(),
            "filter nesting depth 4 exceeds maximum 3"
        );
    }
}
