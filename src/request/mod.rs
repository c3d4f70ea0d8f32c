//! Request data model: select fields, table name, and the filter tree.
//!
//! `QueryRequest` models an untrusted wire payload, so aggregation and
//! operator fields stay raw strings exactly as received. The closed sets
//! they must belong to are the [`Aggregation`], [`ComparisonOp`], and
//! [`CombineOp`] enums; the validator checks membership, and the compiler
//! dispatches on the same enums with an internal-invariant branch for
//! anything the validator would have rejected.

mod parse;

pub use parse::ParseError;

/// Supported aggregation functions for a select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Raw column, no aggregation.
    None,
    /// `AVG(column)`
    Avg,
    /// `COUNT(column)`
    Count,
    /// `SUM(column)`
    Sum,
}

impl Aggregation {
    /// Parse from the wire name (`"none"`, `"avg"`, `"count"`, `"sum"`).
    ///
    /// # Example
    ///
    /// ```
    /// use pg_select::Aggregation;
    ///
    /// assert_eq!(Aggregation::from_name("sum"), Some(Aggregation::Sum));
    /// assert_eq!(Aggregation::from_name("max"), None);
    /// ```
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "avg" => Some(Self::Avg),
            "count" => Some(Self::Count),
            "sum" => Some(Self::Sum),
            _ => None,
        }
    }

    /// The uppercase SQL function name, or `None` for a raw column.
    #[must_use]
    pub const fn sql_function(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Avg => Some("AVG"),
            Self::Count => Some("COUNT"),
            Self::Sum => Some("SUM"),
        }
    }
}

/// Supported comparison operators in a simple filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Lte,
    /// `>=`
    Gte,
    /// `=`
    Eq,
    /// `!=`
    Ne,
}

impl ComparisonOp {
    /// Parse from the wire symbol.
    #[must_use]
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "<" => Some(Self::Lt),
            ">" => Some(Self::Gt),
            "<=" => Some(Self::Lte),
            ">=" => Some(Self::Gte),
            "=" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            _ => None,
        }
    }

    /// The SQL symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::Eq => "=",
            Self::Ne => "!=",
        }
    }
}

/// Boolean operators combining sibling filter nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOp {
    /// All children must match.
    And,
    /// At least one child must match.
    Or,
}

impl CombineOp {
    /// Parse from the wire name (`"and"`, `"or"`).
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }

    /// The uppercase SQL keyword.
    #[must_use]
    pub const fn sql_keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// One entry in the select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    /// Raw aggregation name as received (`"none"`, `"avg"`, `"count"`, `"sum"`).
    pub aggregation: String,
    /// Column name, or the literal `*`.
    pub column: String,
}

impl SelectField {
    /// A raw column with no aggregation.
    pub fn plain(column: impl Into<String>) -> Self {
        Self {
            aggregation: "none".to_string(),
            column: column.into(),
        }
    }

    /// An aggregated column, e.g. `SelectField::aggregated("count", "*")`.
    pub fn aggregated(aggregation: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            aggregation: aggregation.into(),
            column: column.into(),
        }
    }
}

/// One complete query intent: what to select, from where, and an optional
/// filter tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Selected columns, rendered in order.
    pub select_fields: Vec<SelectField>,
    /// Source table name.
    pub table_name: String,
    /// Optional `WHERE` filter tree; `None` means no `WHERE` clause.
    pub filter: Option<FilterNode>,
}

/// A node in the filter tree: either a single comparison or a boolean group
/// of child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterNode {
    /// A single comparison between two operands.
    Comparison(Comparison),
    /// A boolean combination of two or more child nodes.
    Group(Group),
}

/// A comparison between two operands. Each operand is either a bare column
/// identifier or a single-quoted string literal; a leading `'` marks a
/// literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Raw comparison operator as received (`"<"`, `">"`, `"<="`, `">="`,
    /// `"="`, `"!="`).
    pub operator: String,
    /// Left operand.
    pub left: String,
    /// Right operand.
    pub right: String,
}

/// A boolean group. Owns its children exclusively; a valid group has at
/// least two of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Raw combine operator as received (`"and"`, `"or"`).
    pub operator: String,
    /// Child nodes, joined in order.
    pub children: Vec<FilterNode>,
}

/// Build a comparison node: `comparison("status", "=", "'active'")`.
pub fn comparison(
    left: impl Into<String>,
    operator: impl Into<String>,
    right: impl Into<String>,
) -> FilterNode {
    FilterNode::Comparison(Comparison {
        operator: operator.into(),
        left: left.into(),
        right: right.into(),
    })
}

/// Build an `and` group from child nodes.
#[must_use]
pub fn and(children: Vec<FilterNode>) -> FilterNode {
    FilterNode::Group(Group {
        operator: "and".to_string(),
        children,
    })
}

/// Build an `or` group from child nodes.
#[must_use]
pub fn or(children: Vec<FilterNode>) -> FilterNode {
    FilterNode::Group(Group {
        operator: "or".to_string(),
        children,
    })
}
