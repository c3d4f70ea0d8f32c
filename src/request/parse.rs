//! Runtime JSON parsing for query requests.
//!
//! The wire format mirrors what a query-builder frontend posts:
//!
//! ```json
//! {
//!     "selectFields": [{"type": "count", "value": "*"}],
//!     "tableName": "users",
//!     "whereClause": {
//!         "type": "complex",
//!         "operator": "and",
//!         "operations": [
//!             {"type": "simple", "operator": "=", "value1": "status", "value2": "'active'"},
//!             {"type": "simple", "operator": ">=", "value1": "age", "value2": "'18'"}
//!         ]
//!     }
//! }
//! ```
//!
//! Parsing is shape-only: unknown operators and aggregation names parse
//! fine and are rejected by validation, so the validation error can name
//! the offending value.

use super::{Comparison, FilterNode, Group, QueryRequest, SelectField};
use miniserde::json::{Object, Value as JsonValue};
use std::fmt;

/// Error type for JSON request parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// Invalid JSON syntax or encoding.
    InvalidJson,
    /// Expected a JSON object but got something else.
    ExpectedObject,
    /// Expected a JSON array but got something else.
    ExpectedArray,
    /// Expected a JSON string but got something else.
    ExpectedString(&'static str),
    /// A required key is missing.
    MissingField(&'static str),
    /// A filter node `type` tag other than `simple` or `complex`.
    UnknownNodeType(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson => write!(f, "invalid JSON syntax or encoding"),
            Self::ExpectedObject => write!(f, "expected a JSON object"),
            Self::ExpectedArray => write!(f, "expected a JSON array"),
            Self::ExpectedString(key) => write!(f, "expected a string for '{key}'"),
            Self::MissingField(key) => write!(f, "missing required field '{key}'"),
            Self::UnknownNodeType(tag) => {
                write!(f, "unknown where-clause node type '{tag}'")
            },
        }
    }
}

impl std::error::Error for ParseError {}

impl QueryRequest {
    /// Parse a query request from a JSON string.
    ///
    /// # Example
    ///
    /// ```
    /// use pg_select::QueryRequest;
    ///
    /// let request = QueryRequest::parse(r#"{
    ///     "selectFields": [{"type": "none", "value": "id"}],
    ///     "tableName": "users"
    /// }"#).unwrap();
    /// assert!(request.filter.is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the JSON is invalid or the wrong shape.
    pub fn parse(json_str: &str) -> Result<Self, ParseError> {
        let json: JsonValue =
            miniserde::json::from_str(json_str).map_err(|_| ParseError::InvalidJson)?;
        Self::from_json(&json)
    }

    /// Parse a query request from JSON bytes.
    ///
    /// Convenience for raw request bodies.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the bytes are not valid UTF-8 or valid JSON.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let s = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidJson)?;
        Self::parse(s)
    }

    /// Parse a query request from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the JSON structure is invalid.
    pub fn from_json(json: &JsonValue) -> Result<Self, ParseError> {
        let obj = as_object(json)?;

        let select_fields = match obj.get("selectFields") {
            Some(JsonValue::Array(arr)) => arr
                .iter()
                .map(parse_select_field)
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(ParseError::ExpectedArray),
            None => return Err(ParseError::MissingField("selectFields")),
        };

        let table_name = required_string(obj, "tableName")?;

        // Absent and null are both "no filter".
        let filter = match obj.get("whereClause") {
            None | Some(JsonValue::Null) => None,
            Some(node) => Some(parse_filter_node(node)?),
        };

        Ok(Self {
            select_fields,
            table_name,
            filter,
        })
    }
}

fn parse_select_field(json: &JsonValue) -> Result<SelectField, ParseError> {
    let obj = as_object(json)?;
    Ok(SelectField {
        aggregation: required_string(obj, "type")?,
        column: required_string(obj, "value")?,
    })
}

fn parse_filter_node(json: &JsonValue) -> Result<FilterNode, ParseError> {
    let obj = as_object(json)?;
    let node_type = required_string(obj, "type")?;

    match node_type.as_str() {
        "simple" => Ok(FilterNode::Comparison(Comparison {
            operator: required_string(obj, "operator")?,
            left: required_string(obj, "value1")?,
            right: required_string(obj, "value2")?,
        })),
        "complex" => {
            let children = match obj.get("operations") {
                Some(JsonValue::Array(arr)) => arr
                    .iter()
                    .map(parse_filter_node)
                    .collect::<Result<Vec<_>, _>>()?,
                Some(_) => return Err(ParseError::ExpectedArray),
                None => return Err(ParseError::MissingField("operations")),
            };
            Ok(FilterNode::Group(Group {
                operator: required_string(obj, "operator")?,
                children,
            }))
        },
        _ => Err(ParseError::UnknownNodeType(node_type)),
    }
}

fn as_object(json: &JsonValue) -> Result<&Object, ParseError> {
    match json {
        JsonValue::Object(obj) => Ok(obj),
        _ => Err(ParseError::ExpectedObject),
    }
}

fn required_string(obj: &Object, key: &'static str) -> Result<String, ParseError> {
    match obj.get(key) {
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(_) => Err(ParseError::ExpectedString(key)),
        None => Err(ParseError::MissingField(key)),
    }
}
