use crate::{ConfigError, ConfigResult};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// A single schema violation found in raw input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path to the offending field, or `root`
    pub path: String,

    /// What was wrong with it
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every issue found while validating one input document
///
/// Non-empty by construction: [`validate`] only returns this when at least
/// one field failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    /// The individual issues, in key order
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Dotted paths of all failing fields
    pub fn paths(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.path.as_str()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .issues
            .iter()
            .map(|issue| format!("  - {}", issue))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}

/// Builds the schema shape from a fully-populated default instance
///
/// Sections serialize to objects and flags to booleans, so the serialized
/// defaults describe exactly which keys are known and what type each takes.
pub fn schema_shape<T: Serialize>(defaults: &T) -> ConfigResult<Value> {
    serde_json::to_value(defaults).map_err(|e| ConfigError::Schema(e.to_string()))
}

/// Validates a parsed document against a schema shape
///
/// Rules:
/// - the document root must be an object
/// - a present section must be an object (`null` is not absent)
/// - a present flag must be a boolean
/// - missing keys are fine, unknown keys are ignored
///
/// All violations are collected before returning.
pub fn validate(document: &Value, shape: &Value) -> Result<(), ValidationErrors> {
    let mut issues = Vec::new();

    match (document, shape) {
        (Value::Object(fields), Value::Object(known)) => {
            validate_section(&mut Vec::new(), fields, known, &mut issues);
        }
        (other, _) => issues.push(ValidationIssue {
            path: "root".to_string(),
            message: format!("expected object, received {}", kind_of(other)),
        }),
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { issues })
    }
}

fn validate_section<'a>(
    path: &mut Vec<&'a str>,
    fields: &Map<String, Value>,
    known: &'a Map<String, Value>,
    issues: &mut Vec<ValidationIssue>,
) {
    for (key, expected) in known {
        let Some(actual) = fields.get(key) else {
            continue;
        };

        path.push(key.as_str());
        match (expected, actual) {
            (Value::Object(child_known), Value::Object(child_fields)) => {
                validate_section(path, child_fields, child_known, issues);
            }
            (Value::Object(_), other) => issues.push(ValidationIssue {
                path: path.join("."),
                message: format!("expected object, received {}", kind_of(other)),
            }),
            (Value::Bool(_), Value::Bool(_)) => {}
            (Value::Bool(_), other) => issues.push(ValidationIssue {
                path: path.join("."),
                message: format!("expected boolean, received {}", kind_of(other)),
            }),
            // Flags and sections are the only node kinds a schema contains
            _ => {}
        }
        path.pop();
    }
}

/// Human-readable JSON type name of a value
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
