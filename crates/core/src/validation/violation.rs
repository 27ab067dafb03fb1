//! Field violation types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a field-level violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Required,
    Type,
    TooLong,
    InvalidEnum,
    OutOfRange,
    InvalidFormat,
    InvalidDate,
    NotInPast,
    NotInFuture,
    CrossField,
}

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dotted path into the input, e.g. `warrantyExpiry` or `items[1].quantity`.
    pub field: String,
    pub message: String,
    pub kind: ViolationKind,
}

/// Every violation found while validating one record, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    pub fn single(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self::new(vec![FieldViolation {
            field: field.into(),
            message: message.into(),
            kind,
        }])
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations reported against one field path.
    pub fn on<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> + 'a {
        self.violations.iter().filter(move |v| v.field == field)
    }

    /// Distinct field paths that failed, in discovery order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for v in &self.violations {
            if !fields.contains(&v.field.as_str()) {
                fields.push(&v.field);
            }
        }
        fields
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            if v.field.is_empty() {
                f.write_str(&v.message)?;
            } else {
                write!(f, "{} {}", v.field, v.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
