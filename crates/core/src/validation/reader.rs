//! Field readers over a raw JSON record.
//!
//! A [`FieldReader`] pulls typed values out of a JSON object one field at a
//! time. Each read either yields the normalized value or records a
//! [`FieldViolation`] and yields `None`, so a schema can read every field
//! and report all problems in one pass.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde_json::{Map, Value};
use validator::ValidateEmail;

use super::violation::{FieldViolation, ValidationErrors, ViolationKind};
use crate::status::ClosedSet;
use crate::types::{DbId, Timestamp};

/// Optional phone numbers must look like E.164 digits.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone pattern compiles"));

/// Phone input is read up to this length; the pattern decides validity.
const MAX_PHONE_INPUT_LEN: usize = 32;

/// Upper bound on email length (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Whether the record is a full create payload or a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Patch,
}

/// Whether a field must be present on create.
///
/// In [`Mode::Patch`] every field is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Need {
    Required,
    Optional,
}

/// Bounds for floating point fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberBound {
    /// Strictly greater than zero.
    Positive,
    /// Zero or more.
    NonNegative,
    /// Inclusive range.
    Between(f64, f64),
}

/// Temporal constraint on a date field relative to the validation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    Any,
    /// Not after now.
    Past,
    /// Strictly after now.
    Future,
}

pub struct FieldReader<'a> {
    data: &'a Map<String, Value>,
    prefix: String,
    mode: Mode,
    now: Timestamp,
    violations: Vec<FieldViolation>,
}

impl<'a> FieldReader<'a> {
    pub fn new(data: &'a Map<String, Value>, mode: Mode, now: Timestamp) -> Self {
        Self {
            data,
            prefix: String::new(),
            mode,
            now,
            violations: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The instant past/future checks are evaluated against.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Full path of a field, including any list prefix.
    pub fn path(&self, field: &str) -> String {
        format!("{}{}", self.prefix, field)
    }

    /// Record a violation against `field`.
    pub fn reject(&mut self, field: &str, kind: ViolationKind, message: impl Into<String>) {
        let field = self.path(field);
        self.violations.push(FieldViolation {
            field,
            message: message.into(),
            kind,
        });
    }

    /// Whether `field` already has a violation.
    pub fn has_violation(&self, field: &str) -> bool {
        let path = self.path(field);
        self.violations.iter().any(|v| v.field == path)
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Produce the value if nothing was rejected, otherwise every violation.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) if self.violations.is_empty() => Ok(value),
            _ => Err(ValidationErrors::new(self.violations)),
        }
    }

    /// Look up a field, treating `null` as absent.
    fn take(&mut self, field: &str, need: Need) -> Option<&'a Value> {
        let data = self.data;
        match data.get(field) {
            Some(Value::Null) | None => {
                if need == Need::Required && self.mode == Mode::Create {
                    self.reject(field, ViolationKind::Required, "is required");
                }
                None
            }
            Some(value) => Some(value),
        }
    }

    /// Non-empty string of at most `max` characters, trimmed.
    pub fn text(&mut self, field: &str, max: usize, need: Need) -> Option<String> {
        let value = self.take(field, need)?;
        let Some(raw) = value.as_str() else {
            self.reject(field, ViolationKind::Type, "must be a string");
            return None;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.reject(field, ViolationKind::Required, "must not be empty");
            return None;
        }
        if trimmed.chars().count() > max {
            self.reject(
                field,
                ViolationKind::TooLong,
                format!("must be at most {max} characters"),
            );
            return None;
        }
        Some(trimmed.to_string())
    }

    pub fn email(&mut self, field: &str, need: Need) -> Option<String> {
        let email = self.text(field, MAX_EMAIL_LEN, need)?;
        if !email.validate_email() {
            self.reject(field, ViolationKind::InvalidFormat, "must be a valid email address");
            return None;
        }
        Some(email)
    }

    /// Always optional.
    pub fn phone(&mut self, field: &str) -> Option<String> {
        let phone = self.text(field, MAX_PHONE_INPUT_LEN, Need::Optional)?;
        if !PHONE_PATTERN.is_match(&phone) {
            self.reject(field, ViolationKind::InvalidFormat, "must be a valid phone number");
            return None;
        }
        Some(phone)
    }

    /// Reference to another record.
    pub fn id(&mut self, field: &str, need: Need) -> Option<DbId> {
        self.integer(field, 1, DbId::MAX, need)
    }

    /// Whole number within `min..=max`.
    pub fn integer(&mut self, field: &str, min: i64, max: i64, need: Need) -> Option<i64> {
        let value = self.take(field, need)?;
        let Some(n) = as_integer(value) else {
            self.reject(field, ViolationKind::Type, "must be an integer");
            return None;
        };
        if n < min || n > max {
            self.reject(field, ViolationKind::OutOfRange, integer_range_message(min, max));
            return None;
        }
        Some(n)
    }

    pub fn number(&mut self, field: &str, bound: NumberBound, need: Need) -> Option<f64> {
        let value = self.take(field, need)?;
        let Some(n) = value.as_f64().filter(|n| n.is_finite()) else {
            self.reject(field, ViolationKind::Type, "must be a number");
            return None;
        };
        let (ok, message) = match bound {
            NumberBound::Positive => (n > 0.0, "must be greater than 0".to_string()),
            NumberBound::NonNegative => (n >= 0.0, "must not be negative".to_string()),
            NumberBound::Between(lo, hi) => {
                (n >= lo && n <= hi, format!("must be between {lo} and {hi}"))
            }
        };
        if !ok {
            self.reject(field, ViolationKind::OutOfRange, message);
            return None;
        }
        Some(n)
    }

    /// Member of a closed enumeration.
    pub fn choice<E: ClosedSet>(&mut self, field: &str, need: Need) -> Option<E> {
        let value = self.take(field, need)?;
        let parsed = value.as_str().and_then(E::parse);
        if parsed.is_none() {
            self.reject(
                field,
                ViolationKind::InvalidEnum,
                format!("must be one of: {}", E::expected()),
            );
        }
        parsed
    }

    /// Always optional.
    pub fn flag(&mut self, field: &str) -> Option<bool> {
        let value = self.take(field, Need::Optional)?;
        let flag = value.as_bool();
        if flag.is_none() {
            self.reject(field, ViolationKind::Type, "must be a boolean");
        }
        flag
    }

    /// RFC 3339 timestamp or `YYYY-MM-DD` calendar date (midnight UTC).
    pub fn date(&mut self, field: &str, when: When, need: Need) -> Option<Timestamp> {
        let value = self.take(field, need)?;
        let Some(at) = value.as_str().and_then(parse_instant) else {
            self.reject(field, ViolationKind::InvalidDate, "must be a valid date");
            return None;
        };
        match when {
            When::Past if at > self.now => {
                self.reject(field, ViolationKind::NotInPast, "must not be in the future");
                None
            }
            When::Future if at <= self.now => {
                self.reject(field, ViolationKind::NotInFuture, "must be in the future");
                None
            }
            _ => Some(at),
        }
    }

    /// Non-empty array of objects, each read with a nested reader.
    ///
    /// Nested violations are reported as `field[index].child`. Items are
    /// always read in create mode, even inside a patch.
    pub fn list<T>(
        &mut self,
        field: &str,
        need: Need,
        mut read: impl FnMut(&mut FieldReader<'a>) -> Option<T>,
    ) -> Option<Vec<T>> {
        let value = self.take(field, need)?;
        let Some(items) = value.as_array() else {
            self.reject(field, ViolationKind::Type, "must be an array");
            return None;
        };
        if items.is_empty() {
            self.reject(field, ViolationKind::Required, "must contain at least one item");
            return None;
        }

        let mut out = Vec::with_capacity(items.len());
        let mut complete = true;
        for (index, item) in items.iter().enumerate() {
            let item_field = format!("{field}[{index}]");
            let Some(object) = item.as_object() else {
                self.reject(&item_field, ViolationKind::Type, "must be an object");
                complete = false;
                continue;
            };
            let mut nested = FieldReader {
                data: object,
                prefix: format!("{}.", self.path(&item_field)),
                mode: Mode::Create,
                now: self.now,
                violations: Vec::new(),
            };
            let parsed = read(&mut nested);
            let clean = nested.is_clean();
            self.violations.append(&mut nested.violations);
            match parsed {
                Some(v) if clean => out.push(v),
                _ => complete = false,
            }
        }
        complete.then_some(out)
    }
}

/// Integral JSON numbers, including floats with no fractional part.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
        .map(|f| f as i64)
}

fn integer_range_message(min: i64, max: i64) -> String {
    match (min, max) {
        (1, i64::MAX) => "must be a positive integer".to_string(),
        (0, i64::MAX) => "must not be negative".to_string(),
        (min, i64::MAX) => format!("must be at least {min}"),
        (min, max) => format!("must be between {min} and {max}"),
    }
}

fn parse_instant(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
