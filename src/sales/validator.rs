//! Field validation for sales payloads
//!
//! Two rule sets:
//! - required (create, full replace): every field present and valid
//! - optional (partial update): each present field valid, absent fields skipped
//!
//! Every violation is collected before returning. Validation does not touch
//! the store; callers mutate only after `Ok`.
//!
//! Sanitizing happens before the emptiness check: names are trimmed and then
//! HTML-escaped, dates are trimmed.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use super::errors::{FieldViolation, SalesError, SalesResult};
use super::record::{SalesFields, SalesPatch, BUYER_NAME, ITEM_NAME, TRANSACTION_DATE};

const INVALID_DATE: &str = "invalid date format (YYYY-MM-DD)";
const INVALID_VALUE: &str = "invalid value";

/// Local date-time forms; `%.f` also matches when the fraction is absent
const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// How a single field was supplied
enum Supplied {
    Absent,
    Text(String),
    Unsupported,
}

/// Validates a payload against the required rule set.
///
/// # Errors
///
/// Returns `SalesError::Validation` carrying every violation found.
pub fn validate_fields(body: &Map<String, Value>) -> SalesResult<SalesFields> {
    let mut violations = Vec::new();

    let buyer_name = required_name(body, BUYER_NAME, "buyer name is required", &mut violations);
    let item_name = required_name(body, ITEM_NAME, "item name is required", &mut violations);
    let transaction_date = required_date(body, &mut violations);

    if !violations.is_empty() {
        return Err(SalesError::Validation(violations));
    }

    Ok(SalesFields {
        buyer_name,
        item_name,
        transaction_date,
    })
}

/// Validates a payload against the optional rule set.
///
/// A field counts as supplied when its key is present in the body, even if
/// its value is `null` or empty; such values fail the field's rule instead
/// of being skipped.
pub fn validate_patch(body: &Map<String, Value>) -> SalesResult<SalesPatch> {
    let mut violations = Vec::new();

    let buyer_name = optional_name(body, BUYER_NAME, "buyer name cannot be empty", &mut violations);
    let item_name = optional_name(body, ITEM_NAME, "item name cannot be empty", &mut violations);
    let transaction_date = optional_date(body, &mut violations);

    if !violations.is_empty() {
        return Err(SalesError::Validation(violations));
    }

    Ok(SalesPatch {
        buyer_name,
        item_name,
        transaction_date,
    })
}

fn supplied(body: &Map<String, Value>, field: &str) -> Supplied {
    match body.get(field) {
        None => Supplied::Absent,
        Some(Value::Null) => Supplied::Text(String::new()),
        Some(Value::String(s)) => Supplied::Text(s.clone()),
        Some(Value::Number(n)) => Supplied::Text(n.to_string()),
        Some(Value::Bool(b)) => Supplied::Text(b.to_string()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => Supplied::Unsupported,
    }
}

fn required_name(
    body: &Map<String, Value>,
    field: &str,
    empty_msg: &str,
    violations: &mut Vec<FieldViolation>,
) -> String {
    match supplied(body, field) {
        Supplied::Unsupported => {
            violations.push(FieldViolation::new(field, "", INVALID_VALUE));
            String::new()
        }
        Supplied::Absent => {
            violations.push(FieldViolation::new(field, "", empty_msg));
            String::new()
        }
        Supplied::Text(raw) => check_name(field, &raw, empty_msg, violations),
    }
}

fn optional_name(
    body: &Map<String, Value>,
    field: &str,
    empty_msg: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match supplied(body, field) {
        Supplied::Absent => None,
        Supplied::Unsupported => {
            violations.push(FieldViolation::new(field, "", INVALID_VALUE));
            None
        }
        Supplied::Text(raw) => Some(check_name(field, &raw, empty_msg, violations)),
    }
}

fn check_name(
    field: &str,
    raw: &str,
    empty_msg: &str,
    violations: &mut Vec<FieldViolation>,
) -> String {
    let sanitized = escape_html(raw.trim());
    if sanitized.is_empty() {
        violations.push(FieldViolation::new(field, "", empty_msg));
    }
    sanitized
}

fn required_date(body: &Map<String, Value>, violations: &mut Vec<FieldViolation>) -> String {
    let raw = match supplied(body, TRANSACTION_DATE) {
        Supplied::Unsupported => {
            violations.push(FieldViolation::new(TRANSACTION_DATE, "", INVALID_VALUE));
            return String::new();
        }
        Supplied::Absent => String::new(),
        Supplied::Text(raw) => raw,
    };

    let trimmed = raw.trim().to_string();
    if trimmed.is_empty() {
        violations.push(FieldViolation::new(
            TRANSACTION_DATE,
            "",
            "transaction date is required",
        ));
    }
    if !is_iso8601_date(&trimmed) {
        violations.push(FieldViolation::new(TRANSACTION_DATE, trimmed.clone(), INVALID_DATE));
    }
    trimmed
}

fn optional_date(body: &Map<String, Value>, violations: &mut Vec<FieldViolation>) -> Option<String> {
    match supplied(body, TRANSACTION_DATE) {
        Supplied::Absent => None,
        Supplied::Unsupported => {
            violations.push(FieldViolation::new(TRANSACTION_DATE, "", INVALID_VALUE));
            None
        }
        Supplied::Text(raw) => {
            let trimmed = raw.trim().to_string();
            if !is_iso8601_date(&trimmed) {
                violations.push(FieldViolation::new(
                    TRANSACTION_DATE,
                    trimmed.clone(),
                    INVALID_DATE,
                ));
            }
            Some(trimmed)
        }
    }
}

/// Escapes the characters that are significant in HTML.
pub fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '/' => output.push_str("&#x2F;"),
            '\\' => output.push_str("&#x5C;"),
            '`' => output.push_str("&#96;"),
            c => output.push(c),
        }
    }
    output
}

/// Accepts a calendar date (`YYYY-MM-DD`), or that date followed by `T` and
/// a time of day with an optional fraction and an optional offset.
pub fn is_iso8601_date(input: &str) -> bool {
    if is_calendar_date(input) {
        return true;
    }

    // chrono skips whitespace before numeric fields
    if input.len() <= 11 || !input.is_char_boundary(10) || input.contains(char::is_whitespace) {
        return false;
    }

    let (date, time) = input.split_at(10);
    if !is_calendar_date(date) || !time.starts_with('T') {
        return false;
    }

    DateTime::parse_from_rfc3339(input).is_ok()
        || LOCAL_DATE_TIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(input, format).is_ok())
}

fn is_calendar_date(input: &str) -> bool {
    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    // chrono accepts single-digit months and days, so the shape is checked first
    let digits_only = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    digits_only && NaiveDate::parse_from_str(input, "%Y-%m-%d").is_ok()
}
