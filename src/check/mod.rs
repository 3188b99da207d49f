//! Response Validator
//!
//! Compares a response's status code, content-type header, and body fields
//! against expected literal or previously-captured values. The first
//! mismatch wins; there is no partial or soft-fail mode.

use crate::client::ApiResponse;
use crate::data::PostRecord;
use serde_json::Value;
use thiserror::Error;

/// Validation errors, each naming expected vs actual.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Expected status {expected}, got {actual}")]
    Status { expected: u16, actual: u16 },

    #[error("Expected content type '{expected}', got '{actual}'")]
    ContentType { expected: String, actual: String },

    #[error("Field '{field}' mismatch: expected {expected}, got {actual}")]
    Field {
        field: String,
        expected: Value,
        actual: Value,
    },

    #[error("Missing field '{field}' in response body")]
    MissingField { field: String },

    #[error("Expected {expected} items, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("Expected a JSON array")]
    NotAnArray,
}

/// Assert the response status code.
pub fn expect_status(response: &ApiResponse, expected: u16) -> Result<(), CheckError> {
    if response.status != expected {
        return Err(CheckError::Status {
            expected,
            actual: response.status,
        });
    }
    Ok(())
}

/// Assert the exact `Content-Type` header value.
pub fn expect_content_type(response: &ApiResponse, expected: &str) -> Result<(), CheckError> {
    let actual = response.content_type().unwrap_or_default();
    if actual != expected {
        return Err(CheckError::ContentType {
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Assert that a JSON array body has exactly `expected` items.
pub fn expect_len(body: &Value, expected: usize) -> Result<(), CheckError> {
    let items = body.as_array().ok_or(CheckError::NotAnArray)?;
    if items.len() != expected {
        return Err(CheckError::Length {
            expected,
            actual: items.len(),
        });
    }
    Ok(())
}

/// Assert a single body field against an expected value.
pub fn expect_field(actual: &Value, field: &str, expected: &Value) -> Result<(), CheckError> {
    match actual.get(field) {
        None => Err(CheckError::MissingField {
            field: field.to_string(),
        }),
        Some(value) if value == expected => Ok(()),
        Some(value) => Err(CheckError::Field {
            field: field.to_string(),
            expected: expected.clone(),
            actual: value.clone(),
        }),
    }
}

/// Field-by-field equality on the fixed key set {id, body, title}.
///
/// Scenarios extend coverage to other keys (firstname, lastname, ...) with
/// [`expect_field`].
pub fn check_post(actual: &Value, expected: &PostRecord) -> Result<(), CheckError> {
    check_optional(actual, "id", expected.id.map(Value::from))?;
    check_optional(actual, "body", expected.body.clone().map(Value::from))?;
    check_optional(actual, "title", expected.title.clone().map(Value::from))?;
    Ok(())
}

fn check_optional(actual: &Value, field: &str, expected: Option<Value>) -> Result<(), CheckError> {
    match (actual.get(field), expected) {
        (None, None) => Ok(()),
        (Some(value), Some(expected)) if *value == expected => Ok(()),
        (None, Some(_)) => Err(CheckError::MissingField {
            field: field.to_string(),
        }),
        (Some(value), expected) => Err(CheckError::Field {
            field: field.to_string(),
            expected: expected.unwrap_or(Value::Null),
            actual: value.clone(),
        }),
    }
}
