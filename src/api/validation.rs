//! Field-level checks applied to payloads before they reach a service

use super::error::ApiError;

pub fn not_blank(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{} must not be blank", field)));
    }
    Ok(())
}

/// A supplied optional string must not be blank; omitting it is fine.
pub fn not_blank_if_present(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    match value {
        Some(v) => not_blank(field, v),
        None => Ok(()),
    }
}

pub fn positive(field: &str, value: Option<i32>) -> Result<(), ApiError> {
    match value {
        Some(v) if v > 0 => Ok(()),
        _ => Err(ApiError::BadRequest(format!(
            "{} must be a positive integer",
            field
        ))),
    }
}

/// A supplied optional number must be positive; omitting it is fine.
pub fn positive_if_present(field: &str, value: Option<i32>) -> Result<(), ApiError> {
    match value {
        Some(_) => positive(field, value),
        None => Ok(()),
    }
}
