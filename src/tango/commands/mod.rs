//! Business logic, one module per area. Every function takes the repository
//! explicitly and returns plain Rust values; none of them do terminal I/O.
//! Mutating functions save the documents they touched before returning.

use crate::error::{Result, TangoError};

pub mod config;
pub mod daily;
pub mod export;
pub mod import;
pub mod lists;
pub mod words;

/// Trimmed `value`, or a validation error naming `field` if nothing is left.
pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TangoError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}
