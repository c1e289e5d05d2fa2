//! Input validation for session and idea fields.
//!
//! Lengths count characters, not bytes. Required fields reject empty and
//! whitespace-only values; accepted values are stored exactly as given.

use brainstorm_core::error::{BrainstormError, Result};
use brainstorm_core::idea::{MAX_CATEGORY_LEN, MAX_CONTENT_LEN};
use brainstorm_core::session::{DEFAULT_CREATOR, MAX_CREATOR_LEN, MAX_TOPIC_LEN};

fn required(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BrainstormError::validation(format!("{} is required", field)));
    }
    within_limit(field, value, max)
}

fn within_limit(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(BrainstormError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

pub fn topic(value: &str) -> Result<()> {
    required("Topic", value, MAX_TOPIC_LEN)
}

pub fn content(value: &str) -> Result<()> {
    required("Content", value, MAX_CONTENT_LEN)
}

pub fn category(value: &str) -> Result<()> {
    required("Category", value, MAX_CATEGORY_LEN)
}

/// Resolves the creator name: absent or blank becomes [`DEFAULT_CREATOR`].
pub fn creator(value: Option<String>) -> Result<String> {
    match value {
        Some(name) if !name.trim().is_empty() => {
            within_limit("CreatedBy", &name, MAX_CREATOR_LEN)?;
            Ok(name)
        }
        _ => Ok(DEFAULT_CREATOR.to_string()),
    }
}
