use crate::domain::model::StudentId;
use crate::utils::error::{LookupError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Coerces the free-text prompt value into a [`StudentId`].
pub fn parse_student_id(input: &str) -> Result<StudentId> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LookupError::InvalidInput {
            input: input.to_string(),
            reason: "ERP ID cannot be empty".to_string(),
        });
    }

    trimmed
        .parse::<i64>()
        .map(StudentId)
        .map_err(|e| LookupError::InvalidInput {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_suffix(field_name: &str, suffix: &str) -> Result<()> {
    if !suffix.starts_with('.') || suffix.len() < 2 {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: suffix.to_string(),
            reason: "Suffix must look like '.csv'".to_string(),
        });
    }
    Ok(())
}

pub fn validate_boundary_chars(field_name: &str, chars: &[char]) -> Result<()> {
    if let Some(c) = chars.iter().find(|c| c.is_alphanumeric()) {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: c.to_string(),
            reason: "Boundary characters must not be letters or digits".to_string(),
        });
    }
    Ok(())
}
