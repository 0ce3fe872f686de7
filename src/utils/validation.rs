use crate::utils::error::{ReconcileError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ReconcileError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReconcileError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Member numbers are five digits with an optional alpha or space suffix.
pub fn validate_member_number(field_name: &str, value: &str) -> Result<()> {
    let re = Regex::new(r"^\d{5}[A-Za-z ]?$").map_err(|e| ReconcileError::ConfigError {
        message: format!("invalid member number pattern: {}", e),
    })?;

    if !re.is_match(value) {
        return Err(ReconcileError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected five digits, optionally followed by a letter".to_string(),
        });
    }
    Ok(())
}

/// Path must exist and be a regular file.
pub fn validate_existing_file(field_name: &str, path: &Path) -> Result<PathBuf> {
    validate_existing(field_name, path, true)
}

/// Path must exist and be a directory.
pub fn validate_existing_dir(field_name: &str, path: &Path) -> Result<PathBuf> {
    validate_existing(field_name, path, false)
}

fn validate_existing(field_name: &str, path: &Path, is_file: bool) -> Result<PathBuf> {
    let invalid = |reason: &str| ReconcileError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: path.display().to_string(),
        reason: reason.to_string(),
    };

    if path.as_os_str().is_empty() {
        return Err(invalid("Path cannot be empty"));
    }
    if !path.exists() {
        return Err(invalid("Path does not exist"));
    }
    if is_file && !path.is_file() {
        return Err(invalid("Path is not a file"));
    }
    if !is_file && !path.is_dir() {
        return Err(invalid("Path is not a directory"));
    }

    Ok(path.to_path_buf())
}
