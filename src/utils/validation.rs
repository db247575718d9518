use crate::utils::error::{MatchError, Result};
use std::fmt::Display;
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Display, reason: impl Into<String>) -> MatchError {
    MatchError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Notification endpoints must be absolute http(s) URLs.
pub fn validate_service_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| invalid(field, value, format!("Invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(field, value, format!("Unsupported URL scheme: {}", scheme))),
    }
}

/// A roster or preference file path ending in `extension`.
pub fn validate_data_file(field: &str, value: &str, extension: &str) -> Result<()> {
    if value.trim().is_empty() || value.contains('\0') {
        return Err(invalid(field, value, "Path cannot be empty"));
    }

    match Path::new(value).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case(extension) => Ok(()),
        _ => Err(invalid(field, value, format!("Expected a .{} file", extension))),
    }
}

pub fn validate_at_least(field: &str, value: usize, min: usize) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("Value must be at least {}", min)));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + Display + Copy>(field: &str, value: T, min: T, max: T) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(field, value, format!("Value must be between {} and {}", min, max)));
    }
    Ok(())
}

pub fn validate_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be blank"));
    }
    Ok(())
}
