use crate::utils::error::{FuncError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.is_empty() {
        return Err(FuncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(FuncError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FuncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FuncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Azure container naming rules: 3-63 chars of lowercase letters, digits
/// and hyphens, starting and ending with a letter or digit, no `--`.
pub fn validate_container_name(field_name: &str, name: &str) -> Result<()> {
    let invalid = |reason: &str| FuncError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: name.to_string(),
        reason: reason.to_string(),
    };

    if name.len() < 3 || name.len() > 63 {
        return Err(invalid("Container name must be between 3 and 63 characters"));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(invalid(
            "Container name can only contain lowercase letters, numbers, and hyphens",
        ));
    }

    if name.starts_with('-') || name.ends_with('-') {
        return Err(invalid("Container name cannot start or end with a hyphen"));
    }

    if name.contains("--") {
        return Err(invalid("Container name cannot contain consecutive hyphens"));
    }

    Ok(())
}

pub fn validate_blob_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    if name.chars().count() > 1024 {
        return Err(FuncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Blob name cannot exceed 1024 characters".to_string(),
        });
    }

    if name.contains('\0') {
        return Err(FuncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Blob name contains null bytes".to_string(),
        });
    }

    Ok(())
}
