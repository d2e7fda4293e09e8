use crate::utils::error::{LookupError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> LookupError {
    LookupError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// A reference-site base: an http(s) URL that a model number can be appended
/// to, either as a path segment or as a query value.
pub fn validate_link_base(field_name: &str, base: &str) -> Result<()> {
    let url = Url::parse(base)
        .map_err(|e| invalid(field_name, base, format!("Invalid URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            base,
            format!("Links must use http or https, not {}", url.scheme()),
        ));
    }
    if url.fragment().is_some() {
        return Err(invalid(
            field_name,
            base,
            "A fragment would swallow the model number",
        ));
    }
    Ok(())
}

/// The batch report directory. It is created on demand, so it need not exist,
/// but it cannot name an existing regular file.
pub fn validate_output_dir(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "Output directory cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    if Path::new(path).is_file() {
        return Err(invalid(field_name, path, "Path is a file, not a directory"));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(invalid(
        field_name,
        value,
        format!("Unsupported value. Valid values: {}", allowed.join(", ")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_link_base() {
        let field = "links.base";
        assert!(validate_link_base(field, "https://www.partselect.com/ModelSearch.aspx").is_ok());
        assert!(validate_link_base(field, "http://parts.example.com/find?lang=en").is_ok());
        assert!(validate_link_base(field, "").is_err());
        assert!(validate_link_base(field, "partselect.com").is_err());
        assert!(validate_link_base(field, "ftp://parts.example.com").is_err());
        assert!(validate_link_base(field, "mailto:parts@example.com").is_err());
        assert!(validate_link_base(field, "https://parts.example.com/#search").is_err());
    }

    #[test]
    fn test_validate_output_dir() {
        assert!(validate_output_dir("output.path", "./output").is_ok());
        assert!(validate_output_dir("output.path", " ").is_err());
        assert!(validate_output_dir("output.path", "out\0put").is_err());

        let existing_file = NamedTempFile::new().unwrap();
        let err = validate_output_dir("output.path", &existing_file.path().to_string_lossy())
            .unwrap_err();
        assert!(err.to_string().contains("not a directory"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("links.label", "PartSelect").is_ok());
        assert!(validate_non_empty_string("links.label", "   ").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("output.formats", "csv", &["csv", "json"]).is_ok());
        let err = validate_one_of("output.formats", "tsv", &["csv", "json"]).unwrap_err();
        assert!(err.to_string().contains("csv, json"));
    }
}
