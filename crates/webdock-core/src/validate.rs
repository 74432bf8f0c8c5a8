//! Input validation for web app names and URLs.
//!
//! Nothing in here touches the network or the filesystem.

use crate::error::{Result, WebdockError};
use std::fmt;
use url::Url;

/// A URL that passed [`validate_url`].
///
/// Keeps the text the user typed so it can be persisted verbatim; `url`
/// normalises (e.g. appends a trailing `/` to bare origins) and the entry file
/// should show what the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUrl {
    raw: String,
    parsed: Url,
}

impl ValidUrl {
    /// The URL exactly as supplied (trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed form.
    pub fn url(&self) -> &Url {
        &self.parsed
    }
}

impl fmt::Display for ValidUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Validate a user-supplied web app URL.
pub fn validate_url(input: &str) -> Result<ValidUrl> {
    validate_url_field("url", input)
}

/// Validate a URL, reporting failures against `field`.
pub(crate) fn validate_url_field(field: &str, input: &str) -> Result<ValidUrl> {
    let raw = input.trim();

    if raw.is_empty() {
        return Err(WebdockError::validation(field, "URL must not be empty"));
    }

    if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(WebdockError::validation(
            field,
            format!("URL must not contain whitespace: {:?}", raw),
        ));
    }

    if let Some(pos) = malformed_percent_escape(raw) {
        return Err(WebdockError::validation(
            field,
            format!("malformed percent-encoding at byte {} in {}", pos, raw),
        ));
    }

    let parsed = Url::parse(raw).map_err(|e| {
        WebdockError::validation(field, format!("'{}' is not a valid URL: {}", raw, e))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(WebdockError::validation(
            field,
            format!("unsupported scheme '{}' (expected http or https)", parsed.scheme()),
        ));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => {
            return Err(WebdockError::validation(
                field,
                format!("'{}' has no host", raw),
            ))
        }
    }

    Ok(ValidUrl {
        raw: raw.to_string(),
        parsed,
    })
}

/// Position of the first `%` that is not followed by two hex digits.
fn malformed_percent_escape(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    bytes.iter().enumerate().find_map(|(i, &b)| {
        if b != b'%' {
            return None;
        }
        let well_formed = bytes.len() > i + 2
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        (!well_formed).then_some(i)
    })
}

/// Validate a web app name, returning the trimmed form.
pub fn validate_name(input: &str) -> Result<String> {
    let name = input.trim();

    if name.is_empty() {
        return Err(WebdockError::validation("name", "name must not be empty"));
    }

    if name.chars().any(char::is_control) {
        return Err(WebdockError::validation(
            "name",
            "name must not contain control characters or line breaks",
        ));
    }

    if name == "." || name == ".." {
        return Err(WebdockError::validation(
            "name",
            format!("'{}' is not a usable name", name),
        ));
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        let url = validate_url("https://open.spotify.com").unwrap();
        assert_eq!(url.as_str(), "https://open.spotify.com");
        assert_eq!(url.url().host_str(), Some("open.spotify.com"));

        let url = validate_url("  http://localhost:8080/app?x=%20y ").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/app?x=%20y");
    }

    #[test]
    fn test_rejects_missing_scheme() {
        let err = validate_url("not-a-url").unwrap_err();
        assert!(matches!(err, WebdockError::Validation { ref field, .. } if field == "url"));

        assert!(validate_url("example.com/path").is_err());
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert!(validate_url("").is_err());
        assert!(validate_url("   ").is_err());
        assert!(validate_url("https://example.com/a b").is_err());
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("file:///etc/passwd").is_err());
        assert!(validate_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_rejects_bad_percent_encoding() {
        assert!(validate_url("https://example.com/%zz").is_err());
        assert!(validate_url("https://example.com/%4").is_err());
        assert!(validate_url("https://example.com/100%").is_err());
        assert!(validate_url("https://example.com/%4F").is_ok());
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Spotify ").unwrap(), "Spotify");
        assert_eq!(validate_name("My Mail").unwrap(), "My Mail");
        assert!(validate_name("").is_err());
        assert!(validate_name("two\nlines").is_err());
        assert!(validate_name("..").is_err());
    }
}
