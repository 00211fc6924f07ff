//! Target URL validation.
//!
//! An accepted URL is absolute, has a non-empty host and contains no control
//! characters. It is stored as the caller wrote it (minus surrounding
//! whitespace) when that text is plain visible ASCII; anything else is stored
//! in the parser's serialized form. Either way the stored value is a valid
//! `Location` header.

use url::Url;

/// Reasons a target URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL must not contain control characters")]
    ControlCharacter,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates that `input` is a well-formed absolute URL and returns the
/// text to store.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for blank input,
/// [`UrlValidationError::ControlCharacter`] for embedded control characters
/// (the parser would silently drop or escape them),
/// [`UrlValidationError::InvalidFormat`] when parsing fails (including
/// relative references such as `not-a-url`), and
/// [`UrlValidationError::MissingHost`] for host-less URLs like `mailto:`.
///
/// # Examples
///
/// ```
/// use quicklink::utils::url_validator::validate_url;
///
/// assert_eq!(validate_url(" https://example.com ").unwrap(), "https://example.com");
/// assert_eq!(validate_url("https://example.com/ü").unwrap(), "https://example.com/%C3%BC");
/// assert!(validate_url("not-a-url").is_err());
/// assert!(validate_url("https://example.com/a\nb").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if !url.host_str().is_some_and(|host| !host.is_empty()) {
        return Err(UrlValidationError::MissingHost);
    }

    if trimmed.bytes().all(|b| b.is_ascii_graphic()) {
        Ok(trimmed.to_string())
    } else {
        Ok(url.into())
    }
}
