//! Short code generation and validation utilities.
//!
//! Two strategies produce codes for new mappings:
//!
//! - **Sequential**: base-62 encoding of the store-assigned id
//!   (digits, then lowercase, then uppercase; most significant digit first)
//! - **Random**: fixed-length alphanumeric string from a CSPRNG
//!
//! User-supplied slugs are checked with [`validate_slug`].

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Base-62 digit alphabet. The position of a symbol is its digit value.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Default length of random codes.
pub const DEFAULT_CODE_LENGTH: usize = 10;

/// Default number of insert attempts for random codes before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Longest accepted custom slug.
pub const MAX_SLUG_LENGTH: usize = 64;

/// Compiled regex for custom slug validation.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// How codes are assigned to mappings registered without a custom slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeStrategy {
    /// Base-62 encoding of the mapping id. Needs the id before the code exists.
    Sequential,
    /// Random alphanumeric code of the given length.
    Random { length: usize },
}

impl CodeStrategy {
    /// Produces a code for the mapping with the given id.
    ///
    /// The random strategy ignores `id`.
    pub fn generate(&self, id: u64) -> String {
        match self {
            CodeStrategy::Sequential => encode_base62(id),
            CodeStrategy::Random { length } => generate_random_code(*length),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CodeStrategy::Sequential => "sequential",
            CodeStrategy::Random { .. } => "random",
        }
    }
}

impl Default for CodeStrategy {
    fn default() -> Self {
        CodeStrategy::Random {
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl fmt::Display for CodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeStrategy::Sequential => f.write_str("sequential"),
            CodeStrategy::Random { length } => write!(f, "random({length})"),
        }
    }
}

/// Parses `sequential` or `random` (default length), case-insensitively.
impl FromStr for CodeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(CodeStrategy::Sequential),
            "random" => Ok(CodeStrategy::default()),
            other => Err(format!(
                "unknown code strategy '{other}', expected 'sequential' or 'random'"
            )),
        }
    }
}

/// Encodes `n` in base 62, most significant digit first.
///
/// `encode_base62(0)` is the empty string. Store ids start at 1, so callers
/// treat an empty result as an invalid id rather than a code.
///
/// # Examples
///
/// ```
/// use quicklink::utils::code_generator::{decode_base62, encode_base62};
///
/// assert_eq!(encode_base62(61), "Z");
/// assert_eq!(encode_base62(62), "10");
/// assert_eq!(decode_base62("10"), Some(62));
/// ```
pub fn encode_base62(mut n: u64) -> String {
    let mut digits = Vec::with_capacity(11);

    while n > 0 {
        digits.push(BASE62_ALPHABET[(n % 62) as usize] as char);
        n /= 62;
    }

    digits.iter().rev().collect()
}

/// Decodes a base-62 string produced by [`encode_base62`].
///
/// Returns `None` for symbols outside the alphabet or values above `u64::MAX`.
/// The empty string decodes to 0, mirroring the encoder.
pub fn decode_base62(code: &str) -> Option<u64> {
    code.bytes().try_fold(0u64, |acc, byte| {
        let digit = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'z' => byte - b'a' + 10,
            b'A'..=b'Z' => byte - b'A' + 36,
            _ => return None,
        };
        acc.checked_mul(62)?.checked_add(u64::from(digit))
    })
}

/// Generates a random alphanumeric code of `length` characters.
///
/// Symbols are drawn uniformly from `[A-Za-z0-9]` using the thread-local
/// CSPRNG, which is seeded from the operating system.
pub fn generate_random_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Validates a user-provided custom slug.
///
/// # Rules
///
/// - Must not be empty
/// - At most [`MAX_SLUG_LENGTH`] characters
/// - ASCII letters and digits only (`^[A-Za-z0-9]+$`)
///
/// # Errors
///
/// Returns [`AppError::InvalidSlug`] if any rule is violated.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() {
        return Err(AppError::invalid_slug(slug, "slug must not be empty"));
    }

    if slug.len() > MAX_SLUG_LENGTH {
        return Err(AppError::invalid_slug(
            slug,
            format!("slug must be at most {MAX_SLUG_LENGTH} characters"),
        ));
    }

    if !SLUG_REGEX.is_match(slug) {
        return Err(AppError::invalid_slug(
            slug,
            "slug can only contain ASCII letters and digits",
        ));
    }

    Ok(())
}
