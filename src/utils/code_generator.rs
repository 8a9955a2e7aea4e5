//! Guest code generation and normalization.
//!
//! Guest codes look like `FM2026-004`: a prefix, a hyphen and a zero-padded
//! sequence number. New codes continue the highest sequence number seen so
//! far. Generation is single-writer: two admins creating guests at the same
//! moment can compute the same code, in which case the API rejects the
//! second one as a duplicate.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Default code prefix.
pub const DEFAULT_PREFIX: &str = "FM2026";

/// Allowed characters for a manually entered code, after normalization.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]+(-[A-Z0-9]+)*$").expect("valid code regex"));

/// Normalizes a code the way guests and admins type it: trimmed, uppercase.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Extracts the sequence number of a code.
///
/// Uses the second hyphen-separated segment; anything that is not a number,
/// or does not fit in a `u64`, counts as 0.
pub fn sequence_number(code: &str) -> u64 {
    code.split('-')
        .nth(1)
        .and_then(|n| n.trim().parse().ok())
        .unwrap_or(0)
}

/// Produces the code following the highest sequence number in `codes`.
///
/// # Examples
///
/// ```ignore
/// let next = next_sequential_code("FM2026", ["FM2026-001", "FM2026-003"]);
/// assert_eq!(next, "FM2026-004");
/// ```
pub fn next_sequential_code<I, S>(prefix: &str, codes: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let last = codes
        .into_iter()
        .map(|code| sequence_number(code.as_ref()))
        .max()
        .unwrap_or(0);

    format!("{}-{:03}", prefix, last.saturating_add(1))
}

/// Validates an admin-entered code (already normalized).
///
/// # Rules
///
/// - Not empty, at most 50 characters
/// - Uppercase letters, digits and single hyphens between them
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > 50 {
        return Err(AppError::bad_request(
            "Guest code must be 1-50 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Guest code can only contain letters, digits and single hyphens",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
