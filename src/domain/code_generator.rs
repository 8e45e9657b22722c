//! Short code generation and custom code validation.
//!
//! Generated and user-chosen codes share one alphabet: the 62 case-sensitive
//! ASCII letters and digits. A handful of names are reserved because they are
//! top-level routes of the service.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use serde_json::json;

use crate::error::AppError;

/// Characters a short code may contain.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Longest code the registry column (and the validator) accepts.
pub const MAX_CODE_LENGTH: usize = 16;

/// Codes that can never be stored, whatever the registry holds.
pub const RESERVED_CODES: &[&str] = &["files", "api", "health"];

static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[A-Za-z0-9]{{1,{MAX_CODE_LENGTH}}}$")).expect("static code pattern")
});

/// Source of candidate short codes.
///
/// The allocator takes this as a trait object so tests can force collisions.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a candidate of exactly `length` characters from [`ALPHABET`].
    fn generate(&self, length: usize) -> String;
}

/// Uniform random generator backed by the thread-local, OS-seeded RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        let mut rng = rand::rng();
        (0..length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// Returns true if `code` is one of [`RESERVED_CODES`].
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Checks a user-supplied code against the syntax and reservation rules.
///
/// Surrounding whitespace is trimmed first and the trimmed code is returned.
/// Registry uniqueness is not checked here.
///
/// # Rules
///
/// 1. Not empty after trimming
/// 2. 1-16 characters from `[A-Za-z0-9]`
/// 3. Not a reserved name
///
/// # Errors
///
/// Returns [`AppError::Validation`] for the first rule that fails.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_custom_code(" promo2025 ").unwrap(), "promo2025");
/// assert!(validate_custom_code("my-code!").is_err());
/// assert!(validate_custom_code("files").is_err());
/// ```
pub fn validate_custom_code(code: &str) -> Result<&str, AppError> {
    let code = code.trim();

    if code.is_empty() {
        return Err(AppError::bad_request(
            "Custom code must not be empty",
            json!({}),
        ));
    }

    if !CODE_PATTERN.is_match(code) {
        return Err(AppError::bad_request(
            format!("Custom code must be 1-{MAX_CODE_LENGTH} latin letters or digits"),
            json!({ "code": code }),
        ));
    }

    if is_reserved(code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(code)
}
