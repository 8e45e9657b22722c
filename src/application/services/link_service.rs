//! Short link creation (allocation or custom code) and resolution.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::code_generator::{
    CodeGenerator, MAX_CODE_LENGTH, RandomCodeGenerator, is_reserved, validate_custom_code,
};
use crate::domain::entities::{Insertion, NewShortLink, ShortLink};
use crate::domain::repositories::LinkRegistry;
use crate::error::AppError;

/// Longest original URL that may be stored.
pub const ORIGINAL_MAX_LENGTH: usize = 2048;

/// Tuning for generated code allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationSettings {
    /// Length of the first round of candidates.
    pub code_length: usize,
    /// Candidates tried per length before growing by one.
    pub max_attempts: usize,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            code_length: 6,
            max_attempts: 10,
        }
    }
}

/// Service for creating and resolving short links.
///
/// Every write goes through [`LinkRegistry::insert_if_absent`], so the
/// registry's own uniqueness constraint decides collisions for generated and
/// custom codes alike.
pub struct LinkService {
    registry: Arc<dyn LinkRegistry>,
    generator: Arc<dyn CodeGenerator>,
    settings: AllocationSettings,
}

impl LinkService {
    /// Creates a service with the random generator and default settings.
    pub fn new(registry: Arc<dyn LinkRegistry>) -> Self {
        Self::with_generator(
            registry,
            Arc::new(RandomCodeGenerator),
            AllocationSettings::default(),
        )
    }

    pub fn with_generator(
        registry: Arc<dyn LinkRegistry>,
        generator: Arc<dyn CodeGenerator>,
        settings: AllocationSettings,
    ) -> Self {
        Self {
            registry,
            generator,
            settings,
        }
    }

    /// Creates a short link, allocating a code unless `custom_code` is given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `original` is empty, too long or not an absolute URL
    /// - `custom_code` breaks the syntax or reservation rules
    ///
    /// Returns [`AppError::Conflict`] if `custom_code` is already taken.
    /// A taken custom code is never replaced by a generated one.
    pub async fn create_short_link(
        &self,
        original: &str,
        custom_code: Option<&str>,
    ) -> Result<ShortLink, AppError> {
        let original = validate_original(original)?;

        match custom_code {
            Some(code) => self.create_with_custom_code(original, code).await,
            None => self.allocate(original).await,
        }
    }

    /// Stores `original` under a user-chosen code.
    ///
    /// The registry pre-check only short-circuits the obvious case; a
    /// concurrent insert that wins the race is still reported as a conflict
    /// by the insert itself.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed or reserved codes and
    /// [`AppError::Conflict`] when the code is taken.
    pub async fn create_with_custom_code(
        &self,
        original: &str,
        custom_code: &str,
    ) -> Result<ShortLink, AppError> {
        let code = validate_custom_code(custom_code)?;

        if self.registry.exists(code).await? {
            return Err(code_taken(code));
        }

        match self
            .registry
            .insert_if_absent(NewShortLink::new(original, code))
            .await?
        {
            Insertion::Inserted(link) => {
                metrics::counter!("cutlink_links_created_total").increment(1);
                Ok(link)
            }
            Insertion::Taken => Err(code_taken(code)),
        }
    }

    /// Mints a fresh code for `original` and stores the record.
    ///
    /// Tries `max_attempts` random candidates at the current length, then
    /// grows the length by one and starts over. Growth stops at
    /// [`MAX_CODE_LENGTH`]; exhausting that round fails the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors or when the code space
    /// is exhausted up to [`MAX_CODE_LENGTH`].
    pub async fn allocate(&self, original: &str) -> Result<ShortLink, AppError> {
        let mut length = self.settings.code_length;
        let mut attempt = 0;

        loop {
            if attempt == self.settings.max_attempts {
                if length >= MAX_CODE_LENGTH {
                    error!(
                        length,
                        attempts = self.settings.max_attempts,
                        "Short code space exhausted"
                    );
                    return Err(AppError::internal(
                        "Failed to allocate a unique short code",
                        json!({ "reason": "Too many collisions", "max_length": MAX_CODE_LENGTH }),
                    ));
                }

                length += 1;
                attempt = 0;
                info!(length, "Allocation round exhausted, growing code length");
            }

            attempt += 1;
            let candidate = self.generator.generate(length);

            if is_reserved(&candidate) || self.registry.exists(&candidate).await? {
                record_collision(&candidate, length, attempt);
                continue;
            }

            match self
                .registry
                .insert_if_absent(NewShortLink::new(original, candidate.as_str()))
                .await?
            {
                Insertion::Inserted(link) => {
                    metrics::counter!("cutlink_links_created_total").increment(1);
                    return Ok(link);
                }
                Insertion::Taken => record_collision(&candidate, length, attempt),
            }
        }
    }

    /// Looks up the record for `code`.
    ///
    /// Exact match only: no trimming, no case folding.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, AppError> {
        self.registry
            .get(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Number of stored links.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.registry.count().await
    }

    /// Builds the fully-qualified short URL from a public root and a code.
    pub fn short_url(&self, root: &str, code: &str) -> String {
        format!("{}/{}", root.trim_end_matches('/'), code)
    }
}

/// Validates and trims an original URL before it is stored.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the URL is empty, longer than
/// [`ORIGINAL_MAX_LENGTH`] characters, or not an absolute URL.
pub fn validate_original(original: &str) -> Result<&str, AppError> {
    let original = original.trim();

    if original.is_empty() {
        return Err(AppError::bad_request("URL is required", json!({})));
    }

    let length = original.chars().count();
    if length > ORIGINAL_MAX_LENGTH {
        return Err(AppError::bad_request(
            format!("URL must be at most {ORIGINAL_MAX_LENGTH} characters"),
            json!({ "provided_length": length }),
        ));
    }

    url::Url::parse(original).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    Ok(original)
}

fn code_taken(code: &str) -> AppError {
    AppError::conflict(
        "The proposed short link already exists",
        json!({ "code": code }),
    )
}

fn record_collision(candidate: &str, length: usize, attempt: usize) {
    metrics::counter!("cutlink_allocation_collisions_total").increment(1);
    debug!(candidate, length, attempt, "Short code collision, retrying");
}
