//! Registry contract: the durable, unique-keyed store of short links.

use crate::domain::entities::{Insertion, NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for short links with a uniqueness guarantee on the short code.
///
/// The uniqueness constraint lives in the backing store itself, so
/// concurrent writers from unrelated requests (or processes) are safe without
/// any in-process lock. [`LinkRegistry::insert_if_absent`] is the only write
/// path and the only authoritative collision signal; [`LinkRegistry::exists`]
/// is a fast-path hint that may already be stale when it returns.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRegistry`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRegistry: Send + Sync {
    /// Returns true if a record with exactly this code is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists(&self, short: &str) -> Result<bool, AppError>;

    /// Atomically stores `new_link` unless its code is already taken.
    ///
    /// # Returns
    ///
    /// - `Ok(Insertion::Inserted(link))` when the record was written
    /// - `Ok(Insertion::Taken)` when another record owns the code
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert_if_absent(&self, new_link: NewShortLink) -> Result<Insertion, AppError>;

    /// Looks up a record by exact code match.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get(&self, short: &str) -> Result<Option<ShortLink>, AppError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
