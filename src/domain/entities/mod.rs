//! Core domain entities.
//!
//! - [`ShortLink`] - a stored short code → original URL mapping
//! - [`NewShortLink`] - input for creating one
//! - [`Insertion`] - result of an insert-if-absent
//! - [`FilePayload`], [`UploadResult`], [`FileOutcome`] - file re-hosting values

pub mod short_link;
pub mod upload;

pub use short_link::{Insertion, NewShortLink, ShortLink};
pub use upload::{FileOutcome, FilePayload, UploadResult};
