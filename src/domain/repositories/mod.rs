//! Repository and capability traits for the domain layer.
//!
//! Implementations live in `crate::infrastructure`. Mock implementations are
//! generated with `mockall` for unit tests.
//!
//! - [`LinkRegistry`] - unique short code → URL storage
//! - [`ObjectStore`] - remote file store used by the ingestion pipeline

pub mod link_registry;
pub mod object_store;

pub use link_registry::LinkRegistry;
pub use object_store::{ObjectStore, StoreError, UploadTarget};

#[cfg(test)]
pub use link_registry::MockLinkRegistry;
#[cfg(test)]
pub use object_store::MockObjectStore;
