//! Remote object store clients.
//!
//! - [`DiskStore`] - REST cloud-disk API (upload href, PUT, download href)

pub mod disk_store;

pub use disk_store::DiskStore;
