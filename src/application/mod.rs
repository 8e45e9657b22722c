//! Application layer services implementing business logic.
//!
//! Services consume the domain traits and expose the operations the HTTP
//! handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - code allocation, custom codes, resolution
//! - [`services::ingestion::IngestionPipeline`] - concurrent uploads to the object store
//! - [`services::upload_service::UploadService`] - uploads turned into short links

pub mod services;
