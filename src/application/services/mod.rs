//! Business logic services for the application layer.

pub mod ingestion;
pub mod link_service;
pub mod upload_service;

pub use ingestion::{IngestionPipeline, UploadStep};
pub use link_service::{AllocationSettings, LinkService};
pub use upload_service::UploadService;
