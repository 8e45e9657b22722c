//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod short_link;
pub mod upload;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use short_link::{create_short_link_handler, get_original_handler};
pub use upload::upload_files_handler;
