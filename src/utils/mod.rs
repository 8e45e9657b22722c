//! Helpers for request handling.
//!
//! - [`request_root`] - public root URL for short links
//! - [`upload_filename`] - filename sanitizing and extension allow-list

pub mod request_root;
pub mod upload_filename;
