//! Infrastructure layer for external integrations.
//!
//! This layer implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL link registry
//! - [`storage`] - remote object store client

pub mod persistence;
pub mod storage;
