//! PostgreSQL persistence.
//!
//! - [`PgLinkRegistry`] - short link storage with a unique index on the code

pub mod pg_link_registry;

pub use pg_link_registry::PgLinkRegistry;
