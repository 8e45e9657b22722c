//! Domain layer: entities, repository traits and code rules.
//!
//! Nothing here depends on the database, HTTP client or web framework
//! beyond shared value types.
//!
//! - [`entities`] - short links and upload values
//! - [`repositories`] - [`repositories::LinkRegistry`] and [`repositories::ObjectStore`]
//! - [`code_generator`] - alphabet, generator, custom code rules

pub mod code_generator;
pub mod entities;
pub mod repositories;
