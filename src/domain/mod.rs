//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Trait definitions, domain error types and form input parsing.

pub mod errors;
pub mod input;
pub mod repositories;

pub use errors::DomainError;
pub use input::{NewAuthor, NewBook};
pub use repositories::*;
