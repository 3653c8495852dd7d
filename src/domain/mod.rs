//! Domain layer - Pure business abstractions
//!
//! Only trait definitions and domain error types live here.
//! SeaORM appears solely to classify its errors into [`DomainError`].

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
