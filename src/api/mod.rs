//! API layer - typed HTTP client and the actor that runs it

pub mod actor;
pub mod client;
pub mod error;

pub use actor::ApiActor;
pub use client::{ApiClient, ListQuery, PageQuery};
pub use error::ApiError;
