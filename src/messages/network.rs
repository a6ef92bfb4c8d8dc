//! Network messages - communication between the store and API layers

use crate::api::client::{ListQuery, PageQuery};
use crate::api::error::ApiError;
use crate::models::{Envelope, ListEnvelope, PageEnvelope};

/// Commands sent from the store to the API actor. Every command carries a
/// request id the store uses to match the eventual [`ApiEvent`] back to
/// the purpose it was issued for.
#[derive(Debug)]
pub enum ApiCommand {
    /// Fetch one page (or a pages-1..n window) of the time-sorted listing
    FetchPage { id: u64, query: PageQuery },
    /// Fetch the flat listing used by the bulk price-mode load
    FetchAll { id: u64, query: ListQuery },
    /// Mark a code as redeemed
    UseCode { id: u64, code: String },
    /// Submit a new share code
    CreateCode { id: u64, code: String, price: f64 },
    /// Shutdown the API actor
    Shutdown,
}

/// Outcomes sent from the API actor back to the store
#[derive(Debug)]
pub enum ApiEvent {
    Page {
        id: u64,
        result: Result<PageEnvelope, ApiError>,
    },
    List {
        id: u64,
        result: Result<ListEnvelope, ApiError>,
    },
    Used {
        id: u64,
        result: Result<Envelope<serde_json::Value>, ApiError>,
    },
    Created {
        id: u64,
        result: Result<Envelope<serde_json::Value>, ApiError>,
    },
}

impl ApiEvent {
    /// Get the request id from the event
    pub fn id(&self) -> u64 {
        match self {
            ApiEvent::Page { id, .. } => *id,
            ApiEvent::List { id, .. } => *id,
            ApiEvent::Used { id, .. } => *id,
            ApiEvent::Created { id, .. } => *id,
        }
    }
}
