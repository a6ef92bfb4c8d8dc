//! # Sharecode TUI
//!
//! A terminal client for browsing, submitting, and redeeming share codes
//! against a remote HTTP API.
//!
//! ## Features
//! - Time-sorted server-side pagination with incremental load-more
//! - Price-sorted mode over a client-cached, time-windowed snapshot
//! - Background refresh that never resets the page cursor
//! - Share-code submission and redemption
//! - One-time welcome screen gated by a persisted flag
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - Store Layer (state machine)
//! - API Layer (Tokio + reqwest)

pub mod api;
pub mod constants;
pub mod messages;
pub mod models;
pub mod storage;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use api::{ApiActor, ApiClient, ApiError, ListQuery, PageQuery};
pub use messages::{ApiCommand, ApiEvent, RenderState, UiEvent};
pub use models::{Envelope, PageData, ShareCode, SortMode};
pub use storage::Storage;
pub use store::{Store, StoreActor};
