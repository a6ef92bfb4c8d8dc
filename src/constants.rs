//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the share-code API
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "SHARECODE_API_URL";

/// Items per page in time-sorted pagination
pub const PAGE_SIZE: u32 = 20;

/// Upper bound on the bulk fetch backing price-sorted mode
pub const BULK_FETCH_LIMIT: u32 = 10_000;

/// Price mode only shows codes created within this window
pub const PRICE_WINDOW_SECS: i64 = 3 * 3600;

/// Seconds between background refreshes of the visible list
pub const REFRESH_INTERVAL_SECS: u64 = 30;

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "Sharecode TUI";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
