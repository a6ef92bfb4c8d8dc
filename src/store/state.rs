//! Store state - pure data structure with no I/O logic

use std::collections::HashMap;

use crate::constants::PAGE_SIZE;
use crate::messages::ui_events::{AddField, InputMode, Screen};
use crate::messages::RenderState;
use crate::models::{ShareCode, SortMode};

/// What an in-flight request was issued for. Looked up by request id when
/// the matching `ApiEvent` arrives. List-shaped purposes carry the
/// generation the request was issued under; a response from an older
/// generation is discarded instead of written into state.
#[derive(Debug, Clone, PartialEq)]
pub enum Purpose {
    /// One page of the time-sorted listing
    PageLoad { generation: u64, append: bool },
    /// Bulk fetch backing price mode; `restore_page` is set on refresh
    BulkLoad {
        generation: u64,
        restore_page: Option<u32>,
    },
    /// Single oversized page covering pages 1..=pages of time mode
    RefreshPages { generation: u64, pages: u32 },
    /// Submission of a new code
    Create { code: String },
    /// Redeem of an existing code
    Use { code: String },
}

impl Purpose {
    /// Generation the request was issued under, for loads that write the list
    pub fn generation(&self) -> Option<u64> {
        match self {
            Purpose::PageLoad { generation, .. }
            | Purpose::BulkLoad { generation, .. }
            | Purpose::RefreshPages { generation, .. } => Some(*generation),
            Purpose::Create { .. } | Purpose::Use { .. } => None,
        }
    }
}

/// Severity of a transient banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient outcome banner for the add/use flows
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Add-code form state
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub code: String,
    pub price: String,
    pub field: AddField,
    pub error: Option<String>,
}

/// Main application state - pure data, no I/O.
///
/// Invariant: in time mode `share_codes` is the concatenation of server
/// pages 1..=`current_page`; in price mode it is always a prefix of
/// `price_filtered_all` of length `current_page * page_size`, clamped to
/// the available data.
pub struct Store {
    // Displayed list
    pub share_codes: Vec<ShareCode>,
    pub loading: bool,
    pub error: Option<String>,
    pub sort_by: SortMode,
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,

    /// Full time-windowed, price-sorted snapshot; only used in price mode
    pub price_filtered_all: Vec<ShareCode>,

    // Request bookkeeping
    pub generation: u64,
    next_request_id: u64,
    pub in_flight: HashMap<u64, Purpose>,

    // UI state
    pub screen: Screen,
    pub input_mode: InputMode,
    pub selected: usize,
    pub show_help: bool,
    pub add_form: AddForm,
    pub notice: Option<Notice>,
}

impl Store {
    pub fn new(visited: bool) -> Self {
        Store {
            share_codes: Vec::new(),
            loading: false,
            error: None,
            sort_by: SortMode::Time,
            current_page: 1,
            page_size: PAGE_SIZE,
            total_items: 0,
            total_pages: 0,
            price_filtered_all: Vec::new(),
            generation: 0,
            next_request_id: 1,
            in_flight: HashMap::new(),
            screen: if visited { Screen::Home } else { Screen::Welcome },
            input_mode: InputMode::Normal,
            selected: 0,
            show_help: false,
            add_form: AddForm::default(),
            notice: None,
        }
    }

    /// Generate a unique request id
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// True while any list-shaped load is outstanding
    pub fn load_in_flight(&self) -> bool {
        self.in_flight.values().any(|p| p.generation().is_some())
    }

    /// Keep the cursor on a real row after the list shrinks
    pub(crate) fn clamp_selection(&mut self) {
        if self.selected >= self.share_codes.len() {
            self.selected = self.share_codes.len().saturating_sub(1);
        }
    }

    /// Convert state to RenderState for the UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            screen: self.screen,
            share_codes: self.share_codes.clone(),
            loading: self.loading,
            error: self.error.clone(),
            notice: self.notice.clone(),
            sort_by: self.sort_by,
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            has_more: self.has_more(),
            selected: self.selected,
            input_mode: self.input_mode,
            show_help: self.show_help,
            add_code: self.add_form.code.clone(),
            add_price: self.add_form.price.clone(),
            add_field: self.add_form.field,
            form_error: self.add_form.error.clone(),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(false)
    }
}
