//! Render state - snapshot sent from the store to the UI loop

use crate::messages::ui_events::{AddField, InputMode, Screen};
use crate::models::{ShareCode, SortMode};
use crate::store::state::Notice;

/// Complete state needed by the UI to render one frame
#[derive(Debug, Clone)]
pub struct RenderState {
    pub screen: Screen,

    // Listing
    pub share_codes: Vec<ShareCode>,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<Notice>,
    pub sort_by: SortMode,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub has_more: bool,
    pub selected: usize,

    // Input
    pub input_mode: InputMode,
    pub show_help: bool,
    pub add_code: String,
    pub add_price: String,
    pub add_field: AddField,
    pub form_error: Option<String>,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            screen: Screen::Welcome,
            share_codes: Vec::new(),
            loading: false,
            error: None,
            notice: None,
            sort_by: SortMode::Time,
            current_page: 1,
            total_pages: 0,
            total_items: 0,
            has_more: false,
            selected: 0,
            input_mode: InputMode::Normal,
            show_help: false,
            add_code: String::new(),
            add_price: String::new(),
            add_field: AddField::Code,
            form_error: None,
        }
    }
}
