//! Store actions - the sort-mode state machine and API event application
//!
//! Every action is synchronous: it mutates state and returns the command
//! the actor should dispatch, if any. Network outcomes come back through
//! [`Store::handle_api_event`], which may itself return a follow-up
//! command (the reload after a successful create or redeem).

use std::cmp::Ordering;

use chrono::Utc;

use crate::api::client::{ListQuery, PageQuery};
use crate::constants::{BULK_FETCH_LIMIT, PRICE_WINDOW_SECS};
use crate::messages::network::{ApiCommand, ApiEvent};
use crate::messages::ui_events::{AddField, InputMode, Screen};
use crate::models::{ListEnvelope, PageEnvelope, ShareCode, SortMode};
use crate::store::state::{AddForm, Notice, Purpose, Store};

const FALLBACK_LOAD_ERROR: &str = "failed to load share codes";
const FALLBACK_CREATE_ERROR: &str = "failed to submit share code";
const FALLBACK_USE_ERROR: &str = "failed to redeem share code";

impl Store {
    // ========================
    // Loading
    // ========================

    /// Reset to page 1 and load under the current sort mode
    pub fn load_share_codes(&mut self) -> Option<ApiCommand> {
        // Only flash the spinner when there is nothing on screen yet
        if self.share_codes.is_empty() {
            self.loading = true;
        }
        self.error = None;
        self.current_page = 1;
        self.generation += 1;

        match self.sort_by {
            SortMode::Time => Some(self.fetch_page_cmd(1, false)),
            SortMode::Price => Some(self.fetch_bulk_cmd(None)),
        }
    }

    /// Re-fetch everything currently on screen without moving the cursor.
    /// Time mode issues a single request sized to cover pages
    /// 1..=`current_page` instead of many small ones.
    pub fn refresh_share_codes(&mut self) -> Option<ApiCommand> {
        self.error = None;
        let pages = self.current_page.max(1);
        self.generation += 1;

        match self.sort_by {
            SortMode::Time => {
                let id = self.next_id();
                let generation = self.generation;
                self.in_flight
                    .insert(id, Purpose::RefreshPages { generation, pages });
                Some(ApiCommand::FetchPage {
                    id,
                    query: PageQuery {
                        page: Some(1),
                        page_size: Some(self.page_size * pages),
                        sort: Some(SortMode::Time),
                    },
                })
            }
            SortMode::Price => Some(self.fetch_bulk_cmd(Some(pages))),
        }
    }

    /// Pull in the next page window, if any
    pub fn load_more(&mut self) -> Option<ApiCommand> {
        if !self.has_more() || self.loading || self.load_in_flight() {
            return None;
        }

        match self.sort_by {
            SortMode::Price => {
                // Next window comes straight out of the cached snapshot
                let next_page = self.current_page + 1;
                let start = ((next_page - 1) * self.page_size) as usize;
                let end = (start + self.page_size as usize).min(self.price_filtered_all.len());
                if start < end {
                    self.share_codes
                        .extend_from_slice(&self.price_filtered_all[start..end]);
                }
                self.current_page = next_page;
                None
            }
            SortMode::Time => {
                self.loading = true;
                self.error = None;
                Some(self.fetch_page_cmd(self.current_page + 1, true))
            }
        }
    }

    fn fetch_page_cmd(&mut self, page: u32, append: bool) -> ApiCommand {
        let id = self.next_id();
        let generation = self.generation;
        self.in_flight
            .insert(id, Purpose::PageLoad { generation, append });
        ApiCommand::FetchPage {
            id,
            query: PageQuery {
                page: Some(page),
                page_size: Some(self.page_size),
                sort: Some(SortMode::Time),
            },
        }
    }

    fn fetch_bulk_cmd(&mut self, restore_page: Option<u32>) -> ApiCommand {
        let id = self.next_id();
        let generation = self.generation;
        self.in_flight.insert(
            id,
            Purpose::BulkLoad {
                generation,
                restore_page,
            },
        );
        ApiCommand::FetchAll {
            id,
            query: ListQuery {
                sort: Some(SortMode::Price),
                limit: Some(BULK_FETCH_LIMIT),
            },
        }
    }

    // ========================
    // Sort switching
    // ========================

    pub fn toggle_sort(&mut self) -> Option<ApiCommand> {
        self.sort_by = self.sort_by.toggled();
        self.selected = 0;
        self.load_share_codes()
    }

    /// No-op when the mode is unchanged: no command, no state change
    pub fn set_sort(&mut self, sort: SortMode) -> Option<ApiCommand> {
        if self.sort_by == sort {
            return None;
        }
        self.sort_by = sort;
        self.selected = 0;
        self.load_share_codes()
    }

    // ========================
    // Selection
    // ========================

    /// Moving past the last row asks for the next page window
    pub fn select_next(&mut self) -> Option<ApiCommand> {
        if self.selected + 1 < self.share_codes.len() {
            self.selected += 1;
            None
        } else {
            self.load_more()
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    // ========================
    // Mutations
    // ========================

    pub fn add_share_code(&mut self, code: String, price: f64) -> Option<ApiCommand> {
        let id = self.next_id();
        self.in_flight
            .insert(id, Purpose::Create { code: code.clone() });
        Some(ApiCommand::CreateCode { id, code, price })
    }

    pub fn use_selected(&mut self) -> Option<ApiCommand> {
        let entry = self.share_codes.get(self.selected)?;
        if entry.is_used() {
            self.notice = Some(Notice::error(format!(
                "{} has already been redeemed",
                entry.code
            )));
            return None;
        }
        let code = entry.code.clone();
        let id = self.next_id();
        self.in_flight
            .insert(id, Purpose::Use { code: code.clone() });
        Some(ApiCommand::UseCode { id, code })
    }

    // ========================
    // Welcome / popups / form
    // ========================

    pub fn complete_welcome(&mut self) -> Option<ApiCommand> {
        self.screen = Screen::Home;
        self.load_share_codes()
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn open_add_form(&mut self) {
        self.input_mode = InputMode::AddForm;
        self.add_form = AddForm::default();
        self.notice = None;
    }

    pub fn cancel_add_form(&mut self) {
        self.input_mode = InputMode::Normal;
        self.add_form = AddForm::default();
    }

    pub fn add_form_char(&mut self, c: char) {
        match self.add_form.field {
            AddField::Code => self.add_form.code.push(c),
            AddField::Price => self.add_form.price.push(c),
        }
        self.add_form.error = None;
    }

    pub fn add_form_backspace(&mut self) {
        match self.add_form.field {
            AddField::Code => self.add_form.code.pop(),
            AddField::Price => self.add_form.price.pop(),
        };
    }

    pub fn add_form_next_field(&mut self) {
        self.add_form.field = self.add_form.field.next();
    }

    /// Validate the form; a bad price never reaches the network
    pub fn submit_add_form(&mut self) -> Option<ApiCommand> {
        let code = self.add_form.code.trim().to_string();
        if code.is_empty() {
            self.add_form.error = Some("code must not be empty".into());
            return None;
        }
        let price: f64 = match self.add_form.price.trim().parse() {
            Ok(p) if p > 0.0 => p,
            _ => {
                self.add_form.error = Some("price must be a positive number".into());
                return None;
            }
        };
        self.input_mode = InputMode::Normal;
        self.add_form = AddForm::default();
        self.add_share_code(code, price)
    }

    // ========================
    // API event application
    // ========================

    /// Apply a network outcome. Unknown ids are dropped, as are list
    /// responses issued under a superseded generation.
    pub fn handle_api_event(&mut self, event: ApiEvent) -> Option<ApiCommand> {
        let id = event.id();
        let Some(purpose) = self.in_flight.remove(&id) else {
            tracing::debug!(id, "dropping response with no pending entry");
            return None;
        };

        if let Some(generation) = purpose.generation() {
            if generation != self.generation {
                tracing::debug!(
                    id,
                    generation,
                    current = self.generation,
                    "dropping stale response"
                );
                if !self.load_in_flight() {
                    self.loading = false;
                }
                return None;
            }
        }

        match (purpose, event) {
            (Purpose::PageLoad { append, .. }, ApiEvent::Page { result, .. }) => {
                self.loading = false;
                match result {
                    Ok(envelope) => self.apply_page(envelope, append),
                    Err(e) => self.error = Some(e.to_string()),
                }
                None
            }
            (Purpose::RefreshPages { pages, .. }, ApiEvent::Page { result, .. }) => {
                self.loading = false;
                match result {
                    Ok(envelope) => self.apply_refresh(envelope, pages),
                    Err(e) => self.error = Some(e.to_string()),
                }
                None
            }
            (Purpose::BulkLoad { restore_page, .. }, ApiEvent::List { result, .. }) => {
                self.loading = false;
                match result {
                    Ok(envelope) => self.apply_bulk(envelope, restore_page, Utc::now().timestamp()),
                    Err(e) => self.error = Some(e.to_string()),
                }
                None
            }
            (Purpose::Create { .. }, ApiEvent::Created { result, .. }) => match result {
                Ok(envelope) if envelope.is_success() => {
                    self.notice = Some(Notice::success("share code submitted"));
                    self.load_share_codes()
                }
                Ok(envelope) => {
                    self.notice = Some(Notice::error(envelope.message_or(FALLBACK_CREATE_ERROR)));
                    None
                }
                Err(e) => {
                    self.notice = Some(Notice::error(e.to_string()));
                    None
                }
            },
            (Purpose::Use { code }, ApiEvent::Used { result, .. }) => match result {
                Ok(envelope) if envelope.is_success() => {
                    self.notice = Some(Notice::success(format!("{code} redeemed")));
                    self.load_share_codes()
                }
                Ok(envelope) => {
                    self.notice = Some(Notice::error(envelope.message_or(FALLBACK_USE_ERROR)));
                    None
                }
                Err(e) => {
                    self.notice = Some(Notice::error(e.to_string()));
                    None
                }
            },
            (purpose, _event) => {
                tracing::warn!(id, ?purpose, "mismatched response kind");
                None
            }
        }
    }

    /// Time mode: the server envelope is the source of truth for counters
    fn apply_page(&mut self, envelope: PageEnvelope, append: bool) {
        if !envelope.is_success() {
            self.error = Some(envelope.message_or(FALLBACK_LOAD_ERROR));
            return;
        }
        let Some(page) = envelope.data else {
            self.error = Some(FALLBACK_LOAD_ERROR.into());
            return;
        };
        if append {
            self.share_codes.extend(page.data);
        } else {
            self.share_codes = page.data;
        }
        self.total_items = page.total;
        self.total_pages = page.total_pages;
        self.current_page = page.page;
        self.clamp_selection();
    }

    /// Time-mode refresh: one oversized page re-covers pages 1..=`pages`;
    /// counters are recomputed against the normal page size and the page
    /// cursor is restored
    fn apply_refresh(&mut self, envelope: PageEnvelope, pages: u32) {
        if !envelope.is_success() {
            self.error = Some(envelope.message_or(FALLBACK_LOAD_ERROR));
            return;
        }
        let Some(page) = envelope.data else {
            self.error = Some(FALLBACK_LOAD_ERROR.into());
            return;
        };
        self.share_codes = page.data;
        self.total_items = page.total;
        self.total_pages = div_ceil(page.total, self.page_size);
        self.current_page = pages;
        self.clamp_selection();
    }

    /// Price mode: filter to the recent window, sort by price descending
    /// (stable, so equal prices keep the fetched order), cache the full
    /// snapshot, and slice the visible prefix
    fn apply_bulk(&mut self, envelope: ListEnvelope, restore_page: Option<u32>, now: i64) {
        if !envelope.is_success() {
            self.error = Some(envelope.message_or(FALLBACK_LOAD_ERROR));
            return;
        }
        let items = envelope.data.unwrap_or_default();
        let cutoff = now - PRICE_WINDOW_SECS;
        let mut filtered: Vec<ShareCode> = items
            .into_iter()
            .filter(|c| c.create_time >= cutoff)
            .collect();
        filtered.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal));

        self.total_items = filtered.len() as u64;
        self.total_pages = div_ceil(filtered.len() as u64, self.page_size);
        self.price_filtered_all = filtered;

        let pages = restore_page.unwrap_or(1);
        let end = ((pages * self.page_size) as usize).min(self.price_filtered_all.len());
        self.share_codes = self.price_filtered_all[..end].to_vec();
        self.current_page = pages;
        self.clamp_selection();
    }
}

fn div_ceil(total: u64, page_size: u32) -> u32 {
    ((total + page_size as u64 - 1) / page_size as u64) as u32
}
