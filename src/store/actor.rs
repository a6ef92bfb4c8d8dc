//! Store actor - message loop processing UI events, API events, and the
//! background refresh timer

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::interval;

use crate::constants::REFRESH_INTERVAL_SECS;
use crate::messages::ui_events::Screen;
use crate::messages::{ApiCommand, ApiEvent, RenderState, UiEvent};
use crate::storage::Storage;
use crate::store::state::Store;

/// Owns the [`Store`] and the persisted local state; everything else
/// talks to it through channels.
pub struct StoreActor {
    store: Store,
    storage: Storage,
    api_tx: mpsc::UnboundedSender<ApiCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl StoreActor {
    pub fn new(
        storage: Storage,
        api_tx: mpsc::UnboundedSender<ApiCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        let store = Store::new(storage.is_visited());
        StoreActor {
            store,
            storage,
            api_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut api_rx: mpsc::UnboundedReceiver<ApiEvent>,
    ) {
        // Returning visitors land on the listing and load right away;
        // first-time visitors wait on the welcome screen
        if self.store.screen == Screen::Home {
            let cmd = self.store.load_share_codes();
            self.dispatch(cmd);
        }
        let _ = self.render_tx.send(self.store.to_render_state());

        let mut refresh = interval(Duration::from_secs(REFRESH_INTERVAL_SECS));
        // The first tick fires immediately; the initial load covers it
        refresh.tick().await;

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        let _ = self.api_tx.send(ApiCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.store.to_render_state());
                }
                Some(event) = api_rx.recv() => {
                    let follow_up = self.store.handle_api_event(event);
                    self.dispatch(follow_up);
                    let _ = self.render_tx.send(self.store.to_render_state());
                }
                _ = refresh.tick() => {
                    if self.store.screen == Screen::Home {
                        tracing::debug!("background refresh");
                        let cmd = self.store.refresh_share_codes();
                        self.dispatch(cmd);
                    }
                }
                else => break,
            }
        }
    }

    fn dispatch(&self, cmd: Option<ApiCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.api_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::CompleteWelcome => {
                if let Err(e) = self.storage.mark_visited() {
                    tracing::warn!(error = %e, "failed to persist visited flag");
                }
                let cmd = self.store.complete_welcome();
                self.dispatch(cmd);
            }

            UiEvent::SelectNext => {
                let cmd = self.store.select_next();
                self.dispatch(cmd);
            }
            UiEvent::SelectPrev => self.store.select_prev(),

            UiEvent::Refresh => {
                let cmd = self.store.refresh_share_codes();
                self.dispatch(cmd);
            }
            UiEvent::ToggleSort => {
                let cmd = self.store.toggle_sort();
                self.dispatch(cmd);
            }
            UiEvent::UseSelected => {
                let cmd = self.store.use_selected();
                self.dispatch(cmd);
            }

            UiEvent::OpenAddForm => self.store.open_add_form(),
            UiEvent::AddFormChar(c) => self.store.add_form_char(c),
            UiEvent::AddFormBackspace => self.store.add_form_backspace(),
            UiEvent::AddFormNextField => self.store.add_form_next_field(),
            UiEvent::SubmitAddForm => {
                let cmd = self.store.submit_add_form();
                self.dispatch(cmd);
            }
            UiEvent::CancelAddForm => self.store.cancel_add_form(),

            UiEvent::ToggleHelp => self.store.toggle_help(),
            UiEvent::CloseHelp => self.store.close_help(),

            UiEvent::Quit => return true,
        }

        false
    }
}
