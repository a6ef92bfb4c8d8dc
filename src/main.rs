//! Sharecode TUI - actor-based terminal client for a share-code API
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - Store Layer - central state machine processing events
//! - API Layer (Tokio + reqwest) - async HTTP execution

mod api;
mod constants;
mod messages;
mod models;
mod storage;
mod store;
mod ui;

use std::io;
use std::time::Duration;

use chrono::Utc;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use api::client::resolve_base_url;
use api::{ApiActor, ApiClient};
use messages::ui_events::{key_to_ui_event, AddField, InputMode, Screen};
use messages::{ApiCommand, ApiEvent, RenderState, UiEvent};
use storage::Storage;
use store::StoreActor;
use ui::{format_age, format_price, notice_color, used_marker};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to a file; the terminal belongs to the UI
    let file_appender = tracing_appender::rolling::never(".", "sharecode.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let storage = Storage::new();
    let base_url = resolve_base_url(storage.api_url());
    tracing::info!(%base_url, "starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (api_cmd_tx, api_cmd_rx) = mpsc::unbounded_channel::<ApiCommand>();
    let (api_event_tx, api_event_rx) = mpsc::unbounded_channel::<ApiEvent>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn API actor
    let api_actor = ApiActor::new(ApiClient::new(base_url), api_event_tx);
    tokio::spawn(api_actor.run(api_cmd_rx));

    // Spawn store actor
    let store_actor = StoreActor::new(storage, api_cmd_tx, render_tx);
    tokio::spawn(store_actor.run(ui_rx, api_event_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.screen,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    match state.screen {
        Screen::Welcome => draw_welcome(f, area),
        Screen::Home => draw_home(f, state, area),
    }

    if state.input_mode == InputMode::AddForm {
        draw_add_form_popup(f, state, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_welcome(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let text = r#"
 Welcome to Sharecode!

 Browse share codes posted by other users, sorted by
 newest first or by price. Redeem a code directly from
 the list, or submit one of your own.

 The list refreshes itself in the background, so what
 you see stays current without losing your place.

 Press Enter to get started, q to quit.
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Welcome ")
        .border_style(Style::default().fg(Color::Cyan));

    let welcome = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(welcome, popup_area);
}

fn draw_home(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Listing
            Constraint::Length(1), // Message line
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, state, chunks[0]);
    draw_listing(f, state, chunks[1]);
    draw_message_line(f, state, chunks[2]);
    draw_status_bar(f, state, chunks[3]);
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let loading = if state.loading { " [...]" } else { "" };

    let sort_label = match state.sort_by {
        models::SortMode::Time => "newest first",
        models::SortMode::Price => "price (last 3h)",
    };

    let line = Line::from(vec![
        Span::styled("Sort: ", Style::default().fg(Color::Gray)),
        Span::styled(sort_label, Style::default().fg(Color::Cyan).bold()),
        Span::raw("   "),
        Span::styled(
            format!("{} codes", state.total_items),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("   "),
        Span::styled(
            format!("page {}/{}", state.current_page, state.total_pages.max(1)),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Share Codes{} ", loading))
        .title_style(Style::default().fg(Color::Cyan).bold());

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_listing(f: &mut Frame, state: &RenderState, area: Rect) {
    let now = Utc::now().timestamp();

    let items: Vec<ListItem> = state
        .share_codes
        .iter()
        .map(|entry| {
            let style = if entry.is_used() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled(format!("{:<4}", used_marker(entry.is_used())), style),
                Span::styled(format!("{:<24}", entry.code), style.bold()),
                Span::styled(
                    format!("{:>10}", format_price(entry.price)),
                    style.fg(if entry.is_used() {
                        Color::DarkGray
                    } else {
                        Color::Yellow
                    }),
                ),
                Span::styled(format!("  {:>8}", format_age(entry.create_time, now)), style),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = if state.has_more {
        " Codes (↓ past the end loads more) "
    } else {
        " Codes "
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !state.share_codes.is_empty() {
        list_state.select(Some(state.selected));
    }

    f.render_stateful_widget(list, area, &mut list_state);

    if state.share_codes.is_empty() && !state.loading {
        let empty = Paragraph::new("No share codes yet. Press 'a' to submit one.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        let inner = centered_rect(80, 20, area);
        f.render_widget(empty, inner);
    }
}

fn draw_message_line(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = if let Some(error) = &state.error {
        Line::from(Span::styled(
            format!(" {} ", error),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(notice) = &state.notice {
        Line::from(Span::styled(
            format!(" {} ", notice.text),
            Style::default().fg(notice_color(notice.level)),
        ))
    } else {
        Line::from("")
    };

    f.render_widget(Paragraph::new(line), area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.loading {
        " Loading... "
    } else if state.input_mode == InputMode::AddForm {
        " Tab:switch field | Enter:submit | Esc:cancel "
    } else {
        " ↑/↓:move | Enter:redeem | a:add | s:sort | r:refresh | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_add_form_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(50, 30, area);

    let code_style = if state.add_field == AddField::Code {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let price_style = if state.add_field == AddField::Price {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Code:  "),
            Span::styled(state.add_code.as_str(), code_style),
            Span::styled(
                if state.add_field == AddField::Code { "_" } else { "" },
                code_style,
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Price: "),
            Span::styled(state.add_price.as_str(), price_style),
            Span::styled(
                if state.add_field == AddField::Price { "_" } else { "" },
                price_style,
            ),
        ]),
    ];

    if let Some(error) = &state.form_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Add Share Code (Enter to submit, Esc to cancel) ")
        .style(Style::default().bg(Color::Black));

    let form = Paragraph::new(lines).block(block);

    f.render_widget(Clear, popup_area);
    f.render_widget(form, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 SHARECODE TUI - Keyboard Shortcuts

 NAVIGATION
   ↑ / k              Move selection up
   ↓ / j              Move selection down
                      (past the end loads the next page)

 LISTING
   s                  Toggle sort: newest / price
   r                  Refresh in place

 CODES
   Enter / u          Redeem the selected code
   a                  Submit a new code

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
