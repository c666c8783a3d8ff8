// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` replica of the presentation model. The app
// orchestrator pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders at ~30 fps. Draft transitions
// arrive as status-only patches, so the roster is never rebuilt just because
// a pick or ban landed.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::draft::hero::HeroAttribute;
use crate::protocol::{BusyState, ConfirmPrompt, UiUpdate, UserCommand};
use crate::view::{self, RosterView, TeamPanels, TurnBanner};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the presentation model for rendering.
///
/// Updated incrementally via `UiUpdate` messages from the app orchestrator;
/// the search text, attribute filter, and cursor are owned locally.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Replica of the rendered roster.
    pub roster: RosterView,
    /// Set when the catalog could not be loaded; replaces the roster area.
    pub roster_error: Option<String>,
    pub banner: TurnBanner,
    pub panels: TeamPanels,
    /// Open pick/ban confirmation prompt, if any.
    pub confirm: Option<ConfirmPrompt>,
    /// Dismissible notice line (Esc clears it).
    pub notice: Option<String>,
    pub busy: BusyState,
    /// Live search text (edited in search mode).
    pub search_text: String,
    pub search_mode: bool,
    pub attribute_filter: Option<HeroAttribute>,
    /// Flat index of the selected roster entry.
    pub cursor: usize,
}

impl ViewState {
    /// The filter command reflecting the current local search/attribute
    /// state.
    pub fn filter_command(&self) -> UserCommand {
        UserCommand::FilterChanged {
            search: self.search_text.clone(),
            attribute: self.attribute_filter,
        }
    }

    /// Move the cursor by `delta` entries, clamped to the roster.
    pub fn move_cursor(&mut self, delta: i32) {
        let count = self.roster.entry_count();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        let max = count - 1;
        let next = self.cursor as i64 + delta as i64;
        self.cursor = next.clamp(0, max as i64) as usize;
    }
}

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Roster(roster) => {
            state.roster = roster;
            state.roster_error = None;
            // The filter may have shrunk the list under the cursor.
            let count = state.roster.entry_count();
            if count == 0 {
                state.cursor = 0;
            } else if state.cursor >= count {
                state.cursor = count - 1;
            }
        }
        UiUpdate::Statuses(patches) => {
            view::apply_status_patches(&mut state.roster, &patches);
        }
        UiUpdate::TurnBanner(banner) => {
            state.banner = banner;
        }
        UiUpdate::TeamPanels(panels) => {
            state.panels = panels;
        }
        UiUpdate::Confirm(prompt) => {
            state.confirm = Some(prompt);
        }
        UiUpdate::Notice(text) => {
            state.notice = Some(text);
        }
        UiUpdate::RosterError(text) => {
            state.roster_error = Some(text);
        }
        UiUpdate::Busy(busy) => {
            state.busy = busy;
        }
    }
}

// ---------------------------------------------------------------------------
// Frame rendering
// ---------------------------------------------------------------------------

/// Render the complete board frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::turn_banner::render(frame, layout.turn_banner, state);
    widgets::roster::render(frame, layout.roster, state);
    widgets::teams::render_radiant(frame, layout.radiant_panel, state);
    widgets::teams::render_dire(frame, layout.dire_panel, state);
    render_notice(frame, layout.notice, state);
    render_help_bar(frame, layout.help_bar);

    // The confirmation overlay draws on top of everything else.
    if let Some(prompt) = &state.confirm {
        widgets::confirm::render(frame, frame.area(), prompt);
    }
}

fn render_notice(frame: &mut Frame, area: ratatui::layout::Rect, state: &ViewState) {
    if let Some(notice) = &state.notice {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" {} (Esc to dismiss)", notice),
            Style::default().fg(Color::Yellow),
        )));
        frame.render_widget(paragraph, area);
    }
}

fn render_help_bar(frame: &mut Frame, area: ratatui::layout::Rect) {
    let text = " q:Quit | s:Sync | r:Reload | n:New Draft | /:Search | a:Attribute | Enter:Pick/Ban";
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal even if rendering panics.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Channel closed: the orchestrator is shutting down.
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(command) = input::handle_key(key_event, &mut view_state) {
                            let quitting = command == UserCommand::Quit;
                            let _ = cmd_tx.send(command).await;
                            if quitting {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events need no handling; the next
                        // render tick picks up the new size.
                    }
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
