// Status bar: catalog size and network activity indicators.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the top status bar.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        status_text(state),
        Style::default().fg(Color::White),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// The status line content (plain text, also used by tests).
pub fn status_text(state: &ViewState) -> String {
    let activity = if state.busy.sync {
        "Syncing..."
    } else if state.busy.action {
        "Waiting for authority..."
    } else {
        "Ready"
    };
    format!(
        " hero-drafter | {} heroes shown | {}",
        state.roster.entry_count(),
        activity
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
