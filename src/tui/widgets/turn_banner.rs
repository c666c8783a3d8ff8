// Turn banner: whose turn it is and whether the action is a pick or a ban.
//
// The terminal "Draft Complete" state suppresses turn and phase entirely.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::draft::session::Team;
use crate::tui::ViewState;
use crate::view::TurnBanner;

/// Render the turn banner area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = banner_line(&state.banner);
    let paragraph =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Draft"));
    frame.render_widget(paragraph, area);
}

fn banner_line(banner: &TurnBanner) -> Line<'static> {
    match banner {
        TurnBanner::Inactive => Line::from(Span::styled(
            " No active draft. Press 'n' to start one.",
            Style::default().fg(Color::DarkGray),
        )),
        TurnBanner::Active { team, phase } => {
            let color = match team {
                Team::Radiant => Color::Green,
                Team::Dire => Color::Red,
            };
            Line::from(vec![
                Span::styled(
                    format!(" {}'s Turn", team),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  |  "),
                Span::styled(format!("Phase: {}", phase), Style::default().fg(Color::White)),
            ])
        }
        TurnBanner::Complete => Line::from(Span::styled(
            " Draft Complete!",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    }
}

/// Plain-text banner content (for testing).
pub fn banner_text(banner: &TurnBanner) -> String {
    banner_line(banner)
        .spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect::<String>()
        .trim()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
