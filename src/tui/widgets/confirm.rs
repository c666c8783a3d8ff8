// Pick/ban confirmation overlay widget.
//
// Renders a centered modal dialog showing the computed intent (action, hero,
// acting team) before anything is sent to the authority. Displayed on top of
// the main layout while `ViewState::confirm` is set.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::protocol::ConfirmPrompt;

const DIALOG_HEIGHT: u16 = 5;
const MIN_DIALOG_WIDTH: u16 = 30;

/// Render the confirmation overlay centered on the screen.
pub fn render(frame: &mut Frame, area: Rect, prompt: &ConfirmPrompt) {
    let text = prompt_text(prompt);
    let width = (text.len() as u16 + 6).max(MIN_DIALOG_WIDTH);
    let dialog_area = centered_rect(width, DIALOG_HEIGHT, area);

    // Clear the area behind the dialog so it renders cleanly on top
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Confirm ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    let line = Line::from(vec![
        Span::raw(format!("  {} (", text)),
        Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw("/"),
        Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(")"),
    ]);

    let paragraph = Paragraph::new(line)
        .block(block)
        .style(Style::default().bg(Color::Black));

    frame.render_widget(paragraph, dialog_area);
}

/// The dialog's question, e.g. `BAN Axe for Radiant?`.
pub fn prompt_text(prompt: &ConfirmPrompt) -> String {
    format!("{} {} for {}?", prompt.phase, prompt.hero_name, prompt.team)
}

/// Compute a centered rectangle of the given size within `area`.
///
/// If the area is too small, the dialog is clamped to the available space.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
