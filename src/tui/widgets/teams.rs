// Team panel widgets: fixed-size pick and ban slots per side.
//
// Slot counts are configuration, not data: trailing slots render an explicit
// "[empty]" state so the panel shape never changes during a draft.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::tui::ViewState;
use crate::view::SlotColumn;

/// Render the Radiant panel.
pub fn render_radiant(frame: &mut Frame, area: Rect, state: &ViewState) {
    render_panel(
        frame,
        area,
        "Radiant",
        Color::Green,
        &state.panels.radiant_picks,
        &state.panels.radiant_bans,
    );
}

/// Render the Dire panel.
pub fn render_dire(frame: &mut Frame, area: Rect, state: &ViewState) {
    render_panel(
        frame,
        area,
        "Dire",
        Color::Red,
        &state.panels.dire_picks,
        &state.panels.dire_bans,
    );
}

fn render_panel(
    frame: &mut Frame,
    area: Rect,
    team: &str,
    color: Color,
    picks: &SlotColumn,
    bans: &SlotColumn,
) {
    let title = format!(
        "{} ({}/{} picks)",
        team,
        picks.filled(),
        picks.slots.len()
    );

    let mut items: Vec<ListItem> = Vec::new();
    items.push(section("Picks"));
    items.extend(slot_lines(picks, Color::White));
    items.push(section("Bans"));
    items.extend(slot_lines(bans, Color::Red));

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(list, area);
}

fn section(label: &str) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        format!(" {}", label),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
}

fn slot_lines(column: &SlotColumn, filled_color: Color) -> Vec<ListItem<'static>> {
    column
        .slots
        .iter()
        .enumerate()
        .map(|(idx, slot)| {
            let (text, style) = match slot {
                Some(name) => (
                    format!("  {}. {}", idx + 1, name),
                    Style::default().fg(filled_color),
                ),
                None => (
                    format!("  {}. [empty]", idx + 1),
                    Style::default().fg(Color::DarkGray),
                ),
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::TeamPanels;

    fn column(names: &[&str], total: usize) -> SlotColumn {
        let slots = (0..total)
            .map(|idx| names.get(idx).map(|n| n.to_string()))
            .collect();
        SlotColumn { slots }
    }

    #[test]
    fn render_does_not_panic_empty() {
        let backend = ratatui::backend::TestBackend::new(30, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| {
                render_radiant(frame, frame.area(), &state);
            })
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_with_slots() {
        let backend = ratatui::backend::TestBackend::new(30, 14);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.panels = TeamPanels {
            radiant_picks: column(&["Axe", "Mirana"], 5),
            radiant_bans: column(&["Pudge"], 2),
            dire_picks: column(&[], 5),
            dire_bans: column(&[], 2),
        };
        terminal
            .draw(|frame| {
                render_radiant(frame, frame.area(), &state);
                render_dire(frame, frame.area(), &state);
            })
            .unwrap();
    }
}
