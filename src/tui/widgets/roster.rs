// Roster widget: the hero catalog grouped by primary attribute, with
// pick/ban status marks and the selection cursor.
//
// The grouping and statuses come pre-computed in `ViewState::roster`; this
// widget only lays lines out and scrolls the cursor into view.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::draft::hero::HeroAttribute;
use crate::tui::ViewState;
use crate::view::{HeroStatus, RosterEntry};

/// Render the roster area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title(title(state));

    // Catalog failure replaces the whole area with the recoverable error.
    if let Some(error) = &state.roster_error {
        let paragraph = Paragraph::new(format!("  {}", error))
            .style(Style::default().fg(Color::Red))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if state.roster.is_empty() {
        let text = if state.busy.sync {
            "  Loading heroes..."
        } else {
            "  No heroes found"
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    // Flatten groups into lines, remembering which line holds the cursor.
    let mut lines: Vec<ListItem> = Vec::new();
    let mut cursor_line = 0usize;
    let mut entry_index = 0usize;
    for group in &state.roster.groups {
        lines.push(heading(group.attribute));
        for entry in &group.entries {
            let selected = entry_index == state.cursor;
            if selected {
                cursor_line = lines.len();
            }
            lines.push(entry_line(entry, selected));
            entry_index += 1;
        }
    }

    // Scroll so the cursor line is visible (2 rows of border).
    let visible_rows = (area.height as usize).saturating_sub(2).max(1);
    let offset = (cursor_line + 1).saturating_sub(visible_rows);
    let items: Vec<ListItem> = lines.into_iter().skip(offset).collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn title(state: &ViewState) -> String {
    let mut title = format!("Heroes ({})", state.roster.entry_count());
    if state.search_mode || !state.search_text.is_empty() {
        let marker = if state.search_mode { "_" } else { "" };
        title.push_str(&format!(" /{}{}", state.search_text, marker));
    }
    if let Some(attr) = state.attribute_filter {
        title.push_str(&format!(" [{}]", attr.label()));
    }
    title
}

fn heading(attribute: HeroAttribute) -> ListItem<'static> {
    let style = Style::default()
        .fg(attribute_color(attribute))
        .add_modifier(Modifier::BOLD);
    ListItem::new(Line::from(Span::styled(format!("{}", attribute).to_uppercase(), style)))
}

fn entry_line(entry: &RosterEntry, selected: bool) -> ListItem<'static> {
    let (mark, style) = match entry.status {
        HeroStatus::Available => ("  ", Style::default().fg(Color::White)),
        HeroStatus::Picked => ("P ", Style::default().fg(Color::Green)),
        HeroStatus::Banned => (
            "B ",
            Style::default().fg(Color::Red).add_modifier(Modifier::CROSSED_OUT),
        ),
    };
    let style = if selected {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    };
    ListItem::new(Line::from(Span::styled(format!(" {}{}", mark, entry.name), style)))
}

fn attribute_color(attribute: HeroAttribute) -> Color {
    match attribute {
        HeroAttribute::Strength => Color::Red,
        HeroAttribute::Agility => Color::Green,
        HeroAttribute::Intelligence => Color::Cyan,
        HeroAttribute::Universal => Color::Magenta,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
