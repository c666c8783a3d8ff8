// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the draft board:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                               |
// +--------------------------------------------------+
// | Turn Banner (3 rows)                             |
// +-------------------------------+------------------+
// | Roster (60%)                  | Radiant (50%)    |
// |                               +------------------+
// |                               | Dire (50%)       |
// +-------------------------------+------------------+
// | Notice (1 row)                                   |
// +--------------------------------------------------+
// | Help Bar (1 row)                                 |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each board zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: catalog size, activity indicators.
    pub status_bar: Rect,
    /// Acting team and phase, or the terminal draft state.
    pub turn_banner: Rect,
    /// Left side: the grouped, filterable hero roster.
    pub roster: Rect,
    /// Right side top: Radiant picks and bans.
    pub radiant_panel: Rect,
    /// Right side bottom: Dire picks and bans.
    pub dire_panel: Rect,
    /// Dismissible notice line (sync results, rejections).
    pub notice: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the board layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | banner(3) | middle(fill) | notice(1) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let status_bar = vertical[0];
    let turn_banner = vertical[1];
    let middle = vertical[2];
    let notice = vertical[3];
    let help_bar = vertical[4];

    // Horizontal: roster (60%) | team panels (40%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(middle);

    let roster = horizontal[0];
    let side = horizontal[1];

    let side_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(side);

    AppLayout {
        status_bar,
        turn_banner,
        roster,
        radiant_panel: side_sections[0],
        dire_panel: side_sections[1],
        notice,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
