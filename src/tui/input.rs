// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (cursor movement,
// search editing, attribute cycling).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::draft::hero::HeroAttribute;
use crate::protocol::UserCommand;

use super::ViewState;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when the key press was handled locally by
/// mutating `ViewState` (cursor movement, scrolling) or was a no-op.
pub fn handle_key(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both Press
    // and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // Confirmation overlay: y commits the pending pick/ban, n/Esc aborts,
    // everything else is blocked until the prompt is answered.
    if state.confirm.is_some() {
        return handle_confirm_prompt(key_event, state);
    }

    // Search mode: every edit is a live filter change.
    if state.search_mode {
        return handle_search_mode(key_event, state);
    }

    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),
        KeyCode::Char('s') => Some(UserCommand::SyncRoster),
        KeyCode::Char('r') => Some(UserCommand::ReloadRoster),
        KeyCode::Char('n') => Some(UserCommand::StartDraft),

        KeyCode::Char('/') => {
            state.search_mode = true;
            None
        }

        // Attribute filter cycling: all -> STR -> AGI -> INT -> UNI -> all
        KeyCode::Char('a') => {
            state.attribute_filter = HeroAttribute::cycle(state.attribute_filter);
            Some(state.filter_command())
        }

        // Escape dismisses the notice first; with none showing it clears the
        // whole filter.
        KeyCode::Esc => {
            if state.notice.take().is_some() {
                None
            } else if !state.search_text.is_empty() || state.attribute_filter.is_some() {
                state.search_text.clear();
                state.attribute_filter = None;
                Some(state.filter_command())
            } else {
                None
            }
        }

        // Cursor movement over the roster entries
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_cursor(-1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_cursor(1);
            None
        }
        KeyCode::PageUp => {
            state.move_cursor(-10);
            None
        }
        KeyCode::PageDown => {
            state.move_cursor(10);
            None
        }

        // Activate the hero under the cursor
        KeyCode::Enter | KeyCode::Char(' ') => state
            .roster
            .entry_at(state.cursor)
            .map(|entry| UserCommand::HeroClicked(entry.id)),

        _ => None,
    }
}

/// Handle key events while the pick/ban confirmation overlay is open.
fn handle_confirm_prompt(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            state.confirm = None;
            Some(UserCommand::ConfirmAction(true))
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.confirm = None;
            Some(UserCommand::ConfirmAction(false))
        }
        _ => None, // Block all other input
    }
}

/// Handle key events while in search mode.
///
/// Printable characters and Backspace edit the search text and emit a live
/// filter change on every keystroke. Enter keeps the text and leaves search
/// mode; Esc clears it.
fn handle_search_mode(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            state.search_mode = false;
            if state.search_text.is_empty() {
                None
            } else {
                state.search_text.clear();
                Some(state.filter_command())
            }
        }
        KeyCode::Enter => {
            state.search_mode = false;
            None
        }
        KeyCode::Backspace => {
            if state.search_text.pop().is_some() {
                Some(state.filter_command())
            } else {
                None
            }
        }
        KeyCode::Char(c) => {
            state.search_text.push(c);
            Some(state.filter_command())
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    use crate::draft::session::{Phase, Team};
    use crate::protocol::ConfirmPrompt;
    use crate::view::{AttributeGroup, HeroStatus, RosterEntry, RosterView};

    /// Helper to create a KeyEvent with no modifiers.
    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn sample_roster() -> RosterView {
        RosterView {
            groups: vec![AttributeGroup {
                attribute: crate::draft::hero::HeroAttribute::Strength,
                entries: vec![
                    RosterEntry { id: 1, name: "Axe".into(), status: HeroStatus::Available },
                    RosterEntry { id: 5, name: "Pudge".into(), status: HeroStatus::Available },
                ],
            }],
        }
    }

    #[test]
    fn quit_and_triggers_map_to_commands() {
        let mut state = ViewState::default();
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), Some(UserCommand::Quit));
        assert_eq!(
            handle_key(key(KeyCode::Char('s')), &mut state),
            Some(UserCommand::SyncRoster)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('r')), &mut state),
            Some(UserCommand::ReloadRoster)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('n')), &mut state),
            Some(UserCommand::StartDraft)
        );
    }

    #[test]
    fn ctrl_c_quits_even_in_search_mode() {
        let mut state = ViewState::default();
        state.search_mode = true;
        let event = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key(event, &mut state), Some(UserCommand::Quit));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = ViewState::default();
        let event = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key(event, &mut state), None);
    }

    #[test]
    fn enter_activates_hero_under_cursor() {
        let mut state = ViewState::default();
        state.roster = sample_roster();
        state.cursor = 1;
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::HeroClicked(5))
        );
    }

    #[test]
    fn enter_with_empty_roster_is_noop() {
        let mut state = ViewState::default();
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), None);
    }

    #[test]
    fn cursor_moves_and_clamps() {
        let mut state = ViewState::default();
        state.roster = sample_roster();
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.cursor, 1);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.cursor, 1, "cursor clamps at the last entry");
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.cursor, 0);
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.cursor, 0, "cursor clamps at the first entry");
    }

    #[test]
    fn search_mode_emits_live_filter_changes() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('/')), &mut state);
        assert!(state.search_mode);

        let cmd = handle_key(key(KeyCode::Char('m')), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::FilterChanged { search: "m".into(), attribute: None })
        );
        let cmd = handle_key(key(KeyCode::Char('i')), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::FilterChanged { search: "mi".into(), attribute: None })
        );

        let cmd = handle_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::FilterChanged { search: "m".into(), attribute: None })
        );

        // Enter keeps the text and leaves search mode.
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), None);
        assert!(!state.search_mode);
        assert_eq!(state.search_text, "m");
    }

    #[test]
    fn search_escape_clears_text() {
        let mut state = ViewState::default();
        state.search_mode = true;
        state.search_text = "mir".into();
        let cmd = handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::FilterChanged { search: String::new(), attribute: None })
        );
        assert!(!state.search_mode);
    }

    #[test]
    fn attribute_cycles_through_all_and_back() {
        use crate::draft::hero::HeroAttribute;
        let mut state = ViewState::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            let cmd = handle_key(key(KeyCode::Char('a')), &mut state);
            match cmd {
                Some(UserCommand::FilterChanged { attribute, .. }) => seen.push(attribute),
                other => panic!("expected FilterChanged, got {:?}", other),
            }
        }
        assert_eq!(
            seen,
            vec![
                Some(HeroAttribute::Strength),
                Some(HeroAttribute::Agility),
                Some(HeroAttribute::Intelligence),
                Some(HeroAttribute::Universal),
                None,
            ]
        );
    }

    #[test]
    fn escape_dismisses_notice_before_clearing_filter() {
        let mut state = ViewState::default();
        state.notice = Some("Synced".into());
        state.search_text = "mir".into();

        assert_eq!(handle_key(key(KeyCode::Esc), &mut state), None);
        assert!(state.notice.is_none());
        assert_eq!(state.search_text, "mir");

        let cmd = handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(
            cmd,
            Some(UserCommand::FilterChanged { search: String::new(), attribute: None })
        );
    }

    #[test]
    fn confirm_prompt_answers_and_blocks() {
        let prompt = ConfirmPrompt {
            hero_name: "Axe".into(),
            team: Team::Radiant,
            phase: Phase::Ban,
        };

        let mut state = ViewState::default();
        state.confirm = Some(prompt.clone());
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut state),
            Some(UserCommand::ConfirmAction(true))
        );
        assert!(state.confirm.is_none());

        let mut state = ViewState::default();
        state.confirm = Some(prompt.clone());
        assert_eq!(
            handle_key(key(KeyCode::Esc), &mut state),
            Some(UserCommand::ConfirmAction(false))
        );
        assert!(state.confirm.is_none());

        // Other keys are blocked while the prompt is open.
        let mut state = ViewState::default();
        state.confirm = Some(prompt);
        assert_eq!(handle_key(key(KeyCode::Char('s')), &mut state), None);
        assert!(state.confirm.is_some());
    }
}
