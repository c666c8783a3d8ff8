// Message types exchanged between the TUI, the app orchestrator, and the
// spawned network tasks.
//
// The TUI never talks to the network: it sends `UserCommand`s and renders
// `UiUpdate`s. Network tasks settle through `NetEvent`s so the orchestrator
// can clear its in-flight guards on every exit path.

use crate::draft::hero::{Hero, HeroAttribute};
use crate::draft::session::{DraftSnapshot, Phase, Team};
use crate::net::ApiError;
use crate::view::{RosterView, StatusPatch, TeamPanels, TurnBanner};

// ---------------------------------------------------------------------------
// UserCommand: TUI -> app
// ---------------------------------------------------------------------------

/// An intent dispatched from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Refresh the hero catalog from the upstream source, then reload it.
    SyncRoster,
    /// Retry loading the catalog without the upstream refresh.
    ReloadRoster,
    /// Start a new draft, replacing the current one on success.
    StartDraft,
    /// The user activated a roster entry (the "click a hero" operation).
    HeroClicked(i64),
    /// Answer to the pending pick/ban confirmation prompt.
    ConfirmAction(bool),
    /// The search text or attribute restriction changed.
    FilterChanged {
        search: String,
        attribute: Option<HeroAttribute>,
    },
    Quit,
}

// ---------------------------------------------------------------------------
// NetEvent: spawned network tasks -> app
// ---------------------------------------------------------------------------

/// Completion of a spawned collaborator call.
#[derive(Debug)]
pub enum NetEvent {
    /// A catalog fetch settled (initial load, reload, or the load step of a
    /// sync).
    RosterLoaded(Result<Vec<Hero>, ApiError>),
    /// The upstream refresh step of a sync settled. On success the task goes
    /// on to fetch the catalog and a `RosterLoaded` follows.
    SyncSettled(Result<String, ApiError>),
    /// A draft-start request settled.
    StartSettled(Result<DraftSnapshot, ApiError>),
    /// A pick or ban settled.
    ActionSettled {
        hero_id: i64,
        phase: Phase,
        result: Result<DraftSnapshot, ApiError>,
    },
}

// ---------------------------------------------------------------------------
// UiUpdate: app -> TUI
// ---------------------------------------------------------------------------

/// Content of the pick/ban confirmation overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmPrompt {
    pub hero_name: String,
    pub team: Team,
    pub phase: Phase,
}

/// Activity flags for triggers that must be disabled while a call is
/// outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusyState {
    /// A sync or catalog load is in flight ("Syncing..." on the trigger).
    pub sync: bool,
    /// A start/pick/ban is in flight.
    pub action: bool,
}

/// A presentation update pushed to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Full roster rebuild (catalog or filter changed).
    Roster(RosterView),
    /// Status-only refresh of already-rendered entries.
    Statuses(Vec<StatusPatch>),
    TurnBanner(TurnBanner),
    TeamPanels(TeamPanels),
    /// Ask the user to confirm a pick/ban before it is dispatched.
    Confirm(ConfirmPrompt),
    /// A dismissible notice line (sync result, authority rejection, ...).
    Notice(String),
    /// The catalog could not be loaded; the roster area shows this error and
    /// instructs that a sync is required.
    RosterError(String),
    Busy(BusyState),
}
