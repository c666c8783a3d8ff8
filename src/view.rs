// View synchronizer: pure projections from the roster store and draft session
// to the view models the TUI renders.
//
// Two update granularities, mirroring the interaction cost they carry:
// - `build_roster_view` is the full rebuild, run when the catalog or the
//   filter changes;
// - `refresh_statuses` is the cheap incremental pass run after every draft
//   transition, touching only the pick/ban status of already-built entries.

use crate::draft::hero::{HeroAttribute, ATTRIBUTE_ORDER};
use crate::draft::roster::RosterStore;
use crate::draft::session::{DraftSession, Phase, Team};

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// The live roster filter: search text plus an optional attribute restriction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search: String,
    pub attribute: Option<HeroAttribute>,
}

// ---------------------------------------------------------------------------
// Roster view
// ---------------------------------------------------------------------------

/// Pick/ban status of a roster entry, as shown on its card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroStatus {
    Available,
    Picked,
    Banned,
}

/// One rendered roster entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub id: i64,
    pub name: String,
    pub status: HeroStatus,
}

/// A group of entries under one attribute heading.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeGroup {
    pub attribute: HeroAttribute,
    pub entries: Vec<RosterEntry>,
}

/// The rendered roster: attribute groups in fixed order.
///
/// An empty `groups` means the current filter matched nothing and the UI
/// shows its "no heroes found" state instead of headings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterView {
    pub groups: Vec<AttributeGroup>,
}

impl RosterView {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total entry count across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    /// The entry at a flat index across groups, in display order.
    pub fn entry_at(&self, mut index: usize) -> Option<&RosterEntry> {
        for group in &self.groups {
            if index < group.entries.len() {
                return Some(&group.entries[index]);
            }
            index -= group.entries.len();
        }
        None
    }
}

/// A status-only change to an already-rendered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPatch {
    pub hero_id: i64,
    pub status: HeroStatus,
}

/// The pick/ban status of one hero in the current session.
pub fn hero_status(session: &DraftSession, hero_id: i64) -> HeroStatus {
    if session.is_picked(hero_id) {
        HeroStatus::Picked
    } else if session.is_banned(hero_id) {
        HeroStatus::Banned
    } else {
        HeroStatus::Available
    }
}

/// Full rebuild of the roster view from the store and filter.
///
/// Groups follow the fixed attribute order. A group with no matches is still
/// rendered (as an empty heading) unless a specific attribute filter is
/// active, in which case empty groups are omitted. When nothing matches at
/// all, the view is empty and the UI shows "no heroes found".
pub fn build_roster_view(
    store: &RosterStore,
    filter: &FilterState,
    session: &DraftSession,
) -> RosterView {
    let matches = store.filter(&filter.search, filter.attribute);
    if matches.is_empty() {
        return RosterView::default();
    }

    let mut groups = Vec::with_capacity(ATTRIBUTE_ORDER.len());
    for attribute in ATTRIBUTE_ORDER {
        let entries: Vec<RosterEntry> = matches
            .iter()
            .filter(|hero| hero.primary_attribute == attribute)
            .map(|hero| RosterEntry {
                id: hero.id,
                name: sanitize(&hero.name),
                status: hero_status(session, hero.id),
            })
            .collect();

        if filter.attribute.is_some() && entries.is_empty() {
            continue;
        }
        groups.push(AttributeGroup { attribute, entries });
    }

    RosterView { groups }
}

/// Incremental status pass: update the status of already-built entries in
/// place and return the patches for the entries that actually changed.
///
/// Never regroups, reorders, or re-reads the catalog.
pub fn refresh_statuses(view: &mut RosterView, session: &DraftSession) -> Vec<StatusPatch> {
    let mut patches = Vec::new();
    for group in &mut view.groups {
        for entry in &mut group.entries {
            let status = hero_status(session, entry.id);
            if status != entry.status {
                entry.status = status;
                patches.push(StatusPatch { hero_id: entry.id, status });
            }
        }
    }
    patches
}

/// Apply status patches to a view replica (the TUI's copy).
pub fn apply_status_patches(view: &mut RosterView, patches: &[StatusPatch]) {
    for patch in patches {
        for group in &mut view.groups {
            for entry in &mut group.entries {
                if entry.id == patch.hero_id {
                    entry.status = patch.status;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Turn banner
// ---------------------------------------------------------------------------

/// The turn indicator content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnBanner {
    /// No draft has been started.
    #[default]
    Inactive,
    /// A draft is in progress: this team acts next, with this phase.
    Active { team: Team, phase: Phase },
    /// The draft has completed; turn and phase are suppressed.
    Complete,
}

/// Project the turn banner from the session.
pub fn turn_banner(session: &DraftSession) -> TurnBanner {
    if session.current().is_none() {
        return TurnBanner::Inactive;
    }
    if session.is_terminal() {
        return TurnBanner::Complete;
    }
    match (session.acting_team(), session.acting_phase()) {
        (Some(team), Some(phase)) => TurnBanner::Active { team, phase },
        // A non-terminal active draft always has a team and phase.
        _ => TurnBanner::Inactive,
    }
}

// ---------------------------------------------------------------------------
// Team panels
// ---------------------------------------------------------------------------

/// Configured slot counts per team: how many pick and ban slots each panel
/// renders regardless of how many entries the snapshot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSlots {
    pub picks: usize,
    pub bans: usize,
}

/// One panel column: filled slots in sequence order, then explicit empties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotColumn {
    /// `Some(name)` for a filled slot, `None` for an empty one.
    pub slots: Vec<Option<String>>,
}

impl SlotColumn {
    fn project(heroes: &[crate::draft::hero::Hero], count: usize) -> SlotColumn {
        let slots = (0..count)
            .map(|idx| heroes.get(idx).map(|h| sanitize(&h.name)))
            .collect();
        SlotColumn { slots }
    }

    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Both teams' pick and ban columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamPanels {
    pub radiant_picks: SlotColumn,
    pub radiant_bans: SlotColumn,
    pub dire_picks: SlotColumn,
    pub dire_bans: SlotColumn,
}

/// Project the team panels from the session with the configured slot counts.
///
/// With no active draft every slot renders empty.
pub fn team_panels(session: &DraftSession, slots: PanelSlots) -> TeamPanels {
    match session.current() {
        Some(draft) => TeamPanels {
            radiant_picks: SlotColumn::project(&draft.radiant_picks, slots.picks),
            radiant_bans: SlotColumn::project(&draft.radiant_bans, slots.bans),
            dire_picks: SlotColumn::project(&draft.dire_picks, slots.picks),
            dire_bans: SlotColumn::project(&draft.dire_bans, slots.bans),
        },
        None => TeamPanels {
            radiant_picks: SlotColumn::project(&[], slots.picks),
            radiant_bans: SlotColumn::project(&[], slots.bans),
            dire_picks: SlotColumn::project(&[], slots.picks),
            dire_bans: SlotColumn::project(&[], slots.bans),
        },
    }
}

// ---------------------------------------------------------------------------
// Text sanitation
// ---------------------------------------------------------------------------

/// Strip control characters from catalog-sourced text before it reaches the
/// terminal. Escape sequences embedded in a hero name must not be able to
/// corrupt the display.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
