// Draft session: the client's cached copy of the authority's draft state,
// plus the read-only turn/phase projections derived from it.
//
// The authority owns the true state. Every transition here is the result of
// accepting a full snapshot returned by a successful remote call; the client
// never computes turn advancement locally.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::draft::hero::Hero;

/// Which side acts next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Radiant,
    Dire,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Radiant => write!(f, "Radiant"),
            Team::Dire => write!(f, "Dire"),
        }
    }
}

/// Whether the current turn claims a hero or removes one from availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pick,
    Ban,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Pick => write!(f, "PICK"),
            Phase::Ban => write!(f, "BAN"),
        }
    }
}

/// A full draft snapshot as returned by the authority.
///
/// The four hero sequences are append-only on the authority side and pairwise
/// disjoint: a hero id appears in at most one of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    /// Authority-assigned draft instance id.
    pub id: i64,
    /// Server-side creation time, when the authority reports one.
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub radiant_picks: Vec<Hero>,
    #[serde(default)]
    pub dire_picks: Vec<Hero>,
    #[serde(default)]
    pub radiant_bans: Vec<Hero>,
    #[serde(default)]
    pub dire_bans: Vec<Hero>,
    /// true = Radiant acts next.
    pub radiant_turn: bool,
    /// true = the next action is a pick, false = a ban.
    pub pick_phase: bool,
    /// Terminal flag; once true, turn and phase are no longer meaningful.
    pub complete: bool,
}

impl DraftSnapshot {
    fn contains(list: &[Hero], hero_id: i64) -> bool {
        list.iter().any(|h| h.id == hero_id)
    }

    /// Whether either team has picked this hero.
    pub fn is_picked(&self, hero_id: i64) -> bool {
        Self::contains(&self.radiant_picks, hero_id) || Self::contains(&self.dire_picks, hero_id)
    }

    /// Whether either team has banned this hero.
    pub fn is_banned(&self, hero_id: i64) -> bool {
        Self::contains(&self.radiant_bans, hero_id) || Self::contains(&self.dire_bans, hero_id)
    }
}

/// The client's cached draft state, or no active draft.
///
/// `replace` is the only mutation: the cached snapshot is swapped wholesale
/// after a successful remote call. No field-level patching is permitted.
#[derive(Debug, Default)]
pub struct DraftSession {
    current: Option<DraftSnapshot>,
}

impl DraftSession {
    pub fn new() -> Self {
        DraftSession::default()
    }

    /// The cached snapshot, or `None` when no draft is active.
    pub fn current(&self) -> Option<&DraftSnapshot> {
        self.current.as_ref()
    }

    /// Wholesale-replace the cached snapshot with an authoritative one.
    pub fn replace(&mut self, snapshot: DraftSnapshot) {
        self.current = Some(snapshot);
    }

    /// Whether this hero appears in either team's picks. False with no draft.
    pub fn is_picked(&self, hero_id: i64) -> bool {
        self.current.as_ref().is_some_and(|d| d.is_picked(hero_id))
    }

    /// Whether this hero appears in either team's bans. False with no draft.
    pub fn is_banned(&self, hero_id: i64) -> bool {
        self.current.as_ref().is_some_and(|d| d.is_banned(hero_id))
    }

    /// The team that acts next, while a non-terminal draft is active.
    pub fn acting_team(&self) -> Option<Team> {
        let draft = self.current.as_ref()?;
        if draft.complete {
            return None;
        }
        Some(if draft.radiant_turn { Team::Radiant } else { Team::Dire })
    }

    /// Whether the next action is a pick or a ban, while a non-terminal draft
    /// is active.
    pub fn acting_phase(&self) -> Option<Phase> {
        let draft = self.current.as_ref()?;
        if draft.complete {
            return None;
        }
        Some(if draft.pick_phase { Phase::Pick } else { Phase::Ban })
    }

    /// True once the active draft has completed. False with no draft.
    pub fn is_terminal(&self) -> bool {
        self.current.as_ref().is_some_and(|d| d.complete)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
