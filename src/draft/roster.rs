// Roster store: the per-session hero catalog with lookup and filter queries.

use std::collections::HashMap;

use crate::draft::hero::{Hero, HeroAttribute};

/// Holds the hero catalog for the session.
///
/// The catalog is read-only between loads: a successful fetch replaces the
/// whole collection atomically, and a failed fetch leaves the previous
/// contents untouched. Draft actions never mutate it.
#[derive(Debug, Default)]
pub struct RosterStore {
    heroes: Vec<Hero>,
    by_id: HashMap<i64, usize>,
}

impl RosterStore {
    pub fn new() -> Self {
        RosterStore::default()
    }

    /// Replace the entire catalog with a freshly fetched collection.
    ///
    /// Rebuilds the id index. Order is preserved as returned by the roster
    /// source; `filter` results keep that order.
    pub fn replace_all(&mut self, heroes: Vec<Hero>) {
        self.by_id = heroes
            .iter()
            .enumerate()
            .map(|(idx, hero)| (hero.id, idx))
            .collect();
        self.heroes = heroes;
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    /// Look up a hero by id.
    pub fn find_by_id(&self, id: i64) -> Option<&Hero> {
        self.by_id.get(&id).map(|&idx| &self.heroes[idx])
    }

    /// Display name for a hero id, falling back to "Unknown" for ids not in
    /// the catalog (e.g. a draft snapshot referencing a hero from before a
    /// re-sync).
    pub fn display_name(&self, id: i64) -> &str {
        self.find_by_id(id).map(|h| h.name.as_str()).unwrap_or("Unknown")
    }

    /// The heroes whose name contains `search` (case-insensitive) and, when
    /// `attribute` is given, whose primary attribute matches it.
    ///
    /// Pure query: original catalog order, no side effects. An empty search
    /// string matches every hero.
    pub fn filter(&self, search: &str, attribute: Option<HeroAttribute>) -> Vec<&Hero> {
        let needle = search.to_lowercase();
        self.heroes
            .iter()
            .filter(|hero| {
                let name_matches = needle.is_empty() || hero.name.to_lowercase().contains(&needle);
                let attr_matches = attribute.is_none_or(|a| hero.primary_attribute == a);
                name_matches && attr_matches
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
