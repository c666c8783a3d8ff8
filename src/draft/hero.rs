// Hero catalog entry and primary attribute classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A hero's primary attribute, used for grouping and filtering the roster.
///
/// The wire format uses SCREAMING_SNAKE_CASE to match the authority's JSON
/// (`"STRENGTH"`, `"AGILITY"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeroAttribute {
    Strength,
    Agility,
    Intelligence,
    Universal,
}

/// The fixed display ordering for attribute groups in the roster view.
pub const ATTRIBUTE_ORDER: [HeroAttribute; 4] = [
    HeroAttribute::Strength,
    HeroAttribute::Agility,
    HeroAttribute::Intelligence,
    HeroAttribute::Universal,
];

impl HeroAttribute {
    /// Short display label for panel titles and the filter indicator.
    pub fn label(&self) -> &'static str {
        match self {
            HeroAttribute::Strength => "STR",
            HeroAttribute::Agility => "AGI",
            HeroAttribute::Intelligence => "INT",
            HeroAttribute::Universal => "UNI",
        }
    }

    /// The next attribute in the filter cycle, wrapping to `None` after the
    /// last entry. `None` means "all attributes".
    pub fn cycle(current: Option<HeroAttribute>) -> Option<HeroAttribute> {
        match current {
            None => Some(ATTRIBUTE_ORDER[0]),
            Some(attr) => {
                let idx = ATTRIBUTE_ORDER.iter().position(|a| *a == attr);
                match idx {
                    Some(i) if i + 1 < ATTRIBUTE_ORDER.len() => Some(ATTRIBUTE_ORDER[i + 1]),
                    _ => None,
                }
            }
        }
    }
}

impl fmt::Display for HeroAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeroAttribute::Strength => "Strength",
            HeroAttribute::Agility => "Agility",
            HeroAttribute::Intelligence => "Intelligence",
            HeroAttribute::Universal => "Universal",
        };
        write!(f, "{}", name)
    }
}

/// A single entry in the hero catalog.
///
/// Heroes are immutable once loaded; the whole collection is replaced
/// wholesale on sync, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    /// Stable catalog identifier assigned by the roster source.
    pub id: i64,
    /// Display name.
    pub name: String,
    pub primary_attribute: HeroAttribute,
    /// Portrait reference. May be unreachable; it is display-only and never
    /// fetched by this client.
    #[serde(default)]
    pub image_url: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_wire_format_is_screaming_snake() {
        let json = serde_json::to_string(&HeroAttribute::Intelligence).unwrap();
        assert_eq!(json, "\"INTELLIGENCE\"");
        let back: HeroAttribute = serde_json::from_str("\"UNIVERSAL\"").unwrap();
        assert_eq!(back, HeroAttribute::Universal);
    }

    #[test]
    fn hero_deserializes_camel_case_payload() {
        let json = r#"{
            "id": 14,
            "name": "Pudge",
            "primaryAttribute": "STRENGTH",
            "imageUrl": "https://cdn.example.com/pudge.png"
        }"#;
        let hero: Hero = serde_json::from_str(json).unwrap();
        assert_eq!(hero.id, 14);
        assert_eq!(hero.name, "Pudge");
        assert_eq!(hero.primary_attribute, HeroAttribute::Strength);
        assert_eq!(hero.image_url, "https://cdn.example.com/pudge.png");
    }

    #[test]
    fn hero_tolerates_missing_image_url() {
        let json = r#"{"id": 1, "name": "Axe", "primaryAttribute": "STRENGTH"}"#;
        let hero: Hero = serde_json::from_str(json).unwrap();
        assert!(hero.image_url.is_empty());
    }

    #[test]
    fn attribute_cycle_covers_all_and_wraps() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..ATTRIBUTE_ORDER.len() {
            current = HeroAttribute::cycle(current);
            seen.push(current.unwrap());
        }
        assert_eq!(seen, ATTRIBUTE_ORDER);
        assert_eq!(HeroAttribute::cycle(current), None);
    }
}
