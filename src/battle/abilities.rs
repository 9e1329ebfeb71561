//! Data-driven ability records
//!
//! Ability content ships as external data (JSON) and is deserialized into
//! these records. The engine interprets trigger tags and effect kinds; kinds
//! it does not recognize are skipped with a warning, never a failure, so new
//! content cannot break turn resolution.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Which slot an ability can be equipped in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbilityKind {
    Reaction,
    Passive,
    Movement,
}

/// Trigger tag spelling: ability fires after the unit moved
pub const TAG_AFTER_MOVE: &str = "after-move";
/// Trigger tag spelling: ability fires after the unit stayed put
pub const TAG_AFTER_NO_MOVE: &str = "after-no-move";
/// Scaling tag: effect values multiply by tiles moved
pub const TAG_PER_TILE: &str = "per-tile";

/// One effect entry of an ability record.
///
/// `kind` stays an open string so content files can carry effects this
/// engine version does not know yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityEffect {
    pub kind: String,
    pub value: f32,
    #[serde(default)]
    pub duration: Option<u32>,
    /// Effect-specific flags, e.g. `"percentage"` for mana-restore or
    /// `"stat"` naming the target stat of a bonus/penalty
    #[serde(default)]
    pub stat: Option<String>,
    #[serde(default)]
    pub percentage: bool,
}

impl AbilityEffect {
    pub fn new(kind: impl Into<String>, value: f32) -> Self {
        Self {
            kind: kind.into(),
            value,
            duration: None,
            stat: None,
            percentage: false,
        }
    }
}

/// A complete ability record as loaded from content data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub name: String,
    pub ability_type: AbilityKind,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub effects: Vec<AbilityEffect>,
}

impl AbilityDefinition {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_per_tile(&self) -> bool {
        self.has_tag(TAG_PER_TILE)
    }
}

/// All ability records known to one encounter, keyed by name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilityBook {
    abilities: AHashMap<String, AbilityDefinition>,
}

impl AbilityBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a book from a JSON array of ability records
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        let list: Vec<AbilityDefinition> = serde_json::from_str(data)?;
        let mut book = Self::new();
        for ability in list {
            book.insert(ability);
        }
        Ok(book)
    }

    pub fn insert(&mut self, ability: AbilityDefinition) {
        self.abilities.insert(ability.name.clone(), ability);
    }

    pub fn get(&self, name: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(name)
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}
