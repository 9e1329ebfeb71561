//! Timed stat modifiers (buffs and debuffs)
//!
//! A modifier adds a flat magnitude to one stat for a fixed number of the
//! owner's turns, then expires.

use serde::{Deserialize, Serialize};

/// Stats a modifier can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    PhysicalPower,
    MagicPower,
    Speed,
    Movement,
    PhysicalEvade,
    MagicEvade,
    Courage,
    Attunement,
}

impl StatKind {
    /// Parse the data-file spelling of a stat name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "physical-power" => Some(StatKind::PhysicalPower),
            "magic-power" => Some(StatKind::MagicPower),
            "speed" => Some(StatKind::Speed),
            "movement" => Some(StatKind::Movement),
            "physical-evade" => Some(StatKind::PhysicalEvade),
            "magic-evade" => Some(StatKind::MagicEvade),
            "courage" => Some(StatKind::Courage),
            "attunement" => Some(StatKind::Attunement),
            _ => None,
        }
    }
}

/// A transient buff (positive magnitude) or debuff (negative magnitude)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: StatKind,
    pub magnitude: i32,
    pub remaining_turns: u32,
    pub source: String,
}

impl StatModifier {
    pub fn new(stat: StatKind, magnitude: i32, duration: u32, source: impl Into<String>) -> Self {
        Self {
            stat,
            magnitude,
            remaining_turns: duration,
            source: source.into(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_turns == 0
    }

    /// Consume one turn of duration
    pub fn tick(&mut self) {
        self.remaining_turns = self.remaining_turns.saturating_sub(1);
    }
}
