//! Combat units and the encounter roster
//!
//! A unit's wounds accumulate; it is knocked out once wounds reach max
//! health. Knocked-out units keep their tile but stop acting.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::battle::constants::GAUGE_READY;
use crate::battle::modifiers::{StatKind, StatModifier};
use crate::core::types::UnitId;

/// Character classes. Every unit has a primary class and may have a secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Squire,
    Knight,
    Archer,
    Mage,
    Priest,
    Thief,
    Monk,
    Monster,
}

/// Equipped ability slots, one per slot kind.
///
/// Capability is explicit: a unit without a movement ability has `movement`
/// set to `None`, and the movement handler checks exactly that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlots {
    pub reaction: Option<String>,
    pub passive: Option<String>,
    pub movement: Option<String>,
}

/// Base stat block. All stats are integers by construction, so the combat
/// formulas never see non-finite inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub max_health: i32,
    pub max_mana: i32,
    pub physical_power: i32,
    pub magic_power: i32,
    pub speed: i32,
    pub movement: i32,
    pub physical_evade: i32,
    pub magic_evade: i32,
    pub courage: i32,
    pub attunement: i32,
}

impl Default for UnitStats {
    fn default() -> Self {
        Self {
            max_health: 100,
            max_mana: 30,
            physical_power: 10,
            magic_power: 10,
            speed: 8,
            movement: 3,
            physical_evade: 5,
            magic_evade: 5,
            courage: 10,
            attunement: 10,
        }
    }
}

/// A combatant in one encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatUnit {
    pub id: UnitId,
    pub name: String,
    pub primary_class: ClassKind,
    pub secondary_class: Option<ClassKind>,
    pub stats: UnitStats,

    /// Accumulated damage; knocked out once wounds >= max_health
    pub wounds: u32,
    pub mana: u32,
    /// Initiative accumulator, 0..=100; the unit acts at 100
    pub turn_gauge: u32,
    pub is_player_controlled: bool,

    pub slots: AbilitySlots,
    pub learned_abilities: AHashSet<String>,
    pub active_modifiers: Vec<StatModifier>,
}

impl CombatUnit {
    pub fn new(name: impl Into<String>, primary_class: ClassKind, stats: UnitStats) -> Self {
        Self {
            id: UnitId::new(),
            name: name.into(),
            primary_class,
            secondary_class: None,
            stats,
            wounds: 0,
            mana: stats.max_mana.max(0) as u32,
            turn_gauge: 0,
            is_player_controlled: false,
            slots: AbilitySlots::default(),
            learned_abilities: AHashSet::new(),
            active_modifiers: Vec::new(),
        }
    }

    pub fn player_controlled(mut self) -> Self {
        self.is_player_controlled = true;
        self
    }

    pub fn with_movement_ability(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.learned_abilities.insert(name.clone());
        self.slots.movement = Some(name);
        self
    }

    /// Knocked out once accumulated wounds meet or exceed max health
    pub fn is_knocked_out(&self) -> bool {
        self.wounds >= self.stats.max_health.max(0) as u32
    }

    pub fn current_health(&self) -> u32 {
        (self.stats.max_health.max(0) as u32).saturating_sub(self.wounds)
    }

    /// Effective stat value: base plus active modifier magnitudes
    pub fn stat(&self, kind: StatKind) -> i32 {
        let base = match kind {
            StatKind::PhysicalPower => self.stats.physical_power,
            StatKind::MagicPower => self.stats.magic_power,
            StatKind::Speed => self.stats.speed,
            StatKind::Movement => self.stats.movement,
            StatKind::PhysicalEvade => self.stats.physical_evade,
            StatKind::MagicEvade => self.stats.magic_evade,
            StatKind::Courage => self.stats.courage,
            StatKind::Attunement => self.stats.attunement,
        };
        let bonus: i32 = self
            .active_modifiers
            .iter()
            .filter(|m| m.stat == kind && !m.is_expired())
            .map(|m| m.magnitude)
            .sum();
        base + bonus
    }

    /// Add damage as wounds, capped at max health
    pub fn apply_damage(&mut self, damage: u32) {
        let cap = self.stats.max_health.max(0) as u32;
        self.wounds = self.wounds.saturating_add(damage).min(cap);
    }

    /// Remove wounds; returns the amount actually healed (no overheal)
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.wounds);
        self.wounds -= healed;
        healed
    }

    /// Restore mana; returns the amount actually restored
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let cap = self.stats.max_mana.max(0) as u32;
        let restored = amount.min(cap.saturating_sub(self.mana));
        self.mana += restored;
        restored
    }

    pub fn spend_mana(&mut self, amount: u32) -> bool {
        if self.mana >= amount {
            self.mana -= amount;
            true
        } else {
            false
        }
    }

    /// Advance the turn gauge by the unit's speed, saturating at ready.
    /// Knocked-out units never accrue.
    pub fn accrue_gauge(&mut self) {
        if self.is_knocked_out() {
            return;
        }
        let speed = self.stat(StatKind::Speed).max(0) as u32;
        self.turn_gauge = (self.turn_gauge + speed).min(GAUGE_READY);
    }

    pub fn is_ready(&self) -> bool {
        !self.is_knocked_out() && self.turn_gauge >= GAUGE_READY
    }

    /// Consume one turn of duration on every modifier and drop expired ones
    pub fn expire_modifiers(&mut self) {
        for modifier in &mut self.active_modifiers {
            modifier.tick();
        }
        self.active_modifiers.retain(|m| !m.is_expired());
    }
}

/// All units in one encounter, keyed by stable id.
///
/// Insertion order is retained and used as the deterministic tie-break for
/// turn scheduling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitRoster {
    units: ahash::AHashMap<UnitId, CombatUnit>,
    join_order: Vec<UnitId>,
}

impl UnitRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, unit: CombatUnit) -> UnitId {
        let id = unit.id;
        if !self.units.contains_key(&id) {
            self.join_order.push(id);
        }
        self.units.insert(id, unit);
        id
    }

    pub fn remove(&mut self, id: UnitId) -> Option<CombatUnit> {
        self.join_order.retain(|&u| u != id);
        self.units.remove(&id)
    }

    pub fn get(&self, id: UnitId) -> Option<&CombatUnit> {
        self.units.get(&id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut CombatUnit> {
        self.units.get_mut(&id)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Position of a unit in roster insertion order
    pub fn join_index(&self, id: UnitId) -> Option<usize> {
        self.join_order.iter().position(|&u| u == id)
    }

    /// Units in deterministic insertion order
    pub fn iter(&self) -> impl Iterator<Item = &CombatUnit> {
        self.join_order.iter().filter_map(|id| self.units.get(id))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CombatUnit> {
        self.units.values_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.join_order.iter().copied()
    }
}
