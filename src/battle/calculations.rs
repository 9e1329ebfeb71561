//! Pure combat formulas: hit chance and attack damage
//!
//! Stateless and deterministic. Tests and scripted scenes inject a
//! [`CombatOverrides`] value instead of mutating any global hook; an override
//! stays in force until its holder clears it.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{HIT_CHANCE_MAX, HIT_CHANCE_MIN, MENTAL_DIFF_SCALE};
use crate::battle::modifiers::StatKind;
use crate::battle::units::CombatUnit;

/// Damage channel of an attack or spell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Physical,
    Magical,
}

impl DamageType {
    /// Attacker power stat for this channel
    pub fn power_stat(&self) -> StatKind {
        match self {
            DamageType::Physical => StatKind::PhysicalPower,
            DamageType::Magical => StatKind::MagicPower,
        }
    }

    /// Defender evade stat for this channel
    pub fn evade_stat(&self) -> StatKind {
        match self {
            DamageType::Physical => StatKind::PhysicalEvade,
            DamageType::Magical => StatKind::MagicEvade,
        }
    }

    /// Mental stat whose differential shifts hit chance and damage
    pub fn mental_stat(&self) -> StatKind {
        match self {
            DamageType::Physical => StatKind::Courage,
            DamageType::Magical => StatKind::Attunement,
        }
    }
}

/// Per-channel weapon contribution: additive power modifier and
/// multiplicative power multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub physical_modifier: i32,
    pub physical_multiplier: f32,
    pub magical_modifier: i32,
    pub magical_multiplier: f32,
}

impl WeaponProfile {
    /// Bare hands: raw base power, nothing added, nothing multiplied
    pub const UNARMED: WeaponProfile = WeaponProfile {
        physical_modifier: 0,
        physical_multiplier: 1.0,
        magical_modifier: 0,
        magical_multiplier: 1.0,
    };

    pub fn modifier(&self, damage_type: DamageType) -> i32 {
        match damage_type {
            DamageType::Physical => self.physical_modifier,
            DamageType::Magical => self.magical_modifier,
        }
    }

    pub fn multiplier(&self, damage_type: DamageType) -> f32 {
        match damage_type {
            DamageType::Physical => self.physical_multiplier,
            DamageType::Magical => self.magical_multiplier,
        }
    }
}

impl Default for WeaponProfile {
    fn default() -> Self {
        Self::UNARMED
    }
}

/// Injected resolution policy for deterministic testing and scripted
/// scenes. A set field persists until explicitly cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CombatOverrides {
    pub hit_chance: Option<f32>,
    pub damage: Option<u32>,
}

impl CombatOverrides {
    pub const NONE: CombatOverrides = CombatOverrides {
        hit_chance: None,
        damage: None,
    };

    pub fn force_hit_chance(mut self, chance: f32) -> Self {
        self.hit_chance = Some(chance);
        self
    }

    pub fn force_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn clear(&mut self) {
        *self = Self::NONE;
    }
}

/// Probability in [0.03, 0.97] that an attack connects.
///
/// base% = 100 - defender evade for the channel; a positive mental stat
/// differential (attacker minus defender) adds 0.25% per point.
pub fn chance_to_hit(
    attacker: &CombatUnit,
    defender: &CombatUnit,
    damage_type: DamageType,
    overrides: &CombatOverrides,
) -> f32 {
    if let Some(chance) = overrides.hit_chance {
        return chance;
    }

    let evade = defender.stat(damage_type.evade_stat());
    let base = 100.0 - evade as f32;

    let mental = damage_type.mental_stat();
    let diff = (attacker.stat(mental) - defender.stat(mental)).max(0);
    let bonus = diff as f32 * MENTAL_DIFF_SCALE;

    (base + bonus).clamp(HIT_CHANCE_MIN, HIT_CHANCE_MAX) / 100.0
}

/// Damage an attack deals on a hit; always a non-negative integer.
///
/// raw = (power + weapon modifier) × weapon multiplier; a positive mental
/// differential in the *defender's* favor shaves floor(diff × 0.25) off.
pub fn attack_damage(
    attacker: &CombatUnit,
    weapon: Option<&WeaponProfile>,
    defender: &CombatUnit,
    damage_type: DamageType,
    overrides: &CombatOverrides,
) -> u32 {
    if let Some(damage) = overrides.damage {
        return damage;
    }

    let weapon = weapon.copied().unwrap_or(WeaponProfile::UNARMED);
    let base_power = attacker.stat(damage_type.power_stat());
    let raw = (base_power + weapon.modifier(damage_type)) as f32 * weapon.multiplier(damage_type);

    let mental = damage_type.mental_stat();
    let diff = (defender.stat(mental) - attacker.stat(mental)).max(0);
    let penalty = (diff as f32 * MENTAL_DIFF_SCALE).floor();

    (raw - penalty).max(0.0).floor() as u32
}
