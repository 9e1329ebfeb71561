//! Battle system - grid-based tactical combat resolution
//!
//! The encounter driver asks three questions each turn: where can the active
//! unit go, whose turn comes next, and what does an attack do. Everything
//! else (rendering, input, AI strategy, persistence) lives outside this
//! module and calls in through [`encounter::Encounter`].

pub mod abilities;
pub mod calculations;
pub mod constants;
pub mod encounter;
pub mod grid;
pub mod manifest;
pub mod map;
pub mod modifiers;
pub mod movement;
pub mod pathfinding;
pub mod range;
pub mod resolution;
pub mod turn_order;
pub mod units;

// Re-exports for convenient access
pub use abilities::{AbilityBook, AbilityDefinition, AbilityEffect, AbilityKind};
pub use calculations::{attack_damage, chance_to_hit, CombatOverrides, DamageType, WeaponProfile};
pub use constants::*;
pub use encounter::Encounter;
pub use grid::{CardinalDirection, GridPos};
pub use manifest::{ManifestError, UnitManifest};
pub use map::{CombatMap, Terrain, Tile};
pub use modifiers::{StatKind, StatModifier};
pub use movement::{
    check_movement_ability, MovementAbilityResult, MovementTrigger, MovementTriggerContext,
};
pub use pathfinding::find_path;
pub use range::{reachable_costs, reachable_tiles};
pub use resolution::{resolve_attack, AttackOutcome};
pub use turn_order::{TurnOrderScheduler, TurnResolution};
pub use units::{AbilitySlots, ClassKind, CombatUnit, UnitRoster, UnitStats};
