//! Movement-triggered ability evaluation
//!
//! After a unit moves (or deliberately stays put), its equipped movement
//! ability may fire. Effects mutate the mover in place; the result records
//! what happened for the encounter log.

use serde::{Deserialize, Serialize};

use crate::battle::abilities::{AbilityBook, TAG_AFTER_MOVE, TAG_AFTER_NO_MOVE};
use crate::battle::constants::DEFAULT_MODIFIER_DURATION;
use crate::battle::grid::GridPos;
use crate::battle::modifiers::{StatKind, StatModifier};
use crate::battle::units::UnitRoster;
use crate::core::types::UnitId;

/// What kind of movement event just happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementTrigger {
    AfterMove,
    AfterNoMove,
}

impl MovementTrigger {
    fn tag(&self) -> &'static str {
        match self {
            MovementTrigger::AfterMove => TAG_AFTER_MOVE,
            MovementTrigger::AfterNoMove => TAG_AFTER_NO_MOVE,
        }
    }
}

/// One movement event, as seen by the trigger evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementTriggerContext {
    pub trigger: MovementTrigger,
    pub mover: UnitId,
    pub start_position: GridPos,
    pub end_position: GridPos,
    pub tiles_moved: u32,
}

/// Outcome of evaluating one movement trigger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementAbilityResult {
    pub executed: bool,
    pub log_messages: Vec<String>,
}

/// Evaluate the mover's movement ability against a movement event.
///
/// No-op when the mover has no movement-slot ability, is knocked out, or
/// the ability's trigger tag does not match the event. `per-tile` abilities
/// scale every numeric effect value by `tiles_moved`. Unsupported effect
/// kinds are logged and skipped; they never abort turn resolution.
pub fn check_movement_ability(
    ctx: &MovementTriggerContext,
    roster: &mut UnitRoster,
    book: &AbilityBook,
) -> MovementAbilityResult {
    let mut result = MovementAbilityResult::default();

    let Some(mover) = roster.get(ctx.mover) else {
        return result;
    };
    if mover.is_knocked_out() {
        return result;
    }
    let Some(ability_name) = mover.slots.movement.clone() else {
        return result;
    };
    let Some(ability) = book.get(&ability_name) else {
        tracing::warn!(ability = %ability_name, "equipped movement ability missing from book");
        return result;
    };
    if !ability.has_tag(ctx.trigger.tag()) {
        return result;
    }

    let scale = if ability.is_per_tile() {
        ctx.tiles_moved as f32
    } else {
        1.0
    };

    // Effects clone keeps the borrow checker out of the mutation below
    let effects = ability.effects.clone();
    let ability_name = ability.name.clone();
    let Some(mover) = roster.get_mut(ctx.mover) else {
        return result;
    };

    for effect in &effects {
        let scaled = effect.value * scale;
        match effect.kind.as_str() {
            "heal" => {
                let healed = mover.heal(scaled.max(0.0) as u32);
                if healed > 0 {
                    result.executed = true;
                    result
                        .log_messages
                        .push(format!("{} recovers {} health ({})", mover.name, healed, ability_name));
                }
            }
            "mana-restore" => {
                let amount = if effect.percentage {
                    let max = mover.stats.max_mana.max(0) as f32;
                    (max * scaled / 100.0).floor() as u32
                } else {
                    scaled.max(0.0) as u32
                };
                let restored = mover.restore_mana(amount);
                if restored > 0 {
                    result.executed = true;
                    result
                        .log_messages
                        .push(format!("{} recovers {} mana ({})", mover.name, restored, ability_name));
                }
            }
            "stat-bonus" | "stat-penalty" => {
                let Some(stat) = effect.stat.as_deref().and_then(StatKind::parse) else {
                    tracing::warn!(
                        ability = %ability_name,
                        stat = ?effect.stat,
                        "stat effect names no parsable stat, skipping"
                    );
                    continue;
                };
                let magnitude = if effect.kind == "stat-penalty" {
                    -(scaled as i32)
                } else {
                    scaled as i32
                };
                let duration = effect.duration.unwrap_or(DEFAULT_MODIFIER_DURATION);
                mover
                    .active_modifiers
                    .push(StatModifier::new(stat, magnitude, duration, ability_name.clone()));
                result.executed = true;
                result.log_messages.push(format!(
                    "{} gains {:+} {:?} for {} turns ({})",
                    mover.name, magnitude, stat, duration, ability_name
                ));
            }
            other => {
                tracing::warn!(ability = %ability_name, kind = %other, "unsupported effect kind, skipping");
                result
                    .log_messages
                    .push(format!("{ability_name}: unsupported effect '{other}' skipped"));
            }
        }
    }

    result
}
