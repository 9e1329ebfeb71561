//! Turn scheduling via per-unit initiative gauges
//!
//! Every simulation tick, each conscious unit's gauge rises by its speed and
//! saturates at [`GAUGE_READY`]. A unit whose gauge is full becomes the
//! active actor. Ties within one tick resolve deterministically: higher
//! speed acts first, then earlier registration order.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{GAUGE_READY, GAUGE_RESET_DELAY, GAUGE_RESET_END_TURN};
use crate::battle::modifiers::StatKind;
use crate::battle::units::UnitRoster;
use crate::core::types::{Tick, UnitId};

/// How the active unit finished its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnResolution {
    /// Full reset: the unit forfeits all accrued gauge
    EndTurn,
    /// Partial reset: the unit keeps half a bar and acts again sooner
    Delay,
}

impl TurnResolution {
    pub fn gauge_after(&self) -> u32 {
        match self {
            TurnResolution::EndTurn => GAUGE_RESET_END_TURN,
            TurnResolution::Delay => GAUGE_RESET_DELAY,
        }
    }
}

/// Gauge-based initiative scheduler for one encounter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnOrderScheduler {
    clock: Tick,
}

impl TurnOrderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    /// Advance every conscious unit's gauge by one tick of its speed
    pub fn advance_tick(&mut self, roster: &mut UnitRoster) {
        self.clock += 1;
        for unit in roster.iter_mut() {
            unit.accrue_gauge();
        }
    }

    /// The unit whose turn it is, if any gauge is full.
    ///
    /// Tie-break when several units are ready in the same tick: higher
    /// effective speed first, then earlier roster join order. Knocked-out
    /// units are never selected.
    pub fn current_actor(&self, roster: &UnitRoster) -> Option<UnitId> {
        roster
            .iter()
            .filter(|unit| unit.is_ready())
            .max_by(|a, b| {
                let speed_a = a.stat(StatKind::Speed);
                let speed_b = b.stat(StatKind::Speed);
                speed_a.cmp(&speed_b).then_with(|| {
                    // Later join order loses
                    roster
                        .join_index(b.id)
                        .cmp(&roster.join_index(a.id))
                })
            })
            .map(|unit| unit.id)
    }

    /// Tick until some unit is ready, then return it. `None` when no unit
    /// can ever become ready (all knocked out or zero speed).
    pub fn advance_until_ready(&mut self, roster: &mut UnitRoster) -> Option<UnitId> {
        if let Some(actor) = self.current_actor(roster) {
            return Some(actor);
        }
        let can_accrue = roster
            .iter()
            .any(|u| !u.is_knocked_out() && u.stat(StatKind::Speed) > 0);
        if !can_accrue {
            return None;
        }
        loop {
            self.advance_tick(roster);
            if let Some(actor) = self.current_actor(roster) {
                return Some(actor);
            }
        }
    }

    /// Reset the actor's gauge per the chosen resolution and expire one turn
    /// of its stat modifiers
    pub fn consume_turn(
        &mut self,
        roster: &mut UnitRoster,
        actor: UnitId,
        resolution: TurnResolution,
    ) {
        if let Some(unit) = roster.get_mut(actor) {
            unit.turn_gauge = resolution.gauge_after();
            unit.expire_modifiers();
        }
    }
}
