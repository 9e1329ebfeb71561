//! One battle from deployment to last knockout
//!
//! `Encounter` owns the map, the occupancy manifest, the roster, and the
//! turn scheduler, and keeps them consistent: all moves are validated
//! against the reachable set before the manifest changes, and movement
//! abilities fire exactly once per completed move.

use ahash::AHashSet;
use rand::Rng;

use crate::battle::abilities::AbilityBook;
use crate::battle::calculations::{CombatOverrides, DamageType, WeaponProfile};
use crate::battle::grid::GridPos;
use crate::battle::manifest::UnitManifest;
use crate::battle::map::CombatMap;
use crate::battle::movement::{
    check_movement_ability, MovementAbilityResult, MovementTrigger, MovementTriggerContext,
};
use crate::battle::pathfinding::find_path;
use crate::battle::range::{movement_budget, reachable_costs, reachable_tiles};
use crate::battle::resolution::{resolve_attack, AttackOutcome};
use crate::battle::turn_order::{TurnOrderScheduler, TurnResolution};
use crate::battle::units::{CombatUnit, UnitRoster};
use crate::core::error::{EngineError, Result};
use crate::core::types::UnitId;

/// Aggregate state of one tactical battle
#[derive(Debug, Clone)]
pub struct Encounter {
    pub map: CombatMap,
    pub manifest: UnitManifest,
    pub roster: UnitRoster,
    pub scheduler: TurnOrderScheduler,
    pub abilities: AbilityBook,
    /// Resolution policy injected by tests and scripted scenes; stays in
    /// force until cleared
    pub overrides: CombatOverrides,
}

impl Encounter {
    pub fn new(map: CombatMap) -> Self {
        use crate::battle::constants::{MAX_ENCOUNTER_HEIGHT, MAX_ENCOUNTER_WIDTH};
        if map.width() > MAX_ENCOUNTER_WIDTH || map.height() > MAX_ENCOUNTER_HEIGHT {
            tracing::warn!(
                width = map.width(),
                height = map.height(),
                "map exceeds expected encounter scale"
            );
        }
        Self {
            map,
            manifest: UnitManifest::new(),
            roster: UnitRoster::new(),
            scheduler: TurnOrderScheduler::new(),
            abilities: AbilityBook::new(),
            overrides: CombatOverrides::NONE,
        }
    }

    pub fn with_abilities(mut self, abilities: AbilityBook) -> Self {
        self.abilities = abilities;
        self
    }

    /// Add a unit to the battle on the given tile
    pub fn spawn_unit(&mut self, unit: CombatUnit, pos: GridPos) -> Result<UnitId> {
        if !self.map.is_walkable(pos) {
            return Err(EngineError::InvalidMove(format!(
                "spawn tile {pos:?} is not walkable"
            )));
        }
        let id = unit.id;
        self.manifest.add_unit(id, pos)?;
        self.roster.insert(unit);
        tracing::info!(unit = ?id, ?pos, "unit deployed");
        Ok(id)
    }

    /// Remove a unit from the battle entirely (fled, despawned)
    pub fn remove_unit(&mut self, id: UnitId) -> Result<CombatUnit> {
        self.manifest.remove_unit(id)?;
        self.roster
            .remove(id)
            .ok_or(EngineError::UnitNotFound(id))
    }

    /// Tiles the unit may legally end its move on this turn
    pub fn reachable_for(&self, unit: UnitId) -> Result<AHashSet<GridPos>> {
        if !self.roster.contains(unit) {
            return Err(EngineError::UnitNotFound(unit));
        }
        let budget = movement_budget(&self.roster, unit);
        Ok(reachable_tiles(
            &self.map,
            &self.manifest,
            &self.roster,
            unit,
            budget,
        ))
    }

    /// Shortest walkable path between two tiles, occupancy ignored.
    /// A distance oracle for AI and range previews, not a legality check.
    pub fn path_between(&self, start: GridPos, end: GridPos, max_range: u32) -> Vec<GridPos> {
        find_path(&self.map, start, end, max_range)
    }

    /// Tick the scheduler until a unit is ready. `None` when nobody can act.
    pub fn next_actor(&mut self) -> Option<UnitId> {
        self.scheduler.advance_until_ready(&mut self.roster)
    }

    /// End the actor's turn with the chosen gauge resolution
    pub fn finish_turn(&mut self, actor: UnitId, resolution: TurnResolution) {
        self.scheduler
            .consume_turn(&mut self.roster, actor, resolution);
    }

    /// Move a unit to a destination in its reachable set and fire its
    /// movement ability. Destination equal to the current tile counts as
    /// deliberately staying put and fires the no-move trigger instead.
    pub fn perform_move(&mut self, unit: UnitId, dest: GridPos) -> Result<MovementAbilityResult> {
        let start = self
            .manifest
            .position_of(unit)
            .ok_or(EngineError::UnitNotFound(unit))?;

        let (tiles_moved, trigger) = if dest == start {
            (0, MovementTrigger::AfterNoMove)
        } else {
            let budget = movement_budget(&self.roster, unit);
            let costs = reachable_costs(&self.map, &self.manifest, &self.roster, unit, budget);
            let Some(&cost) = costs.get(&dest) else {
                return Err(EngineError::InvalidMove(format!(
                    "{dest:?} is not reachable from {start:?}"
                )));
            };
            self.manifest.move_unit(unit, dest)?;
            (cost, MovementTrigger::AfterMove)
        };

        tracing::info!(unit = ?unit, ?start, ?dest, tiles_moved, "move resolved");

        let ctx = MovementTriggerContext {
            trigger,
            mover: unit,
            start_position: start,
            end_position: dest,
            tiles_moved,
        };
        Ok(check_movement_ability(&ctx, &mut self.roster, &self.abilities))
    }

    /// Resolve one attack between two units in the battle. The defender
    /// keeps its tile even when knocked out.
    pub fn attack(
        &mut self,
        attacker: UnitId,
        defender: UnitId,
        weapon: Option<&WeaponProfile>,
        damage_type: DamageType,
        rng: &mut impl Rng,
    ) -> Result<AttackOutcome> {
        let attacker_unit = self
            .roster
            .get(attacker)
            .ok_or(EngineError::UnitNotFound(attacker))?
            .clone();
        let defender_unit = self
            .roster
            .get_mut(defender)
            .ok_or(EngineError::UnitNotFound(defender))?;

        Ok(resolve_attack(
            &attacker_unit,
            defender_unit,
            weapon,
            damage_type,
            &self.overrides,
            rng,
        ))
    }

    /// Units still standing, in roster join order
    pub fn living_units(&self) -> impl Iterator<Item = &CombatUnit> {
        self.roster.iter().filter(|u| !u.is_knocked_out())
    }

    /// True once at most one side has conscious units left
    pub fn is_over(&self) -> bool {
        let mut player_alive = false;
        let mut enemy_alive = false;
        for unit in self.living_units() {
            if unit.is_player_controlled {
                player_alive = true;
            } else {
                enemy_alive = true;
            }
        }
        !(player_alive && enemy_alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::units::{ClassKind, UnitStats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn squire(player: bool) -> CombatUnit {
        let unit = CombatUnit::new("unit", ClassKind::Squire, UnitStats::default());
        if player {
            unit.player_controlled()
        } else {
            unit
        }
    }

    #[test]
    fn test_spawn_rejects_wall_and_occupied() {
        let mut encounter = Encounter::new(CombatMap::new(8, 8).with_border_walls());
        assert!(matches!(
            encounter.spawn_unit(squire(true), GridPos::new(0, 0)),
            Err(EngineError::InvalidMove(_))
        ));

        encounter.spawn_unit(squire(true), GridPos::new(2, 2)).unwrap();
        assert!(matches!(
            encounter.spawn_unit(squire(true), GridPos::new(2, 2)),
            Err(EngineError::Manifest(_))
        ));
    }

    #[test]
    fn test_perform_move_updates_manifest() {
        let mut encounter = Encounter::new(CombatMap::new(8, 8));
        let id = encounter.spawn_unit(squire(true), GridPos::new(2, 2)).unwrap();

        encounter.perform_move(id, GridPos::new(4, 2)).unwrap();
        assert_eq!(encounter.manifest.position_of(id), Some(GridPos::new(4, 2)));
    }

    #[test]
    fn test_perform_move_rejects_out_of_range() {
        let mut encounter = Encounter::new(CombatMap::new(10, 10));
        let id = encounter.spawn_unit(squire(true), GridPos::new(2, 2)).unwrap();

        // Default movement is 3
        let err = encounter.perform_move(id, GridPos::new(8, 2)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidMove(_)));
        assert_eq!(encounter.manifest.position_of(id), Some(GridPos::new(2, 2)));
    }

    #[test]
    fn test_stay_put_is_not_an_error() {
        let mut encounter = Encounter::new(CombatMap::new(8, 8));
        let id = encounter.spawn_unit(squire(true), GridPos::new(2, 2)).unwrap();

        let result = encounter.perform_move(id, GridPos::new(2, 2)).unwrap();
        assert!(!result.executed);
        assert_eq!(encounter.manifest.position_of(id), Some(GridPos::new(2, 2)));
    }

    #[test]
    fn test_knocked_out_defender_keeps_tile() {
        let mut encounter = Encounter::new(CombatMap::new(8, 8));
        let attacker = encounter.spawn_unit(squire(true), GridPos::new(2, 2)).unwrap();
        let defender = encounter.spawn_unit(squire(false), GridPos::new(3, 2)).unwrap();

        encounter.overrides = CombatOverrides::default()
            .force_hit_chance(1.0)
            .force_damage(1000);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let outcome = encounter
            .attack(attacker, defender, None, DamageType::Physical, &mut rng)
            .unwrap();
        assert!(outcome.knocked_out);
        assert_eq!(encounter.manifest.position_of(defender), Some(GridPos::new(3, 2)));
        assert!(encounter.is_over());
    }

    #[test]
    fn test_attack_unknown_unit_errors() {
        let mut encounter = Encounter::new(CombatMap::new(8, 8));
        let attacker = encounter.spawn_unit(squire(true), GridPos::new(2, 2)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let err = encounter
            .attack(attacker, UnitId::new(), None, DamageType::Physical, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EngineError::UnitNotFound(_)));
    }

    #[test]
    fn test_remove_unit_clears_both_structures() {
        let mut encounter = Encounter::new(CombatMap::new(8, 8));
        let id = encounter.spawn_unit(squire(true), GridPos::new(2, 2)).unwrap();

        encounter.remove_unit(id).unwrap();
        assert!(encounter.manifest.position_of(id).is_none());
        assert!(!encounter.roster.contains(id));
    }

    #[test]
    fn test_turn_loop_runs_through_scheduler() {
        let mut encounter = Encounter::new(CombatMap::new(8, 8));
        let fast = {
            let mut u = squire(true);
            u.stats.speed = 20;
            encounter.spawn_unit(u, GridPos::new(2, 2)).unwrap()
        };
        let _slow = encounter.spawn_unit(squire(false), GridPos::new(5, 5)).unwrap();

        let actor = encounter.next_actor().unwrap();
        assert_eq!(actor, fast);
        encounter.finish_turn(actor, TurnResolution::EndTurn);
        assert_eq!(encounter.roster.get(fast).unwrap().turn_gauge, 0);
    }
}
