//! Movement range: the set of tiles a unit may legally end its move on
//!
//! One breadth-first flood fill applies two different rules:
//!
//! - **passage**: may the search expand *through* a tile? Friendly units and
//!   knocked-out units of either side are passed through; an active enemy
//!   blocks.
//! - **destination**: may the unit *stop* on a tile? Only if nobody is
//!   standing there, knocked out or not.
//!
//! The frontier is driven by the passage rule; the returned set is filtered
//! by the stricter destination rule.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};

use crate::battle::grid::GridPos;
use crate::battle::manifest::UnitManifest;
use crate::battle::map::CombatMap;
use crate::battle::modifiers::StatKind;
use crate::battle::units::UnitRoster;
use crate::core::types::UnitId;

/// Tiles the mover may legally end movement on, within its movement budget.
///
/// Never contains the mover's start tile or any occupied tile. Invalid
/// input (untracked mover, non-positive movement, start off the map) yields
/// the empty set.
pub fn reachable_tiles(
    map: &CombatMap,
    manifest: &UnitManifest,
    roster: &UnitRoster,
    mover: UnitId,
    movement: i32,
) -> AHashSet<GridPos> {
    reachable_costs(map, manifest, roster, mover, movement)
        .into_keys()
        .collect()
}

/// Same flood fill as [`reachable_tiles`], retaining the step count to each
/// legal destination. Used to report how far a unit actually moved.
pub fn reachable_costs(
    map: &CombatMap,
    manifest: &UnitManifest,
    roster: &UnitRoster,
    mover: UnitId,
    movement: i32,
) -> AHashMap<GridPos, u32> {
    let mut result = AHashMap::new();

    let Some(mover_unit) = roster.get(mover) else {
        return result;
    };
    let Some(start) = manifest.position_of(mover) else {
        return result;
    };
    if movement <= 0 || !map.in_bounds(start) {
        return result;
    }
    let budget = movement as u32;
    let mover_side = mover_unit.is_player_controlled;

    let mut frontier = VecDeque::new();
    let mut visited: AHashSet<GridPos> = AHashSet::new();

    frontier.push_back((start, 0u32));
    visited.insert(start);

    while let Some((current, steps)) = frontier.pop_front() {
        if steps + 1 > budget {
            continue;
        }

        for neighbor in current.neighbors() {
            if visited.contains(&neighbor) || !map.is_walkable(neighbor) {
                continue;
            }

            let occupant = manifest.unit_at(neighbor).and_then(|id| roster.get(id));
            let (passable, stoppable) = match occupant {
                // Empty tile: open for both passage and stopping
                None => (true, true),
                Some(other) => {
                    if other.is_knocked_out() {
                        // Knocked-out bodies are stepped over, never onto
                        (true, false)
                    } else if other.is_player_controlled == mover_side {
                        (true, false)
                    } else {
                        // Active enemy: hard stop
                        (false, false)
                    }
                }
            };

            if !passable {
                continue;
            }

            visited.insert(neighbor);
            if stoppable {
                result.insert(neighbor, steps + 1);
            }
            frontier.push_back((neighbor, steps + 1));
        }
    }

    result
}

/// Movement budget for a unit, modifiers included
pub fn movement_budget(roster: &UnitRoster, unit: UnitId) -> i32 {
    roster
        .get(unit)
        .map(|u| u.stat(StatKind::Movement))
        .unwrap_or(0)
}
