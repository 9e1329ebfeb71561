//! Shortest-path search for movement preview and AI distance estimates
//!
//! Occupancy is deliberately ignored: this is a terrain-only distance oracle,
//! so predictions are not skewed by units that will have moved by the time
//! the path is walked. Legal destinations come from
//! [`crate::battle::range::reachable_tiles`], which does honor occupancy.

use std::collections::VecDeque;

use ahash::AHashMap;

use crate::battle::grid::GridPos;
use crate::battle::map::CombatMap;

/// Find the shortest orthogonal path from `start` to `end` over walkable
/// terrain, ignoring unit occupancy.
///
/// Returns the positions from the first step after `start` through `end`
/// inclusive. Empty when `end` is unreachable, further than `max_range`
/// steps, or equal to `start`.
pub fn find_path(map: &CombatMap, start: GridPos, end: GridPos, max_range: u32) -> Vec<GridPos> {
    if start == end || !map.in_bounds(start) || !map.is_walkable(end) {
        return Vec::new();
    }

    let mut frontier = VecDeque::new();
    let mut came_from: AHashMap<GridPos, GridPos> = AHashMap::new();
    let mut steps: AHashMap<GridPos, u32> = AHashMap::new();

    frontier.push_back(start);
    steps.insert(start, 0);

    while let Some(current) = frontier.pop_front() {
        if current == end {
            return reconstruct_path(&came_from, start, end);
        }

        let current_steps = steps[&current];
        if current_steps + 1 > max_range {
            continue;
        }

        for neighbor in current.neighbors() {
            if !map.is_walkable(neighbor) || steps.contains_key(&neighbor) {
                continue;
            }
            steps.insert(neighbor, current_steps + 1);
            came_from.insert(neighbor, current);
            frontier.push_back(neighbor);
        }
    }

    Vec::new()
}

/// Walk the parent links back from `end`, excluding `start`
fn reconstruct_path(
    came_from: &AHashMap<GridPos, GridPos>,
    start: GridPos,
    end: GridPos,
) -> Vec<GridPos> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
