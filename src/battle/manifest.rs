//! Occupancy manifest: which unit stands on which tile
//!
//! The manifest is the single source of truth for positions during an
//! encounter. Invariant: at most one unit per tile, at most one tile per
//! unit. All mutation goes through add/move/remove so the two directions of
//! the mapping can never diverge.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::battle::grid::GridPos;
use crate::core::types::UnitId;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestError {
    #[error("position {0:?} is already occupied")]
    PositionOccupied(GridPos),

    #[error("unit {0:?} is already placed")]
    UnitAlreadyPlaced(UnitId),

    #[error("unit {0:?} is not tracked by the manifest")]
    UnitNotTracked(UnitId),
}

/// Bidirectional position <-> unit mapping for one encounter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitManifest {
    by_position: AHashMap<GridPos, UnitId>,
    by_unit: AHashMap<UnitId, GridPos>,
}

impl UnitManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a unit on a tile. Rejects occupied tiles and units that are
    /// already placed elsewhere.
    pub fn add_unit(&mut self, unit: UnitId, pos: GridPos) -> Result<(), ManifestError> {
        if self.by_position.contains_key(&pos) {
            return Err(ManifestError::PositionOccupied(pos));
        }
        if self.by_unit.contains_key(&unit) {
            return Err(ManifestError::UnitAlreadyPlaced(unit));
        }
        self.by_position.insert(pos, unit);
        self.by_unit.insert(unit, pos);
        Ok(())
    }

    pub fn unit_at(&self, pos: GridPos) -> Option<UnitId> {
        self.by_position.get(&pos).copied()
    }

    pub fn position_of(&self, unit: UnitId) -> Option<GridPos> {
        self.by_unit.get(&unit).copied()
    }

    /// Move a unit to a new tile, updating both directions atomically
    pub fn move_unit(&mut self, unit: UnitId, new_pos: GridPos) -> Result<(), ManifestError> {
        let old_pos = self
            .position_of(unit)
            .ok_or(ManifestError::UnitNotTracked(unit))?;
        if old_pos == new_pos {
            return Ok(());
        }
        if self.by_position.contains_key(&new_pos) {
            return Err(ManifestError::PositionOccupied(new_pos));
        }

        let removed = self.by_position.remove(&old_pos);
        debug_assert_eq!(removed, Some(unit));
        self.by_position.insert(new_pos, unit);
        self.by_unit.insert(unit, new_pos);
        Ok(())
    }

    /// Remove a unit, clearing both directions
    pub fn remove_unit(&mut self, unit: UnitId) -> Result<GridPos, ManifestError> {
        let pos = self
            .by_unit
            .remove(&unit)
            .ok_or(ManifestError::UnitNotTracked(unit))?;
        let removed = self.by_position.remove(&pos);
        debug_assert_eq!(removed, Some(unit));
        Ok(pos)
    }

    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.by_position.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.by_unit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_unit.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitId, GridPos)> + '_ {
        self.by_unit.iter().map(|(&unit, &pos)| (unit, pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut manifest = UnitManifest::new();
        let unit = UnitId::new();
        let pos = GridPos::new(3, 4);

        manifest.add_unit(unit, pos).unwrap();
        assert_eq!(manifest.unit_at(pos), Some(unit));
        assert_eq!(manifest.position_of(unit), Some(pos));
        assert_eq!(manifest.unit_at(GridPos::new(0, 0)), None);
    }

    #[test]
    fn test_add_rejects_occupied_position() {
        let mut manifest = UnitManifest::new();
        let pos = GridPos::new(1, 1);
        manifest.add_unit(UnitId::new(), pos).unwrap();

        let err = manifest.add_unit(UnitId::new(), pos).unwrap_err();
        assert_eq!(err, ManifestError::PositionOccupied(pos));
    }

    #[test]
    fn test_add_rejects_double_placement() {
        let mut manifest = UnitManifest::new();
        let unit = UnitId::new();
        manifest.add_unit(unit, GridPos::new(1, 1)).unwrap();

        let err = manifest.add_unit(unit, GridPos::new(2, 2)).unwrap_err();
        assert_eq!(err, ManifestError::UnitAlreadyPlaced(unit));
    }

    #[test]
    fn test_move_updates_both_directions() {
        let mut manifest = UnitManifest::new();
        let unit = UnitId::new();
        let from = GridPos::new(1, 1);
        let to = GridPos::new(4, 2);

        manifest.add_unit(unit, from).unwrap();
        manifest.move_unit(unit, to).unwrap();

        assert_eq!(manifest.unit_at(from), None);
        assert_eq!(manifest.unit_at(to), Some(unit));
        assert_eq!(manifest.position_of(unit), Some(to));
    }

    #[test]
    fn test_move_rejects_occupied_destination() {
        let mut manifest = UnitManifest::new();
        let mover = UnitId::new();
        let blocker_pos = GridPos::new(2, 2);

        manifest.add_unit(mover, GridPos::new(1, 1)).unwrap();
        manifest.add_unit(UnitId::new(), blocker_pos).unwrap();

        let err = manifest.move_unit(mover, blocker_pos).unwrap_err();
        assert_eq!(err, ManifestError::PositionOccupied(blocker_pos));
        // Mover stays put
        assert_eq!(manifest.position_of(mover), Some(GridPos::new(1, 1)));
    }

    #[test]
    fn test_move_untracked_unit_fails() {
        let mut manifest = UnitManifest::new();
        let unit = UnitId::new();
        let err = manifest.move_unit(unit, GridPos::new(0, 0)).unwrap_err();
        assert_eq!(err, ManifestError::UnitNotTracked(unit));
    }

    #[test]
    fn test_remove_clears_both_directions() {
        let mut manifest = UnitManifest::new();
        let unit = UnitId::new();
        let pos = GridPos::new(5, 5);

        manifest.add_unit(unit, pos).unwrap();
        assert_eq!(manifest.remove_unit(unit), Ok(pos));
        assert!(!manifest.is_occupied(pos));
        assert_eq!(manifest.position_of(unit), None);
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_move_to_same_position_is_noop() {
        let mut manifest = UnitManifest::new();
        let unit = UnitId::new();
        let pos = GridPos::new(3, 3);
        manifest.add_unit(unit, pos).unwrap();
        manifest.move_unit(unit, pos).unwrap();
        assert_eq!(manifest.unit_at(pos), Some(unit));
    }
}
