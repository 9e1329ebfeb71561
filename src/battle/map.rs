//! Combat map: a dense grid of terrain tiles with walkability queries
//!
//! The map is built once when an encounter loads and never mutated while the
//! encounter runs. Units live in the [`crate::battle::manifest::UnitManifest`],
//! not on the tiles.

use serde::{Deserialize, Serialize};

use crate::battle::grid::GridPos;

/// Terrain classes for combat map tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Floor,
    Wall,
    Pit,
    Water,
    Rubble,
}

impl Terrain {
    pub fn is_walkable(&self) -> bool {
        matches!(self, Terrain::Floor | Terrain::Rubble)
    }
}

/// A single tile on the combat map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self { terrain }
    }

    pub fn is_walkable(&self) -> bool {
        self.terrain.is_walkable()
    }
}

/// Immutable battlefield description with bounds and walkability queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatMap {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl CombatMap {
    /// Create a map of open floor
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// False for walls, pits, water, and anything out of bounds
    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.tile(pos).map(|t| t.is_walkable()).unwrap_or(false)
    }

    pub fn tile(&self, pos: GridPos) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles.get(self.index(pos))
    }

    /// Set terrain at a coordinate. Encounter setup only; the map is treated
    /// as immutable once units are placed.
    pub fn set_terrain(&mut self, pos: GridPos, terrain: Terrain) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.tiles[idx] = Tile::new(terrain);
        }
    }

    /// Wall off the outer edge of the map
    pub fn with_border_walls(mut self) -> Self {
        for x in 0..self.width as i32 {
            self.set_terrain(GridPos::new(x, 0), Terrain::Wall);
            self.set_terrain(GridPos::new(x, self.height as i32 - 1), Terrain::Wall);
        }
        for y in 0..self.height as i32 {
            self.set_terrain(GridPos::new(0, y), Terrain::Wall);
            self.set_terrain(GridPos::new(self.width as i32 - 1, y), Terrain::Wall);
        }
        self
    }

    fn index(&self, pos: GridPos) -> usize {
        (pos.y as u32 * self.width + pos.x as u32) as usize
    }
}
