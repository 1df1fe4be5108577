//! Public data models for generated maps and populated levels.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Pos, Rect, TileKind};

use super::grid::Grid;
use super::hallways::Hallway;
use super::partition::PartitionTree;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapShape {
    pub width: usize,
    pub height: usize,
}

/// Output of one generation session. Read-only once returned.
#[derive(Clone, Debug)]
pub struct GeneratedMap {
    pub seed: u64,
    pub split_count: u32,
    pub grid: Grid,
    pub rooms: Vec<Rect>,
    pub hallways: Vec<Hallway>,
    pub tree: PartitionTree,
    /// Whole-map passes it took to get at least one room.
    pub attempts: u32,
}

impl GeneratedMap {
    pub fn shape(&self) -> MapShape {
        MapShape { width: self.grid.width(), height: self.grid.height() }
    }

    pub fn into_parts(self) -> (Grid, Vec<Rect>) {
        (self.grid, self.rooms)
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        self.grid.tile_at(pos).unwrap_or(TileKind::Empty)
    }

    /// The room the player enters the level through.
    pub fn entry_room(&self) -> Option<Rect> {
        self.rooms.first().copied()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        bytes.extend(self.grid.tiles().iter().map(|tile| tile.code()));
        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for value in [room.x1, room.y1, room.x2, room.y2] {
                bytes.extend(value.to_le_bytes());
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpawn {
    pub kind: TileKind,
    pub pos: Pos,
}

/// Unwalkable filler dropped on otherwise EMPTY cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSpawn {
    pub pos: Pos,
}

/// A generated map with the player, enemies, items and obstacles written into its grid.
#[derive(Clone, Debug)]
pub struct LevelMap {
    pub level: u32,
    pub map: GeneratedMap,
    pub player: Option<Pos>,
    pub enemy_spawns: Vec<EnemySpawn>,
    pub item_spawns: Vec<ItemSpawn>,
    pub obstacle_spawns: Vec<ObstacleSpawn>,
}
