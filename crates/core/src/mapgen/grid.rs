//! Tile grid shared by every partition-node operation during one generation pass.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::types::{Pos, Rect, TileKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, tiles: vec![TileKind::Empty; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32 - 1, self.height as i32 - 1)
    }

    /// Every cell except the outermost ring.
    pub fn interior(&self) -> Option<Rect> {
        (self.width > 2 && self.height > 2)
            .then(|| Rect::new(1, 1, self.width as i32 - 2, self.height as i32 - 2))
    }

    /// Reads one cell. Out-of-range access is a caller defect and panics.
    pub fn get(&self, x: usize, y: usize) -> TileKind {
        match self.try_get(x, y) {
            Ok(tile) => tile,
            Err(error) => panic!("{error}"),
        }
    }

    /// Writes one cell. Out-of-range access is a caller defect and panics.
    pub fn set(&mut self, x: usize, y: usize, tile: TileKind) {
        if let Err(error) = self.try_set(x, y, tile) {
            panic!("{error}");
        }
    }

    pub fn try_get(&self, x: usize, y: usize) -> Result<TileKind, GridError> {
        self.index(x, y).map(|index| self.tiles[index])
    }

    pub fn try_set(&mut self, x: usize, y: usize, tile: TileKind) -> Result<(), GridError> {
        let index = self.index(x, y)?;
        self.tiles[index] = tile;
        Ok(())
    }

    /// Signed lookup for geometry code; anything off the grid reads as `None`.
    pub fn tile_at(&self, pos: Pos) -> Option<TileKind> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.try_get(pos.x as usize, pos.y as usize).ok()
    }

    pub(crate) fn set_pos(&mut self, pos: Pos, tile: TileKind) {
        self.set(pos.x as usize, pos.y as usize, tile);
    }

    pub fn count(&self, tile: TileKind) -> usize {
        self.tiles.iter().filter(|&&candidate| candidate == tile).count()
    }

    pub fn render_ascii(&self) -> String {
        if self.width == 0 {
            return String::new();
        }
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.tiles.chunks(self.width) {
            out.extend(row.iter().map(|tile| tile.ascii()));
            out.push('\n');
        }
        out
    }

    /// Walkable cells 4-connected to `start`, or empty when `start` itself is not walkable.
    pub fn walkable_region(&self, start: Pos) -> Vec<bool> {
        let mut seen = vec![false; self.tiles.len()];
        if !self.tile_at(start).is_some_and(TileKind::is_walkable) {
            return seen;
        }

        let mut open = VecDeque::from([start]);
        seen[self.flat(start)] = true;
        while let Some(pos) = open.pop_front() {
            for next in [
                Pos { y: pos.y - 1, x: pos.x },
                Pos { y: pos.y, x: pos.x + 1 },
                Pos { y: pos.y + 1, x: pos.x },
                Pos { y: pos.y, x: pos.x - 1 },
            ] {
                if !self.tile_at(next).is_some_and(TileKind::is_walkable) {
                    continue;
                }
                let index = self.flat(next);
                if seen[index] {
                    continue;
                }
                seen[index] = true;
                open.push_back(next);
            }
        }
        seen
    }

    pub(crate) fn flat(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::IndexOutOfRange {
                x: x as i64,
                y: y as i64,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }
}
