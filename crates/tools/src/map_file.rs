//! JSON export of generated maps for external viewers and spawn tooling.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use dungeon_core::mapgen::{EnemySpawn, ItemSpawn, ObstacleSpawn};
use dungeon_core::{GeneratedMap, LevelMap, Pos, Rect};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MapFile {
    pub format_version: u32,
    pub seed: u64,
    pub fingerprint: u64,
    pub width: usize,
    pub height: usize,
    /// Tile codes, one row per entry.
    pub tiles: Vec<Vec<u8>>,
    pub rooms: Vec<Rect>,
    pub level: Option<u32>,
    pub player: Option<Pos>,
    pub enemy_spawns: Vec<EnemySpawn>,
    pub item_spawns: Vec<ItemSpawn>,
    pub obstacle_spawns: Vec<ObstacleSpawn>,
}

impl MapFile {
    pub fn from_map(map: &GeneratedMap) -> Self {
        let width = map.grid.width();
        Self {
            format_version: FORMAT_VERSION,
            seed: map.seed,
            fingerprint: map.fingerprint(),
            width,
            height: map.grid.height(),
            tiles: map
                .grid
                .tiles()
                .chunks(width)
                .map(|row| row.iter().map(|tile| tile.code()).collect())
                .collect(),
            rooms: map.rooms.clone(),
            level: None,
            player: None,
            enemy_spawns: Vec::new(),
            item_spawns: Vec::new(),
            obstacle_spawns: Vec::new(),
        }
    }

    pub fn from_level(level: &LevelMap) -> Self {
        Self {
            level: Some(level.level),
            player: level.player,
            enemy_spawns: level.enemy_spawns.clone(),
            item_spawns: level.item_spawns.clone(),
            obstacle_spawns: level.obstacle_spawns.clone(),
            ..Self::from_map(&level.map)
        }
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        if let Err(error) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(error);
        }
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_core::{TileKind, generate, generate_level};
    use tempfile::tempdir;

    #[test]
    fn map_file_rows_match_the_grid() {
        let map = generate(30, 20, 5, Some(42)).expect("valid request");
        let file = MapFile::from_map(&map);
        assert_eq!(file.tiles.len(), 20);
        assert!(file.tiles.iter().all(|row| row.len() == 30));
        for (y, row) in file.tiles.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                assert_eq!(TileKind::from_code(code), Some(map.grid.get(x, y)));
            }
        }
        assert_eq!(file.rooms, map.rooms);
        assert_eq!(file.level, None);
    }

    #[test]
    fn level_file_carries_spawns() {
        let level = generate_level(2, Some(5)).expect("level 2");
        let file = MapFile::from_level(&level);
        assert_eq!(file.level, Some(2));
        assert_eq!(file.player, level.player);
        assert_eq!(file.enemy_spawns, level.enemy_spawns);
        assert_eq!(file.obstacle_spawns, level.obstacle_spawns);
        assert_eq!(file.fingerprint, level.map.fingerprint());
    }

    #[test]
    fn map_file_atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("maps").join("level.json");
        let map = generate(40, 30, 6, Some(7)).expect("valid request");
        let file = MapFile::from_map(&map);

        file.write_atomic(&path).expect("write");
        let loaded = MapFile::load(&path).expect("load");
        assert_eq!(file, loaded);

        let tmp_path = path.with_extension("json.tmp");
        assert!(!tmp_path.exists());
    }

    #[test]
    fn failed_rename_leaves_no_tmp_file_behind() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("level.json");
        fs::create_dir(&path).expect("occupy target with a directory");
        fs::write(path.join("keep"), "x").expect("write");
        let map = generate(30, 20, 5, Some(3)).expect("valid request");

        assert!(MapFile::from_map(&map).write_atomic(&path).is_err());
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").expect("write");
        let error = MapFile::load(&path).expect_err("malformed file");
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }
}
