//! High-level map generation orchestration: split, place rooms, carve hallways.

use log::{info, warn};

use crate::error::GenerateError;
use crate::types::Rect;

use super::config::GeneratorConfig;
use super::grid::Grid;
use super::hallways::{Hallway, create_hallways};
use super::model::GeneratedMap;
use super::partition::PartitionTree;
use super::rooms::create_rooms;
use super::seed::MapRng;

#[derive(Clone, Debug)]
pub struct MapGenerator {
    config: GeneratorConfig,
    width: usize,
    height: usize,
    split_count: u32,
}

impl MapGenerator {
    pub fn new(width: usize, height: usize, split_count: u32) -> Result<Self, GenerateError> {
        Self::with_config(GeneratorConfig::default(), width, height, split_count)
    }

    /// Validates the request up front so `generate` itself cannot fail.
    pub fn with_config(
        config: GeneratorConfig,
        width: usize,
        height: usize,
        split_count: u32,
    ) -> Result<Self, GenerateError> {
        config.check_request(width, height, split_count)?;
        Ok(Self { config, width, height, split_count })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self, seed: u64) -> GeneratedMap {
        let mut rng = MapRng::from_seed(seed);
        let mut attempts = 0;
        loop {
            attempts += 1;
            let mut session = Map::new(self.width, self.height, self.split_count);
            let (rooms, hallways) = session.make_map(&self.config, &mut rng);

            let out_of_attempts = attempts >= self.config.max_generation_attempts;
            if rooms.is_empty() && !out_of_attempts {
                continue;
            }
            if rooms.is_empty() {
                warn!("seed {seed}: no room placed after {attempts} attempts, shipping empty map");
            }
            info!(
                "seed {seed}: {}x{} map, {} leaves, {} rooms, {} hallways (attempt {attempts})",
                self.width,
                self.height,
                session.tree.leaves().len(),
                rooms.len(),
                hallways.len()
            );
            return GeneratedMap {
                seed,
                split_count: self.split_count,
                grid: session.grid,
                rooms,
                hallways,
                tree: session.tree,
                attempts,
            };
        }
    }
}

/// One generation session: the grid and the partition tree carved into it.
struct Map {
    split_count: u32,
    grid: Grid,
    tree: PartitionTree,
}

impl Map {
    fn new(width: usize, height: usize, split_count: u32) -> Self {
        let grid = Grid::new(width, height);
        let tree = PartitionTree::new(grid.bounds());
        Self { split_count, grid, tree }
    }

    /// Splitting finishes tree-wide before any room is placed, and every room
    /// exists before the first hallway is carved.
    fn make_map(
        &mut self,
        config: &GeneratorConfig,
        rng: &mut MapRng,
    ) -> (Vec<Rect>, Vec<Hallway>) {
        for _ in 0..self.split_count {
            self.tree.split_leaves(config, rng);
        }
        let rooms = create_rooms(&mut self.tree, &mut self.grid, config, rng);
        let hallways = create_hallways(&self.tree, &mut self.grid, config, rng);
        (rooms, hallways)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::error::ConfigError;
    use crate::types::{Pos, TileKind};

    #[test]
    fn same_seed_produces_identical_maps() {
        let generator = MapGenerator::new(60, 40, 8).expect("valid request");
        let a = generator.generate(123_456);
        let b = generator.generate(123_456);
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.rooms, b.rooms);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn different_seeds_change_the_layout() {
        let generator = MapGenerator::new(60, 40, 8).expect("valid request");
        let fingerprints: BTreeSet<u64> =
            (0..8).map(|seed| generator.generate(seed).fingerprint()).collect();
        assert!(fingerprints.len() > 1);
    }

    #[test]
    fn invalid_requests_are_rejected_before_generation() {
        assert!(matches!(
            MapGenerator::new(30, 20, 0),
            Err(GenerateError::Configuration(ConfigError::SplitIterations { value: 0, .. }))
        ));
        assert!(matches!(
            MapGenerator::new(3, 20, 5),
            Err(GenerateError::Configuration(ConfigError::Width { value: 3, .. }))
        ));
    }

    #[test]
    fn one_room_per_true_leaf_at_most() {
        let map = MapGenerator::new(80, 50, 10).expect("valid request").generate(9);
        let leaves = map.tree.leaves();
        assert!(map.rooms.len() <= leaves.len());
        let leaf_rooms: Vec<Rect> =
            leaves.iter().filter_map(|&id| map.tree.node(id).room).collect();
        assert_eq!(leaf_rooms, map.rooms);
        for (_, node) in map.tree.iter() {
            if !node.is_leaf() {
                assert_eq!(node.room, None, "internal nodes never own a room");
            }
        }
    }

    #[test]
    fn every_internal_node_with_two_furnished_children_gets_a_hallway() {
        let map = MapGenerator::new(90, 60, 12).expect("valid request").generate(31);
        let expected = map
            .tree
            .iter()
            .filter_map(|(_, node)| node.children)
            .filter(|&(left, right)| {
                map.tree.representative_point(left).is_some()
                    && map.tree.representative_point(right).is_some()
            })
            .count();
        assert_eq!(map.hallways.len(), expected);
    }

    #[test]
    fn unplaceable_rooms_exhaust_the_retry_cap_without_failing() {
        let config = GeneratorConfig {
            min_room_size: 4,
            min_container_size: 3,
            max_generation_attempts: 3,
            ..GeneratorConfig::default()
        };
        // Splitting stops only once every leaf has a side shorter than a walled room.
        let map =
            MapGenerator::with_config(config, 10, 10, 25).expect("valid request").generate(4);
        assert!(map.rooms.is_empty());
        assert!(map.hallways.is_empty());
        assert_eq!(map.attempts, 3);
        assert_eq!(map.grid.count(TileKind::Empty), 100);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn generated_maps_keep_every_room_connected(
            seed in any::<u64>(),
            width in 6_usize..=120,
            height in 6_usize..=80,
            splits in 1_u32..=25,
        ) {
            let map =
                MapGenerator::new(width, height, splits).expect("valid request").generate(seed);
            let Some(entry) = map.entry_room() else {
                prop_assert_eq!(map.grid.count(TileKind::Floor), 0);
                return Ok(());
            };

            let region = map.grid.walkable_region(entry.center());
            for room in &map.rooms {
                prop_assert!(
                    region[map.grid.flat(room.center())],
                    "seed={seed} {width}x{height} splits={splits}: {room:?} unreachable"
                );
            }

            let floor_tiles = map.grid.tiles().iter().filter(|tile| tile.is_walkable()).count();
            let reached = region.iter().filter(|&&reached| reached).count();
            prop_assert_eq!(floor_tiles, reached, "every floor tile belongs to one component");

            for x in 0..width as i32 {
                prop_assert_ne!(map.tile_at(Pos { y: 0, x }), TileKind::Floor);
                prop_assert_ne!(map.tile_at(Pos { y: height as i32 - 1, x }), TileKind::Floor);
            }
            for y in 0..height as i32 {
                prop_assert_ne!(map.tile_at(Pos { y, x: 0 }), TileKind::Floor);
                prop_assert_ne!(map.tile_at(Pos { y, x: width as i32 - 1 }), TileKind::Floor);
            }
        }
    }
}
