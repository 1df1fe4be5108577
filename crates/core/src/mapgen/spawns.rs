//! Player, enemy and item placement codes written onto room floors, plus
//! obstacles scattered over the unused space between them.

use log::debug;

use crate::types::{Pos, TileKind};

use super::model::{EnemySpawn, GeneratedMap, ItemSpawn, ObstacleSpawn};
use super::progression::LevelSettings;
use super::seed::MapRng;

/// Enemies never start this close (Manhattan) to the player.
pub const PLAYER_SAFE_DISTANCE: u32 = 3;
const SPAWN_TRIES: usize = 10;

pub const ITEM_DISTRIBUTION: [(TileKind, f64); 6] = [
    (TileKind::HealthPotion, 0.3),
    (TileKind::ArmourPotion, 0.3),
    (TileKind::HealthBoostPotion, 0.1),
    (TileKind::ArmourBoostPotion, 0.1),
    (TileKind::SpeedBoostPotion, 0.1),
    (TileKind::FireRateBoostPotion, 0.1),
];

pub(super) struct Population {
    pub(super) player: Option<Pos>,
    pub(super) enemy_spawns: Vec<EnemySpawn>,
    pub(super) item_spawns: Vec<ItemSpawn>,
    pub(super) obstacle_spawns: Vec<ObstacleSpawn>,
}

pub(super) fn populate(
    map: &mut GeneratedMap,
    settings: &LevelSettings,
    rng: &mut MapRng,
) -> Population {
    let Some(entry_room) = map.entry_room() else {
        debug!("no rooms to populate");
        return Population {
            player: None,
            enemy_spawns: Vec::new(),
            item_spawns: Vec::new(),
            obstacle_spawns: Vec::new(),
        };
    };
    let LevelSettings { enemy_count, item_count, obstacle_count, .. } = *settings;

    let player = entry_room.center();
    map.grid.set_pos(player, TileKind::Player);

    let mut enemy_spawns = Vec::with_capacity(enemy_count);
    for _ in 0..enemy_count {
        match pick_floor_tile(map, rng, |pos| pos.manhattan(player) > PLAYER_SAFE_DISTANCE) {
            Some(pos) => {
                map.grid.set_pos(pos, TileKind::Enemy);
                enemy_spawns.push(EnemySpawn { pos });
            }
            None => debug!("enemy placement skipped after {SPAWN_TRIES} tries"),
        }
    }

    let mut item_spawns = Vec::with_capacity(item_count);
    for _ in 0..item_count {
        match pick_floor_tile(map, rng, |_| true) {
            Some(pos) => {
                let kind = pick_item_kind(rng);
                map.grid.set_pos(pos, kind);
                item_spawns.push(ItemSpawn { kind, pos });
            }
            None => debug!("item placement skipped after {SPAWN_TRIES} tries"),
        }
    }

    let mut obstacle_spawns = Vec::with_capacity(obstacle_count);
    for _ in 0..obstacle_count {
        match pick_empty_tile(map, rng) {
            Some(pos) => {
                map.grid.set_pos(pos, TileKind::Obstacle);
                obstacle_spawns.push(ObstacleSpawn { pos });
            }
            None => debug!("obstacle placement skipped after {SPAWN_TRIES} tries"),
        }
    }

    Population { player: Some(player), enemy_spawns, item_spawns, obstacle_spawns }
}

/// Random still-bare FLOOR tile inside one of the map's rooms.
fn pick_floor_tile(
    map: &GeneratedMap,
    rng: &mut MapRng,
    accept: impl Fn(Pos) -> bool,
) -> Option<Pos> {
    for _ in 0..SPAWN_TRIES {
        let room = map.rooms[rng.index(map.rooms.len())];
        let pos = Pos {
            y: rng.range_inclusive(room.y1, room.y2),
            x: rng.range_inclusive(room.x1, room.x2),
        };
        if map.tile_at(pos) == TileKind::Floor && accept(pos) {
            return Some(pos);
        }
    }
    None
}

/// Random interior cell no room, wall or corridor has claimed. Obstacles
/// only ever replace EMPTY, so the walkable region is untouched.
fn pick_empty_tile(map: &GeneratedMap, rng: &mut MapRng) -> Option<Pos> {
    let interior = map.grid.interior()?;
    for _ in 0..SPAWN_TRIES {
        let pos = Pos {
            y: rng.range_inclusive(interior.y1, interior.y2),
            x: rng.range_inclusive(interior.x1, interior.x2),
        };
        if map.tile_at(pos) == TileKind::Empty {
            return Some(pos);
        }
    }
    None
}

pub(super) fn pick_item_kind(rng: &mut MapRng) -> TileKind {
    let total: f64 = ITEM_DISTRIBUTION.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.unit() * total;
    for (kind, weight) in ITEM_DISTRIBUTION {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    ITEM_DISTRIBUTION[ITEM_DISTRIBUTION.len() - 1].0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::{GeneratorConfig, generate, generate_with_config};

    #[test]
    fn item_kinds_follow_the_distribution() {
        let mut rng = MapRng::from_seed(17);
        let mut health = 0;
        let mut speed = 0;
        for _ in 0..10_000 {
            let kind = pick_item_kind(&mut rng);
            assert!(kind.is_item());
            match kind {
                TileKind::HealthPotion => health += 1,
                TileKind::SpeedBoostPotion => speed += 1,
                _ => {}
            }
        }
        assert!((2_500..3_500).contains(&health), "health potions: {health}");
        assert!((600..1_400).contains(&speed), "speed potions: {speed}");
    }

    #[test]
    fn obstacles_only_replace_empty_cells() {
        let mut map = generate(40, 30, 6, Some(21)).expect("valid request");
        let empty_before: Vec<Pos> = map
            .grid
            .bounds()
            .positions()
            .filter(|&pos| map.tile_at(pos) == TileKind::Empty)
            .collect();
        let settings = LevelSettings::for_level(3).expect("level 3");
        let mut rng = MapRng::from_seed(4);
        let population = populate(&mut map, &settings, &mut rng);

        assert!(!population.obstacle_spawns.is_empty());
        assert!(population.obstacle_spawns.len() <= settings.obstacle_count);
        assert_eq!(map.grid.count(TileKind::Obstacle), population.obstacle_spawns.len());
        for spawn in &population.obstacle_spawns {
            assert!(empty_before.contains(&spawn.pos), "{:?} was not empty", spawn.pos);
            assert!(map.rooms.iter().all(|room| !room.contains(spawn.pos)));
        }
    }

    #[test]
    fn roomless_map_gets_no_population() {
        let config = GeneratorConfig {
            min_container_size: 3,
            max_generation_attempts: 1,
            ..GeneratorConfig::default()
        };
        let mut map = generate_with_config(&config, 10, 10, 25, Some(4)).expect("valid request");
        assert!(map.rooms.is_empty());
        let settings = LevelSettings::for_level(1).expect("level 1");
        let population = populate(&mut map, &settings, &mut MapRng::from_seed(1));
        assert_eq!(population.player, None);
        assert!(population.obstacle_spawns.is_empty());
        assert_eq!(map.grid.count(TileKind::Empty), 100);
    }
}
