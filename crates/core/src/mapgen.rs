//! Procedural BSP dungeon generation split into coherent submodules.

pub mod config;
pub mod model;
pub mod progression;

mod generator;
mod grid;
mod hallways;
mod partition;
mod rooms;
mod seed;
mod spawns;

pub use config::GeneratorConfig;
pub use generator::MapGenerator;
pub use grid::Grid;
pub use hallways::Hallway;
pub use model::{EnemySpawn, GeneratedMap, ItemSpawn, LevelMap, MapShape, ObstacleSpawn};
pub use partition::{NodeId, PartitionNode, PartitionTree, SplitAxis};
pub use progression::{LevelSettings, STARTING_LEVEL};
pub use seed::{MapRng, derive_level_seed, generate_runtime_seed};
pub use spawns::{ITEM_DISTRIBUTION, PLAYER_SAFE_DISTANCE};

use crate::error::GenerateError;

const POPULATION_STREAM: u64 = 0x5EED_0F_11FE;

/// Generates one map with the default tuning. Without a seed a runtime seed
/// is drawn; it is recorded on the result either way.
pub fn generate(
    width: usize,
    height: usize,
    split_iterations: u32,
    seed: Option<u64>,
) -> Result<GeneratedMap, GenerateError> {
    generate_with_config(&GeneratorConfig::default(), width, height, split_iterations, seed)
}

pub fn generate_with_config(
    config: &GeneratorConfig,
    width: usize,
    height: usize,
    split_iterations: u32,
    seed: Option<u64>,
) -> Result<GeneratedMap, GenerateError> {
    let generator = MapGenerator::with_config(config.clone(), width, height, split_iterations)?;
    Ok(generator.generate(seed.unwrap_or_else(generate_runtime_seed)))
}

/// Generates and populates the map for one level of a run.
pub fn generate_level(level: u32, run_seed: Option<u64>) -> Result<LevelMap, GenerateError> {
    generate_level_with_config(&GeneratorConfig::default(), level, run_seed)
}

pub fn generate_level_with_config(
    config: &GeneratorConfig,
    level: u32,
    run_seed: Option<u64>,
) -> Result<LevelMap, GenerateError> {
    let settings = LevelSettings::for_level(level)?;
    let level_seed = derive_level_seed(run_seed.unwrap_or_else(generate_runtime_seed), level);
    let mut map = generate_with_config(
        config,
        settings.width,
        settings.height,
        settings.split_iterations,
        Some(level_seed),
    )?;

    let mut rng = MapRng::from_seed(seed::mix_seed(level_seed ^ POPULATION_STREAM));
    let population = spawns::populate(&mut map, &settings, &mut rng);
    Ok(LevelMap {
        level,
        map,
        player: population.player,
        enemy_spawns: population.enemy_spawns,
        item_spawns: population.item_spawns,
        obstacle_spawns: population.obstacle_spawns,
    })
}
