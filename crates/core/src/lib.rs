//! BSP dungeon generation: partition a tile grid, furnish leaves with rooms,
//! and join sibling subtrees with hallways.

pub mod error;
pub mod mapgen;
pub mod types;

pub use error::{ConfigError, GenerateError, GridError};
pub use mapgen::{
    GeneratedMap, GeneratorConfig, Grid, LevelMap, MapGenerator, generate, generate_level,
    generate_level_with_config, generate_with_config,
};
pub use types::*;
