//! Level progression rules: deeper levels get bigger, more split, busier maps.

use crate::error::ConfigError;

use super::config::{MAX_MAP_HEIGHT, MAX_MAP_WIDTH, MAX_SPLIT_ITERATION};

pub const STARTING_LEVEL: u32 = 1;
pub const LEVEL_GROWTH: f64 = 1.2;

pub const BASE_MAP_WIDTH: usize = 30;
pub const BASE_MAP_HEIGHT: usize = 20;
pub const BASE_SPLIT_ITERATION: u32 = 5;
pub const BASE_OBSTACLE_COUNT: usize = 50;
pub const BASE_ENEMY_COUNT: usize = 7;
pub const BASE_ITEM_COUNT: usize = 3;
pub const MAX_OBSTACLE_COUNT: usize = 200;
pub const MAX_ENEMY_COUNT: usize = 35;
pub const MAX_ITEM_COUNT: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelSettings {
    pub level: u32,
    pub width: usize,
    pub height: usize,
    pub split_iterations: u32,
    pub obstacle_count: usize,
    pub enemy_count: usize,
    pub item_count: usize,
}

impl LevelSettings {
    pub fn for_level(level: u32) -> Result<Self, ConfigError> {
        if level < STARTING_LEVEL {
            return Err(ConfigError::Level(level));
        }
        Ok(Self {
            level,
            width: scaled(BASE_MAP_WIDTH, MAX_MAP_WIDTH, level),
            height: scaled(BASE_MAP_HEIGHT, MAX_MAP_HEIGHT, level),
            split_iterations: scaled(
                BASE_SPLIT_ITERATION as usize,
                MAX_SPLIT_ITERATION as usize,
                level,
            ) as u32,
            obstacle_count: scaled(BASE_OBSTACLE_COUNT, MAX_OBSTACLE_COUNT, level),
            enemy_count: scaled(BASE_ENEMY_COUNT, MAX_ENEMY_COUNT, level),
            item_count: scaled(BASE_ITEM_COUNT, MAX_ITEM_COUNT, level),
        })
    }
}

/// `base * LEVEL_GROWTH^(level - 1)`, rounded down and capped at `max`.
fn scaled(base: usize, max: usize, level: u32) -> usize {
    let exponent = level.saturating_sub(STARTING_LEVEL).min(i32::MAX as u32) as i32;
    let grown = base as f64 * LEVEL_GROWTH.powi(exponent);
    if grown >= max as f64 { max } else { grown as usize }
}
