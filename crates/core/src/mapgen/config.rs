//! Tuning knobs for BSP generation and the bounds callers' requests are checked against.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const MIN_CONTAINER_SIZE: i32 = 6;
pub const MIN_ROOM_SIZE: i32 = 4;
pub const ROOM_RATIO: f64 = 0.625;
pub const ROOM_RATIO_THRESHOLD: f64 = 1.6;
pub const HALLWAY_SIZE: i32 = 5;
pub const PLACE_TRIES: u32 = 5;
pub const MIN_SPLIT_ITERATION: u32 = 1;
pub const MAX_SPLIT_ITERATION: u32 = 25;
pub const MAX_MAP_WIDTH: usize = 150;
pub const MAX_MAP_HEIGHT: usize = 100;
pub const MAX_GENERATION_ATTEMPTS: u32 = 5;
/// Ceiling for any size setting, keeping tile arithmetic inside `i32`.
pub const SIZE_SETTING_LIMIT: usize = 4_096;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Shortest side a partition may be split down to.
    pub min_container_size: i32,
    /// Shortest floor side of a room.
    pub min_room_size: i32,
    /// Lowest accepted `short_side / long_side` for a room.
    pub room_ratio: f64,
    /// Aspect ratio at which the split orientation stops being random.
    pub split_ratio_threshold: f64,
    /// Corridor width including its two walls.
    pub hallway_size: i32,
    pub place_tries: u32,
    pub min_split_iterations: u32,
    pub max_split_iterations: u32,
    pub max_width: usize,
    pub max_height: usize,
    /// Whole-map attempts made while a generation pass ends with no rooms.
    pub max_generation_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_container_size: MIN_CONTAINER_SIZE,
            min_room_size: MIN_ROOM_SIZE,
            room_ratio: ROOM_RATIO,
            split_ratio_threshold: ROOM_RATIO_THRESHOLD,
            hallway_size: HALLWAY_SIZE,
            place_tries: PLACE_TRIES,
            min_split_iterations: MIN_SPLIT_ITERATION,
            max_split_iterations: MAX_SPLIT_ITERATION,
            max_width: MAX_MAP_WIDTH,
            max_height: MAX_MAP_HEIGHT,
            max_generation_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }
}

impl GeneratorConfig {
    /// Smallest width or height that can still host one room and its wall ring.
    pub fn min_dimension(&self) -> usize {
        self.min_room_size.max(0).unsigned_abs() as usize + 2
    }

    /// Floor tiles across a corridor.
    pub fn hallway_floor_width(&self) -> i32 {
        self.hallway_size - 2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_room_size < 1 {
            return Err(setting("min_room_size", format!("{} must be >= 1", self.min_room_size)));
        }
        if self.min_container_size < 3 {
            return Err(setting(
                "min_container_size",
                format!("{} must be >= 3", self.min_container_size),
            ));
        }
        if self.max_width > SIZE_SETTING_LIMIT || self.max_height > SIZE_SETTING_LIMIT {
            return Err(setting(
                "max_width/max_height",
                format!("must both be <= {SIZE_SETTING_LIMIT}"),
            ));
        }
        let largest_side = self.max_width.max(self.max_height);
        if self.min_container_size.unsigned_abs() as usize > largest_side {
            return Err(setting(
                "min_container_size",
                format!("{} exceeds the largest map side {largest_side}", self.min_container_size),
            ));
        }
        if !(self.room_ratio > 0.0 && self.room_ratio <= 1.0) {
            return Err(setting("room_ratio", format!("{} must be in (0, 1]", self.room_ratio)));
        }
        if !(self.split_ratio_threshold >= 1.0) {
            return Err(setting(
                "split_ratio_threshold",
                format!("{} must be >= 1", self.split_ratio_threshold),
            ));
        }
        if self.hallway_size < 3 || self.hallway_size % 2 == 0 {
            return Err(setting(
                "hallway_size",
                format!("{} must be an odd number >= 3", self.hallway_size),
            ));
        }
        if self.place_tries == 0 {
            return Err(setting("place_tries", "must be >= 1".to_string()));
        }
        if self.max_generation_attempts == 0 {
            return Err(setting("max_generation_attempts", "must be >= 1".to_string()));
        }
        if self.min_split_iterations > self.max_split_iterations {
            return Err(setting(
                "min_split_iterations",
                format!(
                    "{} exceeds max_split_iterations {}",
                    self.min_split_iterations, self.max_split_iterations
                ),
            ));
        }
        if self.max_width.min(self.max_height) < self.min_dimension() {
            return Err(setting(
                "min_room_size",
                format!(
                    "{} leaves no room inside a {}x{} map",
                    self.min_room_size, self.max_width, self.max_height
                ),
            ));
        }
        Ok(())
    }

    /// Checks one generation request against these settings.
    pub fn check_request(
        &self,
        width: usize,
        height: usize,
        split_iterations: u32,
    ) -> Result<(), ConfigError> {
        self.validate()?;
        let min = self.min_dimension();
        if width < min || width > self.max_width {
            return Err(ConfigError::Width { value: width, min, max: self.max_width });
        }
        if height < min || height > self.max_height {
            return Err(ConfigError::Height { value: height, min, max: self.max_height });
        }
        if split_iterations < self.min_split_iterations
            || split_iterations > self.max_split_iterations
        {
            return Err(ConfigError::SplitIterations {
                value: split_iterations,
                min: self.min_split_iterations,
                max: self.max_split_iterations,
            });
        }
        Ok(())
    }
}

fn setting(name: &'static str, reason: String) -> ConfigError {
    ConfigError::Setting { name, reason }
}
