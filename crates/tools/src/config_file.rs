//! Generator tuning loaded from a TOML file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use dungeon_core::GeneratorConfig;

pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

fn parse_config(content: &str) -> Result<GeneratorConfig> {
    let config: GeneratorConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_path_means_defaults() {
        assert_eq!(load_config(None).expect("defaults"), GeneratorConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_named_settings() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("generator.toml");
        fs::write(&path, "hallway_size = 3\nplace_tries = 8\n").expect("write");

        let config = load_config(Some(&path)).expect("load");
        assert_eq!(config.hallway_size, 3);
        assert_eq!(config.place_tries, 8);
        assert_eq!(config.min_room_size, GeneratorConfig::default().min_room_size);
    }

    #[test]
    fn inconsistent_settings_are_rejected() {
        let error = parse_config("min_split_iterations = 30\n").expect_err("min above max");
        assert!(format!("{error}").contains("min_split_iterations"));
    }

    #[test]
    fn overflowing_room_size_is_reported_not_panicked() {
        let error = parse_config("min_room_size = 2147483647\n").expect_err("room too large");
        assert!(format!("{error}").contains("min_room_size"));
    }

    #[test]
    fn unreadable_path_reports_the_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");
        let error = load_config(Some(&path)).expect_err("missing file");
        assert!(format!("{error}").contains("absent.toml"));
    }
}
