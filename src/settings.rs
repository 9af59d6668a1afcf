//! Run settings
//!
//! Loaded from an optional JSON file. Any field left out takes its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::STAR_COUNT;

/// Settings for one run of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen_width: f32,
    pub screen_height: f32,
    /// RNG seed, so a run can be replayed
    pub seed: u64,
    pub star_count: usize,
    /// Natural size of the player image in pixels, before scaling
    pub player_sprite: [f32; 2],
    /// Natural size of the enemy image in pixels
    pub enemy_sprite: [f32; 2],
    /// Frame cap for the headless runner
    pub max_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            seed: 0x5EED,
            star_count: STAR_COUNT,
            player_sprite: [500.0, 340.0],
            enemy_sprite: [30.0, 30.0],
            max_frames: 3600,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Read settings from disk, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Bad settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    pub fn player_sprite_size(&self) -> Vec2 {
        Vec2::from(self.player_sprite)
    }

    pub fn enemy_sprite_size(&self) -> Vec2 {
        Vec2::from(self.enemy_sprite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "screen_width": 1024 }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.screen_width, 1024.0);
        assert_eq!(settings.screen_height, 600.0);
        assert_eq!(settings.star_count, STAR_COUNT);
    }

    #[test]
    fn test_json_survives_reload() {
        let settings = Settings {
            max_frames: 10,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ seed: ").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load("/definitely/not/here/settings.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join("star_raid_settings_test.json");
        std::fs::write(&path, r#"{ "star_count": 5 }"#).unwrap();
        let settings = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(settings.star_count, 5);
        assert_eq!(settings.bounds(), Vec2::new(800.0, 600.0));
    }
}
