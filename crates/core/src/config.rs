//! World tuning knobs shared by generation and pathfinding, optionally loaded from TOML.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::ENEMY_ATTACK;

pub const DEFAULT_GRID_SIZE: usize = 18;
pub const DEFAULT_MIN_ENEMY_DISTANCE: u32 = 5;
pub const DEFAULT_OBSTACLE_HEALTH: i32 = 20;
pub const DEFAULT_DESTRUCTIBLE_RATIO: f64 = 0.3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to encode tuning: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub grid_size: usize,
    pub min_enemy_distance: u32,
    /// Lowest distance the placement loop may relax to before giving up.
    pub enemy_distance_floor: u32,
    /// Batches tried per distance step.
    pub max_placement_attempts: u32,
    pub destructible_ratio: f64,
    pub obstacle_health: i32,
    pub enemy_attack: i32,
    pub passage_guarantee: bool,
    /// Cells of padding around each obstacle when checking the passage.
    pub passage_clearance: u32,
    pub passage_tries: usize,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            min_enemy_distance: DEFAULT_MIN_ENEMY_DISTANCE,
            enemy_distance_floor: DEFAULT_MIN_ENEMY_DISTANCE,
            max_placement_attempts: 10_000,
            destructible_ratio: DEFAULT_DESTRUCTIBLE_RATIO,
            obstacle_health: DEFAULT_OBSTACLE_HEALTH,
            enemy_attack: ENEMY_ATTACK,
            passage_guarantee: true,
            passage_clearance: 0,
            passage_tries: 8,
        }
    }
}

impl WorldTuning {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let tuning: Self = toml::from_str(content)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 3 {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be at least 3, got {}",
                self.grid_size
            )));
        }
        if self.enemy_distance_floor > self.min_enemy_distance {
            return Err(ConfigError::Invalid(format!(
                "enemy_distance_floor ({}) exceeds min_enemy_distance ({})",
                self.enemy_distance_floor, self.min_enemy_distance
            )));
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::Invalid("max_placement_attempts must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.destructible_ratio) {
            return Err(ConfigError::Invalid(format!(
                "destructible_ratio must be within 0..=1, got {}",
                self.destructible_ratio
            )));
        }
        if self.obstacle_health <= 0 {
            return Err(ConfigError::Invalid("obstacle_health must be positive".into()));
        }
        if self.enemy_attack <= 0 {
            return Err(ConfigError::Invalid("enemy_attack must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_are_valid() {
        WorldTuning::default().validate().expect("default tuning should validate");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let tuning = WorldTuning::from_toml_str("grid_size = 24\n").expect("parse");
        assert_eq!(tuning.grid_size, 24);
        assert_eq!(tuning.min_enemy_distance, DEFAULT_MIN_ENEMY_DISTANCE);
        assert_eq!(tuning.enemy_attack, ENEMY_ATTACK);
    }

    #[test]
    fn rejects_floor_above_minimum_distance() {
        let err = WorldTuning::from_toml_str("min_enemy_distance = 3\nenemy_distance_floor = 4\n")
            .expect_err("floor above minimum should be rejected");
        assert!(matches!(err, ConfigError::Invalid(_)), "unexpected error: {err}");
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = WorldTuning::from_toml_str("grid_size = [").expect_err("malformed toml");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn tuning_file_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("tuning.toml");
        let tuning = WorldTuning { grid_size: 12, passage_guarantee: false, ..Default::default() };

        fs::write(&path, tuning.to_toml_string().expect("encode")).expect("write");
        let loaded = WorldTuning::load(&path).expect("load");
        assert_eq!(tuning, loaded);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");
        let err = WorldTuning::load(&path).expect_err("missing file");
        assert!(err.to_string().contains("absent.toml"), "error should name the file: {err}");
    }
}
