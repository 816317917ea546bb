//! Game balance and tuning
//!
//! Every difficulty knob the simulation reads lives here. Values can be
//! overridden from a JSON file; missing keys keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to read a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Player ===
    /// Horizontal pixels per tick while a direction is held
    pub player_speed: f32,
    /// Player projectile speed along its travel angle (pixels per tick)
    pub player_projectile_speed: f32,
    /// Minimum time between volleys while fire is held
    pub shoot_delay_ms: f64,
    pub starting_lives: u32,
    pub hits_per_life: u32,

    // === Swarm ===
    pub alien_rows: u32,
    pub alien_cols: u32,
    /// Horizontal step per tick at level 0
    pub swarm_base_step: f32,
    pub swarm_step_per_level: f32,
    /// Downward shift applied once per edge bounce
    pub swarm_step_down: f32,
    /// Chance that a grid cell becomes a carrier
    pub carrier_chance: f64,

    // === Alien fire ===
    pub base_shot_chance: f64,
    pub shot_chance_per_level: f64,
    pub alien_projectile_base_speed: f32,
    pub alien_projectile_speed_per_level: f32,

    // === Power-ups ===
    /// Pixels per tick a drop moves toward the player
    pub powerup_seek_speed: f32,
    pub shield_duration_ms: f64,
    pub spread_shot_duration_ms: f64,

    // === Scoring ===
    pub basic_points: u64,
    pub carrier_points: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            player_speed: 5.0,
            player_projectile_speed: 7.0,
            shoot_delay_ms: 250.0,
            starting_lives: STARTING_LIVES,
            hits_per_life: HITS_PER_LIFE,

            alien_rows: ALIEN_ROWS,
            alien_cols: ALIEN_COLS,
            swarm_base_step: 2.0,
            swarm_step_per_level: 0.5,
            swarm_step_down: 30.0,
            carrier_chance: 0.1,

            base_shot_chance: 0.02,
            shot_chance_per_level: 0.005,
            alien_projectile_base_speed: 5.0,
            alien_projectile_speed_per_level: 0.5,

            powerup_seek_speed: 6.0,
            shield_duration_ms: 5000.0,
            spread_shot_duration_ms: 8000.0,

            basic_points: 10,
            carrier_points: 20,
        }
    }
}

impl Tuning {
    /// Swarm horizontal step for a level
    pub fn swarm_step(&self, level: u32) -> f32 {
        self.swarm_base_step + level as f32 * self.swarm_step_per_level
    }

    /// Alien projectile fall speed for a level
    pub fn alien_fall_speed(&self, level: u32) -> f32 {
        self.alien_projectile_base_speed + level as f32 * self.alien_projectile_speed_per_level
    }

    /// Per-tick probability of an alien shot for a level, clamped to [0, 1]
    pub fn shot_chance(&self, level: u32) -> f64 {
        (self.base_shot_chance + level as f64 * self.shot_chance_per_level).clamp(0.0, 1.0)
    }

    /// Clamp out-of-range values into something the simulation can run
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn positive_f32(value: f32, fallback: f32) -> f32 {
            if value.is_finite() && value > 0.0 { value } else { fallback }
        }
        fn non_negative_f64(value: f64, fallback: f64) -> f64 {
            if value.is_finite() && value >= 0.0 { value } else { fallback }
        }
        fn probability(value: f64) -> f64 {
            if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 }
        }

        // The grid must fit inside the viewport horizontally
        let min_width = PLAYER_WIDTH.max(ALIEN_WIDTH) + 1.0;
        let min_height = GRID_TOP + ALIEN_HEIGHT + PLAYER_HEIGHT + PLAYER_BOTTOM_MARGIN + 1.0;
        self.viewport_width = positive_f32(self.viewport_width, defaults.viewport_width).max(min_width);
        self.viewport_height =
            positive_f32(self.viewport_height, defaults.viewport_height).max(min_height);

        self.player_speed = positive_f32(self.player_speed, defaults.player_speed);
        self.player_projectile_speed =
            positive_f32(self.player_projectile_speed, defaults.player_projectile_speed);
        self.shoot_delay_ms = non_negative_f64(self.shoot_delay_ms, defaults.shoot_delay_ms);
        self.starting_lives = self.starting_lives.max(1);
        self.hits_per_life = self.hits_per_life.max(1);

        self.alien_rows = self.alien_rows.clamp(1, MAX_GRID_DIM);
        self.alien_cols = self.alien_cols.clamp(1, MAX_GRID_DIM);
        self.swarm_base_step = positive_f32(self.swarm_base_step, defaults.swarm_base_step);
        self.swarm_step_per_level = self.swarm_step_per_level.max(0.0);
        self.swarm_step_down = self.swarm_step_down.max(0.0);
        self.carrier_chance = probability(self.carrier_chance);

        self.base_shot_chance = probability(self.base_shot_chance);
        self.shot_chance_per_level = self.shot_chance_per_level.max(0.0);
        self.alien_projectile_base_speed =
            positive_f32(self.alien_projectile_base_speed, defaults.alien_projectile_base_speed);
        self.alien_projectile_speed_per_level = self.alien_projectile_speed_per_level.max(0.0);

        self.powerup_seek_speed = positive_f32(self.powerup_seek_speed, defaults.powerup_seek_speed);
        self.shield_duration_ms = non_negative_f64(self.shield_duration_ms, defaults.shield_duration_ms);
        self.spread_shot_duration_ms =
            non_negative_f64(self.spread_shot_duration_ms, defaults.spread_shot_duration_ms);

        self
    }

    /// Parse tuning overrides from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: display.clone(),
            source,
        })?;
        let tuning = Self::from_json(&json).map_err(|source| TuningError::Parse {
            path: display.clone(),
            source,
        })?;
        log::info!("Loaded tuning from {}", display);
        Ok(tuning)
    }

    /// Load tuning from a file, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|e| {
                log::warn!("{e}; using default tuning");
                Self::default()
            }),
            None => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_balance() {
        let t = Tuning::default();
        assert_eq!(t.alien_rows * t.alien_cols, 50);
        assert_eq!(t.swarm_step(1), 2.5);
        assert_eq!(t.alien_fall_speed(2), 6.0);
        assert!((t.shot_chance(1) - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_shot_chance_is_clamped() {
        let t = Tuning {
            base_shot_chance: 0.9,
            shot_chance_per_level: 0.5,
            ..Default::default()
        };
        assert_eq!(t.shot_chance(10), 1.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "player_speed": 8.0, "alien_cols": 4 }"#).unwrap();
        assert_eq!(t.player_speed, 8.0);
        assert_eq!(t.alien_cols, 4);
        assert_eq!(t.alien_rows, ALIEN_ROWS);
        assert_eq!(t.shield_duration_ms, 5000.0);
    }

    #[test]
    fn test_huge_grid_is_capped() {
        let t = Tuning::from_json(r#"{ "alien_rows": 4294967295, "alien_cols": 4294967295 }"#).unwrap();
        assert_eq!(t.alien_rows, MAX_GRID_DIM);
        assert_eq!(t.alien_cols, MAX_GRID_DIM);

        let state = crate::sim::GameState::with_tuning(1, t);
        assert_eq!(state.aliens.len(), (MAX_GRID_DIM * MAX_GRID_DIM) as usize);
    }

    #[test]
    fn test_sanitize_repairs_bad_values() {
        let t = Tuning {
            carrier_chance: 3.0,
            base_shot_chance: -1.0,
            player_speed: -2.0,
            hits_per_life: 0,
            alien_rows: 0,
            shield_duration_ms: f64::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.carrier_chance, 1.0);
        assert_eq!(t.base_shot_chance, 0.0);
        assert_eq!(t.player_speed, 5.0);
        assert_eq!(t.hits_per_life, 1);
        assert_eq!(t.alien_rows, 1);
        assert_eq!(t.shield_duration_ms, 5000.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
        assert_eq!(Tuning::load_or_default(Some(Path::new("/definitely/not/here.json"))), Tuning::default());
    }
}
