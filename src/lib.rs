//! Swarm Strike - simulation core for a fixed-viewport alien-swarm shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, power-ups, progression)
//! - `clock`: Fixed-rate tick driver
//! - `settings`: Data-driven game balance
//!
//! Rendering, input capture and HUD widgets live outside this crate. They feed
//! [`sim::TickInput`] in and read [`sim::Snapshot`] / [`sim::GameEvent`] out.

pub mod clock;
pub mod settings;
pub mod sim;

pub use clock::GameClock;
pub use settings::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the clock will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default viewport
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Gap between the ship and the bottom of the viewport
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    /// Projectiles (both owners share a footprint)
    pub const PROJECTILE_WIDTH: f32 = 3.0;
    pub const PROJECTILE_HEIGHT: f32 = 15.0;

    /// Aliens
    pub const ALIEN_WIDTH: f32 = 40.0;
    pub const ALIEN_HEIGHT: f32 = 30.0;
    pub const ALIEN_SPACING: f32 = 15.0;
    /// y of the first grid row
    pub const GRID_TOP: f32 = 50.0;
    pub const ALIEN_ROWS: u32 = 5;
    pub const ALIEN_COLS: u32 = 10;
    /// Upper bound on configured grid dimensions
    pub const MAX_GRID_DIM: u32 = 64;

    /// Power-up drops
    pub const POWERUP_WIDTH: f32 = 20.0;
    pub const POWERUP_HEIGHT: f32 = 20.0;

    /// Alien-projectile hits absorbed per life
    pub const HITS_PER_LIFE: u32 = 5;
    pub const STARTING_LIVES: u32 = 5;
    pub const STARTING_LEVEL: u32 = 1;

    /// Side-lane angle of a spread volley (radians)
    pub const SPREAD_ANGLE: f32 = 0.3;
}

/// Center of an axis-aligned box given its top-left corner and size
#[inline]
pub fn box_center(top_left: Vec2, size: Vec2) -> Vec2 {
    top_left + size * 0.5
}

/// Top-left corner of a box of `size` centered on `center`
#[inline]
pub fn box_origin(center: Vec2, size: Vec2) -> Vec2 {
    center - size * 0.5
}
