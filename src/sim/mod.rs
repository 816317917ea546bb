//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (grid order, then spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod movement;
pub mod powerup;
pub mod progression;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, Rect};
pub use powerup::EffectTimers;
pub use snapshot::Snapshot;
pub use state::{
    Alien, AlienKind, GameEvent, GamePhase, GameState, Player, PowerUp, PowerUpKind, Projectile,
};
pub use tick::{TickInput, tick};
