//! Immutable per-tick view of the simulation for renderers and HUD widgets

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{Alien, GamePhase, GameState, PowerUp, PowerUpKind, Projectile};

/// Owned copy of everything a frontend draws
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    /// Ship bounds; its shots are in `player_projectiles`
    pub ship: Rect,
    pub player_projectiles: Vec<Projectile>,
    /// Full grid including tombstones; renderers skip `alive == false`
    pub aliens: Vec<Alien>,
    pub alien_projectiles: Vec<Projectile>,
    pub powerups: Vec<PowerUp>,
    pub score: u64,
    pub lives: u32,
    pub hits: u32,
    pub level: u32,
    pub shield_active: bool,
    pub spread_shot_active: bool,
    pub shield_remaining_ms: f64,
    pub spread_shot_remaining_ms: f64,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let now = state.time_ms;
        Self {
            tick: state.time_ticks,
            phase: state.phase,
            ship: state.player.bounds(),
            player_projectiles: state.player.projectiles.clone(),
            aliens: state.aliens.clone(),
            alien_projectiles: state.alien_projectiles.clone(),
            powerups: state.powerups.clone(),
            score: state.score,
            lives: state.lives,
            hits: state.hits,
            level: state.level,
            shield_active: state.player.shield_active,
            spread_shot_active: state.player.spread_shot_active,
            shield_remaining_ms: state.effects.remaining_ms(PowerUpKind::Shield, now),
            spread_shot_remaining_ms: state.effects.remaining_ms(PowerUpKind::SpreadShot, now),
        }
    }

    /// Live aliens only
    pub fn live_aliens(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter().filter(|a| a.alive)
    }
}
