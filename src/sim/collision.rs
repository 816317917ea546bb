//! Collision detection and resolution
//!
//! Everything in the arena is an axis-aligned box. Resolution runs three
//! passes in a fixed order:
//! 1. player projectiles vs live aliens
//! 2. alien projectiles vs the player (skipped while shielded)
//! 3. power-ups vs the player
//!
//! Each pass rebuilds its collection with `retain`, so removal never skips or
//! revisits an element, and a projectile resolves at most one hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spawn;
use super::state::{GameEvent, GameState, PowerUpKind};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap on both axes; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.max().x
            && self.max().x > other.pos.x
            && self.pos.y < other.max().y
            && self.max().y > other.pos.y
    }
}

/// What a resolution pass found that later stages need
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Power-ups picked up this tick, in pickup order
    pub collected: Vec<PowerUpKind>,
    /// Aliens destroyed this tick
    pub aliens_destroyed: u32,
    /// Alien projectiles that struck the player this tick
    pub player_hits: u32,
    /// Lives reached zero during this tick
    pub lives_depleted: bool,
}

/// Run all collision passes for one tick
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    resolve_player_shots(state, &mut report);
    resolve_alien_shots(state, &mut report);
    resolve_pickups(state, &mut report);
    report
}

/// Player projectiles against live aliens
fn resolve_player_shots(state: &mut GameState, report: &mut CollisionReport) {
    let aliens = &mut state.aliens;
    let mut destroyed: Vec<usize> = Vec::new();

    state.player.projectiles.retain(|projectile| {
        let shot = projectile.bounds();
        // First live alien in grid order wins; marking it dead keeps later
        // projectiles this tick from scoring it again.
        match aliens
            .iter()
            .position(|alien| alien.alive && alien.bounds().overlaps(&shot))
        {
            Some(idx) => {
                aliens[idx].alive = false;
                destroyed.push(idx);
                false
            }
            None => true,
        }
    });

    for idx in destroyed {
        let (kind, center) = {
            let alien = &state.aliens[idx];
            (alien.kind, alien.center())
        };
        let points = if kind.is_carrier() {
            state.tuning.carrier_points
        } else {
            state.tuning.basic_points
        };
        state.score += points;
        report.aliens_destroyed += 1;
        state.events.push(GameEvent::AlienDestroyed { kind, points });

        if let Some(drop) = kind.drop() {
            spawn::spawn_powerup(state, drop, center);
        }
    }
}

/// Alien projectiles against the player
fn resolve_alien_shots(state: &mut GameState, report: &mut CollisionReport) {
    if state.player.shield_active {
        return;
    }

    let player = state.player.bounds();
    let before = state.alien_projectiles.len();
    state
        .alien_projectiles
        .retain(|projectile| !projectile.bounds().overlaps(&player));
    let hits = (before - state.alien_projectiles.len()) as u32;

    for _ in 0..hits {
        state.hits += 1;
        report.player_hits += 1;
        state.events.push(GameEvent::PlayerHit { hits: state.hits });

        if state.hits >= state.tuning.hits_per_life {
            state.hits = 0;
            state.lives = state.lives.saturating_sub(1);
            state.events.push(GameEvent::LifeLost { lives: state.lives });
            if state.lives == 0 {
                report.lives_depleted = true;
            }
        }
    }
}

/// Power-ups against the player; effects are applied by the power-up system
fn resolve_pickups(state: &mut GameState, report: &mut CollisionReport) {
    let player = state.player.bounds();
    let collected = &mut report.collected;
    state.powerups.retain(|powerup| {
        if powerup.bounds().overlaps(&player) {
            collected.push(powerup.kind);
            false
        } else {
            true
        }
    });
}
