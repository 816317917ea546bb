//! Per-tick position integration
//!
//! All speeds are in pixels per tick. Anything that leaves the viewport is
//! dropped in the same pass that moved it.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// Move every entity kind one tick
pub fn step(state: &mut GameState, input: &TickInput) {
    move_player(state, input);
    move_player_projectiles(state);
    move_alien_projectiles(state);
    move_swarm(state);
    seek_powerups(state);
}

/// Slide the ship while a direction is held, clamped to the viewport
pub fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    let mut dx = 0.0;
    if input.move_left {
        dx -= player.speed;
    }
    if input.move_right {
        dx += player.speed;
    }
    let max_x = (state.tuning.viewport_width - player.size.x).max(0.0);
    player.pos.x = (player.pos.x + dx).clamp(0.0, max_x);
}

/// Advance player shots along their angle, dropping any that leave the top or sides
pub fn move_player_projectiles(state: &mut GameState) {
    let speed = state.tuning.player_projectile_speed;
    let width = state.tuning.viewport_width;
    state.player.projectiles.retain_mut(|p| {
        p.pos += shot_direction(p.angle) * speed;
        p.pos.y >= 0.0 && (0.0..=width).contains(&p.pos.x)
    });
}

/// Drop alien shots straight down, faster on later levels
pub fn move_alien_projectiles(state: &mut GameState) {
    let fall = state.tuning.alien_fall_speed(state.level);
    let height = state.tuning.viewport_height;
    state.alien_projectiles.retain_mut(|p| {
        p.pos.y += fall;
        p.pos.y <= height
    });
}

/// Sweep the swarm sideways; on edge contact reverse and descend once.
/// Returns true if the swarm bounced this tick.
pub fn move_swarm(state: &mut GameState) -> bool {
    let step = state.tuning.swarm_step(state.level) * state.swarm_direction;
    let max_x = state.tuning.viewport_width - ALIEN_WIDTH;

    let mut touched_edge = false;
    for alien in state.aliens.iter_mut().filter(|a| a.alive) {
        alien.pos.x += step;
        if alien.pos.x <= 0.0 || alien.pos.x >= max_x {
            touched_edge = true;
        }
    }

    if touched_edge {
        state.swarm_direction = -state.swarm_direction;
        let drop = state.tuning.swarm_step_down;
        for alien in state.aliens.iter_mut().filter(|a| a.alive) {
            alien.pos.y += drop;
        }
    }

    touched_edge
}

/// Home every power-up on the player's center
pub fn seek_powerups(state: &mut GameState) {
    let target = state.player.center();
    let speed = state.tuning.powerup_seek_speed;
    for powerup in &mut state.powerups {
        // Zero-length offset normalizes to zero: no movement this tick
        let dir = (target - powerup.center()).normalize_or_zero();
        powerup.pos += dir * speed;
    }
}

/// Unit travel vector of a player shot at `angle` (y grows downward)
pub fn shot_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}
