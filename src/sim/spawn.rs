//! Entity creation: the alien grid, alien fire, player volleys and drops

use glam::Vec2;
use rand::Rng;

use super::state::{Alien, AlienKind, GameEvent, GameState, PowerUp, PowerUpKind, Projectile};
use super::tick::TickInput;
use crate::consts::*;

/// Roll an alien type: `carrier_chance` of a carrier, uniform among carriers
pub fn roll_alien_kind<R: Rng>(rng: &mut R, carrier_chance: f64) -> AlienKind {
    if rng.random_bool(carrier_chance) {
        AlienKind::CARRIERS[rng.random_range(0..AlienKind::CARRIERS.len())]
    } else {
        AlienKind::Basic
    }
}

/// Grid cell position for (row, col)
pub fn grid_position(row: u32, col: u32) -> Vec2 {
    Vec2::new(
        col as f32 * (ALIEN_WIDTH + ALIEN_SPACING),
        row as f32 * (ALIEN_HEIGHT + ALIEN_SPACING) + GRID_TOP,
    )
}

/// Replace the alien set with a fresh grid
pub fn spawn_grid(state: &mut GameState) {
    let rows = state.tuning.alien_rows;
    let cols = state.tuning.alien_cols;
    let carrier_chance = state.tuning.carrier_chance;

    state.aliens.clear();
    state.aliens.reserve(rows as usize * cols as usize);
    state.swarm_direction = 1.0;

    for row in 0..rows {
        for col in 0..cols {
            let kind = roll_alien_kind(&mut state.rng, carrier_chance);
            let id = state.next_entity_id();
            state.aliens.push(Alien {
                id,
                pos: grid_position(row, col),
                alive: true,
                kind,
            });
        }
    }

    let carriers = state.aliens.iter().filter(|a| a.kind.is_carrier()).count();
    log::debug!(
        "Level {} grid: {}x{} aliens, {} carriers",
        state.level,
        rows,
        cols,
        carriers
    );
}

/// Per-tick spawning: the player's volley, then a possible alien shot
pub fn step(state: &mut GameState, input: &TickInput) {
    if input.fire {
        try_fire(state);
    }
    maybe_alien_shot(state);
}

/// Fire a volley if the cooldown has elapsed. Returns true when shots spawned.
pub fn try_fire(state: &mut GameState) -> bool {
    let ready = match state.player.last_shot_ms {
        Some(last) => state.time_ms - last > state.tuning.shoot_delay_ms,
        None => true,
    };
    if !ready {
        return false;
    }

    let origin = Vec2::new(
        state.player.pos.x + state.player.size.x / 2.0 - PROJECTILE_WIDTH / 2.0,
        state.player.pos.y,
    );
    let angles: &[f32] = if state.player.spread_shot_active {
        &[0.0, -SPREAD_ANGLE, SPREAD_ANGLE]
    } else {
        &[0.0]
    };

    for &angle in angles {
        let id = state.next_entity_id();
        state.player.projectiles.push(Projectile {
            id,
            pos: origin,
            angle,
        });
    }
    state.player.last_shot_ms = Some(state.time_ms);
    true
}

/// Roll for an alien shot and fire it from a random live alien
pub fn maybe_alien_shot(state: &mut GameState) {
    let chance = state.tuning.shot_chance(state.level);
    if !state.rng.random_bool(chance) {
        return;
    }

    let live: Vec<usize> = state
        .aliens
        .iter()
        .enumerate()
        .filter(|(_, a)| a.alive)
        .map(|(i, _)| i)
        .collect();
    if live.is_empty() {
        return;
    }

    let pick = live[state.rng.random_range(0..live.len())];
    let shooter = &state.aliens[pick];
    let pos = Vec2::new(shooter.pos.x + ALIEN_WIDTH / 2.0, shooter.pos.y + ALIEN_HEIGHT);
    let id = state.next_entity_id();
    state.alien_projectiles.push(Projectile { id, pos, angle: 0.0 });
}

/// Drop a power-up centered on `center`
pub fn spawn_powerup(state: &mut GameState, kind: PowerUpKind, center: Vec2) {
    let id = state.next_entity_id();
    state.powerups.push(PowerUp {
        id,
        pos: crate::box_origin(center, PowerUp::size()),
        kind,
    });
    state.events.push(GameEvent::PowerUpSpawned { kind });
}
