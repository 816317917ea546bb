//! Level progression and the game-over state machine
//!
//! ```text
//! Playing <-> Paused           (player toggle)
//! Playing  -> LevelCleared     (every alien dead)
//! LevelCleared -> Playing      (next tick: level + 1, fresh grid)
//! Playing  -> GameOver         (lives exhausted or swarm reached the ship)
//! GameOver -> Playing          (restart only)
//! ```

use super::collision::CollisionReport;
use super::powerup;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState, Player, Reported};
use crate::consts::*;

/// Flip between Playing and Paused. Ignored in any other phase.
pub fn toggle_pause(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => state.set_phase(GamePhase::Paused),
        GamePhase::Paused => state.set_phase(GamePhase::Playing),
        _ => {}
    }
}

/// True once any live alien's lower edge reaches the ship's row
pub fn swarm_breached(state: &GameState) -> bool {
    let line = state.player.pos.y;
    state
        .aliens
        .iter()
        .any(|alien| alien.alive && alien.pos.y + ALIEN_HEIGHT >= line)
}

/// Derive the phase transition from the post-collision state
pub fn evaluate(state: &mut GameState, report: &CollisionReport) {
    if state.phase != GamePhase::Playing {
        return;
    }

    if report.lives_depleted || state.lives == 0 {
        log::info!(
            "Game over: out of lives (score {}, level {})",
            state.score,
            state.level
        );
        state.set_phase(GamePhase::GameOver);
    } else if swarm_breached(state) {
        log::info!(
            "Game over: swarm breached the line (score {}, level {})",
            state.score,
            state.level
        );
        state.set_phase(GamePhase::GameOver);
    } else if state.aliens.iter().all(|a| !a.alive) {
        log::info!("Level {} cleared", state.level);
        state.set_phase(GamePhase::LevelCleared);
    }
}

/// Build the next level: bump the level, clear all shots, respawn the grid
pub fn advance_level(state: &mut GameState) {
    state.level += 1;
    state.player.projectiles.clear();
    state.alien_projectiles.clear();
    spawn::spawn_grid(state);
    log::info!("Starting level {}", state.level);
    state.set_phase(GamePhase::Playing);
}

/// Reset a finished run. Only valid from GameOver; returns false otherwise.
pub fn restart(state: &mut GameState) -> bool {
    if state.phase != GamePhase::GameOver {
        return false;
    }

    state.score = 0;
    state.lives = state.tuning.starting_lives;
    state.hits = 0;
    state.level = STARTING_LEVEL;
    state.player = Player::new(&state.tuning);
    state.alien_projectiles.clear();
    state.powerups.clear();
    powerup::reset(state);
    spawn::spawn_grid(state);

    log::info!("Restarted run (seed {})", state.seed);
    state.set_phase(GamePhase::Playing);
    true
}

/// Announce score/lives/level only when they differ from the last report
pub fn emit_changes(state: &mut GameState) {
    let current = Reported {
        score: state.score,
        lives: state.lives,
        level: state.level,
    };
    let last = state.reported;

    if current.score != last.score {
        state.events.push(GameEvent::ScoreChanged {
            score: current.score,
        });
    }
    if current.lives != last.lives {
        state.events.push(GameEvent::LivesChanged {
            lives: current.lives,
        });
    }
    if current.level != last.level {
        state.events.push(GameEvent::LevelChanged {
            level: current.level,
        });
    }
    state.reported = current;
}
