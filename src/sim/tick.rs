//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. Stage order
//! within a Playing tick:
//! expiry -> movement -> spawn -> collision -> power-ups -> progression.

use super::state::{GamePhase, GameState};
use super::{collision, movement, powerup, progression, spawn};

/// Control signals for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held: slide left
    pub move_left: bool,
    /// Held: slide right
    pub move_right: bool,
    /// Held: fire whenever the cooldown allows
    pub fire: bool,
    /// One-shot: pause toggle
    pub pause: bool,
    /// One-shot: start a new run (GameOver only)
    pub restart: bool,
    /// Wipe the current grid (debug/testing)
    pub skip_level: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.restart && progression::restart(state) {
        progression::emit_changes(state);
        return;
    }

    // Handle pause toggle
    if input.pause {
        progression::toggle_pause(state);
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::LevelCleared => {
            progression::advance_level(state);
            progression::emit_changes(state);
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.time_ms += dt as f64 * 1000.0;

    powerup::expire_effects(state);

    // Debug: wipe the grid so the normal clear path runs
    if input.skip_level {
        for alien in &mut state.aliens {
            alien.alive = false;
        }
    }

    movement::step(state, input);
    spawn::step(state, input);
    let report = collision::resolve(state);
    powerup::apply_collected(state, &report.collected);
    progression::evaluate(state, &report);
    progression::emit_changes(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Tuning;
    use crate::sim::state::{AlienKind, GameEvent, PowerUp, PowerUpKind, Projectile};
    use glam::Vec2;

    /// Tuning with no alien fire and no carriers so tests control every event
    fn quiet() -> Tuning {
        Tuning {
            base_shot_chance: 0.0,
            shot_chance_per_level: 0.0,
            carrier_chance: 0.0,
            ..Default::default()
        }
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_tick_advances_clock() {
        let mut state = GameState::with_tuning(1, quiet());
        tick(&mut state, &idle(), SIM_DT);
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.time_ticks, 2);
        assert!((state.time_ms - 2000.0 / 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::with_tuning(1, quiet());
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen: Vec<Vec2> = state.aliens.iter().map(|a| a.pos).collect();

        for _ in 0..10 {
            tick(&mut state, &idle(), SIM_DT);
        }
        assert_eq!(state.time_ticks, 0);
        assert!(state.aliens.iter().zip(&frozen).all(|(a, p)| a.pos == *p));

        // Unpause
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_pause_freezes_effect_timers() {
        let mut state = GameState::with_tuning(1, quiet());
        powerup::apply(&mut state, PowerUpKind::Shield);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        for _ in 0..600 {
            tick(&mut state, &idle(), SIM_DT);
        }
        assert!(state.player.shield_active);
        assert_eq!(state.effects.remaining_ms(PowerUpKind::Shield, state.time_ms), 5000.0);
    }

    #[test]
    fn test_held_fire_respects_shoot_delay() {
        let mut state = GameState::with_tuning(1, quiet());
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        // 30 ticks = 500 ms: volleys at ~16.7 ms, ~283 ms
        for _ in 0..30 {
            tick(&mut state, &fire, SIM_DT);
        }
        assert_eq!(state.player.projectiles.len(), 2);
    }

    #[test]
    fn test_end_to_end_hit_first_alien() {
        let mut state = GameState::with_tuning(1, quiet());
        assert_eq!(state.aliens.len(), 50);
        // After one step the shot and the swept alien (0,0) overlap
        let target = state.aliens[0].pos + Vec2::new(2.5 + 15.0, 10.0 + 7.0);
        state.player.projectiles.push(Projectile {
            id: 999,
            pos: target,
            angle: 0.0,
        });

        tick(&mut state, &idle(), SIM_DT);

        assert_eq!(state.score, 10);
        assert!(!state.aliens[0].alive);
        assert_eq!(state.aliens.len(), 50);
        assert!(state.events.contains(&GameEvent::ScoreChanged { score: 10 }));
    }

    #[test]
    fn test_five_hits_cost_one_life() {
        let mut state = GameState::with_tuning(1, quiet());
        for n in 1..=HITS_PER_LIFE {
            // Shot lands on the ship after its fall step
            let pos = state.player.pos + Vec2::new(20.0, -2.0);
            state.alien_projectiles.push(Projectile {
                id: 1000 + n,
                pos,
                angle: 0.0,
            });
            tick(&mut state, &idle(), SIM_DT);
            if n < HITS_PER_LIFE {
                assert_eq!(state.hits, n);
                assert_eq!(state.lives, 5);
            }
        }
        assert_eq!(state.hits, 0);
        assert_eq!(state.lives, 4);
        assert!(state.events.contains(&GameEvent::LivesChanged { lives: 4 }));
    }

    #[test]
    fn test_shield_grants_immunity() {
        let mut state = GameState::with_tuning(1, quiet());
        powerup::apply(&mut state, PowerUpKind::Shield);
        let pos = state.player.pos + Vec2::new(20.0, -2.0);
        state.alien_projectiles.push(Projectile { id: 5000, pos, angle: 0.0 });
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.hits, 0);
    }

    #[test]
    fn test_lives_exhausted_is_game_over_and_terminal() {
        let mut state = GameState::with_tuning(1, quiet());
        state.lives = 1;
        state.hits = HITS_PER_LIFE - 1;
        let pos = state.player.pos + Vec2::new(20.0, -2.0);
        state.alien_projectiles.push(Projectile { id: 5000, pos, angle: 0.0 });

        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);

        // Terminal: nothing moves any more
        let ticks = state.time_ticks;
        tick(&mut state, &idle(), SIM_DT);
        tick(&mut state, &TickInput { pause: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_swarm_breach_is_game_over() {
        let mut state = GameState::with_tuning(1, quiet());
        let line = state.player.pos.y;
        // Bottom row one step-down short of the line; force a bounce
        for alien in &mut state.aliens {
            alien.pos.y += line - ALIEN_HEIGHT - 230.0 - 30.0;
            alien.pos.x += 800.0 - 40.0 - 495.0 - 1.0;
        }
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_level_clear_then_next_level() {
        let mut state = GameState::with_tuning(1, quiet());
        state.alien_projectiles.push(Projectile {
            id: 7000,
            pos: Vec2::new(10.0, 300.0),
            angle: 0.0,
        });
        let skip = TickInput {
            skip_level: true,
            ..Default::default()
        };
        tick(&mut state, &skip, SIM_DT);
        assert_eq!(state.phase, GamePhase::LevelCleared);
        assert_eq!(state.level, 1);

        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 2);
        assert!(state.alien_projectiles.is_empty());
        assert!(state.player.projectiles.is_empty());
        assert_eq!(state.live_alien_count(), 50);
        assert!(state.events.contains(&GameEvent::LevelChanged { level: 2 }));
    }

    #[test]
    fn test_killing_last_alien_clears_level() {
        let mut state = GameState::with_tuning(1, quiet());
        for alien in state.aliens.iter_mut().skip(1) {
            alien.alive = false;
        }
        let target = state.aliens[0].pos + Vec2::new(2.5 + 15.0, 10.0 + 7.0);
        state.player.projectiles.push(Projectile {
            id: 999,
            pos: target,
            angle: 0.0,
        });
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.phase, GamePhase::LevelCleared);
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_carrier_drop_is_collected_and_applied() {
        let mut state = GameState::with_tuning(1, quiet());
        state.aliens[0].kind = AlienKind::ExtraLifeCarrier;
        let target = state.aliens[0].pos + Vec2::new(2.5 + 15.0, 10.0 + 7.0);
        state.player.projectiles.push(Projectile {
            id: 999,
            pos: target,
            angle: 0.0,
        });
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.score, 20);
        assert_eq!(state.powerups.len(), 1);

        // Drop homes in on the ship and is collected
        for _ in 0..200 {
            tick(&mut state, &idle(), SIM_DT);
            if state.powerups.is_empty() {
                break;
            }
        }
        assert!(state.powerups.is_empty());
        assert_eq!(state.lives, 6);
    }

    #[test]
    fn test_collected_spread_shot_changes_volley() {
        let mut state = GameState::with_tuning(1, quiet());
        let pos = crate::box_origin(state.player.center(), PowerUp::size());
        state.powerups.push(PowerUp {
            id: 4242,
            pos,
            kind: PowerUpKind::SpreadShot,
        });
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.player.spread_shot_active);

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);
        assert_eq!(state.player.projectiles.len(), 3);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut state = GameState::with_tuning(1, quiet());
        state.score = 50;
        state.level = 3;
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.score, 50);
        assert_eq!(state.level, 3);

        state.phase = GamePhase::GameOver;
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.events.contains(&GameEvent::ScoreChanged { score: 0 }));
        assert!(state.events.contains(&GameEvent::LevelChanged { level: 1 }));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                move_left: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.hits, state2.hits);
        assert_eq!(state1.alien_projectiles.len(), state2.alien_projectiles.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }
}
