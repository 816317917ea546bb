//! Swarm Strike headless runner
//!
//! Drives a full run with a simple autopilot through the fixed-rate clock,
//! logging gameplay events, then prints the final snapshot as JSON.
//!
//! Usage: `swarm-strike [tuning.json] [seed]`

use std::path::PathBuf;

use swarm_strike::GameClock;
use swarm_strike::Tuning;
use swarm_strike::consts::*;
use swarm_strike::sim::{GameEvent, GamePhase, GameState, Snapshot, TickInput};

/// Frames to simulate before giving up on the run (10 minutes at 60 Hz)
const MAX_FRAMES: u32 = 60 * 60 * 10;

/// Game session holding all state
struct Game {
    state: GameState,
    clock: GameClock,
    input: TickInput,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            clock: GameClock::new(),
            input: TickInput::default(),
        }
    }

    /// Pick controls for the next frame: chase power-ups, otherwise line up
    /// under the lowest live alien and keep firing.
    fn autopilot(&mut self) {
        let state = &self.state;
        let ship_x = state.player.center().x;

        let target_x = state
            .powerups
            .iter()
            .map(|p| p.center())
            .min_by(|a, b| {
                a.distance_squared(state.player.center())
                    .total_cmp(&b.distance_squared(state.player.center()))
            })
            .or_else(|| {
                state
                    .aliens
                    .iter()
                    .filter(|a| a.alive)
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                    .map(|a| a.center())
            })
            .map(|c| c.x);

        let dead_zone = state.player.speed;
        self.input.move_left = target_x.is_some_and(|x| x < ship_x - dead_zone);
        self.input.move_right = target_x.is_some_and(|x| x > ship_x + dead_zone);
        self.input.fire = true;
    }

    fn log_events(&self) {
        for event in &self.state.events {
            match event {
                GameEvent::PhaseChanged { phase } => log::info!("Phase -> {:?}", phase),
                GameEvent::LevelChanged { level } => log::info!("Level {}", level),
                GameEvent::LifeLost { lives } => log::info!("Life lost, {} remaining", lives),
                GameEvent::PowerUpCollected { kind } => log::info!("Collected {:?}", kind),
                other => log::trace!("{:?}", other),
            }
        }
    }

    fn run(&mut self) {
        for _ in 0..MAX_FRAMES {
            self.autopilot();
            self.clock
                .run_frame(&mut self.state, &mut self.input, SIM_DT);
            self.log_events();
            if self.state.phase == GamePhase::GameOver {
                break;
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Swarm Strike (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning_path = args.next().map(PathBuf::from);
    let tuning = Tuning::load_or_default(tuning_path.as_deref());
    let seed = args
        .next()
        .and_then(|s| match s.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                log::warn!("Ignoring seed {:?}: {}", s, e);
                None
            }
        })
        .unwrap_or(0x5EED);

    let mut game = Game::new(seed, tuning);
    game.run();

    log::info!(
        "Run finished after {} ticks: score {}, level {}, lives {}",
        game.clock.total_steps,
        game.state.score,
        game.state.level,
        game.state.lives
    );

    match serde_json::to_string_pretty(&Snapshot::capture(&game.state)) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on wasm; embedders drive `sim::tick` directly
}
