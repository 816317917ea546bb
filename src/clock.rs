//! Fixed-rate tick driver
//!
//! Converts variable frame deltas into whole simulation steps. Each step runs
//! to completion before the next, so no two ticks ever overlap.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameState, TickInput, tick};

/// Accumulator-based fixed timestep clock
#[derive(Debug, Clone)]
pub struct GameClock {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
    /// Steps run since creation
    pub total_steps: u64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    /// 60 Hz clock
    pub fn new() -> Self {
        Self::with_step(SIM_DT)
    }

    pub fn with_step(step: f32) -> Self {
        Self {
            step,
            max_substeps: MAX_SUBSTEPS,
            accumulator: 0.0,
            total_steps: 0,
        }
    }

    /// Seconds per step
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time banked toward the next step
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Bank `frame_dt` seconds and run as many whole steps as fit, up to the
    /// substep cap. Returns the number of steps run.
    pub fn advance<F: FnMut(f32)>(&mut self, frame_dt: f32, mut on_step: F) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            on_step(self.step);
            self.accumulator -= self.step;
            substeps += 1;
        }
        // Drop backlog the cap refused so we don't spiral
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        self.total_steps += substeps as u64;
        substeps
    }

    /// Advance a game by one frame. One-shot inputs (pause, restart, skip)
    /// apply to the first step only.
    pub fn run_frame(&mut self, state: &mut GameState, input: &mut TickInput, frame_dt: f32) -> u32 {
        self.advance(frame_dt, |dt| {
            tick(state, input, dt);
            input.pause = false;
            input.restart = false;
            input.skip_level = false;
        })
    }
}
