//! Power-up effects and their expiry deadlines
//!
//! Timed effects are rows in a deadline table owned by [`GameState`], checked
//! against the simulation clock once per tick. Re-collecting an effect
//! overwrites its deadline, so there is never more than one pending expiry per
//! effect and nothing can fire late against a newer collection.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, PowerUpKind};

/// Absolute expiry deadlines on the simulation clock (ms)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectTimers {
    pub shield_until_ms: Option<f64>,
    pub spread_shot_until_ms: Option<f64>,
}

impl EffectTimers {
    fn slot(&mut self, kind: PowerUpKind) -> Option<&mut Option<f64>> {
        match kind {
            PowerUpKind::Shield => Some(&mut self.shield_until_ms),
            PowerUpKind::SpreadShot => Some(&mut self.spread_shot_until_ms),
            PowerUpKind::ExtraLife => None,
        }
    }

    /// Start or restart a timed effect. Restarting replaces the deadline.
    pub fn arm(&mut self, kind: PowerUpKind, now_ms: f64, duration_ms: f64) {
        if let Some(slot) = self.slot(kind) {
            *slot = Some(now_ms + duration_ms);
        }
    }

    /// Deadline of a running effect
    pub fn deadline(&self, kind: PowerUpKind) -> Option<f64> {
        match kind {
            PowerUpKind::Shield => self.shield_until_ms,
            PowerUpKind::SpreadShot => self.spread_shot_until_ms,
            PowerUpKind::ExtraLife => None,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind, now_ms: f64) -> bool {
        self.deadline(kind).is_some_and(|until| now_ms < until)
    }

    /// Time left on an effect (0 when inactive)
    pub fn remaining_ms(&self, kind: PowerUpKind, now_ms: f64) -> f64 {
        self.deadline(kind)
            .map(|until| (until - now_ms).max(0.0))
            .unwrap_or(0.0)
    }

    /// Remove every deadline at or before `now_ms`, returning the lapsed effects
    pub fn expire(&mut self, now_ms: f64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in [PowerUpKind::Shield, PowerUpKind::SpreadShot] {
            let Some(slot) = self.slot(kind) else {
                continue;
            };
            if matches!(*slot, Some(until) if now_ms >= until) {
                *slot = None;
                expired.push(kind);
            }
        }
        expired
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Apply one collected power-up
pub fn apply(state: &mut GameState, kind: PowerUpKind) {
    let now = state.time_ms;
    match kind {
        PowerUpKind::ExtraLife => {
            state.lives += 1;
        }
        PowerUpKind::Shield => {
            state
                .effects
                .arm(kind, now, state.tuning.shield_duration_ms);
            state.player.shield_active = true;
        }
        PowerUpKind::SpreadShot => {
            state
                .effects
                .arm(kind, now, state.tuning.spread_shot_duration_ms);
            state.player.spread_shot_active = true;
        }
    }
    log::debug!(
        "Collected {:?} at {:.0} ms (remaining {:.0} ms)",
        kind,
        now,
        state.effects.remaining_ms(kind, now)
    );
    state.events.push(GameEvent::PowerUpCollected { kind });
}

/// Apply everything the collision pass picked up this tick
pub fn apply_collected(state: &mut GameState, collected: &[PowerUpKind]) {
    for &kind in collected {
        apply(state, kind);
    }
}

/// Clear flags whose deadlines have passed on the simulation clock
pub fn expire_effects(state: &mut GameState) {
    for kind in state.effects.expire(state.time_ms) {
        match kind {
            PowerUpKind::Shield => state.player.shield_active = false,
            PowerUpKind::SpreadShot => state.player.spread_shot_active = false,
            PowerUpKind::ExtraLife => {}
        }
        log::debug!("{:?} expired at {:.0} ms", kind, state.time_ms);
        state.events.push(GameEvent::EffectExpired { kind });
    }
}

/// Drop every running effect (restart)
pub fn reset(state: &mut GameState) {
    state.effects.clear();
    state.player.shield_active = false;
    state.player.spread_shot_active = false;
}
