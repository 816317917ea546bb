//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; there is no
//! module-level state anywhere in the crate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::powerup::EffectTimers;
use crate::consts::*;
use crate::settings::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation suspended by the player
    Paused,
    /// Grid wiped out; the next tick builds the next level
    LevelCleared,
    /// Run ended (terminal until restart)
    GameOver,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExtraLife,
    Shield,
    SpreadShot,
}

impl PowerUpKind {
    /// Whether the effect runs on a deadline
    pub fn is_timed(&self) -> bool {
        !matches!(self, PowerUpKind::ExtraLife)
    }
}

/// Alien variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlienKind {
    #[default]
    Basic,
    ExtraLifeCarrier,
    ShieldCarrier,
    SpreadShotCarrier,
}

impl AlienKind {
    /// Carrier kinds in roll order
    pub const CARRIERS: [AlienKind; 3] = [
        AlienKind::ExtraLifeCarrier,
        AlienKind::ShieldCarrier,
        AlienKind::SpreadShotCarrier,
    ];

    /// Power-up dropped when this alien is destroyed
    pub fn drop(&self) -> Option<PowerUpKind> {
        match self {
            AlienKind::Basic => None,
            AlienKind::ExtraLifeCarrier => Some(PowerUpKind::ExtraLife),
            AlienKind::ShieldCarrier => Some(PowerUpKind::Shield),
            AlienKind::SpreadShotCarrier => Some(PowerUpKind::SpreadShot),
        }
    }

    pub fn is_carrier(&self) -> bool {
        self.drop().is_some()
    }
}

/// A projectile. Player shots travel along `angle` (0 = straight up);
/// alien shots ignore it and fall straight down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub angle: f32,
}

impl Projectile {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal pixels per tick
    pub speed: f32,
    /// Live player projectiles, oldest first
    pub projectiles: Vec<Projectile>,
    pub shield_active: bool,
    pub spread_shot_active: bool,
    /// Simulation time of the last volley
    #[serde(default)]
    pub last_shot_ms: Option<f64>,
}

impl Player {
    /// Ship centered horizontally at the bottom of the viewport
    pub fn new(tuning: &Tuning) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Vec2::new(
                tuning.viewport_width / 2.0 - size.x / 2.0,
                tuning.viewport_height - size.y - PLAYER_BOTTOM_MARGIN,
            ),
            size,
            speed: tuning.player_speed,
            projectiles: Vec::new(),
            shield_active: false,
            spread_shot_active: false,
            last_shot_ms: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        crate::box_center(self.pos, self.size)
    }
}

/// An alien in the swarm grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alien {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Dead aliens stay in the grid until the next level replaces it
    pub alive: bool,
    pub kind: AlienKind,
}

impl Alien {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(ALIEN_WIDTH, ALIEN_HEIGHT))
    }

    pub fn center(&self) -> Vec2 {
        crate::box_center(self.pos, Vec2::new(ALIEN_WIDTH, ALIEN_HEIGHT))
    }
}

/// A dropped power-up homing on the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn size() -> Vec2 {
        Vec2::new(POWERUP_WIDTH, POWERUP_HEIGHT)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Self::size())
    }

    pub fn center(&self) -> Vec2 {
        crate::box_center(self.pos, Self::size())
    }
}

/// Discrete notifications produced during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    LivesChanged { lives: u32 },
    LevelChanged { level: u32 },
    PhaseChanged { phase: GamePhase },
    AlienDestroyed { kind: AlienKind, points: u64 },
    /// Alien projectile struck the unshielded player
    PlayerHit { hits: u32 },
    LifeLost { lives: u32 },
    PowerUpSpawned { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    EffectExpired { kind: PowerUpKind },
}

/// Scalar values last announced to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reported {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG stream (advances across restarts)
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    /// Hits absorbed toward the next life loss
    pub hits: u32,
    pub score: u64,
    /// Simulated ticks since the run started
    pub time_ticks: u64,
    /// Simulation clock (ms); only advances on simulated ticks
    pub time_ms: f64,
    pub phase: GamePhase,
    pub player: Player,
    /// Current grid, row-major
    pub aliens: Vec<Alien>,
    /// +1 sweeping right, -1 sweeping left
    pub swarm_direction: f32,
    pub alien_projectiles: Vec<Projectile>,
    pub powerups: Vec<PowerUp>,
    /// Power-up deadlines
    pub effects: EffectTimers,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    pub reported: Reported,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game and populate the level 1 grid
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            level: STARTING_LEVEL,
            lives: tuning.starting_lives,
            hits: 0,
            score: 0,
            time_ticks: 0,
            time_ms: 0.0,
            phase: GamePhase::Playing,
            aliens: Vec::new(),
            swarm_direction: 1.0,
            alien_projectiles: Vec::new(),
            powerups: Vec::new(),
            effects: EffectTimers::default(),
            events: Vec::new(),
            reported: Reported {
                score: 0,
                lives: tuning.starting_lives,
                level: STARTING_LEVEL,
            },
            tuning,
            next_id: 1,
        };

        super::spawn::spawn_grid(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Number of aliens still alive
    pub fn live_alien_count(&self) -> usize {
        self.aliens.iter().filter(|a| a.alive).count()
    }

    /// Move to a new phase, announcing the change
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged { phase });
        }
    }
}
