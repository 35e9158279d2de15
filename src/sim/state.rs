//! Game state and core simulation types
//!
//! Everything the engine mutates lives in [`GameState`]; no other component
//! holds references into it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::ActiveEffects;
use super::fire::EnemyGunnery;
use super::pool::{EntityPool, Poolable};
use super::score::Combo;
use super::wave::Formation;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended (terminal)
    GameOver,
}

/// Discrete per-frame player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Fire,
    TogglePause,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    OutOfLives,
    /// The formation dropped past the breach line
    FormationBreach,
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// A bullet entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub faction: Faction,
    pub active: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, faction: Faction) -> Self {
        Self {
            pos,
            faction,
            active: true,
        }
    }

    /// Vertical speed (units/s, +y is down)
    pub fn velocity_y(&self) -> f32 {
        match self.faction {
            Faction::Player => -PLAYER_BULLET_SPEED,
            Faction::Enemy => ENEMY_BULLET_SPEED,
        }
    }

    /// Move and deactivate once off the play area
    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.velocity_y() * dt;
        if self.pos.y < 0.0 || self.pos.y > PLAY_HEIGHT {
            self.active = false;
        }
    }
}

impl Poolable for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Weak,
    Normal,
    Tank,
}

impl EnemyKind {
    pub fn max_health(self) -> u8 {
        match self {
            EnemyKind::Weak | EnemyKind::Normal => 1,
            EnemyKind::Tank => 3,
        }
    }

    /// Score before wave and combo scaling
    pub fn base_points(self) -> u64 {
        match self {
            EnemyKind::Weak => 10,
            EnemyKind::Normal => 20,
            EnemyKind::Tank => 50,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub health: u8,
    pub active: bool,
}

impl Enemy {
    pub fn new(pos: Vec2, kind: EnemyKind) -> Self {
        Self {
            pos,
            kind,
            health: kind.max_health(),
            active: true,
        }
    }

    /// Apply one point of damage. Returns true if this hit killed it.
    pub fn take_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.active = false;
            true
        } else {
            false
        }
    }
}

impl Poolable for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    RapidFire,
    MultiShot,
    SlowMotion,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::MultiShot,
        PowerUpKind::SlowMotion,
    ];

    /// Uniform pick from a roll in [0, 1)
    pub fn from_roll(roll: f32) -> Self {
        let idx = (roll * Self::ALL.len() as f32) as usize;
        Self::ALL[idx.min(Self::ALL.len() - 1)]
    }
}

/// A falling power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub active: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            active: true,
        }
    }

    pub fn fall(&mut self, dt: f32) {
        self.pos.y += POWER_UP_FALL_SPEED * dt;
        if self.pos.y > PLAY_HEIGHT {
            self.active = false;
        }
    }
}

impl Poolable for PowerUp {
    fn is_active(&self) -> bool {
        self.active
    }
    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
        }
    }
}

impl Player {
    /// Shift horizontally, clamped to the play lane
    pub fn move_by(&mut self, dx: f32) {
        self.pos.x = (self.pos.x + dx).clamp(PLAYER_MIN_X, PLAYER_MAX_X);
    }
}

/// Things that happened during a tick (for logging/audio hooks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyDamaged { kind: EnemyKind, health: u8 },
    EnemyKilled { kind: EnemyKind, points: u64, streak: u32 },
    PowerUpDropped { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    ShieldAbsorbed,
    PlayerHit { lives: u8 },
    WaveCleared { next_wave: u32 },
    GameOver { cause: GameOverCause, score: u64, wave: u32 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub player_bullets: EntityPool<Bullet>,
    pub enemy_bullets: EntityPool<Bullet>,
    pub enemies: EntityPool<Enemy>,
    pub power_ups: EntityPool<PowerUp>,
    pub effects: ActiveEffects,
    pub combo: Combo,
    /// Wave number, formation direction and move cadence
    pub formation: Formation,
    pub gunnery: EnemyGunnery,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// Simulated seconds (advances only while running)
    pub elapsed: f32,
    /// `elapsed` at the last accepted player shot
    pub last_fire: Option<f32>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh run at wave 1 with empty pools
    pub fn new() -> Self {
        Self {
            player: Player::default(),
            player_bullets: EntityPool::new(),
            enemy_bullets: EntityPool::new(),
            enemies: EntityPool::new(),
            power_ups: EntityPool::new(),
            effects: ActiveEffects::default(),
            combo: Combo::default(),
            formation: Formation::default(),
            gunnery: EnemyGunnery::default(),
            score: 0,
            lives: STARTING_LIVES,
            phase: GamePhase::Running,
            elapsed: 0.0,
            last_fire: None,
        }
    }

    pub fn wave(&self) -> u32 {
        self.formation.wave
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Drop all dead records (once per tick, after collisions)
    pub fn compact_pools(&mut self) {
        self.player_bullets.compact();
        self.enemy_bullets.compact();
        self.enemies.compact();
        self.power_ups.compact();
    }
}
