//! Invader Sim - fixed-step simulation of a wave-based arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation engine (entity pools, collisions, waves, power-ups, scoring)
//! - `highscores`: Top-10 leaderboard with plain-text persistence
//! - `persistence`: File I/O helpers shared by the leaderboard and settings
//! - `settings`: Run configuration for the frame driver
//! - `autopilot`: Scripted input source for headless runs

pub mod autopilot;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreEntry, HighScores};
pub use settings::Settings;
pub use sim::{Intent, Simulation, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Target simulation rate of the frame driver
    pub const DEFAULT_TICK_RATE: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions (origin top-left, y grows downward)
    pub const PLAY_WIDTH: f32 = 640.0;
    pub const PLAY_HEIGHT: f32 = 480.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 320.0;
    pub const PLAYER_START_Y: f32 = 420.0;
    pub const PLAYER_HALF_EXTENT: f32 = 20.0;
    /// Horizontal displacement per move intent
    pub const PLAYER_STEP: f32 = 7.0;
    pub const PLAYER_MIN_X: f32 = 20.0;
    pub const PLAYER_MAX_X: f32 = 620.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Seconds between player shots
    pub const FIRE_COOLDOWN: f32 = 0.2;
    pub const RAPID_FIRE_COOLDOWN: f32 = 0.1;
    /// Horizontal offsets of a multi-shot volley
    pub const MULTI_SHOT_OFFSETS: [f32; 3] = [0.0, -15.0, 15.0];

    /// Bullets (units per second)
    pub const PLAYER_BULLET_SPEED: f32 = 300.0;
    pub const ENEMY_BULLET_SPEED: f32 = 150.0;
    pub const BULLET_HALF_WIDTH: f32 = 2.0;
    pub const BULLET_HALF_HEIGHT: f32 = 8.0;
    /// Vertical offset between a shooter and its new bullet
    pub const MUZZLE_OFFSET: f32 = 20.0;

    /// Enemies
    pub const ENEMY_HALF_EXTENT: f32 = 15.0;
    pub const FORMATION_ORIGIN_X: f32 = 50.0;
    pub const FORMATION_ORIGIN_Y: f32 = 30.0;
    pub const FORMATION_SPACING_X: f32 = 90.0;
    pub const FORMATION_SPACING_Y: f32 = 50.0;
    pub const FORMATION_COLUMNS: u32 = 6;
    pub const FORMATION_STEP_X: f32 = 15.0;
    pub const FORMATION_DROP_Y: f32 = 20.0;
    pub const FORMATION_MIN_X: f32 = 20.0;
    pub const FORMATION_MAX_X: f32 = 600.0;
    /// An enemy below this line ends the run
    pub const FORMATION_BREACH_Y: f32 = 400.0;

    /// Power-ups
    pub const POWER_UP_DROP_CHANCE: f32 = 0.10;
    pub const POWER_UP_FALL_SPEED: f32 = 120.0;
    /// Pickup box relative to the player (asymmetric vertically)
    pub const PICKUP_EXTENT_ABOVE: f32 = 25.0;
    pub const PICKUP_EXTENT_BELOW: f32 = 20.0;
    pub const PICKUP_BONUS: u64 = 100;

    /// Effect durations (seconds; shield is a single charge)
    pub const SHIELD_CHARGE: f32 = 1.0;
    pub const RAPID_FIRE_DURATION: f32 = 8.0;
    pub const MULTI_SHOT_DURATION: f32 = 10.0;
    pub const SLOW_MOTION_DURATION: f32 = 5.0;
}
