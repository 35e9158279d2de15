//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O beyond
//! the leaderboard hand-off at game over:
//! - Fixed timestep, driven externally
//! - Injected RNG only (seedable for tests)
//! - Stable iteration order (pool spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod engine;
pub mod fire;
pub mod pool;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod wave;

pub use collision::{Aabb, EnemyHit};
pub use effects::ActiveEffects;
pub use engine::Simulation;
pub use pool::{EntityPool, Poolable};
pub use score::Combo;
pub use snapshot::{BulletView, EnemyView, PowerUpView, Snapshot};
pub use state::{
    Bullet, Enemy, EnemyKind, Faction, GameEvent, GameOverCause, GamePhase, GameState, Intent,
    Player, PowerUp, PowerUpKind,
};
pub use wave::{Formation, WaveRoster, spawn_wave};
