//! Combo streak and score awards

use serde::{Deserialize, Serialize};

use super::state::EnemyKind;
use crate::consts::PICKUP_BONUS;

/// Kills since the player last took unabsorbed damage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub streak: u32,
}

/// Score multiplier for a streak length
pub fn multiplier_for(streak: u32) -> f32 {
    match streak {
        20.. => 2.0,
        10.. => 1.5,
        5.. => 1.25,
        _ => 1.0,
    }
}

/// Points for one kill (floor of base x wave x multiplier)
pub fn kill_points(kind: EnemyKind, wave: u32, multiplier: f32) -> u64 {
    (kind.base_points() as f64 * wave as f64 * multiplier as f64).floor() as u64
}

impl Combo {
    pub fn multiplier(&self) -> f32 {
        multiplier_for(self.streak)
    }

    /// Extend the streak and return the points earned by this kill
    pub fn record_kill(&mut self, kind: EnemyKind, wave: u32) -> u64 {
        self.streak = self.streak.saturating_add(1);
        kill_points(kind, wave, self.multiplier())
    }

    /// Flat pickup award (independent of combo)
    pub fn record_pickup(&self) -> u64 {
        PICKUP_BONUS
    }

    pub fn reset(&mut self) {
        self.streak = 0;
    }
}
