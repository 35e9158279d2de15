//! Power-up effect timers
//!
//! Four independent countdowns. Shield is a single charge that only a hit
//! consumes; the others decay with simulated time and floor at zero.

use serde::{Deserialize, Serialize};

use super::state::PowerUpKind;
use crate::consts::*;

/// Active power-up effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub shield: f32,
    pub rapid_fire: f32,
    pub multi_shot: f32,
    pub slow_motion: f32,
}

impl ActiveEffects {
    /// Start (or restart) the effect for a picked-up power-up
    pub fn apply(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Shield => self.shield = SHIELD_CHARGE,
            PowerUpKind::RapidFire => self.rapid_fire = RAPID_FIRE_DURATION,
            PowerUpKind::MultiShot => self.multi_shot = MULTI_SHOT_DURATION,
            PowerUpKind::SlowMotion => self.slow_motion = SLOW_MOTION_DURATION,
        }
    }

    /// Decay the timed effects
    pub fn tick(&mut self, dt: f32) {
        self.rapid_fire = (self.rapid_fire - dt).max(0.0);
        self.multi_shot = (self.multi_shot - dt).max(0.0);
        self.slow_motion = (self.slow_motion - dt).max(0.0);
    }

    /// Spend the shield charge if there is one
    pub fn consume_shield(&mut self) -> bool {
        if self.shield_active() {
            self.shield = 0.0;
            true
        } else {
            false
        }
    }

    pub fn shield_active(&self) -> bool {
        self.shield > 0.0
    }

    pub fn rapid_fire_active(&self) -> bool {
        self.rapid_fire > 0.0
    }

    pub fn multi_shot_active(&self) -> bool {
        self.multi_shot > 0.0
    }

    pub fn slow_motion_active(&self) -> bool {
        self.slow_motion > 0.0
    }

    /// Seconds between accepted player shots
    pub fn fire_cooldown(&self) -> f32 {
        if self.rapid_fire_active() {
            RAPID_FIRE_COOLDOWN
        } else {
            FIRE_COOLDOWN
        }
    }

    /// Horizontal offsets for one fire intent
    pub fn shot_offsets(&self) -> &'static [f32] {
        if self.multi_shot_active() {
            &MULTI_SHOT_OFFSETS
        } else {
            &MULTI_SHOT_OFFSETS[..1]
        }
    }

    /// Multiplier on the enemy shoot interval
    pub fn enemy_interval_scale(&self) -> f32 {
        if self.slow_motion_active() { 2.0 } else { 1.0 }
    }
}
