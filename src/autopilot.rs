//! Scripted input for headless runs
//!
//! Plays from the snapshot alone: grab nearby power-ups, dodge incoming
//! fire, otherwise line up under the lowest enemy. Always holds fire.

use crate::consts::PLAYER_STEP;
use crate::sim::{Intent, Snapshot};

/// Power-ups below this line are worth chasing
const CHASE_LINE_Y: f32 = 300.0;
/// How far above the player an enemy bullet counts as incoming
const DANGER_RANGE: f32 = 80.0;
/// Horizontal distance at which a bullet is a threat
const DANGER_WIDTH: f32 = 30.0;

/// Intents for this tick
pub fn intents(snap: &Snapshot) -> Vec<Intent> {
    let mut out = Vec::with_capacity(2);
    if snap.game_over || snap.paused {
        return out;
    }

    if let Some(step) = steer(snap) {
        out.push(step);
    }
    out.push(Intent::Fire);
    out
}

fn steer(snap: &Snapshot) -> Option<Intent> {
    let x = snap.player.x;

    let threat = snap
        .enemy_bullets
        .iter()
        .filter(|b| b.pos.y < snap.player.y && snap.player.y - b.pos.y < DANGER_RANGE)
        .filter(|b| (b.pos.x - x).abs() < DANGER_WIDTH)
        .min_by(|a, b| (snap.player.y - a.pos.y).total_cmp(&(snap.player.y - b.pos.y)));
    if let Some(bullet) = threat {
        // Step away from the bullet, toward open space
        return Some(if bullet.pos.x >= x && x > 60.0 {
            Intent::MoveLeft
        } else {
            Intent::MoveRight
        });
    }

    let target = snap
        .power_ups
        .iter()
        .filter(|p| p.pos.y > CHASE_LINE_Y)
        .min_by(|a, b| (a.pos.x - x).abs().total_cmp(&(b.pos.x - x).abs()))
        .map(|p| p.pos.x)
        .or_else(|| {
            snap.enemies
                .iter()
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|e| e.pos.x)
        })?;

    let dx = target - x;
    if dx.abs() < PLAYER_STEP / 2.0 {
        None
    } else if dx < 0.0 {
        Some(Intent::MoveLeft)
    } else {
        Some(Intent::MoveRight)
    }
}
