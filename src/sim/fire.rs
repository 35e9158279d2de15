//! Weapon fire: player volleys and enemy fire control

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pool::EntityPool;
use super::state::{Bullet, Enemy, EnemyKind, Faction, Player};
use crate::consts::MUZZLE_OFFSET;

/// Whether the player's gun has cooled down at simulated time `now`
pub fn can_fire(last_fire: Option<f32>, now: f32, cooldown: f32) -> bool {
    last_fire.is_none_or(|t| now - t >= cooldown)
}

/// Bullets for one accepted fire intent
pub fn player_volley<'a>(player: &Player, offsets: &'a [f32]) -> impl Iterator<Item = Bullet> + 'a {
    let muzzle = player.pos - Vec2::new(0.0, MUZZLE_OFFSET);
    offsets
        .iter()
        .map(move |&dx| Bullet::new(muzzle + Vec2::new(dx, 0.0), Faction::Player))
}

/// Seconds between enemy volleys; `scale` stretches it (slow motion)
pub fn enemy_shoot_interval(wave: u32, scale: f32) -> f32 {
    (0.5 / wave.max(1) as f32).max(0.1) * scale
}

/// Percent chance that one enemy fires in a volley
pub fn enemy_fire_chance(kind: EnemyKind, wave: u32) -> f32 {
    let base = 5.0 + wave as f32 * 2.0;
    match kind {
        EnemyKind::Tank => base * 2.0,
        EnemyKind::Normal => base,
        EnemyKind::Weak => base / 2.0,
    }
}

/// Shared cadence timer for enemy volleys
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyGunnery {
    pub timer: f32,
}

impl EnemyGunnery {
    /// Advance the timer; when it fires, roll every active enemy independently.
    /// Returns the number of bullets spawned.
    pub fn step<R: Rng>(
        &mut self,
        dt: f32,
        wave: u32,
        interval_scale: f32,
        enemies: &EntityPool<Enemy>,
        bullets: &mut EntityPool<Bullet>,
        rng: &mut R,
    ) -> usize {
        self.timer += dt;
        if self.timer <= enemy_shoot_interval(wave, interval_scale) {
            return 0;
        }
        self.timer = 0.0;

        let mut shots = 0;
        for enemy in enemies.iter_active() {
            if rng.random::<f32>() * 100.0 < enemy_fire_chance(enemy.kind, wave) {
                let muzzle = enemy.pos + Vec2::new(0.0, MUZZLE_OFFSET);
                bullets.spawn(Bullet::new(muzzle, Faction::Enemy));
                shots += 1;
            }
        }
        shots
    }
}
