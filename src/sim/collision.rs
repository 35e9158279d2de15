//! Collision detection and response
//!
//! Everything is an axis-aligned box. Tests run once per tick after all
//! motion has been integrated; there is no sub-stepping.

use glam::Vec2;

use super::pool::{EntityPool, Poolable};
use super::state::{Bullet, Enemy, EnemyKind, Player, PowerUp, PowerUpKind};
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }
}

pub fn bullet_box(pos: Vec2) -> Aabb {
    Aabb::from_center(pos, Vec2::new(BULLET_HALF_WIDTH, BULLET_HALF_HEIGHT))
}

pub fn enemy_box(pos: Vec2) -> Aabb {
    Aabb::from_center(pos, Vec2::splat(ENEMY_HALF_EXTENT))
}

pub fn player_box(pos: Vec2) -> Aabb {
    Aabb::from_center(pos, Vec2::splat(PLAYER_HALF_EXTENT))
}

/// Area around the player in which a power-up counts as collected
pub fn pickup_zone(pos: Vec2) -> Aabb {
    Aabb {
        min: Vec2::new(pos.x - PLAYER_HALF_EXTENT, pos.y - PICKUP_EXTENT_ABOVE),
        max: Vec2::new(pos.x + PLAYER_HALF_EXTENT, pos.y + PICKUP_EXTENT_BELOW),
    }
}

/// One bullet striking one enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyHit {
    pub kind: EnemyKind,
    pub pos: Vec2,
    /// Health left after the hit
    pub health: u8,
    pub killed: bool,
}

/// Player bullets against the formation.
///
/// A bullet is tested against every active enemy even after its first
/// contact, so one bullet can damage several overlapping enemies in the
/// same tick. Enemies killed earlier in the pass are skipped.
pub fn resolve_player_bullets(
    bullets: &mut EntityPool<Bullet>,
    enemies: &mut EntityPool<Enemy>,
) -> Vec<EnemyHit> {
    let mut hits = Vec::new();

    for bullet in bullets.iter_active_mut() {
        let shot = bullet_box(bullet.pos);
        for enemy in enemies.iter_active_mut() {
            if !shot.overlaps(&enemy_box(enemy.pos)) {
                continue;
            }
            bullet.deactivate();
            let killed = enemy.take_hit();
            hits.push(EnemyHit {
                kind: enemy.kind,
                pos: enemy.pos,
                health: enemy.health,
                killed,
            });
        }
    }

    hits
}

/// Enemy bullets against the player. Returns how many struck.
pub fn resolve_enemy_bullets(bullets: &mut EntityPool<Bullet>, player: &Player) -> u32 {
    let target = player_box(player.pos);
    let mut count = 0;

    for bullet in bullets.iter_active_mut() {
        if bullet_box(bullet.pos).overlaps(&target) {
            bullet.deactivate();
            count += 1;
        }
    }

    count
}

/// Power-ups touching the player, in pool order
pub fn resolve_pickups(power_ups: &mut EntityPool<PowerUp>, player: &Player) -> Vec<PowerUpKind> {
    let zone = pickup_zone(player.pos);
    let mut collected = Vec::new();

    for power_up in power_ups.iter_active_mut() {
        if zone.contains(power_up.pos) {
            power_up.deactivate();
            collected.push(power_up.kind);
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Faction;

    fn player_bullet(x: f32, y: f32) -> Bullet {
        Bullet::new(Vec2::new(x, y), Faction::Player)
    }

    fn enemy_bullet(x: f32, y: f32) -> Bullet {
        Bullet::new(Vec2::new(x, y), Faction::Enemy)
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(1.0));
        let touching = Aabb::from_center(Vec2::new(2.0, 0.0), Vec2::splat(1.0));
        let inside = Aabb::from_center(Vec2::new(1.5, 0.5), Vec2::splat(1.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_bullet_box_reach_against_enemy() {
        // Horizontal reach is 15 + 2, vertical 15 + 8
        let enemy = enemy_box(Vec2::new(100.0, 100.0));
        assert!(bullet_box(Vec2::new(116.9, 100.0)).overlaps(&enemy));
        assert!(!bullet_box(Vec2::new(117.0, 100.0)).overlaps(&enemy));
        assert!(bullet_box(Vec2::new(100.0, 122.9)).overlaps(&enemy));
        assert!(!bullet_box(Vec2::new(100.0, 123.0)).overlaps(&enemy));
    }

    #[test]
    fn test_normal_enemy_dies_on_first_hit() {
        let mut bullets = EntityPool::new();
        let mut enemies = EntityPool::new();
        bullets.spawn(player_bullet(100.0, 105.0));
        enemies.spawn(Enemy::new(Vec2::new(100.0, 100.0), EnemyKind::Normal));

        let hits = resolve_player_bullets(&mut bullets, &mut enemies);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].killed);
        assert!(!enemies.any_active());
        assert!(!bullets.any_active());
        // Dead records stay visible until compaction
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn test_one_bullet_hits_every_overlapping_enemy() {
        let mut bullets = EntityPool::new();
        let mut enemies = EntityPool::new();
        bullets.spawn(player_bullet(100.0, 100.0));
        enemies.spawn(Enemy::new(Vec2::new(90.0, 100.0), EnemyKind::Weak));
        enemies.spawn(Enemy::new(Vec2::new(110.0, 100.0), EnemyKind::Normal));
        enemies.spawn(Enemy::new(Vec2::new(300.0, 100.0), EnemyKind::Normal));

        let hits = resolve_player_bullets(&mut bullets, &mut enemies);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.killed));
        assert_eq!(enemies.active_count(), 1);
    }

    #[test]
    fn test_enemy_killed_earlier_in_pass_is_skipped() {
        let mut bullets = EntityPool::new();
        let mut enemies = EntityPool::new();
        bullets.spawn(player_bullet(100.0, 100.0));
        bullets.spawn(player_bullet(101.0, 100.0));
        enemies.spawn(Enemy::new(Vec2::new(100.0, 100.0), EnemyKind::Normal));

        let hits = resolve_player_bullets(&mut bullets, &mut enemies);
        assert_eq!(hits.len(), 1);
        // The second bullet flies on
        assert_eq!(bullets.active_count(), 1);
    }

    #[test]
    fn test_tank_takes_damage_without_dying() {
        let mut bullets = EntityPool::new();
        let mut enemies = EntityPool::new();
        bullets.spawn(player_bullet(100.0, 100.0));
        enemies.spawn(Enemy::new(Vec2::new(100.0, 100.0), EnemyKind::Tank));

        let hits = resolve_player_bullets(&mut bullets, &mut enemies);
        assert_eq!(hits, vec![EnemyHit {
            kind: EnemyKind::Tank,
            pos: Vec2::new(100.0, 100.0),
            health: 2,
            killed: false,
        }]);
        assert!(enemies.any_active());
    }

    #[test]
    fn test_enemy_bullets_hit_player() {
        let player = Player::default();
        let mut bullets = EntityPool::new();
        bullets.spawn(enemy_bullet(320.0, 400.0));
        bullets.spawn(enemy_bullet(335.0, 430.0));
        bullets.spawn(enemy_bullet(360.0, 420.0));

        assert_eq!(resolve_enemy_bullets(&mut bullets, &player), 2);
        assert_eq!(bullets.active_count(), 1);
    }

    #[test]
    fn test_pickup_zone_is_taller_above() {
        let player = Player::default();
        let mut power_ups = EntityPool::new();
        power_ups.spawn(PowerUp::new(Vec2::new(320.0, 396.0), PowerUpKind::Shield));
        power_ups.spawn(PowerUp::new(Vec2::new(320.0, 441.0), PowerUpKind::RapidFire));
        power_ups.spawn(PowerUp::new(Vec2::new(330.0, 439.0), PowerUpKind::MultiShot));

        let collected = resolve_pickups(&mut power_ups, &player);
        assert_eq!(collected, vec![PowerUpKind::Shield, PowerUpKind::MultiShot]);
        assert_eq!(power_ups.active_count(), 1);
    }
}
