//! Wave composition and formation movement
//!
//! Each wave is a fixed grid whose size and enemy mix scale with the wave
//! number. The whole formation steps sideways in lockstep, drops a row when
//! it touches either edge, and ends the run if it drops past the breach line.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pool::EntityPool;
use super::state::{Enemy, EnemyKind, PowerUp};
use crate::consts::*;

/// Enemy mix for a wave band (percent weights)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindWeights {
    pub weak: f32,
    pub normal: f32,
    pub tank: f32,
}

impl KindWeights {
    pub fn for_wave(wave: u32) -> Self {
        match wave {
            0..=2 => Self { weak: 30.0, normal: 70.0, tank: 0.0 },
            3..=6 => Self { weak: 30.0, normal: 50.0, tank: 20.0 },
            _ => Self { weak: 20.0, normal: 40.0, tank: 40.0 },
        }
    }

    /// Pick a kind from a roll in [0, 100)
    pub fn pick(&self, roll: f32) -> EnemyKind {
        if roll < self.weak {
            EnemyKind::Weak
        } else if roll < self.weak + self.normal || self.tank <= 0.0 {
            EnemyKind::Normal
        } else {
            EnemyKind::Tank
        }
    }
}

/// Rows in a wave's grid
pub fn rows_for_wave(wave: u32) -> u32 {
    2 + wave / 2
}

/// Seconds between formation steps
pub fn move_interval(wave: u32) -> f32 {
    (1.0 - wave as f32 * 0.1).max(0.3)
}

/// Counts of each kind in a freshly spawned wave
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveRoster {
    pub weak: u32,
    pub normal: u32,
    pub tank: u32,
}

impl WaveRoster {
    pub fn total(&self) -> u32 {
        self.weak + self.normal + self.tank
    }
}

/// Clear enemies and power-ups and lay out the grid for `wave`
pub fn spawn_wave<R: Rng>(
    wave: u32,
    enemies: &mut EntityPool<Enemy>,
    power_ups: &mut EntityPool<PowerUp>,
    rng: &mut R,
) -> WaveRoster {
    enemies.clear();
    power_ups.clear();

    let weights = KindWeights::for_wave(wave);
    let rows = rows_for_wave(wave);
    let mut roster = WaveRoster::default();

    for row in 0..rows {
        for col in 0..FORMATION_COLUMNS {
            let pos = Vec2::new(
                FORMATION_ORIGIN_X + col as f32 * FORMATION_SPACING_X,
                FORMATION_ORIGIN_Y + row as f32 * FORMATION_SPACING_Y,
            );
            let kind = weights.pick(rng.random::<f32>() * 100.0);
            match kind {
                EnemyKind::Weak => roster.weak += 1,
                EnemyKind::Normal => roster.normal += 1,
                EnemyKind::Tank => roster.tank += 1,
            }
            enemies.spawn(Enemy::new(pos, kind));
        }
    }

    log::info!(
        "Wave {}: {} rows, {} weak / {} normal / {} tank",
        wave,
        rows,
        roster.weak,
        roster.normal,
        roster.tank
    );

    roster
}

/// Outcome of one formation update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormationStep {
    /// The formation stepped sideways this tick
    pub moved: bool,
    /// An enemy touched an edge; direction flipped and the formation dropped
    pub edge_hit: bool,
    /// An enemy dropped past the breach line
    pub breached: bool,
}

/// Wave counter plus shared formation movement state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    /// Current wave (starts at 1)
    pub wave: u32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    /// Seconds accumulated toward the next step
    pub move_timer: f32,
}

impl Default for Formation {
    fn default() -> Self {
        Self {
            wave: 1,
            direction: 1.0,
            move_timer: 0.0,
        }
    }
}

impl Formation {
    /// Advance the step timer and move the formation when it fires
    pub fn step(&mut self, dt: f32, enemies: &mut EntityPool<Enemy>) -> FormationStep {
        let mut result = FormationStep::default();

        self.move_timer += dt;
        if self.move_timer <= move_interval(self.wave) {
            return result;
        }
        self.move_timer = 0.0;
        result.moved = true;

        for enemy in enemies.iter_active_mut() {
            enemy.pos.x += FORMATION_STEP_X * self.direction;
            if enemy.pos.x < FORMATION_MIN_X || enemy.pos.x > FORMATION_MAX_X {
                result.edge_hit = true;
            }
        }

        if result.edge_hit {
            self.direction = -self.direction;
            for enemy in enemies.iter_active_mut() {
                enemy.pos.y += FORMATION_DROP_Y;
                if enemy.pos.y > FORMATION_BREACH_Y {
                    result.breached = true;
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::new(Vec2::new(x, y), EnemyKind::Normal)
    }

    #[test]
    fn test_grid_layout_for_wave_one() {
        let mut enemies = EntityPool::new();
        let mut power_ups = EntityPool::new();
        let mut rng = Pcg32::seed_from_u64(1);

        let roster = spawn_wave(1, &mut enemies, &mut power_ups, &mut rng);
        assert_eq!(roster.total(), 12);
        assert_eq!(roster.tank, 0);
        assert_eq!(enemies.len(), 12);

        let first = &enemies.as_slice()[0];
        assert_eq!(first.pos, Vec2::new(50.0, 30.0));
        let last = &enemies.as_slice()[11];
        assert_eq!(last.pos, Vec2::new(50.0 + 5.0 * 90.0, 80.0));
    }

    #[test]
    fn test_rows_scale_with_wave() {
        assert_eq!(rows_for_wave(1), 2);
        assert_eq!(rows_for_wave(3), 3);
        assert_eq!(rows_for_wave(4), 4);
        assert_eq!(rows_for_wave(9), 6);
    }

    #[test]
    fn test_spawn_clears_previous_wave_and_power_ups() {
        use crate::sim::state::PowerUpKind;

        let mut enemies = EntityPool::new();
        let mut power_ups = EntityPool::new();
        enemies.spawn(enemy_at(300.0, 300.0));
        power_ups.spawn(PowerUp::new(Vec2::new(1.0, 1.0), PowerUpKind::Shield));
        let mut rng = Pcg32::seed_from_u64(2);

        spawn_wave(4, &mut enemies, &mut power_ups, &mut rng);
        assert_eq!(enemies.len(), 24);
        assert!(power_ups.is_empty());
        assert!(enemies.iter_active().all(|e| e.pos.y < 300.0));
    }

    #[test]
    fn test_weight_bands() {
        let early = KindWeights::for_wave(2);
        assert_eq!(early.pick(0.0), EnemyKind::Weak);
        assert_eq!(early.pick(29.9), EnemyKind::Weak);
        assert_eq!(early.pick(30.0), EnemyKind::Normal);
        assert_eq!(early.pick(99.99), EnemyKind::Normal);

        let mid = KindWeights::for_wave(3);
        assert_eq!(mid.pick(79.9), EnemyKind::Normal);
        assert_eq!(mid.pick(80.0), EnemyKind::Tank);
        assert_eq!(KindWeights::for_wave(6), mid);

        let late = KindWeights::for_wave(7);
        assert_eq!(late.pick(19.9), EnemyKind::Weak);
        assert_eq!(late.pick(59.9), EnemyKind::Normal);
        assert_eq!(late.pick(60.0), EnemyKind::Tank);
    }

    #[test]
    fn test_late_waves_roll_tanks() {
        let mut enemies = EntityPool::new();
        let mut power_ups = EntityPool::new();
        let mut rng = Pcg32::seed_from_u64(7);
        let roster = spawn_wave(10, &mut enemies, &mut power_ups, &mut rng);
        assert_eq!(roster.total(), 7 * 6);
        assert!(roster.tank > 0);
        assert!(
            enemies
                .iter_active()
                .all(|e| e.health == e.kind.max_health())
        );
    }

    #[test]
    fn test_move_interval_floor() {
        assert!((move_interval(1) - 0.9).abs() < 1e-6);
        assert!((move_interval(5) - 0.5).abs() < 1e-6);
        assert_eq!(move_interval(7), 0.3);
        assert_eq!(move_interval(20), 0.3);
    }

    #[test]
    fn test_formation_waits_for_interval() {
        let mut formation = Formation::default();
        let mut enemies = EntityPool::new();
        enemies.spawn(enemy_at(100.0, 100.0));

        assert!(!formation.step(0.5, &mut enemies).moved);
        assert_eq!(enemies.as_slice()[0].pos.x, 100.0);

        let step = formation.step(0.5, &mut enemies);
        assert!(step.moved);
        assert_eq!(enemies.as_slice()[0].pos.x, 115.0);
        assert_eq!(formation.move_timer, 0.0);
    }

    #[test]
    fn test_edge_flips_direction_and_drops_formation() {
        let mut formation = Formation::default();
        let mut enemies = EntityPool::new();
        enemies.spawn(enemy_at(590.0, 100.0));
        enemies.spawn(enemy_at(140.0, 50.0));

        let step = formation.step(1.0, &mut enemies);
        assert!(step.edge_hit);
        assert!(!step.breached);
        assert_eq!(formation.direction, -1.0);

        let positions: Vec<Vec2> = enemies.iter_active().map(|e| e.pos).collect();
        assert_eq!(positions, vec![Vec2::new(605.0, 120.0), Vec2::new(155.0, 70.0)]);
    }

    #[test]
    fn test_inactive_enemies_do_not_move() {
        let mut formation = Formation::default();
        let mut enemies = EntityPool::new();
        enemies.spawn(enemy_at(590.0, 100.0));
        enemies.as_mut_slice()[0].active = false;

        let step = formation.step(1.0, &mut enemies);
        assert!(!step.edge_hit);
        assert_eq!(enemies.as_slice()[0].pos.x, 590.0);
    }

    #[test]
    fn test_drop_past_breach_line() {
        let mut formation = Formation {
            direction: -1.0,
            ..Default::default()
        };
        let mut enemies = EntityPool::new();
        enemies.spawn(enemy_at(30.0, 390.0));

        let step = formation.step(1.0, &mut enemies);
        assert!(step.edge_hit);
        assert!(step.breached);
        assert_eq!(formation.direction, 1.0);
    }
}
