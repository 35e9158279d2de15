//! Read-only view of the simulation for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::effects::ActiveEffects;
use super::pool::EntityPool;
use super::state::{Bullet, EnemyKind, Faction, GameState, PowerUpKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub kind: EnemyKind,
    pub health: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub faction: Faction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

/// Everything a frame needs to draw, copied out of the game state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub player: Vec2,
    pub shield_active: bool,
    /// Remaining effect timers
    pub effects: ActiveEffects,
    pub enemies: Vec<EnemyView>,
    pub player_bullets: Vec<BulletView>,
    pub enemy_bullets: Vec<BulletView>,
    pub power_ups: Vec<PowerUpView>,
    pub paused: bool,
    pub game_over: bool,
    pub score: u64,
    pub wave: u32,
    pub lives: u8,
    pub combo: u32,
    pub multiplier: f32,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            player: state.player.pos,
            shield_active: state.effects.shield_active(),
            effects: state.effects,
            enemies: state
                .enemies
                .iter_active()
                .map(|e| EnemyView {
                    pos: e.pos,
                    kind: e.kind,
                    health: e.health,
                })
                .collect(),
            player_bullets: bullet_views(&state.player_bullets),
            enemy_bullets: bullet_views(&state.enemy_bullets),
            power_ups: state
                .power_ups
                .iter_active()
                .map(|p| PowerUpView {
                    pos: p.pos,
                    kind: p.kind,
                })
                .collect(),
            paused: state.is_paused(),
            game_over: state.is_game_over(),
            score: state.score,
            wave: state.wave(),
            lives: state.lives,
            combo: state.combo.streak,
            multiplier: state.combo.multiplier(),
        }
    }

    /// Active enemies still on the board
    pub fn enemies_remaining(&self) -> usize {
        self.enemies.len()
    }
}

fn bullet_views(pool: &EntityPool<Bullet>) -> Vec<BulletView> {
    pool.iter_active()
        .map(|b| BulletView {
            pos: b.pos,
            faction: b.faction,
        })
        .collect()
}
