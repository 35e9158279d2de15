//! Simulation engine
//!
//! Owns the game state, the random source and the leaderboard. One
//! `update(dt)` per fixed tick advances, in order: effect timers, motion,
//! formation, enemy fire, collisions, scoring, wave clear, compaction and
//! the game-over check.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision;
use super::fire;
use super::snapshot::Snapshot;
use super::state::{
    GameEvent, GameOverCause, GamePhase, GameState, Intent, PowerUp, PowerUpKind,
};
use super::wave;
use crate::consts::*;
use crate::highscores::HighScores;

/// The simulation, generic over its random source
pub struct Simulation<R = Pcg32> {
    state: GameState,
    rng: R,
    highscores: HighScores,
    /// Events since the last drain
    events: Vec<GameEvent>,
}

impl Simulation<Pcg32> {
    /// Start a run from a seed
    pub fn new(seed: u64, highscores: HighScores) -> Self {
        log::info!("New run with seed {seed}");
        Self::with_rng(Pcg32::seed_from_u64(seed), highscores)
    }
}

impl<R: Rng> Simulation<R> {
    /// Start a run with an injected random source
    pub fn with_rng(mut rng: R, highscores: HighScores) -> Self {
        let mut state = GameState::new();
        wave::spawn_wave(
            state.wave(),
            &mut state.enemies,
            &mut state.power_ups,
            &mut rng,
        );

        Self {
            state,
            rng,
            highscores,
            events: Vec::new(),
        }
    }

    /// Apply one player intent. Pause toggling works while paused; nothing
    /// works after game over.
    pub fn handle_intent(&mut self, intent: Intent) {
        match self.state.phase {
            GamePhase::GameOver => {}
            GamePhase::Paused => {
                if intent == Intent::TogglePause {
                    self.state.phase = GamePhase::Running;
                    log::debug!("Resumed");
                }
            }
            GamePhase::Running => match intent {
                Intent::MoveLeft => self.state.player.move_by(-PLAYER_STEP),
                Intent::MoveRight => self.state.player.move_by(PLAYER_STEP),
                Intent::Fire => self.fire(),
                Intent::TogglePause => {
                    self.state.phase = GamePhase::Paused;
                    log::debug!("Paused");
                }
            },
        }
    }

    fn fire(&mut self) {
        let state = &mut self.state;
        let cooldown = state.effects.fire_cooldown();
        if !fire::can_fire(state.last_fire, state.elapsed, cooldown) {
            return;
        }
        state.last_fire = Some(state.elapsed);

        let offsets = state.effects.shot_offsets();
        for bullet in fire::player_volley(&state.player, offsets) {
            state.player_bullets.spawn(bullet);
        }
    }

    /// Advance one tick. No-op while paused or after game over.
    pub fn update(&mut self, dt: f32) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        let dt = dt.max(0.0);

        let state = &mut self.state;
        state.elapsed += dt;
        state.effects.tick(dt);

        for bullet in state.player_bullets.iter_active_mut() {
            bullet.advance(dt);
        }
        for bullet in state.enemy_bullets.iter_active_mut() {
            bullet.advance(dt);
        }
        for power_up in state.power_ups.iter_active_mut() {
            power_up.fall(dt);
        }

        let step = state.formation.step(dt, &mut state.enemies);
        if step.edge_hit {
            log::debug!("Formation hit edge, direction now {}", state.formation.direction);
        }
        if step.breached {
            self.end_run(GameOverCause::FormationBreach);
            return;
        }

        let wave = state.wave();
        let interval_scale = state.effects.enemy_interval_scale();
        state.gunnery.step(
            dt,
            wave,
            interval_scale,
            &state.enemies,
            &mut state.enemy_bullets,
            &mut self.rng,
        );

        self.resolve_collisions();
        self.advance_wave_if_cleared();
        self.state.compact_pools();

        if self.state.lives == 0 {
            self.end_run(GameOverCause::OutOfLives);
        }
    }

    fn resolve_collisions(&mut self) {
        let state = &mut self.state;
        let wave = state.wave();

        for hit in collision::resolve_player_bullets(&mut state.player_bullets, &mut state.enemies) {
            if !hit.killed {
                self.events.push(GameEvent::EnemyDamaged {
                    kind: hit.kind,
                    health: hit.health,
                });
                continue;
            }

            let points = state.combo.record_kill(hit.kind, wave);
            state.score = state.score.saturating_add(points);
            self.events.push(GameEvent::EnemyKilled {
                kind: hit.kind,
                points,
                streak: state.combo.streak,
            });

            if self.rng.random::<f32>() < POWER_UP_DROP_CHANCE {
                let kind = PowerUpKind::from_roll(self.rng.random::<f32>());
                state.power_ups.spawn(PowerUp::new(hit.pos, kind));
                self.events.push(GameEvent::PowerUpDropped { kind });
            }
        }

        let strikes = collision::resolve_enemy_bullets(&mut state.enemy_bullets, &state.player);
        for _ in 0..strikes {
            if state.effects.consume_shield() {
                log::debug!("Shield absorbed a hit");
                self.events.push(GameEvent::ShieldAbsorbed);
            } else {
                state.lives = state.lives.saturating_sub(1);
                state.combo.reset();
                log::debug!("Player hit, {} lives left", state.lives);
                self.events.push(GameEvent::PlayerHit { lives: state.lives });
            }
        }

        for kind in collision::resolve_pickups(&mut state.power_ups, &state.player) {
            log::debug!("Picked up {kind:?}");
            state.effects.apply(kind);
            state.score = state.score.saturating_add(state.combo.record_pickup());
            self.events.push(GameEvent::PowerUpCollected { kind });
        }
    }

    fn advance_wave_if_cleared(&mut self) {
        if self.state.enemies.any_active() {
            return;
        }
        self.state.formation.wave += 1;
        let next_wave = self.state.formation.wave;
        wave::spawn_wave(
            next_wave,
            &mut self.state.enemies,
            &mut self.state.power_ups,
            &mut self.rng,
        );
        self.events.push(GameEvent::WaveCleared { next_wave });
    }

    fn end_run(&mut self, cause: GameOverCause) {
        if self.state.phase == GamePhase::GameOver {
            return;
        }
        self.state.phase = GamePhase::GameOver;

        let score = self.state.score;
        let wave = self.state.wave();
        log::info!("Game over ({cause:?}): score {score}, wave {wave}");

        if let Some(slot) = self.highscores.insert(score, wave) {
            log::info!("New high score, rank {}", slot + 1);
        }
        self.events.push(GameEvent::GameOver { cause, score, wave });
    }

    /// Copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn highscores(&self) -> &HighScores {
        &self.highscores
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn wave(&self) -> u32 {
        self.state.wave()
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }
}
