//! Invader Sim entry point
//!
//! Headless frame driver: loads settings and the leaderboard, then runs the
//! simulation at a fixed tick with the autopilot supplying input.

use std::time::{Duration, Instant};

use invader_sim::consts::MAX_SUBSTEPS;
use invader_sim::sim::{GameEvent, Simulation};
use invader_sim::{HighScores, Settings, autopilot};

/// Drives one run of the simulation
struct Driver {
    sim: Simulation,
    dt: f32,
    ticks_per_second: u64,
    max_ticks: Option<u64>,
    ticks: u64,
}

impl Driver {
    fn new(settings: &Settings, sim: Simulation) -> Self {
        let dt = settings.tick_dt();
        Self {
            sim,
            dt,
            ticks_per_second: (1.0 / dt).round() as u64,
            max_ticks: settings.max_ticks,
            ticks: 0,
        }
    }

    fn done(&self) -> bool {
        self.sim.is_game_over() || self.max_ticks.is_some_and(|max| self.ticks >= max)
    }

    /// Deliver this tick's intents, advance, and report what happened
    fn tick(&mut self) {
        for intent in autopilot::intents(&self.sim.snapshot()) {
            self.sim.handle_intent(intent);
        }
        self.sim.update(self.dt);
        self.ticks += 1;

        for event in self.sim.drain_events() {
            log_event(&event);
        }

        if self.ticks % self.ticks_per_second.max(1) == 0 {
            let snap = self.sim.snapshot();
            log::debug!(
                "Wave: {} | Score: {} | Lives: {} | Enemies: {}",
                snap.wave,
                snap.score,
                snap.lives,
                snap.enemies_remaining()
            );
        }
    }

    /// Tick as fast as possible
    fn run_headless(&mut self) {
        while !self.done() {
            self.tick();
        }
    }

    /// Tick against the wall clock with a fixed-step accumulator
    fn run_realtime(&mut self) {
        let step = Duration::from_secs_f32(self.dt);
        let mut accumulator = Duration::ZERO;
        let mut last = Instant::now();

        while !self.done() {
            let now = Instant::now();
            // Clamp long stalls so we don't try to catch up forever
            accumulator += (now - last).min(Duration::from_millis(100));
            last = now;

            let mut substeps = 0;
            while accumulator >= step && substeps < MAX_SUBSTEPS && !self.done() {
                self.tick();
                accumulator -= step;
                substeps += 1;
            }

            std::thread::sleep(step.saturating_sub(accumulator));
        }
    }

    fn report(&self) {
        let snap = self.sim.snapshot();
        if snap.game_over {
            println!("\nGAME OVER! Final Score: {} (wave {})", snap.score, snap.wave);
        } else {
            log::info!("Stopped after {} ticks without a game over", self.ticks);
            println!("\nStopped. Score: {} (wave {})", snap.score, snap.wave);
        }

        println!("High scores:");
        for (rank, entry) in self
            .sim
            .highscores()
            .entries()
            .iter()
            .filter(|e| !e.is_empty())
            .enumerate()
        {
            println!("{:>2}. {:>8}  wave {}", rank + 1, entry.score, entry.wave);
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::WaveCleared { next_wave } => log::info!("Wave cleared, on to wave {next_wave}"),
        GameEvent::PlayerHit { lives } => log::info!("Player hit, {lives} lives left"),
        GameEvent::PowerUpCollected { kind } => log::info!("Collected {kind:?}"),
        other => log::trace!("{other:?}"),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Invader Sim starting...");

    let settings = Settings::load(&Settings::default_path());
    let highscores = HighScores::load(&settings.leaderboard_path);
    let seed = settings.seed.unwrap_or_else(rand::random);

    let mut driver = Driver::new(&settings, Simulation::new(seed, highscores));
    if settings.realtime {
        driver.run_realtime();
    } else {
        driver.run_headless();
    }
    driver.report();
}
