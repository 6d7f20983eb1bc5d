//! Fixed timestep session tick
//!
//! `GameSession` owns the body, the obstacle field, the score tracker and the
//! RNG, and is the only thing that mutates them. The host calls `tick` once
//! per frame at the configured rate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::PhysicsBody;
use super::collision;
use super::obstacle::ObstacleField;
use super::score::ScoreTracker;
use super::state::{FailCause, GameEvent, GamePhase, Notifier, Snapshot};
use crate::config::{GameConfig, ScorePolicy};
use crate::error::ConfigError;

/// Logical input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump/flap (also starts a round from the start screen). Edge-triggered.
    pub activate: bool,
    /// Return to the start screen after a finished round
    pub restart: bool,
    /// Host-level exit; the session ignores it
    pub quit: bool,
}

/// One game session: a state machine over rounds of play
#[derive(Debug)]
pub struct GameSession<N: Notifier = ()> {
    config: GameConfig,
    phase: GamePhase,
    body: PhysicsBody,
    field: ObstacleField,
    score: ScoreTracker,
    /// Run seed for reproducibility
    seed: u64,
    rng: Pcg32,
    /// Ticks simulated in the current round
    round_ticks: u64,
    fail_cause: Option<FailCause>,
    notifier: N,
}

impl GameSession<()> {
    /// A session that emits events nowhere
    pub fn headless(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, seed, ())
    }
}

impl<N: Notifier> GameSession<N> {
    /// Validate the config and build a session on the start screen
    pub fn new(config: GameConfig, seed: u64, notifier: N) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            body: PhysicsBody::new(&config.physics),
            field: ObstacleField::new(&config),
            score: ScoreTracker::new(&config.scoring),
            phase: GamePhase::Idle,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            round_ticks: 0,
            fail_cause: None,
            notifier,
            config,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn body(&self) -> &PhysicsBody {
        &self.body
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn round_ticks(&self) -> u64 {
        self.round_ticks
    }

    pub fn fail_cause(&self) -> Option<FailCause> {
        self.fail_cause
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Advance the session by one fixed timestep
    pub fn tick(&mut self, input: &TickInput) -> GamePhase {
        match self.phase {
            GamePhase::Idle => {
                if input.activate {
                    self.start_round();
                }
            }
            GamePhase::Playing => self.step(input),
            GamePhase::Failed | GamePhase::Completed => {
                if input.restart {
                    log::info!("Back to start screen");
                    self.phase = GamePhase::Idle;
                    self.emit(GameEvent::Restarted);
                }
            }
        }
        self.phase
    }

    /// Reset body, field and score to their creation-time state and start playing.
    /// The RNG keeps running so consecutive rounds differ.
    fn start_round(&mut self) {
        self.body = PhysicsBody::new(&self.config.physics);
        self.field.reset();
        self.score.reset();
        self.round_ticks = 0;
        self.fail_cause = None;
        self.phase = GamePhase::Playing;
        log::info!("Round started (seed {})", self.seed);
        self.emit(GameEvent::Started);
    }

    /// One tick of active play. Collision is always checked before culling.
    fn step(&mut self, input: &TickInput) {
        self.round_ticks += 1;
        self.score.begin_tick();

        // Grounded bodies can only jump from the floor
        if input.activate && (!self.body.has_ground() || self.body.grounded()) {
            self.body.impulse();
            self.emit(GameEvent::Impulse);
        }

        self.body.apply_gravity();

        self.field.spawn_if_due(&mut self.rng);
        self.field.advance();

        let bounds = self.body.bounds();
        if let Some(index) = collision::first_hit(&bounds, self.field.obstacles()) {
            let id = self.field.obstacles()[index].id;
            self.fail(FailCause::Obstacle { id });
            return;
        }
        if collision::out_of_bounds(&bounds, self.config.screen.height) {
            self.fail(FailCause::OutOfBounds);
            return;
        }

        let culled = self.field.cull();
        match self.config.scoring.policy {
            ScorePolicy::PerObstacle => {
                for _ in &culled {
                    self.award_point();
                }
            }
            ScorePolicy::Survival { ticks_per_point } => {
                if self.round_ticks % u64::from(ticks_per_point.max(1)) == 0 {
                    self.award_point();
                }
            }
        }

        if self.score.leveled_up() {
            let level = self.score.current_level();
            let obstacles = &self.config.obstacles;
            let speed = obstacles.base_speed + obstacles.speed_per_level * (level - 1) as f32;
            self.field.set_scroll_speed(speed);
            log::info!("Level {} (scroll speed {})", level, speed);
            self.emit(GameEvent::LevelUp { level });
        }

        if self.score.reached_cap() {
            let level = self.score.current_level();
            let score = self.score.score();
            self.phase = GamePhase::Completed;
            log::info!("Level cap reached: level {} with score {}", level, score);
            self.emit(GameEvent::Completed { level, score });
        }
    }

    fn award_point(&mut self) {
        self.score.add_progress(1);
        let score = self.score.score();
        self.emit(GameEvent::Scored { score });
    }

    fn fail(&mut self, cause: FailCause) {
        let score = self.score.score();
        self.phase = GamePhase::Failed;
        self.fail_cause = Some(cause);
        log::info!("Round failed after {} ticks: {:?}, score {}", self.round_ticks, cause, score);
        self.emit(GameEvent::Failed { cause, score });
    }

    fn emit(&mut self, event: GameEvent) {
        self.notifier.notify(&event);
    }

    /// Read-only view of the current frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            world: Vec2::new(self.config.screen.width, self.config.screen.height),
            ground: self.config.physics.ground,
            body: self.body.bounds(),
            obstacles: self
                .field
                .obstacles()
                .iter()
                .flat_map(|obstacle| obstacle.blocking_rects())
                .collect(),
            score: self.score.score(),
            level: self.score.current_level(),
            level_cap: self.score.cap(),
            round_ticks: self.round_ticks,
            fail_cause: self.fail_cause,
        }
    }
}
