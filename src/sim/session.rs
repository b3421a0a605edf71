//! Session state and the fixed tick
//!
//! One call to [`Session::tick`] advances the whole game by one step:
//!
//! 1. gravity on the avatar
//! 2. every obstacle scrolls, then is tested against the avatar; the first
//!    hit in collection order ends the game and the rest of the tick is skipped
//! 3. obstacles that have reached the avatar's x score once each
//! 4. falling below the canvas ends the game
//! 5. reaching a multiple of `SPAWN_EVERY` points adds an obstacle

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::avatar::Avatar;
use super::obstacle::Obstacle;
use crate::consts::*;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Hit the obstacle at this index
    Collision { obstacle: usize },
    /// Dropped below the bottom of the canvas
    Fell,
}

/// Final numbers of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
    pub high_score: u32,
    pub cause: GameOverCause,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session not started; nothing moved
    Idle,
    Running,
    GameOver(GameOver),
}

/// Avatar, obstacles and score of the current (or last) game
#[derive(Debug, Clone)]
pub struct Session {
    seed: u64,
    rng: Pcg32,
    avatar: Avatar,
    /// Never shrinks during a game; obstacles recycle in place
    obstacles: Vec<Obstacle>,
    score: u32,
    /// Best score seen by this process or loaded from disk
    high_score: u32,
    started: bool,
    /// Ticks since the last start
    ticks: u64,
}

impl Session {
    /// Create an idle session; gap heights come from `seed`
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            avatar: Avatar::new(),
            obstacles: Vec::new(),
            score: 0,
            high_score: 0,
            started: false,
            ticks: 0,
        }
    }

    /// Begin a new game. `stored_high_score` is the persisted best; the
    /// in-memory high score never goes down.
    pub fn start(&mut self, stored_high_score: u32) {
        self.avatar.reset();
        self.obstacles.clear();
        self.obstacles
            .push(Obstacle::new(CANVAS_WIDTH + OBSTACLE_WIDTH, &mut self.rng));
        self.score = 0;
        self.high_score = self.high_score.max(stored_high_score);
        self.started = true;
        self.ticks = 0;
    }

    /// Jump input; ignored unless a game is running
    pub fn jump(&mut self) {
        if self.started {
            self.avatar.jump();
        }
    }

    /// Advance the game by one fixed step
    pub fn tick(&mut self) -> TickOutcome {
        if !self.started {
            return TickOutcome::Idle;
        }
        self.ticks += 1;

        self.avatar.advance();

        let mut hit = None;
        for (index, obstacle) in self.obstacles.iter_mut().enumerate() {
            obstacle.advance(OBSTACLE_SPEED, &mut self.rng);
            if self.avatar.overlaps(obstacle) {
                hit = Some(index);
                break;
            }
        }
        if let Some(obstacle) = hit {
            return TickOutcome::GameOver(self.finish(GameOverCause::Collision { obstacle }));
        }

        let avatar_x = self.avatar.x();
        let mut spawn = false;
        for obstacle in &mut self.obstacles {
            if !obstacle.is_scored() && obstacle.x() <= avatar_x {
                obstacle.mark_scored();
                self.score += 1;
                self.high_score = self.high_score.max(self.score);
                if self.score % SPAWN_EVERY == 0 {
                    spawn = true;
                }
            }
        }

        if self.avatar.y() >= CANVAS_HEIGHT {
            return TickOutcome::GameOver(self.finish(GameOverCause::Fell));
        }

        if spawn {
            self.obstacles
                .push(Obstacle::new(CANVAS_WIDTH, &mut self.rng));
            log::debug!(
                "score {} reached, now {} obstacles",
                self.score,
                self.obstacles.len()
            );
        }

        TickOutcome::Running
    }

    fn finish(&mut self, cause: GameOverCause) -> GameOver {
        self.started = false;
        GameOver {
            score: self.score,
            high_score: self.high_score,
            cause,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
