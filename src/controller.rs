//! Top-level mode switch
//!
//! Owns the session, routes input by mode and turns elapsed wall time into
//! fixed simulation ticks. Game-over side effects (score file, audio, back
//! to the menu) happen here so the simulation stays pure.

use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::audio::Soundtrack;
use crate::consts::*;
use crate::scores::{ScoreFile, ScoreHistory};
use crate::sim::{GameOver, Session, TickOutcome};

/// What is on screen and where input goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Playing,
}

/// Host input, already reduced to press edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Space bar pressed
    Space,
    /// Pointer button pressed
    Click,
    /// Exit action or window close
    Exit,
}

impl Input {
    /// Map a terminal event to game input. Only key presses count, so a
    /// held key does not repeat when the terminal reports event kinds.
    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char(' ') => Some(Input::Space),
                KeyCode::Char('q') | KeyCode::Esc => Some(Input::Exit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Input::Exit)
                }
                _ => None,
            },
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                Some(Input::Click)
            }
            _ => None,
        }
    }
}

pub struct Controller {
    mode: Mode,
    session: Session,
    scores: ScoreFile,
    history: ScoreHistory,
    soundtrack: Box<dyn Soundtrack>,
    /// Wall time not yet turned into ticks
    accumulator: Duration,
    /// Result shown on the menu until the next game starts
    last_game: Option<GameOver>,
    /// Menu time left before Space or Click can start a game
    lockout: Duration,
    exit_requested: bool,
}

impl Controller {
    pub fn new(seed: u64, scores: ScoreFile, soundtrack: Box<dyn Soundtrack>) -> Self {
        let history = scores.load_or_default();
        Self {
            mode: Mode::Menu,
            session: Session::new(seed),
            scores,
            history,
            soundtrack,
            accumulator: Duration::ZERO,
            last_game: None,
            lockout: Duration::ZERO,
            exit_requested: false,
        }
    }

    pub fn handle(&mut self, input: Input) {
        match (self.mode, input) {
            (_, Input::Exit) => {
                log::info!("Exit requested");
                self.soundtrack.stop_music();
                self.exit_requested = true;
            }
            (Mode::Menu, Input::Space | Input::Click) if self.lockout.is_zero() => self.start(),
            (Mode::Menu, Input::Space | Input::Click) => {
                log::debug!("Start ignored, {:?} of lockout left", self.lockout);
            }
            (Mode::Playing, Input::Space) => self.session.jump(),
            (Mode::Playing, Input::Click) => {}
        }
    }

    fn start(&mut self) {
        self.history = self.scores.load_or_default();
        self.session.start(self.history.best());
        self.soundtrack.restart_music();
        self.mode = Mode::Playing;
        self.accumulator = Duration::ZERO;
        self.last_game = None;
        log::info!(
            "Game started (seed {}, high score {})",
            self.session.seed(),
            self.session.high_score()
        );
    }

    /// Feed elapsed time; runs one tick per whole `TICK`, at most
    /// `MAX_SUBSTEPS` per call. Returns the number of ticks run.
    ///
    /// In the menu the time only counts down the game-over lockout.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.mode != Mode::Playing {
            self.accumulator = Duration::ZERO;
            self.lockout = self.lockout.saturating_sub(dt);
            return 0;
        }

        self.accumulator += dt;
        let mut ticks = 0;
        while self.accumulator >= TICK && ticks < MAX_SUBSTEPS {
            self.accumulator -= TICK;
            ticks += 1;
            if let TickOutcome::GameOver(report) = self.session.tick() {
                self.game_over(report);
                return ticks;
            }
        }
        if self.accumulator >= TICK {
            log::debug!("Falling behind, dropping {:?}", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    fn game_over(&mut self, report: GameOver) {
        log::info!(
            "Game over: score {}, high score {} ({:?})",
            report.score,
            report.high_score,
            report.cause
        );
        self.soundtrack.game_over();

        if self.history.record(report.high_score) {
            if let Err(e) = self.scores.save(&self.history) {
                log::warn!("Error saving scores to {}: {}", self.scores.path().display(), e);
            }
        }

        self.last_game = Some(report);
        self.lockout = GAME_OVER_LOCKOUT;
        self.mode = Mode::Menu;
        self.accumulator = Duration::ZERO;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// High score history as shown on the menu
    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn last_game(&self) -> Option<&GameOver> {
        self.last_game.as_ref()
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}
