//! Session state and the renderable snapshot
//!
//! A `Session` is created once per process and reset (never recreated) on
//! every restart.

use serde::Serialize;

use super::character::CharacterState;
use super::lanes::{LaneContent, ObstacleStream};
use super::rng::LaneRng;
use crate::consts::*;
use crate::highscores::BestScoreStore;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SessionState {
    /// Waiting for the first start input
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended; persists until restarted
    Over,
}

/// Signal raised when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionMessage {
    /// Score matched or beat the stored best
    NewRecord,
    GameOver,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub character: CharacterState,
    pub lanes: [LaneContent; WINDOW_LEN],
    pub score: u32,
    pub best_score: u32,
    pub state: SessionState,
    pub message: Option<SessionMessage>,
}

/// One playthrough's state plus its collaborators
pub struct Session {
    pub(super) state: SessionState,
    pub(super) character: CharacterState,
    pub(super) stream: ObstacleStream,
    pub(super) score: u32,
    pub(super) best_score: u32,
    pub(super) jump_requested: bool,
    pub(super) auto_play: bool,
    pub(super) message: Option<SessionMessage>,
    pub(super) store: Box<dyn BestScoreStore + Send>,
    pub(super) rng: Box<dyn LaneRng + Send>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("character", &self.character)
            .field("stream", &self.stream)
            .field("score", &self.score)
            .field("best_score", &self.best_score)
            .field("jump_requested", &self.jump_requested)
            .field("auto_play", &self.auto_play)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session in `NotStarted`, reading the stored best score once
    pub fn new(
        mut store: Box<dyn BestScoreStore + Send>,
        mut rng: Box<dyn LaneRng + Send>,
    ) -> Self {
        let best_score = store.load().unwrap_or_else(|e| {
            log::warn!("Could not load best score, starting from 0: {e}");
            0
        });
        let stream = ObstacleStream::new(rng.as_mut());

        Self {
            state: SessionState::NotStarted,
            character: CharacterState::default(),
            stream,
            score: 0,
            best_score,
            jump_requested: false,
            auto_play: false,
            message: None,
            store,
            rng,
        }
    }

    /// Enable or disable self-play (builder style)
    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn character(&self) -> CharacterState {
        self.character
    }

    pub fn stream(&self) -> &ObstacleStream {
        &self.stream
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn jump_requested(&self) -> bool {
        self.jump_requested
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    /// Begin a run from `NotStarted` or `Over`; ignored while `Playing`
    pub fn start(&mut self) {
        if self.state == SessionState::Playing {
            return;
        }
        self.score = 0;
        self.character = CharacterState::default();
        self.jump_requested = false;
        self.message = None;
        self.stream.reset(self.rng.as_mut());
        self.state = SessionState::Playing;
        log::info!("Session started (best {})", self.best_score);
    }

    /// Latch a jump for the next frame that can take it.
    ///
    /// Ignored outside `Playing` and while auto-play drives the character.
    pub fn request_jump(&mut self) {
        if self.state == SessionState::Playing && !self.auto_play {
            self.jump_requested = true;
        }
    }

    /// Single-button input: start/restart when idle, jump while playing
    pub fn press(&mut self) {
        match self.state {
            SessionState::NotStarted | SessionState::Over => self.start(),
            SessionState::Playing => self.request_jump(),
        }
    }

    /// Would the current frame collide? Always false outside `Playing`.
    pub fn collides(&self) -> bool {
        self.state == SessionState::Playing
            && super::collision::judge(self.character, self.stream.window())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            character: self.character,
            lanes: self.stream.window().to_array(),
            score: self.score,
            best_score: self.best_score,
            state: self.state,
            message: self.message,
        }
    }
}
