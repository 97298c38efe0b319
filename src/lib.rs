//! Lane Runner - A side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Simulation core (character animation, obstacle lanes, collisions, session)
//! - `platform`: Thread-safe session handle, fixed-rate ticker, renderer seam
//! - `persistence`: JSON file storage helpers
//! - `highscores`: Best-score store
//! - `settings`: Host configuration

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::{BestScoreStore, FileBestScore, MemoryBestScore};
pub use persistence::StorageError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of lanes visible to (and collidable with) the character
    pub const WINDOW_LEN: usize = 20;
    /// Fixed tick period in milliseconds
    pub const TICK_INTERVAL_MS: u64 = 100;

    /// Countdown before the first obstacle burst of a session
    pub const FIRST_BURST_COUNTDOWN: u32 = 17;
    /// Burst ceiling after a burst that injected nothing
    pub const CALM_LIMIT: u32 = 5;
    /// Burst ceiling after a burst that injected at least one obstacle
    pub const BURST_LIMIT: u32 = 10;
    /// Burst draws are uniform in [0, BURST_DRAW_RANGE)
    pub const BURST_DRAW_RANGE: u32 = 27;

    /// Auto-play jumps when an obstacle reaches this many lanes ahead
    pub const AUTO_JUMP_LOOKAHEAD: usize = 17;
}
