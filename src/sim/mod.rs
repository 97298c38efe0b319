//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed tick only, driven from outside
//! - Injected RNG only
//! - No rendering or platform dependencies

pub mod character;
pub mod collision;
pub mod lanes;
pub mod rng;
pub mod state;
pub mod tick;

pub use character::{CharacterState, Frame, JumpFrame, RunFrame, vulnerable_offsets};
pub use collision::judge;
pub use lanes::{LaneContent, ObstacleStream, ObstacleWindow, burst_size};
pub use rng::{LaneRng, ScriptedRng, SeededRng};
pub use state::{Session, SessionMessage, SessionState, Snapshot};
pub use tick::TickOutcome;
