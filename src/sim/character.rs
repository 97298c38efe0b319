//! Character animation state machine
//!
//! The character is either running or jumping, each with a fixed number of
//! animation frames. Every `(action, frame)` pair owns a static set of
//! vulnerable lane offsets: the lanes (counted from the window front) where
//! the silhouette touches the ground in that frame.

use std::fmt;

use serde::Serialize;

/// An animation frame index bounded to `0..N`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Frame<const N: u8>(u8);

/// Frames of the running cycle
pub type RunFrame = Frame<5>;
/// Frames of the jump arc
pub type JumpFrame = Frame<10>;

impl<const N: u8> Frame<N> {
    /// Number of frames in this animation
    pub const COUNT: u8 = N;
    pub const FIRST: Self = Self(0);
    pub const LAST: Self = Self(N - 1);

    /// Build a frame, rejecting indices outside `0..N`
    pub fn new(index: u8) -> Option<Self> {
        (index < N).then_some(Self(index))
    }

    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Following frame, wrapping back to the first
    #[inline]
    pub fn next(self) -> Self {
        Self((self.0 + 1) % N)
    }
}

/// Current action and animation frame of the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CharacterState {
    Running(RunFrame),
    Jumping(JumpFrame),
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::Running(RunFrame::FIRST)
    }
}

impl CharacterState {
    /// `Running(frame)`, or None if `frame` is out of range
    pub fn running(frame: u8) -> Option<Self> {
        RunFrame::new(frame).map(Self::Running)
    }

    /// `Jumping(frame)`, or None if `frame` is out of range
    pub fn jumping(frame: u8) -> Option<Self> {
        JumpFrame::new(frame).map(Self::Jumping)
    }

    pub fn frame_index(self) -> u8 {
        match self {
            Self::Running(frame) => frame.index(),
            Self::Jumping(frame) => frame.index(),
        }
    }

    pub fn is_jumping(self) -> bool {
        matches!(self, Self::Jumping(_))
    }

    /// Lane offsets that collide with an obstacle in this frame
    pub fn vulnerable_offsets(self) -> &'static [usize] {
        vulnerable_offsets(self)
    }

    /// Advance one frame, consuming a pending jump where the animation allows it.
    ///
    /// A jump can only begin on the last running frame, or chain directly
    /// from the last jumping frame. Returns the successor and whether the
    /// request was consumed.
    pub fn advance(self, jump_requested: bool) -> (Self, bool) {
        match self {
            Self::Running(frame) if frame.is_last() && jump_requested => {
                (Self::Jumping(JumpFrame::FIRST), true)
            }
            Self::Jumping(frame) if frame.is_last() => {
                if jump_requested {
                    (Self::Jumping(JumpFrame::FIRST), true)
                } else {
                    (Self::Running(RunFrame::FIRST), false)
                }
            }
            Self::Running(frame) => (Self::Running(frame.next()), false),
            Self::Jumping(frame) => (Self::Jumping(frame.next()), false),
        }
    }
}

/// Sprite key, e.g. `running_3` or `jumping_0`
impl fmt::Display for CharacterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running(frame) => write!(f, "running_{}", frame.index()),
            Self::Jumping(frame) => write!(f, "jumping_{}", frame.index()),
        }
    }
}

const RUNNING_HAZARDS: [&[usize]; RunFrame::COUNT as usize] =
    [&[5, 6, 7], &[5, 6], &[5, 6], &[5], &[5, 7]];

const JUMPING_HAZARDS: [&[usize]; JumpFrame::COUNT as usize] = [
    &[5, 6, 7],
    &[5, 6],
    &[5, 6],
    &[5, 6],
    &[5, 6],
    &[5],
    &[],
    &[],
    &[],
    &[7],
];

/// Hazard table lookup for a character state
pub fn vulnerable_offsets(state: CharacterState) -> &'static [usize] {
    match state {
        CharacterState::Running(frame) => RUNNING_HAZARDS[frame.index() as usize],
        CharacterState::Jumping(frame) => JUMPING_HAZARDS[frame.index() as usize],
    }
}
