//! Lane contents, the sliding obstacle window, and the burst generator

use std::collections::VecDeque;

use serde::Serialize;

use super::rng::LaneRng;
use crate::consts::*;

/// What occupies one lane of the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LaneContent {
    #[default]
    Flat,
    Hill,
    Crater,
    /// The only hazardous (and scoring) lane
    Obstacle,
}

impl LaneContent {
    /// Background variants, drawn uniformly for filler lanes
    pub const COSMETIC: [LaneContent; 3] = [LaneContent::Flat, LaneContent::Hill, LaneContent::Crater];

    #[inline]
    pub fn is_obstacle(self) -> bool {
        self == LaneContent::Obstacle
    }

    /// Uniformly draw one cosmetic variant
    pub fn random_cosmetic(rng: &mut dyn LaneRng) -> Self {
        Self::COSMETIC[rng.next(0, Self::COSMETIC.len() as u32) as usize]
    }
}

/// Fixed-length queue of upcoming lanes; index 0 is nearest the character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleWindow {
    lanes: VecDeque<LaneContent>,
}

impl Default for ObstacleWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleWindow {
    pub fn new() -> Self {
        Self {
            lanes: VecDeque::with_capacity(WINDOW_LEN),
        }
    }

    /// Build a window from explicit lanes (for hosts replaying a layout)
    pub fn from_lanes(lanes: impl IntoIterator<Item = LaneContent>) -> Self {
        Self {
            lanes: lanes.into_iter().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.lanes.len() >= WINDOW_LEN
    }

    pub fn get(&self, offset: usize) -> Option<LaneContent> {
        self.lanes.get(offset).copied()
    }

    /// Overwrite the lane at `offset`; out-of-range offsets are ignored
    pub fn set(&mut self, offset: usize, lane: LaneContent) {
        if let Some(slot) = self.lanes.get_mut(offset) {
            *slot = lane;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = LaneContent> + '_ {
        self.lanes.iter().copied()
    }

    pub fn obstacle_count(&self) -> usize {
        self.iter().filter(|l| l.is_obstacle()).count()
    }

    fn pop_front(&mut self) -> Option<LaneContent> {
        self.lanes.pop_front()
    }

    fn push_back(&mut self, lane: LaneContent) {
        self.lanes.push_back(lane);
    }

    fn purge_obstacles(&mut self) {
        self.lanes.retain(|l| !l.is_obstacle());
    }

    /// Copy the window into a fixed array, padding missing lanes with `Flat`
    pub fn to_array(&self) -> [LaneContent; WINDOW_LEN] {
        let mut out = [LaneContent::Flat; WINDOW_LEN];
        for (slot, lane) in out.iter_mut().zip(self.iter()) {
            *slot = lane;
        }
        out
    }
}

/// Number of obstacles injected by a burst draw `v` in `[0, BURST_DRAW_RANGE)`.
///
/// One obstacle per divisor of 3, 9 and 27 that divides `v`. The divisors
/// nest, so counts are 0 (v not a multiple of 3), 1, 2 or 3 (v == 0).
pub fn burst_size(draw: u32) -> usize {
    [3, 9, 27].iter().filter(|&&d| draw % d == 0).count()
}

/// The scrolling ground: obstacle window, overflow backlog, and burst countdown
#[derive(Debug, Clone)]
pub struct ObstacleStream {
    window: ObstacleWindow,
    /// Lanes produced by a burst that did not yet fit in the window
    backlog: VecDeque<LaneContent>,
    /// Ticks remaining until the next burst
    counter: u32,
    /// Ceiling the countdown resets to after a burst
    limit: u32,
}

impl ObstacleStream {
    /// Create a stream with a full window of cosmetic lanes
    pub fn new(rng: &mut dyn LaneRng) -> Self {
        let mut stream = Self {
            window: ObstacleWindow::new(),
            backlog: VecDeque::new(),
            counter: FIRST_BURST_COUNTDOWN,
            limit: CALM_LIMIT,
        };
        stream.refill(rng);
        stream
    }

    pub fn window(&self) -> &ObstacleWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut ObstacleWindow {
        &mut self.window
    }

    /// Lanes waiting to enter the window, in arrival order
    pub fn pending(&self) -> impl Iterator<Item = LaneContent> + '_ {
        self.backlog.iter().copied()
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Drop every obstacle (window and backlog), refill with cosmetic lanes,
    /// and rewind the burst countdown to its session-start values.
    pub fn reset(&mut self, rng: &mut dyn LaneRng) {
        self.window.purge_obstacles();
        self.backlog.clear();
        self.counter = FIRST_BURST_COUNTDOWN;
        self.limit = CALM_LIMIT;
        self.refill(rng);
    }

    /// Scroll one lane: pop the front, run the burst countdown, and top the
    /// window back up to `WINDOW_LEN`. Returns the popped lane.
    pub fn tick(&mut self, rng: &mut dyn LaneRng) -> LaneContent {
        let popped = self.window.pop_front().unwrap_or_default();

        self.counter = self.counter.saturating_sub(1);
        if self.counter == 0 {
            let injected = self.burst(rng);
            self.limit = if injected == 0 { CALM_LIMIT } else { BURST_LIMIT };
            self.counter = self.limit;
        }

        self.refill(rng);
        popped
    }

    /// Draw a burst and queue its obstacles; returns how many were queued
    fn burst(&mut self, rng: &mut dyn LaneRng) -> usize {
        let draw = rng.next(0, BURST_DRAW_RANGE);
        let count = burst_size(draw);
        log::debug!("Burst draw {draw}: {count} obstacle(s)");
        self.backlog
            .extend(std::iter::repeat_n(LaneContent::Obstacle, count));
        count
    }

    /// Feed the backlog into the window, then pad with cosmetic lanes
    fn refill(&mut self, rng: &mut dyn LaneRng) {
        while !self.window.is_full() {
            let lane = match self.backlog.pop_front() {
                Some(lane) => lane,
                None => LaneContent::random_cosmetic(rng),
            };
            self.window.push_back(lane);
        }
    }
}
