//! Collision ("violation") detection between the character and the lanes

use super::character::CharacterState;
use super::lanes::ObstacleWindow;

/// True if any vulnerable offset of `state` lands on an obstacle lane.
///
/// Offsets past the end of the window never hit.
pub fn judge(state: CharacterState, window: &ObstacleWindow) -> bool {
    state
        .vulnerable_offsets()
        .iter()
        .any(|&offset| window.get(offset).is_some_and(|lane| lane.is_obstacle()))
}
