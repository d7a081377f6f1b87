//! Scoring - line-clear points and the display level.

use crate::types::LEVEL_SPEED_FACTOR;

/// Points for clearing `lines` rows from a single lock.
///
/// A left shift of a 50-point base: 1 -> 100, 2 -> 200, 3 -> 400, 4 -> 800.
pub fn line_clear_score(lines: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    50 << lines
}

/// Display level derived from the current game speed. Has no gameplay
/// effect; it only feeds the side panel.
pub fn level_for_speed(game_speed: f32) -> u32 {
    (game_speed * LEVEL_SPEED_FACTOR) as u32
}
