//! Trilero - find the ball under the cup
//!
//! Core modules:
//! - `sim`: Deterministic game core (cups, shuffle, phases, tick)
//! - `difficulty`: Swap count / swap speed table
//! - `settings`: Player preferences loaded from JSON
//! - `audio`: Sound cue sink fed by game events

pub mod audio;
pub mod difficulty;
pub mod settings;
pub mod sim;

pub use difficulty::{Difficulty, DifficultySelector};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Layout is authored against an 800x600 design and scaled down to the
/// 640x480 play surface.
pub mod consts {
    /// Design resolution
    pub const BASE_W: f32 = 800.0;
    pub const BASE_H: f32 = 600.0;
    /// Play surface
    pub const SCREEN_W: f32 = 640.0;
    pub const SCREEN_H: f32 = 480.0;
    /// Design-to-screen factor (0.8)
    pub const SCALE: f32 = SCREEN_W / BASE_W;

    /// Number of cups on the table
    pub const CUP_COUNT: usize = 3;
    /// Cup sprite size, also the hit rectangle
    pub const CUP_W: f32 = 120.0;
    pub const CUP_H: f32 = 120.0;
    /// Horizontal distance between neighbouring cup centres
    pub const CUP_SPACING: f32 = 208.0;

    /// Cup top edge while the menu is showing
    pub const MENU_Y: f32 = 168.0;
    /// Baseline the ball rests on; cups descend until their base meets it
    pub const BALL_MENU_Y: f32 = 320.0;
    /// Cup top edge during play
    pub const PLAY_Y: f32 = BALL_MENU_Y - CUP_H;

    /// Ball sprite radius
    pub const BALL_RADIUS: f32 = 16.0;
    /// Ball top-left relative to its host cup when revealed
    pub const BALL_ANCHOR_X: f32 = 44.0;
    pub const BALL_ANCHOR_Y: f32 = 80.0;
    /// Menu ball sprite is drawn at its unscaled 40px size
    pub const MENU_BALL_SIZE: f32 = 40.0;
    /// Menu ball left edge relative to its host cup (centred under it)
    pub const BALL_MENU_ANCHOR_X: f32 = (CUP_W - MENU_BALL_SIZE) / 2.0;
    /// Ball top-left relative to its host cup in debug reveal (centred)
    pub const BALL_CHEAT_ANCHOR_Y: f32 = (CUP_H - 2.0 * BALL_RADIUS) / 2.0;

    /// Peak hop of the ball's host cup during a swap (screen px)
    pub const CUP_HOP: f32 = 12.0 * SCALE;
    /// Peak hop of the tracked ball during a swap (screen px)
    pub const BALL_HOP: f32 = 10.0 * SCALE;

    /// Start/retry button rectangle
    pub const BUTTON_X: f32 = SCREEN_W / 2.0 - 80.0;
    pub const BUTTON_Y: f32 = SCREEN_H - 96.0;
    pub const BUTTON_W: f32 = 160.0;
    pub const BUTTON_H: f32 = 48.0;

    /// Difficulty selector row (top right): `<` arrow, level name, `>` arrow
    pub const DIFF_ROW_Y: f32 = 6.0;
    pub const DIFF_ROW_H: f32 = 24.0;
    pub const DIFF_ARROW_W: f32 = 24.0;
    pub const DIFF_LEFT_X: f32 = 440.0;
    pub const DIFF_VALUE_X: f32 = DIFF_LEFT_X + DIFF_ARROW_W + 8.0;
    pub const DIFF_VALUE_W: f32 = 96.0;
    pub const DIFF_RIGHT_X: f32 = DIFF_VALUE_X + DIFF_VALUE_W + 8.0;

    /// Descent animation length (ms)
    pub const DESCENT_MS: f32 = 600.0;
    /// Host frame rate used by the headless loop
    pub const TARGET_FPS: u32 = 60;
}

/// Left edge of each cup column
#[inline]
pub fn column_x(index: usize) -> f32 {
    use consts::*;
    SCREEN_W / 2.0 + (index as f32 - 1.0) * CUP_SPACING - CUP_W / 2.0
}

/// Cup positions while the menu is showing
pub fn menu_layout() -> [Vec2; consts::CUP_COUNT] {
    std::array::from_fn(|i| Vec2::new(column_x(i), consts::MENU_Y))
}

/// Cup positions during play
pub fn play_layout() -> [Vec2; consts::CUP_COUNT] {
    std::array::from_fn(|i| Vec2::new(column_x(i), consts::PLAY_Y))
}

/// Axis-aligned rectangle hit test, half-open on the far edges
#[inline]
pub fn rect_contains(origin: Vec2, size: Vec2, point: Vec2) -> bool {
    point.x >= origin.x
        && point.y >= origin.y
        && point.x < origin.x + size.x
        && point.y < origin.y + size.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_columns() {
        assert_eq!(column_x(0), 52.0);
        assert_eq!(column_x(1), 260.0);
        assert_eq!(column_x(2), 468.0);
        assert_eq!(consts::PLAY_Y, 200.0);
    }

    #[test]
    fn test_rect_contains_half_open() {
        let origin = Vec2::new(10.0, 10.0);
        let size = Vec2::new(5.0, 5.0);
        assert!(rect_contains(origin, size, Vec2::new(10.0, 10.0)));
        assert!(rect_contains(origin, size, Vec2::new(14.9, 14.9)));
        assert!(!rect_contains(origin, size, Vec2::new(15.0, 12.0)));
        assert!(!rect_contains(origin, size, Vec2::new(9.9, 12.0)));
    }
}
