//! One-shot descent of the cups from the menu layout onto the table

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cups::CupPositions;
use super::ease::{ease_in_out, lerp, progress};
use crate::consts::CUP_COUNT;

/// Moves all cups in lockstep from `start` to `end` over `duration_ms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescentAnimator {
    start: [Vec2; CUP_COUNT],
    end: [Vec2; CUP_COUNT],
    duration_ms: f32,
    elapsed_ms: f32,
}

impl DescentAnimator {
    /// Capture both layouts and start from zero elapsed time
    pub fn begin(start: [Vec2; CUP_COUNT], end: [Vec2; CUP_COUNT], duration_ms: f32) -> Self {
        Self {
            start,
            end,
            duration_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt_ms` and write cup positions.
    ///
    /// Returns true once the animation is complete; the cups are then
    /// snapped to the exact end layout.
    pub fn advance(&mut self, dt_ms: f32, cups: &mut CupPositions) -> bool {
        self.elapsed_ms += dt_ms;
        let e = ease_in_out(progress(self.elapsed_ms, self.duration_ms));
        for i in 0..CUP_COUNT {
            cups.set(i, lerp(self.start[i], self.end[i], e));
        }

        if self.is_complete() {
            cups.set_all(self.end);
            return true;
        }
        false
    }

    /// A non-finite or non-positive duration finishes on the first step
    pub fn is_complete(&self) -> bool {
        !(self.duration_ms.is_finite() && self.duration_ms > 0.0)
            || self.elapsed_ms >= self.duration_ms
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }
}
