//! Positions of the three cups on the table

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CUP_COUNT, CUP_H, CUP_W};
use crate::rect_contains;

/// Mutable top-left positions of the cups, indexed 0..3
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CupPositions {
    positions: [Vec2; CUP_COUNT],
}

impl CupPositions {
    pub fn new(positions: [Vec2; CUP_COUNT]) -> Self {
        Self { positions }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Vec2 {
        assert_cup_index(index);
        self.positions[index]
    }

    #[inline]
    pub fn set(&mut self, index: usize, pos: Vec2) {
        assert_cup_index(index);
        self.positions[index] = pos;
    }

    pub fn set_all(&mut self, positions: [Vec2; CUP_COUNT]) {
        self.positions = positions;
    }

    pub fn all(&self) -> [Vec2; CUP_COUNT] {
        self.positions
    }

    /// Hit rectangle of a cup as (origin, size)
    pub fn rect(&self, index: usize) -> (Vec2, Vec2) {
        (self.get(index), Vec2::new(CUP_W, CUP_H))
    }

    /// First cup whose rectangle contains `point`
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        (0..CUP_COUNT).find(|&i| {
            let (origin, size) = self.rect(i);
            rect_contains(origin, size, point)
        })
    }
}

/// Cup indices outside 0..3 are a logic error, never user input
#[inline]
pub fn assert_cup_index(index: usize) {
    assert!(
        index < CUP_COUNT,
        "cup index {index} out of range (expected 0..{CUP_COUNT})"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{menu_layout, play_layout};

    #[test]
    fn test_set_get() {
        let mut cups = CupPositions::new(menu_layout());
        cups.set(1, Vec2::new(3.0, 4.0));
        assert_eq!(cups.get(1), Vec2::new(3.0, 4.0));
        assert_eq!(cups.get(0), menu_layout()[0]);

        cups.set_all(play_layout());
        assert_eq!(cups.all(), play_layout());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range_panics() {
        let cups = CupPositions::new(menu_layout());
        let _ = cups.get(3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_out_of_range_panics() {
        let mut cups = CupPositions::new(menu_layout());
        cups.set(7, Vec2::ZERO);
    }

    #[test]
    fn test_hit_test() {
        let cups = CupPositions::new(play_layout());
        let centre = |i: usize| cups.get(i) + Vec2::new(CUP_W / 2.0, CUP_H / 2.0);
        assert_eq!(cups.hit_test(centre(0)), Some(0));
        assert_eq!(cups.hit_test(centre(1)), Some(1));
        assert_eq!(cups.hit_test(centre(2)), Some(2));
        assert_eq!(cups.hit_test(Vec2::new(1.0, 1.0)), None);
        // Gap between the first two columns
        assert_eq!(cups.hit_test(Vec2::new(200.0, 250.0)), None);
    }

    #[test]
    fn test_hit_test_overlap_prefers_lowest_index() {
        let pos = Vec2::new(100.0, 100.0);
        let cups = CupPositions::new([pos, pos, Vec2::ZERO]);
        assert_eq!(cups.hit_test(pos + Vec2::splat(5.0)), Some(0));
    }
}
