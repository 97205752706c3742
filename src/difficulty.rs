//! Difficulty levels
//!
//! Harder levels shuffle more times and faster.

use serde::{Deserialize, Serialize};

/// Difficulty levels, in selector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All levels in the order the selector cycles through them
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Fácil",
            Difficulty::Medium => "Media",
            Difficulty::Hard => "Difícil",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fácil" | "facil" | "easy" => Some(Difficulty::Easy),
            "media" | "medium" | "med" => Some(Difficulty::Medium),
            "difícil" | "dificil" | "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Number of swaps in one shuffle
    pub fn swap_count(&self) -> u32 {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Medium => 12,
            Difficulty::Hard => 18,
        }
    }

    /// Duration of a single swap (ms)
    pub fn swap_duration_ms(&self) -> f32 {
        match self {
            Difficulty::Easy => 420.0,
            Difficulty::Medium => 360.0,
            Difficulty::Hard => 300.0,
        }
    }

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

/// Cyclic cursor over `Difficulty::ALL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultySelector {
    index: usize,
}

impl Default for DifficultySelector {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl DifficultySelector {
    pub fn new(initial: Difficulty) -> Self {
        Self {
            index: initial.index(),
        }
    }

    /// Currently selected level
    pub fn active(&self) -> Difficulty {
        Difficulty::ALL[self.index % Difficulty::ALL.len()]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Step back, wrapping from the first level to the last
    pub fn prev(&mut self) -> Difficulty {
        let len = Difficulty::ALL.len();
        self.index = (self.index + len - 1) % len;
        self.active()
    }

    /// Step forward, wrapping from the last level to the first
    pub fn next(&mut self) -> Difficulty {
        self.index = (self.index + 1) % Difficulty::ALL.len();
        self.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        assert_eq!(Difficulty::Easy.swap_count(), 8);
        assert_eq!(Difficulty::Easy.swap_duration_ms(), 420.0);
        assert_eq!(Difficulty::Medium.swap_count(), 12);
        assert_eq!(Difficulty::Medium.swap_duration_ms(), 360.0);
        assert_eq!(Difficulty::Hard.swap_count(), 18);
        assert_eq!(Difficulty::Hard.swap_duration_ms(), 300.0);
        for level in Difficulty::ALL {
            assert!(level.swap_count() > 0);
            assert!(level.swap_duration_ms() > 0.0);
            assert_eq!(Difficulty::ALL[level.index()], level);
        }
    }

    #[test]
    fn test_selector_wraps() {
        let mut selector = DifficultySelector::new(Difficulty::Easy);
        assert_eq!(selector.index(), 0);
        assert_eq!(selector.prev(), Difficulty::Hard);
        assert_eq!(selector.index(), 2);
        assert_eq!(selector.next(), Difficulty::Easy);
        assert_eq!(selector.index(), 0);
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(DifficultySelector::default().active(), Difficulty::Medium);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Difficulty::from_str("Fácil"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("facil"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str(" HARD "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("Difícil"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }
}
