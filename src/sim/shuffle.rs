//! Swap sequencer
//!
//! A shuffle is a FIFO queue of pairwise swaps. Exactly one swap animates at
//! a time; each one exchanges the physical positions of two cups. Which cup
//! index hides the ball is never touched here.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cups::{CupPositions, assert_cup_index};
use super::ease::{ease_in_out, lerp, progress};
use crate::consts::CUP_COUNT;

/// A pending swap of two distinct cups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPair {
    pub first: usize,
    pub second: usize,
}

impl SwapPair {
    pub fn new(first: usize, second: usize) -> Self {
        assert_cup_index(first);
        assert_cup_index(second);
        assert!(first != second, "swap pair must name two different cups, got ({first}, {second})");
        Self { first, second }
    }

    pub fn involves(&self, index: usize) -> bool {
        self.first == index || self.second == index
    }
}

/// The swap currently being animated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveSwap {
    pub pair: SwapPair,
    pub start_first: Vec2,
    pub start_second: Vec2,
    pub elapsed_ms: f32,
}

impl ActiveSwap {
    /// Each cup heads for the other's starting point
    pub fn target_first(&self) -> Vec2 {
        self.start_second
    }

    pub fn target_second(&self) -> Vec2 {
        self.start_first
    }

    /// Start and target of one member of the pair
    pub fn path(&self, index: usize) -> Option<(Vec2, Vec2)> {
        if index == self.pair.first {
            Some((self.start_first, self.target_first()))
        } else if index == self.pair.second {
            Some((self.start_second, self.target_second()))
        } else {
            None
        }
    }
}

/// Result of one `SwapSequencer::advance` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStep {
    /// Nothing loaded
    Idle,
    /// A swap is in flight
    Animating,
    /// A swap just landed; more may follow
    StepCompleted,
    /// Queue drained and no swap in flight
    QueueExhausted,
}

/// Animates a queue of swaps one at a time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwapSequencer {
    queue: VecDeque<SwapPair>,
    active: Option<ActiveSwap>,
    swap_duration_ms: f32,
    loaded: bool,
}

impl SwapSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a new shuffle, dropping anything in flight
    pub fn begin(&mut self, queue: impl IntoIterator<Item = SwapPair>, swap_duration_ms: f32) {
        self.queue = queue.into_iter().collect();
        self.active = None;
        self.swap_duration_ms = swap_duration_ms;
        self.loaded = true;
    }

    /// Abandon the shuffle without touching cup positions
    pub fn clear(&mut self) {
        self.queue.clear();
        self.active = None;
        self.loaded = false;
    }

    pub fn advance(&mut self, dt_ms: f32, cups: &mut CupPositions) -> SwapStep {
        if !self.loaded {
            return SwapStep::Idle;
        }

        if self.active.is_none() {
            let Some(pair) = self.queue.pop_front() else {
                return SwapStep::QueueExhausted;
            };
            log::debug!(
                "Swap cups {} <-> {} ({} left)",
                pair.first,
                pair.second,
                self.queue.len()
            );
            self.active = Some(ActiveSwap {
                pair,
                start_first: cups.get(pair.first),
                start_second: cups.get(pair.second),
                elapsed_ms: 0.0,
            });
        }

        let duration = self.swap_duration_ms;
        let Some(swap) = self.active.as_mut() else {
            return SwapStep::Idle;
        };

        swap.elapsed_ms += dt_ms;
        if swap.elapsed_ms >= duration {
            cups.set(swap.pair.first, swap.target_first());
            cups.set(swap.pair.second, swap.target_second());
            self.active = None;
            return SwapStep::StepCompleted;
        }

        let e = ease_in_out(progress(swap.elapsed_ms, duration));
        cups.set(swap.pair.first, lerp(swap.start_first, swap.target_first(), e));
        cups.set(swap.pair.second, lerp(swap.start_second, swap.target_second(), e));
        SwapStep::Animating
    }

    /// True once the last swap has landed
    pub fn is_exhausted(&self) -> bool {
        self.loaded && self.active.is_none() && self.queue.is_empty()
    }

    pub fn active(&self) -> Option<&ActiveSwap> {
        self.active.as_ref()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn swap_duration_ms(&self) -> f32 {
        self.swap_duration_ms
    }

    /// Linear progress of the active swap, if any
    pub fn active_progress(&self) -> Option<f32> {
        self.active
            .as_ref()
            .map(|swap| progress(swap.elapsed_ms, self.swap_duration_ms))
    }

    /// Where cup `index` is along the active swap, using the same eased
    /// progress as the cup itself. `None` when it is not being swapped.
    pub fn tracked_position(&self, index: usize) -> Option<Vec2> {
        let swap = self.active.as_ref()?;
        let (start, target) = swap.path(index)?;
        let e = ease_in_out(progress(swap.elapsed_ms, self.swap_duration_ms));
        Some(lerp(start, target, e))
    }
}

/// Draw `count` independent ordered pairs of distinct cups.
///
/// Each pair is uniform over the six ordered pairs; the same pair may come
/// up back to back.
pub fn generate_swap_queue<R: Rng>(rng: &mut R, count: u32) -> Vec<SwapPair> {
    (0..count)
        .map(|_| {
            let first = rng.random_range(0..CUP_COUNT);
            let mut second = rng.random_range(0..CUP_COUNT - 1);
            if second >= first {
                second += 1;
            }
            SwapPair::new(first, second)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::play_layout;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn run_to_exhaustion(seq: &mut SwapSequencer, cups: &mut CupPositions, dt: f32) -> u32 {
        let mut completed = 0;
        for _ in 0..100_000 {
            match seq.advance(dt, cups) {
                SwapStep::StepCompleted => completed += 1,
                SwapStep::QueueExhausted => return completed,
                SwapStep::Animating => {}
                SwapStep::Idle => panic!("sequencer went idle mid-shuffle"),
            }
        }
        panic!("shuffle never finished");
    }

    #[test]
    #[should_panic(expected = "two different cups")]
    fn test_pair_rejects_same_cup() {
        let _ = SwapPair::new(1, 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_pair_rejects_bad_index() {
        let _ = SwapPair::new(0, 3);
    }

    #[test]
    fn test_idle_before_begin() {
        let mut cups = CupPositions::new(play_layout());
        let mut seq = SwapSequencer::new();
        assert_eq!(seq.advance(16.0, &mut cups), SwapStep::Idle);
        assert!(!seq.is_exhausted());
    }

    #[test]
    fn test_single_swap_exchanges_positions() {
        let layout = play_layout();
        let mut cups = CupPositions::new(layout);
        let mut seq = SwapSequencer::new();
        seq.begin([SwapPair::new(0, 2)], 400.0);

        assert_eq!(seq.advance(100.0, &mut cups), SwapStep::Animating);
        assert_eq!(seq.remaining(), 0);
        // Untouched cup stays put
        assert_eq!(cups.get(1), layout[1]);
        assert_eq!(seq.advance(300.0, &mut cups), SwapStep::StepCompleted);

        assert_eq!(cups.get(0), layout[2]);
        assert_eq!(cups.get(2), layout[0]);
        assert_eq!(cups.get(1), layout[1]);
        assert!(seq.is_exhausted());
        assert_eq!(seq.advance(16.0, &mut cups), SwapStep::QueueExhausted);
    }

    #[test]
    fn test_swaps_run_one_at_a_time() {
        let layout = play_layout();
        let mut cups = CupPositions::new(layout);
        let mut seq = SwapSequencer::new();
        let queue = [SwapPair::new(0, 1), SwapPair::new(1, 2), SwapPair::new(0, 1)];
        seq.begin(queue, 100.0);

        let mut last_remaining = seq.remaining();
        loop {
            let before = seq.remaining();
            match seq.advance(25.0, &mut cups) {
                SwapStep::StepCompleted => {
                    assert!(seq.active().is_none());
                    assert_eq!(seq.remaining(), last_remaining - 1);
                    last_remaining = seq.remaining();
                }
                SwapStep::Animating => {
                    assert!(seq.active().is_some());
                    assert!(seq.remaining() <= before);
                }
                SwapStep::QueueExhausted => break,
                SwapStep::Idle => unreachable!(),
            }
        }
        assert_eq!(last_remaining, 0);

        // 0<->1, then 1<->2, then 0<->1 on whatever positions they hold
        assert_eq!(cups.get(0), layout[2]);
        assert_eq!(cups.get(1), layout[1]);
        assert_eq!(cups.get(2), layout[0]);
    }

    #[test]
    fn test_tracked_position_matches_cup() {
        let mut cups = CupPositions::new(play_layout());
        let mut seq = SwapSequencer::new();
        seq.begin([SwapPair::new(1, 2)], 300.0);
        seq.advance(120.0, &mut cups);

        assert_eq!(seq.tracked_position(1), Some(cups.get(1)));
        assert_eq!(seq.tracked_position(2), Some(cups.get(2)));
        assert_eq!(seq.tracked_position(0), None);
    }

    #[test]
    fn test_begin_discards_active_swap() {
        let mut cups = CupPositions::new(play_layout());
        let mut seq = SwapSequencer::new();
        seq.begin([SwapPair::new(0, 1)], 300.0);
        seq.advance(50.0, &mut cups);
        assert!(seq.active().is_some());

        seq.begin(Vec::new(), 300.0);
        assert!(seq.active().is_none());
        assert_eq!(seq.advance(16.0, &mut cups), SwapStep::QueueExhausted);
    }

    #[test]
    fn test_generate_queue_is_deterministic() {
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        assert_eq!(generate_swap_queue(&mut a, 12), generate_swap_queue(&mut b, 12));
    }

    #[test]
    fn test_generate_queue_covers_all_pairs() {
        let mut rng = Pcg32::seed_from_u64(42);
        let queue = generate_swap_queue(&mut rng, 600);
        assert_eq!(queue.len(), 600);
        for first in 0..CUP_COUNT {
            for second in 0..CUP_COUNT {
                if first != second {
                    assert!(
                        queue.contains(&SwapPair { first, second }),
                        "pair ({first}, {second}) never drawn"
                    );
                }
            }
        }
    }

    proptest! {
        #[test]
        fn shuffle_ends_on_a_permutation_of_the_layout(seed in any::<u64>(), count in 1u32..24) {
            let layout = play_layout();
            let mut cups = CupPositions::new(layout);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut seq = SwapSequencer::new();
            seq.begin(generate_swap_queue(&mut rng, count), 120.0);

            let completed = run_to_exhaustion(&mut seq, &mut cups, 40.0);
            prop_assert_eq!(completed, count);
            for pos in cups.all() {
                prop_assert!(layout.contains(&pos));
            }
        }
    }
}
