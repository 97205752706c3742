//! Game state and phase transitions
//!
//! Everything a round needs lives in `GameState`; the tick function is the
//! only driver.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cups::{CupPositions, assert_cup_index};
use super::descent::DescentAnimator;
use super::shuffle::{SwapSequencer, generate_swap_queue};
use crate::consts::*;
use crate::difficulty::{Difficulty, DifficultySelector};
use crate::settings::Settings;
use crate::{menu_layout, play_layout};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Cups up, ball showing, difficulty can be changed
    Menu,
    /// Cups coming down over the ball
    Descending,
    /// Swap queue playing out
    Shuffling,
    /// Waiting for the player to pick a cup
    AwaitingChoice,
    /// Ball shown at its host (one tick)
    Revealing,
    /// Outcome on screen, waiting for retry
    Finished,
}

impl GamePhase {
    /// Difficulty can only change while nothing is moving
    pub fn allows_difficulty_change(&self) -> bool {
        matches!(self, GamePhase::Menu | GamePhase::Finished)
    }
}

/// Events for the audio/asset layer, fired on transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ShuffleStarted,
    CorrectGuess,
    WrongGuess,
}

/// How the last round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    Wrong,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Correct => "¡Has acertado! Pulsa R para jugar de nuevo",
            Outcome::Wrong => "Has fallado. Pulsa R para jugar de nuevo",
        }
    }
}

/// Complete game state (deterministic given seed, inputs and dt sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    cups: CupPositions,
    /// Cup index hiding the ball; never changed by a swap
    ball_host: usize,
    descent: Option<DescentAnimator>,
    descent_ms: f32,
    shuffle: SwapSequencer,
    difficulty: DifficultySelector,
    score: u32,
    rounds: u32,
    /// Cup picked in the current round
    chosen: Option<usize>,
    outcome: Option<Outcome>,
    /// Show the ball through the cups while shuffling
    pub debug_reveal: bool,
    quit_requested: bool,
    /// Events fired since the last drain
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game in the menu with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            cups: CupPositions::new(menu_layout()),
            ball_host: 0,
            descent: None,
            descent_ms: DESCENT_MS,
            shuffle: SwapSequencer::new(),
            difficulty: DifficultySelector::default(),
            score: 0,
            rounds: 0,
            chosen: None,
            outcome: None,
            debug_reveal: false,
            quit_requested: false,
            events: Vec::new(),
        };
        state.enter_menu();
        state
    }

    /// Create a game from player settings (random seed when none is set)
    pub fn from_settings(settings: &Settings) -> Self {
        let settings = settings.clone().sanitized();
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut state = Self::new(seed);
        state.difficulty = DifficultySelector::new(settings.difficulty);
        state.debug_reveal = settings.debug_reveal;
        state.descent_ms = settings.descent_ms;
        state
    }

    // === Queries ===

    pub fn current_phase(&self) -> GamePhase {
        self.phase
    }

    pub fn cup_position(&self, index: usize) -> Vec2 {
        self.cups.get(index)
    }

    pub fn cups(&self) -> &CupPositions {
        &self.cups
    }

    pub fn ball_host_index(&self) -> usize {
        self.ball_host
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn active_difficulty(&self) -> Difficulty {
        self.difficulty.active()
    }

    pub fn active_difficulty_name(&self) -> &'static str {
        self.difficulty.active().name()
    }

    pub fn chosen_cup(&self) -> Option<usize> {
        self.chosen
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn shuffle(&self) -> &SwapSequencer {
        &self.shuffle
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Whether the ball is drawn on top of the cups right now
    pub fn is_ball_visible_now(&self) -> bool {
        match self.phase {
            GamePhase::Revealing | GamePhase::Finished => true,
            GamePhase::Shuffling => self.debug_reveal,
            GamePhase::Menu | GamePhase::Descending | GamePhase::AwaitingChoice => false,
        }
    }

    /// Host cup position, following the active swap if the host is in it
    pub fn ball_cup_position(&self) -> Vec2 {
        if self.phase != GamePhase::Shuffling {
            return self.cups.get(self.ball_host);
        }
        self.shuffle
            .tracked_position(self.ball_host)
            .unwrap_or_else(|| self.cups.get(self.ball_host))
    }

    /// Status line for the current phase
    pub fn message(&self) -> &'static str {
        match self.phase {
            GamePhase::Menu => "Elige dificultad y pulsa Comenzar",
            GamePhase::Descending => "",
            GamePhase::Shuffling => "Atento a la mezcla...",
            GamePhase::AwaitingChoice => "Haz clic en un vaso",
            GamePhase::Revealing | GamePhase::Finished => {
                self.outcome.map(|o| o.message()).unwrap_or("")
            }
        }
    }

    /// Take the events fired since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Transitions ===

    /// Cups back up, fresh ball host, any shuffle abandoned
    pub fn enter_menu(&mut self) {
        self.cups.set_all(menu_layout());
        self.ball_host = self.rng.random_range(0..CUP_COUNT);
        self.descent = None;
        self.shuffle.clear();
        self.chosen = None;
        self.outcome = None;
        self.phase = GamePhase::Menu;
        log::info!("Menu: ball under cup {}", self.ball_host);
    }

    /// Start the descent; the ball stays where the menu showed it
    pub fn enter_descending(&mut self) {
        self.cups.set_all(menu_layout());
        self.shuffle.clear();
        self.chosen = None;
        self.outcome = None;
        self.descent = Some(DescentAnimator::begin(
            menu_layout(),
            play_layout(),
            self.descent_ms,
        ));
        self.phase = GamePhase::Descending;
        log::info!("Descending ({} ms)", self.descent_ms);
    }

    /// Build a fresh swap queue for the active difficulty and start it
    pub fn enter_shuffling(&mut self) {
        let difficulty = self.difficulty.active();
        let queue = generate_swap_queue(&mut self.rng, difficulty.swap_count());
        self.shuffle.begin(queue, difficulty.swap_duration_ms());
        self.descent = None;
        self.phase = GamePhase::Shuffling;
        self.events.push(GameEvent::ShuffleStarted);
        log::info!(
            "Shuffling: {} swaps at {} ms ({})",
            difficulty.swap_count(),
            difficulty.swap_duration_ms(),
            difficulty.name()
        );
    }

    pub fn enter_awaiting_choice(&mut self) {
        self.shuffle.clear();
        self.phase = GamePhase::AwaitingChoice;
        log::info!("Waiting for the player's pick");
    }

    /// Settle the round on `index`. Only meaningful in AwaitingChoice;
    /// returns the outcome when a resolution happened.
    pub fn resolve_guess(&mut self, index: usize) -> Option<Outcome> {
        assert_cup_index(index);
        if self.phase != GamePhase::AwaitingChoice {
            log::trace!("Ignoring pick of cup {} in {:?}", index, self.phase);
            return None;
        }

        let outcome = if index == self.ball_host {
            self.score += 1;
            self.events.push(GameEvent::CorrectGuess);
            Outcome::Correct
        } else {
            self.events.push(GameEvent::WrongGuess);
            Outcome::Wrong
        };
        self.rounds += 1;
        self.chosen = Some(index);
        self.outcome = Some(outcome);
        self.phase = GamePhase::Revealing;
        log::info!(
            "Picked cup {}, ball under {}: {:?} (score {}/{})",
            index,
            self.ball_host,
            outcome,
            self.score,
            self.rounds
        );
        Some(outcome)
    }

    pub fn enter_finished(&mut self) {
        self.phase = GamePhase::Finished;
    }

    /// Step the difficulty selector; ignored while anything is moving
    pub fn change_difficulty(&mut self, forward: bool) -> bool {
        if !self.phase.allows_difficulty_change() {
            log::trace!("Ignoring difficulty change in {:?}", self.phase);
            return false;
        }
        let level = if forward {
            self.difficulty.next()
        } else {
            self.difficulty.prev()
        };
        log::info!("Difficulty: {}", level.name());
        true
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    // === Per-tick animation ===

    /// Advance whichever animation the current phase owns
    pub fn advance(&mut self, dt_ms: f32) {
        match self.phase {
            GamePhase::Menu | GamePhase::AwaitingChoice | GamePhase::Finished => {}
            GamePhase::Descending => {
                let done = match self.descent.as_mut() {
                    Some(descent) => descent.advance(dt_ms, &mut self.cups),
                    None => true,
                };
                if done {
                    self.cups.set_all(play_layout());
                    self.enter_shuffling();
                }
            }
            GamePhase::Shuffling => {
                let host_before = self.ball_host;
                let step = self.shuffle.advance(dt_ms, &mut self.cups);
                debug_assert_eq!(host_before, self.ball_host);
                if self.shuffle.is_exhausted() {
                    log::debug!("Shuffle finished on {:?}", step);
                    self.enter_awaiting_choice();
                }
            }
            GamePhase::Revealing => self.enter_finished(),
        }
    }
}
