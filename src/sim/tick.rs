//! Per-frame tick
//!
//! Applies the frame's input events, advances the active animation, then
//! reads everything the renderer needs into a `RenderSnapshot`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ease::ease_in_out;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::difficulty::Difficulty;
use crate::rect_contains;

/// Keys the core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameKey {
    /// Start a round from the menu (acts as restart when finished)
    Start,
    /// Back to the menu after a round
    Restart,
    /// Show the ball while shuffling
    ToggleDebugReveal,
    DifficultyPrev,
    DifficultyNext,
}

/// Discrete input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Raw click in screen coordinates
    PointerDown(Vec2),
    /// Click already hit-tested by the host
    CupClicked(usize),
    Key(GameKey),
    Quit,
}

/// Input collected for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn key(key: GameKey) -> Self {
        Self::new([InputEvent::Key(key)])
    }

    pub fn click(x: f32, y: f32) -> Self {
        Self::new([InputEvent::PointerDown(Vec2::new(x, y))])
    }
}

/// A cup as the renderer should draw it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CupSprite {
    pub pos: Vec2,
    /// Vertical hop offset (negative is up)
    pub lift: f32,
}

/// Draw order of the ball relative to the cups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallLayer {
    /// Peeking out under the raised cups in the menu
    BehindCups,
    AboveCups,
}

/// The ball as the renderer should draw it (top-left of its sprite)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSprite {
    pub pos: Vec2,
    pub layer: BallLayer,
}

/// Everything the render/audio layers need after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub cups: [CupSprite; CUP_COUNT],
    pub ball: Option<BallSprite>,
    pub ball_host: usize,
    pub score: u32,
    pub rounds: u32,
    pub difficulty: Difficulty,
    pub message: &'static str,
    /// Whether the start/retry button is shown
    pub show_button: bool,
    pub events: Vec<GameEvent>,
    pub quit: bool,
}

/// Advance the game by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> RenderSnapshot {
    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

    for event in &input.events {
        apply_event(state, *event);
    }

    state.advance(dt_ms);
    snapshot(state)
}

/// Apply one input event in the current phase; out-of-phase input is dropped
pub fn apply_event(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::Quit => state.request_quit(),
        InputEvent::CupClicked(index) => {
            state.resolve_guess(index);
        }
        InputEvent::PointerDown(point) => match state.current_phase() {
            GamePhase::AwaitingChoice => {
                if let Some(index) = state.cups().hit_test(point) {
                    state.resolve_guess(index);
                }
            }
            GamePhase::Menu | GamePhase::Finished => {
                if let Some(forward) = difficulty_hit(point) {
                    state.change_difficulty(forward);
                }
                if button_contains(point) {
                    apply_event(state, InputEvent::Key(GameKey::Start));
                }
            }
            GamePhase::Descending | GamePhase::Shuffling | GamePhase::Revealing => {
                log::trace!("Ignoring click in {:?}", state.current_phase());
            }
        },
        InputEvent::Key(key) => apply_key(state, key),
    }
}

fn apply_key(state: &mut GameState, key: GameKey) {
    match key {
        GameKey::ToggleDebugReveal => {
            state.debug_reveal = !state.debug_reveal;
            log::debug!("Debug reveal: {}", state.debug_reveal);
        }
        GameKey::DifficultyPrev => {
            state.change_difficulty(false);
        }
        GameKey::DifficultyNext => {
            state.change_difficulty(true);
        }
        GameKey::Start | GameKey::Restart => match state.current_phase() {
            GamePhase::Menu if key == GameKey::Start => state.enter_descending(),
            GamePhase::Finished => state.enter_menu(),
            phase => log::trace!("Ignoring {:?} in {:?}", key, phase),
        },
    }
}

/// Start/retry button hit test
pub fn button_contains(point: Vec2) -> bool {
    rect_contains(
        Vec2::new(BUTTON_X, BUTTON_Y),
        Vec2::new(BUTTON_W, BUTTON_H),
        point,
    )
}

/// Difficulty selector hit test: `Some(false)` steps back, `Some(true)`
/// steps forward. The level name splits down the middle.
pub fn difficulty_hit(point: Vec2) -> Option<bool> {
    let row = |x: f32, w: f32| {
        rect_contains(Vec2::new(x, DIFF_ROW_Y), Vec2::new(w, DIFF_ROW_H), point)
    };

    if row(DIFF_LEFT_X, DIFF_ARROW_W) || row(DIFF_VALUE_X, DIFF_VALUE_W / 2.0) {
        Some(false)
    } else if row(DIFF_RIGHT_X, DIFF_ARROW_W)
        || row(DIFF_VALUE_X + DIFF_VALUE_W / 2.0, DIFF_VALUE_W / 2.0)
    {
        Some(true)
    } else {
        None
    }
}

/// Half sine arch over [0, 1], never negative
#[inline]
fn hop_curve(p: f32) -> f32 {
    (std::f32::consts::PI * p.clamp(0.0, 1.0)).sin().max(0.0)
}

/// Read the render view of the state
pub fn snapshot(state: &mut GameState) -> RenderSnapshot {
    let phase = state.current_phase();
    let host = state.ball_host_index();

    // Host cup (and the ball riding in it) hop while being swapped
    let hop = if phase == GamePhase::Shuffling {
        state
            .shuffle()
            .active()
            .filter(|swap| swap.pair.involves(host))
            .and_then(|_| state.shuffle().active_progress())
    } else {
        None
    };

    let cups = std::array::from_fn(|i| CupSprite {
        pos: state.cup_position(i),
        lift: match hop {
            Some(p) if i == host => -CUP_HOP * hop_curve(p),
            _ => 0.0,
        },
    });

    let ball = if phase == GamePhase::Menu {
        let x = state.cup_position(host).x + BALL_MENU_ANCHOR_X;
        Some(BallSprite {
            pos: Vec2::new(x, BALL_MENU_Y),
            layer: BallLayer::BehindCups,
        })
    } else if state.is_ball_visible_now() {
        let cup = state.ball_cup_position();
        let pos = if phase == GamePhase::Shuffling {
            let lift = hop
                .map(|p| -BALL_HOP * hop_curve(ease_in_out(p)))
                .unwrap_or(0.0);
            cup + Vec2::new(BALL_ANCHOR_X, BALL_CHEAT_ANCHOR_Y + lift)
        } else {
            cup + Vec2::new(BALL_ANCHOR_X, BALL_ANCHOR_Y)
        };
        Some(BallSprite {
            pos,
            layer: BallLayer::AboveCups,
        })
    } else {
        None
    };

    RenderSnapshot {
        phase,
        cups,
        ball,
        ball_host: host,
        score: state.score(),
        rounds: state.rounds(),
        difficulty: state.active_difficulty(),
        message: state.message(),
        show_button: matches!(phase, GamePhase::Menu | GamePhase::Finished),
        events: state.drain_events(),
        quit: state.quit_requested(),
    }
}
