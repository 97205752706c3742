//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives through `tick`'s `dt`
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod cups;
pub mod descent;
pub mod ease;
pub mod shuffle;
pub mod state;
pub mod tick;

pub use cups::CupPositions;
pub use descent::DescentAnimator;
pub use ease::{ease_in_out, lerp};
pub use shuffle::{ActiveSwap, SwapPair, SwapSequencer, SwapStep, generate_swap_queue};
pub use state::{GameEvent, GamePhase, GameState, Outcome};
pub use tick::{
    BallLayer, BallSprite, CupSprite, GameKey, InputEvent, RenderSnapshot, TickInput, tick,
};
