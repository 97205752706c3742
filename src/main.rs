//! Trilero entry point
//!
//! Native headless host: plays a few rounds against the core at a fixed
//! frame rate and logs what happens. A windowed host drives the same
//! `tick` with real input and draws the returned snapshots.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use trilero::Settings;
use trilero::audio::AudioManager;
use trilero::consts::*;
use trilero::sim::{GameKey, GamePhase, GameState, RenderSnapshot, TickInput, tick};

/// Safety cap on frames per round
const MAX_FRAMES_PER_ROUND: u32 = 60 * 120;

fn main() {
    env_logger::init();
    log::info!("Trilero (headless) starting...");

    let rounds: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3);

    let settings = Settings::load();
    let mut state = GameState::from_settings(&settings);
    let mut audio = AudioManager::from_settings(&settings);
    // Separate stream for the simulated player's picks
    let mut player = Pcg32::seed_from_u64(state.seed ^ 0x5eed);
    let frame_ms = settings.frame_ms();

    log::info!(
        "Seed {}, difficulty {}, {} rounds",
        state.seed,
        state.active_difficulty_name(),
        rounds
    );

    for round in 1..=rounds {
        let snap = play_round(&mut state, &mut audio, &mut player, frame_ms);
        log::info!("Round {}: {}", round, snap.message);
        if snap.quit {
            break;
        }
        let snap = tick(&mut state, &TickInput::key(GameKey::Restart), frame_ms);
        audio.handle_events(&snap.events);
    }

    println!(
        "Score: {} / {} ({})",
        state.score(),
        state.rounds(),
        state.active_difficulty_name()
    );
}

/// Start, wait out the animations, pick a cup, return the final snapshot
fn play_round(
    state: &mut GameState,
    audio: &mut AudioManager,
    player: &mut Pcg32,
    frame_ms: f32,
) -> RenderSnapshot {
    let mut input = TickInput::key(GameKey::Start);

    for _ in 0..MAX_FRAMES_PER_ROUND {
        let snap = tick(state, &input, frame_ms);
        audio.handle_events(&snap.events);
        input = TickInput::default();

        match snap.phase {
            GamePhase::AwaitingChoice => {
                let cup = snap.cups[player.random_range(0..CUP_COUNT)];
                let click = cup.pos + Vec2::new(CUP_W / 2.0, CUP_H / 2.0);
                input = TickInput::click(click.x, click.y);
            }
            GamePhase::Finished => return snap,
            GamePhase::Menu
            | GamePhase::Descending
            | GamePhase::Shuffling
            | GamePhase::Revealing => {}
        }
        if snap.quit {
            return snap;
        }
    }

    log::warn!("Round did not finish within {} frames", MAX_FRAMES_PER_ROUND);
    tick(state, &TickInput::default(), 0.0)
}
