//! Sound cues
//!
//! The core never plays audio itself: it fires `GameEvent`s, and this module
//! turns them into sound effects for whatever backend the host provides.
//! Without a backend every cue is a no-op.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Cups start moving
    Shuffle,
    /// Player found the ball
    Success,
    /// Player missed
    Fail,
}

impl SoundEffect {
    /// Cue for a game event
    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::ShuffleStarted => SoundEffect::Shuffle,
            GameEvent::CorrectGuess => SoundEffect::Success,
            GameEvent::WrongGuess => SoundEffect::Fail,
        }
    }

    /// Asset a file-based backend would load
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Shuffle => "mix.wav",
            SoundEffect::Success => "success.wav",
            SoundEffect::Fail => "fail.wav",
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend used when nothing else is available
#[derive(Debug, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Sound {:?} ({}) at {:.2}", effect, effect.file_name(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullBackend))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Null backend configured from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::default();
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(!settings.sound_enabled);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted || self.master_volume <= 0.0 {
            return;
        }
        self.backend.play(effect, self.master_volume);
    }

    /// Play the cue for each event fired this tick
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for &event in events {
            self.play(SoundEffect::for_event(event));
        }
    }
}
