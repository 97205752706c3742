//! Game settings and preferences
//!
//! Stored as JSON next to the binary. Anything missing or unreadable falls
//! back to defaults; settings never stop the game from starting.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DESCENT_MS, TARGET_FPS};
use crate::difficulty::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty selected when the game starts
    #[serde(with = "difficulty_name")]
    pub difficulty: Difficulty,
    /// Fixed run seed (random per launch when absent)
    pub seed: Option<u64>,
    /// Length of the cup descent (ms)
    pub descent_ms: f32,
    /// Host frame rate
    pub frame_rate: u32,
    /// Start with the ball visible during the shuffle
    pub debug_reveal: bool,

    // === Audio ===
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            seed: None,
            descent_ms: DESCENT_MS,
            frame_rate: TARGET_FPS,
            debug_reveal: false,
            sound_enabled: true,
            master_volume: 0.8,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const PATH_ENV: &'static str = "TRILERO_SETTINGS";
    /// Settings file used when the variable is unset
    const DEFAULT_FILE: &'static str = "trilero.json";

    /// Parse settings, then clamp values the game can't run with
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Where `load`/`save` look
    pub fn path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_FILE))
    }

    /// Load settings from the default path
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Bad settings file {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the default path
    pub fn save(&self) {
        self.save_to(&Self::path());
    }

    pub fn save_to(&self, path: &Path) {
        match std::fs::write(path, self.to_json()) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
        }
    }

    /// Frame length in ms for the host loop
    pub fn frame_ms(&self) -> f32 {
        1000.0 / self.frame_rate as f32
    }

    /// Clamp values the game can't run with
    pub(crate) fn sanitized(mut self) -> Self {
        if !(self.descent_ms.is_finite() && self.descent_ms > 0.0) {
            log::warn!("descent_ms {} out of range, using {}", self.descent_ms, DESCENT_MS);
            self.descent_ms = DESCENT_MS;
        }
        if self.frame_rate == 0 {
            self.frame_rate = TARGET_FPS;
        }
        self.master_volume = if self.master_volume.is_finite() {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self
    }
}

/// Difficulty stored by display name ("Fácil", "easy", ...)
mod difficulty_name {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::difficulty::Difficulty;

    pub fn serialize<S: Serializer>(value: &Difficulty, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Difficulty, D::Error> {
        let name = String::deserialize(deserializer)?;
        Difficulty::from_str(&name)
            .ok_or_else(|| D::Error::custom(format!("unknown difficulty '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.descent_ms, 600.0);
        assert_eq!(settings.frame_rate, 60);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "difficulty": "facil", "seed": 42 }"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.descent_ms, 600.0);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn test_unknown_difficulty_is_an_error() {
        assert!(Settings::from_json(r#"{ "difficulty": "nightmare" }"#).is_err());
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_sanitizes_values() {
        let settings =
            Settings::from_json(r#"{ "descent_ms": -5, "frame_rate": 0, "master_volume": 3.5 }"#)
                .unwrap();
        assert_eq!(settings.descent_ms, 600.0);
        assert_eq!(settings.frame_rate, 60);
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_json_uses_display_name() {
        let settings = Settings {
            difficulty: Difficulty::Hard,
            ..Default::default()
        };
        let json = settings.to_json();
        assert!(json.contains("\"Difícil\""));
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("trilero-settings-does-not-exist.json");
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("trilero-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(7),
            debug_reveal: true,
            ..Default::default()
        };
        settings.save_to(&path);
        assert_eq!(Settings::load_from(&path), settings);
        let _ = std::fs::remove_file(&path);
    }
}
