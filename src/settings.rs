//! Audio preferences
//!
//! The host applies these when it implements [`crate::engine::AudioSink`];
//! the controllers never read them. Persisted as JSON by whatever storage the
//! host has.

use serde::{Deserialize, Serialize};

/// Playback preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Play page voice-overs where the platform supports them
    pub voice_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.2,
            music_volume: 0.7,
            voice_enabled: true,
        }
    }
}

impl Settings {
    /// Effective sound-effect gain
    pub fn effective_sfx(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Effective music gain
    pub fn effective_music(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse saved settings, falling back to defaults on corrupt input
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|err| {
            log::warn!("Ignoring corrupt settings: {err}");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.sfx_volume = 0.5;
        settings.voice_enabled = false;
        let back = Settings::from_json(&settings.to_json());
        assert_eq!(back, settings);
    }

    #[test]
    fn test_corrupt_json_falls_back() {
        let settings = Settings::from_json("not json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_effective_volumes() {
        let settings = Settings::default();
        assert!((settings.effective_sfx() - 0.8 * 0.2).abs() < 1e-6);
        assert!((settings.effective_music() - 0.8 * 0.7).abs() < 1e-6);
    }
}
