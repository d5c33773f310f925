//! Player configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Player configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Seconds skipped by the arrow keys
    pub seek_step: f64,
    /// Slider ratios below this snap to silence
    pub mute_threshold: f64,
    /// Volumes above this show the "loud" icon
    pub loud_threshold: f64,
    /// Playback rates offered in the speed menu
    pub speeds: Vec<f64>,
    /// Rate marked active at startup
    pub default_speed: f64,
    /// Initial state of the autoload toggle
    pub autoload: bool,
    /// Cue the first playlist item on mount
    pub cue_first: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            seek_step: 5.0,
            mute_threshold: 0.1,
            loud_threshold: 0.7,
            speeds: vec![0.5, 0.75, 1.0, 1.5, 2.0],
            default_speed: 1.0,
            autoload: false,
            cue_first: true,
        }
    }
}

impl PlayerConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlayerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.seek_step.is_finite() && self.seek_step > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "seek_step must be positive, got {}",
                self.seek_step
            )));
        }
        for (name, value) in [
            ("mute_threshold", self.mute_threshold),
            ("loud_threshold", self.loud_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.speeds.is_empty() {
            return Err(Error::InvalidConfig("speeds must not be empty".into()));
        }
        if let Some(bad) = self.speeds.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(Error::InvalidConfig(format!("invalid speed {bad}")));
        }
        if !self.speeds.contains(&self.default_speed) {
            return Err(Error::InvalidConfig(format!(
                "default_speed {} is not one of {:?}",
                self.default_speed, self.speeds
            )));
        }
        Ok(())
    }
}
