//! Physics tunables
//!
//! Loaded from a JSON file; any field left out takes its default from `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors from reading a settings file
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Could not read settings file")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings JSON")]
    Parse(#[from] serde_json::Error),
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the scene RNG
    pub seed: u64,

    // === Forces ===
    /// Gravity between bodies closer than this is skipped
    pub min_gravity_distance: f64,
    /// Constant downward force on the player
    pub player_gravity: f64,
    /// Per-axis cap on player speed
    pub max_player_speed: f64,

    // === Collisions ===
    /// Largest gap at which a falling player snaps onto a platform
    pub attach_distance: f64,
    /// Power-up effect length, in scene ticks
    pub powerup_ticks: u32,

    // === Timing ===
    /// Longest frame step handed to the scene, in seconds
    pub max_frame_dt: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,

            min_gravity_distance: MIN_GRAVITY_DISTANCE,
            player_gravity: PLAYER_GRAVITY,
            max_player_speed: MAX_PLAYER_SPEED,

            attach_distance: ATTACH_DISTANCE,
            powerup_ticks: POWERUP_TICKS,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to the defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::info!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
