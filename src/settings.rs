//! Simulation settings
//!
//! Everything the core needs from its host (playfield size, storage capacities,
//! RNG seed) arrives through this struct. Loaded from JSON on native builds.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while reading or checking settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Host-provided simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield width in world units
    pub width: f32,
    /// Playfield height in world units
    pub height: f32,
    /// Bullet storage capacity
    pub max_bullets: usize,
    /// Asteroids spawned on top of the level number
    pub min_asteroids: u32,
    /// Cap on asteroids spawned for a single level
    pub max_asteroids: u32,
    /// Asteroid storage capacity (must hold a fully split level)
    pub asteroid_capacity: usize,
    /// Fixed RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            max_bullets: MAX_BULLETS,
            min_asteroids: MIN_ASTEROIDS,
            max_asteroids: MAX_ASTEROIDS,
            asteroid_capacity: required_capacity(MAX_ASTEROIDS),
            seed: None,
        }
    }
}

/// Number of times an asteroid of maximum size can split before
/// dropping below the split threshold
pub fn split_generations() -> u32 {
    let mut radius = ASTEROID_RADIUS_MAX;
    let mut generations = 0;
    while radius >= ASTEROID_SPLIT_THRESHOLD {
        radius /= std::f32::consts::SQRT_2;
        generations += 1;
    }
    generations
}

/// Smallest width or height that still leaves room for the largest asteroid
/// between its two grace insets
pub fn min_playfield_extent() -> f32 {
    2.0 * (ASTEROID_RADIUS_MAX + GRACE_SPACING)
}

fn required_capacity(max_asteroids: u32) -> usize {
    (max_asteroids as usize) << split_generations()
}

impl Settings {
    /// Settings with a fixed seed, otherwise defaults
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Smallest asteroid capacity that can hold a level in which every
    /// asteroid has been split down to the smallest size
    pub fn required_asteroid_capacity(&self) -> usize {
        required_capacity(self.max_asteroids)
    }

    /// Check invariants the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let min_extent = min_playfield_extent();
        if !(self.width >= min_extent && self.height >= min_extent) {
            return Err(SettingsError::Invalid(format!(
                "playfield must be at least {min_extent} on each side to fit the largest asteroid, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_bullets == 0 {
            return Err(SettingsError::Invalid("max_bullets must be at least 1".into()));
        }
        if self.min_asteroids > self.max_asteroids {
            return Err(SettingsError::Invalid(format!(
                "min_asteroids ({}) exceeds max_asteroids ({})",
                self.min_asteroids, self.max_asteroids
            )));
        }
        let required = self.required_asteroid_capacity();
        if self.asteroid_capacity < required {
            return Err(SettingsError::Invalid(format!(
                "asteroid_capacity {} is below the {} needed for {} fully split asteroids",
                self.asteroid_capacity, required, self.max_asteroids
            )));
        }
        Ok(())
    }

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
