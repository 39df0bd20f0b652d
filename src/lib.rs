//! Rock Drift - simulation core for a bounded-playfield asteroid shooter
//!
//! Core modules:
//! - `sim`: World state, motion, collisions, spawning and the frame controller
//! - `settings`: Playfield dimensions, capacities and RNG seed

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;
    /// Frame rate the platform loop paces ticks at
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep used by the platform loop
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 30.0;
    /// Share of the nominal radius used for obstacle hits (the hull is not a full circle)
    pub const SHIP_HITBOX_FACTOR: f32 = 0.80;
    pub const MAX_SPEED: f32 = 5.0;
    pub const MIN_SPEED: f32 = 0.0;
    pub const SPEED_ACCEL: f32 = 0.1;
    /// Degrees per tick
    pub const ROTATION_SPEED: u32 = 6;

    /// Bullet defaults
    pub const MAX_BULLETS: usize = 30;
    pub const BULLET_VELOCITY: f32 = 10.0;
    pub const BULLET_RADIUS: f32 = 5.0;

    /// Asteroid defaults
    pub const MIN_ASTEROIDS: u32 = 1;
    pub const MAX_ASTEROIDS: u32 = 10;
    pub const ASTEROID_RADIUS_MIN: f32 = 15.0;
    pub const ASTEROID_SPLIT_THRESHOLD: f32 = 25.0;
    pub const ASTEROID_RADIUS_MAX: f32 = 40.0;
    pub const ASTEROID_SPEED_MIN: f32 = 1.0;
    pub const ASTEROID_SPEED_MAX: f32 = 3.0;

    /// Inset from an edge for freshly spawned or reflected asteroids
    pub const GRACE_SPACING: f32 = 5.0;

    /// Share of the overlap (plus bias) used to separate colliding asteroids
    pub const SEPARATION_FACTOR: f32 = 0.6;
    pub const SEPARATION_BIAS: f32 = 1.0;
}

/// Wrap a heading into [0, 360) degrees
#[inline]
pub fn wrap_heading(degrees: u32) -> u32 {
    degrees % 360
}

/// Unit vector for a heading in degrees, measured clockwise from "up"
///
/// Screen coordinates grow downward, so "up" is `(0, -1)`.
#[inline]
pub fn heading_vector(degrees: u32) -> Vec2 {
    let theta = (degrees as f32).to_radians();
    Vec2::new(theta.sin(), -theta.cos())
}
