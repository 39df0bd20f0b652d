//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform code:
//! - One fixed step per tick, no wall-clock time
//! - Seeded RNG only
//! - Entity storage reserved once, never reallocated

pub mod collision;
pub mod error;
pub mod motion;
pub mod slots;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Contact, bounce_pair, circle_contact, resolve_collisions, split_asteroid};
pub use error::SimError;
pub use motion::integrate;
pub use slots::Slots;
pub use spawn::{Edge, level_population, spawn_level};
pub use state::{
    Asteroid, AsteroidView, Bullet, GamePhase, Ship, ShipPose, Snapshot, ThrustIntent,
    TurnIntent, World,
};
pub use tick::{Flow, Request, tick};
