//! World state and core simulation types
//!
//! The world owns every entity. Storage is reserved once in [`World::new`]
//! and never grows afterwards.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::slots::Slots;
use crate::Settings;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Ship destroyed
    GameOver,
}

/// How the ship is turning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnIntent {
    #[default]
    Still,
    Clockwise,
    CounterClockwise,
}

/// How the ship's speed is changing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThrustIntent {
    #[default]
    Constant,
    Accelerating,
    Decelerating,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Degrees clockwise from "up", always in [0, 360)
    pub heading: u32,
    pub turn: TurnIntent,
    /// Scalar speed along the heading, in [MIN_SPEED, MAX_SPEED]
    pub speed: f32,
    pub thrust: ThrustIntent,
}

impl Ship {
    /// Canonical ship: centred, facing up, at rest
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(width / 2.0, height / 2.0),
            heading: 0,
            turn: TurnIntent::Still,
            speed: MIN_SPEED,
            thrust: ThrustIntent::Constant,
        }
    }

    /// Radius used for asteroid hits
    #[inline]
    pub fn hit_radius(&self) -> f32 {
        SHIP_RADIUS * SHIP_HITBOX_FACTOR
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Mass used for asteroid-asteroid impulses
    #[inline]
    pub fn mass(&self) -> f32 {
        self.radius * self.radius
    }
}

/// A bullet fired by the ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading the bullet was fired at (degrees); informational only
    pub heading: f32,
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct World {
    /// Playfield width
    pub width: f32,
    /// Playfield height
    pub height: f32,
    /// Player ship
    pub ship: Ship,
    /// Live asteroids (unordered)
    pub asteroids: Slots<Asteroid>,
    /// Live bullets (unordered)
    pub bullets: Slots<Bullet>,
    /// Current level, 0 before the first spawn
    pub level: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Spawn count parameters
    pub min_asteroids: u32,
    pub max_asteroids: u32,
    /// Spawner RNG
    pub rng: Pcg32,
}

impl World {
    /// Build a world from validated settings, reserving all entity storage
    pub fn new(settings: &Settings) -> Result<Self, SimError> {
        settings.validate()?;

        let seed = settings.seed.unwrap_or_else(rand::random);
        let asteroids = Slots::with_capacity(settings.asteroid_capacity)?;
        let bullets = Slots::with_capacity(settings.max_bullets)?;

        log::info!(
            "World {}x{} ready: {} asteroid slots, {} bullet slots, seed {}",
            settings.width,
            settings.height,
            settings.asteroid_capacity,
            settings.max_bullets,
            seed
        );

        Ok(Self {
            width: settings.width,
            height: settings.height,
            ship: Ship::new(settings.width, settings.height),
            asteroids,
            bullets,
            level: 0,
            phase: GamePhase::Menu,
            min_asteroids: settings.min_asteroids,
            max_asteroids: settings.max_asteroids,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Playfield size as a vector
    #[inline]
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Read-only view of the world for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ship: ShipPose {
                pos: self.ship.pos,
                heading: self.ship.heading,
                speed: self.ship.speed,
            },
            asteroids: self
                .asteroids
                .iter()
                .map(|a| AsteroidView {
                    pos: a.pos,
                    radius: a.radius,
                })
                .collect(),
            bullets: self.bullets.iter().map(|b| b.pos).collect(),
            level: self.level,
            phase: self.phase,
        }
    }
}

/// Ship pose for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShipPose {
    pub pos: Vec2,
    pub heading: u32,
    pub speed: f32,
}

/// Asteroid outline for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AsteroidView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything a renderer needs, copied out after a tick completes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub ship: ShipPose,
    pub asteroids: Vec<AsteroidView>,
    pub bullets: Vec<Vec2>,
    pub level: u32,
    pub phase: GamePhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_is_canonical() {
        let world = World::new(&Settings::with_seed(1)).unwrap();
        assert_eq!(world.phase, GamePhase::Menu);
        assert_eq!(world.level, 0);
        assert!(world.asteroids.is_empty());
        assert!(world.bullets.is_empty());
        assert_eq!(world.asteroids.capacity(), 40);
        assert_eq!(world.bullets.capacity(), MAX_BULLETS);
        assert_eq!(world.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(world.ship.heading, 0);
        assert_eq!(world.ship.speed, 0.0);
    }

    #[test]
    fn test_new_world_rejects_invalid_settings() {
        let settings = Settings {
            asteroid_capacity: 1,
            ..Settings::with_seed(1)
        };
        assert!(matches!(World::new(&settings), Err(SimError::InvalidSettings(_))));
    }

    #[test]
    fn test_snapshot_copies_entities() {
        let mut world = World::new(&Settings::with_seed(1)).unwrap();
        world
            .asteroids
            .try_push(Asteroid::new(Vec2::new(50.0, 60.0), Vec2::ONE, 20.0))
            .unwrap();
        let snap = world.snapshot();
        assert_eq!(snap.asteroids.len(), 1);
        assert_eq!(snap.asteroids[0].radius, 20.0);
        assert!(snap.bullets.is_empty());
        assert_eq!(snap.phase, GamePhase::Menu);
    }
}
