//! Level spawner
//!
//! Each level drops a fresh batch of asteroids onto the playfield edges.
//! The batch grows with the level until it reaches the configured cap.

use glam::Vec2;
use rand::Rng;

use super::collision::circles_touch;
use super::state::{Asteroid, Ship, World};
use crate::consts::*;

/// Redraws allowed when a candidate lands on the ship
const SPAWN_ATTEMPTS: u32 = 8;

/// Playfield edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Asteroids introduced for a level
pub fn level_population(level: u32, min_asteroids: u32, max_asteroids: u32) -> u32 {
    level.saturating_add(min_asteroids).min(max_asteroids)
}

/// Populate the world for its current level. Returns the number spawned.
pub fn spawn_level(world: &mut World) -> usize {
    let wanted = level_population(world.level, world.min_asteroids, world.max_asteroids);
    let bounds = world.bounds();
    let mut spawned = 0;

    for _ in 0..wanted {
        let asteroid = place_asteroid(&mut world.rng, bounds, &world.ship);
        if world.asteroids.try_push(asteroid).is_err() {
            log::warn!("Asteroid slots full after {} spawns", spawned);
            break;
        }
        spawned += 1;
    }

    log::info!("Level {}: spawned {} asteroids", world.level, spawned);
    spawned
}

/// Draw an asteroid on a random edge, redrawing while it overlaps the ship.
/// The last candidate is kept if every attempt collides.
fn place_asteroid<R: Rng>(rng: &mut R, bounds: Vec2, ship: &Ship) -> Asteroid {
    let keep_clear = ship.hit_radius() + SHIP_RADIUS;
    let mut candidate = random_edge_asteroid(rng, bounds);
    for _ in 1..SPAWN_ATTEMPTS {
        if !circles_touch(candidate.pos, candidate.radius, ship.pos, keep_clear) {
            break;
        }
        log::debug!("Spawn candidate overlapped the ship, redrawing");
        candidate = random_edge_asteroid(rng, bounds);
    }
    candidate
}

/// Random radius, edge and drift. Drift is always toward +x and +y.
pub fn random_edge_asteroid<R: Rng>(rng: &mut R, bounds: Vec2) -> Asteroid {
    let radius = rng.random_range(ASTEROID_RADIUS_MIN..=ASTEROID_RADIUS_MAX);
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let pos = edge_position(rng, edge, radius, bounds);
    let vel = Vec2::new(
        rng.random_range(ASTEROID_SPEED_MIN..=ASTEROID_SPEED_MAX),
        rng.random_range(ASTEROID_SPEED_MIN..=ASTEROID_SPEED_MAX),
    );
    Asteroid::new(pos, vel, radius)
}

/// Position on `edge`, inset by radius plus grace on the fixed axis
pub fn edge_position<R: Rng>(rng: &mut R, edge: Edge, radius: f32, bounds: Vec2) -> Vec2 {
    let inset = radius + GRACE_SPACING;
    match edge {
        // Top draws across the full width, so it can land nearer a corner
        // than the other edges allow
        Edge::Top => Vec2::new(draw_along(rng, bounds.x) + radius, inset),
        Edge::Right => Vec2::new(
            bounds.x - inset,
            draw_along(rng, bounds.y - 2.0 * radius) + radius,
        ),
        Edge::Bottom => Vec2::new(
            draw_along(rng, bounds.x - 2.0 * radius) + radius,
            bounds.y - inset,
        ),
        Edge::Left => Vec2::new(inset, draw_along(rng, bounds.y - 2.0 * radius) + radius),
    }
}

fn draw_along<R: Rng>(rng: &mut R, span: f32) -> f32 {
    if span > 0.0 {
        rng.random_range(0.0..span)
    } else {
        0.0
    }
}
