//! Per-tick motion integration
//!
//! One call advances one fixed step; there is no dt parameter. Boundary
//! policy differs per entity: the ship stops at an edge, bullets leaving the
//! playfield are dropped, asteroids reflect.

use glam::Vec2;

use super::collision::reflect_velocity;
use super::state::{Asteroid, Ship, ThrustIntent, TurnIntent, World};
use crate::consts::*;
use crate::{heading_vector, wrap_heading};

/// Advance every entity by one tick
pub fn integrate(world: &mut World) {
    let bounds = world.bounds();
    step_ship(&mut world.ship, bounds);
    step_bullets(world);
    step_asteroids(world);
}

/// Turn, accelerate and move the ship. An axis that would leave the
/// playfield does not move this tick.
pub fn step_ship(ship: &mut Ship, bounds: Vec2) {
    match ship.turn {
        TurnIntent::Still => {}
        TurnIntent::Clockwise => {
            ship.heading = wrap_heading(ship.heading + ROTATION_SPEED);
        }
        TurnIntent::CounterClockwise => {
            ship.heading = wrap_heading(ship.heading + 360 - ROTATION_SPEED);
        }
    }

    match ship.thrust {
        ThrustIntent::Constant => {}
        ThrustIntent::Accelerating => {
            if ship.speed < MAX_SPEED {
                ship.speed = (ship.speed + SPEED_ACCEL).min(MAX_SPEED);
            }
        }
        ThrustIntent::Decelerating => {
            if ship.speed > MIN_SPEED {
                // Fractional steps can land just below a zero floor
                ship.speed = (ship.speed - SPEED_ACCEL).max(MIN_SPEED);
            }
        }
    }

    let delta = heading_vector(ship.heading) * ship.speed;
    let next = ship.pos + delta;
    if (0.0..=bounds.x).contains(&next.x) {
        ship.pos.x = next.x;
    }
    if (0.0..=bounds.y).contains(&next.y) {
        ship.pos.y = next.y;
    }
}

/// Move bullets and drop any at or past an edge
pub fn step_bullets(world: &mut World) {
    let bounds = world.bounds();
    let bullets = &mut world.bullets;
    let mut i = 0;
    while i < bullets.len() {
        let bullet = &mut bullets[i];
        bullet.pos += bullet.vel;
        let p = bullet.pos;
        if p.x <= 0.0 || p.x >= bounds.x || p.y <= 0.0 || p.y >= bounds.y {
            // Slot i now holds the former last bullet, which still needs a step
            bullets.remove_swap(i);
            continue;
        }
        i += 1;
    }
}

/// Move asteroids, reflecting off edges
pub fn step_asteroids(world: &mut World) {
    let bounds = world.bounds();
    for asteroid in world.asteroids.iter_mut() {
        asteroid.pos += asteroid.vel;
        bounce_off_edges(asteroid, bounds);
    }
}

/// Reflect an asteroid that came within one radius of an edge and park it
/// a grace distance inside that edge
pub fn bounce_off_edges(asteroid: &mut Asteroid, bounds: Vec2) {
    let r = asteroid.radius;

    if asteroid.pos.x <= r {
        asteroid.vel = reflect_inward(asteroid.vel, Vec2::X);
        asteroid.pos.x = r + GRACE_SPACING;
    } else if asteroid.pos.x >= bounds.x - r {
        asteroid.vel = reflect_inward(asteroid.vel, Vec2::NEG_X);
        asteroid.pos.x = bounds.x - r - GRACE_SPACING;
    }

    if asteroid.pos.y <= r {
        asteroid.vel = reflect_inward(asteroid.vel, Vec2::Y);
        asteroid.pos.y = r + GRACE_SPACING;
    } else if asteroid.pos.y >= bounds.y - r {
        asteroid.vel = reflect_inward(asteroid.vel, Vec2::NEG_Y);
        asteroid.pos.y = bounds.y - r - GRACE_SPACING;
    }
}

/// Flip the velocity component along `normal`, but only while it still
/// points into the wall. An asteroid already moving away (nudged into the
/// edge band by a collision) keeps its heading instead of being sent back
/// into the wall.
fn reflect_inward(vel: Vec2, normal: Vec2) -> Vec2 {
    if vel.dot(normal) < 0.0 {
        reflect_velocity(vel, normal)
    } else {
        vel
    }
}

/// Pull an asteroid fully inside the playfield without touching its velocity
pub fn contain_asteroid(asteroid: &mut Asteroid, bounds: Vec2) {
    let r = asteroid.radius;
    asteroid.pos.x = asteroid.pos.x.max(r).min(bounds.x - r);
    asteroid.pos.y = asteroid.pos.y.max(r).min(bounds.y - r);
}

/// Pull the ship inside the playfield
pub fn contain_ship(ship: &mut Ship, bounds: Vec2) {
    ship.pos.x = ship.pos.x.max(0.0).min(bounds.x);
    ship.pos.y = ship.pos.y.max(0.0).min(bounds.y);
}
