//! Collision detection and response
//!
//! Three passes run in a fixed order each tick:
//! 1. ship vs asteroid (ends the game and the pass immediately)
//! 2. bullet vs asteroid (destroys or splits the asteroid)
//! 3. asteroid vs asteroid (elastic bounce with de-overlap)
//!
//! Passes 1 and 2 share the asteroid loop, so a ship hit on asteroid `i`
//! stops bullet checks for every asteroid after it.

use std::f32::consts::SQRT_2;

use glam::Vec2;

use super::motion::contain_asteroid;
use super::state::{Asteroid, GamePhase, World};
use crate::consts::*;

/// Result of a circle-circle overlap check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first centre toward the second
    pub normal: Vec2,
    /// Distance between centres
    pub distance: f32,
    /// Radius sum minus distance
    pub penetration: f32,
}

/// Inclusive overlap test (touching counts)
#[inline]
pub fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let sum = ra + rb;
    a.distance_squared(b) <= sum * sum
}

/// Strict overlap test with contact data; tangency and coincident centres
/// produce no contact
pub fn circle_contact(a: Vec2, ra: f32, b: Vec2, rb: f32) -> Option<Contact> {
    let sum = ra + rb;
    let delta = b - a;
    let dist_sq = delta.length_squared();
    if dist_sq >= sum * sum {
        return None;
    }
    let distance = dist_sq.sqrt();
    if distance == 0.0 {
        return None;
    }
    Some(Contact {
        normal: delta / distance,
        distance,
        penetration: sum - distance,
    })
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Run every collision pass for this tick
pub fn resolve_collisions(world: &mut World) {
    if ship_and_bullet_pass(world) {
        return;
    }
    asteroid_pass(world);
}

/// Ship and bullet hits. Returns true when the ship was destroyed, in which
/// case nothing after the fatal asteroid is examined.
///
/// Only asteroids that were live when the pass began are scanned. Fragments
/// appended by a split sit past `end` and wait for the next tick.
fn ship_and_bullet_pass(world: &mut World) -> bool {
    let bounds = world.bounds();
    let ship_pos = world.ship.pos;
    let ship_radius = world.ship.hit_radius();
    let asteroids = &mut world.asteroids;
    let bullets = &mut world.bullets;

    let mut end = asteroids.len();
    let mut i = 0;
    'asteroids: while i < end {
        let asteroid = asteroids[i];

        if circles_touch(ship_pos, ship_radius, asteroid.pos, asteroid.radius) {
            log::info!(
                "Ship destroyed by asteroid r={:.1} at ({:.1}, {:.1})",
                asteroid.radius,
                asteroid.pos.x,
                asteroid.pos.y
            );
            world.phase = GamePhase::GameOver;
            return true;
        }

        let mut j = 0;
        while j < bullets.len() {
            if !circles_touch(bullets[j].pos, BULLET_RADIUS, asteroid.pos, asteroid.radius) {
                j += 1;
                continue;
            }
            bullets.remove_swap(j);

            if asteroid.radius < ASTEROID_SPLIT_THRESHOLD {
                // Fill slot i from the last unscanned asteroid, then let the
                // tail fragment (if any) drop into the hole left at end - 1
                end -= 1;
                asteroids.swap(i, end);
                asteroids.remove_swap(end);
                continue 'asteroids;
            }

            let [mut first, mut second] = split_asteroid(&asteroid);
            contain_asteroid(&mut first, bounds);
            contain_asteroid(&mut second, bounds);
            asteroids[i] = first;
            if asteroids.try_push(second).is_err() {
                log::warn!("Asteroid slots full, split dropped its second fragment");
            }
            i += 1;
            continue 'asteroids;
        }

        i += 1;
    }

    false
}

/// Break an asteroid into two fragments of radius r/√2 pushed apart
/// perpendicular to its motion
pub fn split_asteroid(parent: &Asteroid) -> [Asteroid; 2] {
    let n = parent.vel.normalize_or_zero();
    let perp = Vec2::new(n.y, -n.x);
    let radius = parent.radius / SQRT_2;

    [
        Asteroid::new(
            parent.pos + parent.radius * perp / SQRT_2,
            parent.vel + perp,
            radius,
        ),
        Asteroid::new(parent.pos - parent.radius * perp, parent.vel - perp, radius),
    ]
}

/// Bounce every overlapping asteroid pair once
fn asteroid_pass(world: &mut World) {
    let bounds = world.bounds();
    let asteroids = world.asteroids.as_mut_slice();
    let count = asteroids.len();

    for i in 0..count {
        for j in (i + 1)..count {
            let (head, tail) = asteroids.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];
            if bounce_pair(a, b) {
                contain_asteroid(a, bounds);
                contain_asteroid(b, bounds);
            }
        }
    }
}

/// Separate two overlapping asteroids and exchange momentum along the
/// contact normal, with mass proportional to radius². Returns true if the
/// pair overlapped.
pub fn bounce_pair(a: &mut Asteroid, b: &mut Asteroid) -> bool {
    let Some(contact) = circle_contact(a.pos, a.radius, b.pos, b.radius) else {
        return false;
    };
    let n = contact.normal;

    let push = SEPARATION_FACTOR * (contact.penetration + SEPARATION_BIAS) / 2.0;
    a.pos -= n * push;
    b.pos += n * push;

    let approach = (b.vel - a.vel).dot(n);
    if approach >= 0.0 {
        return true;
    }

    let (ma, mb) = (a.mass(), b.mass());
    let total = ma + mb;
    a.vel += n * (2.0 * mb / total) * approach;
    b.vel -= n * (2.0 * ma / total) * approach;
    true
}
