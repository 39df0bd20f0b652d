//! Frame controller
//!
//! Drives one simulation step and exposes the commands the platform layer
//! feeds in from input events: steering, firing, phase changes, resizing.

use super::collision::resolve_collisions;
use super::motion::{contain_asteroid, contain_ship, integrate};
use super::spawn::spawn_level;
use super::state::{Bullet, GamePhase, Ship, ThrustIntent, TurnIntent, World};
use crate::consts::*;
use crate::heading_vector;

/// Phase change requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Leave the title screen
    Start,
    Pause,
    Resume,
    /// Start over after a game over (or from pause)
    Restart,
    Quit,
}

/// Whether the host should keep running after a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Advance the world by one step. Does nothing unless playing.
pub fn tick(world: &mut World) {
    if world.phase != GamePhase::Playing {
        return;
    }

    if world.asteroids.is_empty() {
        world.level += 1;
        spawn_level(world);
    }

    integrate(world);
    resolve_collisions(world);
}

impl World {
    /// Fire a bullet from the ship's nose direction. Returns false when
    /// every bullet slot is taken.
    pub fn fire(&mut self) -> bool {
        let bullet = Bullet {
            pos: self.ship.pos,
            vel: heading_vector(self.ship.heading) * BULLET_VELOCITY,
            heading: self.ship.heading as f32,
        };
        match self.bullets.try_push(bullet) {
            Ok(()) => true,
            Err(_) => {
                log::debug!("Fire rejected: {} bullets live", self.bullets.len());
                false
            }
        }
    }

    pub fn set_turn(&mut self, turn: TurnIntent) {
        self.ship.turn = turn;
    }

    pub fn set_thrust(&mut self, thrust: ThrustIntent) {
        self.ship.thrust = thrust;
    }

    /// Apply a phase change. Requests that make no sense in the current
    /// phase are ignored.
    pub fn request(&mut self, request: Request) -> Flow {
        let next = match (request, self.phase) {
            (Request::Quit, _) => {
                log::info!("Quit requested in {:?}", self.phase);
                return Flow::Quit;
            }
            (Request::Start, GamePhase::Menu) => GamePhase::Playing,
            (Request::Pause, GamePhase::Playing) => GamePhase::Paused,
            (Request::Resume, GamePhase::Paused) => GamePhase::Playing,
            (Request::Restart, GamePhase::GameOver | GamePhase::Paused) => {
                self.reset();
                GamePhase::Playing
            }
            (request, phase) => {
                log::debug!("Ignoring {:?} while {:?}", request, phase);
                return Flow::Continue;
            }
        };

        log::info!("Phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        Flow::Continue
    }

    /// Change the playfield size, pulling the ship and every asteroid back
    /// inside the new bounds. Sizes below `min_playfield_extent` leave the
    /// largest asteroids pinned to the far edge rather than fully inside.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        let bounds = self.bounds();

        contain_ship(&mut self.ship, bounds);
        for asteroid in self.asteroids.iter_mut() {
            contain_asteroid(asteroid, bounds);
        }
        log::info!("Playfield resized to {}x{}", width, height);
    }

    /// Return to the starting state without touching storage capacity.
    /// The phase is left to the caller.
    pub fn reset(&mut self) {
        self.asteroids.clear();
        self.bullets.clear();
        self.level = 0;
        self.ship = Ship::new(self.width, self.height);
        log::info!("World reset");
    }

    /// Release all entity storage
    pub fn teardown(self) {
        log::info!(
            "Releasing {} asteroid and {} bullet slots",
            self.asteroids.capacity(),
            self.bullets.capacity()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::state::Asteroid;
    use glam::Vec2;

    fn playing() -> World {
        let mut world = World::new(&Settings::with_seed(12345)).unwrap();
        world.request(Request::Start);
        world
    }

    #[test]
    fn test_tick_only_runs_while_playing() {
        let mut world = World::new(&Settings::with_seed(12345)).unwrap();
        tick(&mut world);
        assert_eq!(world.level, 0);
        assert!(world.asteroids.is_empty());

        world.request(Request::Start);
        assert_eq!(world.phase, GamePhase::Playing);
        tick(&mut world);
        assert_eq!(world.level, 1);
        assert_eq!(world.asteroids.len(), 2);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut world = playing();
        tick(&mut world);
        world.request(Request::Pause);
        assert_eq!(world.phase, GamePhase::Paused);

        let before = world.snapshot();
        tick(&mut world);
        assert_eq!(world.snapshot(), before);

        world.request(Request::Resume);
        assert_eq!(world.phase, GamePhase::Playing);
    }

    #[test]
    fn test_invalid_requests_are_ignored() {
        let mut world = World::new(&Settings::with_seed(1)).unwrap();
        assert_eq!(world.request(Request::Pause), Flow::Continue);
        assert_eq!(world.phase, GamePhase::Menu);
        assert_eq!(world.request(Request::Resume), Flow::Continue);
        assert_eq!(world.phase, GamePhase::Menu);
        assert_eq!(world.request(Request::Quit), Flow::Quit);
    }

    #[test]
    fn test_restart_after_game_over_resets() {
        let mut world = playing();
        tick(&mut world);
        world.phase = GamePhase::GameOver;
        world.ship.heading = 90;
        world.request(Request::Restart);
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.level, 0);
        assert!(world.asteroids.is_empty());
        assert_eq!(world.ship, Ship::new(world.width, world.height));
    }

    #[test]
    fn test_fire_direction_and_capacity() {
        let mut world = playing();
        world.ship.heading = 90;
        assert!(world.fire());
        let bullet = world.bullets[0];
        assert!((bullet.vel - Vec2::new(BULLET_VELOCITY, 0.0)).length() < 1e-4);
        assert_eq!(bullet.pos, world.ship.pos);
        assert_eq!(bullet.heading, 90.0);

        while world.bullets.len() < world.bullets.capacity() {
            assert!(world.fire());
        }
        let before: Vec<_> = world.bullets.as_slice().to_vec();
        assert!(!world.fire());
        assert_eq!(world.bullets.as_slice(), before.as_slice());
    }

    #[test]
    fn test_resize_reclamps_entities() {
        let mut world = playing();
        world.ship.pos = Vec2::new(780.0, 590.0);
        world
            .asteroids
            .try_push(Asteroid::new(Vec2::new(700.0, 500.0), Vec2::ONE, 30.0))
            .unwrap();
        world.resize(400.0, 300.0);
        assert_eq!(world.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(world.asteroids[0].pos, Vec2::new(370.0, 270.0));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut world = playing();
        for _ in 0..30 {
            world.set_thrust(ThrustIntent::Accelerating);
            world.set_turn(TurnIntent::Clockwise);
            world.fire();
            tick(&mut world);
        }
        world.reset();
        let first = world.snapshot();
        world.reset();
        assert_eq!(world.snapshot(), first);
        assert_eq!(first.level, 0);
        assert!(first.asteroids.is_empty() && first.bullets.is_empty());
        assert_eq!(world.asteroids.capacity(), 40);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing();
        let mut b = playing();
        for step in 0..120 {
            for world in [&mut a, &mut b] {
                world.set_turn(if step % 40 < 20 {
                    TurnIntent::Clockwise
                } else {
                    TurnIntent::Still
                });
                if step % 7 == 0 {
                    world.fire();
                }
                tick(world);
            }
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
