//! End-to-end scenarios through the public API.

use glam::Vec2;

use rock_drift::Settings;
use rock_drift::consts::*;
use rock_drift::sim::{
    Asteroid, GamePhase, Request, ThrustIntent, TurnIntent, World, level_population,
    resolve_collisions, spawn_level, tick,
};

fn started(seed: u64) -> World {
    let mut world = World::new(&Settings::with_seed(seed)).unwrap();
    world.request(Request::Start);
    world
}

fn on_an_edge(a: &Asteroid, world: &World) -> bool {
    let inset = a.radius + GRACE_SPACING;
    let near = |v: f32, target: f32| (v - target).abs() < 1e-4;
    near(a.pos.y, inset)
        || near(a.pos.x, world.width - inset)
        || near(a.pos.y, world.height - inset)
        || near(a.pos.x, inset)
}

#[test]
fn head_on_equal_asteroids_exchange_velocity() {
    let mut world = started(1);
    world.ship.pos = Vec2::new(700.0, 550.0);
    world
        .asteroids
        .try_push(Asteroid::new(Vec2::new(200.0, 200.0), Vec2::new(5.0, 0.0), 20.0))
        .unwrap();
    world
        .asteroids
        .try_push(Asteroid::new(Vec2::new(239.0, 200.0), Vec2::new(-5.0, 0.0), 20.0))
        .unwrap();

    resolve_collisions(&mut world);

    let a = world.asteroids[0];
    let b = world.asteroids[1];
    assert!((a.pos.x - 199.4).abs() < 1e-4);
    assert!((b.pos.x - 239.6).abs() < 1e-4);
    assert!((a.vel.x + 5.0).abs() < 1e-4 && a.vel.y.abs() < 1e-6);
    assert!((b.vel.x - 5.0).abs() < 1e-4 && b.vel.y.abs() < 1e-6);
}

#[test]
fn tangent_asteroids_do_not_collide() {
    let mut world = started(1);
    world.ship.pos = Vec2::new(700.0, 550.0);
    let a = Asteroid::new(Vec2::new(200.0, 200.0), Vec2::new(1.0, 0.0), 20.0);
    let b = Asteroid::new(Vec2::new(240.0, 200.0), Vec2::new(-1.0, 0.0), 20.0);
    world.asteroids.try_push(a).unwrap();
    world.asteroids.try_push(b).unwrap();

    resolve_collisions(&mut world);

    assert_eq!(world.asteroids[0], a);
    assert_eq!(world.asteroids[1], b);
}

#[test]
fn spawner_population_and_placement_per_level() {
    for level in [1, 4, 9, 12, 30] {
        let mut world = started(u64::from(level));
        world.level = level;
        let spawned = spawn_level(&mut world);

        let expected = level_population(level, MIN_ASTEROIDS, MAX_ASTEROIDS) as usize;
        assert_eq!(spawned, expected);
        assert_eq!(expected, (level + MIN_ASTEROIDS).min(MAX_ASTEROIDS) as usize);
        for a in world.asteroids.iter() {
            assert!((ASTEROID_RADIUS_MIN..=ASTEROID_RADIUS_MAX).contains(&a.radius));
            assert!(on_an_edge(a, &world), "{:?} is not on an edge", a);
            assert!(a.vel.x >= ASTEROID_SPEED_MIN && a.vel.y >= ASTEROID_SPEED_MIN);
        }
    }
}

#[test]
fn clearing_a_level_spawns_the_next() {
    let mut world = started(8);
    tick(&mut world);
    assert_eq!(world.level, 1);

    world.asteroids.clear();
    tick(&mut world);
    assert_eq!(world.level, 2);
    assert_eq!(world.asteroids.len(), 3);
}

#[test]
fn fire_at_capacity_is_rejected() {
    let mut world = started(2);
    for _ in 0..world.bullets.capacity() {
        assert!(world.fire());
    }
    let before = world.snapshot();
    assert!(!world.fire());
    assert_eq!(world.snapshot(), before);
}

#[test]
fn bullets_fly_off_and_free_their_slots() {
    let mut world = started(3);
    world.ship.heading = 270;
    for _ in 0..world.bullets.capacity() {
        world.fire();
    }
    // One idle asteroid away from the firing line keeps the spawner quiet
    world.asteroids.try_push(Asteroid::new(Vec2::new(60.0, 60.0), Vec2::ZERO, 15.0)).unwrap();
    for _ in 0..50 {
        tick(&mut world);
    }
    assert!(world.bullets.is_empty());
    assert!(world.fire());
}

#[test]
fn pilot_session_stays_consistent() {
    let mut world = started(99);
    world.set_thrust(ThrustIntent::Accelerating);
    world.set_turn(TurnIntent::CounterClockwise);
    for step in 0..600 {
        if step % 5 == 0 {
            world.fire();
        }
        tick(&mut world);
        if world.phase == GamePhase::GameOver {
            break;
        }
    }
    assert!(world.ship.speed <= MAX_SPEED);
    assert!(world.asteroids.len() <= world.asteroids.capacity());
    assert!(world.level >= 1);
}

#[test]
fn reset_twice_gives_same_state() {
    let mut world = started(6);
    for _ in 0..20 {
        world.fire();
        tick(&mut world);
    }
    world.reset();
    let first = world.snapshot();
    world.reset();
    assert_eq!(world.snapshot(), first);
}

#[test]
fn teardown_consumes_world() {
    let world = started(4);
    world.teardown();
}
