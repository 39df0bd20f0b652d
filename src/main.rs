//! Rock Drift headless entry point
//!
//! Stands in for the windowed host: loads settings, drives the simulation at
//! a fixed timestep with a scripted pilot instead of keyboard input, and dumps
//! the final world snapshot as JSON.
//!
//! Usage: `rock-drift [settings.json] [--frames N]`

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

use rock_drift::Settings;
use rock_drift::consts::*;
use rock_drift::sim::{Flow, GamePhase, Request, ThrustIntent, TurnIntent, World, tick};

/// Frames simulated when none are given
const DEFAULT_FRAMES: u64 = 60 * 60;
/// Restarts the pilot gets before the run ends
const MAX_RESTARTS: u32 = 3;

/// Headless asteroid run with a scripted pilot
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Parser)]
#[command(name = "rock-drift", version, about)]
struct Cli {
    /// JSON settings file; defaults are used when omitted
    settings: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,
}

/// Scripted input: sweep the nose around, pulse the throttle, fire steadily
struct Pilot {
    frame: u64,
}

impl Pilot {
    fn drive(&mut self, world: &mut World) {
        self.frame += 1;
        let turn = match (self.frame / 90) % 3 {
            0 => TurnIntent::Clockwise,
            1 => TurnIntent::Still,
            _ => TurnIntent::CounterClockwise,
        };
        world.set_turn(turn);

        let thrust = if (self.frame / 120) % 2 == 0 {
            ThrustIntent::Accelerating
        } else {
            ThrustIntent::Decelerating
        };
        world.set_thrust(thrust);

        if self.frame % 8 == 0 {
            world.fire();
        }
    }
}

fn run(world: &mut World, frames: u64) {
    let mut pilot = Pilot { frame: 0 };
    let mut accumulator = 0.0f32;
    let mut restarts = 0;
    // Frames run a little longer than a step, so every fourth frame catches
    // up with a second substep
    let frame_dt = SIM_DT * 1.25;

    world.request(Request::Start);

    for frame in 0..frames {
        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            pilot.drive(world);
            tick(world);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        if world.phase == GamePhase::GameOver {
            log::info!("Game over on frame {} at level {}", frame, world.level);
            if restarts == MAX_RESTARTS {
                break;
            }
            restarts += 1;
            world.request(Request::Restart);
        }
    }

    if world.request(Request::Quit) == Flow::Quit {
        log::info!("Pilot finished after {} restarts", restarts);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let cli = Cli::parse();
    env_logger::init();
    log::info!("Rock Drift (headless) starting...");

    let settings = match &cli.settings {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut world = match World::new(&settings) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    run(&mut world, cli.frames);

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode snapshot: {}", e),
    }
    world.teardown();
}


#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host yet
}
