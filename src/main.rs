//! Headless demo runner
//!
//! Drives a scenario without a window: scripts a cast (or a boat run), ticks
//! the simulation at its fixed step and prints body positions periodically.
//! Usage:
//!
//! ```text
//! lurecast [throw|lure|boat|scenario.json] [steps]
//! ```

use glam::Vec2;
use std::time::Instant;

use lurecast::{InputEvent, Key, ScenarioConfig, SimEvent, Simulation, Variant};

const DEFAULT_STEPS: u64 = 600;
const PRINT_INTERVAL: u64 = 30;

fn load_config(arg: Option<&str>) -> ScenarioConfig {
    let Some(arg) = arg else {
        return ScenarioConfig::lure();
    };
    if arg.ends_with(".json") {
        let text = match std::fs::read_to_string(arg) {
            Ok(text) => text,
            Err(err) => {
                log::error!("failed to read scenario {arg}: {err}");
                std::process::exit(1);
            }
        };
        match ScenarioConfig::from_json(&text) {
            Ok(config) => config,
            Err(err) => {
                log::error!("invalid scenario {arg}: {err}");
                std::process::exit(1);
            }
        }
    } else {
        match Variant::from_str(arg) {
            Some(variant) => ScenarioConfig::preset(variant),
            None => {
                log::error!("unknown variant {arg:?} (expected throw, lure or boat)");
                std::process::exit(1);
            }
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str));
    let steps = args
        .get(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(DEFAULT_STEPS);

    println!(
        "Running {} scenario for {steps} ticks...",
        config.variant.as_str()
    );

    let start_time = Instant::now();
    let mut sim = Simulation::new(&config);
    let viewport = *sim.viewport();

    match config.variant {
        Variant::Throw | Variant::Lure => {
            // Script a cast: press at (5,5), drag to (7,6), release
            sim.handle_event(InputEvent::PointerDown(
                viewport.world_to_screen(Vec2::new(5.0, 5.0)),
            ));
            sim.handle_event(InputEvent::PointerMove(
                viewport.world_to_screen(Vec2::new(7.0, 6.0)),
            ));
            sim.handle_event(InputEvent::PointerUp);
        }
        Variant::Boat => {
            // Cruise right with the line dropping
            sim.handle_event(InputEvent::KeyDown(Key::Right));
            sim.handle_event(InputEvent::PointerDown(Vec2::ZERO));
        }
    }

    for step in 0..steps {
        sim.tick();

        for event in sim.drain_events() {
            match event {
                SimEvent::Launched { velocity } => {
                    println!("tick {step:>4}: launched ({:+.2}, {:+.2})", velocity.x, velocity.y);
                }
                SimEvent::EnteredWater => println!("tick {step:>4}: splash"),
                SimEvent::LeftWater => println!("tick {step:>4}: out of the water"),
                SimEvent::DepthReached => println!("tick {step:>4}: resting at target depth"),
            }
        }

        if step % PRINT_INTERVAL == 0 || step == steps - 1 {
            let snapshot = sim.snapshot();
            if let Some(throwable) = snapshot.throwable {
                println!(
                    "tick {step:>4}: throwable=({:+.2}, {:+.2})",
                    throwable.position.x, throwable.position.y
                );
            }
            if let (Some(boat), Some(line)) = (snapshot.boat, snapshot.line) {
                println!(
                    "tick {step:>4}: boat=({:+.2}, {:+.2}) line=({:+.2}, {:+.2}) fish={}",
                    boat.position.x,
                    boat.position.y,
                    line.position.x,
                    line.position.y,
                    snapshot.fish.len()
                );
            }
        }
    }

    let duration = start_time.elapsed();
    println!("Simulation complete.");
    println!("Total time: {:.2} seconds", duration.as_secs_f64());
    println!(
        "Ticks per second: {:.2}",
        steps as f64 / duration.as_secs_f64()
    );
}
