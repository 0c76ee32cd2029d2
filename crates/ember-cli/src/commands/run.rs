//! Run command — headless fixed-rate simulation of a level

use crate::level::{LevelFile, ScriptFile};
use anyhow::{Context, Result};
use ember_core::EmberError;
use ember_physics::PhysicsSystem;
use ember_runtime::{GameClock, InputState, RuntimeSystem};

pub struct RunArgs {
    pub level: String,
    pub script: Option<String>,
    pub ticks: u64,
    pub rate: f64,
    pub format: String,
    pub events_only: bool,
}

pub fn run(args: RunArgs) -> Result<()> {
    let level = LevelFile::load(&args.level)
        .with_context(|| format!("Failed to load level '{}'", args.level))?;

    let violations = level.validate();
    if !violations.is_empty() {
        for v in &violations {
            eprintln!("violation: {}", v);
        }
        return Err(EmberError::InvalidLevel(format!(
            "'{}' failed validation with {} violation(s)",
            args.level,
            violations.len()
        ))
        .into());
    }

    let script = match &args.script {
        Some(path) => Some(
            ScriptFile::load(path)
                .with_context(|| format!("Failed to load script '{}'", path))?,
        ),
        None => None,
    };

    let json = args.format == "json";
    let tuning = level.tuning.clone().unwrap_or_default();
    let mut physics = PhysicsSystem::new(level.collision_world(), tuning);
    let player = physics.spawn_player(level.spawn_body());
    for (body, speed) in level.patrol_actors() {
        physics.spawn_patrol(body, speed);
    }

    let mut clock = GameClock::with_rate(args.rate);
    let mut input = InputState::new();
    physics.initialize()?;

    if !json {
        println!("Level: {}", level.level.name);
        println!(
            "Rects: {}  Actors: {}  Rate: {}Hz",
            physics.world().len(),
            physics.actor_count(),
            args.rate
        );
        println!();
    }

    for tick in 0..args.ticks {
        if let Some(script) = &script {
            script.apply(tick, &mut input);
        }

        clock.advance(clock.fixed_dt());
        while clock.step_ready() {
            physics.fixed_update(&input, clock.fixed_dt())?;
            clock.consume_step();
        }
        physics.update(&input, clock.delta_time())?;
        input.end_frame();

        let events = physics.events.drain();
        if args.events_only && events.is_empty() {
            continue;
        }

        let body = physics
            .body(player)
            .context("player actor disappeared mid-run")?;
        if json {
            let line = serde_json::json!({
                "tick": tick,
                "position": [body.position.x, body.position.y],
                "velocity": [body.velocity.x, body.velocity.y],
                "grounded": body.on_ground,
                "events": events,
            });
            println!("{}", line);
        } else {
            println!(
                "tick={:<5} pos=({:8.2},{:8.2}) vel=({:8.2},{:8.2}) grounded={}",
                tick,
                body.position.x,
                body.position.y,
                body.velocity.x,
                body.velocity.y,
                body.on_ground
            );
            for event in &events {
                println!("tick={:<5} event={:?}", tick, event);
            }
        }
    }

    physics.shutdown()?;
    if !json {
        println!();
        println!("Simulated {} ticks at {}Hz", args.ticks, args.rate);
    }
    Ok(())
}
