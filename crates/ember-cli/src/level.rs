//! Level and intent-script file formats
//!
//! Levels and scripts are TOML. Parsing and structural validation happen
//! here, outside the simulation core: by the time a `CollisionWorld` is
//! built, the data is known good.

use ember_core::{EmberError, Rect, Result, Vec2};
use ember_physics::{BodyTuning, CollisionWorld, KinematicBody, StaticRect, SurfaceKind};
use ember_runtime::InputState;
use serde::Deserialize;
use std::path::Path;
use winit::keyboard::KeyCode;

/// Root structure of a level TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct LevelFile {
    pub level: LevelMeta,
    #[serde(default)]
    pub tuning: Option<BodyTuning>,
    pub spawn: SpawnDef,
    #[serde(default)]
    pub rects: Vec<RectDef>,
    #[serde(default)]
    pub patrols: Vec<PatrolDef>,
}

/// Level metadata
#[derive(Debug, Clone, Deserialize)]
pub struct LevelMeta {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Where and how large the player body spawns
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpawnDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// One static rect of level geometry
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RectDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub kind: SurfaceKind,
}

/// A patrolling actor: body placement plus walk speed
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PatrolDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
}

impl LevelFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Structural checks applied before the level reaches the simulation.
    /// Returns one message per violation; empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.level.name.trim().is_empty() {
            violations.push("level name must not be empty".into());
        }

        for (i, r) in self.rects.iter().enumerate() {
            if !(r.x.is_finite() && r.y.is_finite() && r.w.is_finite() && r.h.is_finite()) {
                violations.push(format!("rects[{}]: coordinates must be finite", i));
            }
            if r.w <= 0.0 || r.h <= 0.0 {
                violations.push(format!("rects[{}]: width and height must be positive", i));
            }
        }

        if !self.rects.iter().any(|r| r.kind.is_solid()) {
            violations.push("level needs at least one solid rect".into());
        }

        if self.spawn.w <= 0.0 || self.spawn.h <= 0.0 {
            violations.push("spawn: width and height must be positive".into());
        }
        let spawn_rect = Rect::new(self.spawn.x, self.spawn.y, self.spawn.w, self.spawn.h);
        for (i, r) in self.rects.iter().enumerate() {
            let rect = Rect::new(r.x, r.y, r.w, r.h);
            if r.kind.is_solid() && spawn_rect.intersects(&rect) {
                violations.push(format!("spawn is embedded in solid rects[{}]", i));
            }
        }

        for (i, p) in self.patrols.iter().enumerate() {
            if !(p.speed.is_finite() && p.speed > 0.0) {
                violations.push(format!("patrols[{}]: speed must be positive", i));
            }
            if p.w <= 0.0 || p.h <= 0.0 {
                violations.push(format!("patrols[{}]: width and height must be positive", i));
            }
        }

        violations
    }

    /// Build the collision world in file order
    pub fn collision_world(&self) -> CollisionWorld {
        CollisionWorld::new(
            self.rects
                .iter()
                .map(|r| StaticRect::new(Rect::new(r.x, r.y, r.w, r.h), r.kind))
                .collect(),
        )
    }

    /// The player body at its spawn point
    pub fn spawn_body(&self) -> KinematicBody {
        KinematicBody::new(
            Vec2::new(self.spawn.x, self.spawn.y),
            Vec2::new(self.spawn.w, self.spawn.h),
        )
    }

    /// Bodies and walk speeds for the level's patrolling actors
    pub fn patrol_actors(&self) -> Vec<(KinematicBody, f32)> {
        self.patrols
            .iter()
            .map(|p| {
                (
                    KinematicBody::new(Vec2::new(p.x, p.y), Vec2::new(p.w, p.h)),
                    p.speed,
                )
            })
            .collect()
    }
}

/// Root structure of an intent script TOML file.
///
/// Each step sets input state from its tick onward, so a held direction
/// persists until a later step changes it — the same way real keys behave.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptFile {
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

/// One input change at a given tick
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScriptStep {
    pub tick: u64,
    #[serde(default)]
    pub move_axis: Option<i8>,
    #[serde(default)]
    pub jump: Option<bool>,
}

impl ScriptFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let script: ScriptFile = toml::from_str(&text)?;
        for (i, step) in script.steps.iter().enumerate() {
            if let Some(axis) = step.move_axis {
                if !(-1..=1).contains(&axis) {
                    return Err(EmberError::ValueOutOfRange {
                        field: format!("steps[{}].move_axis", i),
                        min: -1.0,
                        max: 1.0,
                        value: axis as f64,
                    });
                }
            }
        }
        Ok(script)
    }

    /// Replay the steps scheduled for `tick` as synthetic key events, so
    /// the scripted run exercises the same sampling path as live input
    pub fn apply(&self, tick: u64, input: &mut InputState) {
        for step in self.steps.iter().filter(|s| s.tick == tick) {
            match step.move_axis {
                Some(-1) => {
                    input.process_key_up(KeyCode::ArrowRight);
                    input.process_key_down(KeyCode::ArrowLeft);
                }
                Some(1) => {
                    input.process_key_up(KeyCode::ArrowLeft);
                    input.process_key_down(KeyCode::ArrowRight);
                }
                Some(_) => {
                    input.process_key_up(KeyCode::ArrowLeft);
                    input.process_key_up(KeyCode::ArrowRight);
                }
                None => {}
            }
            match step.jump {
                Some(true) => input.process_key_down(KeyCode::Space),
                Some(false) => input.process_key_up(KeyCode::Space),
                None => {}
            }
        }
    }
}
