//! Kinematic body integration

use ember_core::{Rect, Vec2};
use ember_runtime::Intent;
use serde::Deserialize;

/// Movement constants for a kinematic body, all in per-second units.
///
/// Deserializable so game variants live in data files rather than copies
/// of the update loop. Defaults reproduce the feel of the classic
/// prototypes this engine generalizes (per-frame constants at 60Hz).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BodyTuning {
    /// Horizontal acceleration while input is held, px/s^2
    pub acceleration: f32,
    /// Horizontal deceleration toward zero with no input, px/s^2
    pub friction: f32,
    /// Horizontal speed cap, px/s
    pub max_speed: f32,
    /// Downward acceleration, px/s^2
    pub gravity: f32,
    /// Upward velocity set by a jump, px/s
    pub jump_force: f32,
    /// Terminal fall speed, px/s
    pub max_fall_speed: f32,
    /// Multiplier applied to upward velocity when jump is released early
    pub jump_cut: f32,
    /// Optional [min, max] horizontal level extent; bodies clamp to it
    pub bounds_x: Option<[f32; 2]>,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            acceleration: 3600.0,
            friction: 1800.0,
            max_speed: 300.0,
            gravity: 1800.0,
            jump_force: 600.0,
            max_fall_speed: 900.0,
            jump_cut: 0.5,
            bounds_x: None,
        }
    }
}

/// A kinematic actor body: position, velocity, size, grounded flag.
///
/// Owned exclusively by the simulation and mutated only by the update
/// step. `on_ground` is recomputed once per tick by collision resolution;
/// nothing else writes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicBody {
    /// Top-left corner in level space
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
}

impl KinematicBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            on_ground: false,
        }
    }

    /// The body's bounding box in level space
    pub fn aabb(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Steer horizontal velocity toward the requested direction.
    ///
    /// With no direction held, velocity decays toward zero by friction and
    /// never overshoots past it. The result is clamped to `max_speed`.
    /// A held jump triggers [`jump`](Self::jump), which is a no-op in the
    /// air, so holding the key re-jumps on the next grounded tick.
    pub fn apply_intent(&mut self, intent: Intent, tuning: &BodyTuning, dt: f32) {
        let axis = intent.move_axis.clamp(-1, 1) as f32;
        if axis != 0.0 {
            self.velocity.x += axis * tuning.acceleration * dt;
        } else if self.velocity.x > 0.0 {
            self.velocity.x = (self.velocity.x - tuning.friction * dt).max(0.0);
        } else if self.velocity.x < 0.0 {
            self.velocity.x = (self.velocity.x + tuning.friction * dt).min(0.0);
        }
        self.velocity.x = self.velocity.x.clamp(-tuning.max_speed, tuning.max_speed);

        if intent.jump {
            self.jump(tuning);
        }
    }

    /// Launch upward if grounded; no-op in the air (no double jumps)
    pub fn jump(&mut self, tuning: &BodyTuning) {
        if self.on_ground {
            self.velocity.y = -tuning.jump_force;
        }
    }

    /// Shorten the current jump. Called when the jump input is released
    /// while still rising; does nothing once the body is falling.
    pub fn cut_jump(&mut self, tuning: &BodyTuning) {
        if self.velocity.y < 0.0 {
            self.velocity.y *= tuning.jump_cut;
        }
    }

    /// Advance one step: gravity (applied even when grounded — the
    /// resolver corrects the resulting overlap), fall-speed clamp, then
    /// position. Horizontal level bounds clamp the position and zero the
    /// velocity on contact so walls don't store energy.
    pub fn integrate(&mut self, tuning: &BodyTuning, dt: f32) {
        self.velocity.y = (self.velocity.y + tuning.gravity * dt).min(tuning.max_fall_speed);
        self.position += self.velocity * dt;

        if let Some([lo, hi]) = tuning.bounds_x {
            let max_x = hi - self.size.x;
            if self.position.x < lo {
                self.position.x = lo;
                self.velocity.x = 0.0;
            } else if self.position.x > max_x {
                self.position.x = max_x;
                self.velocity.x = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> KinematicBody {
        KinematicBody::new(Vec2::new(100.0, 100.0), Vec2::new(16.0, 32.0))
    }

    fn held(axis: i8) -> Intent {
        Intent {
            move_axis: axis,
            jump: false,
        }
    }

    #[test]
    fn horizontal_speed_never_exceeds_cap() {
        let tuning = BodyTuning::default();
        let mut b = body();
        for _ in 0..120 {
            b.apply_intent(held(1), &tuning, 1.0 / 60.0);
            assert!(b.velocity.x.abs() <= tuning.max_speed);
        }
        assert_eq!(b.velocity.x, tuning.max_speed);
    }

    #[test]
    fn friction_decays_without_sign_flip() {
        let tuning = BodyTuning::default();
        let mut b = body();
        b.velocity.x = tuning.max_speed;

        let mut previous = b.velocity.x;
        for _ in 0..10 {
            b.apply_intent(held(0), &tuning, 1.0 / 60.0);
            assert!(b.velocity.x <= previous);
            assert!(b.velocity.x >= 0.0, "friction must not reverse direction");
            previous = b.velocity.x;
        }
    }

    #[test]
    fn friction_stops_exactly_at_zero() {
        let tuning = BodyTuning {
            friction: 1.0,
            ..Default::default()
        };
        let mut b = body();
        b.velocity.x = -0.4;
        b.apply_intent(held(0), &tuning, 1.0);
        assert_eq!(b.velocity.x, 0.0);
    }

    #[test]
    fn out_of_range_axis_is_clamped() {
        let tuning = BodyTuning::default();
        let mut a = body();
        let mut b = body();
        a.apply_intent(held(1), &tuning, 1.0 / 60.0);
        b.apply_intent(held(5), &tuning, 1.0 / 60.0);
        assert_eq!(a.velocity.x, b.velocity.x);
    }

    #[test]
    fn jump_is_noop_in_the_air() {
        let tuning = BodyTuning::default();
        let mut b = body();
        b.velocity.y = 50.0;
        b.jump(&tuning);
        assert_eq!(b.velocity.y, 50.0);
    }

    #[test]
    fn jump_launches_when_grounded() {
        let tuning = BodyTuning::default();
        let mut b = body();
        b.on_ground = true;
        b.jump(&tuning);
        assert_eq!(b.velocity.y, -tuning.jump_force);
    }

    #[test]
    fn cut_jump_only_while_rising() {
        let tuning = BodyTuning::default();
        let mut b = body();
        b.velocity.y = -400.0;
        b.cut_jump(&tuning);
        assert_eq!(b.velocity.y, -200.0);

        b.velocity.y = 100.0;
        b.cut_jump(&tuning);
        assert_eq!(b.velocity.y, 100.0);
    }

    #[test]
    fn gravity_applies_even_when_grounded() {
        let tuning = BodyTuning::default();
        let mut b = body();
        b.on_ground = true;
        b.integrate(&tuning, 1.0 / 60.0);
        assert!(b.velocity.y > 0.0);
    }

    #[test]
    fn fall_speed_is_clamped() {
        let tuning = BodyTuning::default();
        let mut b = body();
        for _ in 0..600 {
            b.integrate(&tuning, 1.0 / 60.0);
        }
        assert_eq!(b.velocity.y, tuning.max_fall_speed);
    }

    #[test]
    fn bounds_clamp_zeroes_velocity() {
        let tuning = BodyTuning {
            bounds_x: Some([0.0, 800.0]),
            ..Default::default()
        };
        let mut b = body();
        b.position.x = 790.0;
        b.velocity.x = 300.0;
        b.integrate(&tuning, 1.0 / 60.0);
        assert_eq!(b.position.x, 800.0 - b.size.x);
        assert_eq!(b.velocity.x, 0.0);

        b.position.x = 2.0;
        b.velocity.x = -300.0;
        b.integrate(&tuning, 1.0 / 60.0);
        assert_eq!(b.position.x, 0.0);
        assert_eq!(b.velocity.x, 0.0);
    }
}
