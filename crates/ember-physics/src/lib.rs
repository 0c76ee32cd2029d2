//! Ember Physics - Kinematic 2D platformer simulation
//!
//! Provides the simulation core for the Ember engine:
//! - `BodyTuning` / `KinematicBody` — movement constants and per-actor
//!   integration (gravity, friction, jumping)
//! - `SurfaceKind` / `StaticRect` / `CollisionWorld` — static level
//!   geometry with minimum-penetration resolution
//! - `PhysicsSystem` — implements `RuntimeSystem`, owns the actor set,
//!   and turns contacts into `GameEvent`s

pub mod body;
pub mod world;

pub use body::{BodyTuning, KinematicBody};
pub use world::{CollisionResult, CollisionWorld, Contact, ContactFace, StaticRect, SurfaceKind};

use ember_core::{ActorId, Result};
use ember_runtime::{EventBus, GameEvent, InputState, Intent, RuntimeSystem};

/// Back-and-forth walker for non-player actors. Direction flips when the
/// actor runs into a wall or reaches the level's horizontal bounds.
#[derive(Clone, Copy, Debug)]
pub struct Patrol {
    pub speed: f32,
    direction: f32,
}

impl Patrol {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            direction: 1.0,
        }
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }
}

struct Actor {
    id: ActorId,
    body: KinematicBody,
    patrol: Option<Patrol>,
}

/// The simulation system: collision world, tuning, and the actor set.
///
/// Actors are kept in spawn order and simulated in that order every tick,
/// so identical inputs over an identical level reproduce identical
/// trajectories. One actor may be designated the player; it is driven by
/// the sampled [`Intent`], while patrol actors walk on their own and
/// plain actors just fall and collide.
pub struct PhysicsSystem {
    world: CollisionWorld,
    tuning: BodyTuning,
    actors: Vec<Actor>,
    player: Option<ActorId>,
    jump_was_held: bool,
    pub events: EventBus,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(CollisionWorld::default(), BodyTuning::default())
    }
}

impl PhysicsSystem {
    pub fn new(world: CollisionWorld, tuning: BodyTuning) -> Self {
        Self {
            world,
            tuning,
            actors: Vec::new(),
            player: None,
            jump_was_held: false,
            events: EventBus::new(),
        }
    }

    /// Replace the level geometry. Actors are untouched; a host changing
    /// levels respawns them explicitly.
    pub fn set_level(&mut self, world: CollisionWorld) {
        self.world = world;
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn tuning(&self) -> &BodyTuning {
        &self.tuning
    }

    /// Spawn an inert actor (gravity and collision only)
    pub fn spawn(&mut self, body: KinematicBody) -> ActorId {
        let id = ActorId::new();
        self.actors.push(Actor {
            id,
            body,
            patrol: None,
        });
        id
    }

    /// Spawn the player-controlled actor. A later call replaces the
    /// designation, not the previous actor.
    pub fn spawn_player(&mut self, body: KinematicBody) -> ActorId {
        let id = self.spawn(body);
        self.player = Some(id);
        id
    }

    /// Spawn a patrolling actor walking at `speed`
    pub fn spawn_patrol(&mut self, body: KinematicBody, speed: f32) -> ActorId {
        let id = self.spawn(body);
        if let Some(actor) = self.actors.last_mut() {
            actor.patrol = Some(Patrol::new(speed));
        }
        id
    }

    /// Remove an actor. Returns false if the id is unknown.
    pub fn remove(&mut self, id: ActorId) -> bool {
        let before = self.actors.len();
        self.actors.retain(|a| a.id != id);
        if self.player == Some(id) {
            self.player = None;
        }
        self.actors.len() != before
    }

    pub fn player(&self) -> Option<ActorId> {
        self.player
    }

    pub fn body(&self, id: ActorId) -> Option<&KinematicBody> {
        self.actors.iter().find(|a| a.id == id).map(|a| &a.body)
    }

    pub fn body_mut(&mut self, id: ActorId) -> Option<&mut KinematicBody> {
        self.actors
            .iter_mut()
            .find(|a| a.id == id)
            .map(|a| &mut a.body)
    }

    /// Read-only snapshot of every actor in simulation order, for a
    /// renderer to consume between ticks
    pub fn bodies(&self) -> impl Iterator<Item = (ActorId, &KinematicBody)> {
        self.actors.iter().map(|a| (a.id, &a.body))
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Advance the simulation by one fixed step under the given intent.
    ///
    /// Order per actor: steer (player intent or patrol), integrate,
    /// resolve, reassign `on_ground`, publish events. The whole step
    /// completes before control returns; no state is observable mid-step.
    pub fn step(&mut self, intent: Intent, dt: f32) {
        let jump_released = self.jump_was_held && !intent.jump;
        self.jump_was_held = intent.jump;

        for actor in self.actors.iter_mut() {
            let was_grounded = actor.body.on_ground;

            if Some(actor.id) == self.player {
                actor.body.apply_intent(intent, &self.tuning, dt);
                if jump_released {
                    actor.body.cut_jump(&self.tuning);
                }
            } else if let Some(patrol) = &actor.patrol {
                actor.body.velocity.x = patrol.speed * patrol.direction;
            }

            actor.body.integrate(&self.tuning, dt);
            let result = self.world.resolve(&mut actor.body);
            actor.body.on_ground = result.on_ground;

            if let Some(patrol) = &mut actor.patrol {
                if result.hit_wall || at_horizontal_bound(&actor.body, &self.tuning) {
                    patrol.direction = -patrol.direction;
                }
            }

            if result.on_ground && !was_grounded {
                self.events.push(GameEvent::Landed { actor: actor.id });
            } else if !result.on_ground && was_grounded {
                self.events.push(GameEvent::LeftGround { actor: actor.id });
            }
            if result.hit_wall {
                self.events.push(GameEvent::HitWall { actor: actor.id });
            }

            for contact in &result.contacts {
                if contact.kind != SurfaceKind::Hazard {
                    continue;
                }
                if contact.face == ContactFace::Top {
                    // Stomp bounce at half jump force, like the classics
                    actor.body.velocity.y = -self.tuning.jump_force * 0.5;
                    self.events.push(GameEvent::Stomped {
                        actor: actor.id,
                        surface: contact.index,
                    });
                } else {
                    self.events.push(GameEvent::Hurt {
                        actor: actor.id,
                        surface: contact.index,
                    });
                }
            }
        }
    }
}

fn at_horizontal_bound(body: &KinematicBody, tuning: &BodyTuning) -> bool {
    match tuning.bounds_x {
        Some([lo, hi]) => body.position.x <= lo || body.position.x + body.size.x >= hi,
        None => false,
    }
}

impl RuntimeSystem for PhysicsSystem {
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    fn fixed_update(&mut self, input: &InputState, dt: f64) -> Result<()> {
        self.step(input.sample(), dt as f32);
        Ok(())
    }

    fn update(&mut self, _input: &InputState, _dt: f64) -> Result<()> {
        // Variable-rate updates (none needed for physics)
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "physics"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::{Rect, Vec2};

    const DT: f32 = 1.0 / 60.0;

    fn flat_level() -> CollisionWorld {
        CollisionWorld::new(vec![StaticRect::new(
            Rect::new(0.0, 224.0, 1024.0, 16.0),
            SurfaceKind::Ground,
        )])
    }

    fn spawn_standing_player(sim: &mut PhysicsSystem, x: f32) -> ActorId {
        let mut body = KinematicBody::new(Vec2::new(x, 192.0), Vec2::new(16.0, 32.0));
        body.on_ground = true;
        sim.spawn_player(body)
    }

    fn idle() -> Intent {
        Intent::default()
    }

    fn walk(axis: i8) -> Intent {
        Intent {
            move_axis: axis,
            jump: false,
        }
    }

    fn jump_held() -> Intent {
        Intent {
            move_axis: 0,
            jump: true,
        }
    }

    #[test]
    fn player_walks_under_intent() {
        let mut sim = PhysicsSystem::new(flat_level(), BodyTuning::default());
        let player = spawn_standing_player(&mut sim, 100.0);

        for _ in 0..30 {
            sim.step(walk(1), DT);
        }
        let body = sim.body(player).unwrap();
        assert!(body.position.x > 100.0);
        assert!(body.velocity.x > 0.0);
        assert!(body.on_ground);
    }

    #[test]
    fn falling_body_lands_once() {
        let mut sim = PhysicsSystem::new(flat_level(), BodyTuning::default());
        let player = sim.spawn_player(KinematicBody::new(
            Vec2::new(100.0, 0.0),
            Vec2::new(16.0, 32.0),
        ));

        for _ in 0..120 {
            sim.step(idle(), DT);
        }
        let body = sim.body(player).unwrap();
        assert!(body.on_ground);
        assert_eq!(body.position.y, 192.0);

        let landings = sim
            .events
            .drain()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Landed { .. }))
            .count();
        assert_eq!(landings, 1);
    }

    #[test]
    fn descent_settles_without_oscillation() {
        // The distilled acceptance scenario: per-tick units, dt = 1
        let tuning = BodyTuning {
            gravity: 0.4,
            max_fall_speed: 15.0,
            ..Default::default()
        };
        let mut sim = PhysicsSystem::new(flat_level(), tuning);
        let player = sim.spawn_player(KinematicBody::new(
            Vec2::new(100.0, 0.0),
            Vec2::new(16.0, 32.0),
        ));

        for _ in 0..120 {
            sim.step(idle(), 1.0);
        }
        for _ in 0..10 {
            sim.step(idle(), 1.0);
            let body = sim.body(player).unwrap();
            assert_eq!(body.position.y, 224.0 - 32.0);
            assert!(body.on_ground);
        }
    }

    #[test]
    fn jump_leaves_ground_and_emits_transition() {
        let mut sim = PhysicsSystem::new(flat_level(), BodyTuning::default());
        let player = spawn_standing_player(&mut sim, 100.0);
        let _ = sim.events.drain();

        sim.step(jump_held(), DT);
        let body = sim.body(player).unwrap();
        assert!(!body.on_ground);
        assert!(body.velocity.y < 0.0);

        let events = sim.events.drain();
        assert!(events.contains(&GameEvent::LeftGround { actor: player }));
    }

    #[test]
    fn releasing_jump_early_cuts_the_arc() {
        let mut full = PhysicsSystem::new(flat_level(), BodyTuning::default());
        let full_id = spawn_standing_player(&mut full, 100.0);
        let mut cut = PhysicsSystem::new(flat_level(), BodyTuning::default());
        let cut_id = spawn_standing_player(&mut cut, 100.0);

        for tick in 0..20 {
            full.step(jump_held(), DT);
            // Release after 5 ticks on the second run
            cut.step(if tick < 5 { jump_held() } else { idle() }, DT);
        }
        let full_rise = 192.0 - full.body(full_id).unwrap().position.y;
        let cut_rise = 192.0 - cut.body(cut_id).unwrap().position.y;
        assert!(cut_rise < full_rise, "early release must shorten the jump");
    }

    #[test]
    fn stomp_bounces_and_reports() {
        let mut world_rects = flat_level().rects().to_vec();
        world_rects.push(StaticRect::new(
            Rect::new(90.0, 184.0, 50.0, 40.0),
            SurfaceKind::Hazard,
        ));
        let mut sim =
            PhysicsSystem::new(CollisionWorld::new(world_rects), BodyTuning::default());
        let player = sim.spawn_player(KinematicBody::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(16.0, 32.0),
        ));

        let mut stomped = false;
        for _ in 0..120 {
            sim.step(idle(), DT);
            for event in sim.events.drain() {
                if let GameEvent::Stomped { actor, surface } = event {
                    assert_eq!(actor, player);
                    assert_eq!(surface, 1);
                    stomped = true;
                }
            }
            if stomped {
                break;
            }
        }
        assert!(stomped);
        let body = sim.body(player).unwrap();
        assert!(body.velocity.y < 0.0, "stomp bounces the body upward");
    }

    #[test]
    fn patrol_reverses_at_walls() {
        let rects = vec![
            StaticRect::new(Rect::new(0.0, 224.0, 400.0, 16.0), SurfaceKind::Ground),
            StaticRect::new(Rect::new(300.0, 160.0, 16.0, 64.0), SurfaceKind::Ground),
        ];
        let mut sim = PhysicsSystem::new(CollisionWorld::new(rects), BodyTuning::default());
        let walker = sim.spawn_patrol(
            KinematicBody::new(Vec2::new(200.0, 192.0), Vec2::new(16.0, 32.0)),
            60.0,
        );

        let mut flipped = false;
        for _ in 0..240 {
            sim.step(idle(), DT);
            if sim.body(walker).unwrap().velocity.x < 0.0 {
                flipped = true;
                break;
            }
        }
        assert!(flipped, "patrol must turn around at the wall");
        assert!(sim.body(walker).unwrap().position.x < 300.0);
    }

    #[test]
    fn identical_runs_are_bit_identical() {
        let script: Vec<Intent> = (0..240)
            .map(|tick| Intent {
                move_axis: if tick < 90 { 1 } else { -1 },
                jump: (60..70).contains(&tick) || (150..155).contains(&tick),
            })
            .collect();

        let run = |script: &[Intent]| -> Vec<(u32, u32, u32, u32)> {
            let mut sim = PhysicsSystem::new(flat_level(), BodyTuning::default());
            let player = sim.spawn_player(KinematicBody::new(
                Vec2::new(100.0, 0.0),
                Vec2::new(16.0, 32.0),
            ));
            script
                .iter()
                .map(|intent| {
                    sim.step(*intent, DT);
                    let b = sim.body(player).unwrap();
                    (
                        b.position.x.to_bits(),
                        b.position.y.to_bits(),
                        b.velocity.x.to_bits(),
                        b.velocity.y.to_bits(),
                    )
                })
                .collect()
        };

        assert_eq!(run(&script), run(&script));
    }

    #[test]
    fn remove_forgets_the_actor() {
        let mut sim = PhysicsSystem::new(flat_level(), BodyTuning::default());
        let a = sim.spawn(KinematicBody::new(Vec2::ZERO, Vec2::ONE));
        let b = spawn_standing_player(&mut sim, 50.0);

        assert!(sim.remove(a));
        assert!(!sim.remove(a));
        assert_eq!(sim.actor_count(), 1);
        assert!(sim.body(a).is_none());
        assert_eq!(sim.player(), Some(b));

        assert!(sim.remove(b));
        assert_eq!(sim.player(), None);
    }
}
