//! Ember Runtime - Game loop infrastructure
//!
//! Provides the core game loop building blocks:
//! - `GameClock` — fixed-timestep accumulator for deterministic simulation
//! - `InputState` / `Intent` — key tracking with action bindings, sampled
//!   into a normalized per-tick movement request
//! - `GameEvent` / `EventBus` — typed event queue for inter-system communication
//! - `RuntimeSystem` — trait for systems ticked by the game loop

mod clock;
mod event;
mod input;
mod system;

pub use clock::GameClock;
pub use event::{EventBus, GameEvent};
pub use input::{InputState, Intent};
pub use system::RuntimeSystem;
