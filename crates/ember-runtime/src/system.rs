//! Runtime system trait

use crate::InputState;
use ember_core::Result;

/// A system that can be ticked by the game loop
///
/// Systems are updated in registration order. Fixed update runs at a
/// constant rate for deterministic simulation, while update runs once per
/// frame for variable-rate logic. A tick completes fully before control
/// returns to the host; hosts that need to yield (e.g. to an event loop)
/// do so between ticks, never inside one.
pub trait RuntimeSystem {
    /// Called once before the first tick
    fn initialize(&mut self) -> Result<()>;

    /// Called at a fixed rate (e.g. 60Hz) for deterministic simulation
    fn fixed_update(&mut self, input: &InputState, dt: f64) -> Result<()>;

    /// Called once per frame for variable-rate logic
    fn update(&mut self, input: &InputState, dt: f64) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
