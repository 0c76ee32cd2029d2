//! Game events and the event bus

use ember_core::ActorId;
use serde::Serialize;

/// Events published by simulation systems and drained by the host.
///
/// `surface` fields carry the index of the rect in the level's ordered
/// sequence, so hosts can look up which hazard was involved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    /// An actor touched down on a solid surface this tick
    Landed { actor: ActorId },
    /// An actor that was grounded is now airborne
    LeftGround { actor: ActorId },
    /// An actor was pushed out of a solid rect horizontally
    HitWall { actor: ActorId },
    /// An actor landed on top of a hazard while falling
    Stomped { actor: ActorId, surface: usize },
    /// An actor touched a hazard from the side or below
    Hurt { actor: ActorId, surface: usize },
}

/// A simple in-order event queue that systems push to and consumers drain
#[derive(Default)]
pub struct EventBus {
    queue: Vec<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    /// Drain all pending events in publication order, emptying the bus
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
