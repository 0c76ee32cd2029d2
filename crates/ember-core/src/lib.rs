//! Ember Core - Foundational types for the Ember engine
//!
//! This crate provides the core types that all other Ember crates depend on:
//! - `Vec2`, `Rect` - 2D spatial types
//! - `ActorId` - Stable actor identifiers
//! - Error types and Result alias

mod error;
mod id;
mod rect;
mod vec2;

pub use error::{EmberError, Result};
pub use id::ActorId;
pub use rect::Rect;
pub use vec2::Vec2;
