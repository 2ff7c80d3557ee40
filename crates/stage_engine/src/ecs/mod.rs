//! Actor-component implementation
//!
//! Actors own components keyed by id. Engine components (transform, physics,
//! graphical) are processed by the scene's built-in systems; custom components
//! run their own hooks through [`Behavior`].

pub mod component;
pub mod component_mask;
pub mod actor;
pub mod system;
pub mod components;
pub mod systems;

#[cfg(test)]
mod tests;

pub use component::{Behavior, Component, ComponentId, ComponentKind, ComponentType, IdGenerator, SystemType};
pub use component_mask::ComponentMask;
pub use actor::{Actor, ActorContext, ActorId, ActorMap};
pub use system::System;
