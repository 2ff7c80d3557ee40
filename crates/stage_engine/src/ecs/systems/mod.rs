//! Built-in systems owned by every scene

pub mod physics_system;
pub mod graphics_system;

pub use physics_system::PhysicsSystem;
pub use graphics_system::{compose_placement, GraphicsStats, GraphicsSystem};
