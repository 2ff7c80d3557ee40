//! ECS Components module
//!
//! Data carried by the engine-processed component kinds

pub mod transform;
pub mod physics;
pub mod graphical;

pub use transform::TransformComponent;
pub use physics::PhysicsComponent;
pub use graphical::{GraphicalBody, GraphicalComponent, RawDraw};
