//! # Stage Engine
//!
//! A small 2D runtime organized around actors, components and scenes.
//!
//! ## Features
//!
//! - **Component Model**: Transform, physics and graphical components plus
//!   unlimited user behaviors per actor
//! - **Built-in Systems**: Semi-implicit Euler physics and layered drawing
//! - **Scene Management**: Queued scene transitions with a shared data store
//! - **Backend Agnostic**: Drawing goes through the [`render::Surface`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stage_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut scene = Scene::new("level");
//!     let mut ball = Actor::new("ball");
//!     let transform = scene.ids_mut().component(TransformComponent::new());
//!     let physics = scene.ids_mut().component(PhysicsComponent::with_velocity(vec2(1.0, 0.0)));
//!     ball.add_component(transform)?;
//!     ball.add_component(physics)?;
//!     scene.add_actor(ball);
//!
//!     let mut manager = SceneManager::new();
//!     manager.add_scene(scene)?;
//!     manager.push_scene_id_to_stack("level");
//!     manager.transition()?;
//!
//!     let mut surface = RecordingSurface::new();
//!     manager.update(1.0 / 60.0)?;
//!     manager.draw(&mut surface)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod error;
pub mod foundation;
pub mod ecs;
pub mod render;
pub mod scene;

pub use config::{Config, ConfigError, EngineConfig};
pub use error::{EngineError, EngineResult};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, EngineConfig},
        ecs::{
            components::{GraphicalComponent, PhysicsComponent, TransformComponent},
            systems::{GraphicsSystem, PhysicsSystem},
            Actor, ActorContext, ActorId, Behavior, Component, ComponentId, ComponentType, IdGenerator,
            SystemType,
        },
        error::{EngineError, EngineResult},
        foundation::math::{vec2, Vec2, Vec2Ext},
        render::{
            AnimatedSource, AnimatedSprite, ImageHandle, Placement, RecordingSurface, SpriteSource,
            StaticSprite, Surface, SurfaceError,
        },
        scene::{Scene, SceneId, SceneManager},
    };
}
