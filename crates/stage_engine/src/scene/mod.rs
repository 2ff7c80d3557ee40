//! Scene management
//!
//! A [`Scene`] owns its actors together with one physics and one graphics
//! system. The [`SceneManager`] owns every scene, runs the active one and
//! applies queued transitions.
//!
//! ## Frame flow
//!
//! ```text
//! SceneManager::update(dt)
//!      ↓
//! Scene::update(dt)  →  PhysicsSystem, GraphicsSystem, then each Actor
//!      ↓
//! SceneManager::draw(surface)  →  Scene::draw  →  GraphicsSystem::draw
//! ```

#[allow(clippy::module_inception)]
mod scene;
mod scene_manager;

pub use scene::{Scene, SceneId, SceneStats, SessionId};
pub use scene_manager::SceneManager;
