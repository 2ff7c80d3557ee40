//! Engine error types

use crate::ecs::{ComponentId, ComponentType};
use crate::render::SurfaceError;
use crate::scene::SceneId;
use thiserror::Error;

/// Engine-level errors
///
/// Rule violations (`ComponentPresent`, `ScenePresent`, ...) are recoverable and
/// leave the engine state untouched. `Draw` and `Custom` are failures raised by
/// a surface or a user behavior and passed up unchanged.
#[derive(Error, Debug)]
pub enum EngineError {
    /// An actor already holds a conflicting component
    #[error("component is already present: {0}")]
    ComponentPresent(ComponentId),

    /// The requested component does not exist on the actor
    #[error("component is not present: {0}")]
    ComponentNotPresent(String),

    /// Removal by type matched more than one component
    #[error("more than one component of type {0:?} is present")]
    AmbiguousComponentType(ComponentType),

    /// A scene with the same id is already registered
    #[error("scene is already present: {0}")]
    ScenePresent(SceneId),

    /// No scene is registered under the id
    #[error("scene is not registered: {0}")]
    SceneNotFound(SceneId),

    /// `transition` was called with an empty pending queue
    #[error("no scene transition is pending")]
    NoTransitionPending,

    /// The manager has no active scene to update or draw
    #[error("no scene is active")]
    NoActiveScene,

    /// Mass must be strictly positive
    #[error("mass ({0}) may not be less than or equal to zero")]
    InvalidMass(f64),

    /// The draw backend failed
    #[error("draw error: {0}")]
    Draw(#[from] SurfaceError),

    /// A custom component failed
    #[error("component error: {0}")]
    Custom(String),
}

/// Result alias used across the engine
pub type EngineResult<T> = Result<T, EngineError>;
