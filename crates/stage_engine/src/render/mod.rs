//! Rendering contracts
//!
//! The engine only computes where things go. Actual pixel work happens behind
//! the [`Surface`] trait, and images are opaque [`ImageHandle`]s produced by
//! the host's asset loader.

pub mod surface;
pub mod sprite;

pub use surface::{DrawCommand, ImageHandle, PixelTransform, Placement, RecordingSurface, Surface, SurfaceError};
pub use sprite::{AnimatedSource, AnimatedSprite, SpriteSource, StaticSprite};
