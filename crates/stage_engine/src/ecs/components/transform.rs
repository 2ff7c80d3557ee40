//! Transform component
//!
//! World-space placement of an actor. Graphical components are positioned
//! relative to it and the physics system moves it.

use crate::foundation::math::{Vec2, Vec2Ext};

/// Position, scale and rotation of an actor in world units
///
/// One scale unit corresponds to `EngineConfig::pixels_per_unit` display
/// pixels (100 by default).
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World position
    pub position: Vec2,

    /// Per-axis scale factors
    pub scale: Vec2,

    /// Rotation in radians
    pub rotation: f64,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl TransformComponent {
    /// Identity transform at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity transform at `position`
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set position
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set rotation (radians)
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Move by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.position.translate(delta);
    }

    /// Multiply the current scale by `percent` on both axes
    pub fn scale_by(&mut self, percent: f64) {
        self.scale.mult_scalar(percent);
    }

    /// Set a uniform scale of `percent`
    pub fn scale_to(&mut self, percent: f64) {
        self.scale = Vec2::new(percent, percent);
    }

    /// Rotate by `delta` radians
    pub fn rotate_by(&mut self, delta: f64) {
        self.rotation += delta;
    }
}
