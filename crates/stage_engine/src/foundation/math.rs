//! Math utilities and types
//!
//! Provides the 2D vector type used for positions, velocities, scales and sizes
//! throughout the engine, plus the in-place operations the systems rely on.

pub use nalgebra::{Rotation2, Vector2};

/// 2D vector type (world units)
pub type Vec2 = Vector2<f64>;

/// Build a [`Vec2`] from its components
#[must_use]
pub fn vec2(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

/// Extension trait for [`Vec2`] with in-place helpers
///
/// All mutators work on `self` directly so a component can update a field
/// without rebuilding it.
pub trait Vec2Ext {
    /// Add `delta` component-wise
    fn translate(&mut self, delta: Vec2);

    /// Multiply both components by `scalar`
    fn mult_scalar(&mut self, scalar: f64);

    /// Multiply component-wise by `other`
    fn mult_vec(&mut self, other: Vec2);

    /// Rotate counter-clockwise around the origin by `angle` radians
    fn rotate(&mut self, angle: f64);

    /// Rotate counter-clockwise around the origin by `angle` degrees
    fn rotate_deg(&mut self, angle: f64);

    /// Euclidean length
    fn hypot(&self) -> f64;

    /// Angle from the positive X axis in radians, in `(-PI, PI]`
    fn heading(&self) -> f64;

    /// Angle from the positive X axis in degrees
    fn heading_deg(&self) -> f64;
}

impl Vec2Ext for Vec2 {
    fn translate(&mut self, delta: Vec2) {
        *self += delta;
    }

    fn mult_scalar(&mut self, scalar: f64) {
        *self *= scalar;
    }

    fn mult_vec(&mut self, other: Vec2) {
        self.component_mul_assign(&other);
    }

    fn rotate(&mut self, angle: f64) {
        *self = Rotation2::new(angle) * *self;
    }

    fn rotate_deg(&mut self, angle: f64) {
        self.rotate(angle.to_radians());
    }

    fn hypot(&self) -> f64 {
        self.x.hypot(self.y)
    }

    fn heading(&self) -> f64 {
        self.y.atan2(self.x)
    }

    fn heading_deg(&self) -> f64 {
        self.heading().to_degrees()
    }
}
