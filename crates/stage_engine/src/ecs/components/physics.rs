//! Physics component for actors that move under forces
//!
//! Holds mass, velocity and the acceleration accumulated during the current
//! frame. The physics system drains that accumulator once per step.
//! Friction and gravity are stored for force generators to read; nothing
//! applies them automatically.

use crate::error::{EngineError, EngineResult};
use crate::foundation::math::{Vec2, Vec2Ext};

/// Rigid-body state of an actor
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsComponent {
    mass: f64,
    velocity: Vec2,
    friction: Vec2,
    gravity: Vec2,
    frame_acceleration: Vec2,
}

impl Default for PhysicsComponent {
    fn default() -> Self {
        Self {
            mass: 1.0,
            velocity: Vec2::zeros(),
            friction: Vec2::zeros(),
            gravity: Vec2::zeros(),
            frame_acceleration: Vec2::zeros(),
        }
    }
}

impl PhysicsComponent {
    /// Create a unit-mass body at rest
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a body with the given mass
    pub fn with_mass(mass: f64) -> EngineResult<Self> {
        let mut physics = Self::new();
        physics.set_mass(mass)?;
        Ok(physics)
    }

    /// Create a unit-mass body with an initial velocity
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Default::default()
        }
    }

    /// Mass
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Set mass. Non-positive (or NaN) values are rejected and the old mass kept.
    pub fn set_mass(&mut self, mass: f64) -> EngineResult<()> {
        if mass.is_nan() || mass <= 0.0 {
            log::warn!("Rejected mass {mass}");
            return Err(EngineError::InvalidMass(mass));
        }
        self.mass = mass;
        Ok(())
    }

    /// Velocity in world units per second
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Set velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Friction coefficients
    pub const fn friction(&self) -> Vec2 {
        self.friction
    }

    /// Set friction coefficients
    pub fn set_friction(&mut self, friction: Vec2) {
        self.friction = friction;
    }

    /// Gravity acceleration
    pub const fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Set gravity acceleration
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Acceleration accumulated since the last integration step
    pub const fn frame_acceleration(&self) -> Vec2 {
        self.frame_acceleration
    }

    /// Add an acceleration for this frame
    pub fn accelerate(&mut self, acceleration: Vec2) {
        self.frame_acceleration.translate(acceleration);
    }

    /// Add a force for this frame (`accelerate(force / mass)`)
    pub fn apply_force(&mut self, force: Vec2) {
        let mut acceleration = force;
        acceleration.mult_scalar(1.0 / self.mass);
        self.accelerate(acceleration);
    }

    /// Advance one step of `dt` seconds and return the displacement to apply
    ///
    /// Semi-implicit Euler: the accumulated acceleration feeds velocity once,
    /// is cleared, and the new velocity drives the displacement.
    pub fn integrate(&mut self, dt: f64) -> Vec2 {
        let mut delta_velocity = self.frame_acceleration;
        delta_velocity.mult_scalar(dt);
        self.velocity.translate(delta_velocity);
        self.frame_acceleration = Vec2::zeros();

        let mut displacement = self.velocity;
        displacement.mult_scalar(dt);
        displacement
    }
}
