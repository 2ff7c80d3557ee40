//! # Physics System
//!
//! Integrates every actor holding both a physics and a transform component.
//! Each step feeds the accumulated frame acceleration into velocity, clears
//! it, and moves the transform by the new velocity (semi-implicit Euler).

use crate::ecs::{ActorMap, System};
use crate::error::EngineResult;

/// System moving actors according to their physics state
#[derive(Debug)]
pub struct PhysicsSystem {
    enabled: bool,

    /// Actors integrated during the last step
    integrated: usize,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsSystem {
    /// Create an enabled physics system
    pub const fn new() -> Self {
        Self {
            enabled: true,
            integrated: 0,
        }
    }

    /// Enable or disable integration
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if the system is enabled
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of actors moved by the last step
    pub const fn integrated(&self) -> usize {
        self.integrated
    }

    /// Advance all bodies by `dt` seconds
    pub fn step(&mut self, actors: &mut ActorMap, dt: f64) {
        self.integrated = 0;
        if !self.enabled {
            return;
        }

        for actor in actors.values_mut() {
            if let Some((physics, transform)) = actor.physics_and_transform_mut() {
                let displacement = physics.integrate(dt);
                transform.translate(displacement);
                self.integrated += 1;
            }
        }

        log::trace!("Physics step dt={dt}: {} actors integrated", self.integrated);
    }
}

impl System for PhysicsSystem {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn update(&mut self, actors: &mut ActorMap, dt: f64) -> EngineResult<()> {
        self.step(actors, dt);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{PhysicsComponent, TransformComponent};
    use crate::ecs::{Actor, ActorId, IdGenerator};
    use crate::foundation::math::{vec2, Vec2};
    use approx::assert_relative_eq;

    fn body(ids: &mut IdGenerator, name: &str, physics: PhysicsComponent) -> Actor {
        let mut actor = Actor::new(name);
        actor.add_component(ids.component(TransformComponent::new())).unwrap();
        actor.add_component(ids.component(physics)).unwrap();
        actor
    }

    fn single(actor: Actor) -> ActorMap {
        let mut actors = ActorMap::new();
        actors.insert(actor.id().clone(), actor);
        actors
    }

    #[test]
    fn test_constant_velocity() {
        let mut ids = IdGenerator::new();
        let mut actors = single(body(&mut ids, "ball", PhysicsComponent::with_velocity(vec2(2.0, -1.0))));
        let mut system = PhysicsSystem::new();

        system.step(&mut actors, 0.5);
        system.step(&mut actors, 0.5);

        let actor = &actors[&ActorId::from("ball")];
        assert_relative_eq!(actor.transform().unwrap().position, vec2(2.0, -1.0));
        assert_eq!(system.integrated(), 1);
    }

    #[test]
    fn test_acceleration_is_consumed() {
        let mut ids = IdGenerator::new();
        let mut actors = single(body(&mut ids, "ball", PhysicsComponent::new()));
        let mut system = PhysicsSystem::new();

        let key = ActorId::from("ball");
        actors.get_mut(&key).unwrap().physics_mut().unwrap().accelerate(vec2(0.0, 4.0));
        system.step(&mut actors, 0.5);

        let actor = &actors[&key];
        let physics = actor.physics().unwrap();
        assert_relative_eq!(physics.velocity(), vec2(0.0, 2.0));
        assert_eq!(physics.frame_acceleration(), Vec2::zeros());
        assert_relative_eq!(actor.transform().unwrap().position, vec2(0.0, 1.0));
    }

    #[test]
    fn test_actors_without_both_components_are_skipped() {
        let mut ids = IdGenerator::new();
        let mut actors = ActorMap::new();

        let mut only_physics = Actor::new("ghost");
        only_physics
            .add_component(ids.component(PhysicsComponent::with_velocity(vec2(1.0, 1.0))))
            .unwrap();
        actors.insert(only_physics.id().clone(), only_physics);

        let mut only_transform = Actor::new("rock");
        only_transform.add_component(ids.component(TransformComponent::new())).unwrap();
        actors.insert(only_transform.id().clone(), only_transform);

        let mut system = PhysicsSystem::new();
        system.step(&mut actors, 1.0);

        assert_eq!(system.integrated(), 0);
        let ghost = &actors[&ActorId::from("ghost")];
        assert_eq!(ghost.physics().unwrap().velocity(), vec2(1.0, 1.0));
        let rock = &actors[&ActorId::from("rock")];
        assert_eq!(rock.transform().unwrap().position, Vec2::zeros());
    }

    #[test]
    fn test_disabled_system_does_nothing() {
        let mut ids = IdGenerator::new();
        let mut actors = single(body(&mut ids, "ball", PhysicsComponent::with_velocity(vec2(1.0, 0.0))));
        let mut system = PhysicsSystem::new();
        system.set_enabled(false);

        system.step(&mut actors, 1.0);

        assert!(!system.is_enabled());
        assert_eq!(actors[&ActorId::from("ball")].transform().unwrap().position, Vec2::zeros());
    }
}
