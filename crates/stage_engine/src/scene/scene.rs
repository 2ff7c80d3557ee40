//! Scene: an owned set of actors plus the built-in systems that process them

use std::fmt;

use crate::ecs::systems::{GraphicsSystem, PhysicsSystem};
use crate::ecs::{Actor, ActorMap, IdGenerator, System};
use crate::error::EngineResult;
use crate::render::Surface;

/// Identifier of a scene, unique within its manager
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(String);

impl SceneId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SceneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SceneId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Handle of the manager session a scene is registered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionId(pub u64);

/// Lifecycle counters of a scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Completed `init` calls
    pub inits: u64,
    /// Completed `update` calls
    pub updates: u64,
    /// Completed `draw` calls
    pub draws: u64,
}

/// A collection of actors driven by one physics and one graphics system
#[derive(Debug)]
pub struct Scene {
    id: SceneId,
    actors: ActorMap,
    manager: Option<SessionId>,
    physics: PhysicsSystem,
    graphics: GraphicsSystem,
    ids: IdGenerator,
    stats: SceneStats,
}

impl Scene {
    /// Create an empty scene with fresh systems
    pub fn new(id: impl Into<SceneId>) -> Self {
        Self {
            id: id.into(),
            actors: ActorMap::new(),
            manager: None,
            physics: PhysicsSystem::new(),
            graphics: GraphicsSystem::new(),
            ids: IdGenerator::new(),
            stats: SceneStats::default(),
        }
    }

    /// Identifier
    pub const fn id(&self) -> &SceneId {
        &self.id
    }

    /// Manager session this scene is registered with
    pub const fn manager(&self) -> Option<SessionId> {
        self.manager
    }

    pub(crate) fn bind_manager(&mut self, session: SessionId) {
        self.manager = Some(session);
    }

    /// Component id generator for this scene
    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    /// Lifecycle counters
    pub const fn stats(&self) -> SceneStats {
        self.stats
    }

    /// The physics system
    pub const fn physics(&self) -> &PhysicsSystem {
        &self.physics
    }

    /// The physics system, mutably
    pub fn physics_mut(&mut self) -> &mut PhysicsSystem {
        &mut self.physics
    }

    /// The graphics system
    pub const fn graphics(&self) -> &GraphicsSystem {
        &self.graphics
    }

    /// The graphics system, mutably
    pub fn graphics_mut(&mut self) -> &mut GraphicsSystem {
        &mut self.graphics
    }

    /// Number of actors
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// All actors, in no particular order
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Actor with the given id
    pub fn get_actor(&self, id: &str) -> Option<&Actor> {
        self.actors.get(id)
    }

    /// Actor with the given id, mutably
    pub fn get_actor_mut(&mut self, id: &str) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    /// Take ownership of `actor`. Returns `false` if its id is already used.
    pub fn add_actor(&mut self, mut actor: Actor) -> bool {
        if self.actors.contains_key(actor.id()) {
            log::warn!("Scene '{}' already has actor '{}'", self.id, actor.id());
            return false;
        }
        actor.set_parent_scene(self.id.clone());
        log::debug!("Scene '{}' added actor '{}'", self.id, actor.id());
        self.actors.insert(actor.id().clone(), actor);
        true
    }

    /// Drop the actor with the given id. Returns `false` if absent.
    pub fn remove_actor(&mut self, id: &str) -> bool {
        match self.actors.remove(id) {
            Some(actor) => {
                log::debug!("Scene '{}' removed actor '{}'", self.id, actor.id());
                true
            }
            None => false,
        }
    }

    /// Initialize the physics system, the graphics system, then every actor
    pub fn init(&mut self) -> EngineResult<()> {
        for system in [&mut self.physics as &mut dyn System, &mut self.graphics] {
            system.init(&mut self.actors)?;
            log::trace!("Scene '{}' initialized {} system", self.id, system.name());
        }
        for actor in self.actors.values_mut() {
            actor.init()?;
        }
        self.stats.inits += 1;
        log::debug!("Scene '{}' initialized with {} actors", self.id, self.actors.len());
        Ok(())
    }

    /// Advance one frame: physics system, graphics system, then every actor
    pub fn update(&mut self, dt: f64) -> EngineResult<()> {
        for system in [&mut self.physics as &mut dyn System, &mut self.graphics] {
            system.update(&mut self.actors, dt)?;
            log::trace!("Scene '{}' ran {} system", self.id, system.name());
        }
        for actor in self.actors.values_mut() {
            actor.update(dt)?;
        }
        self.stats.updates += 1;
        Ok(())
    }

    /// Draw the scene onto `surface`
    pub fn draw(&mut self, surface: &mut dyn Surface) -> EngineResult<()> {
        self.graphics.draw(&mut self.actors, surface)?;
        self.stats.draws += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{PhysicsComponent, TransformComponent};
    use crate::foundation::math::vec2;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_actor_sets_parent_scene() {
        let mut scene = Scene::new("level");
        assert!(scene.add_actor(Actor::new("hero")));

        let hero = scene.get_actor("hero").unwrap();
        assert_eq!(hero.parent_scene(), Some(&SceneId::from("level")));
        assert_eq!(scene.actor_count(), 1);
    }

    #[test]
    fn test_duplicate_actor_rejected() {
        let mut scene = Scene::new("level");
        assert!(scene.add_actor(Actor::new("hero")));
        assert!(!scene.add_actor(Actor::new("hero")));
        assert_eq!(scene.actor_count(), 1);
    }

    #[test]
    fn test_remove_actor() {
        let mut scene = Scene::new("level");
        scene.add_actor(Actor::new("hero"));

        assert!(scene.remove_actor("hero"));
        assert!(!scene.remove_actor("hero"));
        assert!(scene.get_actor("hero").is_none());
    }

    #[test]
    fn test_update_moves_bodies() {
        let mut scene = Scene::new("level");
        let mut actor = Actor::new("ball");
        let transform = scene.ids_mut().component(TransformComponent::new());
        let physics = scene
            .ids_mut()
            .component(PhysicsComponent::with_velocity(vec2(1.0, 2.0)));
        actor.add_component(transform).unwrap();
        actor.add_component(physics).unwrap();
        scene.add_actor(actor);

        scene.init().unwrap();
        scene.update(0.5).unwrap();

        let position = scene.get_actor("ball").unwrap().transform().unwrap().position;
        assert_relative_eq!(position, vec2(0.5, 1.0));
        assert_eq!(scene.stats().inits, 1);
        assert_eq!(scene.stats().updates, 1);
        assert_eq!(scene.physics().integrated(), 1);
    }

    #[test]
    fn test_systems_are_named_for_logging() {
        let scene = Scene::new("level");
        assert_eq!(scene.physics().name(), "physics");
        assert_eq!(scene.graphics().name(), "graphics");
    }
}
