//! Actor implementation
//!
//! An actor is an identified bag of components. It enforces the uniqueness
//! rules (one component per engine system type, one per non-custom component
//! type, unique ids) and keeps the presence mask in sync with its contents.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::ecs::components::{GraphicalComponent, PhysicsComponent, TransformComponent};
use crate::ecs::{Component, ComponentId, ComponentKind, ComponentMask, ComponentType, SystemType};
use crate::error::{EngineError, EngineResult};
use crate::scene::SceneId;

/// Identifier of an actor, unique within its scene
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(String);

impl ActorId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ActorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ActorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Actors of a scene keyed by id
pub type ActorMap = HashMap<ActorId, Actor>;

type ComponentMap = HashMap<ComponentId, Component>;

/// Entity owning a set of components
#[derive(Debug)]
pub struct Actor {
    id: ActorId,
    parent_scene: Option<SceneId>,
    mask: ComponentMask,
    components: ComponentMap,
}

impl Actor {
    /// Create an empty actor
    pub fn new(id: impl Into<ActorId>) -> Self {
        Self {
            id: id.into(),
            parent_scene: None,
            mask: ComponentMask::default(),
            components: HashMap::new(),
        }
    }

    /// Identifier
    pub const fn id(&self) -> &ActorId {
        &self.id
    }

    /// Scene holding this actor, once added to one
    pub const fn parent_scene(&self) -> Option<&SceneId> {
        self.parent_scene.as_ref()
    }

    pub(crate) fn set_parent_scene(&mut self, scene: SceneId) {
        self.parent_scene = Some(scene);
    }

    /// Engine system types currently present
    pub const fn mask(&self) -> ComponentMask {
        self.mask
    }

    /// Whether a component of `system_type` is present (never for `Custom`)
    pub const fn has_system(&self, system_type: SystemType) -> bool {
        self.mask.check_system(system_type)
    }

    /// Number of components held
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// All components, in no particular order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Component handled by `system_type`
    ///
    /// For engine system types the mask answers negative lookups without a
    /// scan. For `Custom` an arbitrary custom component is returned.
    pub fn get_component_by_system_type(&self, system_type: SystemType) -> Option<&Component> {
        if system_type != SystemType::Custom && !self.mask.check_system(system_type) {
            return None;
        }
        self.components
            .values()
            .find(|component| component.system_type() == system_type)
    }

    /// Component handled by `system_type`, mutably
    pub fn get_component_by_system_type_mut(&mut self, system_type: SystemType) -> Option<&mut Component> {
        if system_type != SystemType::Custom && !self.mask.check_system(system_type) {
            return None;
        }
        self.components
            .values_mut()
            .find(|component| component.system_type() == system_type)
    }

    /// Component of `component_type` (an arbitrary one for `Custom`)
    pub fn get_component_by_type(&self, component_type: ComponentType) -> Option<&Component> {
        self.components
            .values()
            .find(|component| component.component_type() == component_type)
    }

    /// Component of `component_type`, mutably
    pub fn get_component_by_type_mut(&mut self, component_type: ComponentType) -> Option<&mut Component> {
        self.components
            .values_mut()
            .find(|component| component.component_type() == component_type)
    }

    /// All components of `component_type`
    pub fn components_of_type(&self, component_type: ComponentType) -> impl Iterator<Item = &Component> {
        self.components
            .values()
            .filter(move |component| component.component_type() == component_type)
    }

    /// Component with the given id
    pub fn get_component_by_id<Q>(&self, id: &Q) -> Option<&Component>
    where
        ComponentId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.components.get(id)
    }

    /// Component with the given id, mutably
    pub fn get_component_by_id_mut<Q>(&mut self, id: &Q) -> Option<&mut Component>
    where
        ComponentId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.components.get_mut(id)
    }

    /// Transform data, if present
    pub fn transform(&self) -> Option<&TransformComponent> {
        self.get_component_by_system_type(SystemType::Transform)
            .and_then(Component::as_transform)
    }

    /// Transform data, mutably
    pub fn transform_mut(&mut self) -> Option<&mut TransformComponent> {
        self.get_component_by_system_type_mut(SystemType::Transform)
            .and_then(Component::as_transform_mut)
    }

    /// Physics data, if present
    pub fn physics(&self) -> Option<&PhysicsComponent> {
        self.get_component_by_system_type(SystemType::Physics)
            .and_then(Component::as_physics)
    }

    /// Physics data, mutably
    pub fn physics_mut(&mut self) -> Option<&mut PhysicsComponent> {
        self.get_component_by_system_type_mut(SystemType::Physics)
            .and_then(Component::as_physics_mut)
    }

    /// Graphical data, if present
    pub fn graphical(&self) -> Option<&GraphicalComponent> {
        self.get_component_by_system_type(SystemType::Graphical)
            .and_then(Component::as_graphical)
    }

    /// Graphical data, mutably
    pub fn graphical_mut(&mut self) -> Option<&mut GraphicalComponent> {
        self.get_component_by_system_type_mut(SystemType::Graphical)
            .and_then(Component::as_graphical_mut)
    }

    /// Physics and transform together, for integration
    pub(crate) fn physics_and_transform_mut(
        &mut self,
    ) -> Option<(&mut PhysicsComponent, &mut TransformComponent)> {
        if !self.mask.contains(ComponentMask::PHYSICS | ComponentMask::TRANSFORM) {
            return None;
        }
        let mut physics = None;
        let mut transform = None;
        for component in self.components.values_mut() {
            match component.kind_mut() {
                ComponentKind::Physics(p) => physics = Some(p),
                ComponentKind::Transform(t) => transform = Some(t),
                _ => {}
            }
        }
        physics.zip(transform)
    }

    /// Graphical and transform together, for composition
    pub(crate) fn graphical_and_transform_mut(
        &mut self,
    ) -> Option<(&mut GraphicalComponent, &TransformComponent)> {
        if !self.mask.contains(ComponentMask::GRAPHICAL | ComponentMask::TRANSFORM) {
            return None;
        }
        let mut graphical = None;
        let mut transform = None;
        for component in self.components.values_mut() {
            match component.kind_mut() {
                ComponentKind::Graphical(g) => graphical = Some(g),
                ComponentKind::Transform(t) => transform = Some(&*t),
                _ => {}
            }
        }
        graphical.zip(transform)
    }

    /// Attach `component`, binding it to this actor
    ///
    /// Fails with `ComponentPresent` if the actor already holds a component
    /// of the same engine system type, the same non-custom component type,
    /// or the same id.
    pub fn add_component(&mut self, mut component: Component) -> EngineResult<()> {
        let component_type = component.component_type();
        let duplicate_type = component_type != ComponentType::Custom
            && self.get_component_by_type(component_type).is_some();

        if self.mask.check_system(component.system_type())
            || duplicate_type
            || self.components.contains_key(component.id())
        {
            log::warn!(
                "Actor '{}' rejected component '{}' ({:?})",
                self.id,
                component.id(),
                component_type
            );
            return Err(EngineError::ComponentPresent(component.id().clone()));
        }

        component.set_parent(self.id.clone());
        self.mask.add_system(component.system_type());
        log::debug!("Actor '{}' added component '{}'", self.id, component.id());
        self.components.insert(component.id().clone(), component);
        Ok(())
    }

    /// Detach and return the component of `component_type`
    ///
    /// Clears the system-type bit. With several custom components present the
    /// request is ambiguous and fails with `AmbiguousComponentType`.
    pub fn remove_component_by_type(&mut self, component_type: ComponentType) -> EngineResult<Component> {
        let matches: Vec<ComponentId> = self
            .components_of_type(component_type)
            .take(2)
            .map(|component| component.id().clone())
            .collect();
        match matches.as_slice() {
            [] => Err(EngineError::ComponentNotPresent(format!("{component_type:?}"))),
            [id] => self.remove_component_by_id(id),
            _ => Err(EngineError::AmbiguousComponentType(component_type)),
        }
    }

    /// Detach and return the component with the given id
    pub fn remove_component_by_id<Q>(&mut self, id: &Q) -> EngineResult<Component>
    where
        ComponentId: Borrow<Q>,
        Q: Hash + Eq + fmt::Display + ?Sized,
    {
        let component = self
            .components
            .remove(id)
            .ok_or_else(|| EngineError::ComponentNotPresent(id.to_string()))?;
        self.mask.remove_system(component.system_type());
        log::debug!("Actor '{}' removed component '{}'", self.id, component.id());
        Ok(component)
    }

    /// Run every component's init hook; the first failure aborts
    pub fn init(&mut self) -> EngineResult<()> {
        self.for_each_behavior(|component, context| component.init(context))
    }

    /// Run every component's update hook; the first failure aborts
    pub fn update(&mut self, dt: f64) -> EngineResult<()> {
        self.for_each_behavior(|component, context| component.update(context, dt))
    }

    /// Run `hook` on each custom component with its siblings exposed
    ///
    /// Engine components have no per-component lifecycle work, so only
    /// custom ones are visited. Each is taken out of the map while its hook
    /// runs and put back afterwards, even on failure.
    fn for_each_behavior<F>(&mut self, mut hook: F) -> EngineResult<()>
    where
        F: FnMut(&mut Component, &mut ActorContext<'_>) -> EngineResult<()>,
    {
        let ids: Vec<ComponentId> = self
            .components_of_type(ComponentType::Custom)
            .map(|component| component.id().clone())
            .collect();

        for id in ids {
            let Some(mut component) = self.components.remove(&id) else {
                continue;
            };
            let result = {
                let mut context = ActorContext {
                    actor_id: &self.id,
                    parent_scene: self.parent_scene.as_ref(),
                    components: &mut self.components,
                };
                hook(&mut component, &mut context)
            };
            self.components.insert(id, component);
            result?;
        }
        Ok(())
    }
}

/// View of an actor handed to a running [`Behavior`](crate::ecs::Behavior)
///
/// Exposes the actor's other components. The running component itself is
/// not reachable, and components cannot be added or removed through it.
pub struct ActorContext<'a> {
    actor_id: &'a ActorId,
    parent_scene: Option<&'a SceneId>,
    components: &'a mut ComponentMap,
}

impl ActorContext<'_> {
    /// Id of the actor running the hook
    pub const fn actor_id(&self) -> &ActorId {
        self.actor_id
    }

    /// Scene holding the actor, if any
    pub const fn parent_scene(&self) -> Option<&SceneId> {
        self.parent_scene
    }

    /// Sibling component with the given id
    pub fn component_by_id<Q>(&self, id: &Q) -> Option<&Component>
    where
        ComponentId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.components.get(id)
    }

    /// Sibling component with the given id, mutably
    pub fn component_by_id_mut<Q>(&mut self, id: &Q) -> Option<&mut Component>
    where
        ComponentId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.components.get_mut(id)
    }

    /// Transform of the actor
    pub fn transform(&self) -> Option<&TransformComponent> {
        self.components.values().find_map(Component::as_transform)
    }

    /// Transform of the actor, mutably
    pub fn transform_mut(&mut self) -> Option<&mut TransformComponent> {
        self.components.values_mut().find_map(Component::as_transform_mut)
    }

    /// Physics body of the actor
    pub fn physics(&self) -> Option<&PhysicsComponent> {
        self.components.values().find_map(Component::as_physics)
    }

    /// Physics body of the actor, mutably
    pub fn physics_mut(&mut self) -> Option<&mut PhysicsComponent> {
        self.components.values_mut().find_map(Component::as_physics_mut)
    }

    /// Graphical component of the actor
    pub fn graphical(&self) -> Option<&GraphicalComponent> {
        self.components.values().find_map(Component::as_graphical)
    }

    /// Graphical component of the actor, mutably
    pub fn graphical_mut(&mut self) -> Option<&mut GraphicalComponent> {
        self.components.values_mut().find_map(Component::as_graphical_mut)
    }
}
