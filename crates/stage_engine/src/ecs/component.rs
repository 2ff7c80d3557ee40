//! Component model
//!
//! Components are tagged variants: the three engine kinds (transform, physics,
//! graphical) carry typed data the built-in systems read directly, and
//! `Custom` wraps a user [`Behavior`] with its own lifecycle hooks.

use std::borrow::Borrow;
use std::fmt;

use crate::ecs::actor::{ActorContext, ActorId};
use crate::ecs::components::{GraphicalComponent, PhysicsComponent, TransformComponent};
use crate::error::EngineResult;

/// Identifier of a component, unique within its actor
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(String);

impl ComponentId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ComponentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Engine system that processes a component
///
/// An actor holds at most one component of each engine system type.
/// `Custom` components are never processed by a system and are unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemType {
    /// Position, scale and rotation in the world
    Transform,
    /// Anything the graphics system draws
    Graphical,
    /// Mass, velocity and accumulated acceleration
    Physics,
    /// User-defined, not tracked by the engine
    Custom,
}

/// Fine-grained component kind used for typed lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// [`TransformComponent`]
    Transform,
    /// Raw graphical component with a caller-supplied draw routine
    Graphical,
    /// [`PhysicsComponent`]
    Physics,
    /// Composed graphical component backed by a static sprite
    Sprite,
    /// Composed graphical component backed by an animation
    AnimatedSprite,
    /// User behavior (scripts); any number per actor
    Custom,
}

impl ComponentType {
    /// The engine system that handles this kind
    pub const fn system_type(self) -> SystemType {
        match self {
            Self::Transform => SystemType::Transform,
            Self::Graphical | Self::Sprite | Self::AnimatedSprite => SystemType::Graphical,
            Self::Physics => SystemType::Physics,
            Self::Custom => SystemType::Custom,
        }
    }

    /// Default base name for generated ids
    pub const fn base_name(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Graphical => "graphical",
            Self::Physics => "physics",
            Self::Sprite => "sprite",
            Self::AnimatedSprite => "animated sprite",
            Self::Custom => "custom",
        }
    }
}

/// User logic attached to an actor
///
/// Hooks receive an [`ActorContext`] giving access to the actor's other
/// components. Returning an error aborts the current fan-out.
pub trait Behavior {
    /// Called when the owning scene is initialized
    fn init(&mut self, _actor: &mut ActorContext<'_>) -> EngineResult<()> {
        Ok(())
    }

    /// Called once per frame after the engine systems ran
    fn update(&mut self, actor: &mut ActorContext<'_>, dt: f64) -> EngineResult<()>;
}

/// The data carried by a component
pub enum ComponentKind {
    /// World placement
    Transform(TransformComponent),
    /// Rigid-body state
    Physics(PhysicsComponent),
    /// Drawable
    Graphical(GraphicalComponent),
    /// User behavior
    Custom(Box<dyn Behavior>),
}

impl ComponentKind {
    /// Fine-grained type of this data
    pub fn component_type(&self) -> ComponentType {
        match self {
            Self::Transform(_) => ComponentType::Transform,
            Self::Physics(_) => ComponentType::Physics,
            Self::Graphical(graphical) => graphical.component_type(),
            Self::Custom(_) => ComponentType::Custom,
        }
    }
}

impl From<TransformComponent> for ComponentKind {
    fn from(transform: TransformComponent) -> Self {
        Self::Transform(transform)
    }
}

impl From<PhysicsComponent> for ComponentKind {
    fn from(physics: PhysicsComponent) -> Self {
        Self::Physics(physics)
    }
}

impl From<GraphicalComponent> for ComponentKind {
    fn from(graphical: GraphicalComponent) -> Self {
        Self::Graphical(graphical)
    }
}

/// An identified unit of per-actor state
pub struct Component {
    id: ComponentId,
    parent: Option<ActorId>,
    kind: ComponentKind,
}

impl Component {
    /// Create an unbound component
    pub fn new(id: impl Into<ComponentId>, kind: impl Into<ComponentKind>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            kind: kind.into(),
        }
    }

    /// Create an unbound custom component
    pub fn custom(id: impl Into<ComponentId>, behavior: impl Behavior + 'static) -> Self {
        Self::new(id, ComponentKind::Custom(Box::new(behavior)))
    }

    /// Identifier
    pub const fn id(&self) -> &ComponentId {
        &self.id
    }

    /// Owning actor, once added to one
    pub const fn parent(&self) -> Option<&ActorId> {
        self.parent.as_ref()
    }

    pub(crate) fn set_parent(&mut self, actor: ActorId) {
        self.parent = Some(actor);
    }

    /// Engine system that processes this component
    pub fn system_type(&self) -> SystemType {
        self.component_type().system_type()
    }

    /// Fine-grained kind
    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    /// Underlying data
    pub const fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    /// Underlying data, mutably
    pub fn kind_mut(&mut self) -> &mut ComponentKind {
        &mut self.kind
    }

    /// Transform data, if this is a transform
    pub const fn as_transform(&self) -> Option<&TransformComponent> {
        match &self.kind {
            ComponentKind::Transform(transform) => Some(transform),
            _ => None,
        }
    }

    /// Transform data, mutably
    pub fn as_transform_mut(&mut self) -> Option<&mut TransformComponent> {
        match &mut self.kind {
            ComponentKind::Transform(transform) => Some(transform),
            _ => None,
        }
    }

    /// Physics data, if this is a physics body
    pub const fn as_physics(&self) -> Option<&PhysicsComponent> {
        match &self.kind {
            ComponentKind::Physics(physics) => Some(physics),
            _ => None,
        }
    }

    /// Physics data, mutably
    pub fn as_physics_mut(&mut self) -> Option<&mut PhysicsComponent> {
        match &mut self.kind {
            ComponentKind::Physics(physics) => Some(physics),
            _ => None,
        }
    }

    /// Graphical data, if this is drawable
    pub const fn as_graphical(&self) -> Option<&GraphicalComponent> {
        match &self.kind {
            ComponentKind::Graphical(graphical) => Some(graphical),
            _ => None,
        }
    }

    /// Graphical data, mutably
    pub fn as_graphical_mut(&mut self) -> Option<&mut GraphicalComponent> {
        match &mut self.kind {
            ComponentKind::Graphical(graphical) => Some(graphical),
            _ => None,
        }
    }

    /// Run the init hook. Engine kinds have no per-component work.
    pub(crate) fn init(&mut self, actor: &mut ActorContext<'_>) -> EngineResult<()> {
        match &mut self.kind {
            ComponentKind::Custom(behavior) => behavior.init(actor),
            _ => Ok(()),
        }
    }

    /// Run the update hook. Engine kinds are driven by their systems instead.
    pub(crate) fn update(&mut self, actor: &mut ActorContext<'_>, dt: f64) -> EngineResult<()> {
        match &mut self.kind {
            ComponentKind::Custom(behavior) => behavior.update(actor, dt),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("component_type", &self.component_type())
            .finish_non_exhaustive()
    }
}

/// Generates `"<base> <n>"` component ids from a monotonically increasing counter
///
/// Each scene owns one, so ids are unique among components created through it.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Create a generator starting at zero
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Produce the next id for `base`
    pub fn next_id(&mut self, base: &str) -> ComponentId {
        let id = ComponentId(format!("{base} {}", self.next));
        self.next += 1;
        id
    }

    /// Wrap `kind` in a component with a freshly generated id
    pub fn component(&mut self, kind: impl Into<ComponentKind>) -> Component {
        let kind = kind.into();
        let id = self.next_id(kind.component_type().base_name());
        Component::new(id, kind)
    }

    /// Wrap `behavior` in a custom component with a freshly generated id
    pub fn custom(&mut self, base: &str, behavior: impl Behavior + 'static) -> Component {
        let id = self.next_id(base);
        Component::custom(id, behavior)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Idle;

    impl Behavior for Idle {
        fn update(&mut self, _actor: &mut ActorContext<'_>, _dt: f64) -> EngineResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_id_generation_is_monotonic() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id("transform").as_str(), "transform 0");
        assert_eq!(ids.next_id("transform").as_str(), "transform 1");
        assert_eq!(ids.next_id("player").as_str(), "player 2");
    }

    #[test]
    fn test_generated_component_uses_kind_base_name() {
        let mut ids = IdGenerator::new();
        let physics = ids.component(PhysicsComponent::new());
        let script = ids.custom("script", Idle);

        assert_eq!(physics.id().as_str(), "physics 0");
        assert_eq!(script.id().as_str(), "script 1");
        assert_eq!(script.component_type(), ComponentType::Custom);
    }

    #[test]
    fn test_type_classification() {
        let transform = Component::new("t", TransformComponent::new());
        assert_eq!(transform.system_type(), SystemType::Transform);
        assert_eq!(transform.component_type(), ComponentType::Transform);
        assert!(transform.as_transform().is_some());
        assert!(transform.as_physics().is_none());
        assert!(transform.parent().is_none());

        assert_eq!(ComponentType::Sprite.system_type(), SystemType::Graphical);
        assert_eq!(ComponentType::AnimatedSprite.system_type(), SystemType::Graphical);
        assert_eq!(ComponentType::Custom.system_type(), SystemType::Custom);
    }
}
