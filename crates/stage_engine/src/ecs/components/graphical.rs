//! Graphical component for actors that get drawn
//!
//! A graphical component is either *raw*, drawing itself through a routine
//! the caller supplies, or *composed*, in which case the graphics system
//! places its sprite relative to the actor's transform.

use std::fmt;

use crate::ecs::ComponentType;
use crate::foundation::math::{vec2, Vec2};
use crate::render::{AnimatedSource, ImageHandle, SpriteSource, Surface, SurfaceError};

/// Caller-controlled draw routine for raw graphical components
pub trait RawDraw {
    /// Draw directly onto `surface`
    fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), SurfaceError>;
}

impl<F> RawDraw for F
where
    F: FnMut(&mut dyn Surface) -> Result<(), SurfaceError>,
{
    fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        self(surface)
    }
}

/// What a graphical component draws
pub enum GraphicalBody {
    /// Caller-supplied routine; the engine computes nothing
    Raw(Box<dyn RawDraw>),
    /// Static sprite placed by the engine
    Sprite(Box<dyn SpriteSource>),
    /// Animated sprite placed by the engine
    AnimatedSprite(Box<dyn AnimatedSource>),
}

/// Drawable attached to an actor
pub struct GraphicalComponent {
    draw_order: i32,
    relative_pos: Vec2,
    rotation: f64,
    body: GraphicalBody,
}

impl GraphicalComponent {
    /// Raw component drawing through `routine` at layer `draw_order`
    pub fn raw(draw_order: i32, routine: impl RawDraw + 'static) -> Self {
        Self::with_body(draw_order, GraphicalBody::Raw(Box::new(routine)))
    }

    /// Composed component backed by a static sprite source
    pub fn sprite(draw_order: i32, source: impl SpriteSource + 'static) -> Self {
        Self::with_body(draw_order, GraphicalBody::Sprite(Box::new(source)))
    }

    /// Composed component backed by an animation
    pub fn animated(draw_order: i32, source: impl AnimatedSource + 'static) -> Self {
        Self::with_body(draw_order, GraphicalBody::AnimatedSprite(Box::new(source)))
    }

    fn with_body(draw_order: i32, body: GraphicalBody) -> Self {
        Self {
            draw_order,
            relative_pos: Vec2::zeros(),
            rotation: 0.0,
            body,
        }
    }

    /// Builder pattern: Set position relative to the transform
    #[must_use]
    pub fn with_relative_pos(mut self, relative_pos: Vec2) -> Self {
        self.relative_pos = relative_pos;
        self
    }

    /// Builder pattern: Set rotation relative to the transform
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Fine-grained type derived from the body
    pub const fn component_type(&self) -> ComponentType {
        match self.body {
            GraphicalBody::Raw(_) => ComponentType::Graphical,
            GraphicalBody::Sprite(_) => ComponentType::Sprite,
            GraphicalBody::AnimatedSprite(_) => ComponentType::AnimatedSprite,
        }
    }

    /// Layer this component is drawn in (lower first)
    pub const fn draw_order(&self) -> i32 {
        self.draw_order
    }

    /// Move this component to another layer
    pub fn set_draw_order(&mut self, draw_order: i32) {
        self.draw_order = draw_order;
    }

    /// Whether the caller positions this component itself
    pub const fn is_raw(&self) -> bool {
        matches!(self.body, GraphicalBody::Raw(_))
    }

    /// Anchor position relative to the transform, in world units
    pub const fn relative_pos(&self) -> Vec2 {
        self.relative_pos
    }

    /// Set the anchor position relative to the transform
    pub fn set_relative_pos(&mut self, relative_pos: Vec2) {
        self.relative_pos = relative_pos;
    }

    /// Rotation relative to the transform, in radians
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Set the rotation relative to the transform
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    /// Unscaled size in world units (unit square for raw components)
    pub fn size(&self) -> Vec2 {
        match &self.body {
            GraphicalBody::Raw(_) => vec2(1.0, 1.0),
            GraphicalBody::Sprite(source) => source.intrinsic_size(),
            GraphicalBody::AnimatedSprite(source) => source.intrinsic_size(),
        }
    }

    /// Image to draw this tick. Animations advance as a side effect.
    pub fn current_image(&mut self) -> Option<ImageHandle> {
        match &mut self.body {
            GraphicalBody::Raw(_) => None,
            GraphicalBody::Sprite(source) => source.current_image(),
            GraphicalBody::AnimatedSprite(source) => source.current_image(),
        }
    }

    /// Animation controls, for animated sprites
    pub fn animation(&self) -> Option<&dyn AnimatedSource> {
        match &self.body {
            GraphicalBody::AnimatedSprite(source) => Some(source.as_ref()),
            _ => None,
        }
    }

    /// Animation controls, mutably
    pub fn animation_mut(&mut self) -> Option<&mut (dyn AnimatedSource + 'static)> {
        match &mut self.body {
            GraphicalBody::AnimatedSprite(source) => Some(source.as_mut()),
            _ => None,
        }
    }

    /// Run the raw draw routine. Composed components draw nothing here.
    pub fn draw_raw(&mut self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        match &mut self.body {
            GraphicalBody::Raw(routine) => routine.draw(surface),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for GraphicalComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphicalComponent")
            .field("component_type", &self.component_type())
            .field("draw_order", &self.draw_order)
            .field("relative_pos", &self.relative_pos)
            .field("rotation", &self.rotation)
            .finish_non_exhaustive()
    }
}
