//! # Graphics System
//!
//! Collects every actor holding both a graphical and a transform component,
//! composes the component's local placement with the actor's transform, and
//! submits the resulting draws to a [`Surface`] layer by layer.
//!
//! Raw components bypass composition and run their own draw routine at their
//! layer. Composed components without a current image (an inactive animation,
//! for instance) are skipped.

use std::collections::BTreeMap;

use crate::ecs::components::{GraphicalComponent, TransformComponent};
use crate::ecs::{ActorId, ActorMap, System};
use crate::error::EngineResult;
use crate::foundation::math::{Vec2, Vec2Ext};
use crate::render::{ImageHandle, Placement, Surface};

/// Compose a graphical component's local placement with its actor's transform
///
/// The relative size is scaled by the transform scale, the anchor is shifted
/// by half the scaled size so the image centers on it, then rotated and
/// translated into world space. Rotations add.
pub fn compose_placement(graphical: &GraphicalComponent, transform: &TransformComponent) -> Placement {
    let size = scaled_size(graphical, transform);

    let mut half_size = size;
    half_size.mult_scalar(-0.5);

    let mut position = graphical.relative_pos();
    position.translate(half_size);
    position.rotate(transform.rotation);
    position.translate(transform.position);

    Placement::new(position, size, graphical.rotation() + transform.rotation)
}

/// Counters from the last draw pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphicsStats {
    /// Draws submitted, raw routines included
    pub draw_calls: usize,
    /// Composed components that had no image to draw
    pub skipped: usize,
    /// Distinct layers visited
    pub layers: usize,
}

/// A draw collected for a layer, executed once all layers are known
enum PendingDraw {
    Image { image: ImageHandle, placement: Placement },
    Raw(ActorId),
}

/// System drawing actors in ascending draw order
#[derive(Debug)]
pub struct GraphicsSystem {
    enabled: bool,
    stats: GraphicsStats,
}

impl Default for GraphicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsSystem {
    /// Create an enabled graphics system
    pub const fn new() -> Self {
        Self {
            enabled: true,
            stats: GraphicsStats {
                draw_calls: 0,
                skipped: 0,
                layers: 0,
            },
        }
    }

    /// Enable or disable drawing
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if the system is enabled
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Counters from the last [`draw`](Self::draw)
    pub const fn stats(&self) -> GraphicsStats {
        self.stats
    }

    /// Draw every eligible actor onto `surface`
    ///
    /// Layers are visited in ascending order. Within a layer the order across
    /// actors is unspecified. The first surface failure stops the pass.
    pub fn draw(&mut self, actors: &mut ActorMap, surface: &mut dyn Surface) -> EngineResult<()> {
        self.stats = GraphicsStats::default();
        if !self.enabled {
            return Ok(());
        }

        let layers = self.collect(actors);
        self.stats.layers = layers.len();

        for (layer, draws) in layers {
            log::trace!("Drawing layer {layer}: {} calls", draws.len());
            for draw in draws {
                match draw {
                    PendingDraw::Image { image, placement } => {
                        surface.draw_image(&image, &placement)?;
                    }
                    PendingDraw::Raw(actor_id) => {
                        if let Some(graphical) = actors.get_mut(&actor_id).and_then(|a| a.graphical_mut()) {
                            graphical.draw_raw(surface)?;
                        }
                    }
                }
                self.stats.draw_calls += 1;
            }
        }

        Ok(())
    }

    /// Group this frame's draws by layer
    ///
    /// Querying a composed component's image advances its animation, so every
    /// eligible component is queried exactly once per pass.
    fn collect(&mut self, actors: &mut ActorMap) -> BTreeMap<i32, Vec<PendingDraw>> {
        let mut layers: BTreeMap<i32, Vec<PendingDraw>> = BTreeMap::new();

        for (actor_id, actor) in actors.iter_mut() {
            let Some((graphical, transform)) = actor.graphical_and_transform_mut() else {
                continue;
            };

            let draw = if graphical.is_raw() {
                PendingDraw::Raw(actor_id.clone())
            } else {
                match graphical.current_image() {
                    Some(image) => PendingDraw::Image {
                        image,
                        placement: compose_placement(graphical, transform),
                    },
                    None => {
                        self.stats.skipped += 1;
                        continue;
                    }
                }
            };

            layers.entry(graphical.draw_order()).or_default().push(draw);
        }

        layers
    }
}

impl System for GraphicsSystem {
    fn name(&self) -> &'static str {
        "graphics"
    }

    /// Drawing happens in [`GraphicsSystem::draw`]; there is no per-frame state to advance
    fn update(&mut self, _actors: &mut ActorMap, _dt: f64) -> EngineResult<()> {
        Ok(())
    }
}

/// Size a composed component would have under `transform`, ignoring position
pub fn scaled_size(graphical: &GraphicalComponent, transform: &TransformComponent) -> Vec2 {
    let mut size = graphical.size();
    size.mult_vec(transform.scale);
    size
}
