//! System trait for engine-level processing

use crate::ecs::ActorMap;
use crate::error::EngineResult;

/// Processes the actors of a scene once per frame
///
/// Systems are owned by a scene and run before the actors' own hooks.
pub trait System {
    /// Name used in log output
    fn name(&self) -> &'static str;

    /// Prepare for the first frame
    fn init(&mut self, _actors: &mut ActorMap) -> EngineResult<()> {
        Ok(())
    }

    /// Run one step of `dt` seconds
    fn update(&mut self, actors: &mut ActorMap, dt: f64) -> EngineResult<()>;
}
