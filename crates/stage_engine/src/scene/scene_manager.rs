//! Scene Manager
//!
//! Owns every scene of a session and decides which one runs. Transitions are
//! queued first-in first-out and applied one at a time by [`SceneManager::transition`];
//! the queue is a list of pending scenes, not a navigation history.
//!
//! A shared key/value store lets scenes hand data to each other across
//! transitions. Values are untyped; callers keep types consistent per key.

use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::fmt;

use crate::error::{EngineError, EngineResult};
use crate::render::Surface;
use crate::scene::{Scene, SceneId, SessionId};

/// Owner of all scenes and the active/pending transition state
pub struct SceneManager {
    session: SessionId,
    scenes: HashMap<SceneId, Scene>,
    current_scene: Option<SceneId>,
    pending: VecDeque<SceneId>,
    shared_data: HashMap<String, Box<dyn Any>>,
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneManager {
    /// Create an empty manager for the default session
    pub fn new() -> Self {
        Self::with_session(SessionId::default())
    }

    /// Create an empty manager identified by `session`
    pub fn with_session(session: SessionId) -> Self {
        Self {
            session,
            scenes: HashMap::new(),
            current_scene: None,
            pending: VecDeque::new(),
            shared_data: HashMap::new(),
        }
    }

    /// Session handle scenes are bound to
    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// Register `scene`, binding it to this manager
    ///
    /// Fails with `ScenePresent` if a scene with the same id is registered.
    pub fn add_scene(&mut self, mut scene: Scene) -> EngineResult<()> {
        if self.scenes.contains_key(scene.id()) {
            log::warn!("Scene '{}' is already registered", scene.id());
            return Err(EngineError::ScenePresent(scene.id().clone()));
        }
        scene.bind_manager(self.session);
        log::info!("Registered scene '{}'", scene.id());
        self.scenes.insert(scene.id().clone(), scene);
        Ok(())
    }

    /// Registered scene with the given id
    pub fn scene(&self, id: &SceneId) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Registered scene with the given id, mutably
    pub fn scene_mut(&mut self, id: &SceneId) -> Option<&mut Scene> {
        self.scenes.get_mut(id)
    }

    /// Number of registered scenes
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Id of the active scene, if any transition happened yet
    pub const fn current_scene(&self) -> Option<&SceneId> {
        self.current_scene.as_ref()
    }

    /// The active scene
    pub fn active_scene(&self) -> Option<&Scene> {
        self.current_scene.as_ref().and_then(|id| self.scenes.get(id))
    }

    /// The active scene, mutably
    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        self.current_scene.as_ref().and_then(|id| self.scenes.get_mut(id))
    }

    /// Queue a transition to `id`. Returns `false` if `id` is not registered.
    pub fn push_scene_id_to_stack(&mut self, id: impl Into<SceneId>) -> bool {
        let id = id.into();
        if !self.scenes.contains_key(&id) {
            log::warn!("Cannot queue unknown scene '{id}'");
            return false;
        }
        log::debug!("Queued transition to scene '{id}'");
        self.pending.push_back(id);
        true
    }

    /// Transitions still queued, front first
    pub fn pending_transitions(&self) -> impl Iterator<Item = &SceneId> {
        self.pending.iter()
    }

    /// Activate the next queued scene and initialize it
    ///
    /// Fails with `NoTransitionPending` on an empty queue, leaving the active
    /// scene as it was. If the new scene's init fails it still becomes active
    /// and the error is returned.
    pub fn transition(&mut self) -> EngineResult<()> {
        let next = self.pending.pop_front().ok_or(EngineError::NoTransitionPending)?;
        let scene = self
            .scenes
            .get_mut(&next)
            .ok_or_else(|| EngineError::SceneNotFound(next.clone()))?;

        match &self.current_scene {
            Some(previous) => log::info!("Transition '{previous}' -> '{next}'"),
            None => log::info!("Transition to '{next}'"),
        }

        self.current_scene = Some(next);
        scene.init()
    }

    /// Advance the active scene by `dt` seconds
    pub fn update(&mut self, dt: f64) -> EngineResult<()> {
        self.active_scene_mut().ok_or(EngineError::NoActiveScene)?.update(dt)
    }

    /// Draw the active scene onto `surface`
    pub fn draw(&mut self, surface: &mut dyn Surface) -> EngineResult<()> {
        self.active_scene_mut().ok_or(EngineError::NoActiveScene)?.draw(surface)
    }

    /// Untyped shared value stored under `key`
    pub fn get_shared_data(&self, key: &str) -> Option<&dyn Any> {
        self.shared_data.get(key).map(Box::as_ref)
    }

    /// Shared value under `key`, if present and of type `T`
    pub fn get_shared<T: Any>(&self, key: &str) -> Option<&T> {
        self.get_shared_data(key).and_then(|value| value.downcast_ref())
    }

    /// Shared value under `key` mutably, if present and of type `T`
    pub fn get_shared_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.shared_data.get_mut(key).and_then(|value| value.downcast_mut())
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn put_shared_data(&mut self, key: impl Into<String>, value: impl Any) {
        self.shared_data.insert(key.into(), Box::new(value));
    }

    /// Remove and return the value under `key`
    pub fn remove_shared_data(&mut self, key: &str) -> Option<Box<dyn Any>> {
        self.shared_data.remove(key)
    }
}

impl fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.shared_data.keys().collect();
        keys.sort();
        f.debug_struct("SceneManager")
            .field("session", &self.session)
            .field("scenes", &self.scenes.keys().collect::<Vec<_>>())
            .field("current_scene", &self.current_scene)
            .field("pending", &self.pending)
            .field("shared_keys", &keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    fn manager_with(ids: &[&str]) -> SceneManager {
        let mut manager = SceneManager::new();
        for id in ids {
            manager.add_scene(Scene::new(*id)).unwrap();
        }
        manager
    }

    #[test]
    fn test_add_scene_binds_manager() {
        let mut manager = SceneManager::with_session(SessionId(7));
        manager.add_scene(Scene::new("menu")).unwrap();

        let scene = manager.scene(&SceneId::from("menu")).unwrap();
        assert_eq!(scene.manager(), Some(SessionId(7)));
    }

    #[test]
    fn test_duplicate_scene_rejected() {
        let mut manager = manager_with(&["menu"]);
        let result = manager.add_scene(Scene::new("menu"));
        assert!(matches!(result, Err(EngineError::ScenePresent(id)) if id.as_str() == "menu"));
        assert_eq!(manager.scene_count(), 1);
    }

    #[test]
    fn test_push_unknown_scene_fails() {
        let mut manager = manager_with(&["menu"]);
        assert!(!manager.push_scene_id_to_stack("nowhere"));
        assert_eq!(manager.pending_transitions().count(), 0);
    }

    #[test]
    fn test_transition_is_fifo() {
        let mut manager = manager_with(&["a", "b", "c"]);
        assert!(manager.push_scene_id_to_stack("b"));
        assert!(manager.push_scene_id_to_stack("c"));

        manager.transition().unwrap();
        assert_eq!(manager.current_scene(), Some(&SceneId::from("b")));
        manager.transition().unwrap();
        assert_eq!(manager.current_scene(), Some(&SceneId::from("c")));
        assert_eq!(manager.pending_transitions().count(), 0);
    }

    #[test]
    fn test_transition_with_empty_queue() {
        let mut manager = manager_with(&["a"]);
        manager.push_scene_id_to_stack("a");
        manager.transition().unwrap();

        assert!(matches!(manager.transition(), Err(EngineError::NoTransitionPending)));
        assert_eq!(manager.current_scene(), Some(&SceneId::from("a")));
    }

    #[test]
    fn test_no_active_scene() {
        let mut manager = manager_with(&["a"]);
        let mut surface = RecordingSurface::new();

        assert!(manager.current_scene().is_none());
        assert!(matches!(manager.update(0.1), Err(EngineError::NoActiveScene)));
        assert!(matches!(manager.draw(&mut surface), Err(EngineError::NoActiveScene)));
    }

    #[test]
    fn test_only_active_scene_updates() {
        let mut manager = manager_with(&["a", "b"]);
        manager.push_scene_id_to_stack("a");
        manager.transition().unwrap();

        manager.update(0.1).unwrap();
        manager.update(0.1).unwrap();

        assert_eq!(manager.scene(&SceneId::from("a")).unwrap().stats().updates, 2);
        assert_eq!(manager.scene(&SceneId::from("b")).unwrap().stats().updates, 0);
    }

    #[test]
    fn test_shared_data() {
        let mut manager = SceneManager::new();
        manager.put_shared_data("score", 42_u32);

        assert_eq!(manager.get_shared::<u32>("score"), Some(&42));
        assert!(manager.get_shared_data("score").is_some());
        assert!(manager.get_shared_data("missing").is_none());
        // wrong type reads as absent
        assert!(manager.get_shared::<String>("score").is_none());

        *manager.get_shared_mut::<u32>("score").unwrap() += 1;
        assert_eq!(manager.get_shared::<u32>("score"), Some(&43));

        manager.put_shared_data("score", "replaced".to_string());
        assert_eq!(manager.get_shared::<String>("score").map(String::as_str), Some("replaced"));

        assert!(manager.remove_shared_data("score").is_some());
        assert!(manager.get_shared_data("score").is_none());
    }
}
