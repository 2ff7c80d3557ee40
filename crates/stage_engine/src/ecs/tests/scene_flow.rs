//! Full frames through the scene manager: transitions, drawing, failures

use std::cell::Cell;
use std::rc::Rc;

use crate::config::EngineConfig;
use crate::ecs::components::{GraphicalComponent, TransformComponent};
use crate::ecs::{Actor, ActorContext, Behavior};
use crate::error::{EngineError, EngineResult};
use crate::foundation::math::vec2;
use crate::render::{AnimatedSource, AnimatedSprite, ImageHandle, Placement, RecordingSurface, StaticSprite, Surface};
use crate::scene::{Scene, SceneId, SceneManager};

struct InitProbe(Rc<Cell<u32>>);

impl Behavior for InitProbe {
    fn init(&mut self, _actor: &mut ActorContext<'_>) -> EngineResult<()> {
        self.0.set(self.0.get() + 1);
        Ok(())
    }

    fn update(&mut self, _actor: &mut ActorContext<'_>, _dt: f64) -> EngineResult<()> {
        Ok(())
    }
}

struct FailAfter {
    frames: u32,
}

impl Behavior for FailAfter {
    fn update(&mut self, _actor: &mut ActorContext<'_>, _dt: f64) -> EngineResult<()> {
        if self.frames == 0 {
            return Err(EngineError::Custom("out of fuel".to_string()));
        }
        self.frames -= 1;
        Ok(())
    }
}

fn sprite_actor(scene: &mut Scene, name: &str, draw_order: i32, image_id: u64) -> Actor {
    let mut actor = Actor::new(name);
    let sprite = StaticSprite::new(ImageHandle::new(image_id, 100, 100), &EngineConfig::default());
    let transform = scene.ids_mut().component(TransformComponent::new());
    let graphical = scene.ids_mut().component(GraphicalComponent::sprite(draw_order, sprite));
    actor.add_component(transform).unwrap();
    actor.add_component(graphical).unwrap();
    actor
}

fn start(manager: &mut SceneManager, id: &str) {
    assert!(manager.push_scene_id_to_stack(id));
    manager.transition().unwrap();
}

#[test]
fn test_transition_initializes_new_scene_once() {
    let inits = Rc::new(Cell::new(0));
    let mut manager = SceneManager::new();
    manager.add_scene(Scene::new("a")).unwrap();

    let mut b = Scene::new("b");
    let probe = b.ids_mut().custom("probe", InitProbe(Rc::clone(&inits)));
    let mut watcher = Actor::new("watcher");
    watcher.add_component(probe).unwrap();
    b.add_actor(watcher);
    manager.add_scene(b).unwrap();

    start(&mut manager, "a");
    manager.update(0.1).unwrap();

    assert!(manager.push_scene_id_to_stack("b"));
    manager.transition().unwrap();

    assert_eq!(manager.current_scene(), Some(&SceneId::from("b")));
    assert_eq!(inits.get(), 1);
    assert_eq!(manager.active_scene().unwrap().stats().inits, 1);
}

#[test]
fn test_draw_order_across_actors() {
    let mut scene = Scene::new("stage");
    for (name, order, image) in [("far", 3, 30), ("near", 1, 10), ("mid", 2, 20), ("mid2", 2, 21)] {
        let actor = sprite_actor(&mut scene, name, order, image);
        scene.add_actor(actor);
    }
    let mut manager = SceneManager::new();
    manager.add_scene(scene).unwrap();
    start(&mut manager, "stage");

    let mut surface = RecordingSurface::new();
    manager.draw(&mut surface).unwrap();

    let layers: Vec<u64> = surface.commands().iter().map(|c| c.image.id / 10).collect();
    assert_eq!(layers, vec![1, 2, 2, 3]);
    let stats = manager.active_scene().unwrap().graphics().stats();
    assert_eq!(stats.draw_calls, 4);
    assert_eq!(stats.layers, 3);
}

#[test]
fn test_raw_component_draws_in_its_layer() {
    let mut scene = Scene::new("stage");
    let front = sprite_actor(&mut scene, "front", 5, 50);
    scene.add_actor(front);

    let overlay = ImageHandle::new(99, 10, 10);
    let raw = GraphicalComponent::raw(-1, move |surface: &mut dyn Surface| {
        surface.draw_image(&overlay, &Placement::new(vec2(7.0, 7.0), vec2(1.0, 1.0), 0.0))
    });
    let mut hud = Actor::new("hud");
    let transform = scene.ids_mut().component(TransformComponent::from_position(vec2(100.0, 100.0)));
    let graphical = scene.ids_mut().component(raw);
    hud.add_component(transform).unwrap();
    hud.add_component(graphical).unwrap();
    scene.add_actor(hud);

    let mut surface = RecordingSurface::new();
    scene.draw(&mut surface).unwrap();

    let commands = surface.commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].image.id, 99);
    // raw routines position themselves; the transform is not applied
    assert_eq!(commands[0].placement.x, 7.0);
    assert_eq!(commands[1].image.id, 50);
}

#[test]
fn test_inactive_animation_is_skipped() {
    let mut scene = Scene::new("stage");
    let frames = vec![ImageHandle::new(1, 100, 100), ImageHandle::new(2, 100, 100)];
    let mut animation = AnimatedSprite::new(frames, 1.0, true, &EngineConfig::default());
    animation.set_active(false);

    let mut actor = Actor::new("flag");
    let transform = scene.ids_mut().component(TransformComponent::new());
    let graphical = scene.ids_mut().component(GraphicalComponent::animated(0, animation));
    actor.add_component(transform).unwrap();
    actor.add_component(graphical).unwrap();
    scene.add_actor(actor);

    let mut surface = RecordingSurface::new();
    scene.draw(&mut surface).unwrap();

    assert!(surface.commands().is_empty());
    assert_eq!(scene.graphics().stats().skipped, 1);

    scene
        .get_actor_mut("flag")
        .and_then(Actor::graphical_mut)
        .and_then(GraphicalComponent::animation_mut)
        .unwrap()
        .set_active(true);
    scene.draw(&mut surface).unwrap();
    assert_eq!(surface.commands().len(), 1);
}

#[test]
fn test_behavior_failure_propagates_through_manager() {
    let mut scene = Scene::new("doomed");
    let mut actor = Actor::new("rocket");
    let fuel = scene.ids_mut().custom("fuel", FailAfter { frames: 1 });
    actor.add_component(fuel).unwrap();
    scene.add_actor(actor);

    let mut manager = SceneManager::new();
    manager.add_scene(scene).unwrap();
    start(&mut manager, "doomed");

    manager.update(0.1).unwrap();
    let result = manager.update(0.1);

    assert!(matches!(result, Err(EngineError::Custom(message)) if message == "out of fuel"));
    assert_eq!(manager.active_scene().unwrap().stats().updates, 1);
}

#[test]
fn test_draw_failure_propagates_through_manager() {
    let mut scene = Scene::new("stage");
    for (name, order) in [("a", 0), ("b", 1)] {
        let actor = sprite_actor(&mut scene, name, order, 1);
        scene.add_actor(actor);
    }
    let mut manager = SceneManager::new();
    manager.add_scene(scene).unwrap();
    start(&mut manager, "stage");

    let mut surface = RecordingSurface::fail_after(1);
    let result = manager.draw(&mut surface);

    assert!(matches!(result, Err(EngineError::Draw(_))));
    assert_eq!(surface.commands().len(), 1);
    assert_eq!(manager.active_scene().unwrap().stats().draws, 0);
}

#[test]
fn test_shared_data_survives_transition() {
    let mut manager = SceneManager::new();
    manager.add_scene(Scene::new("play")).unwrap();
    manager.add_scene(Scene::new("results")).unwrap();
    start(&mut manager, "play");

    manager.put_shared_data("score", 1200_u64);
    start(&mut manager, "results");

    assert_eq!(manager.get_shared::<u64>("score"), Some(&1200));
    assert!(manager.get_shared_data("missing").is_none());
}
