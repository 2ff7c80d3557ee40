//! Bounce demo application
//!
//! Headless frame loop exercising the engine end to end: balls with random
//! velocities fall under gravity and bounce inside an arena. Once enough
//! bounces have been counted the score is handed to a summary scene through
//! the manager's shared data, and the demo transitions there.
//!
//! Drawing goes to a `RecordingSurface`, so the demo runs without a window.

use std::cell::Cell;
use std::rc::Rc;

use rand::prelude::*;
use stage_engine::foundation::logging;
use stage_engine::prelude::*;
use stage_engine::ConfigError;
use thiserror::Error;

const CONFIG_PATH: &str = "stage.toml";
const BALL_COUNT: usize = 8;
const ARENA_HALF_EXTENT: f64 = 4.0;
const BOUNCES_TO_FINISH: u32 = 40;
const MAX_FRAMES: u32 = 2_000;
const FRAME_DT: f64 = 1.0 / 60.0;

const ARENA: &str = "arena";
const SUMMARY: &str = "summary";
const SCORE_KEY: &str = "bounces";

#[derive(Error, Debug)]
enum DemoError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("scene '{0}' could not be queued")]
    Queue(&'static str),
}

/// Applies the body's configured gravity as a force every frame
struct Gravity;

impl Behavior for Gravity {
    fn update(&mut self, actor: &mut ActorContext<'_>, _dt: f64) -> EngineResult<()> {
        if let Some(physics) = actor.physics_mut() {
            let mut weight = physics.gravity();
            weight.mult_scalar(physics.mass());
            physics.apply_force(weight);
        }
        Ok(())
    }
}

/// Reflects the body off the arena walls and counts the hits
struct Walls {
    half_extent: f64,
    bounces: Rc<Cell<u32>>,
}

impl Behavior for Walls {
    fn update(&mut self, actor: &mut ActorContext<'_>, _dt: f64) -> EngineResult<()> {
        let Some(position) = actor.transform().map(|t| t.position) else {
            return Ok(());
        };
        let Some(physics) = actor.physics_mut() else {
            return Ok(());
        };

        let mut velocity = physics.velocity();
        let mut hit = false;
        if position.x.abs() > self.half_extent && position.x * velocity.x > 0.0 {
            velocity.x = -velocity.x;
            hit = true;
        }
        if position.y.abs() > self.half_extent && position.y * velocity.y > 0.0 {
            velocity.y = -velocity.y;
            hit = true;
        }

        if hit {
            physics.set_velocity(velocity);
            self.bounces.set(self.bounces.get() + 1);
            log::debug!("'{}' bounced at ({:.2}, {:.2})", actor.actor_id(), position.x, position.y);
        }
        Ok(())
    }
}

struct BounceDemo {
    config: EngineConfig,
    manager: SceneManager,
    surface: RecordingSurface,
    bounces: Rc<Cell<u32>>,
}

impl BounceDemo {
    fn new(config: EngineConfig) -> Result<Self, DemoError> {
        let bounces = Rc::new(Cell::new(0));
        let mut manager = SceneManager::new();
        manager.add_scene(build_arena(&config, &bounces)?)?;
        manager.add_scene(build_summary()?)?;

        Ok(Self {
            config,
            manager,
            surface: RecordingSurface::new(),
            bounces,
        })
    }

    fn queue(&mut self, scene: &'static str) -> Result<(), DemoError> {
        if !self.manager.push_scene_id_to_stack(scene) {
            return Err(DemoError::Queue(scene));
        }
        self.manager.transition()?;
        Ok(())
    }

    fn run(&mut self) -> Result<(), DemoError> {
        self.queue(ARENA)?;

        for frame in 0..MAX_FRAMES {
            self.surface.clear();
            self.manager.update(FRAME_DT)?;
            self.manager.draw(&mut self.surface)?;

            if frame % 120 == 0 {
                self.log_frame(frame);
            }

            let in_arena = self.manager.current_scene().map(SceneId::as_str) == Some(ARENA);
            if in_arena && self.bounces.get() >= BOUNCES_TO_FINISH {
                self.manager.put_shared_data(SCORE_KEY, self.bounces.get());
                log::info!("Arena finished after {frame} frames");
                self.queue(SUMMARY)?;
                self.report();
                return Ok(());
            }
        }

        log::warn!("Frame limit reached with {} bounces", self.bounces.get());
        Ok(())
    }

    fn log_frame(&self, frame: u32) {
        let Some(command) = self.surface.commands().first() else {
            return;
        };
        let pixels = command
            .placement
            .to_pixel_transform(&command.image, self.config.pixels_per_unit);
        log::info!(
            "frame {frame}: {} draws, first at ({:.0}px, {:.0}px)",
            self.surface.commands().len(),
            pixels.translate_x,
            pixels.translate_y
        );
    }

    fn report(&self) {
        let score = self.manager.get_shared::<u32>(SCORE_KEY).copied().unwrap_or_default();
        if let Some(scene) = self.manager.active_scene() {
            log::info!("Scene '{}' reports {score} bounces", scene.id());
        }
        if let Some(arena) = self.manager.scene(&SceneId::from(ARENA)) {
            let stats = arena.stats();
            log::info!(
                "Arena ran {} updates and {} draws",
                stats.updates,
                stats.draws
            );
        }
    }
}

fn build_arena(config: &EngineConfig, bounces: &Rc<Cell<u32>>) -> Result<Scene, DemoError> {
    let mut rng = thread_rng();
    let mut scene = Scene::new(ARENA);
    let ball_image = ImageHandle::new(1, 32, 32);

    for index in 0..BALL_COUNT {
        let position = vec2(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0));
        let velocity = vec2(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));

        let mut physics = PhysicsComponent::with_mass(rng.gen_range(0.5..2.0))?;
        physics.set_velocity(velocity);
        physics.set_gravity(vec2(0.0, -9.8));

        let sprite = StaticSprite::new(ball_image, config);
        let draw_order = i32::try_from(index % 3).unwrap_or_default();

        let ids = scene.ids_mut();
        let components = [
            ids.component(TransformComponent::from_position(position).with_scale(vec2(0.5, 0.5))),
            ids.component(physics),
            ids.component(GraphicalComponent::sprite(draw_order, sprite)),
            ids.custom("gravity", Gravity),
            ids.custom(
                "walls",
                Walls {
                    half_extent: ARENA_HALF_EXTENT,
                    bounces: Rc::clone(bounces),
                },
            ),
        ];

        let mut ball = Actor::new(format!("ball {index}"));
        for component in components {
            ball.add_component(component)?;
        }
        scene.add_actor(ball);
    }

    Ok(scene)
}

fn build_summary() -> Result<Scene, DemoError> {
    let mut scene = Scene::new(SUMMARY);
    let banner = ImageHandle::new(2, 400, 100);
    let raw = GraphicalComponent::raw(0, move |surface: &mut dyn Surface| {
        surface.draw_image(&banner, &Placement::new(vec2(-2.0, -0.5), vec2(4.0, 1.0), 0.0))
    });

    let mut title = Actor::new("title");
    let transform = scene.ids_mut().component(TransformComponent::new());
    let graphical = scene.ids_mut().component(raw);
    title.add_component(transform)?;
    title.add_component(graphical)?;
    scene.add_actor(title);
    Ok(scene)
}

/// Load `stage.toml`, or `None` when there is no usable file
fn load_config() -> Option<EngineConfig> {
    match EngineConfig::load_from_file(CONFIG_PATH) {
        Ok(config) => Some(config),
        Err(ConfigError::Io(_)) => None,
        Err(e) => {
            eprintln!("Ignoring {CONFIG_PATH}: {e}");
            None
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = if let Some(config) = load_config() {
        logging::init_with_filter(&config.log_filter);
        config
    } else {
        // no config file: take the filter from RUST_LOG
        logging::init();
        EngineConfig::default()
    };

    log::info!("Starting bounce demo");
    let mut demo = BounceDemo::new(config)?;
    demo.run()?;
    log::info!("Bounce demo finished");
    Ok(())
}
