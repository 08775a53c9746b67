//! Falling bodies demo
//!
//! Drops a handful of spheres and boxes onto a ground plane and logs what
//! the collider systems resolve. Gravity is integrated here, before each
//! fixed tick, since the collision pipeline only separates bodies.
//!
//! Usage: `physics_demo [config.toml|config.ron]`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rust_physics::foundation::logging;
use rust_physics::prelude::*;

const GRAVITY: f32 = -9.81;
const SIMULATED_SECONDS: f32 = 3.0;
const FRAME_TIME: f32 = 1.0 / 30.0;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("Invalid component: {0}")]
    Component(#[from] ComponentError),

    #[error(transparent)]
    World(#[from] WorldError),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);
    log::info!("Starting physics demo");

    if let Err(err) = run() {
        log::error!("Demo failed: {err}");
        return Err(err.into());
    }
    Ok(())
}

fn run() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading physics config from {path}");
            PhysicsConfig::load_from_file(&path)?
        }
        None => PhysicsConfig::default(),
    };

    let mut world = World::new();
    let bodies = build_scene(&mut world)?;
    log::info!("Scene ready with {} entities", world.entity_count());

    let mut simulation = Simulation::from_config(&config)?;
    let contacts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&contacts);
    simulation.bind_collision(move |event| {
        counter.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "tick {} {}: {:?} <- {:?} depth {:.4}",
            event.tick,
            event.shapes,
            event.entity_a,
            event.entity_b,
            event.intersection.distance
        );
    });

    // Gravity is integrated once per fixed tick, ahead of the collider systems
    let mut timestep = FixedTimestep::new(config.fixed_timestep, config.max_substeps)?;
    let mut elapsed = 0.0;
    while elapsed < SIMULATED_SECONDS {
        for _ in 0..timestep.accumulate(FRAME_TIME) {
            integrate(&world, timestep.step())?;
            simulation.fixed_update(&world)?;
        }
        elapsed += FRAME_TIME;
    }

    for entity in bodies {
        if let Some(transform) = world.get_component::<TransformComponent>(entity) {
            let p = transform.position;
            log::info!("{entity:?} rests at ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
        }
    }
    log::info!(
        "Ran {} ticks, resolved {} contacts",
        simulation.tick(),
        contacts.load(Ordering::Relaxed)
    );
    Ok(())
}

fn build_scene(world: &mut World) -> Result<Vec<Entity>, DemoError> {
    let ground = world.create_entity();
    world.add_component(ground, PlaneColliderComponent::ground(0.0)?);

    let mut bodies = Vec::new();
    for (i, height) in [2.0_f32, 4.5, 7.0].into_iter().enumerate() {
        let ball = world.create_entity();
        let x = i as f32 * 0.6;
        world.add_component(ball, TransformComponent::from_position(Vec3::new(x, height, 0.0)));
        world.add_component(ball, SphereColliderComponent::new(0.5)?);
        world.add_component(ball, RigidBodyComponent::new(1.0 + i as f32)?);
        bodies.push(ball);
    }

    // A static shelf with a crate dropping onto it
    let shelf = world.create_entity();
    world.add_component(shelf, TransformComponent::from_position(Vec3::new(5.0, 1.0, 0.0)));
    world.add_component(shelf, BoxColliderComponent::new(Vec3::new(2.0, 0.25, 2.0))?);
    world.add_component(shelf, RigidBodyComponent::new_static());

    let crate_box = world.create_entity();
    world.add_component(crate_box, TransformComponent::from_position(Vec3::new(5.0, 4.0, 0.0)));
    world.add_component(crate_box, BoxColliderComponent::cube(0.5)?);
    world.add_component(crate_box, RigidBodyComponent::new(2.0)?);
    world.add_component(
        crate_box,
        CollisionFilterComponent::new(CollisionLayers::DEBRIS, CollisionLayers::all()),
    );
    bodies.push(crate_box);

    Ok(bodies)
}

/// Semi-implicit Euler step for every dynamic body
fn integrate(world: &World, dt: f32) -> Result<(), DemoError> {
    let mut rigid_bodies = world.storage_mut::<RigidBodyComponent>()?;
    let mut transforms = world.storage_mut::<TransformComponent>()?;

    for (entity, body) in rigid_bodies.iter_mut() {
        if body.is_static() {
            continue;
        }
        body.velocity.y += GRAVITY * dt;
        if let Some(transform) = transforms.get_mut(entity) {
            transform.translate(body.velocity * dt);
        }
    }
    Ok(())
}
