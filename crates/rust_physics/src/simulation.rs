//! Fixed-tick simulation driver
//!
//! Turns variable frame time into fixed ticks and runs the registered
//! systems once per tick. Contacts resolved during a tick are broadcast on
//! [`Simulation::on_collision`] after that tick has completed, so listeners
//! always see settled component state.

use crate::config::{BroadPhaseKind, ConfigError, PhysicsConfig};
use crate::ecs::systems::{AabbColliderSystem, PlaneSphereColliderSystem, SphereColliderSystem};
use crate::ecs::{Event, ListenerHandle, System, SystemError, SystemScheduler, TickContext, World};
use crate::foundation::time::FixedTimestep;
use crate::physics::{AllPairs, BroadPhase, CollisionEvent, ContactSolver, SweepAndPrune};

/// Errors raised while stepping or building a simulation
#[derive(thiserror::Error, Debug)]
pub enum SimulationError {
    /// A system failed during a tick
    #[error("System error: {0}")]
    System(#[from] SystemError),

    /// The configuration was rejected
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Drives the collider systems at a fixed rate
pub struct Simulation {
    scheduler: SystemScheduler,
    timestep: FixedTimestep,
    tick: u64,
    last_events: Vec<CollisionEvent>,

    /// Fired once per resolved contact, after the tick that produced it
    pub on_collision: Event<CollisionEvent>,
}

impl Simulation {
    /// Create a simulation with no systems
    pub fn new(timestep: FixedTimestep) -> Self {
        Self {
            scheduler: SystemScheduler::new(),
            timestep,
            tick: 0,
            last_events: Vec::new(),
            on_collision: Event::new(),
        }
    }

    /// Create a simulation running the three collider systems
    ///
    /// Systems run in the order box/box, sphere/sphere, plane/sphere.
    pub fn from_config(config: &PhysicsConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let solver = ContactSolver::new(config.solver_settings());
        let mut simulation = Self::new(FixedTimestep::new(config.fixed_timestep, config.max_substeps)?);
        simulation.add_system(Box::new(AabbColliderSystem::with_broad_phase(
            solver,
            broad_phase(config.broad_phase),
        )));
        simulation.add_system(Box::new(SphereColliderSystem::with_broad_phase(
            solver,
            broad_phase(config.broad_phase),
        )));
        simulation.add_system(Box::new(PlaneSphereColliderSystem::new(solver)));

        log::info!(
            "Physics simulation ready: step {:.4}s, {} substeps max, {:?} broad phase",
            config.fixed_timestep,
            config.max_substeps,
            config.broad_phase
        );
        Ok(simulation)
    }

    /// Append a system to the run order
    pub fn add_system(&mut self, system: Box<dyn System>) {
        self.scheduler.add_system(system);
    }

    /// Registered systems
    pub fn scheduler(&self) -> &SystemScheduler {
        &self.scheduler
    }

    /// Timestep accumulator
    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }

    /// Number of ticks run so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Bind a collision listener
    pub fn bind_collision<F>(&mut self, listener: F) -> ListenerHandle
    where
        F: FnMut(&CollisionEvent) + Send + 'static,
    {
        self.on_collision.bind(listener)
    }

    /// Contacts resolved during the most recent tick
    pub fn last_events(&self) -> &[CollisionEvent] {
        &self.last_events
    }

    /// Advance by `delta_time` seconds, running every fixed tick now due
    ///
    /// Returns the number of ticks run.
    pub fn update(&mut self, world: &World, delta_time: f32) -> Result<u32, SimulationError> {
        let due = self.timestep.accumulate(delta_time);
        for _ in 0..due {
            self.fixed_update(world)?;
        }
        Ok(due)
    }

    /// Run exactly one fixed tick
    pub fn fixed_update(&mut self, world: &World) -> Result<(), SimulationError> {
        let mut ctx = TickContext::new(world, self.tick);
        let result = self.scheduler.run_tick(&mut ctx);
        self.tick += 1;
        self.last_events = ctx.into_events();
        result?;

        for event in &self.last_events {
            self.on_collision.broadcast(event);
        }
        Ok(())
    }
}

fn broad_phase(kind: BroadPhaseKind) -> Box<dyn BroadPhase> {
    match kind {
        BroadPhaseKind::AllPairs => Box::new(AllPairs),
        BroadPhaseKind::SweepAndPrune => Box::new(SweepAndPrune),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{
        PlaneColliderComponent, RigidBodyComponent, SphereColliderComponent, TransformComponent,
    };
    use crate::foundation::math::Vec3;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn ball_on_ground(world: &mut World, y: f32) -> crate::ecs::Entity {
        let ground = world.create_entity();
        world.add_component(ground, PlaneColliderComponent::ground(0.0).unwrap());

        let ball = world.create_entity();
        world.add_component(ball, TransformComponent::from_position(Vec3::new(0.0, y, 0.0)));
        world.add_component(ball, SphereColliderComponent::new(1.0).unwrap());
        world.add_component(ball, RigidBodyComponent::new(1.0).unwrap());
        ball
    }

    #[test]
    fn test_from_config_registers_collider_systems() {
        let simulation = Simulation::from_config(&PhysicsConfig::default()).unwrap();
        assert_eq!(
            simulation.scheduler().names(),
            vec!["aabb_collider", "sphere_collider", "plane_sphere_collider"]
        );
    }

    #[test]
    fn test_collider_system_signatures() {
        let simulation = Simulation::from_config(&PhysicsConfig::default()).unwrap();
        let published: Vec<(&str, String)> = simulation
            .scheduler()
            .signatures()
            .into_iter()
            .map(|(name, signature)| (name, signature.to_string()))
            .collect();

        let sphere = "<SphereColliderComponent, RigidBodyComponent, TransformComponent>";
        assert_eq!(
            published,
            vec![
                (
                    "aabb_collider",
                    "<BoxColliderComponent, RigidBodyComponent, TransformComponent>".to_string()
                ),
                ("sphere_collider", sphere.to_string()),
                ("plane_sphere_collider", sphere.to_string()),
            ]
        );
    }

    #[test]
    fn test_timestep_follows_config() {
        let config = PhysicsConfig {
            fixed_timestep: 0.02,
            max_substeps: 3,
            ..PhysicsConfig::default()
        };
        let simulation = Simulation::from_config(&config).unwrap();
        assert_eq!(simulation.timestep().step(), 0.02);
        assert_eq!(simulation.timestep().max_substeps(), 3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PhysicsConfig {
            fixed_timestep: 0.0,
            ..PhysicsConfig::default()
        };
        assert!(matches!(
            Simulation::from_config(&config),
            Err(SimulationError::Config(_))
        ));
    }

    #[test]
    fn test_update_runs_due_ticks() {
        let mut world = World::new();
        ball_on_ground(&mut world, 5.0);
        let mut simulation = Simulation::from_config(&PhysicsConfig::default()).unwrap();

        assert_eq!(simulation.update(&world, 0.5 / 60.0).unwrap(), 0);
        assert_eq!(simulation.update(&world, 2.0 / 60.0).unwrap(), 2);
        assert_eq!(simulation.tick(), 2);
        assert_eq!(simulation.timestep().tick_count(), 2);
    }

    #[test]
    fn test_events_broadcast_after_tick() {
        let mut world = World::new();
        let ball = ball_on_ground(&mut world, 0.5);
        let mut simulation = Simulation::from_config(&PhysicsConfig::default()).unwrap();

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        simulation.bind_collision(move |event| {
            assert_eq!(event.tick, 0);
            counter.fetch_add(1, Ordering::Relaxed);
        });

        simulation.fixed_update(&world).unwrap();
        assert_eq!(seen.load(Ordering::Relaxed), 1);
        assert!(simulation.last_events()[0].involves(ball));

        // Resolved, so the next tick finds nothing
        simulation.fixed_update(&world).unwrap();
        assert_eq!(seen.load(Ordering::Relaxed), 1);
        assert!(simulation.last_events().is_empty());
    }
}
