//! # Rust Physics
//!
//! Narrowphase collision detection and resolution for a fixed-tick
//! Entity-Component-System.
//!
//! ## Features
//!
//! - **ECS Registry**: Sparse-set component storage with typed multi-component queries
//! - **Typed Systems**: Systems publish their component signature and run once per fixed tick
//! - **Narrowphase**: Box-vs-box (AABB), sphere-vs-sphere and plane-vs-sphere detectors
//! - **Resolution**: Mass-weighted positional correction and non-penetration impulses
//! - **Configuration**: TOML and RON physics settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_physics::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut world = World::new();
//!
//!     let ground = world.create_entity();
//!     world.add_component(ground, PlaneColliderComponent::new(Vec3::y(), 0.0)?);
//!
//!     let ball = world.create_entity();
//!     world.add_component(ball, TransformComponent::from_position(Vec3::new(0.0, 0.5, 0.0)));
//!     world.add_component(ball, RigidBodyComponent::new(1.0)?);
//!     world.add_component(ball, SphereColliderComponent::new(1.0)?);
//!
//!     let mut simulation = Simulation::from_config(&PhysicsConfig::default())?;
//!     simulation.update(&world, 1.0 / 60.0)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod physics;

mod simulation;

pub use simulation::{Simulation, SimulationError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Simulation, SimulationError,
        config::{Config, ConfigError, PhysicsConfig, BroadPhaseKind},
        foundation::{
            math::{Vec3, Quat, WORLD_UP, WORLD_RIGHT, WORLD_FORWARD},
            time::FixedTimestep,
        },
        ecs::{
            World, Entity, Component, ComponentSet, Signature, System, SystemError,
            SystemScheduler, TickContext, Query, Event, ListenerHandle, WorldError,
        },
        ecs::components::{
            TransformComponent, RigidBodyComponent, BoxColliderComponent,
            SphereColliderComponent, PlaneColliderComponent, CollisionFilterComponent,
            ComponentError,
        },
        ecs::systems::{
            AabbColliderSystem, SphereColliderSystem, PlaneSphereColliderSystem,
        },
        physics::{
            IntersectionData, CollisionEvent, ShapePair, ContactSolver, SolverSettings,
            CollisionLayers, BroadPhase, AllPairs, SweepAndPrune,
        },
    };
}
