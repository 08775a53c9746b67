//! Physics module for collision detection and response
//!
//! Narrowphase detectors are pure functions over world-space shapes; the
//! solver mutates rigid-body and transform state to resolve an overlap.
//! Pair generation sits behind the [`BroadPhase`] trait.

pub mod shape;
pub mod intersection;
pub mod narrow_phase;
pub mod solver;
pub mod broad_phase;
pub mod collision_layers;

pub use shape::{Aabb, WorldBox, WorldPlane, WorldSphere};
pub use intersection::{IntersectionData, CollisionEvent, ShapePair};
pub use narrow_phase::{box_vs_box, sphere_vs_sphere, plane_vs_sphere};
pub use solver::{ContactSolver, SolverSettings, Resolution, BodyMut};
pub use broad_phase::{BroadPhase, AllPairs, SweepAndPrune};
pub use collision_layers::CollisionLayers;
