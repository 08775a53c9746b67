//! Entity-Component-System implementation
//!
//! Provides the component registry and the typed, fixed-tick system dispatcher.

pub mod world;
pub mod entity;
pub mod component;
pub mod storage;
pub mod system;
pub mod query;
pub mod scheduler;
pub mod events;
pub mod components;
pub mod systems;

#[cfg(test)]
mod tests;

pub use world::{World, WorldError};
pub use entity::Entity;
pub use component::Component;
pub use storage::ComponentStorage;
pub use system::{System, SystemError, TickContext};
pub use query::{ComponentSet, Query, Signature};
pub use scheduler::SystemScheduler;
pub use events::{Event, ListenerHandle};
