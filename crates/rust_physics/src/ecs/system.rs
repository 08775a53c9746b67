//! System trait and per-tick context

use crate::physics::CollisionEvent;

use super::{Signature, World, WorldError};

/// Errors a system can report from a tick
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SystemError {
    /// A component storage could not be accessed
    #[error("{system}: {source}")]
    World {
        /// System that hit the error
        system: &'static str,
        /// Underlying registry error
        #[source]
        source: WorldError,
    },
}

impl SystemError {
    /// Attach the failing system's name to a registry error
    pub fn world(system: &'static str) -> impl Fn(WorldError) -> Self + Copy {
        move |source| Self::World { system, source }
    }
}

/// Everything a system sees during one fixed tick
pub struct TickContext<'w> {
    /// The component registry
    pub world: &'w World,
    /// Index of the tick being run, starting at 0
    pub tick: u64,
    events: Vec<CollisionEvent>,
}

impl<'w> TickContext<'w> {
    /// Create the context for one tick
    pub fn new(world: &'w World, tick: u64) -> Self {
        Self {
            world,
            tick,
            events: Vec::new(),
        }
    }

    /// Record a resolved contact
    pub fn record(&mut self, event: CollisionEvent) {
        log::trace!(
            "tick {}: {} contact {:?} / {:?} depth {:.5}",
            event.tick,
            event.shapes,
            event.entity_a,
            event.entity_b,
            event.intersection.distance
        );
        self.events.push(event);
    }

    /// Contacts recorded so far this tick
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Consume the context, returning the recorded contacts
    pub fn into_events(self) -> Vec<CollisionEvent> {
        self.events
    }
}

/// A unit of per-tick work over entities matching a component signature
pub trait System: Send {
    /// Name used in logs and errors
    fn name(&self) -> &'static str;

    /// Components an entity must own to be processed
    fn signature(&self) -> Signature;

    /// Run once per fixed tick
    ///
    /// Zero matching entities is a no-op, never an error.
    fn fixed_update(&mut self, ctx: &mut TickContext<'_>) -> Result<(), SystemError>;
}
