//! Fixed-tick system scheduling
//!
//! Systems run sequentially in registration order. Each one processes every
//! matching entity before the next begins, so a later system always sees the
//! writes of an earlier one within the same tick.

use super::{Signature, System, SystemError, TickContext};

/// Owns the registered systems and drives them once per tick
#[derive(Default)]
pub struct SystemScheduler {
    systems: Vec<Box<dyn System>>,
}

impl SystemScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a system to the end of the run order
    pub fn add_system(&mut self, system: Box<dyn System>) {
        log::debug!("Registered system {} {}", system.name(), system.signature());
        self.systems.push(system);
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Check whether no systems are registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Names of the registered systems in run order
    pub fn names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Signatures of the registered systems in run order
    pub fn signatures(&self) -> Vec<(&'static str, Signature)> {
        self.systems
            .iter()
            .map(|system| (system.name(), system.signature()))
            .collect()
    }

    /// Run every system for one fixed tick
    ///
    /// Stops at the first failing system; systems already run keep their
    /// writes.
    pub fn run_tick(&mut self, ctx: &mut TickContext<'_>) -> Result<(), SystemError> {
        for system in &mut self.systems {
            let before = ctx.events().len();
            system.fixed_update(ctx)?;
            log::debug!(
                "tick {}: {} resolved {} contact(s)",
                ctx.tick,
                system.name(),
                ctx.events().len() - before
            );
        }
        Ok(())
    }
}
