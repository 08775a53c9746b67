//! Time management utilities

use std::time::Duration;

use crate::config::ConfigError;

/// Fixed timestep accumulator
///
/// Converts variable frame times into a whole number of fixed simulation
/// ticks. Leftover time carries over to the next frame.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
    tick_count: u64,
}

impl FixedTimestep {
    /// Create a new accumulator with the given step length in seconds
    ///
    /// The step must be finite and positive; `max_substeps` is raised to at
    /// least 1.
    pub fn new(step: f32, max_substeps: u32) -> Result<Self, ConfigError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(ConfigError::Invalid {
                field: "fixed_timestep",
                reason: format!("must be a positive number of seconds, got {step}"),
            });
        }
        Ok(Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            tick_count: 0,
        })
    }

    /// Add frame time and return how many fixed ticks are now due
    ///
    /// At most `max_substeps` ticks are returned; any time beyond that is
    /// dropped so a long stall cannot trigger a spiral of catch-up ticks.
    pub fn accumulate(&mut self, delta_time: f32) -> u32 {
        if delta_time.is_finite() && delta_time > 0.0 {
            self.accumulator += delta_time;
        }

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if self.accumulator >= self.step {
            log::warn!(
                "Dropping {:.4}s of simulation time after {} substeps",
                self.accumulator,
                ticks
            );
            self.accumulator %= self.step;
        }

        self.tick_count += u64::from(ticks);
        ticks
    }

    /// Same as [`accumulate`](Self::accumulate) for a `Duration`
    pub fn accumulate_duration(&mut self, delta: Duration) -> u32 {
        self.accumulate(delta.as_secs_f32())
    }

    /// Length of one fixed tick in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Maximum ticks a single frame may trigger
    pub fn max_substeps(&self) -> u32 {
        self.max_substeps
    }

    /// Total ticks handed out since creation
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Fraction of a tick currently accumulated, in `[0, 1)`
    ///
    /// Useful for interpolating rendered state between two ticks.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Discard accumulated time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self {
            step: 1.0 / 60.0,
            max_substeps: 8,
            accumulator: 0.0,
            tick_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_whole_ticks() {
        let mut timestep = FixedTimestep::new(0.25, 8).unwrap();
        assert_eq!(timestep.accumulate(0.125), 0);
        assert_eq!(timestep.accumulate(0.125), 1);
        assert_eq!(timestep.accumulate(0.5), 2);
        assert_eq!(timestep.tick_count(), 3);
    }

    #[test]
    fn test_leftover_carries_over() {
        let mut timestep = FixedTimestep::new(0.25, 8).unwrap();
        assert_eq!(timestep.accumulate(0.375), 1);
        assert!((timestep.alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut timestep = FixedTimestep::new(0.25, 2).unwrap();
        assert_eq!(timestep.accumulate(10.0), 2);
        assert!(timestep.alpha() < 1.0);
        assert_eq!(timestep.accumulate(0.0), 0);
    }

    #[test]
    fn test_ignores_invalid_delta() {
        let mut timestep = FixedTimestep::new(0.25, 8).unwrap();
        assert_eq!(timestep.accumulate(-1.0), 0);
        assert_eq!(timestep.accumulate(f32::NAN), 0);
        assert_eq!(timestep.accumulate_duration(Duration::from_millis(250)), 1);
    }

    #[test]
    fn test_rejects_unusable_step() {
        assert!(matches!(
            FixedTimestep::new(0.0, 4),
            Err(ConfigError::Invalid { field: "fixed_timestep", .. })
        ));
        assert!(FixedTimestep::new(-0.5, 4).is_err());
        assert!(FixedTimestep::new(f32::NAN, 4).is_err());
        assert!(FixedTimestep::new(f32::INFINITY, 4).is_err());
    }

    #[test]
    fn test_zero_substeps_still_ticks() {
        let mut timestep = FixedTimestep::new(0.1, 0).unwrap();
        assert_eq!(timestep.max_substeps(), 1);
        assert_eq!(timestep.accumulate(0.1), 1);
        assert_eq!(timestep.accumulate(0.1), 1);
        assert!(timestep.alpha().is_finite());
    }

    #[test]
    fn test_reset_discards_partial_tick() {
        let mut timestep = FixedTimestep::new(0.25, 8).unwrap();
        assert_eq!(timestep.accumulate(0.2), 0);
        timestep.reset();
        assert_eq!(timestep.alpha(), 0.0);
        assert_eq!(timestep.accumulate(0.1), 0);
    }

    #[test]
    fn test_default_matches_physics_config() {
        let timestep = FixedTimestep::default();
        assert_eq!(timestep.step(), 1.0 / 60.0);
        assert_eq!(timestep.max_substeps(), 8);
    }
}
