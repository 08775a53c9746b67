//! Configuration system

pub use serde::{Serialize, Deserialize};

use crate::physics::SolverSettings;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its valid range
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        /// Offending field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Broad-phase pair generation used by the pairwise collider systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadPhaseKind {
    /// Test every pair of matching entities
    #[default]
    AllPairs,
    /// Sort bounds along X and only test overlapping intervals
    SweepAndPrune,
}

/// Physics settings for the fixed-tick collision pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Length of one fixed tick in seconds
    pub fixed_timestep: f32,

    /// Maximum fixed ticks run for a single frame update
    pub max_substeps: u32,

    /// Bounciness along the contact normal (0 = inelastic, 1 = elastic)
    pub restitution: f32,

    /// Extra separation pushed past the contact so resolved pairs stay apart
    pub separation_epsilon: f32,

    /// Pair generation strategy for box and sphere systems
    pub broad_phase: BroadPhaseKind,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 8,
            restitution: 0.0,
            separation_epsilon: 1.0e-4,
            broad_phase: BroadPhaseKind::AllPairs,
        }
    }
}

impl Config for PhysicsConfig {}

impl PhysicsConfig {
    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(ConfigError::Invalid {
                field: "fixed_timestep",
                reason: format!("must be a positive number of seconds, got {}", self.fixed_timestep),
            });
        }
        if self.max_substeps == 0 {
            return Err(ConfigError::Invalid {
                field: "max_substeps",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::Invalid {
                field: "restitution",
                reason: format!("must be within [0, 1], got {}", self.restitution),
            });
        }
        if !(self.separation_epsilon.is_finite() && self.separation_epsilon >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "separation_epsilon",
                reason: format!("must be non-negative, got {}", self.separation_epsilon),
            });
        }
        Ok(())
    }

    /// Solver settings derived from this config
    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            restitution: self.restitution,
            separation_epsilon: self.separation_epsilon,
        }
    }
}
