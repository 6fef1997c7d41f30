// config.rs - Simulation settings

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, Result};
use crate::patterns::{DEFAULT_DENSITY, Seed, check_density};

pub const DEFAULT_SIZE: usize = 30;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Starting parameters for a `SimulationController`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub size: usize,
    pub tick_interval_ms: u64,
    pub random_density: f64,
    /// Seed name placed (centered) on the board at startup.
    pub initial_seed: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            random_density: DEFAULT_DENSITY,
            initial_seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < 1 {
            return Err(LifeError::config("grid size must be at least 1"));
        }
        if self.tick_interval_ms == 0 {
            return Err(LifeError::config("tick interval must be at least 1 ms"));
        }
        check_density(self.random_density)?;
        if let Some(name) = &self.initial_seed {
            name.parse::<Seed>()?;
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LifeError::config(format!("malformed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LifeError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }
}
