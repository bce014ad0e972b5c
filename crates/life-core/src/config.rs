//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// World configuration parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Side length of the square world grid
    pub cells: u32,
    /// Maximum number of distinct species admitted while seeding
    pub species: u32,
    /// Number of steps to run
    pub iterations: u64,
    /// Seed for the coin that settles seeding collisions
    #[serde(default)]
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            cells: 10,
            species: 1,
            iterations: 1,
            seed: 0,
        }
    }
}

impl WorldConfig {
    pub fn new(cells: u32, species: u32, iterations: u64) -> Self {
        Self {
            cells,
            species,
            iterations,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations a world cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.cells == 0 {
            return Err(Error::Validation(
                "world must have at least one cell per side".to_string(),
            ));
        }
        if self.species == 0 {
            return Err(Error::Validation(
                "world must admit at least one species".to_string(),
            ));
        }
        Ok(())
    }
}
