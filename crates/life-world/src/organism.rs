//! Organism state and management.

use life_core::{Error, OrganismRecord, Position, Result, Species};
use serde::{Deserialize, Serialize};

/// A species occupant of one grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    position: Position,
    species: Species,
    alive: bool,
}

impl Organism {
    pub fn new(position: Position, species: Species) -> Self {
        Self {
            position,
            species,
            alive: true,
        }
    }

    /// A placeholder that takes up a cell but does not count as a neighbor
    /// until [`Organism::give_birth`] is called.
    pub fn unborn(position: Position, species: Species) -> Self {
        Self {
            position,
            species,
            alive: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn species(&self) -> &Species {
        &self.species
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Bring an unborn placeholder to life as `species`.
    pub fn give_birth(&mut self, species: Species) -> Result<()> {
        if self.alive {
            return Err(Error::InvalidState(format!(
                "organism at {} is already alive",
                self.position
            )));
        }
        self.alive = true;
        self.species = species;
        Ok(())
    }

    pub fn to_record(&self) -> OrganismRecord {
        OrganismRecord {
            x_pos: self.position.x,
            y_pos: self.position.y,
            species: self.species.clone(),
        }
    }
}

impl From<&Organism> for OrganismRecord {
    fn from(org: &Organism) -> Self {
        org.to_record()
    }
}
