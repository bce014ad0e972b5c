//! Square, non-wrapping grid of organism slots.

use crate::organism::Organism;
use life_core::{Error, Position, Result};
use serde::{Deserialize, Serialize};

/// A `dimension × dimension` grid addressed by 1-based positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    dimension: u32,
    slots: Vec<Option<Organism>>,
}

impl Grid {
    /// # Panics
    ///
    /// Panics if `dimension²` slots cannot be allocated. Use
    /// [`Grid::try_new`] for dimensions that come from outside.
    pub fn new(dimension: u32) -> Self {
        let size = dimension as usize * dimension as usize;
        Self {
            dimension,
            slots: vec![None; size],
        }
    }

    /// Allocate an empty grid, failing with [`Error::Validation`] when
    /// `dimension²` slots do not fit in memory.
    pub fn try_new(dimension: u32) -> Result<Self> {
        let too_large = || {
            Error::Validation(format!(
                "a {}x{} world is too large to allocate",
                dimension, dimension
            ))
        };

        let size = (dimension as usize)
            .checked_mul(dimension as usize)
            .ok_or_else(too_large)?;
        let mut slots = Vec::new();
        slots.try_reserve_exact(size).map_err(|_| too_large())?;
        slots.resize(size, None);

        Ok(Self { dimension, slots })
    }

    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.dimension)
    }

    /// Organism at position, alive or not. Off-grid positions are empty.
    pub fn get(&self, pos: Position) -> Option<&Organism> {
        self.pos_to_index(pos)
            .and_then(|index| self.slots[index].as_ref())
    }

    /// Organism at position, only if it is alive
    pub fn alive_at(&self, pos: Position) -> Option<&Organism> {
        self.get(pos).filter(|organism| organism.is_alive())
    }

    /// Mutable slot at position, `None` if the position is off the grid
    pub fn slot_mut(&mut self, pos: Position) -> Option<&mut Option<Organism>> {
        let index = self.pos_to_index(pos)?;
        Some(&mut self.slots[index])
    }

    /// Put an organism into its own cell, returning whatever was there.
    /// An organism positioned off the grid is discarded.
    pub fn place(&mut self, organism: Organism) -> Option<Organism> {
        let slot = self.slot_mut(organism.position())?;
        slot.replace(organism)
    }

    /// Remove and return the organism at position
    pub fn take(&mut self, pos: Position) -> Option<Organism> {
        self.slot_mut(pos).and_then(Option::take)
    }

    /// Alive organisms among the Moore neighbors, in scan order
    pub fn alive_neighbors(&self, pos: Position) -> impl Iterator<Item = &Organism> + '_ {
        pos.neighbors().filter_map(move |neighbor| self.alive_at(neighbor))
    }

    pub fn population(&self) -> usize {
        self.organisms().count()
    }

    fn pos_to_index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        let dimension = self.dimension as usize;
        Some((pos.x as usize - 1) * dimension + (pos.y as usize - 1))
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let dimension = self.dimension as usize;
        let x = index / dimension + 1;
        let y = index % dimension + 1;
        Position::new(x as i32, y as i32)
    }

    /// Iterator over all positions, x outer and y inner
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.slots.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all slots with positions, in the same order as `positions`
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<&Organism>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(move |(i, slot)| (self.index_to_pos(i), slot.as_ref()))
    }

    /// Iterator over occupied cells only
    pub fn organisms(&self) -> impl Iterator<Item = &Organism> + '_ {
        self.slots.iter().flatten()
    }
}
