//! Core type definitions for the simulation.

use crate::{Result, WorldConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Species identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Species(pub String);

impl Species {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Species {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Species {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// 1-based 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether both coordinates fall in `1..=dimension`. There is no wrapping.
    pub fn is_within(&self, dimension: u32) -> bool {
        let max = i64::from(dimension);
        (1..=max).contains(&i64::from(self.x)) && (1..=max).contains(&i64::from(self.y))
    }

    /// Moore neighbors in scan order, including positions off the grid.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> {
        let origin = *self;
        Direction::all().into_iter().map(move |dir| {
            let (dx, dy) = dir.to_delta();
            origin.add(dx, dy)
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Moore neighborhood direction. `y + 1` is above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    AboveLeft,
    Above,
    AboveRight,
    Left,
    Right,
    BelowLeft,
    Below,
    BelowRight,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::AboveLeft => (-1, 1),
            Direction::Above => (0, 1),
            Direction::AboveRight => (1, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::BelowLeft => (-1, -1),
            Direction::Below => (0, -1),
            Direction::BelowRight => (1, -1),
        }
    }

    /// All directions in neighbor scan order. Birth ties between species are
    /// settled by this order, so it must not change.
    pub fn all() -> [Direction; 8] {
        [
            Direction::AboveLeft,
            Direction::Above,
            Direction::AboveRight,
            Direction::Left,
            Direction::Right,
            Direction::BelowLeft,
            Direction::Below,
            Direction::BelowRight,
        ]
    }
}

/// An organism as the caller describes it, both on the way in (seeds) and
/// on the way out (final grid).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganismRecord {
    pub x_pos: i32,
    pub y_pos: i32,
    pub species: Species,
}

impl OrganismRecord {
    pub fn new(x_pos: i32, y_pos: i32, species: impl Into<Species>) -> Self {
        Self {
            x_pos,
            y_pos,
            species: species.into(),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x_pos, self.y_pos)
    }
}

/// A complete world description: settings plus the organisms in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeState {
    pub world: WorldConfig,
    #[serde(default)]
    pub organisms: Vec<OrganismRecord>,
}

impl LifeState {
    pub fn new(world: WorldConfig, organisms: Vec<OrganismRecord>) -> Self {
        Self { world, organisms }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(1, 1).is_within(3));
        assert!(Position::new(3, 3).is_within(3));
        assert!(!Position::new(0, 2).is_within(3));
        assert!(!Position::new(2, 4).is_within(3));
        assert!(!Position::new(-1, -1).is_within(3));
        assert!(!Position::new(1, 1).is_within(0));
    }

    #[test]
    fn test_direction_scan_order() {
        let deltas: Vec<_> = Direction::all().iter().map(|d| d.to_delta()).collect();
        assert_eq!(
            deltas,
            vec![(-1, 1), (0, 1), (1, 1), (-1, 0), (1, 0), (-1, -1), (0, -1), (1, -1)]
        );
    }

    #[test]
    fn test_neighbors_follow_scan_order() {
        let neighbors: Vec<_> = Position::new(2, 2).neighbors().collect();
        assert_eq!(neighbors.len(), 8);
        assert_eq!(neighbors[0], Position::new(1, 3));
        assert_eq!(neighbors[7], Position::new(3, 1));
    }

    #[test]
    fn test_life_state_json() {
        let json = r#"{
            "world": {"cells": 3, "species": 1, "iterations": 1},
            "organisms": [
                {"x_pos": 2, "y_pos": 1, "species": "A"},
                {"x_pos": 2, "y_pos": 2, "species": "A"}
            ]
        }"#;
        let state = LifeState::from_json(json).unwrap();
        assert_eq!(state.world.cells, 3);
        assert_eq!(state.organisms[1], OrganismRecord::new(2, 2, "A"));

        let back = LifeState::from_json(&state.to_json().unwrap()).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_life_state_without_organisms() {
        let state =
            LifeState::from_json(r#"{"world": {"cells": 2, "species": 1, "iterations": 0}}"#)
                .unwrap();
        assert!(state.organisms.is_empty());
    }
}
