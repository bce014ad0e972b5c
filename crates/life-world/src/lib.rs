//! World simulation engine.
//!
//! This crate implements the square grid where organisms of several species
//! are born, survive and die, one decide-then-commit step at a time.

pub mod coin;
pub mod grid;
pub mod observer;
pub mod organism;
pub mod rules;
pub mod world;

pub use coin::{CoinFlip, ScriptedCoin, SeededCoin};
pub use grid::Grid;
pub use observer::{CellOutcome, GridRenderer, NoopObserver, StepObserver, TracingObserver};
pub use organism::Organism;
pub use rules::{Decisions, NeighborTally, Transition};
pub use world::World;
