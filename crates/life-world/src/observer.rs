//! Trace points for watching a world step by step.
//!
//! Observers only look. Nothing they do feeds back into the simulation.

use crate::grid::Grid;
use life_core::{Position, Species};
use tracing::debug;

const RULE: &str = "-----------------------------";

/// What a cell turned into when a step was committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutcome {
    Survived(Species),
    Died(Species),
    Born(Species),
    Empty,
}

impl CellOutcome {
    /// Three-character cell glyph: `" A "`, `"-A "`, `"+A "` or `" . "`.
    pub fn glyph(&self) -> String {
        match self {
            CellOutcome::Survived(species) => format!(" {} ", species),
            CellOutcome::Died(species) => format!("-{} ", species),
            CellOutcome::Born(species) => format!("+{} ", species),
            CellOutcome::Empty => " . ".to_string(),
        }
    }
}

/// Hooks called by [`crate::World::iterate_with`]. All default to doing nothing.
pub trait StepObserver {
    fn iteration_started(&mut self, _iterations: u64) {}

    /// `step` counts from 1.
    fn step_started(&mut self, _step: u64) {}

    fn cell_committed(&mut self, _pos: Position, _outcome: &CellOutcome) {}

    /// Every cell with this x coordinate has been committed.
    fn row_finished(&mut self, _x: i32) {}

    fn step_finished(&mut self, _step: u64, _grid: &Grid) {}

    fn iteration_finished(&mut self, _generation: u64) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {}

/// Renders every step as text, one line of glyphs per x row.
#[derive(Debug, Clone, Default)]
pub struct GridRenderer {
    output: String,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Take what has been rendered so far, leaving the renderer empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl StepObserver for GridRenderer {
    fn iteration_started(&mut self, _iterations: u64) {
        self.output.push_str("Start of iteration\n");
        self.output.push_str(RULE);
        self.output.push('\n');
    }

    fn step_started(&mut self, step: u64) {
        self.output.push_str(&format!("Step {}:\n\n", step));
    }

    fn cell_committed(&mut self, _pos: Position, outcome: &CellOutcome) {
        self.output.push_str(&outcome.glyph());
    }

    fn row_finished(&mut self, _x: i32) {
        self.output.push_str("\n\n");
    }

    fn step_finished(&mut self, _step: u64, _grid: &Grid) {
        self.output.push_str(RULE);
        self.output.push('\n');
    }

    fn iteration_finished(&mut self, _generation: u64) {
        self.output.push_str("End of iteration\n");
    }
}

/// Emits each rendered step as a `tracing` debug event.
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    renderer: GridRenderer,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepObserver for TracingObserver {
    fn step_started(&mut self, step: u64) {
        self.renderer.step_started(step);
    }

    fn cell_committed(&mut self, pos: Position, outcome: &CellOutcome) {
        self.renderer.cell_committed(pos, outcome);
    }

    fn row_finished(&mut self, x: i32) {
        self.renderer.row_finished(x);
    }

    fn step_finished(&mut self, step: u64, grid: &Grid) {
        self.renderer.step_finished(step, grid);
        let rendering = self.renderer.take_output();
        debug!(
            step = step,
            population = grid.population(),
            "\n{}",
            rendering
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs() {
        let a = Species::from("A");
        assert_eq!(CellOutcome::Survived(a.clone()).glyph(), " A ");
        assert_eq!(CellOutcome::Died(a.clone()).glyph(), "-A ");
        assert_eq!(CellOutcome::Born(a).glyph(), "+A ");
        assert_eq!(CellOutcome::Empty.glyph(), " . ");
    }

    #[test]
    fn test_renderer_layout() {
        let grid = Grid::new(1);
        let mut renderer = GridRenderer::new();

        renderer.iteration_started(1);
        renderer.step_started(1);
        renderer.cell_committed(Position::new(1, 1), &CellOutcome::Empty);
        renderer.row_finished(1);
        renderer.step_finished(1, &grid);
        renderer.iteration_finished(1);

        let expected = format!(
            "Start of iteration\n{rule}\nStep 1:\n\n . \n\n{rule}\nEnd of iteration\n",
            rule = RULE
        );
        assert_eq!(renderer.output(), expected);

        assert_eq!(renderer.take_output(), expected);
        assert!(renderer.output().is_empty());
    }

    #[test]
    fn test_tracing_observer_drains_each_step() {
        let grid = Grid::new(1);
        let mut observer = TracingObserver::new();
        observer.step_started(1);
        observer.cell_committed(Position::new(1, 1), &CellOutcome::Empty);
        observer.step_finished(1, &grid);
        assert!(observer.renderer.output().is_empty());
    }
}
