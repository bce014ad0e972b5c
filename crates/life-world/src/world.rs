//! The world: seeding, stepping and iterating a multi-species Life grid.

use crate::coin::{CoinFlip, SeededCoin};
use crate::grid::Grid;
use crate::observer::{CellOutcome, NoopObserver, StepObserver, TracingObserver};
use crate::organism::Organism;
use crate::rules::{Decisions, Transition};
use life_core::{Error, LifeState, OrganismRecord, Position, Result, Species, WorldConfig};
use tracing::{debug, info, instrument, trace};

pub struct World {
    config: WorldConfig,
    grid: Grid,
    generation: u64,
    debug_mode: bool,
}

impl World {
    /// Build a world, settling seeding collisions with a coin seeded from
    /// `config.seed`.
    pub fn new(
        config: WorldConfig,
        seeds: impl IntoIterator<Item = OrganismRecord>,
    ) -> Result<Self> {
        let coin = SeededCoin::new(config.seed);
        Self::with_coin(config, seeds, coin)
    }

    /// Build a world, settling seeding collisions with `coin`.
    ///
    /// Seeds are admitted in order. Once `config.species` distinct species
    /// have been admitted, seeds of any other species are skipped. A seed
    /// outside the grid aborts construction with [`Error::OutOfRange`].
    pub fn with_coin<C: CoinFlip>(
        config: WorldConfig,
        seeds: impl IntoIterator<Item = OrganismRecord>,
        mut coin: C,
    ) -> Result<Self> {
        config.validate()?;

        let mut grid = Grid::try_new(config.cells)?;
        let mut admitted: Vec<Species> = Vec::new();
        let mut skipped = 0usize;

        for seed in seeds {
            if !admitted.contains(&seed.species) {
                if admitted.len() < config.species as usize {
                    admitted.push(seed.species.clone());
                } else {
                    debug!(
                        x = seed.x_pos,
                        y = seed.y_pos,
                        species = %seed.species,
                        "Species cap reached, skipping organism"
                    );
                    skipped += 1;
                    continue;
                }
            }

            let pos = seed.position();
            if !grid.contains(pos) {
                return Err(Error::OutOfRange {
                    x: pos.x,
                    y: pos.y,
                    dimension: config.cells,
                });
            }

            if grid.get(pos).is_some() {
                if coin.keep_existing() {
                    debug!(x = pos.x, y = pos.y, species = %seed.species, "Cell taken, newcomer discarded");
                    continue;
                }
                debug!(x = pos.x, y = pos.y, species = %seed.species, "Cell taken, newcomer replaces occupant");
            }

            grid.place(Organism::new(pos, seed.species));
        }

        info!(
            cells = config.cells,
            species_cap = config.species,
            iterations = config.iterations,
            species_admitted = admitted.len(),
            skipped = skipped,
            population = grid.population(),
            "World created"
        );

        Ok(Self {
            config,
            grid,
            generation: 0,
            debug_mode: false,
        })
    }

    pub fn from_state(state: LifeState) -> Result<Self> {
        Self::new(state.world, state.organisms)
    }

    /// Build a world from `state`, run all of its iterations and return the
    /// same settings with the surviving organisms.
    pub fn run(state: LifeState) -> Result<LifeState> {
        let mut world = Self::from_state(state)?;
        let organisms = world.iterate()?;
        Ok(LifeState::new(world.config.clone(), organisms))
    }

    /// Render every step through `tracing` at debug level while iterating.
    pub fn set_debug_mode(&mut self) {
        self.debug_mode = true;
    }

    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Run `iterations` steps and return the occupied cells.
    #[instrument(skip(self), fields(iterations = self.config.iterations))]
    pub fn iterate(&mut self) -> Result<Vec<OrganismRecord>> {
        if self.debug_mode {
            self.iterate_with(&mut TracingObserver::new())
        } else {
            self.iterate_with(&mut NoopObserver)
        }
    }

    /// Run `iterations` steps, reporting each one to `observer`.
    ///
    /// Steps run on a working copy of the grid. If any step fails the world
    /// is left exactly as it was before the call.
    pub fn iterate_with(&mut self, observer: &mut dyn StepObserver) -> Result<Vec<OrganismRecord>> {
        let iterations = self.config.iterations;
        info!("Starting iteration for {} steps", iterations);
        observer.iteration_started(iterations);

        let mut grid = self.grid.clone();
        for offset in 1..=iterations {
            advance(&mut grid, self.generation + offset, observer)?;
        }

        self.grid = grid;
        self.generation += iterations;
        observer.iteration_finished(self.generation);

        info!(
            generation = self.generation,
            population = self.grid.population(),
            "Iteration complete"
        );

        Ok(self.snapshot())
    }

    /// Run a single step.
    pub fn step(&mut self) -> Result<()> {
        let mut grid = self.grid.clone();
        advance(&mut grid, self.generation + 1, &mut NoopObserver)?;
        self.grid = grid;
        self.generation += 1;
        Ok(())
    }

    /// Occupied cells in grid order
    pub fn snapshot(&self) -> Vec<OrganismRecord> {
        self.grid.organisms().map(Organism::to_record).collect()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn dimension(&self) -> u32 {
        self.config.cells
    }

    pub fn species_cap(&self) -> u32 {
        self.config.species
    }

    pub fn iterations(&self) -> u64 {
        self.config.iterations
    }

    /// Number of steps committed so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn organism_at(&self, pos: Position) -> Option<&Organism> {
        self.grid.get(pos)
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }
}

/// Decide every cell against the grid as it stands, then commit.
fn advance(grid: &mut Grid, step: u64, observer: &mut dyn StepObserver) -> Result<()> {
    observer.step_started(step);

    let decisions = Decisions::for_grid(grid);
    debug_assert_eq!(decisions.len(), grid.len());

    let last_row = grid.dimension() as i32;
    let mut born = 0usize;
    let mut died = 0usize;

    for (index, transition) in decisions.into_iter().enumerate() {
        let pos = grid.index_to_pos(index);
        let outcome = commit_cell(grid, pos, transition)?;
        match &outcome {
            CellOutcome::Born(_) => born += 1,
            CellOutcome::Died(_) => died += 1,
            _ => {}
        }
        observer.cell_committed(pos, &outcome);
        if pos.y == last_row {
            observer.row_finished(pos.x);
        }
    }

    debug!(
        step = step,
        born = born,
        died = died,
        population = grid.population(),
        "Step committed"
    );
    observer.step_finished(step, grid);

    Ok(())
}

fn commit_cell(grid: &mut Grid, pos: Position, transition: Option<Transition>) -> Result<CellOutcome> {
    match transition {
        Some(Transition::Kill) => match grid.take(pos) {
            Some(organism) if organism.is_alive() => {
                trace!(x = pos.x, y = pos.y, species = %organism.species(), "Organism died");
                Ok(CellOutcome::Died(organism.species().clone()))
            }
            _ => Err(Error::InvalidState(format!(
                "kill staged at {} but no live organism is there",
                pos
            ))),
        },
        Some(Transition::GiveBirth(species)) => {
            let slot = grid.slot_mut(pos).ok_or_else(|| {
                Error::InvalidState(format!("birth staged off the grid at {}", pos))
            })?;
            if slot.as_ref().is_some_and(Organism::is_alive) {
                return Err(Error::InvalidState(format!(
                    "birth staged at {} but the cell is occupied",
                    pos
                )));
            }
            let organism = slot.get_or_insert_with(|| Organism::unborn(pos, species.clone()));
            organism.give_birth(species.clone())?;
            trace!(x = pos.x, y = pos.y, species = %species, "Organism born");
            Ok(CellOutcome::Born(species))
        }
        Some(Transition::Skip) => match grid.alive_at(pos) {
            Some(organism) => Ok(CellOutcome::Survived(organism.species().clone())),
            None => Err(Error::InvalidState(format!(
                "skip staged at {} but no live organism is there",
                pos
            ))),
        },
        None => match grid.get(pos) {
            None => Ok(CellOutcome::Empty),
            Some(_) => Err(Error::InvalidState(format!(
                "occupied cell {} has no staged transition",
                pos
            ))),
        },
    }
}
