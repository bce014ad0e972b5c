//! Species-aware birth and survival rules.
//!
//! A live organism survives with 2 or 3 alive neighbors of its own species
//! and dies otherwise. An empty cell is claimed by the first species, in
//! neighbor scan order, that has exactly 3 alive neighbors around it.
//!
//! Everything here reads the grid through a shared borrow: deciding a step
//! never changes it.

use crate::grid::Grid;
use life_core::{Position, Species};

/// Fewest same-species neighbors a live organism needs to survive
pub const SURVIVAL_MIN: usize = 2;
/// Same-species neighbor count at which a live organism dies of overcrowding
pub const OVERCROWDING: usize = 4;
/// Exact neighbor count of one species that gives birth in an empty cell
pub const BIRTH_COUNT: usize = 3;

/// What happens to one cell when a step is committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Remove the live organism in the cell
    Kill,
    /// Bring a new organism of this species to life in the empty cell
    GiveBirth(Species),
    /// Leave the live organism in the cell untouched
    Skip,
}

/// Per-species count of alive neighbors, kept in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborTally {
    counts: Vec<(Species, usize)>,
}

impl NeighborTally {
    /// Tally the alive neighbors of `pos`, scanning directions in order.
    pub fn around(grid: &Grid, pos: Position) -> Self {
        let mut tally = Self::default();
        for neighbor in grid.alive_neighbors(pos) {
            tally.record(neighbor.species());
        }
        tally
    }

    pub fn record(&mut self, species: &Species) {
        match self.counts.iter_mut().find(|(seen, _)| seen == species) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((species.clone(), 1)),
        }
    }

    pub fn count_of(&self, species: &Species) -> usize {
        self.counts
            .iter()
            .find(|(seen, _)| seen == species)
            .map_or(0, |(_, count)| *count)
    }

    /// First species in tally order whose count is exactly `count`
    pub fn first_with(&self, count: usize) -> Option<&Species> {
        self.counts
            .iter()
            .find(|(_, seen)| *seen == count)
            .map(|(species, _)| species)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Species, usize)> + '_ {
        self.counts.iter().map(|(species, count)| (species, *count))
    }
}

/// Decide the fate of a single cell from the current grid.
///
/// Returns `None` for an empty cell where nothing is born.
pub fn decide(grid: &Grid, pos: Position) -> Option<Transition> {
    let tally = NeighborTally::around(grid, pos);

    match grid.alive_at(pos) {
        Some(organism) => {
            let kin = tally.count_of(organism.species());
            if kin < SURVIVAL_MIN || kin >= OVERCROWDING {
                Some(Transition::Kill)
            } else {
                Some(Transition::Skip)
            }
        }
        None => tally
            .first_with(BIRTH_COUNT)
            .map(|species| Transition::GiveBirth(species.clone())),
    }
}

/// Transitions for one step, one entry per grid cell in grid order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decisions {
    staged: Vec<Option<Transition>>,
}

impl Decisions {
    /// Decide every cell of the grid against the same pre-step state.
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            staged: grid.positions().map(|pos| decide(grid, pos)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }
}

impl IntoIterator for Decisions {
    type Item = Option<Transition>;
    type IntoIter = std::vec::IntoIter<Option<Transition>>;

    fn into_iter(self) -> Self::IntoIter {
        self.staged.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organism::Organism;

    fn grid_with(dimension: u32, organisms: &[(i32, i32, &str)]) -> Grid {
        let mut grid = Grid::new(dimension);
        for &(x, y, species) in organisms {
            grid.place(Organism::new(Position::new(x, y), Species::from(species)));
        }
        grid
    }

    /// Center (3, 3) on a 5x5 grid with `kin` same-species neighbors around it
    fn center_with_kin(kin: usize) -> Grid {
        let mut organisms = vec![(3, 3, "A")];
        let ring = [(2, 4), (3, 4), (4, 4), (2, 3), (4, 3), (2, 2), (3, 2), (4, 2)];
        organisms.extend(ring.iter().take(kin).map(|&(x, y)| (x, y, "A")));
        grid_with(5, &organisms)
    }

    #[test]
    fn test_survival_boundaries() {
        let center = Position::new(3, 3);
        assert_eq!(decide(&center_with_kin(0), center), Some(Transition::Kill));
        assert_eq!(decide(&center_with_kin(1), center), Some(Transition::Kill));
        assert_eq!(decide(&center_with_kin(2), center), Some(Transition::Skip));
        assert_eq!(decide(&center_with_kin(3), center), Some(Transition::Skip));
        assert_eq!(decide(&center_with_kin(4), center), Some(Transition::Kill));
        assert_eq!(decide(&center_with_kin(8), center), Some(Transition::Kill));
    }

    #[test]
    fn test_other_species_do_not_keep_organism_alive() {
        let grid = grid_with(3, &[(2, 2, "A"), (1, 1, "B"), (1, 2, "B"), (1, 3, "B")]);
        assert_eq!(decide(&grid, Position::new(2, 2)), Some(Transition::Kill));
    }

    #[test]
    fn test_birth_needs_exactly_three() {
        let pos = Position::new(2, 2);

        let empty = grid_with(3, &[]);
        assert_eq!(decide(&empty, pos), None);

        let two = grid_with(3, &[(1, 1, "A"), (1, 2, "A")]);
        assert_eq!(decide(&two, pos), None);

        let three = grid_with(3, &[(1, 1, "A"), (1, 2, "A"), (1, 3, "A")]);
        assert_eq!(
            decide(&three, pos),
            Some(Transition::GiveBirth(Species::from("A")))
        );

        let four = grid_with(3, &[(1, 1, "A"), (1, 2, "A"), (1, 3, "A"), (3, 3, "A")]);
        assert_eq!(decide(&four, pos), None);
    }

    #[test]
    fn test_mixed_neighbors_do_not_add_up() {
        // Two A and two B: four neighbors, but no species has three
        let grid = grid_with(3, &[(1, 1, "A"), (1, 2, "A"), (3, 1, "B"), (3, 2, "B")]);
        assert_eq!(decide(&grid, Position::new(2, 2)), None);
    }

    #[test]
    fn test_birth_tie_follows_scan_order() {
        // B is found first (above-left), A later (above-right), both with three
        let grid = grid_with(
            3,
            &[
                (1, 3, "B"),
                (1, 2, "B"),
                (1, 1, "B"),
                (3, 3, "A"),
                (3, 2, "A"),
                (3, 1, "A"),
            ],
        );
        assert_eq!(
            decide(&grid, Position::new(2, 2)),
            Some(Transition::GiveBirth(Species::from("B")))
        );

        // Flip which species sits above-left and the winner flips too
        let grid = grid_with(
            3,
            &[
                (1, 3, "A"),
                (1, 2, "A"),
                (1, 1, "A"),
                (3, 3, "B"),
                (3, 2, "B"),
                (3, 1, "B"),
            ],
        );
        assert_eq!(
            decide(&grid, Position::new(2, 2)),
            Some(Transition::GiveBirth(Species::from("A")))
        );
    }

    #[test]
    fn test_overcrowded_species_does_not_block_birth() {
        // A is scanned first with four neighbors, B follows with exactly three
        let grid = grid_with(
            3,
            &[
                (1, 3, "A"),
                (2, 3, "A"),
                (3, 3, "A"),
                (1, 2, "A"),
                (3, 2, "B"),
                (1, 1, "B"),
                (2, 1, "B"),
            ],
        );
        assert_eq!(
            decide(&grid, Position::new(2, 2)),
            Some(Transition::GiveBirth(Species::from("B")))
        );

        // Without a species at exactly three the crowded cell stays empty
        let grid = grid_with(3, &[(1, 3, "A"), (2, 3, "A"), (3, 3, "A"), (1, 2, "A")]);
        assert_eq!(decide(&grid, Position::new(2, 2)), None);
    }

    #[test]
    fn test_unborn_organisms_are_not_neighbors() {
        let mut grid = grid_with(3, &[(1, 1, "A"), (1, 2, "A")]);
        grid.place(Organism::unborn(Position::new(1, 3), Species::from("A")));
        assert_eq!(decide(&grid, Position::new(2, 2)), None);
    }

    #[test]
    fn test_tally_first_seen_order() {
        let grid = grid_with(3, &[(3, 1, "C"), (1, 3, "B"), (2, 3, "C")]);
        let tally = NeighborTally::around(&grid, Position::new(2, 2));
        let order: Vec<_> = tally.iter().map(|(s, c)| (s.as_str(), c)).collect();
        assert_eq!(order, vec![("B", 1), ("C", 2)]);
        assert_eq!(tally.count_of(&Species::from("Z")), 0);
    }

    #[test]
    fn test_decisions_cover_whole_grid() {
        let grid = grid_with(3, &[(2, 1, "A"), (2, 2, "A"), (2, 3, "A")]);
        let decisions = Decisions::for_grid(&grid);
        assert_eq!(decisions.len(), 9);
        // three occupied cells plus births at (1, 2) and (3, 2)
        assert_eq!(decisions.into_iter().flatten().count(), 5);
    }
}
