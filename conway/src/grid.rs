// grid.rs - Immutable toroidal grid for Conway's Game of Life

use std::fmt;

use crate::error::{LifeError, Result};

/// Square `size x size` matrix of cells whose edges wrap for neighbor counting.
///
/// A `Grid` is never mutated once built. Every "mutation" (`with_cell_set`,
/// `with_toggled`, stepping, placement) returns a new value, so a reader
/// holding an old grid always sees a complete generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<bool>, // row-major, size * size
}

impl Grid {
    /// All-dead grid.
    pub fn new(size: usize) -> Result<Self> {
        let len = check_size(size)?;
        Ok(Self {
            size,
            cells: vec![false; len],
        })
    }

    /// Grid with the given cells alive. Coordinates are raw and must be in bounds.
    pub fn from_alive_cells<I>(size: usize, alive: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let len = check_size(size)?;
        let mut cells = vec![false; len];
        for (row, col) in alive {
            check_bounds(size, row, col)?;
            cells[row * size + col] = true;
        }
        Ok(Self { size, cells })
    }

    /// Builds every cell from `f(row, col)`.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Result<Self> {
        let len = check_size(size)?;
        let mut cells = Vec::with_capacity(len);
        for row in 0..size {
            for col in 0..size {
                cells.push(f(row, col));
            }
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Result<bool> {
        check_bounds(self.size, row, col)?;
        Ok(self.cell(row, col))
    }

    pub fn with_cell_set(&self, row: usize, col: usize, alive: bool) -> Result<Self> {
        check_bounds(self.size, row, col)?;
        let mut cells = self.cells.clone();
        cells[row * self.size + col] = alive;
        Ok(Self {
            size: self.size,
            cells,
        })
    }

    pub fn with_toggled(&self, row: usize, col: usize) -> Result<Self> {
        let alive = self.get(row, col)?;
        self.with_cell_set(row, col, !alive)
    }

    /// Same-size grid with every cell dead.
    pub fn cleared(&self) -> Self {
        Self {
            size: self.size,
            cells: vec![false; self.cells.len()],
        }
    }

    /// Live cells among the 8 Moore neighbors of an in-bounds cell.
    ///
    /// Each neighbor coordinate wraps independently, so row 0 sees row
    /// `size - 1` above it and column 0 sees column `size - 1` to its left.
    pub fn count_alive_neighbors(&self, row: usize, col: usize) -> Result<u8> {
        check_bounds(self.size, row, col)?;
        Ok(self.neighbors_wrapped(row, col))
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Rows as slices, top to bottom. Rendering reads the grid through this.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Coordinates of live cells in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(i, _)| (i / size, i % size))
    }

    // Caller guarantees size >= 1 and cells.len() == size * size.
    pub(crate) fn from_cells(size: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    // Unchecked read for callers that already hold valid indices.
    pub(crate) fn cell(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.size + col]
    }

    pub(crate) fn neighbors_wrapped(&self, row: usize, col: usize) -> u8 {
        let n = self.size;
        // Adding n - 1 is the same as subtracting 1 modulo n, without going negative.
        let rows = [(row + n - 1) % n, row, (row + 1) % n];
        let cols = [(col + n - 1) % n, col, (col + 1) % n];

        let mut count = 0;
        for (i, &r) in rows.iter().enumerate() {
            for (j, &c) in cols.iter().enumerate() {
                if i == 1 && j == 1 {
                    continue; // the cell itself
                }
                if self.cell(r, c) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &alive in row {
                f.write_str(if alive { "O" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

// Returns the cell count for a valid side length.
fn check_size(size: usize) -> Result<usize> {
    if size < 1 {
        return Err(LifeError::config("grid size must be at least 1"));
    }
    size
        .checked_mul(size)
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or_else(|| LifeError::config(format!("grid size {size} is too large")))
}

fn check_bounds(size: usize, row: usize, col: usize) -> Result<()> {
    if row >= size || col >= size {
        return Err(LifeError::Index { row, col, size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_a_configuration_error() {
        assert!(matches!(Grid::new(0), Err(LifeError::Configuration(_))));
        assert!(matches!(
            Grid::from_alive_cells(0, std::iter::empty()),
            Err(LifeError::Configuration(_))
        ));
    }

    #[test]
    fn oversized_grid_is_a_configuration_error() {
        for size in [usize::MAX, 1 << (usize::BITS / 2)] {
            assert!(matches!(Grid::new(size), Err(LifeError::Configuration(_))), "{size}");
            assert!(matches!(
                Grid::from_fn(size, |_, _| true),
                Err(LifeError::Configuration(_))
            ));
            assert!(matches!(
                Grid::from_alive_cells(size, [(0, 0)]),
                Err(LifeError::Configuration(_))
            ));
        }
    }

    #[test]
    fn new_grid_is_square_and_dead() {
        let grid = Grid::new(7).unwrap();
        assert_eq!(grid.size(), 7);
        assert_eq!(grid.rows().count(), 7);
        assert!(grid.rows().all(|row| row.len() == 7));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn raw_reads_are_not_wrapped() {
        let grid = Grid::new(5).unwrap();
        assert_eq!(
            grid.get(5, 0),
            Err(LifeError::Index { row: 5, col: 0, size: 5 })
        );
        assert!(grid.get(0, 5).is_err());
        assert!(grid.with_toggled(9, 9).is_err());
    }

    #[test]
    fn initializer_rejects_out_of_bounds_cells() {
        assert!(matches!(
            Grid::from_alive_cells(3, [(0, 0), (3, 1)]),
            Err(LifeError::Index { row: 3, col: 1, size: 3 })
        ));
    }

    #[test]
    fn toggle_changes_exactly_one_cell() {
        let before = Grid::from_alive_cells(6, [(1, 1), (2, 3), (5, 5)]).unwrap();
        let after = before.with_toggled(2, 3).unwrap();

        for row in 0..6 {
            for col in 0..6 {
                let changed = before.get(row, col).unwrap() != after.get(row, col).unwrap();
                assert_eq!(changed, (row, col) == (2, 3), "cell ({row}, {col})");
            }
        }
        // Source snapshot is untouched.
        assert!(before.get(2, 3).unwrap());
    }

    #[test]
    fn neighbors_wrap_across_the_corner() {
        let size = 8;
        let grid = Grid::from_alive_cells(size, [(0, 0)]).unwrap();
        assert_eq!(grid.count_alive_neighbors(size - 1, size - 1).unwrap(), 1);
        assert_eq!(grid.count_alive_neighbors(size - 1, 0).unwrap(), 1);
        assert_eq!(grid.count_alive_neighbors(0, size - 1).unwrap(), 1);
        assert_eq!(grid.count_alive_neighbors(0, 0).unwrap(), 0);
        assert_eq!(grid.count_alive_neighbors(4, 4).unwrap(), 0);
    }

    #[test]
    fn neighbors_on_a_full_grid() {
        let grid = Grid::from_fn(4, |_, _| true).unwrap();
        assert_eq!(grid.count_alive_neighbors(0, 0).unwrap(), 8);
        assert_eq!(grid.count_alive_neighbors(3, 2).unwrap(), 8);
    }

    #[test]
    fn display_marks_live_cells() {
        let grid = Grid::from_alive_cells(3, [(0, 1), (2, 2)]).unwrap();
        assert_eq!(grid.to_string(), ".O.\n...\n..O\n");
        assert_eq!(grid.alive_cells().collect::<Vec<_>>(), vec![(0, 1), (2, 2)]);
    }
}
