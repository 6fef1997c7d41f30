// step.rs - Generation step: B3/S23 over a toroidal grid

use crate::grid::Grid;

/// Next state of one cell from its current state and live-neighbor count.
pub fn apply_rule(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

/// Computes the following generation. Every count is taken against `grid`,
/// which is never touched, so no cell sees a partially stepped neighbor.
pub fn next_generation(grid: &Grid) -> Grid {
    let size = grid.size();
    let mut next = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            next.push(apply_rule(grid.cell(row, col), grid.neighbors_wrapped(row, col)));
        }
    }
    Grid::from_cells(size, next)
}

/// Applies `generations` steps in sequence.
pub fn advance(grid: &Grid, generations: usize) -> Grid {
    let mut current = grid.clone();
    for _ in 0..generations {
        current = next_generation(&current);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{PatternId, place_centered};

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            assert_eq!(apply_rule(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(apply_rule(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn block_is_stable() {
        let grid = place_centered(&Grid::new(10).unwrap(), PatternId::Block.pattern());
        assert_eq!(grid.population(), 4);
        assert_eq!(next_generation(&grid), grid);
    }

    #[test]
    fn blinker_has_period_two() {
        let grid = place_centered(&Grid::new(9).unwrap(), PatternId::Blinker.pattern());
        // Vertical column through (3..=5, 4).
        assert_eq!(
            grid.alive_cells().collect::<Vec<_>>(),
            vec![(3, 4), (4, 4), (5, 4)]
        );

        let once = next_generation(&grid);
        assert_eq!(
            once.alive_cells().collect::<Vec<_>>(),
            vec![(4, 3), (4, 4), (4, 5)]
        );
        assert_eq!(next_generation(&once), grid);
    }

    #[test]
    fn glider_moves_one_cell_diagonally_every_four_generations() {
        let start = place_centered(&Grid::new(20).unwrap(), PatternId::Glider.pattern());
        let after = advance(&start, 4);

        let expected: Vec<_> = start.alive_cells().map(|(r, c)| (r + 1, c + 1)).collect();
        assert_eq!(after.alive_cells().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn stepping_does_not_touch_the_source() {
        let start = place_centered(&Grid::new(12).unwrap(), PatternId::Glider.pattern());
        let copy = start.clone();
        let _ = next_generation(&start);
        assert_eq!(start, copy);
    }

    #[test]
    fn births_wrap_around_the_edges() {
        // Horizontal blinker laid across the left/right seam on row 0.
        let grid = Grid::from_alive_cells(6, [(0, 5), (0, 0), (0, 1)]).unwrap();
        let next = next_generation(&grid);
        assert_eq!(
            next.alive_cells().collect::<Vec<_>>(),
            vec![(0, 0), (1, 0), (5, 0)]
        );
    }

    #[test]
    fn lonely_cell_dies() {
        let grid = Grid::from_alive_cells(5, [(2, 2)]).unwrap();
        assert_eq!(next_generation(&grid).population(), 0);
    }
}
