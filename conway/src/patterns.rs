// patterns.rs - Built-in seed patterns, random fill, and placement

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{LifeError, Result};
use crate::grid::Grid;

/// Alive-cell probability used when none is configured.
pub const DEFAULT_DENSITY: f64 = 0.3;

/// A fixed shape. Rows are plaintext: `O` is alive, anything else is dead.
/// Rows may be shorter than the widest one; missing cells are not part of the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub rows: &'static [&'static str],
}

impl Pattern {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.len()).max().unwrap_or(0)
    }

    /// Value at a pattern-relative position, `None` if the row doesn't reach it.
    pub fn cell(&self, row: usize, col: usize) -> Option<bool> {
        self.rows
            .get(row)
            .and_then(|r| r.as_bytes().get(col))
            .map(|&b| b == b'O')
    }

    /// Top-left corner that centers this pattern on a `size x size` grid.
    /// Negative when the pattern is larger than the grid.
    pub fn centered_origin(&self, size: usize) -> (isize, isize) {
        let offset = |extent: usize| (size as isize - extent as isize).div_euclid(2);
        (offset(self.height()), offset(self.width()))
    }
}

/// The closed set of library patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternId {
    Glider,
    Blinker,
    Block,
    Toad,
    Beacon,
    Pulsar,
    RPentomino,
    GosperGliderGun,
}

impl PatternId {
    pub const ALL: [PatternId; 8] = [
        PatternId::Glider,
        PatternId::Blinker,
        PatternId::Block,
        PatternId::Toad,
        PatternId::Beacon,
        PatternId::Pulsar,
        PatternId::RPentomino,
        PatternId::GosperGliderGun,
    ];

    pub fn pattern(self) -> &'static Pattern {
        match self {
            PatternId::Glider => &GLIDER,
            PatternId::Blinker => &BLINKER,
            PatternId::Block => &BLOCK,
            PatternId::Toad => &TOAD,
            PatternId::Beacon => &BEACON,
            PatternId::Pulsar => &PULSAR,
            PatternId::RPentomino => &R_PENTOMINO,
            PatternId::GosperGliderGun => &GOSPER_GLIDER_GUN,
        }
    }

    /// Lookup key accepted by `Seed::from_str`.
    pub fn key(self) -> &'static str {
        match self {
            PatternId::Glider => "glider",
            PatternId::Blinker => "blinker",
            PatternId::Block => "block",
            PatternId::Toad => "toad",
            PatternId::Beacon => "beacon",
            PatternId::Pulsar => "pulsar",
            PatternId::RPentomino => "r-pentomino",
            PatternId::GosperGliderGun => "gosper-glider-gun",
        }
    }
}

/// What a placement request seeds the grid with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seed {
    Pattern(PatternId),
    /// Fresh random noise over the whole grid; placement coordinates are ignored.
    Random,
}

impl Seed {
    /// Every seed in menu order, random last.
    pub fn all() -> impl Iterator<Item = Seed> {
        PatternId::ALL
            .into_iter()
            .map(Seed::Pattern)
            .chain(std::iter::once(Seed::Random))
    }

    pub fn key(self) -> &'static str {
        match self {
            Seed::Pattern(id) => id.key(),
            Seed::Random => "random",
        }
    }
}

impl FromStr for Seed {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        if wanted == "random" {
            return Ok(Seed::Random);
        }
        PatternId::ALL
            .into_iter()
            .find(|id| id.key() == wanted)
            .map(Seed::Pattern)
            .ok_or_else(|| LifeError::UnknownPattern(s.to_string()))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Pattern(id) => f.write_str(id.pattern().name),
            Seed::Random => f.write_str("Random"),
        }
    }
}

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    rows: &[".O.", "..O", "OOO"],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    rows: &["O", "O", "O"],
};

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    rows: &["OO", "OO"],
};

pub const TOAD: Pattern = Pattern {
    name: "Toad",
    rows: &[".OOO", "OOO."],
};

pub const BEACON: Pattern = Pattern {
    name: "Beacon",
    rows: &["OO..", "OO..", "..OO", "..OO"],
};

pub const PULSAR: Pattern = Pattern {
    name: "Pulsar",
    rows: &[
        // Top half
        "..OOO...OOO..",
        ".............",
        "O....O.O....O",
        "O....O.O....O",
        "O....O.O....O",
        "..OOO...OOO..",
        ".............",
        // Bottom half (mirrored)
        "..OOO...OOO..",
        "O....O.O....O",
        "O....O.O....O",
        "O....O.O....O",
        ".............",
        "..OOO...OOO..",
    ],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "R-pentomino",
    rows: &[".OO", "OO.", ".O."],
};

pub const GOSPER_GLIDER_GUN: Pattern = Pattern {
    name: "Gosper Glider Gun",
    rows: &[
        "........................O",
        "......................O.O",
        "............OO......OO............OO",
        "...........O...O....OO............OO",
        "OO........O.....O...OO",
        "OO........O...O.OO....O.O",
        "..........O.....O.......O",
        "...........O...O",
        "............OO",
    ],
};

/// Overlays `pattern` with its top-left corner at `(start_row, start_col)`.
///
/// Pattern cells overwrite whatever is underneath, dead ones included. Cells
/// landing outside the grid are dropped: placement clips, it does not wrap.
pub fn place(grid: &Grid, pattern: &Pattern, start_row: isize, start_col: isize) -> Grid {
    let size = grid.size();
    let mut cells = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let overlay = pattern_offset(row, start_row)
                .zip(pattern_offset(col, start_col))
                .and_then(|(pr, pc)| pattern.cell(pr, pc));
            cells.push(overlay.unwrap_or_else(|| grid.cell(row, col)));
        }
    }
    Grid::from_cells(size, cells)
}

/// `place` at the centered origin.
pub fn place_centered(grid: &Grid, pattern: &Pattern) -> Grid {
    let (row, col) = pattern.centered_origin(grid.size());
    place(grid, pattern, row, col)
}

// Grid index -> pattern-relative index, if the grid cell lies at or past the origin.
fn pattern_offset(index: usize, start: isize) -> Option<usize> {
    (index as isize)
        .checked_sub(start)
        .and_then(|offset| usize::try_from(offset).ok())
}

/// Fresh grid where each cell is alive with probability `density`.
pub fn random_fill(size: usize, density: f64) -> Result<Grid> {
    random_fill_with(size, density, &mut rand::thread_rng())
}

/// `random_fill` drawing from a caller-supplied generator, for reproducible seeds.
pub fn random_fill_with<R: Rng>(size: usize, density: f64, rng: &mut R) -> Result<Grid> {
    check_density(density)?;
    Grid::from_fn(size, |_, _| rng.gen_bool(density))
}

pub(crate) fn check_density(density: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&density) {
        return Err(LifeError::config(format!(
            "random density must be within [0, 1], got {density}"
        )));
    }
    Ok(())
}
