//! 3×3 symbol grid

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbols::Symbol;

/// Rows (and columns) of the grid
pub const GRID_SIZE: usize = 3;

/// Grid coordinate (row, col)
pub type Position = (usize, usize);

/// Symbol grid, row-major: `cells[row][col]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Symbol; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    pub fn new(cells: [[Symbol; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// Every cell holds the same symbol
    pub fn filled(symbol: Symbol) -> Self {
        Self {
            cells: [[symbol; GRID_SIZE]; GRID_SIZE],
        }
    }

    pub fn get(&self, (row, col): Position) -> Symbol {
        self.cells[row][col]
    }

    pub fn set(&mut self, (row, col): Position, symbol: Symbol) {
        self.cells[row][col] = symbol;
    }

    /// Cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    /// At least one cell is not the wild
    pub fn has_non_wild(&self) -> bool {
        self.iter().any(|s| !s.is_wild())
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.iter().filter(|&s| s == symbol).count()
    }
}

impl From<[[Symbol; GRID_SIZE]; GRID_SIZE]> for Grid {
    fn from(cells: [[Symbol; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self::new(cells)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let names: Vec<&str> = row.iter().map(|s| s.name()).collect();
            write!(f, "{}", names.join(" | "))?;
        }
        Ok(())
    }
}
