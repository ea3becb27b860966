//! Paylines and win calculation

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Position};
use crate::symbols::{Symbol, SymbolTable};

/// A payline definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payline {
    /// Payline index (0-based)
    pub index: u8,
    /// Cells checked, in order
    pub positions: [Position; 3],
}

impl Payline {
    /// Straight line across one row
    pub const fn row(index: u8, row: usize) -> Self {
        Self {
            index,
            positions: [(row, 0), (row, 1), (row, 2)],
        }
    }
}

/// The five fixed lines: three rows and both diagonals
pub const STANDARD_PAYLINES: [Payline; 5] = [
    Payline::row(0, 0),
    Payline::row(1, 1),
    Payline::row(2, 2),
    Payline {
        index: 3,
        positions: [(0, 0), (1, 1), (2, 2)],
    },
    Payline {
        index: 4,
        positions: [(0, 2), (1, 1), (2, 0)],
    },
];

/// A win on a single payline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineWin {
    /// Payline index
    pub line_index: u8,
    /// Paying symbol (the wild only on an all-wild line)
    pub symbol: Symbol,
    /// Wilds on the line
    pub wild_count: u8,
    /// bet × payout
    pub win_amount: f64,
}

/// Result of evaluating a grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Line wins
    pub line_wins: Vec<LineWin>,
    /// Total win amount
    pub total_win: f64,
}

impl EvaluationResult {
    /// Check if any line paid
    pub fn is_win(&self) -> bool {
        self.total_win > 0.0
    }

    /// Number of paying lines
    pub fn win_count(&self) -> usize {
        self.line_wins.len()
    }
}

/// Scores grids against the fixed paylines
#[derive(Debug, Clone)]
pub struct PayTable {
    /// Symbol definitions
    pub symbols: SymbolTable,
    /// Payline definitions
    pub paylines: Vec<Payline>,
}

impl PayTable {
    /// Paytable with the five standard lines
    pub fn new(symbols: SymbolTable) -> Self {
        Self {
            symbols,
            paylines: STANDARD_PAYLINES.to_vec(),
        }
    }

    /// Evaluate every line; lines are independent and cumulative
    pub fn evaluate(&self, grid: &Grid, bet: f64) -> EvaluationResult {
        let line_wins: Vec<LineWin> = self
            .paylines
            .iter()
            .filter_map(|line| self.evaluate_line(grid, line, bet))
            .collect();
        // fold from +0.0: an empty f64 `sum()` yields -0.0
        let total_win = line_wins.iter().fold(0.0, |acc, w| acc + w.win_amount);

        EvaluationResult {
            line_wins,
            total_win,
        }
    }

    fn evaluate_line(&self, grid: &Grid, payline: &Payline, bet: f64) -> Option<LineWin> {
        let line = payline.positions.map(|pos| grid.get(pos));
        let wild = self.symbols.wild();
        let wild_count = line.iter().filter(|&&s| s == wild).count() as u8;

        let symbol = if line[0] == line[1] && line[1] == line[2] {
            line[0]
        } else if wild_count > 0 {
            // Substitution needs the non-wild cells to agree, wherever the wilds sit
            let mut non_wild = line.iter().copied().filter(|&s| s != wild);
            let first = non_wild.next()?;
            if !non_wild.all(|s| s == first) {
                return None;
            }
            first
        } else {
            return None;
        };

        let win_amount = self.symbols.payout(symbol) * bet;
        if win_amount <= 0.0 {
            return None;
        }

        Some(LineWin {
            line_index: payline.index,
            symbol,
            wild_count,
            win_amount,
        })
    }
}

impl Default for PayTable {
    fn default() -> Self {
        Self::new(SymbolTable::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::*;

    fn paytable() -> PayTable {
        PayTable::default()
    }

    /// Grid with `line` on the middle row; filler keeps the other lines dead
    /// whatever sits in the centre cell
    fn middle_row(line: [Symbol; 3]) -> Grid {
        Grid::new([[Jade, Saco, Moeda], line, [Laranja, Fogo, Saco]])
    }

    #[test]
    fn test_three_of_a_kind() {
        let result = paytable().evaluate(&middle_row([Saco, Saco, Saco]), 2.0);
        assert_eq!(result.total_win, 10.0);
        assert_eq!(result.win_count(), 1);
        assert_eq!(result.line_wins[0].line_index, 1);
    }

    #[test]
    fn test_wild_position_independent() {
        let table = paytable();
        for line in [[Moeda, Tigre, Moeda], [Moeda, Moeda, Tigre], [Tigre, Moeda, Moeda]] {
            let result = table.evaluate(&middle_row(line), 1.0);
            assert_eq!(result.total_win, 2.0, "{line:?}");
        }
    }

    #[test]
    fn test_two_wilds_same_as_one() {
        let table = paytable();
        let one = table.evaluate(&middle_row([Sino, Tigre, Sino]), 1.0);
        let two = table.evaluate(&middle_row([Tigre, Sino, Tigre]), 1.0);
        assert_eq!(one.total_win, 1.0);
        assert_eq!(two.total_win, 1.0);
        assert_eq!(two.line_wins[0].wild_count, 2);
    }

    #[test]
    fn test_mixed_with_wild_pays_nothing() {
        let result = paytable().evaluate(&middle_row([Jade, Tigre, Fogo]), 1.0);
        assert!(!result.is_win());
        assert_eq!(result.total_win, 0.0);
    }

    #[test]
    fn test_all_wild_line_pays_wild() {
        let result = paytable().evaluate(&middle_row([Tigre, Tigre, Tigre]), 1.0);
        assert_eq!(result.total_win, 25.0);
        assert_eq!(result.line_wins[0].symbol, Tigre);
    }

    #[test]
    fn test_rows_and_diagonals_cumulative() {
        // sino on the top row and both diagonals only
        let grid = Grid::new([[Sino, Sino, Sino], [Jade, Sino, Laranja], [Sino, Moeda, Sino]]);
        let result = paytable().evaluate(&grid, 1.0);
        assert_eq!(result.total_win, 3.0);
        let lines: Vec<u8> = result.line_wins.iter().map(|w| w.line_index).collect();
        assert_eq!(lines, vec![0, 3, 4]);
    }

    #[test]
    fn test_all_wild_grid() {
        let result = paytable().evaluate(&Grid::filled(Tigre), 1.0);
        assert_eq!(result.total_win, 125.0);
        assert_eq!(result.win_count(), 5);
    }

    #[test]
    fn test_never_negative() {
        let table = paytable();
        for a in Symbol::ALL {
            for b in Symbol::ALL {
                let grid = Grid::new([[a, b, a], [b, a, b], [a, a, b]]);
                let win = table.evaluate(&grid, 0.5).total_win;
                assert!(win >= 0.0 && win.is_sign_positive(), "{grid}: {win}");
            }
        }
    }

    #[test]
    fn test_losing_grid_is_positive_zero() {
        let grid = Grid::new([[Jade, Saco, Moeda], [Fogo, Sino, Jade], [Laranja, Fogo, Saco]]);
        let result = paytable().evaluate(&grid, 1.0);
        assert!(!result.is_win());
        assert_eq!(result.total_win, 0.0);
        assert!(result.total_win.is_sign_positive());
    }
}
