//! Round result

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::paytable::LineWin;
use crate::reels::GenerationMode;

/// Complete outcome of one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Final win credited to the balance
    pub win_amount: f64,
    /// Grid the round was scored on
    pub grid: Grid,
    /// Bonus multiplier applied to this round
    pub bonus_applied: bool,
    /// Mode the grid was drawn in
    pub mode: GenerationMode,
    /// Bet staked
    pub bet: f64,
    /// Line total before multiplier and cap
    pub raw_win: f64,
    /// Paying lines
    pub line_wins: Vec<LineWin>,
    /// Win was cut to the payout ceiling
    pub capped: bool,
    /// Balance after the round
    pub balance: f64,
}

impl RoundResult {
    /// Check if this is a win
    pub fn is_win(&self) -> bool {
        self.win_amount > 0.0
    }

    /// Win-to-bet ratio
    pub fn win_ratio(&self) -> f64 {
        if self.bet > 0.0 {
            self.win_amount / self.bet
        } else {
            0.0
        }
    }

    /// Grid was drawn in bonus mode
    pub fn is_bonus_round(&self) -> bool {
        self.mode == GenerationMode::Bonus
    }
}
