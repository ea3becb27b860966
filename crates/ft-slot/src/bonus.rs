//! Bonus round triggering, progress meter and payout multiplier

use rand::Rng;

use crate::config::BonusConfig;
use crate::grid::Grid;

/// Decides bonus rounds and applies the bonus multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusController {
    config: BonusConfig,
}

impl BonusController {
    pub fn new(config: BonusConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BonusConfig {
        &self.config
    }

    /// Should the next round be a bonus round?
    ///
    /// The uniform draw is always taken, so the random stream does not
    /// depend on the meter.
    pub fn decide<R: Rng + ?Sized>(&self, progress: f64, rng: &mut R) -> bool {
        let roll: f64 = rng.random();
        roll < self.config.trigger_probability || progress >= 1.0
    }

    /// Advance the meter by a random step; a full meter wraps to zero
    pub fn advance_progress<R: Rng + ?Sized>(&self, progress: f64, rng: &mut R) -> f64 {
        let step = rng.random_range(self.config.progress_step_min..self.config.progress_step_max);
        let next = (progress + step).min(1.0);
        if next >= 1.0 { 0.0 } else { next }
    }

    /// Multiply `win` for a bonus round unless the grid is entirely wild.
    ///
    /// Returns the (possibly) multiplied win and whether the multiplier was
    /// applied. A losing grid still counts as applied.
    pub fn apply_multiplier(&self, win: f64, grid: &Grid, bonus_was_active: bool) -> (f64, bool) {
        if bonus_was_active && grid.has_non_wild() {
            (win * self.config.multiplier, true)
        } else {
            (win, false)
        }
    }
}

impl Default for BonusController {
    fn default() -> Self {
        Self::new(BonusConfig::default())
    }
}
