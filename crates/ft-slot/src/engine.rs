//! Round engine: owns the account state and resolves one round at a time

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::bonus::BonusController;
use crate::config::SlotConfig;
use crate::error::{SlotError, SlotResult};
use crate::grid::Grid;
use crate::paytable::PayTable;
use crate::reels::{GenerationMode, ReelGenerator};
use crate::spin::RoundResult;
use crate::stats::{SessionStats, rtp_label, rtp_percent};

/// Account and history state of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub balance: f64,
    pub bet: f64,
    pub total_bet: f64,
    pub total_win: f64,
    pub last_win: f64,
    /// Next round is a bonus round; cleared after every round
    pub bonus_active: bool,
    /// Bonus meter in [0, 1)
    pub bonus_progress: f64,
    /// Win of every round, in order
    pub spin_history: Vec<f64>,
    /// Balance after every round, starting with the initial balance
    pub balance_history: Vec<f64>,
}

impl EngineState {
    fn new(balance: f64, bet: f64) -> Self {
        Self {
            balance,
            bet,
            total_bet: 0.0,
            total_win: 0.0,
            last_win: 0.0,
            bonus_active: false,
            bonus_progress: 0.0,
            spin_history: Vec::new(),
            balance_history: vec![balance],
        }
    }
}

/// Slot round engine
///
/// Generic over the random source so rounds can be replayed from a seed.
/// Every operation takes `&mut self`: one round completes before anything
/// else touches the state.
pub struct SlotEngine<R = ChaCha8Rng> {
    config: SlotConfig,
    paytable: PayTable,
    reels: ReelGenerator,
    bonus: BonusController,
    rng: R,
    state: EngineState,
    stats: SessionStats,
}

impl SlotEngine<ChaCha8Rng> {
    /// Default config, seeded from the OS
    pub fn new() -> SlotResult<Self> {
        Self::from_os_rng(SlotConfig::default())
    }

    /// Reproducible engine
    pub fn seeded(config: SlotConfig, seed: u64) -> SlotResult<Self> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Engine seeded from OS entropy
    pub fn from_os_rng(config: SlotConfig) -> SlotResult<Self> {
        let rng = ChaCha8Rng::try_from_os_rng().map_err(|e| SlotError::Entropy(e.to_string()))?;
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> SlotEngine<R> {
    /// Create with an injected random source; rejects invalid configs
    pub fn with_rng(config: SlotConfig, rng: R) -> SlotResult<Self> {
        config.validate()?;
        let table = config.symbol_table()?;
        let reels = ReelGenerator::new(&table)?;
        let state = EngineState::new(config.initial_balance, config.bet.clamp(config.bet.initial));

        Ok(Self {
            paytable: PayTable::new(table),
            reels,
            bonus: BonusController::new(config.bonus),
            rng,
            state,
            stats: SessionStats::default(),
            config,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ROUND EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Decide whether the next round is a bonus round
    pub fn trigger_bonus(&mut self) -> bool {
        self.state.bonus_active = self
            .bonus
            .decide(self.state.bonus_progress, &mut self.rng);
        if self.state.bonus_active {
            log::info!(
                "Bonus round armed (meter {:.2})",
                self.state.bonus_progress
            );
        }
        self.state.bonus_active
    }

    /// Play one round on a freshly drawn grid
    pub fn play(&mut self) -> RoundResult {
        let mode = self.current_mode();
        let grid = self.reels.generate(mode, &mut self.rng);
        self.resolve(grid, mode)
    }

    /// Play one round on a supplied grid (replays, scripted outcomes)
    pub fn play_forced(&mut self, grid: Grid) -> RoundResult {
        let mode = self.current_mode();
        self.resolve(grid, mode)
    }

    fn current_mode(&self) -> GenerationMode {
        if self.state.bonus_active {
            GenerationMode::Bonus
        } else {
            GenerationMode::Normal
        }
    }

    fn resolve(&mut self, grid: Grid, mode: GenerationMode) -> RoundResult {
        let bet = self.state.bet;

        let eval = self.paytable.evaluate(&grid, bet);
        let (multiplied, bonus_applied) =
            self.bonus
                .apply_multiplier(eval.total_win, &grid, self.state.bonus_active);

        let ceiling = self.config.payout_cap_multiplier * bet;
        let capped = multiplied > ceiling;
        let win = multiplied.min(ceiling);
        if capped {
            log::info!("Win {:.2} capped at {:.2}", multiplied, ceiling);
        }

        let state = &mut self.state;
        state.total_bet += bet;
        state.balance -= bet;
        state.total_win += win;
        state.balance += win;
        state.last_win = win;
        state.spin_history.push(win);
        state.balance_history.push(state.balance);
        state.bonus_active = false;
        state.bonus_progress = self
            .bonus
            .advance_progress(state.bonus_progress, &mut self.rng);

        let result = RoundResult {
            win_amount: win,
            grid,
            bonus_applied,
            mode,
            bet,
            raw_win: eval.total_win,
            line_wins: eval.line_wins,
            capped,
            balance: state.balance,
        };
        self.stats.record(&result);

        log::debug!(
            "Round {} [{:?}]: raw {:.2}, win {:.2}, balance {:.2}, meter {:.2}",
            self.stats.total_spins,
            mode,
            result.raw_win,
            result.win_amount,
            result.balance,
            self.state.bonus_progress
        );

        result
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // BET
    // ═══════════════════════════════════════════════════════════════════════════

    /// Set the bet, clamped to the configured range and step.
    /// Non-finite input leaves the bet unchanged.
    pub fn set_bet(&mut self, amount: f64) -> f64 {
        if !amount.is_finite() {
            log::debug!("Ignoring non-finite bet {}", amount);
            return self.state.bet;
        }
        let bet = self.config.bet.clamp(amount);
        if bet != amount {
            log::debug!("Bet {} adjusted to {}", amount, bet);
        }
        self.state.bet = bet;
        bet
    }

    /// Raise the bet by one step
    pub fn increase_bet(&mut self) -> f64 {
        self.set_bet(self.state.bet + self.config.bet.step)
    }

    /// Lower the bet by one step
    pub fn decrease_bet(&mut self) -> f64 {
        self.set_bet(self.state.bet - self.config.bet.step)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SNAPSHOT ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn balance(&self) -> f64 {
        self.state.balance
    }

    pub fn bet(&self) -> f64 {
        self.state.bet
    }

    pub fn last_win(&self) -> f64 {
        self.state.last_win
    }

    pub fn bonus_active(&self) -> bool {
        self.state.bonus_active
    }

    pub fn bonus_progress(&self) -> f64 {
        self.state.bonus_progress
    }

    pub fn spin_history(&self) -> &[f64] {
        &self.state.spin_history
    }

    pub fn balance_history(&self) -> &[f64] {
        &self.state.balance_history
    }

    pub fn total_bet(&self) -> f64 {
        self.state.total_bet
    }

    pub fn total_win(&self) -> f64 {
        self.state.total_win
    }

    /// Whole state
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Get session stats
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Get current config
    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn paytable(&self) -> &PayTable {
        &self.paytable
    }

    /// Return to player (%), 0 before any wager
    pub fn rtp(&self) -> f64 {
        rtp_percent(self.state.total_win, self.state.total_bet)
    }

    /// RTP as shown on the panel, `"0%"` before any wager
    pub fn rtp_label(&self) -> String {
        rtp_label(self.state.total_win, self.state.total_bet)
    }

    /// Export state as JSON
    pub fn export_state(&self) -> SlotResult<String> {
        serde_json::to_string_pretty(&self.state)
            .map_err(|e| SlotError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::symbols::Symbol;

    fn engine(seed: u64) -> SlotEngine {
        SlotEngine::seeded(SlotConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_engine_creation() {
        let engine = engine(1);
        assert_eq!(engine.balance(), 1000.0);
        assert_eq!(engine.bet(), 1.0);
        assert_eq!(engine.balance_history(), &[1000.0]);
        assert!(engine.spin_history().is_empty());
        assert_eq!(engine.rtp_label(), "0%");
        assert_eq!(engine.rtp(), 0.0);
    }

    #[test]
    fn test_bad_weights_rejected() {
        let mut config = SlotConfig::default();
        config.symbols[0].weight = 0.5;
        let err = SlotEngine::seeded(config, 1).err().unwrap();
        assert!(matches!(err, SlotError::Config(ConfigError::WeightSum { .. })));
    }

    #[test]
    fn test_round_accounting() {
        let mut engine = engine(42);
        let result = engine.play();

        assert_eq!(engine.total_bet(), 1.0);
        assert_eq!(engine.total_win(), result.win_amount);
        assert_eq!(engine.balance(), 999.0 + result.win_amount);
        assert_eq!(engine.last_win(), result.win_amount);
        assert_eq!(engine.spin_history(), &[result.win_amount]);
        assert_eq!(engine.balance_history(), &[1000.0, engine.balance()]);
        assert_eq!(result.balance, engine.balance());
    }

    #[test]
    fn test_bonus_cleared_after_round() {
        let mut engine = engine(3);
        engine.state.bonus_active = true;
        let result = engine.play();
        assert!(result.is_bonus_round());
        assert!(!engine.bonus_active());

        let result = engine.play();
        assert!(!result.is_bonus_round());
    }

    #[test]
    fn test_bonus_grid_multiplied() {
        let mut engine = engine(9);
        engine.state.bonus_active = true;
        let result = engine.play();

        assert!(result.grid.has_non_wild());
        assert!(result.bonus_applied);
        let expected = (result.raw_win * 10.0).min(2500.0 * result.bet);
        assert_eq!(result.win_amount, expected);
    }

    #[test]
    fn test_set_bet_clamps() {
        let mut engine = engine(1);
        assert_eq!(engine.set_bet(100.0), 10.0);
        assert_eq!(engine.set_bet(0.1), 0.5);
        assert_eq!(engine.set_bet(f64::NAN), 0.5);
        assert_eq!(engine.set_bet(3.5), 3.5);
        assert_eq!(engine.bet(), 3.5);
    }

    #[test]
    fn test_bet_steps() {
        let mut engine = engine(1);
        assert_eq!(engine.increase_bet(), 1.5);
        assert_eq!(engine.decrease_bet(), 1.0);
        assert_eq!(engine.decrease_bet(), 0.5);
        assert_eq!(engine.decrease_bet(), 0.5);

        engine.set_bet(10.0);
        assert_eq!(engine.increase_bet(), 10.0);
    }

    #[test]
    fn test_forced_round_uses_current_bet() {
        let mut engine = engine(1);
        engine.set_bet(2.0);
        let grid = Grid::new([
            [Symbol::Jade, Symbol::Jade, Symbol::Jade],
            [Symbol::Fogo, Symbol::Saco, Symbol::Moeda],
            [Symbol::Sino, Symbol::Laranja, Symbol::Fogo],
        ]);
        let result = engine.play_forced(grid);
        assert_eq!(result.win_amount, 20.0);
        assert_eq!(engine.balance(), 1000.0 - 2.0 + 20.0);
    }

    #[test]
    fn test_losing_round_records_positive_zero() {
        let mut engine = engine(1);
        let grid = Grid::new([
            [Symbol::Jade, Symbol::Saco, Symbol::Moeda],
            [Symbol::Fogo, Symbol::Sino, Symbol::Jade],
            [Symbol::Laranja, Symbol::Fogo, Symbol::Saco],
        ]);
        let result = engine.play_forced(grid);

        assert!(result.raw_win.is_sign_positive());
        assert!(result.win_amount.is_sign_positive());
        assert!(engine.last_win().is_sign_positive());
        assert!(engine.spin_history()[0].is_sign_positive());
        assert_eq!(format!("{:.2}", engine.last_win()), "0.00");

        let json = engine.export_state().unwrap();
        assert!(!json.contains("-0.0"), "{json}");
    }

    #[test]
    fn test_os_seeded_engine_plays() {
        let mut engine = SlotEngine::new().unwrap();
        let result = engine.play();
        assert_eq!(engine.total_bet(), 1.0);
        assert_eq!(engine.balance(), 999.0 + result.win_amount);
        assert_eq!(engine.spin_history().len(), 1);

        let mut engine = SlotEngine::from_os_rng(SlotConfig::default()).unwrap();
        engine.trigger_bonus();
        engine.play();
        assert_eq!(engine.balance_history().len(), 2);
    }

    #[test]
    fn test_export_state() {
        let mut engine = engine(8);
        engine.play();
        let json = engine.export_state().unwrap();
        let state: EngineState = serde_json::from_str(&json).unwrap();
        assert_eq!(&state, engine.state());
    }
}
