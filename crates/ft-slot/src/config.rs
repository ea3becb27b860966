//! Slot engine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::symbols::{SymbolSpec, SymbolTable, standard_symbol_specs};

/// Bet range and step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetLimits {
    /// Smallest allowed bet
    pub min: f64,
    /// Largest allowed bet
    pub max: f64,
    /// Bets are `min + k * step`
    pub step: f64,
    /// Bet of a fresh engine
    pub initial: f64,
}

impl BetLimits {
    /// Clamp into `[min, max]` and snap to the step grid.
    /// An unaligned `max` is never returned; the top bet is the last step below it.
    pub fn clamp(&self, amount: f64) -> f64 {
        let clamped = amount.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step)
            .round()
            .min(self.max_steps());
        self.min + steps * self.step
    }

    /// Largest bet on the step grid
    pub fn top(&self) -> f64 {
        self.min + self.max_steps() * self.step
    }

    fn max_steps(&self) -> f64 {
        // tolerance keeps 9.5 / 0.5 style ratios from flooring one step short
        ((self.max - self.min) / self.step + 1e-9).floor()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let all_finite = [self.min, self.max, self.step, self.initial]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ConfigError::BetLimits("non-finite value".into()));
        }
        if self.min <= 0.0 {
            return Err(ConfigError::BetLimits(format!(
                "min must be positive, got {}",
                self.min
            )));
        }
        if self.max < self.min {
            return Err(ConfigError::BetLimits(format!(
                "max {} below min {}",
                self.max, self.min
            )));
        }
        if self.step <= 0.0 {
            return Err(ConfigError::BetLimits(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if !(self.min..=self.max).contains(&self.initial) {
            return Err(ConfigError::BetLimits(format!(
                "initial bet {} outside [{}, {}]",
                self.initial, self.min, self.max
            )));
        }
        Ok(())
    }
}

impl Default for BetLimits {
    fn default() -> Self {
        Self {
            min: 0.50,
            max: 10.00,
            step: 0.50,
            initial: 1.00,
        }
    }
}

/// Bonus trigger and payout parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusConfig {
    /// Chance that any round is a bonus round
    pub trigger_probability: f64,
    /// Lower bound of the per-round meter increment (inclusive)
    pub progress_step_min: f64,
    /// Upper bound of the per-round meter increment (exclusive)
    pub progress_step_max: f64,
    /// Win multiplier for bonus rounds
    pub multiplier: f64,
}

impl BonusConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.trigger_probability) {
            return Err(ConfigError::Bonus(format!(
                "trigger probability {} outside [0, 1]",
                self.trigger_probability
            )));
        }
        let step_ok = self.progress_step_min.is_finite()
            && self.progress_step_max.is_finite()
            && self.progress_step_min >= 0.0
            && self.progress_step_min < self.progress_step_max;
        if !step_ok {
            return Err(ConfigError::Bonus(format!(
                "progress step range [{}, {}) is empty or invalid",
                self.progress_step_min, self.progress_step_max
            )));
        }
        if !self.multiplier.is_finite() || self.multiplier < 0.0 {
            return Err(ConfigError::Bonus(format!(
                "multiplier must be non-negative, got {}",
                self.multiplier
            )));
        }
        Ok(())
    }
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            trigger_probability: 0.01,
            progress_step_min: 0.05,
            progress_step_max: 0.15,
            multiplier: 10.0,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Symbol payouts and weights
    #[serde(default = "standard_symbol_specs")]
    pub symbols: Vec<SymbolSpec>,
    #[serde(default)]
    pub bet: BetLimits,
    #[serde(default)]
    pub bonus: BonusConfig,
    /// Round win ceiling, in bets
    #[serde(default = "default_payout_cap")]
    pub payout_cap_multiplier: f64,
    #[serde(default = "default_initial_balance")]
    pub initial_balance: f64,
}

fn default_payout_cap() -> f64 {
    2500.0
}

fn default_initial_balance() -> f64 {
    1000.0
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            symbols: standard_symbol_specs(),
            bet: BetLimits::default(),
            bonus: BonusConfig::default(),
            payout_cap_multiplier: default_payout_cap(),
            initial_balance: default_initial_balance(),
        }
    }
}

impl SlotConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SlotConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML config
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: SlotConfig = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let config = match ext.as_str() {
            "json" => Self::from_json(&text)?,
            "yaml" | "yml" => Self::from_yaml(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        log::info!("Loaded slot config from {:?}", path);
        Ok(config)
    }

    /// Export config as pretty JSON
    pub fn export_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the validated symbol table
    pub fn symbol_table(&self) -> Result<SymbolTable, ConfigError> {
        SymbolTable::from_specs(&self.symbols)
    }

    /// Check every field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let table = self.symbol_table()?;
        self.bet.validate()?;
        self.bonus.validate()?;

        if !self.payout_cap_multiplier.is_finite() || self.payout_cap_multiplier < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "payout cap multiplier must be non-negative, got {}",
                self.payout_cap_multiplier
            )));
        }
        if !self.initial_balance.is_finite() {
            return Err(ConfigError::InvalidValue(format!(
                "initial balance must be finite, got {}",
                self.initial_balance
            )));
        }

        if self.payout_cap_multiplier < table.max_payout() {
            log::warn!(
                "Payout cap {}x is below the top line payout {}x; single lines will be capped",
                self.payout_cap_multiplier,
                table.max_payout()
            );
        }
        Ok(())
    }
}
