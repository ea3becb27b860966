//! Symbol definitions and the symbol table

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Allowed deviation of the weight sum from 1.0
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Symbol identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Symbol {
    /// Wild - substitutes for every other symbol
    Tigre = 0,
    Jade = 1,
    Saco = 2,
    Moeda = 3,
    Sino = 4,
    Laranja = 5,
    Fogo = 6,
}

impl Symbol {
    /// Number of distinct symbols
    pub const COUNT: usize = 7;

    /// All symbols in table order (highest paying first)
    pub const ALL: [Symbol; Symbol::COUNT] = [
        Symbol::Tigre,
        Symbol::Jade,
        Symbol::Saco,
        Symbol::Moeda,
        Symbol::Sino,
        Symbol::Laranja,
        Symbol::Fogo,
    ];

    /// The wild symbol
    pub const WILD: Symbol = Symbol::Tigre;

    /// Is this the wild symbol?
    pub fn is_wild(self) -> bool {
        self == Self::WILD
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Tigre => "tigre",
            Symbol::Jade => "jade",
            Symbol::Saco => "saco",
            Symbol::Moeda => "moeda",
            Symbol::Sino => "sino",
            Symbol::Laranja => "laranja",
            Symbol::Fogo => "fogo",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configured payout and weight for one symbol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymbolSpec {
    pub symbol: Symbol,
    /// Paid per matching line per unit bet
    pub payout: f64,
    /// Selection probability on a normal reel draw
    pub weight: f64,
}

impl SymbolSpec {
    pub fn new(symbol: Symbol, payout: f64, weight: f64) -> Self {
        Self {
            symbol,
            payout,
            weight,
        }
    }
}

/// Default symbol set
pub fn standard_symbol_specs() -> Vec<SymbolSpec> {
    vec![
        SymbolSpec::new(Symbol::Tigre, 25.0, 0.03),
        SymbolSpec::new(Symbol::Jade, 10.0, 0.07),
        SymbolSpec::new(Symbol::Saco, 5.0, 0.10),
        SymbolSpec::new(Symbol::Moeda, 2.0, 0.15),
        SymbolSpec::new(Symbol::Sino, 1.0, 0.20),
        SymbolSpec::new(Symbol::Laranja, 0.5, 0.20),
        SymbolSpec::new(Symbol::Fogo, 0.3, 0.25),
    ]
}

/// Immutable registry of payouts and weights, indexed by [`Symbol`]
///
/// Weights form an exact probability distribution: a table whose weights do
/// not sum to 1.0 is rejected instead of renormalized.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable {
    payouts: [f64; Symbol::COUNT],
    weights: [f64; Symbol::COUNT],
}

impl SymbolTable {
    /// Standard table, filled from [`standard_symbol_specs`]
    pub fn standard() -> Self {
        let mut table = Self {
            payouts: [0.0; Symbol::COUNT],
            weights: [0.0; Symbol::COUNT],
        };
        for spec in standard_symbol_specs() {
            table.payouts[spec.symbol.index()] = spec.payout;
            table.weights[spec.symbol.index()] = spec.weight;
        }
        table
    }

    /// Build and validate a table; every symbol must appear exactly once
    pub fn from_specs(specs: &[SymbolSpec]) -> Result<Self, ConfigError> {
        let mut seen = [false; Symbol::COUNT];
        let mut payouts = [0.0; Symbol::COUNT];
        let mut weights = [0.0; Symbol::COUNT];

        for spec in specs {
            let idx = spec.symbol.index();
            if seen[idx] {
                return Err(ConfigError::DuplicateSymbol(spec.symbol));
            }
            if !spec.payout.is_finite() || spec.payout < 0.0 {
                return Err(ConfigError::InvalidPayout {
                    symbol: spec.symbol,
                    payout: spec.payout,
                });
            }
            if !spec.weight.is_finite() || spec.weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    symbol: spec.symbol,
                    weight: spec.weight,
                });
            }
            seen[idx] = true;
            payouts[idx] = spec.payout;
            weights[idx] = spec.weight;
        }

        if let Some(missing) = Symbol::ALL.into_iter().find(|s| !seen[s.index()]) {
            return Err(ConfigError::MissingSymbol(missing));
        }

        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::WeightSum {
                sum,
                tolerance: WEIGHT_TOLERANCE,
            });
        }

        Ok(Self { payouts, weights })
    }

    /// Selection weight of a symbol
    pub fn weight(&self, symbol: Symbol) -> f64 {
        self.weights[symbol.index()]
    }

    /// Line payout of a symbol (per unit bet)
    pub fn payout(&self, symbol: Symbol) -> f64 {
        self.payouts[symbol.index()]
    }

    /// The wild symbol
    pub fn wild(&self) -> Symbol {
        Symbol::WILD
    }

    /// Every symbol except the wild
    pub fn non_wild(&self) -> Vec<Symbol> {
        Symbol::ALL.into_iter().filter(|s| !s.is_wild()).collect()
    }

    /// Weights in table order
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Largest single-line payout
    pub fn max_payout(&self) -> f64 {
        self.payouts.iter().copied().fold(0.0, f64::max)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::standard()
    }
}
