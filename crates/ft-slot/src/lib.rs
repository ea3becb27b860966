//! # ft-slot: Fortune Tiger round engine
//!
//! Resolves 3×3 slot rounds: weighted reel draws, five wild-substituting
//! paylines, a bonus mode with its own grid fill and payout multiplier, a
//! payout ceiling, and running account/history state.
//!
//! ## Architecture
//!
//! ```text
//! SlotEngine::trigger_bonus()  ── BonusController::decide
//!     │
//! SlotEngine::play()
//!     ├── ReelGenerator::generate (Normal | Bonus)
//!     ├── PayTable::evaluate      (5 lines, wild = tigre)
//!     ├── BonusController::apply_multiplier
//!     ├── payout cap (2500 × bet)
//!     ├── EngineState update      (balance, totals, histories)
//!     └── BonusController::advance_progress
//!           │
//!           v
//!     RoundResult
//! ```
//!
//! The random source is injected; [`SlotEngine::seeded`] gives bit-exact
//! replays.

pub mod bonus;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod paytable;
pub mod reels;
pub mod shared;
pub mod spin;
pub mod stats;
pub mod symbols;

pub use bonus::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use paytable::*;
pub use reels::*;
pub use shared::*;
pub use spin::*;
pub use stats::*;
pub use symbols::*;
