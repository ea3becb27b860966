//! Batch session runner

use rayon::prelude::*;
use serde::Serialize;

use ft_slot::{
    REFERENCE_RTP, SessionStats, SlotConfig, SlotEngine, SlotResult, block_variances, rtp_label,
};

/// What to simulate
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub config: SlotConfig,
    /// Rounds per session
    pub spins: u64,
    pub sessions: usize,
    /// Session `i` uses `seed + i`; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Bet override (clamped by the engine)
    pub bet: Option<f64>,
    /// Block length for the variance series
    pub block_size: usize,
}

/// Outcome of one session
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub index: usize,
    pub seed: Option<u64>,
    pub bet: f64,
    pub stats: SessionStats,
    pub rtp: f64,
    pub rtp_label: String,
    pub hit_rate: f64,
    pub final_balance: f64,
    pub min_balance: f64,
    pub max_balance: f64,
    pub mean_block_variance: f64,
    pub max_block_variance: f64,
}

/// Outcome of the whole batch
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub sessions: Vec<SessionReport>,
    pub aggregate: SessionStats,
    pub rtp: f64,
    pub rtp_label: String,
    pub hit_rate: f64,
    pub reference_rtp: f64,
}

/// Play one session: `trigger_bonus()` then `play()` per cycle
pub fn run_session(plan: &SimulationPlan, index: usize) -> SlotResult<SessionReport> {
    let seed = plan.seed.map(|s| s.wrapping_add(index as u64));
    let mut engine = match seed {
        Some(seed) => SlotEngine::seeded(plan.config.clone(), seed)?,
        None => SlotEngine::from_os_rng(plan.config.clone())?,
    };
    if let Some(bet) = plan.bet {
        engine.set_bet(bet);
    }

    for _ in 0..plan.spins {
        engine.trigger_bonus();
        engine.play();
    }

    let variances = block_variances(engine.spin_history(), plan.block_size);
    let mean_block_variance = if variances.is_empty() {
        0.0
    } else {
        variances.iter().sum::<f64>() / variances.len() as f64
    };
    let max_block_variance = variances.iter().copied().fold(0.0, f64::max);

    let history = engine.balance_history();
    let min_balance = history.iter().copied().fold(f64::INFINITY, f64::min);
    let max_balance = history.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let stats = engine.stats().clone();
    log::debug!(
        "Session {} done: {} spins, RTP {}",
        index,
        stats.total_spins,
        engine.rtp_label()
    );

    Ok(SessionReport {
        index,
        seed,
        bet: engine.bet(),
        rtp: engine.rtp(),
        rtp_label: engine.rtp_label(),
        hit_rate: stats.hit_rate(),
        final_balance: engine.balance(),
        min_balance,
        max_balance,
        mean_block_variance,
        max_block_variance,
        stats,
    })
}

/// Run every session in parallel on `pool`
pub fn run(plan: &SimulationPlan, pool: &rayon::ThreadPool) -> SlotResult<SimulationReport> {
    let sessions = pool.install(|| {
        (0..plan.sessions)
            .into_par_iter()
            .map(|index| run_session(plan, index))
            .collect::<SlotResult<Vec<_>>>()
    })?;

    let mut aggregate = SessionStats::default();
    for session in &sessions {
        aggregate.merge(&session.stats);
    }

    Ok(SimulationReport {
        rtp: aggregate.rtp(),
        rtp_label: rtp_label(aggregate.total_win, aggregate.total_bet),
        hit_rate: aggregate.hit_rate(),
        reference_rtp: REFERENCE_RTP,
        aggregate,
        sessions,
    })
}
