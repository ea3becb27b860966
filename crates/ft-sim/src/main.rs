//! Fortune Tiger batch simulator
//!
//! Usage:
//!   ft-sim --spins 100000 --seed 42            - One seeded session
//!   ft-sim --sessions 8 --threads 4 --json     - Parallel sessions, JSON report
//!   ft-sim --config table.yaml --bet 2.5       - Custom symbol table and bet

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ft_slot::SlotConfig;

mod sim;

use sim::{SimulationPlan, SimulationReport};

#[derive(Parser)]
#[command(name = "ft-sim", about = "Fortune Tiger batch spin simulator")]
struct Cli {
    /// Rounds per session
    #[arg(short, long, default_value_t = 10_000)]
    spins: u64,

    /// Base seed (session i uses seed + i); OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Independent sessions
    #[arg(long, default_value_t = 1)]
    sessions: usize,

    /// Worker threads (defaults to the CPU count)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Bet per round (clamped to the configured range)
    #[arg(short, long)]
    bet: Option<f64>,

    /// JSON or YAML engine config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rounds per variance block
    #[arg(long, default_value_t = 100)]
    block_size: usize,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SlotConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SlotConfig::default(),
    };

    let threads = cli.threads.unwrap_or_else(num_cpus::get).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("failed to build worker pool")?;

    let plan = SimulationPlan {
        config,
        spins: cli.spins,
        sessions: cli.sessions.max(1),
        seed: cli.seed,
        bet: cli.bet,
        block_size: cli.block_size,
    };

    log::info!(
        "Simulating {} session(s) x {} spins on {} thread(s)",
        plan.sessions,
        plan.spins,
        threads
    );

    let report = sim::run(&plan, &pool).context("simulation failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &SimulationReport) {
    println!(
        "{:>4}  {:>10}  {:>6}  {:>10}  {:>8}  {:>12}  {:>12}  {:>10}",
        "#", "seed", "bet", "RTP", "hit %", "final", "min", "var/blk"
    );
    for s in &report.sessions {
        let seed = s.seed.map(|v| v.to_string()).unwrap_or_else(|| "os".into());
        println!(
            "{:>4}  {:>10}  {:>6.2}  {:>10}  {:>8.2}  {:>12.2}  {:>12.2}  {:>10.2}",
            s.index,
            seed,
            s.bet,
            s.rtp_label,
            s.hit_rate,
            s.final_balance,
            s.min_balance,
            s.mean_block_variance
        );
    }

    let agg = &report.aggregate;
    println!();
    println!("spins        {}", agg.total_spins);
    println!("total bet    {:.2}", agg.total_bet);
    println!("total win    {:.2}", agg.total_win);
    println!(
        "RTP          {} (reference {:.2}%)",
        report.rtp_label, report.reference_rtp
    );
    println!("hit rate     {:.2}%", report.hit_rate);
    println!(
        "bonus        {} rounds, {} multiplied",
        agg.bonus_rounds, agg.bonus_multiplied
    );
    println!("capped       {}", agg.capped_rounds);
    println!("max win      {:.2} ({:.1}x)", agg.max_win, agg.max_win_ratio);
}
