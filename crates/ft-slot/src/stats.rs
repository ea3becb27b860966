//! Session statistics and history analytics

use serde::{Deserialize, Serialize};

use crate::spin::RoundResult;

/// Published theoretical RTP of the standard table (%)
pub const REFERENCE_RTP: f64 = 96.81;

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub total_bet: f64,
    pub total_win: f64,
    pub wins: u64,
    pub losses: u64,
    /// Rounds drawn in bonus mode
    pub bonus_rounds: u64,
    /// Rounds where the bonus multiplier was applied
    pub bonus_multiplied: u64,
    pub capped_rounds: u64,
    pub max_win: f64,
    pub max_win_ratio: f64,
}

impl SessionStats {
    /// Fold one round into the totals
    pub fn record(&mut self, result: &RoundResult) {
        self.total_spins += 1;
        self.total_bet += result.bet;
        self.total_win += result.win_amount;

        if result.is_win() {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        if result.is_bonus_round() {
            self.bonus_rounds += 1;
        }
        if result.bonus_applied {
            self.bonus_multiplied += 1;
        }
        if result.capped {
            self.capped_rounds += 1;
        }

        self.max_win = self.max_win.max(result.win_amount);
        self.max_win_ratio = self.max_win_ratio.max(result.win_ratio());
    }

    /// Calculate RTP (%)
    pub fn rtp(&self) -> f64 {
        rtp_percent(self.total_win, self.total_bet)
    }

    /// Calculate hit rate (%)
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Merge another session into this one
    pub fn merge(&mut self, other: &SessionStats) {
        self.total_spins += other.total_spins;
        self.total_bet += other.total_bet;
        self.total_win += other.total_win;
        self.wins += other.wins;
        self.losses += other.losses;
        self.bonus_rounds += other.bonus_rounds;
        self.bonus_multiplied += other.bonus_multiplied;
        self.capped_rounds += other.capped_rounds;
        self.max_win = self.max_win.max(other.max_win);
        self.max_win_ratio = self.max_win_ratio.max(other.max_win_ratio);
    }
}

/// `100 * win / bet`, or 0 when nothing was wagered
pub fn rtp_percent(total_win: f64, total_bet: f64) -> f64 {
    if total_bet > 0.0 {
        100.0 * total_win / total_bet
    } else {
        0.0
    }
}

/// RTP as displayed: `"0%"` before any wager, otherwise two decimals
pub fn rtp_label(total_win: f64, total_bet: f64) -> String {
    if total_bet > 0.0 {
        format!("{:.2}%", rtp_percent(total_win, total_bet))
    } else {
        "0%".to_string()
    }
}

/// Population variance of each consecutive block of `block_size` wins.
/// The last block may be shorter.
pub fn block_variances(history: &[f64], block_size: usize) -> Vec<f64> {
    if block_size == 0 {
        return Vec::new();
    }
    history.chunks(block_size).map(variance).collect()
}

/// Running RTP after each round, relative to `bet`
pub fn cumulative_rtp(history: &[f64], bet: f64) -> Vec<f64> {
    if history.is_empty() {
        return vec![0.0];
    }
    if bet <= 0.0 {
        return vec![0.0; history.len()];
    }

    let mut sum = 0.0;
    history
        .iter()
        .enumerate()
        .map(|(i, win)| {
            sum += win;
            sum / (i + 1) as f64 / bet * 100.0
        })
        .collect()
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtp_label() {
        assert_eq!(rtp_label(0.0, 0.0), "0%");
        assert_eq!(rtp_label(5.0, 0.0), "0%");
        assert_eq!(rtp_label(3.0, 4.0), "75.00%");
        assert_eq!(rtp_label(9681.0, 10000.0), "96.81%");
    }

    #[test]
    fn test_block_variances() {
        let history = [0.0, 2.0, 4.0, 4.0, 1.0];
        let v = block_variances(&history, 2);
        assert_eq!(v, vec![1.0, 0.0, 0.0]);
        assert!(block_variances(&history, 0).is_empty());
        assert!(block_variances(&[], 100).is_empty());
    }

    #[test]
    fn test_cumulative_rtp() {
        assert_eq!(cumulative_rtp(&[], 1.0), vec![0.0]);
        assert_eq!(cumulative_rtp(&[0.0, 2.0, 1.0], 1.0), vec![0.0, 100.0, 100.0]);
        assert_eq!(cumulative_rtp(&[1.0], 2.0), vec![50.0]);
    }

    #[test]
    fn test_hit_rate_empty() {
        let stats = SessionStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.rtp(), 0.0);
    }
}
