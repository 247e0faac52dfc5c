use serde::{Deserialize, Serialize};
use std::fmt;

/// Cutoffs resolved by default, ordered from the very top of the board down.
pub const DEFAULT_PERCENTILES: [f64; 11] = [
    0.0001, 0.001, 0.005, 0.01, 0.03, 0.04, 0.06, 0.08, 0.1, 0.18, 0.26,
];

/// Rank of the participant standing at `percentile` of `total`.
pub fn rank_for(total: u64, percentile: f64) -> u64 {
    (total as f64 * percentile).floor() as u64
}

pub fn is_valid_percentile(percentile: f64) -> bool {
    percentile.is_finite() && percentile > 0.0 && percentile <= 1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutoff {
    pub percentile: f64,
    pub rank: u64,
    pub total_points: i64,
}

/// Result of one resolve run, in the order the percentiles were given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutoffReport {
    pub total_participants: u64,
    pub cutoffs: Vec<Cutoff>,
}

impl CutoffReport {
    pub fn points(&self) -> Vec<i64> {
        self.cutoffs.iter().map(|c| c.total_points).collect()
    }
}

impl fmt::Display for CutoffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Points for top ranks: {:?}", self.points())?;
        writeln!(f, "Total participants: {}", self.total_participants)?;
        for cutoff in &self.cutoffs {
            writeln!(
                f,
                "  top {:>7.2}%  rank {:>9}  {:>12} points",
                cutoff.percentile * 100.0,
                cutoff.rank,
                cutoff.total_points
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_for_floors() {
        assert_eq!(rank_for(1_000_000, 0.0001), 100);
        assert_eq!(rank_for(1_000_000, 0.001), 1000);
        assert_eq!(rank_for(999, 0.01), 9);
        assert_eq!(rank_for(12_345, 0.26), 3209);
    }

    #[test]
    fn test_rank_for_is_deterministic() {
        for total in [0u64, 1, 7, 10_000, 1_234_567] {
            for p in DEFAULT_PERCENTILES {
                assert_eq!(rank_for(total, p), rank_for(total, p));
                assert!(rank_for(total, p) <= total);
            }
        }
    }

    #[test]
    fn test_rank_for_small_totals_yield_zero() {
        assert_eq!(rank_for(0, 0.26), 0);
        assert_eq!(rank_for(50, 0.0001), 0);
        assert_eq!(rank_for(10, 1.0), 10);
    }

    #[test]
    fn test_percentile_bounds() {
        assert!(is_valid_percentile(1.0));
        assert!(is_valid_percentile(0.0001));
        assert!(!is_valid_percentile(0.0));
        assert!(!is_valid_percentile(-0.1));
        assert!(!is_valid_percentile(1.01));
        assert!(!is_valid_percentile(f64::NAN));
    }

    #[test]
    fn test_report_points_keep_order() {
        let report = CutoffReport {
            total_participants: 1_000_000,
            cutoffs: vec![
                Cutoff { percentile: 0.0001, rank: 100, total_points: 5000 },
                Cutoff { percentile: 0.001, rank: 1000, total_points: 3000 },
            ],
        };

        assert_eq!(report.points(), vec![5000, 3000]);
        assert!(report.to_string().starts_with("Points for top ranks: [5000, 3000]"));
    }
}
