//! Retargeting recap — ROAS and a three-stage funnel from campaign actuals,
//! plus a side-by-side table of candidate retargeting strategies.

use campaign_core::{ratio, StageVolume};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Observed totals for a finished (or running) retargeting campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecapActuals {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetargetingRecap {
    pub spend: f64,
    pub revenue: f64,
    /// `revenue / spend` (0.0 when nothing was spent).
    pub roas: f64,
    /// Impressions, clicks, conversions.
    pub stages: Vec<StageVolume>,
}

/// One retargeting approach under consideration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyCandidate {
    pub audience_segment: String,
    pub channel: String,
    pub cadence: String,
    pub duration_weeks: u32,
    /// Relative share of budget; need not sum to 100 across candidates.
    pub budget_share: f64,
    pub message_style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRow {
    pub label: String,
    #[serde(flatten)]
    pub candidate: StrategyCandidate,
    /// `budget_share / Σ budget_share * 100`.
    pub normalized_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub rows: Vec<StrategyRow>,
    /// Normalized shares in candidate order; sums to 100 unless every raw
    /// share is zero.
    pub distribution: Vec<f64>,
    pub total_raw_share: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RetargetingRecapEstimator;

impl RetargetingRecapEstimator {
    pub fn new() -> Self {
        Self
    }

    pub fn recap(&self, actuals: &RecapActuals) -> RetargetingRecap {
        let roas = ratio(actuals.revenue, actuals.spend);
        debug!(
            spend = actuals.spend,
            revenue = actuals.revenue,
            roas,
            "Retargeting recap computed"
        );
        RetargetingRecap {
            spend: actuals.spend,
            revenue: actuals.revenue,
            roas,
            stages: StageVolume::chain([
                ("Impressions", actuals.impressions as f64),
                ("Clicks", actuals.clicks as f64),
                ("Conversions", actuals.conversions as f64),
            ]),
        }
    }

    /// Echo the candidates as a comparison table with normalized budget
    /// shares. No forecasting is done here.
    pub fn compare(&self, candidates: &[StrategyCandidate]) -> StrategyComparison {
        let total_raw_share: f64 = candidates.iter().map(|c| c.budget_share).sum();
        let rows: Vec<StrategyRow> = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| StrategyRow {
                label: format!("Strategy {}", i + 1),
                candidate: c.clone(),
                normalized_share: ratio(c.budget_share, total_raw_share) * 100.0,
            })
            .collect();
        let distribution = rows.iter().map(|r| r.normalized_share).collect();

        StrategyComparison {
            rows,
            distribution,
            total_raw_share,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn candidate(channel: &str, share: f64) -> StrategyCandidate {
        StrategyCandidate {
            audience_segment: "Cart abandoners".to_string(),
            channel: channel.to_string(),
            cadence: "3x weekly".to_string(),
            duration_weeks: 4,
            budget_share: share,
            message_style: "Urgency".to_string(),
        }
    }

    #[test]
    fn test_recap_roas_and_stages() {
        let recap = RetargetingRecapEstimator::new().recap(&RecapActuals {
            impressions: 200_000,
            clicks: 4_000,
            conversions: 200,
            spend: 5_000.0,
            revenue: 20_000.0,
        });
        assert!((recap.roas - 4.0).abs() < EPS);
        assert_eq!(recap.stages.len(), 3);
        assert!((recap.stages[1].percent_of_previous - 2.0).abs() < EPS);
        assert!((recap.stages[2].percent_of_previous - 5.0).abs() < EPS);
    }

    #[test]
    fn test_recap_zero_spend() {
        let recap = RetargetingRecapEstimator::new().recap(&RecapActuals {
            impressions: 0,
            clicks: 0,
            conversions: 0,
            spend: 0.0,
            revenue: 100.0,
        });
        assert_eq!(recap.roas, 0.0);
        assert!(recap.stages.iter().all(|s| s.percent_of_previous == 0.0));
    }

    #[test]
    fn test_compare_normalizes_shares() {
        let cmp = RetargetingRecapEstimator::new().compare(&[
            candidate("Meta", 3.0),
            candidate("Google", 1.0),
        ]);
        assert_eq!(cmp.rows.len(), 2);
        assert_eq!(cmp.rows[0].label, "Strategy 1");
        assert_eq!(cmp.rows[1].candidate.channel, "Google");
        assert!((cmp.distribution[0] - 75.0).abs() < EPS);
        assert!((cmp.distribution[1] - 25.0).abs() < EPS);
        assert!((cmp.total_raw_share - 4.0).abs() < EPS);
    }

    #[test]
    fn test_compare_all_zero_shares() {
        let cmp = RetargetingRecapEstimator::new().compare(&[
            candidate("Meta", 0.0),
            candidate("TikTok", 0.0),
        ]);
        assert_eq!(cmp.distribution, vec![0.0, 0.0]);
    }

    #[test]
    fn test_compare_empty() {
        let cmp = RetargetingRecapEstimator::new().compare(&[]);
        assert!(cmp.rows.is_empty());
        assert!(cmp.distribution.is_empty());
    }

    #[test]
    fn test_row_serializes_flat() {
        let cmp = RetargetingRecapEstimator::new().compare(&[candidate("Meta", 1.0)]);
        let json = serde_json::to_value(&cmp.rows[0]).unwrap();
        assert_eq!(json["channel"], "Meta");
        assert_eq!(json["normalized_share"], 100.0);
    }
}
