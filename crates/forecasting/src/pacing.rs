//! Spend pacing — spreads a campaign budget over its duration and forecasts
//! results per period.

use campaign_core::{ratio, CampaignError, CampaignResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Weighting rule for distributing a fixed budget across periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingStrategy {
    #[default]
    Flat,
    /// Heaviest spend in the first period, tapering to the last.
    FrontLoaded,
    /// Lightest spend first, ramping up to the last period.
    BackLoaded,
}

impl PacingStrategy {
    /// Per-period weights, in period order. They are normalized before use,
    /// so only their shape matters.
    pub fn weights(&self, periods: u32) -> Vec<f64> {
        match self {
            PacingStrategy::Flat => vec![1.0; periods as usize],
            PacingStrategy::FrontLoaded => (1..=periods).rev().map(f64::from).collect(),
            PacingStrategy::BackLoaded => (1..=periods).map(f64::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingRequest {
    pub periods: u32,
    pub total_budget: f64,
    #[serde(default)]
    pub strategy: PacingStrategy,
    pub cost_per_result: f64,
    /// Name of the result being bought, e.g. "Leads".
    pub kpi_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingPeriod {
    /// 1-based.
    pub index: u32,
    pub label: String,
    pub planned_spend: f64,
    pub forecasted_results: f64,
    pub cumulative_spend: f64,
    pub cumulative_results: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingPlan {
    pub strategy: PacingStrategy,
    pub kpi_label: String,
    pub periods: Vec<PacingPeriod>,
    pub total_spend: f64,
    pub total_results: f64,
}

pub struct PacingScheduler {
    period_label: String,
}

impl PacingScheduler {
    pub fn new(period_label: impl Into<String>) -> Self {
        Self {
            period_label: period_label.into(),
        }
    }

    pub fn schedule(&self, req: &PacingRequest) -> CampaignResult<PacingPlan> {
        if req.periods == 0 {
            return Err(CampaignError::InvalidInput {
                field: "periods",
                reason: "campaign must run for at least one period".to_string(),
            });
        }

        let weights = req.strategy.weights(req.periods);
        let total_weight: f64 = weights.iter().sum();

        let mut cumulative_spend = 0.0;
        let mut cumulative_results = 0.0;
        let periods: Vec<PacingPeriod> = weights
            .iter()
            .zip(1..)
            .map(|(w, index)| {
                let planned_spend = w / total_weight * req.total_budget;
                let forecasted_results = ratio(planned_spend, req.cost_per_result);
                cumulative_spend += planned_spend;
                cumulative_results += forecasted_results;
                PacingPeriod {
                    index,
                    label: format!("{} {}", self.period_label, index),
                    planned_spend,
                    forecasted_results,
                    cumulative_spend,
                    cumulative_results,
                }
            })
            .collect();

        debug!(
            strategy = ?req.strategy,
            periods = req.periods,
            total_spend = cumulative_spend,
            total_results = cumulative_results,
            "Pacing plan computed"
        );

        Ok(PacingPlan {
            strategy: req.strategy,
            kpi_label: req.kpi_label.clone(),
            periods,
            total_spend: cumulative_spend,
            total_results: cumulative_results,
        })
    }
}

impl Default for PacingScheduler {
    fn default() -> Self {
        Self::new("Week")
    }
}
