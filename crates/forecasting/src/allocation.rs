//! Multi-channel budget planner — splits one budget across ad platforms by
//! percentage and forecasts the campaign KPI, revenue and ROI per channel.

use std::collections::HashSet;

use campaign_core::types::STOCK_CHANNELS;
use campaign_core::{ratio, CampaignError, CampaignResult, KpiGoal};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Whether revenue and ROI are estimated for each channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiMode {
    #[default]
    Disabled,
    /// Estimate for every channel that carries a value-per-result.
    Enabled,
}

/// One channel's share of the budget and its quoted cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPlan {
    pub name: String,
    /// Share of the total budget, 0–100.
    pub allocation_percent: f64,
    /// Cost per result for the active goal (per 1000 for impressions).
    pub cost_per_result: f64,
    /// Monetary value of one result (order value, lead value).
    #[serde(default)]
    pub value_per_result: Option<f64>,
}

impl ChannelPlan {
    pub fn new(name: impl Into<String>, allocation_percent: f64, cost_per_result: f64) -> Self {
        Self {
            name: name.into(),
            allocation_percent,
            cost_per_result,
            value_per_result: None,
        }
    }

    pub fn with_value(mut self, value_per_result: f64) -> Self {
        self.value_per_result = Some(value_per_result);
        self
    }

    /// The five stock platforms at an even 20% split with their default
    /// costs for `goal` and the goal's default result value, if any.
    pub fn stock_channels(goal: KpiGoal) -> Vec<ChannelPlan> {
        STOCK_CHANNELS
            .iter()
            .map(|name| ChannelPlan {
                name: name.to_string(),
                allocation_percent: 100.0 / STOCK_CHANNELS.len() as f64,
                cost_per_result: goal.default_cost_per_result(name).unwrap_or_default(),
                value_per_result: goal.default_value_per_result(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub total_budget: f64,
    pub goal: KpiGoal,
    pub channels: Vec<ChannelPlan>,
    #[serde(default)]
    pub roi: RoiMode,
}

/// Forecast row for one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelForecast {
    pub channel: String,
    pub allocation_percent: f64,
    pub budget: f64,
    /// Cost per result as quoted in the plan.
    pub quoted_cost: f64,
    pub forecast: f64,
    /// `budget / forecast` (0.0 when nothing is forecast).
    pub cost_per_result: f64,
    /// Cost per result at which the channel's revenue equals its spend.
    pub break_even_cpr: Option<f64>,
    pub revenue: Option<f64>,
    pub roi_percent: Option<f64>,
    pub negative_roi: bool,
    /// Set when the channel pays more per result than a result is worth.
    pub above_break_even: bool,
}

/// Result of a validated allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub goal: KpiGoal,
    pub total_budget: f64,
    pub channels: Vec<ChannelForecast>,
    pub total_forecast: f64,
    pub total_revenue: f64,
    /// Mean ROI over channels where ROI was computed (0.0 when none).
    pub average_roi: f64,
    pub roi_channel_count: usize,
}

// ---------------------------------------------------------------------------
// MultiChannelAllocator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MultiChannelAllocator {
    tolerance: f64,
}

impl MultiChannelAllocator {
    /// `tolerance` is the absolute slack allowed around a 100% total.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Check that channel names are unique, every share lies in 0–100 and the
    /// split totals 100%.
    pub fn validate(&self, channels: &[ChannelPlan]) -> CampaignResult<()> {
        let mut seen = HashSet::new();
        for ch in channels {
            if !seen.insert(ch.name.as_str()) {
                return Err(CampaignError::DuplicateChannel(ch.name.clone()));
            }
        }

        let total: f64 = channels.iter().map(|c| c.allocation_percent).sum();
        if !total.is_finite() || (total - 100.0).abs() > self.tolerance {
            warn!(total, "Channel allocations do not add up to 100%");
            return Err(CampaignError::InvalidAllocation { total });
        }

        if let Some(ch) = channels
            .iter()
            .find(|c| !(0.0..=100.0).contains(&c.allocation_percent))
        {
            return Err(CampaignError::InvalidInput {
                field: "allocation_percent",
                reason: format!(
                    "channel '{}' has share {}, expected 0-100",
                    ch.name, ch.allocation_percent
                ),
            });
        }
        Ok(())
    }

    /// Validate the split, then forecast every channel. Nothing is computed
    /// for an invalid split.
    pub fn allocate(&self, req: &AllocationRequest) -> CampaignResult<AllocationPlan> {
        self.validate(&req.channels)?;

        let channels: Vec<ChannelForecast> = req
            .channels
            .iter()
            .map(|ch| Self::forecast_channel(ch, req.total_budget, req.goal, req.roi))
            .collect();

        let total_forecast: f64 = channels.iter().map(|c| c.forecast).sum();
        let total_revenue: f64 = channels.iter().filter_map(|c| c.revenue).sum();
        let rois: Vec<f64> = channels.iter().filter_map(|c| c.roi_percent).collect();
        let average_roi = ratio(rois.iter().sum(), rois.len() as f64);

        debug!(
            goal = %req.goal,
            channels = channels.len(),
            total_forecast,
            total_revenue,
            "Allocation forecast computed"
        );

        Ok(AllocationPlan {
            goal: req.goal,
            total_budget: req.total_budget,
            channels,
            total_forecast,
            total_revenue,
            average_roi,
            roi_channel_count: rois.len(),
        })
    }

    fn forecast_channel(
        ch: &ChannelPlan,
        total_budget: f64,
        goal: KpiGoal,
        roi: RoiMode,
    ) -> ChannelForecast {
        let budget = ch.allocation_percent / 100.0 * total_budget;
        let forecast = ratio(budget, ch.cost_per_result) * goal.results_per_cost_unit();
        let cost_per_result = ratio(budget, forecast);

        let value = match roi {
            RoiMode::Enabled => ch.value_per_result,
            RoiMode::Disabled => None,
        };

        let mut row = ChannelForecast {
            channel: ch.name.clone(),
            allocation_percent: ch.allocation_percent,
            budget,
            quoted_cost: ch.cost_per_result,
            forecast,
            cost_per_result,
            break_even_cpr: None,
            revenue: None,
            roi_percent: None,
            negative_roi: false,
            above_break_even: false,
        };

        if let Some(value) = value {
            let revenue = forecast * value;
            let roi_percent = ratio(revenue - budget, budget) * 100.0;
            row.break_even_cpr = Some(value);
            row.revenue = Some(revenue);
            row.roi_percent = Some(roi_percent);
            row.negative_roi = roi_percent < 0.0;
            row.above_break_even = cost_per_result > value;
            if row.negative_roi {
                warn!(channel = %ch.name, roi_percent, "Channel forecast has negative ROI");
            }
        }

        row
    }
}

impl Default for MultiChannelAllocator {
    fn default() -> Self {
        Self::new(1e-6)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
