//! CRM re-engagement ROI — works dormant leads through a
//! contact → book → show → close funnel and weighs the closed revenue
//! against recurring technology, team and add-on costs.

use campaign_core::{ratio, StageVolume};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const STAGE_NAMES: [&str; 5] = ["Pool", "Contacted", "Booked", "Showed", "Closed"];
const MONTHS_PER_YEAR: i32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Period the revenue and cost figures are expressed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeView {
    #[default]
    Monthly,
    Annualized,
}

impl TimeView {
    pub fn multiplier(&self) -> f64 {
        match self {
            TimeView::Monthly => 1.0,
            TimeView::Annualized => MONTHS_PER_YEAR as f64,
        }
    }
}

/// How much of the modeled return is realized (monthly view) or reinvested
/// each month (annualized view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReinvestmentTier {
    Light,
    Moderate,
    Aggressive,
}

impl ReinvestmentTier {
    pub const ALL: [ReinvestmentTier; 3] = [
        ReinvestmentTier::Light,
        ReinvestmentTier::Moderate,
        ReinvestmentTier::Aggressive,
    ];

    pub fn factor(&self) -> f64 {
        match self {
            ReinvestmentTier::Light => 0.25,
            ReinvestmentTier::Moderate => 0.5,
            ReinvestmentTier::Aggressive => 1.0,
        }
    }
}

/// A named recurring monthly cost on top of technology and team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub name: String,
    pub monthly_cost: f64,
}

/// Recurring monthly cost of running the re-engagement program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    pub technology_monthly: f64,
    pub staff_count: u32,
    /// Monthly salary per staff member.
    pub salary_monthly: f64,
    #[serde(default)]
    pub add_ons: Vec<CostItem>,
}

impl CostModel {
    fn team_monthly(&self) -> f64 {
        f64::from(self.staff_count) * self.salary_monthly
    }

    fn add_ons_monthly(&self) -> f64 {
        self.add_ons.iter().map(|a| a.monthly_cost).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReengagementAssumptions {
    pub total_leads: u64,
    pub active_leads: u64,
    pub contact_rate: f64,
    pub book_rate: f64,
    pub show_rate: f64,
    pub close_rate: f64,
    /// Revenue per closed deal.
    pub deal_value: f64,
    pub costs: CostModel,
    #[serde(default)]
    pub view: TimeView,
}

/// Cost buckets, already scaled to the selected time view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub technology: f64,
    pub team: f64,
    pub add_ons: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReengagementWarning {
    /// More active leads than total leads; the negative pool was carried
    /// through the funnel as entered.
    NegativeLeadPool { total_leads: u64, active_leads: u64 },
}

/// Share of the monthly return realized at one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierProjection {
    pub tier: ReinvestmentTier,
    pub roi_percent: f64,
    pub net_profit: f64,
}

/// Year-end return from compounding a tier-scaled monthly return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundProjection {
    pub tier: ReinvestmentTier,
    pub monthly_roi_fraction: f64,
    pub compound_roi_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Projection {
    Realization { tiers: Vec<TierProjection> },
    Compounding { tiers: Vec<CompoundProjection> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReengagementForecast {
    pub view: TimeView,
    pub pool: f64,
    pub contacted: f64,
    pub booked: f64,
    pub showed: f64,
    pub closed: f64,
    pub stages: Vec<StageVolume>,
    pub revenue: f64,
    pub costs: CostBreakdown,
    pub net_profit: f64,
    /// `net_profit / costs.total * 100` (0.0 when there is no cost).
    pub roi_percent: f64,
    pub projection: Projection,
    pub warnings: Vec<ReengagementWarning>,
}

// ---------------------------------------------------------------------------
// Compounding
// ---------------------------------------------------------------------------

/// `((1 + f * tier)^12 - 1) * 100`, or 0.0 when the scaled monthly return is
/// -100% or worse.
pub fn compound_roi_percent(monthly_roi_fraction: f64, tier: ReinvestmentTier) -> f64 {
    let scaled = monthly_roi_fraction * tier.factor();
    if scaled <= -1.0 {
        return 0.0;
    }
    ((1.0 + scaled).powi(MONTHS_PER_YEAR) - 1.0) * 100.0
}

// ---------------------------------------------------------------------------
// ReengagementFunnelCalculator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct ReengagementFunnelCalculator;

impl ReengagementFunnelCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn forecast(&self, a: &ReengagementAssumptions) -> ReengagementForecast {
        let mut warnings = Vec::new();
        let pool = a.total_leads as f64 - a.active_leads as f64;
        if pool < 0.0 {
            warn!(
                total_leads = a.total_leads,
                active_leads = a.active_leads,
                "Active leads exceed total leads; re-engagement pool is negative"
            );
            warnings.push(ReengagementWarning::NegativeLeadPool {
                total_leads: a.total_leads,
                active_leads: a.active_leads,
            });
        }

        let contacted = pool * a.contact_rate / 100.0;
        let booked = contacted * a.book_rate / 100.0;
        let showed = booked * a.show_rate / 100.0;
        let closed = showed * a.close_rate / 100.0;

        let m = a.view.multiplier();
        let revenue = closed * a.deal_value * m;
        let technology = a.costs.technology_monthly * m;
        let team = a.costs.team_monthly() * m;
        let add_ons = a.costs.add_ons_monthly() * m;
        let total_cost = technology + team + add_ons;

        let net_profit = revenue - total_cost;
        let roi_fraction = ratio(net_profit, total_cost);

        let projection = match a.view {
            TimeView::Monthly => Projection::Realization {
                tiers: ReinvestmentTier::ALL
                    .iter()
                    .map(|&tier| TierProjection {
                        tier,
                        roi_percent: roi_fraction * tier.factor() * 100.0,
                        net_profit: net_profit * tier.factor(),
                    })
                    .collect(),
            },
            TimeView::Annualized => {
                let monthly = roi_fraction / MONTHS_PER_YEAR as f64;
                Projection::Compounding {
                    tiers: ReinvestmentTier::ALL
                        .iter()
                        .map(|&tier| CompoundProjection {
                            tier,
                            monthly_roi_fraction: monthly * tier.factor(),
                            compound_roi_percent: compound_roi_percent(monthly, tier),
                        })
                        .collect(),
                }
            }
        };

        debug!(
            view = ?a.view,
            closed,
            revenue,
            total_cost,
            net_profit,
            "Re-engagement forecast computed"
        );

        ReengagementForecast {
            view: a.view,
            pool,
            contacted,
            booked,
            showed,
            closed,
            stages: StageVolume::chain(
                STAGE_NAMES
                    .into_iter()
                    .zip([pool, contacted, booked, showed, closed]),
            ),
            revenue,
            costs: CostBreakdown {
                technology,
                team,
                add_ons,
                total: total_cost,
            },
            net_profit,
            roi_percent: roi_fraction * 100.0,
            projection,
            warnings,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
