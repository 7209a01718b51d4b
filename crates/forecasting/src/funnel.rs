//! Webinar funnel forecast — ad spend to clicks, signups, attendees,
//! qualified leads and sales, with unit economics and profit.

use campaign_core::{ratio, StageVolume};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::benchmark::{IndustryBenchmark, ReferenceBenchmarks};

const STAGE_NAMES: [&str; 5] = ["Clicks", "Signups", "Attendees", "Qualified Leads", "Sales"];
const RATE_NAMES: [&str; 4] = ["Landing Page CR", "Attendance Rate", "Lead Rate", "Sales Rate"];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How attendees become qualified leads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationPolicy {
    /// Apply the attendee-to-lead rate.
    #[default]
    Apply,
    /// Every attendee counts as a qualified lead (rate reported as 100%).
    TreatAllAsQualified,
}

/// Inputs to a single funnel forecast. Rates are percentages in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelAssumptions {
    pub budget: f64,
    pub cpc: f64,
    pub landing_cr: f64,
    pub attendance_rate: f64,
    pub lead_rate: f64,
    pub sales_rate: f64,
    #[serde(default)]
    pub qualification: QualificationPolicy,
    pub avg_deal_value: f64,
    pub cogs_per_sale: f64,
}

impl Default for FunnelAssumptions {
    fn default() -> Self {
        Self {
            budget: 1000.0,
            cpc: 1.5,
            landing_cr: 25.0,
            attendance_rate: 40.0,
            lead_rate: 25.0,
            sales_rate: 15.0,
            qualification: QualificationPolicy::Apply,
            avg_deal_value: 500.0,
            cogs_per_sale: 100.0,
        }
    }
}

impl FunnelAssumptions {
    /// Defaults with click cost and stage rates taken from an industry profile.
    pub fn from_benchmark(benchmark: &IndustryBenchmark) -> Self {
        Self {
            cpc: benchmark.cpc,
            landing_cr: benchmark.landing_cr,
            attendance_rate: benchmark.attendance_rate,
            lead_rate: benchmark.lead_rate,
            sales_rate: benchmark.sales_rate,
            ..Self::default()
        }
    }

    /// Attendee-to-lead rate actually applied.
    pub fn effective_lead_rate(&self) -> f64 {
        match self.qualification {
            QualificationPolicy::Apply => self.lead_rate,
            QualificationPolicy::TreatAllAsQualified => 100.0,
        }
    }

    /// Stage rates in funnel order, as reported for benchmark comparison.
    pub fn reported_rates(&self) -> [f64; 4] {
        [
            self.landing_cr,
            self.attendance_rate,
            self.effective_lead_rate(),
            self.sales_rate,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateComparison {
    pub stage: String,
    pub yours: f64,
    pub benchmark: f64,
    /// `yours - benchmark`, in percentage points.
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub yours: f64,
    pub benchmark: f64,
    pub delta: f64,
}

impl MetricComparison {
    fn new(yours: f64, benchmark: f64) -> Self {
        Self {
            yours,
            benchmark,
            delta: yours - benchmark,
        }
    }
}

/// Forecast figures set against the reference benchmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub rates: Vec<RateComparison>,
    pub roas: MetricComparison,
    pub cost_per_lead: MetricComparison,
    pub profit_margin: MetricComparison,
}

/// Full output of a funnel forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelForecast {
    pub clicks: f64,
    pub signups: f64,
    pub attendees: f64,
    pub qualified_leads: f64,
    pub sales: f64,
    pub revenue: f64,
    /// `revenue / budget` (0.0 when budget is zero).
    pub roas: f64,
    pub cost_per_attendee: f64,
    pub cost_per_lead: f64,
    pub total_cogs: f64,
    pub gross_profit: f64,
    pub net_profit: f64,
    /// `net_profit / revenue * 100` (0.0 when revenue is zero).
    pub profit_margin: f64,
    /// Funnel order: clicks, signups, attendees, qualified leads, sales.
    pub stages: Vec<StageVolume>,
    pub benchmark: BenchmarkComparison,
}

// ---------------------------------------------------------------------------
// FunnelForecastCalculator
// ---------------------------------------------------------------------------

/// Stateless funnel forecaster. The reference benchmarks are the only
/// configuration it carries and are fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct FunnelForecastCalculator {
    reference: ReferenceBenchmarks,
}

impl FunnelForecastCalculator {
    pub fn new(reference: ReferenceBenchmarks) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ReferenceBenchmarks {
        &self.reference
    }

    pub fn forecast(&self, a: &FunnelAssumptions) -> FunnelForecast {
        let clicks = ratio(a.budget, a.cpc);
        let signups = clicks * a.landing_cr / 100.0;
        let attendees = signups * a.attendance_rate / 100.0;
        let qualified_leads = attendees * a.effective_lead_rate() / 100.0;
        let sales = qualified_leads * a.sales_rate / 100.0;

        let revenue = sales * a.avg_deal_value;
        let roas = ratio(revenue, a.budget);
        let cost_per_attendee = ratio(a.budget, attendees);
        let cost_per_lead = ratio(a.budget, qualified_leads);
        let total_cogs = sales * a.cogs_per_sale;
        let gross_profit = revenue - total_cogs;
        let net_profit = gross_profit - a.budget;
        let profit_margin = ratio(net_profit, revenue) * 100.0;

        let stages = StageVolume::chain(
            STAGE_NAMES
                .into_iter()
                .zip([clicks, signups, attendees, qualified_leads, sales]),
        );

        let benchmark = self.compare(a, roas, cost_per_lead, profit_margin);

        debug!(
            budget = a.budget,
            sales,
            revenue,
            net_profit,
            roas,
            "Funnel forecast computed"
        );

        FunnelForecast {
            clicks,
            signups,
            attendees,
            qualified_leads,
            sales,
            revenue,
            roas,
            cost_per_attendee,
            cost_per_lead,
            total_cogs,
            gross_profit,
            net_profit,
            profit_margin,
            stages,
            benchmark,
        }
    }

    fn compare(
        &self,
        a: &FunnelAssumptions,
        roas: f64,
        cost_per_lead: f64,
        profit_margin: f64,
    ) -> BenchmarkComparison {
        let rates = RATE_NAMES
            .iter()
            .zip(a.reported_rates())
            .zip(self.reference.rates())
            .map(|((stage, yours), benchmark)| RateComparison {
                stage: stage.to_string(),
                yours,
                benchmark,
                delta: yours - benchmark,
            })
            .collect();

        BenchmarkComparison {
            rates,
            roas: MetricComparison::new(roas, self.reference.roas),
            cost_per_lead: MetricComparison::new(cost_per_lead, self.reference.cost_per_lead),
            profit_margin: MetricComparison::new(profit_margin, self.reference.profit_margin),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::BenchmarkTable;

    const EPS: f64 = 1e-9;

    fn reference_case() -> FunnelAssumptions {
        FunnelAssumptions {
            budget: 1000.0,
            cpc: 2.0,
            landing_cr: 25.0,
            attendance_rate: 50.0,
            lead_rate: 30.0,
            sales_rate: 20.0,
            qualification: QualificationPolicy::Apply,
            avg_deal_value: 500.0,
            cogs_per_sale: 100.0,
        }
    }

    #[test]
    fn test_stage_volumes() {
        let f = FunnelForecastCalculator::default().forecast(&reference_case());
        assert!((f.clicks - 500.0).abs() < EPS);
        assert!((f.signups - 125.0).abs() < EPS);
        assert!((f.attendees - 62.5).abs() < EPS);
        assert!((f.qualified_leads - 18.75).abs() < EPS);
        assert!((f.sales - 3.75).abs() < EPS);
    }

    #[test]
    fn test_financials() {
        let f = FunnelForecastCalculator::default().forecast(&reference_case());
        assert!((f.revenue - 1875.0).abs() < EPS);
        assert!((f.roas - 1.875).abs() < EPS);
        assert!((f.cost_per_attendee - 16.0).abs() < EPS);
        assert!((f.cost_per_lead - 1000.0 / 18.75).abs() < EPS);
        assert!((f.total_cogs - 375.0).abs() < EPS);
        assert!((f.gross_profit - 1500.0).abs() < EPS);
        assert!((f.net_profit - 500.0).abs() < EPS);
        assert!((f.profit_margin - 500.0 / 1875.0 * 100.0).abs() < EPS);
    }

    #[test]
    fn test_treat_all_attendees_as_qualified() {
        let mut a = reference_case();
        a.qualification = QualificationPolicy::TreatAllAsQualified;
        let f = FunnelForecastCalculator::default().forecast(&a);
        assert!((f.qualified_leads - f.attendees).abs() < EPS);
        assert!((f.sales - 12.5).abs() < EPS);
        assert_eq!(f.benchmark.rates[2].yours, 100.0);
        assert_eq!(f.stages[3].percent_of_previous, 100.0);
    }

    #[test]
    fn test_zero_budget_guards() {
        let mut a = reference_case();
        a.budget = 0.0;
        let f = FunnelForecastCalculator::default().forecast(&a);
        assert_eq!(f.roas, 0.0);
        assert_eq!(f.cost_per_attendee, 0.0);
        assert_eq!(f.cost_per_lead, 0.0);
        assert_eq!(f.profit_margin, 0.0);
        assert_eq!(f.net_profit, 0.0);
    }

    #[test]
    fn test_zero_cpc_yields_no_clicks() {
        let mut a = reference_case();
        a.cpc = 0.0;
        let f = FunnelForecastCalculator::default().forecast(&a);
        assert_eq!(f.clicks, 0.0);
        assert_eq!(f.sales, 0.0);
        assert!((f.net_profit + 1000.0).abs() < EPS);
    }

    #[test]
    fn test_stages_monotone_non_increasing() {
        let f = FunnelForecastCalculator::default().forecast(&reference_case());
        let names: Vec<&str> = f.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, STAGE_NAMES.to_vec());
        for pair in f.stages.windows(2) {
            assert!(pair[1].volume <= pair[0].volume);
        }
    }

    #[test]
    fn test_benchmark_comparison_deltas() {
        let f = FunnelForecastCalculator::default().forecast(&reference_case());
        let cmp = &f.benchmark;
        assert_eq!(cmp.rates.len(), 4);
        assert_eq!(cmp.rates[1].stage, "Attendance Rate");
        assert!((cmp.rates[1].delta - 10.0).abs() < EPS);
        assert!((cmp.roas.delta - (1.875 - 3.0)).abs() < EPS);
        assert_eq!(cmp.profit_margin.benchmark, 25.0);
    }

    #[test]
    fn test_default_assumptions_match_generic_benchmarks() {
        let a = FunnelAssumptions::default();
        assert_eq!(a.cpc, 1.5);
        assert_eq!(a.reported_rates(), [25.0, 40.0, 25.0, 15.0]);
        assert_eq!(a.qualification, QualificationPolicy::Apply);
    }

    #[test]
    fn test_assumptions_from_benchmark() {
        let table = BenchmarkTable::builtin();
        let a = FunnelAssumptions::from_benchmark(table.get("Consulting").unwrap());
        assert_eq!(a.cpc, 3.0);
        assert_eq!(a.reported_rates(), [30.0, 60.0, 35.0, 25.0]);
        assert_eq!(a.budget, 1000.0);
        assert_eq!(a.avg_deal_value, 500.0);
    }

    #[test]
    fn test_forecast_is_idempotent() {
        let calc = FunnelForecastCalculator::default();
        let a = reference_case();
        assert_eq!(calc.forecast(&a), calc.forecast(&a));
    }
}
