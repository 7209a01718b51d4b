//! Industry benchmark profiles and the reference figures a funnel forecast
//! is compared against.

use campaign_core::config::BenchmarkConfig;
use campaign_core::{CampaignError, CampaignResult};
use serde::{Deserialize, Serialize};

/// Typical webinar-funnel conversion rates and click cost for one industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmark {
    pub name: String,
    pub landing_cr: f64,
    pub attendance_rate: f64,
    pub lead_rate: f64,
    pub sales_rate: f64,
    pub cpc: f64,
}

impl IndustryBenchmark {
    fn new(name: &str, rates: [f64; 4], cpc: f64) -> Self {
        Self {
            name: name.to_string(),
            landing_cr: rates[0],
            attendance_rate: rates[1],
            lead_rate: rates[2],
            sales_rate: rates[3],
            cpc,
        }
    }

    /// Stage rates in funnel order.
    pub fn rates(&self) -> [f64; 4] {
        [self.landing_cr, self.attendance_rate, self.lead_rate, self.sales_rate]
    }
}

/// Read-only lookup of industry profiles, keyed by label.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkTable {
    profiles: Vec<IndustryBenchmark>,
}

impl BenchmarkTable {
    pub fn builtin() -> Self {
        Self {
            profiles: vec![
                IndustryBenchmark::new("SaaS", [25.0, 50.0, 30.0, 15.0], 3.5),
                IndustryBenchmark::new("Education", [20.0, 40.0, 25.0, 8.0], 2.75),
                IndustryBenchmark::new("Healthcare", [15.0, 35.0, 20.0, 10.0], 4.25),
                IndustryBenchmark::new("Consulting", [30.0, 60.0, 35.0, 25.0], 3.0),
            ],
        }
    }

    /// Case-insensitive lookup by industry label.
    pub fn get(&self, name: &str) -> CampaignResult<&IndustryBenchmark> {
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CampaignError::UnknownBenchmark(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn profiles(&self) -> &[IndustryBenchmark] {
        &self.profiles
    }
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Generic targets shown next to a forecast: stage rates plus ROAS,
/// cost-per-lead and profit margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceBenchmarks {
    pub landing_cr: f64,
    pub attendance_rate: f64,
    pub lead_rate: f64,
    pub sales_rate: f64,
    pub roas: f64,
    pub cost_per_lead: f64,
    pub profit_margin: f64,
}

impl ReferenceBenchmarks {
    pub fn rates(&self) -> [f64; 4] {
        [self.landing_cr, self.attendance_rate, self.lead_rate, self.sales_rate]
    }
}

impl From<&BenchmarkConfig> for ReferenceBenchmarks {
    fn from(cfg: &BenchmarkConfig) -> Self {
        Self {
            landing_cr: cfg.landing_cr,
            attendance_rate: cfg.attendance_rate,
            lead_rate: cfg.lead_rate,
            sales_rate: cfg.sales_rate,
            roas: cfg.roas,
            cost_per_lead: cfg.cost_per_lead,
            profit_margin: cfg.profit_margin,
        }
    }
}

impl Default for ReferenceBenchmarks {
    fn default() -> Self {
        Self::from(&BenchmarkConfig::default())
    }
}
