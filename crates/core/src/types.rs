use serde::{Deserialize, Serialize};

/// The five ad platforms the planner ships default costs for.
pub const STOCK_CHANNELS: [&str; 5] = ["Meta", "Google", "LinkedIn", "YouTube", "TikTok"];

/// `numerator / denominator`, or 0.0 when the denominator is zero.
///
/// Every forecast ratio goes through here so the engine stays total over its
/// numeric domain.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Campaign objective a channel's cost-per-result is quoted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiGoal {
    Clicks,
    Leads,
    Sales,
    /// Cost is quoted per 1000 impressions (CPM).
    Impressions,
}

impl KpiGoal {
    pub const ALL: [KpiGoal; 4] = [
        KpiGoal::Clicks,
        KpiGoal::Leads,
        KpiGoal::Sales,
        KpiGoal::Impressions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            KpiGoal::Clicks => "Clicks",
            KpiGoal::Leads => "Leads",
            KpiGoal::Sales => "Sales",
            KpiGoal::Impressions => "Impressions",
        }
    }

    /// Results bought per unit of quoted cost.
    pub fn results_per_cost_unit(&self) -> f64 {
        match self {
            KpiGoal::Impressions => 1000.0,
            _ => 1.0,
        }
    }

    /// Stock cost-per-result for one of [`STOCK_CHANNELS`].
    pub fn default_cost_per_result(&self, channel: &str) -> Option<f64> {
        let idx = STOCK_CHANNELS.iter().position(|c| *c == channel)?;
        let table: [f64; 5] = match self {
            KpiGoal::Clicks => [2.5, 3.0, 4.0, 2.8, 2.0],
            KpiGoal::Leads => [30.0, 40.0, 80.0, 35.0, 25.0],
            KpiGoal::Sales => [100.0, 120.0, 200.0, 110.0, 90.0],
            KpiGoal::Impressions => [6.0, 7.0, 9.0, 5.0, 4.0],
        };
        Some(table[idx])
    }

    /// Suggested value of one result when estimating revenue. Only leads and
    /// sales carry a monetary value by default.
    pub fn default_value_per_result(&self) -> Option<f64> {
        match self {
            KpiGoal::Sales => Some(250.0),
            KpiGoal::Leads => Some(50.0),
            KpiGoal::Clicks | KpiGoal::Impressions => None,
        }
    }
}

impl std::fmt::Display for KpiGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for KpiGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clicks" => Ok(KpiGoal::Clicks),
            "leads" => Ok(KpiGoal::Leads),
            "sales" => Ok(KpiGoal::Sales),
            "impressions" => Ok(KpiGoal::Impressions),
            other => Err(format!("unknown KPI goal '{other}'")),
        }
    }
}

/// One stage of a forecast funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageVolume {
    pub name: String,
    pub volume: f64,
    /// `volume / previous.volume * 100`; 0.0 for the first stage.
    pub percent_of_previous: f64,
}

impl StageVolume {
    /// Build an ordered stage list, filling in the step-to-step percentages.
    pub fn chain<'a, I>(stages: I) -> Vec<StageVolume>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut out: Vec<StageVolume> = Vec::new();
        for (name, volume) in stages {
            let percent_of_previous = match out.last() {
                Some(prev) => ratio(volume, prev.volume) * 100.0,
                None => 0.0,
            };
            out.push(StageVolume {
                name: name.to_string(),
                volume,
                percent_of_previous,
            });
        }
        out
    }
}
