//! Report envelope handed to presentation and export collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastKind {
    Funnel,
    ChannelAllocation,
    Pacing,
    Reengagement,
    RetargetingRecap,
    StrategyComparison,
    Benchmarks,
}

/// A calculator result stamped with an id and generation time. Calculators
/// never stamp their own output; the host wraps it once per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport<T> {
    pub id: Uuid,
    pub kind: ForecastKind,
    pub generated_at: DateTime<Utc>,
    pub result: T,
}

impl<T: Serialize> ForecastReport<T> {
    pub fn new(kind: ForecastKind, result: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            generated_at: Utc::now(),
            result,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
