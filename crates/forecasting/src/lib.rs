//! Campaign forecasting engine — funnel forecasts, multi-channel budget
//! allocation, spend pacing, CRM re-engagement ROI, and retargeting recaps.
//!
//! Every calculator is a pure function of its inputs: no I/O, no shared
//! state, identical inputs give identical outputs.

pub mod allocation;
pub mod benchmark;
pub mod funnel;
pub mod pacing;
pub mod reengagement;
pub mod report;
pub mod retargeting;

pub use allocation::{
    AllocationPlan, AllocationRequest, ChannelForecast, ChannelPlan, MultiChannelAllocator, RoiMode,
};
pub use benchmark::{BenchmarkTable, IndustryBenchmark, ReferenceBenchmarks};
pub use funnel::{FunnelAssumptions, FunnelForecast, FunnelForecastCalculator, QualificationPolicy};
pub use pacing::{PacingPlan, PacingRequest, PacingScheduler, PacingStrategy};
pub use reengagement::{
    CostItem, CostModel, ReengagementAssumptions, ReengagementForecast,
    ReengagementFunnelCalculator, ReinvestmentTier, TimeView,
};
pub use report::{ForecastKind, ForecastReport};
pub use retargeting::{
    RecapActuals, RetargetingRecap, RetargetingRecapEstimator, StrategyCandidate,
    StrategyComparison,
};
