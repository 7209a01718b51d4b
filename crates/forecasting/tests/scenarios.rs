//! End-to-end scenarios: JSON inputs as a host would send them, through a
//! calculator, out to the report envelope.

use campaign_core::config::AppConfig;
use campaign_core::KpiGoal;
use campaign_forecasting::allocation::AllocationRequest;
use campaign_forecasting::reengagement::Projection;
use campaign_forecasting::{
    BenchmarkTable, ChannelPlan, ForecastKind, ForecastReport, FunnelAssumptions,
    FunnelForecastCalculator, MultiChannelAllocator, ReengagementAssumptions,
    ReengagementFunnelCalculator, ReferenceBenchmarks, RetargetingRecapEstimator,
    StrategyCandidate,
};

const EPS: f64 = 1e-9;

#[test]
fn test_selected_benchmark_fills_funnel_defaults() {
    let mut cfg = AppConfig::default();
    cfg.benchmarks.selected = Some("Education".to_string());

    let table = BenchmarkTable::builtin();
    let selected = cfg
        .benchmarks
        .selected
        .as_deref()
        .map(|name| table.get(name))
        .transpose()
        .unwrap();
    let assumptions = selected
        .map(FunnelAssumptions::from_benchmark)
        .unwrap_or_default();

    let calc = FunnelForecastCalculator::new(ReferenceBenchmarks::from(&cfg.benchmarks));
    let f = calc.forecast(&assumptions);

    // 1000 / 2.75 clicks, then 20% / 40% / 25% / 8%
    let clicks = 1000.0 / 2.75;
    assert!((f.clicks - clicks).abs() < EPS);
    assert!((f.sales - clicks * 0.20 * 0.40 * 0.25 * 0.08).abs() < 1e-6);
    assert_eq!(f.benchmark.rates[3].yours, 8.0);
}

#[test]
fn test_allocation_request_from_json() {
    let json = r#"{
        "total_budget": 10000,
        "goal": "leads",
        "roi": "enabled",
        "channels": [
            {"name": "Meta",     "allocation_percent": 40, "cost_per_result": 30, "value_per_result": 50},
            {"name": "Google",   "allocation_percent": 35, "cost_per_result": 40, "value_per_result": 50},
            {"name": "LinkedIn", "allocation_percent": 25, "cost_per_result": 80}
        ]
    }"#;
    let req: AllocationRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.goal, KpiGoal::Leads);

    let plan = MultiChannelAllocator::default().allocate(&req).unwrap();
    assert_eq!(plan.roi_channel_count, 2);
    let linkedin = &plan.channels[2];
    assert!(linkedin.roi_percent.is_none());
    assert!((linkedin.forecast - 31.25).abs() < EPS);

    let report = ForecastReport::new(ForecastKind::ChannelAllocation, plan);
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["result"]["goal"], "leads");
    assert_eq!(value["result"]["channels"][0]["channel"], "Meta");
}

#[test]
fn test_stock_channels_for_sales_carry_order_value() {
    let channels = ChannelPlan::stock_channels(KpiGoal::Sales);
    assert!(channels.iter().all(|c| c.value_per_result == Some(250.0)));
    let plan = MultiChannelAllocator::default()
        .allocate(&AllocationRequest {
            total_budget: 5000.0,
            goal: KpiGoal::Sales,
            channels,
            roi: campaign_forecasting::RoiMode::Enabled,
        })
        .unwrap();
    // LinkedIn: 1000 / 200 = 5 sales * 250 = 1250 revenue, +25% ROI
    let linkedin = plan.channels.iter().find(|c| c.channel == "LinkedIn").unwrap();
    assert!((linkedin.roi_percent.unwrap() - 25.0).abs() < EPS);
    assert_eq!(plan.roi_channel_count, 5);
}

#[test]
fn test_reengagement_from_json_annualized() {
    let json = r#"{
        "total_leads": 5000,
        "active_leads": 1000,
        "contact_rate": 60,
        "book_rate": 25,
        "show_rate": 70,
        "close_rate": 30,
        "deal_value": 1500,
        "costs": {
            "technology_monthly": 300,
            "staff_count": 1,
            "salary_monthly": 5000,
            "add_ons": [{"name": "sms credits", "monthly_cost": 200}]
        },
        "view": "annualized"
    }"#;
    let a: ReengagementAssumptions = serde_json::from_str(json).unwrap();
    let f = ReengagementFunnelCalculator::new().forecast(&a);

    let closed = 4000.0 * 0.6 * 0.25 * 0.7 * 0.3;
    assert!((f.closed - closed).abs() < 1e-6);
    assert!((f.costs.total - 5500.0 * 12.0).abs() < EPS);
    assert!((f.costs.add_ons - 2400.0).abs() < EPS);

    let value = serde_json::to_value(&f).unwrap();
    assert_eq!(value["projection"]["view"], "compounding");
    let Projection::Compounding { tiers } = f.projection else {
        panic!("annualized view should compound");
    };
    assert!(tiers[0].compound_roi_percent < tiers[2].compound_roi_percent);
}

#[test]
fn test_strategy_comparison_from_json() {
    let json = r#"[
        {"audience_segment": "Site visitors", "channel": "Meta", "cadence": "daily",
         "duration_weeks": 2, "budget_share": 60, "message_style": "Social proof"},
        {"audience_segment": "Cart abandoners", "channel": "Google", "cadence": "every 3 days",
         "duration_weeks": 4, "budget_share": 20, "message_style": "Discount"}
    ]"#;
    let candidates: Vec<StrategyCandidate> = serde_json::from_str(json).unwrap();
    let cmp = RetargetingRecapEstimator::new().compare(&candidates);
    assert!((cmp.distribution[0] - 75.0).abs() < EPS);
    assert!((cmp.distribution.iter().sum::<f64>() - 100.0).abs() < EPS);
    assert_eq!(cmp.rows[1].candidate.message_style, "Discount");
}
