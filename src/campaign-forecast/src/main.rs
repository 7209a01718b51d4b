//! Campaign Forecast — command-line host for the campaign forecasting engine.
//!
//! Collects inputs from flags or JSON files, runs exactly one calculator and
//! prints the result as a JSON report on stdout. Logs go to stderr.

use anyhow::Context;
use campaign_core::config::AppConfig;
use campaign_core::{CampaignResult, KpiGoal};
use campaign_forecasting::{
    AllocationRequest, BenchmarkTable, ChannelPlan, ForecastKind, ForecastReport,
    FunnelAssumptions, FunnelForecastCalculator, MultiChannelAllocator, PacingRequest,
    PacingScheduler, PacingStrategy, QualificationPolicy, RecapActuals,
    ReengagementAssumptions, ReengagementFunnelCalculator, ReferenceBenchmarks,
    RetargetingRecapEstimator, RoiMode, StrategyCandidate,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "campaign-forecast")]
#[command(about = "Forecast campaign funnels, channel budgets, pacing and ROI")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (environment variables still apply)
    #[arg(long, env = "CAMPAIGN_FORECAST_CONFIG")]
    config: Option<String>,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Webinar funnel forecast with profit and benchmark comparison
    Funnel(FunnelArgs),

    /// Split a budget across channels and forecast the campaign KPI
    Allocate {
        /// Total campaign budget
        #[arg(long, default_value_t = 5000.0)]
        budget: f64,
        /// Campaign goal: clicks, leads, sales, impressions
        #[arg(long, default_value = "clicks")]
        goal: KpiGoal,
        /// JSON file with channel plans (default: five stock channels at 20%)
        #[arg(long)]
        channels: Option<String>,
        /// Estimate revenue and ROI per channel
        #[arg(long, default_value_t = false)]
        roi: bool,
    },

    /// Weekly spend and results schedule
    Pacing {
        /// Campaign duration in periods
        #[arg(long, default_value_t = 4)]
        periods: u32,
        /// Total campaign budget
        #[arg(long, default_value_t = 10_000.0)]
        budget: f64,
        #[arg(long, value_enum, default_value_t = StrategyArg::Flat)]
        strategy: StrategyArg,
        /// Estimated cost per result
        #[arg(long, default_value_t = 25.0)]
        cost_per_result: f64,
        /// Conversion type being bought
        #[arg(long, default_value = "Clicks")]
        kpi: String,
    },

    /// CRM re-engagement ROI from a JSON assumptions file
    Reengage {
        #[arg(short, long)]
        input: String,
    },

    /// Retargeting recap from campaign actuals
    Recap {
        #[arg(long)]
        impressions: u64,
        #[arg(long)]
        clicks: u64,
        #[arg(long)]
        conversions: u64,
        #[arg(long)]
        spend: f64,
        #[arg(long)]
        revenue: f64,
    },

    /// Compare retargeting strategies from a JSON list of candidates
    Compare {
        #[arg(short, long)]
        input: String,
    },

    /// List the industry benchmark table
    Benchmarks,
}

#[derive(Args, Debug, Default)]
struct FunnelArgs {
    /// Industry benchmark to pre-fill CPC and rates (overrides config)
    #[arg(long)]
    industry: Option<String>,
    /// Total ad budget
    #[arg(long)]
    budget: Option<f64>,
    /// Estimated cost per click
    #[arg(long)]
    cpc: Option<f64>,
    /// Landing page conversion rate (%)
    #[arg(long)]
    landing_cr: Option<f64>,
    /// Signup to attendee rate (%)
    #[arg(long)]
    attendance_rate: Option<f64>,
    /// Attendee to qualified lead rate (%)
    #[arg(long)]
    lead_rate: Option<f64>,
    /// Lead to sale rate (%)
    #[arg(long)]
    sales_rate: Option<f64>,
    /// Treat every attendee as a qualified lead
    #[arg(long, default_value_t = false)]
    treat_all_as_qualified: bool,
    /// Average deal value
    #[arg(long)]
    deal_value: Option<f64>,
    /// Cost of goods per sale
    #[arg(long)]
    cogs: Option<f64>,
}

impl FunnelArgs {
    /// Start from the named benchmark (flag first, then config) or the plain
    /// defaults, then apply every flag that was given.
    fn assumptions(
        &self,
        table: &BenchmarkTable,
        selected: Option<&str>,
    ) -> CampaignResult<FunnelAssumptions> {
        let mut a = match self.industry.as_deref().or(selected) {
            Some(name) => FunnelAssumptions::from_benchmark(table.get(name)?),
            None => FunnelAssumptions::default(),
        };
        if let Some(v) = self.budget {
            a.budget = v;
        }
        if let Some(v) = self.cpc {
            a.cpc = v;
        }
        if let Some(v) = self.landing_cr {
            a.landing_cr = v;
        }
        if let Some(v) = self.attendance_rate {
            a.attendance_rate = v;
        }
        if let Some(v) = self.lead_rate {
            a.lead_rate = v;
        }
        if let Some(v) = self.sales_rate {
            a.sales_rate = v;
        }
        if self.treat_all_as_qualified {
            a.qualification = QualificationPolicy::TreatAllAsQualified;
        }
        if let Some(v) = self.deal_value {
            a.avg_deal_value = v;
        }
        if let Some(v) = self.cogs {
            a.cogs_per_sale = v;
        }
        Ok(a)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Flat,
    FrontLoaded,
    BackLoaded,
}

impl From<StrategyArg> for PacingStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Flat => PacingStrategy::Flat,
            StrategyArg::FrontLoaded => PacingStrategy::FrontLoaded,
            StrategyArg::BackLoaded => PacingStrategy::BackLoaded,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = AppConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    info!(
        selected_benchmark = ?config.benchmarks.selected,
        allocation_tolerance = config.allocation.tolerance,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Funnel(args) => {
            let a = args.assumptions(
                &BenchmarkTable::builtin(),
                config.benchmarks.selected.as_deref(),
            )?;
            let calc = FunnelForecastCalculator::new(ReferenceBenchmarks::from(&config.benchmarks));
            emit(ForecastKind::Funnel, calc.forecast(&a))
        }

        Commands::Allocate {
            budget,
            goal,
            channels,
            roi,
        } => {
            let channels: Vec<ChannelPlan> = match channels {
                Some(path) => read_json(&path)?,
                None => ChannelPlan::stock_channels(goal),
            };
            let req = AllocationRequest {
                total_budget: budget,
                goal,
                channels,
                roi: if roi { RoiMode::Enabled } else { RoiMode::Disabled },
            };
            let plan = MultiChannelAllocator::new(config.allocation.tolerance)
                .allocate(&req)
                .context("channel allocation rejected")?;
            emit(ForecastKind::ChannelAllocation, plan)
        }

        Commands::Pacing {
            periods,
            budget,
            strategy,
            cost_per_result,
            kpi,
        } => {
            let plan = PacingScheduler::new(config.pacing.period_label.clone()).schedule(
                &PacingRequest {
                    periods,
                    total_budget: budget,
                    strategy: strategy.into(),
                    cost_per_result,
                    kpi_label: kpi,
                },
            )?;
            emit(ForecastKind::Pacing, plan)
        }

        Commands::Reengage { input } => {
            let a: ReengagementAssumptions = read_json(&input)?;
            let forecast = ReengagementFunnelCalculator::new().forecast(&a);
            emit(ForecastKind::Reengagement, forecast)
        }

        Commands::Recap {
            impressions,
            clicks,
            conversions,
            spend,
            revenue,
        } => {
            let recap = RetargetingRecapEstimator::new().recap(&RecapActuals {
                impressions,
                clicks,
                conversions,
                spend,
                revenue,
            });
            emit(ForecastKind::RetargetingRecap, recap)
        }

        Commands::Compare { input } => {
            let candidates: Vec<StrategyCandidate> = read_json(&input)?;
            let comparison = RetargetingRecapEstimator::new().compare(&candidates);
            emit(ForecastKind::StrategyComparison, comparison)
        }

        Commands::Benchmarks => emit(ForecastKind::Benchmarks, BenchmarkTable::builtin()),
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "campaign_forecast=info,campaign_forecasting=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))
}

fn emit<T: Serialize>(kind: ForecastKind, result: T) -> anyhow::Result<()> {
    let report = ForecastReport::new(kind, result);
    println!("{}", report.to_json_pretty()?);
    info!(id = %report.id, kind = ?kind, "Report written");
    Ok(())
}
