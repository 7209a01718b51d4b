use serde::Deserialize;

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `CAMPAIGN_FORECAST__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub benchmarks: BenchmarkConfig,
    #[serde(default)]
    pub allocation: AllocationConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
}

// ─── Benchmark Config ───────────────────────────────────────────────────
/// Reference figures a funnel forecast is compared against, plus the
/// industry profile used to pre-fill funnel assumptions.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    /// Industry label from the benchmark table, e.g. "SaaS".
    #[serde(default)]
    pub selected: Option<String>,
    #[serde(default = "default_landing_cr")]
    pub landing_cr: f64,
    #[serde(default = "default_attendance_rate")]
    pub attendance_rate: f64,
    #[serde(default = "default_lead_rate")]
    pub lead_rate: f64,
    #[serde(default = "default_sales_rate")]
    pub sales_rate: f64,
    #[serde(default = "default_roas")]
    pub roas: f64,
    #[serde(default = "default_cost_per_lead")]
    pub cost_per_lead: f64,
    #[serde(default = "default_profit_margin")]
    pub profit_margin: f64,
}

fn default_landing_cr() -> f64 {
    25.0
}

fn default_attendance_rate() -> f64 {
    40.0
}

fn default_lead_rate() -> f64 {
    25.0
}

fn default_sales_rate() -> f64 {
    15.0
}

fn default_roas() -> f64 {
    3.0
}

fn default_cost_per_lead() -> f64 {
    30.0
}

fn default_profit_margin() -> f64 {
    25.0
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            selected: None,
            landing_cr: default_landing_cr(),
            attendance_rate: default_attendance_rate(),
            lead_rate: default_lead_rate(),
            sales_rate: default_sales_rate(),
            roas: default_roas(),
            cost_per_lead: default_cost_per_lead(),
            profit_margin: default_profit_margin(),
        }
    }
}

// ─── Allocation Config ──────────────────────────────────────────────────
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationConfig {
    /// Absolute slack allowed when checking that channel splits total 100%.
    #[serde(default = "default_allocation_tolerance")]
    pub tolerance: f64,
}

fn default_allocation_tolerance() -> f64 {
    1e-6
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_allocation_tolerance(),
        }
    }
}

// ─── Pacing Config ──────────────────────────────────────────────────────
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Noun used in period labels ("Week 1", "Week 2", ...).
    #[serde(default = "default_period_label")]
    pub period_label: String,
}

fn default_period_label() -> String {
    "Week".to_string()
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            period_label: default_period_label(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional config file, then environment
    /// variables (which take precedence).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("CAMPAIGN_FORECAST")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
