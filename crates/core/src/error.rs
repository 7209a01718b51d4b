use thiserror::Error;

pub type CampaignResult<T> = Result<T, CampaignError>;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Allocation error: channel percentages sum to {total}%, expected 100%")]
    InvalidAllocation { total: f64 },

    #[error("Allocation error: channel '{0}' appears more than once")]
    DuplicateChannel(String),

    #[error("Unknown industry benchmark: {0}")]
    UnknownBenchmark(String),

    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_allocation_message_reports_total() {
        let err = CampaignError::InvalidAllocation { total: 95.0 };
        assert_eq!(
            err.to_string(),
            "Allocation error: channel percentages sum to 95%, expected 100%"
        );
    }

    #[test]
    fn test_serde_error_converts() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: CampaignError = parse.unwrap_err().into();
        assert!(matches!(err, CampaignError::Serialization(_)));
    }
}
