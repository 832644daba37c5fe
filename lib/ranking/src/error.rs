use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] schemefit_core::Error),

    #[error("Invalid ranking configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Problems with ranking or keyword configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Weight '{0}' is negative")]
    NegativeWeight(&'static str),

    #[error("Weights must sum to 1.0, got {0}")]
    WeightSum(f64),

    #[error("Boost '{0}' has no trigger words")]
    EmptyTriggers(String),

    #[error("Boost '{0}' must have a positive multiplier")]
    NonPositiveMultiplier(String),

    #[error("Confidence bands must have strictly decreasing thresholds")]
    BandOrder,

    #[error("Keyword burst '{0}' has zero repeat")]
    ZeroRepeat(String),
}
