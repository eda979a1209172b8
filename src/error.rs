use std::path::PathBuf;
use thiserror::Error;

/// Configuration supplied at construction time that cannot be used as-is.
///
/// Scoring and analysis never fail on input data; every error in this crate
/// originates from weights, benchmark tables or the config file itself.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("dimension weights must sum to 100, got {sum}")]
    WeightSum { sum: u32 },

    #[error("benchmark '{metric}' requires min < target (min {min}, target {target})")]
    Benchmark {
        metric: &'static str,
        min: f64,
        target: f64,
    },

    #[error(
        "keyword density benchmark requires min < optimal <= max (min {min}, optimal {optimal}, max {max})"
    )]
    DensityBenchmark { min: f64, optimal: f64, max: f64 },

    #[error("funnel thresholds for {tier} / {stage} must ascend poor < average < good < excellent")]
    FunnelThresholds {
        tier: &'static str,
        stage: &'static str,
    },

    #[error("category key '{0}' is not normalized (expected lowercase words joined by '_')")]
    CategoryKey(String),

    #[error("secondary category pairing for '{0}' is empty")]
    EmptyPairing(String),

    #[error("unknown platform '{0}' (expected 'apple' or 'google')")]
    UnknownPlatform(String),

    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
