pub mod benchmarks;
pub mod category;
pub mod config;
pub mod error;
pub mod funnel;
pub mod listing;
pub mod recommendations;
pub mod report;
pub mod scoring;

use serde::Serialize;

pub use crate::category::{CategoryFitAnalyzer, CategoryFitInput, CategoryFitReport};
pub use crate::config::AsoConfig;
pub use crate::error::ConfigError;
pub use crate::funnel::{FunnelAnalyzer, FunnelInput, FunnelReport};
pub use crate::listing::{ListingValidator, Platform};
pub use crate::report::{AsoInputs, AsoReport, AsoScorer, HealthStatus};

/// The four scored aspects of a store listing, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    MetadataQuality,
    RatingsReviews,
    KeywordPerformance,
    ConversionMetrics,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::MetadataQuality,
        Dimension::RatingsReviews,
        Dimension::KeywordPerformance,
        Dimension::ConversionMetrics,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::MetadataQuality => "Metadata Quality",
            Dimension::RatingsReviews => "Ratings Reviews",
            Dimension::KeywordPerformance => "Keyword Performance",
            Dimension::ConversionMetrics => "Conversion Metrics",
        }
    }
}

/// Scores a listing with the built-in benchmarks and equal weights.
pub fn calculate_aso_score(inputs: &AsoInputs) -> Result<AsoReport, ConfigError> {
    let scorer = AsoScorer::new(&AsoConfig::default())?;
    Ok(scorer.calculate_overall_score(inputs))
}
