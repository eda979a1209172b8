use serde::{Deserialize, Serialize};

use crate::config::AsoConfig;
use crate::error::ConfigError;
use crate::recommendations::{Recommendation, RecommendationEngine};
use crate::scoring::{
    ConversionScore, ConversionScorer, ConversionSnapshot, DimensionScores, KeywordScore,
    KeywordScorer, KeywordSnapshot, MetadataScore, MetadataScorer, MetadataSnapshot, RatingsScore,
    RatingsScorer, RatingsSnapshot, ScoreAggregator, ScoreBreakdown,
};

pub const STRENGTH_AT_OR_ABOVE: f64 = 75.0;
pub const WEAKNESS_BELOW: f64 = 60.0;

const NO_STRENGTHS: &str = "Focus on building strengths across all areas";
const NO_WEAKNESSES: &str = "All areas performing adequately";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthStatus {
    /// Lower bounds are inclusive: 80 is Excellent, 65 Good, 50 Fair.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            HealthStatus::Excellent
        } else if score >= 65.0 {
            HealthStatus::Good
        } else if score >= 50.0 {
            HealthStatus::Fair
        } else {
            HealthStatus::Poor
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent - Top-tier ASO performance",
            HealthStatus::Good => "Good - Competitive ASO with room for improvement",
            HealthStatus::Fair => "Fair - Needs strategic improvements",
            HealthStatus::Poor => "Poor - Requires immediate ASO overhaul",
        }
    }
}

/// Metric snapshots for all four dimensions. Missing sections and keys take
/// their neutral defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsoInputs {
    pub metadata: MetadataSnapshot,
    pub ratings: RatingsSnapshot,
    pub keyword_performance: KeywordSnapshot,
    pub conversion: ConversionSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionDetails {
    pub metadata_quality: MetadataScore,
    pub ratings_reviews: RatingsScore,
    pub keyword_performance: KeywordScore,
    pub conversion_metrics: ConversionScore,
}

impl DimensionDetails {
    pub fn totals(&self) -> DimensionScores {
        DimensionScores {
            metadata_quality: self.metadata_quality.total,
            ratings_reviews: self.ratings_reviews.total,
            keyword_performance: self.keyword_performance.total,
            conversion_metrics: self.conversion_metrics.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsoReport {
    pub overall_score: f64,
    pub health_status: HealthStatus,
    pub health_summary: String,
    pub score_breakdown: ScoreBreakdown,
    pub dimension_details: DimensionDetails,
    pub recommendations: Vec<Recommendation>,
    pub priority_actions: Vec<Recommendation>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Scores a listing across all dimensions. Holds only immutable
/// configuration, so one instance can serve any number of callers.
#[derive(Debug, Clone)]
pub struct AsoScorer {
    metadata: MetadataScorer,
    ratings: RatingsScorer,
    keywords: KeywordScorer,
    conversion: ConversionScorer,
    aggregator: ScoreAggregator,
    recommendations: RecommendationEngine,
}

impl AsoScorer {
    pub fn new(config: &AsoConfig) -> Result<Self, ConfigError> {
        config.benchmarks.validate()?;
        let benchmarks = &config.benchmarks;
        Ok(Self {
            metadata: MetadataScorer::new(benchmarks),
            ratings: RatingsScorer::new(benchmarks),
            keywords: KeywordScorer::new(benchmarks),
            conversion: ConversionScorer::new(benchmarks),
            aggregator: ScoreAggregator::new(config.weights)?,
            recommendations: RecommendationEngine::new(),
        })
    }

    pub fn score_dimensions(&self, inputs: &AsoInputs) -> DimensionDetails {
        DimensionDetails {
            metadata_quality: self.metadata.score(&inputs.metadata),
            ratings_reviews: self.ratings.score(&inputs.ratings),
            keyword_performance: self.keywords.score(&inputs.keyword_performance),
            conversion_metrics: self.conversion.score(&inputs.conversion),
        }
    }

    pub fn calculate_overall_score(&self, inputs: &AsoInputs) -> AsoReport {
        let details = self.score_dimensions(inputs);
        let totals = details.totals();
        let (overall_score, score_breakdown) = self.aggregator.aggregate(&totals);
        let health_status = HealthStatus::from_score(overall_score);

        tracing::debug!(
            metadata = totals.metadata_quality,
            ratings = totals.ratings_reviews,
            keywords = totals.keyword_performance,
            conversion = totals.conversion_metrics,
            overall = overall_score,
            "scored listing"
        );

        let recommendations = self.recommendations.generate(&totals);
        let priority_actions = self.recommendations.prioritize(&recommendations);

        AsoReport {
            overall_score,
            health_status,
            health_summary: health_status.summary().to_string(),
            strengths: identify_strengths(&score_breakdown),
            weaknesses: identify_weaknesses(&score_breakdown),
            score_breakdown,
            dimension_details: details,
            recommendations,
            priority_actions,
        }
    }
}

/// Dimensions at or above 75. Scores in `[60, 75)` are neither strengths
/// nor weaknesses.
pub fn identify_strengths(breakdown: &ScoreBreakdown) -> Vec<String> {
    let strengths: Vec<String> = breakdown
        .entries()
        .filter(|(_, entry)| entry.score >= STRENGTH_AT_OR_ABOVE)
        .map(|(dimension, entry)| format!("{}: {:.1}/100", dimension.label(), entry.score))
        .collect();

    if strengths.is_empty() {
        vec![NO_STRENGTHS.to_string()]
    } else {
        strengths
    }
}

pub fn identify_weaknesses(breakdown: &ScoreBreakdown) -> Vec<String> {
    let weaknesses: Vec<String> = breakdown
        .entries()
        .filter(|(_, entry)| entry.score < WEAKNESS_BELOW)
        .map(|(dimension, entry)| {
            format!(
                "{}: {:.1}/100 - needs improvement",
                dimension.label(),
                entry.score
            )
        })
        .collect();

    if weaknesses.is_empty() {
        vec![NO_WEAKNESSES.to_string()]
    } else {
        weaknesses
    }
}
