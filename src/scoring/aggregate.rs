use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scoring::round1;
use crate::Dimension;

/// Percentage weight of each dimension in the overall score. The four
/// weights always sum to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionWeights {
    pub metadata_quality: u32,
    pub ratings_reviews: u32,
    pub keyword_performance: u32,
    pub conversion_metrics: u32,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            metadata_quality: 25,
            ratings_reviews: 25,
            keyword_performance: 25,
            conversion_metrics: 25,
        }
    }
}

impl DimensionWeights {
    pub fn get(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::MetadataQuality => self.metadata_quality,
            Dimension::RatingsReviews => self.ratings_reviews,
            Dimension::KeywordPerformance => self.keyword_performance,
            Dimension::ConversionMetrics => self.conversion_metrics,
        }
    }

    pub fn sum(&self) -> u32 {
        Dimension::ALL
            .iter()
            .fold(0u32, |sum, dimension| sum.saturating_add(self.get(*dimension)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.sum();
        if sum == 100 {
            Ok(())
        } else {
            Err(ConfigError::WeightSum { sum })
        }
    }
}

/// Raw 0-100 totals for the four dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionScores {
    pub metadata_quality: f64,
    pub ratings_reviews: f64,
    pub keyword_performance: f64,
    pub conversion_metrics: f64,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::MetadataQuality => self.metadata_quality,
            Dimension::RatingsReviews => self.ratings_reviews,
            Dimension::KeywordPerformance => self.keyword_performance,
            Dimension::ConversionMetrics => self.conversion_metrics,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionScore {
    pub score: f64,
    pub weight: u32,
    pub weighted_contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub metadata_quality: DimensionScore,
    pub ratings_reviews: DimensionScore,
    pub keyword_performance: DimensionScore,
    pub conversion_metrics: DimensionScore,
}

impl ScoreBreakdown {
    pub fn get(&self, dimension: Dimension) -> &DimensionScore {
        match dimension {
            Dimension::MetadataQuality => &self.metadata_quality,
            Dimension::RatingsReviews => &self.ratings_reviews,
            Dimension::KeywordPerformance => &self.keyword_performance,
            Dimension::ConversionMetrics => &self.conversion_metrics,
        }
    }

    /// Entries in dimension declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (Dimension, &DimensionScore)> + '_ {
        Dimension::ALL
            .iter()
            .map(move |dimension| (*dimension, self.get(*dimension)))
    }
}

#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    weights: DimensionWeights,
}

impl ScoreAggregator {
    pub fn new(weights: DimensionWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Weighted overall score (one decimal) and the per-dimension breakdown.
    pub fn aggregate(&self, scores: &DimensionScores) -> (f64, ScoreBreakdown) {
        let entry = |dimension: Dimension| {
            let score = scores.get(dimension);
            let weight = self.weights.get(dimension);
            DimensionScore {
                score,
                weight,
                weighted_contribution: round1(contribution(score, weight)),
            }
        };

        let overall: f64 = Dimension::ALL
            .iter()
            .map(|dimension| contribution(scores.get(*dimension), self.weights.get(*dimension)))
            .sum();

        let breakdown = ScoreBreakdown {
            metadata_quality: entry(Dimension::MetadataQuality),
            ratings_reviews: entry(Dimension::RatingsReviews),
            keyword_performance: entry(Dimension::KeywordPerformance),
            conversion_metrics: entry(Dimension::ConversionMetrics),
        };

        (round1(overall), breakdown)
    }
}

fn contribution(score: f64, weight: u32) -> f64 {
    score * (f64::from(weight) / 100.0)
}
