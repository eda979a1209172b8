use serde::Serialize;

use crate::scoring::DimensionScores;
use crate::Dimension;

/// Below this a dimension gets a high-priority recommendation.
pub const HIGH_PRIORITY_BELOW: f64 = 60.0;
/// Below this (and at or above [`HIGH_PRIORITY_BELOW`]) it gets a medium one.
pub const MEDIUM_PRIORITY_BELOW: f64 = 80.0;
pub const PRIORITY_ACTION_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: Dimension,
    pub priority: Priority,
    pub action: String,
    pub details: String,
    pub expected_impact: String,
}

impl Recommendation {
    fn from_template(category: Dimension, priority: Priority, template: &Template) -> Self {
        Self {
            category,
            priority,
            action: template.action.to_string(),
            details: template.details.to_string(),
            expected_impact: template.expected_impact.to_string(),
        }
    }
}

struct Template {
    action: &'static str,
    details: &'static str,
    expected_impact: &'static str,
}

fn template(dimension: Dimension, priority: Priority) -> Template {
    match (dimension, priority) {
        (Dimension::MetadataQuality, Priority::High) => Template {
            action: "Optimize app title and description",
            details: "Add more keywords to title, expand description to 1500-2000 characters, improve keyword density to 3-5%",
            expected_impact: "Improve discoverability and ranking potential",
        },
        (Dimension::MetadataQuality, Priority::Medium) => Template {
            action: "Refine metadata for better keyword targeting",
            details: "Test variations of title/subtitle, optimize keyword field for Apple",
            expected_impact: "Incremental ranking improvements",
        },
        (Dimension::RatingsReviews, Priority::High) => Template {
            action: "Improve rating quality and volume",
            details: "Address top user complaints, implement in-app rating prompts, respond to negative reviews",
            expected_impact: "Better conversion rates and trust signals",
        },
        (Dimension::RatingsReviews, Priority::Medium) => Template {
            action: "Increase rating velocity",
            details: "Optimize timing of rating requests, encourage satisfied users to rate",
            expected_impact: "Sustained rating quality",
        },
        (Dimension::KeywordPerformance, Priority::High) => Template {
            action: "Improve keyword rankings",
            details: "Target long-tail keywords with lower competition, update metadata with high-potential keywords, build backlinks",
            expected_impact: "Significant improvement in organic visibility",
        },
        (Dimension::KeywordPerformance, Priority::Medium) => Template {
            action: "Expand keyword coverage",
            details: "Target additional related keywords, test seasonal keywords, localize for new markets",
            expected_impact: "Broader reach and more discovery opportunities",
        },
        (Dimension::ConversionMetrics, Priority::High) => Template {
            action: "Optimize store listing for conversions",
            details: "Improve screenshots and icon, strengthen value proposition in description, add video preview",
            expected_impact: "Higher impression-to-install conversion",
        },
        (Dimension::ConversionMetrics, Priority::Medium) => Template {
            action: "Test visual asset variations",
            details: "A/B test different icon designs and screenshot sequences",
            expected_impact: "Incremental conversion improvements",
        },
    }
}

fn priority_for(score: f64) -> Option<Priority> {
    if score < HIGH_PRIORITY_BELOW {
        Some(Priority::High)
    } else if score < MEDIUM_PRIORITY_BELOW {
        Some(Priority::Medium)
    } else {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// One recommendation per dimension scoring below 80, in dimension order.
    pub fn generate(&self, scores: &DimensionScores) -> Vec<Recommendation> {
        Dimension::ALL
            .iter()
            .filter_map(|dimension| {
                let priority = priority_for(scores.get(*dimension))?;
                Some(Recommendation::from_template(
                    *dimension,
                    priority,
                    &template(*dimension, priority),
                ))
            })
            .collect()
    }

    /// High before medium, dimension order within a tier, first
    /// [`PRIORITY_ACTION_LIMIT`] kept.
    pub fn prioritize(&self, recommendations: &[Recommendation]) -> Vec<Recommendation> {
        let mut sorted = recommendations.to_vec();
        sorted.sort_by_key(|recommendation| recommendation.priority.rank());
        sorted.truncate(PRIORITY_ACTION_LIMIT);
        sorted
    }
}
