use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;

/// `min`/`target` thresholds for one measured metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub min: f64,
    pub target: f64,
}

impl Benchmark {
    pub const fn new(min: f64, target: f64) -> Self {
        Self { min, target }
    }

    fn validate(&self, metric: &'static str) -> Result<(), ConfigError> {
        if self.min < self.target {
            Ok(())
        } else {
            Err(ConfigError::Benchmark {
                metric,
                min: self.min,
                target: self.target,
            })
        }
    }
}

/// Density-type benchmark: full credit between `min` and `optimal`,
/// penalized above `optimal`, flagged as stuffing above `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityBenchmark {
    pub min: f64,
    pub optimal: f64,
    pub max: f64,
}

impl DensityBenchmark {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min < self.optimal && self.optimal <= self.max {
            Ok(())
        } else {
            Err(ConfigError::DensityBenchmark {
                min: self.min,
                optimal: self.optimal,
                max: self.max,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkTable {
    pub title_keyword_usage: Benchmark,
    pub description_length: Benchmark,
    pub keyword_density: DensityBenchmark,
    pub average_rating: Benchmark,
    pub ratings_count: Benchmark,
    pub keywords_top_10: Benchmark,
    pub keywords_top_50: Benchmark,
    pub conversion_rate: Benchmark,
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self {
            title_keyword_usage: Benchmark::new(1.0, 2.0),
            description_length: Benchmark::new(500.0, 2000.0),
            keyword_density: DensityBenchmark {
                min: 2.0,
                optimal: 5.0,
                max: 8.0,
            },
            average_rating: Benchmark::new(3.5, 4.5),
            ratings_count: Benchmark::new(100.0, 5000.0),
            keywords_top_10: Benchmark::new(2.0, 10.0),
            keywords_top_50: Benchmark::new(5.0, 20.0),
            conversion_rate: Benchmark::new(0.02, 0.10),
        }
    }
}

impl BenchmarkTable {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.title_keyword_usage.validate("title_keyword_usage")?;
        self.description_length.validate("description_length")?;
        self.keyword_density.validate()?;
        self.average_rating.validate("average_rating")?;
        self.ratings_count.validate("ratings_count")?;
        self.keywords_top_10.validate("keywords_top_10")?;
        self.keywords_top_50.validate("keywords_top_50")?;
        self.conversion_rate.validate("conversion_rate")?;
        Ok(())
    }
}

/// How crowded a store category is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryDensity {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl CategoryDensity {
    pub fn label(self) -> &'static str {
        match self {
            CategoryDensity::VeryHigh => "very_high",
            CategoryDensity::High => "high",
            CategoryDensity::Medium => "medium",
            CategoryDensity::Low => "low",
        }
    }

    pub fn competition_tier(self) -> CompetitionTier {
        match self {
            CategoryDensity::VeryHigh | CategoryDensity::High => CompetitionTier::High,
            CategoryDensity::Medium => CompetitionTier::Medium,
            CategoryDensity::Low => CompetitionTier::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub density: CategoryDensity,
    pub avg_top10_ratings: u64,
}

impl CategoryProfile {
    pub const fn new(density: CategoryDensity, avg_top10_ratings: u64) -> Self {
        Self {
            density,
            avg_top10_ratings,
        }
    }
}

/// Category competitiveness profiles and secondary-category pairings.
///
/// Keys are normalized category names (see [`normalize_category`]). Lookups
/// for names that are not in the table resolve to `fallback` /
/// `default_pairing` instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTable {
    pub profiles: BTreeMap<String, CategoryProfile>,
    pub fallback: CategoryProfile,
    pub pairings: BTreeMap<String, Vec<String>>,
    pub default_pairing: Vec<String>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        use CategoryDensity::{High, Low, Medium, VeryHigh};

        let profiles = [
            ("games", VeryHigh, 500_000),
            ("entertainment", High, 200_000),
            ("social_networking", High, 300_000),
            ("photo_video", High, 150_000),
            ("productivity", Medium, 80_000),
            ("business", Medium, 50_000),
            ("education", Medium, 60_000),
            ("health_fitness", Medium, 70_000),
            ("finance", Medium, 90_000),
            ("utilities", Medium, 40_000),
            ("music", Medium, 100_000),
            ("shopping", Medium, 80_000),
            ("travel", Medium, 60_000),
            ("food_drink", Low, 30_000),
            ("sports", Low, 40_000),
            ("navigation", Low, 50_000),
            ("weather", Low, 35_000),
            ("reference", Low, 20_000),
            ("books", Low, 25_000),
            ("medical", Low, 15_000),
        ]
        .into_iter()
        .map(|(name, density, ratings)| (name.to_string(), CategoryProfile::new(density, ratings)))
        .collect();

        let pairings = [
            ("productivity", ["business", "utilities", "education"]),
            ("business", ["productivity", "finance", "utilities"]),
            ("health_fitness", ["medical", "lifestyle", "sports"]),
            ("education", ["reference", "books", "productivity"]),
            ("finance", ["business", "utilities", "productivity"]),
            ("social_networking", ["entertainment", "lifestyle", "photo_video"]),
            ("photo_video", ["entertainment", "social_networking", "lifestyle"]),
            ("entertainment", ["music", "games", "social_networking"]),
            ("food_drink", ["lifestyle", "health_fitness", "shopping"]),
            ("travel", ["navigation", "lifestyle", "utilities"]),
            ("shopping", ["lifestyle", "food_drink", "utilities"]),
            ("utilities", ["productivity", "business", "lifestyle"]),
        ]
        .into_iter()
        .map(|(name, pairs)| {
            (
                name.to_string(),
                pairs.iter().map(|pair| pair.to_string()).collect(),
            )
        })
        .collect();

        Self {
            profiles,
            fallback: CategoryProfile::new(Medium, 50_000),
            pairings,
            default_pairing: vec![
                "utilities".to_string(),
                "lifestyle".to_string(),
                "productivity".to_string(),
            ],
        }
    }
}

impl CategoryTable {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for key in self.profiles.keys().chain(self.pairings.keys()) {
            if normalize_category(key) != *key {
                return Err(ConfigError::CategoryKey(key.clone()));
            }
        }
        for (key, pairs) in &self.pairings {
            if pairs.is_empty() {
                return Err(ConfigError::EmptyPairing(key.clone()));
            }
        }
        if self.default_pairing.is_empty() {
            return Err(ConfigError::EmptyPairing("default".to_string()));
        }
        Ok(())
    }

    /// Profile for a normalized category key, if the table knows it.
    pub fn get(&self, normalized: &str) -> Option<&CategoryProfile> {
        self.profiles.get(normalized)
    }

    pub fn profile_or_fallback(&self, normalized: &str) -> CategoryProfile {
        match self.get(normalized) {
            Some(profile) => *profile,
            None => {
                tracing::warn!(category = normalized, "unknown category, using fallback profile");
                self.fallback
            }
        }
    }

    pub fn pairing(&self, normalized: &str) -> &[String] {
        self.pairings
            .get(normalized)
            .map(Vec::as_slice)
            .unwrap_or(&self.default_pairing)
    }
}

/// Lowercases a store category name and turns every space and `&` into
/// `_`. "Social Networking" becomes `social_networking`; "Health & Fitness"
/// becomes `health___fitness`, which the default table does not contain.
pub fn normalize_category(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|ch| if ch == ' ' || ch == '&' { '_' } else { ch })
        .collect()
}

/// Coarse market-density bucket used to pick funnel benchmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompetitionTier {
    #[serde(rename = "high_competition")]
    High,
    #[default]
    #[serde(rename = "medium_competition")]
    Medium,
    #[serde(rename = "low_competition")]
    Low,
}

impl CompetitionTier {
    pub fn label(self) -> &'static str {
        match self {
            CompetitionTier::High => "high_competition",
            CompetitionTier::Medium => "medium_competition",
            CompetitionTier::Low => "low_competition",
        }
    }

    /// Resolves a tier from either a category name (via its density) or a
    /// tier/density name given directly. Anything unrecognized is `Medium`.
    pub fn resolve(selector: &str, categories: &CategoryTable) -> Self {
        let normalized = normalize_category(selector);
        if let Some(profile) = categories.get(&normalized) {
            return profile.density.competition_tier();
        }
        match normalized.as_str() {
            "very_high" | "high" | "high_competition" => CompetitionTier::High,
            "low" | "low_competition" => CompetitionTier::Low,
            _ => CompetitionTier::Medium,
        }
    }
}

/// Rate thresholds for one funnel stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageThresholds {
    pub poor: f64,
    pub average: f64,
    pub good: f64,
    pub excellent: f64,
}

impl StageThresholds {
    pub const fn new(poor: f64, average: f64, good: f64, excellent: f64) -> Self {
        Self {
            poor,
            average,
            good,
            excellent,
        }
    }

    fn validate(&self, tier: &'static str, stage: &'static str) -> Result<(), ConfigError> {
        if self.poor < self.average && self.average < self.good && self.good < self.excellent {
            Ok(())
        } else {
            Err(ConfigError::FunnelThresholds { tier, stage })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FunnelBenchmarks {
    pub impressions_to_page_views: StageThresholds,
    pub page_views_to_installs: StageThresholds,
    pub overall_cvr: StageThresholds,
}

impl FunnelBenchmarks {
    fn validate(&self, tier: &'static str) -> Result<(), ConfigError> {
        self.impressions_to_page_views
            .validate(tier, "impressions_to_page_views")?;
        self.page_views_to_installs
            .validate(tier, "page_views_to_installs")?;
        self.overall_cvr.validate(tier, "overall_cvr")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelBenchmarkTable {
    pub high_competition: FunnelBenchmarks,
    pub medium_competition: FunnelBenchmarks,
    pub low_competition: FunnelBenchmarks,
}

impl Default for FunnelBenchmarkTable {
    fn default() -> Self {
        Self {
            high_competition: FunnelBenchmarks {
                impressions_to_page_views: StageThresholds::new(0.03, 0.06, 0.10, 0.15),
                page_views_to_installs: StageThresholds::new(0.15, 0.30, 0.45, 0.60),
                overall_cvr: StageThresholds::new(0.005, 0.02, 0.04, 0.08),
            },
            medium_competition: FunnelBenchmarks {
                impressions_to_page_views: StageThresholds::new(0.05, 0.08, 0.12, 0.18),
                page_views_to_installs: StageThresholds::new(0.20, 0.35, 0.50, 0.65),
                overall_cvr: StageThresholds::new(0.01, 0.03, 0.06, 0.10),
            },
            low_competition: FunnelBenchmarks {
                impressions_to_page_views: StageThresholds::new(0.06, 0.10, 0.15, 0.22),
                page_views_to_installs: StageThresholds::new(0.25, 0.40, 0.55, 0.70),
                overall_cvr: StageThresholds::new(0.015, 0.04, 0.08, 0.15),
            },
        }
    }
}

impl FunnelBenchmarkTable {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.high_competition.validate("high_competition")?;
        self.medium_competition.validate("medium_competition")?;
        self.low_competition.validate("low_competition")
    }

    pub fn for_tier(&self, tier: CompetitionTier) -> &FunnelBenchmarks {
        match tier {
            CompetitionTier::High => &self.high_competition,
            CompetitionTier::Medium => &self.medium_competition,
            CompetitionTier::Low => &self.low_competition,
        }
    }
}
