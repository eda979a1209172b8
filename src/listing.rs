use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::benchmarks::DensityBenchmark;
use crate::error::ConfigError;
use crate::scoring::{round1, round_to, MetadataSnapshot};

/// Fields using less than this share of their limit get a warning.
const UNDER_UTILIZED_SHARE: f64 = 0.2;
const KEYWORD_TOO_LOW: f64 = 0.5;
const KEYWORD_TOO_HIGH: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Apple,
    Google,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::Apple => "apple",
            Platform::Google => "google",
        }
    }

    /// Character limit for a listing field, `None` if the platform has no
    /// such field.
    pub fn char_limit(self, field: &str) -> Option<usize> {
        let limit = match (self, field) {
            (Platform::Apple, "title") => 30,
            (Platform::Apple, "subtitle") => 30,
            (Platform::Apple, "promotional_text") => 170,
            (Platform::Apple, "description") => 4000,
            (Platform::Apple, "keywords") => 100,
            (Platform::Apple, "whats_new") => 4000,
            (Platform::Google, "title") => 50,
            (Platform::Google, "short_description") => 80,
            (Platform::Google, "full_description") => 4000,
            _ => return None,
        };
        Some(limit)
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "apple" => Ok(Platform::Apple),
            "google" => Ok(Platform::Google),
            _ => Err(ConfigError::UnknownPlatform(value.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStatus {
    pub value: String,
    pub length: usize,
    pub limit: usize,
    pub remaining: i64,
    pub is_valid: bool,
    pub usage_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub field_status: BTreeMap<String, FieldStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordDensityStatus {
    TooLow,
    Optimal,
    TooHigh,
}

impl KeywordDensityStatus {
    fn assess(density: f64) -> Self {
        if density < KEYWORD_TOO_LOW {
            KeywordDensityStatus::TooLow
        } else if density <= KEYWORD_TOO_HIGH {
            KeywordDensityStatus::Optimal
        } else {
            KeywordDensityStatus::TooHigh
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityAssessment {
    UnderOptimized,
    Optimal,
    High,
    KeywordStuffing,
}

impl DensityAssessment {
    pub fn assess(density: f64, benchmark: &DensityBenchmark) -> Self {
        if density < benchmark.min {
            DensityAssessment::UnderOptimized
        } else if density <= benchmark.optimal {
            DensityAssessment::Optimal
        } else if density <= benchmark.max {
            DensityAssessment::High
        } else {
            DensityAssessment::KeywordStuffing
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            DensityAssessment::UnderOptimized => {
                "Under-optimized: Consider adding more keyword variations"
            }
            DensityAssessment::Optimal => "Optimal: Good keyword integration without stuffing",
            DensityAssessment::High => "High: Approaching keyword stuffing - reduce keyword usage",
            DensityAssessment::KeywordStuffing => {
                "Too High: Keyword stuffing detected - rewrite for natural flow"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordDensity {
    pub keyword: String,
    pub occurrences: usize,
    pub density_percentage: f64,
    pub status: KeywordDensityStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityAnalysis {
    pub total_words: usize,
    pub keyword_densities: Vec<KeywordDensity>,
    pub overall_keyword_density: f64,
    pub assessment: DensityAssessment,
    pub assessment_message: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ListingValidator {
    platform: Platform,
    density: DensityBenchmark,
}

impl ListingValidator {
    pub fn new(platform: &str, density: DensityBenchmark) -> Result<Self, ConfigError> {
        Ok(Self {
            platform: platform.parse()?,
            density,
        })
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn validate_character_limits(&self, fields: &BTreeMap<String, String>) -> LimitValidation {
        let mut validation = LimitValidation {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            field_status: BTreeMap::new(),
        };

        for (field, value) in fields {
            let Some(limit) = self.platform.char_limit(field) else {
                validation.warnings.push(format!(
                    "Unknown field '{}' for {} platform",
                    field, self.platform
                ));
                continue;
            };

            let length = value.chars().count();
            let remaining = limit as i64 - length as i64;
            let is_valid = length <= limit;

            if !is_valid {
                validation.is_valid = false;
                validation
                    .errors
                    .push(format!("'{}' exceeds limit: {}/{} chars", field, length, limit));
            } else if remaining as f64 > limit as f64 * UNDER_UTILIZED_SHARE {
                validation.warnings.push(format!(
                    "'{}' under-utilizes space: {} chars remaining",
                    field, remaining
                ));
            }

            validation.field_status.insert(
                field.clone(),
                FieldStatus {
                    value: value.clone(),
                    length,
                    limit,
                    remaining,
                    is_valid,
                    usage_percentage: round1(length as f64 / limit as f64 * 100.0),
                },
            );
        }

        validation
    }

    pub fn analyze_keyword_density(&self, text: &str, keywords: &[String]) -> DensityAnalysis {
        let lowered = text.to_lowercase();
        let total_words = lowered.split_whitespace().count();

        let keyword_densities: Vec<KeywordDensity> = unique_keywords(keywords)
            .into_iter()
            .map(|keyword| {
                let occurrences = count_occurrences(&lowered, keyword);
                let density = percentage(occurrences, total_words);
                KeywordDensity {
                    keyword: keyword.clone(),
                    occurrences,
                    density_percentage: round_to(density, 2),
                    status: KeywordDensityStatus::assess(density),
                }
            })
            .collect();

        let total_occurrences: usize = keyword_densities.iter().map(|kw| kw.occurrences).sum();
        let overall = percentage(total_occurrences, total_words);
        let assessment = DensityAssessment::assess(overall, &self.density);

        DensityAnalysis {
            total_words,
            recommendations: density_recommendations(&keyword_densities),
            keyword_densities,
            overall_keyword_density: round_to(overall, 2),
            assessment,
            assessment_message: assessment.message().to_string(),
        }
    }

    /// Derives the metadata scorer's input from raw listing text.
    /// `description_quality` is an editorial judgement the caller supplies.
    pub fn metadata_snapshot(
        &self,
        title: &str,
        description: &str,
        keywords: &[String],
        description_quality: f64,
    ) -> MetadataSnapshot {
        let title_lower = title.to_lowercase();
        let title_keyword_count = unique_keywords(keywords)
            .into_iter()
            .filter(|keyword| count_occurrences(&title_lower, keyword) > 0)
            .count();
        let density = self.analyze_keyword_density(description, keywords);

        MetadataSnapshot {
            title_keyword_count: u32::try_from(title_keyword_count).unwrap_or(u32::MAX),
            title_length: u32::try_from(title.chars().count()).unwrap_or(u32::MAX),
            description_length: u32::try_from(description.chars().count()).unwrap_or(u32::MAX),
            description_quality: description_quality.max(0.0).min(1.0),
            keyword_density: density.overall_keyword_density,
        }
    }
}

/// Keywords in first-seen order with repeats dropped, so a keyword listed
/// twice is only counted once.
fn unique_keywords(keywords: &[String]) -> Vec<&String> {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .filter(|keyword| seen.insert(keyword.as_str()))
        .collect()
}

/// Non-overlapping, case-insensitive occurrences of `keyword` in already
/// lowercased text. Empty keywords never match.
fn count_occurrences(lowered: &str, keyword: &str) -> usize {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    lowered.matches(needle.as_str()).count()
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn density_recommendations(densities: &[KeywordDensity]) -> Vec<String> {
    let recommendations: Vec<String> = densities
        .iter()
        .filter_map(|kw| match kw.status {
            KeywordDensityStatus::TooLow => Some(format!(
                "Increase usage of '{}' - currently only {} times",
                kw.keyword, kw.occurrences
            )),
            KeywordDensityStatus::TooHigh => Some(format!(
                "Reduce usage of '{}' - appears {} times (keyword stuffing risk)",
                kw.keyword, kw.occurrences
            )),
            KeywordDensityStatus::Optimal => None,
        })
        .collect();

    if recommendations.is_empty() {
        vec!["Keyword density is well-balanced".to_string()]
    } else {
        recommendations
    }
}
