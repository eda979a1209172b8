use serde::{Deserialize, Serialize};

use crate::benchmarks::{normalize_category, CategoryDensity, CategoryProfile, CategoryTable};
use crate::error::ConfigError;

pub const SWITCHING_CONSIDERATIONS: [&str; 5] = [
    "Category changes take effect with the next app update submission",
    "Rankings in the old category are lost immediately",
    "Building rankings in a new category takes 2-4 weeks",
    "Best time to switch: with a major update that justifies the new category",
    "Monitor competitor density before switching - categories shift over time",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryCompetitiveness {
    StrongContender,
    Competitive,
    Developing,
    EarlyStage,
}

impl CategoryCompetitiveness {
    /// Buckets the app's rating count relative to the category's average
    /// top-10 rating count.
    pub fn assess(ratings_count: u64, profile: &CategoryProfile) -> Self {
        let ratio = if profile.avg_top10_ratings > 0 {
            ratings_count as f64 / profile.avg_top10_ratings as f64
        } else {
            0.0
        };

        if ratio >= 0.5 {
            CategoryCompetitiveness::StrongContender
        } else if ratio >= 0.1 {
            CategoryCompetitiveness::Competitive
        } else if ratio >= 0.01 {
            CategoryCompetitiveness::Developing
        } else {
            CategoryCompetitiveness::EarlyStage
        }
    }

    pub fn can_compete(self) -> bool {
        matches!(
            self,
            CategoryCompetitiveness::StrongContender | CategoryCompetitiveness::Competitive
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryFitInput {
    pub ratings_count: u64,
    pub current_category: String,
    pub alternative_categories: Vec<String>,
    /// Key features of the app. Carried for callers that pair category
    /// analysis with listing work; the pairing table alone drives the
    /// secondary-category suggestion.
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentCategory {
    pub name: String,
    pub density: CategoryDensity,
    pub avg_top10_ratings: u64,
    pub your_ratings: u64,
    pub competitiveness: CategoryCompetitiveness,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeCategory {
    pub category: String,
    pub density: CategoryDensity,
    pub avg_top10_ratings: u64,
    pub competitiveness: CategoryCompetitiveness,
    pub easier_than_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondaryCategory {
    pub recommended: String,
    pub alternatives: Vec<String>,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum CategoryStrategy {
    Stay,
    Switch {
        category: String,
        avg_top10_ratings: u64,
    },
    BuildVolume,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRecommendation {
    #[serde(flatten)]
    pub strategy: CategoryStrategy,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryFitReport {
    pub current_category: CurrentCategory,
    pub alternatives: Vec<AlternativeCategory>,
    pub secondary_category: SecondaryCategory,
    pub recommendation: CategoryRecommendation,
    pub switching_considerations: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CategoryFitAnalyzer {
    categories: CategoryTable,
}

impl CategoryFitAnalyzer {
    pub fn new(categories: CategoryTable) -> Result<Self, ConfigError> {
        categories.validate()?;
        Ok(Self { categories })
    }

    pub fn analyze(&self, input: &CategoryFitInput) -> CategoryFitReport {
        let current_key = normalize_category(&input.current_category);
        let current = self.categories.profile_or_fallback(&current_key);
        let competitiveness = CategoryCompetitiveness::assess(input.ratings_count, &current);

        let alternatives: Vec<AlternativeCategory> = input
            .alternative_categories
            .iter()
            .map(|name| {
                let profile = self
                    .categories
                    .profile_or_fallback(&normalize_category(name));
                AlternativeCategory {
                    category: name.clone(),
                    density: profile.density,
                    avg_top10_ratings: profile.avg_top10_ratings,
                    competitiveness: CategoryCompetitiveness::assess(input.ratings_count, &profile),
                    easier_than_current: profile.avg_top10_ratings < current.avg_top10_ratings,
                }
            })
            .collect();

        tracing::debug!(
            category = %current_key,
            ratings = input.ratings_count,
            competitiveness = ?competitiveness,
            alternatives = alternatives.len(),
            "analyzed category fit"
        );

        CategoryFitReport {
            current_category: CurrentCategory {
                name: input.current_category.clone(),
                density: current.density,
                avg_top10_ratings: current.avg_top10_ratings,
                your_ratings: input.ratings_count,
                competitiveness,
            },
            secondary_category: self.secondary_category(&current_key),
            recommendation: recommend(&current, competitiveness, &alternatives),
            alternatives,
            switching_considerations: SWITCHING_CONSIDERATIONS
                .iter()
                .map(|note| note.to_string())
                .collect(),
        }
    }

    fn secondary_category(&self, primary: &str) -> SecondaryCategory {
        let suggestions = self.categories.pairing(primary);
        let recommended = suggestions
            .first()
            .cloned()
            .unwrap_or_else(|| "utilities".to_string());

        SecondaryCategory {
            rationale: format!(
                "'{}' complements '{}' and typically has lower competition, providing additional discovery surface.",
                recommended, primary
            ),
            recommended,
            alternatives: suggestions.iter().skip(1).take(2).cloned().collect(),
        }
    }
}

fn recommend(
    current: &CategoryProfile,
    competitiveness: CategoryCompetitiveness,
    alternatives: &[AlternativeCategory],
) -> CategoryRecommendation {
    if competitiveness.can_compete() {
        return CategoryRecommendation {
            strategy: CategoryStrategy::Stay,
            message: "Stay in current category - you have sufficient ratings to compete. \
                      Focus on optimizing metadata and visuals for higher conversion."
                .to_string(),
        };
    }

    let easiest = alternatives
        .iter()
        .filter(|alternative| alternative.easier_than_current)
        .min_by_key(|alternative| alternative.avg_top10_ratings);

    match easiest {
        Some(alternative) => CategoryRecommendation {
            message: format!(
                "Consider switching to '{}' - competition is lower (avg top 10: {} ratings vs {} in current category). \
                 Time this with a major app update.",
                alternative.category,
                format_count(alternative.avg_top10_ratings),
                format_count(current.avg_top10_ratings)
            ),
            strategy: CategoryStrategy::Switch {
                category: alternative.category.clone(),
                avg_top10_ratings: alternative.avg_top10_ratings,
            },
        },
        None => CategoryRecommendation {
            strategy: CategoryStrategy::BuildVolume,
            message: "Current category is appropriate but competitive. Focus on building ratings \
                      volume and long-tail keyword strategy to gain visibility gradually."
                .to_string(),
        },
    }
}

/// Rating count with `,` between thousands groups, e.g. `500,000`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
