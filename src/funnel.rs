use serde::{Deserialize, Serialize};

use crate::benchmarks::{
    CategoryTable, CompetitionTier, FunnelBenchmarkTable, StageThresholds,
};
use crate::error::ConfigError;
use crate::scoring::round_to;

/// Day-1 retention thresholds apply to every competition tier.
pub const RETENTION_GOOD: f64 = 0.25;
pub const RETENTION_AVERAGE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageAssessment {
    Poor,
    Average,
    Good,
    Excellent,
}

impl StageAssessment {
    pub fn classify(rate: f64, thresholds: &StageThresholds) -> Self {
        if rate >= thresholds.excellent {
            StageAssessment::Excellent
        } else if rate >= thresholds.good {
            StageAssessment::Good
        } else if rate >= thresholds.average {
            StageAssessment::Average
        } else {
            StageAssessment::Poor
        }
    }

    pub fn classify_retention(rate: f64) -> Self {
        if rate >= RETENTION_GOOD {
            StageAssessment::Good
        } else if rate >= RETENTION_AVERAGE {
            StageAssessment::Average
        } else {
            StageAssessment::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StageAssessment::Poor => "poor",
            StageAssessment::Average => "average",
            StageAssessment::Good => "good",
            StageAssessment::Excellent => "excellent",
        }
    }

    fn needs_attention(self) -> bool {
        matches!(self, StageAssessment::Poor | StageAssessment::Average)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelInput {
    pub impressions: u64,
    pub page_views: u64,
    pub installs: u64,
    pub day1_retention_rate: f64,
    /// Category name, density name or tier name.
    pub competition_tier: String,
}

impl Default for FunnelInput {
    fn default() -> Self {
        Self {
            impressions: 0,
            page_views: 0,
            installs: 0,
            day1_retention_rate: 0.0,
            competition_tier: CompetitionTier::Medium.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub problem: String,
    pub likely_causes: Vec<String>,
    pub fix_priority: Vec<String>,
}

impl Diagnosis {
    fn new(problem: &str, likely_causes: &[&str], fix_priority: &[&str]) -> Self {
        Self {
            problem: problem.to_string(),
            likely_causes: likely_causes.iter().map(|cause| cause.to_string()).collect(),
            fix_priority: fix_priority.iter().map(|fix| fix.to_string()).collect(),
        }
    }
}

fn impressions_diagnosis() -> Diagnosis {
    Diagnosis::new(
        "Users see your app in search but don't tap to learn more.",
        &[
            "App icon doesn't stand out in search results",
            "Title doesn't match search intent",
            "Subtitle doesn't communicate clear value",
            "Low star rating visible in search results",
            "First screenshot not compelling at thumbnail size",
        ],
        &[
            "App icon A/B test",
            "Title keyword optimization",
            "First screenshot redesign",
        ],
    )
}

fn page_views_diagnosis() -> Diagnosis {
    Diagnosis::new(
        "Users visit your page but don't install.",
        &[
            "Screenshots don't demonstrate clear value",
            "Description doesn't address user needs",
            "Negative reviews visible on product page",
            "App size too large (especially on cellular)",
            "Pricing friction (if paid app)",
            "No app preview video to demonstrate features",
        ],
        &[
            "Screenshot sequence redesign",
            "Description rewrite",
            "Review response strategy",
        ],
    )
}

fn retention_diagnosis() -> Diagnosis {
    Diagnosis::new(
        "Users install but don't come back.",
        &[
            "App doesn't deliver on the promise shown in screenshots/description",
            "Poor onboarding experience",
            "Missing core feature users expected",
            "Performance issues (slow, crashes)",
        ],
        &[
            "Onboarding optimization",
            "Feature gap analysis",
            "Performance profiling",
        ],
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStage {
    pub rate: f64,
    pub rate_pct: String,
    pub assessment: StageAssessment,
    pub benchmarks: StageThresholds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis_if_low: Option<Diagnosis>,
}

impl FunnelStage {
    fn new(rate: f64, benchmarks: StageThresholds, diagnosis_if_low: Option<Diagnosis>) -> Self {
        Self {
            rate: round_to(rate, 4),
            rate_pct: format!("{:.2}%", rate * 100.0),
            assessment: StageAssessment::classify(rate, &benchmarks),
            benchmarks,
            diagnosis_if_low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetentionStage {
    pub day1_rate: f64,
    pub day1_rate_pct: String,
    pub assessment: StageAssessment,
    pub diagnosis_if_low: Diagnosis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStages {
    pub impressions_to_page_views: FunnelStage,
    pub page_views_to_installs: FunnelStage,
    pub overall_conversion: FunnelStage,
    pub retention: RetentionStage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BottleneckStage {
    ImpressionsToPageViews,
    PageViewsToInstalls,
    Day1Retention,
    None,
}

impl BottleneckStage {
    pub fn label(self) -> &'static str {
        match self {
            BottleneckStage::ImpressionsToPageViews => "Impressions To Page Views",
            BottleneckStage::PageViewsToInstalls => "Page Views To Installs",
            BottleneckStage::Day1Retention => "Day-1 Retention",
            BottleneckStage::None => "None",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bottleneck {
    pub stage: BottleneckStage,
    pub label: String,
    pub assessment: StageAssessment,
    pub diagnosis: String,
    pub fix_priority: Vec<String>,
}

impl Bottleneck {
    fn candidate(stage: BottleneckStage, assessment: StageAssessment, diagnosis: &Diagnosis) -> Self {
        Self {
            stage,
            label: stage.label().to_string(),
            assessment,
            diagnosis: diagnosis.problem.clone(),
            fix_priority: diagnosis.fix_priority.clone(),
        }
    }

    fn none() -> Self {
        Self {
            stage: BottleneckStage::None,
            label: BottleneckStage::None.label().to_string(),
            assessment: StageAssessment::Good,
            diagnosis: "All funnel stages performing at or above benchmarks.".to_string(),
            fix_priority: Vec::new(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.stage == BottleneckStage::None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelCounts {
    pub impressions: u64,
    pub page_views: u64,
    pub installs: u64,
    pub day1_retention_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelReport {
    pub funnel_data: FunnelCounts,
    pub competition_tier: CompetitionTier,
    pub stages: FunnelStages,
    pub biggest_bottleneck: Bottleneck,
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct FunnelAnalyzer {
    benchmarks: FunnelBenchmarkTable,
    categories: CategoryTable,
}

impl FunnelAnalyzer {
    pub fn new(
        benchmarks: FunnelBenchmarkTable,
        categories: CategoryTable,
    ) -> Result<Self, ConfigError> {
        benchmarks.validate()?;
        categories.validate()?;
        Ok(Self {
            benchmarks,
            categories,
        })
    }

    pub fn resolve_tier(&self, selector: &str) -> CompetitionTier {
        CompetitionTier::resolve(selector, &self.categories)
    }

    pub fn analyze(&self, input: &FunnelInput) -> FunnelReport {
        let tier = self.resolve_tier(&input.competition_tier);
        let benchmarks = self.benchmarks.for_tier(tier);

        let imp_to_pv = ratio(input.page_views, input.impressions);
        let pv_to_install = ratio(input.installs, input.page_views);
        let overall_cvr = ratio(input.installs, input.impressions);
        let retention = input.day1_retention_rate;

        let stages = FunnelStages {
            impressions_to_page_views: FunnelStage::new(
                imp_to_pv,
                benchmarks.impressions_to_page_views,
                Some(impressions_diagnosis()),
            ),
            page_views_to_installs: FunnelStage::new(
                pv_to_install,
                benchmarks.page_views_to_installs,
                Some(page_views_diagnosis()),
            ),
            overall_conversion: FunnelStage::new(overall_cvr, benchmarks.overall_cvr, None),
            retention: RetentionStage {
                day1_rate: round_to(retention, 4),
                day1_rate_pct: format!("{:.1}%", retention * 100.0),
                assessment: StageAssessment::classify_retention(retention),
                diagnosis_if_low: retention_diagnosis(),
            },
        };

        let bottleneck = identify_bottleneck(&stages);
        tracing::debug!(
            tier = tier.label(),
            imp_to_pv,
            pv_to_install,
            overall_cvr,
            bottleneck = bottleneck.stage.label(),
            "analyzed conversion funnel"
        );

        let position = match stages.overall_conversion.assessment {
            StageAssessment::Good | StageAssessment::Excellent => "above",
            StageAssessment::Poor | StageAssessment::Average => "below",
        };
        let summary = format!(
            "Overall CVR: {:.2}% ({} category average). Biggest opportunity: {} - {}",
            overall_cvr * 100.0,
            position,
            bottleneck.label,
            bottleneck.diagnosis
        );

        FunnelReport {
            funnel_data: FunnelCounts {
                impressions: input.impressions,
                page_views: input.page_views,
                installs: input.installs,
                day1_retention_rate: input.day1_retention_rate,
            },
            competition_tier: tier,
            stages,
            biggest_bottleneck: bottleneck,
            summary,
        }
    }
}

/// Stage conversion rate; zero when nothing entered the stage. Counts that
/// exceed their upstream stage are capped at 1.
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    (numerator as f64 / denominator as f64).min(1.0)
}

/// Picks the single worst stage: poor before average, then funnel order
/// (impressions, page views, retention). Retention only qualifies when poor.
pub fn identify_bottleneck(stages: &FunnelStages) -> Bottleneck {
    let mut candidates = Vec::new();

    let conversion_stages = [
        (
            BottleneckStage::ImpressionsToPageViews,
            &stages.impressions_to_page_views,
        ),
        (
            BottleneckStage::PageViewsToInstalls,
            &stages.page_views_to_installs,
        ),
    ];
    for (kind, stage) in conversion_stages {
        if !stage.assessment.needs_attention() {
            continue;
        }
        if let Some(diagnosis) = stage.diagnosis_if_low.as_ref() {
            candidates.push(Bottleneck::candidate(kind, stage.assessment, diagnosis));
        }
    }

    if stages.retention.assessment == StageAssessment::Poor {
        candidates.push(Bottleneck::candidate(
            BottleneckStage::Day1Retention,
            StageAssessment::Poor,
            &stages.retention.diagnosis_if_low,
        ));
    }

    candidates.sort_by_key(|candidate| candidate.assessment != StageAssessment::Poor);
    candidates.into_iter().next().unwrap_or_else(Bottleneck::none)
}
