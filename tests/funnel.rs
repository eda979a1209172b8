use aso_health::benchmarks::{
    CategoryTable, CompetitionTier, FunnelBenchmarkTable, StageThresholds,
};
use aso_health::funnel::{BottleneckStage, StageAssessment};
use aso_health::{ConfigError, FunnelAnalyzer, FunnelInput};

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}

fn analyzer() -> FunnelAnalyzer {
    FunnelAnalyzer::new(FunnelBenchmarkTable::default(), CategoryTable::default()).unwrap()
}

fn funnel(impressions: u64, page_views: u64, installs: u64, retention: f64, tier: &str) -> FunnelInput {
    FunnelInput {
        impressions,
        page_views,
        installs,
        day1_retention_rate: retention,
        competition_tier: tier.to_string(),
    }
}

#[test]
fn weak_tap_through_is_the_bottleneck() {
    let report = analyzer().analyze(&funnel(100_000, 5_000, 1_500, 0.10, "medium_competition"));
    let stages = &report.stages;

    assert_eq!(report.competition_tier, CompetitionTier::Medium);
    assert!(approx(stages.impressions_to_page_views.rate, 0.05));
    assert_eq!(stages.impressions_to_page_views.assessment, StageAssessment::Poor);
    assert_eq!(stages.impressions_to_page_views.rate_pct, "5.00%");
    assert!(approx(stages.page_views_to_installs.rate, 0.3));
    assert!(approx(stages.overall_conversion.rate, 0.015));
    assert_eq!(stages.retention.assessment, StageAssessment::Poor);

    let bottleneck = &report.biggest_bottleneck;
    assert_eq!(bottleneck.stage, BottleneckStage::ImpressionsToPageViews);
    assert_eq!(bottleneck.label, "Impressions To Page Views");
    assert_eq!(bottleneck.assessment, StageAssessment::Poor);
    assert_eq!(
        bottleneck.diagnosis,
        "Users see your app in search but don't tap to learn more."
    );
    assert_eq!(bottleneck.fix_priority[0], "App icon A/B test");
    assert!(report.summary.starts_with("Overall CVR: 1.50% (below category average)"));
}

#[test]
fn zero_denominators_yield_zero_rates() {
    let report = analyzer().analyze(&funnel(0, 0, 0, 0.0, "medium_competition"));
    let stages = &report.stages;

    assert!(approx(stages.impressions_to_page_views.rate, 0.0));
    assert!(approx(stages.page_views_to_installs.rate, 0.0));
    assert!(approx(stages.overall_conversion.rate, 0.0));
    assert_eq!(stages.overall_conversion.assessment, StageAssessment::Poor);

    let no_views = analyzer().analyze(&funnel(50_000, 0, 0, 0.3, "medium_competition"));
    assert!(approx(no_views.stages.page_views_to_installs.rate, 0.0));
    assert!(approx(no_views.stages.overall_conversion.rate, 0.0));
}

#[test]
fn rates_stay_within_unit_interval() {
    let report = analyzer().analyze(&funnel(1_000, 5_000, 9_000, 0.4, "low"));
    let stages = &report.stages;

    for rate in [
        stages.impressions_to_page_views.rate,
        stages.page_views_to_installs.rate,
        stages.overall_conversion.rate,
    ] {
        assert!((0.0..=1.0).contains(&rate));
    }
    assert!(approx(stages.impressions_to_page_views.rate, 1.0));
}

#[test]
fn poor_stage_outranks_earlier_average_stage() {
    // imp->pv 0.10 is average, pv->install 0.10 is poor at medium competition.
    let report = analyzer().analyze(&funnel(100_000, 10_000, 1_000, 0.30, "medium_competition"));

    assert_eq!(
        report.stages.impressions_to_page_views.assessment,
        StageAssessment::Average
    );
    assert_eq!(
        report.biggest_bottleneck.stage,
        BottleneckStage::PageViewsToInstalls
    );
    assert_eq!(report.biggest_bottleneck.assessment, StageAssessment::Poor);
}

#[test]
fn equal_severity_keeps_funnel_order() {
    let report = analyzer().analyze(&funnel(100_000, 10_000, 4_000, 0.30, "medium_competition"));

    assert_eq!(
        report.stages.page_views_to_installs.assessment,
        StageAssessment::Average
    );
    assert_eq!(
        report.biggest_bottleneck.stage,
        BottleneckStage::ImpressionsToPageViews
    );
    assert_eq!(report.biggest_bottleneck.assessment, StageAssessment::Average);
}

#[test]
fn poor_retention_is_flagged_when_conversion_is_healthy() {
    let report = analyzer().analyze(&funnel(100_000, 20_000, 14_000, 0.05, "medium_competition"));

    assert_eq!(
        report.stages.impressions_to_page_views.assessment,
        StageAssessment::Excellent
    );
    assert_eq!(report.biggest_bottleneck.stage, BottleneckStage::Day1Retention);
    assert_eq!(report.biggest_bottleneck.label, "Day-1 Retention");
    assert_eq!(
        report.biggest_bottleneck.fix_priority,
        vec![
            "Onboarding optimization".to_string(),
            "Feature gap analysis".to_string(),
            "Performance profiling".to_string(),
        ]
    );
}

#[test]
fn healthy_funnel_has_no_bottleneck() {
    // Average retention alone never qualifies as a bottleneck.
    let report = analyzer().analyze(&funnel(100_000, 20_000, 14_000, 0.20, "medium_competition"));

    assert_eq!(report.stages.retention.assessment, StageAssessment::Average);
    assert!(report.biggest_bottleneck.is_none());
    assert_eq!(report.biggest_bottleneck.label, "None");
    assert!(report.biggest_bottleneck.fix_priority.is_empty());
    assert!(report.summary.contains("(above category average)"));
}

#[test]
fn retention_uses_fixed_thresholds() {
    assert_eq!(StageAssessment::classify_retention(0.25), StageAssessment::Good);
    assert_eq!(StageAssessment::classify_retention(0.15), StageAssessment::Average);
    assert_eq!(StageAssessment::classify_retention(0.149), StageAssessment::Poor);
}

#[test]
fn stage_classification_is_inclusive_at_thresholds() {
    let thresholds = StageThresholds::new(0.05, 0.08, 0.12, 0.18);

    assert_eq!(StageAssessment::classify(0.18, &thresholds), StageAssessment::Excellent);
    assert_eq!(StageAssessment::classify(0.12, &thresholds), StageAssessment::Good);
    assert_eq!(StageAssessment::classify(0.08, &thresholds), StageAssessment::Average);
    assert_eq!(StageAssessment::classify(0.079, &thresholds), StageAssessment::Poor);
}

#[test]
fn competition_tier_resolves_from_categories_and_names() {
    let analyzer = analyzer();

    assert_eq!(analyzer.resolve_tier("games"), CompetitionTier::High);
    assert_eq!(analyzer.resolve_tier("Photo_Video"), CompetitionTier::High);
    assert_eq!(analyzer.resolve_tier("Food&Drink"), CompetitionTier::Low);
    assert_eq!(analyzer.resolve_tier("Food & Drink"), CompetitionTier::Medium);
    assert_eq!(analyzer.resolve_tier("productivity"), CompetitionTier::Medium);
    assert_eq!(analyzer.resolve_tier("high_competition"), CompetitionTier::High);
    assert_eq!(analyzer.resolve_tier("low_competition"), CompetitionTier::Low);
    assert_eq!(analyzer.resolve_tier("very_high"), CompetitionTier::High);
    assert_eq!(analyzer.resolve_tier("low"), CompetitionTier::Low);
    assert_eq!(analyzer.resolve_tier("astrology"), CompetitionTier::Medium);
}

#[test]
fn tier_changes_the_benchmarks_applied() {
    let high = analyzer().analyze(&funnel(100_000, 7_000, 3_000, 0.3, "games"));
    let medium = analyzer().analyze(&funnel(100_000, 7_000, 3_000, 0.3, "business"));

    assert_eq!(high.competition_tier, CompetitionTier::High);
    assert_eq!(
        high.stages.impressions_to_page_views.assessment,
        StageAssessment::Average
    );
    assert_eq!(
        medium.stages.impressions_to_page_views.assessment,
        StageAssessment::Poor
    );
}

#[test]
fn missing_tier_defaults_to_medium() {
    let input: FunnelInput =
        serde_json::from_str(r#"{"impressions": 1000, "page_views": 100}"#).unwrap();
    let report = analyzer().analyze(&input);

    assert_eq!(report.competition_tier, CompetitionTier::Medium);
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["competition_tier"], "medium_competition");
}

#[test]
fn thresholds_must_ascend() {
    let mut table = FunnelBenchmarkTable::default();
    table.low_competition.page_views_to_installs = StageThresholds::new(0.25, 0.40, 0.40, 0.70);

    let err = FunnelAnalyzer::new(table, CategoryTable::default()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::FunnelThresholds {
            tier: "low_competition",
            stage: "page_views_to_installs"
        }
    ));
}
