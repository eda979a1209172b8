use aso_health::recommendations::{Priority, RecommendationEngine};
use aso_health::report::{identify_strengths, identify_weaknesses};
use aso_health::scoring::{
    round1, ConversionSnapshot, DimensionScores, DimensionWeights, DownloadsTrend, KeywordSnapshot,
    MetadataSnapshot, RatingsSnapshot, ScoreAggregator,
};
use aso_health::{
    calculate_aso_score, AsoConfig, AsoInputs, AsoScorer, ConfigError, Dimension, HealthStatus,
};

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}

fn scores(metadata: f64, ratings: f64, keywords: f64, conversion: f64) -> DimensionScores {
    DimensionScores {
        metadata_quality: metadata,
        ratings_reviews: ratings,
        keyword_performance: keywords,
        conversion_metrics: conversion,
    }
}

fn sample_inputs() -> AsoInputs {
    AsoInputs {
        metadata: MetadataSnapshot {
            title_keyword_count: 2,
            title_length: 28,
            description_length: 2200,
            description_quality: 0.8,
            keyword_density: 4.0,
        },
        ratings: RatingsSnapshot {
            average_rating: 3.0,
            total_ratings: 10,
            recent_ratings_30d: 2,
        },
        keyword_performance: KeywordSnapshot {
            top_10: 6,
            top_50: 10,
            top_100: 15,
            improving_keywords: 3,
        },
        conversion: ConversionSnapshot {
            impression_to_install: 0.06,
            downloads_last_30_days: 5000,
            downloads_trend: DownloadsTrend::Up,
        },
    }
}

#[test]
fn weights_must_sum_to_one_hundred() {
    let weights = DimensionWeights {
        metadata_quality: 40,
        ratings_reviews: 20,
        keyword_performance: 20,
        conversion_metrics: 10,
    };

    let err = ScoreAggregator::new(weights).unwrap_err();
    assert!(matches!(err, ConfigError::WeightSum { sum: 90 }));

    let mut config = AsoConfig::default();
    config.weights = weights;
    assert!(AsoScorer::new(&config).is_err());
}

#[test]
fn custom_weights_change_the_overall_score() {
    let weights = DimensionWeights {
        metadata_quality: 40,
        ratings_reviews: 20,
        keyword_performance: 20,
        conversion_metrics: 20,
    };
    let aggregator = ScoreAggregator::new(weights).unwrap();
    let (overall, breakdown) = aggregator.aggregate(&scores(100.0, 50.0, 50.0, 50.0));

    assert!(approx(overall, 70.0));
    assert_eq!(breakdown.metadata_quality.weight, 40);
    assert!(approx(breakdown.metadata_quality.weighted_contribution, 40.0));
}

#[test]
fn aggregate_rounds_overall_and_contributions() {
    let aggregator = ScoreAggregator::new(DimensionWeights::default()).unwrap();
    let (overall, breakdown) = aggregator.aggregate(&scores(98.0, 26.5, 67.5, 77.5));

    assert!(approx(overall, 67.4));
    assert!(approx(breakdown.metadata_quality.weighted_contribution, 24.5));
    assert!(approx(breakdown.ratings_reviews.weighted_contribution, 6.6));
    assert!(approx(breakdown.keyword_performance.weighted_contribution, 16.9));
    assert!(approx(breakdown.conversion_metrics.weighted_contribution, 19.4));
    assert!(approx(breakdown.ratings_reviews.score, 26.5));
}

#[test]
fn exact_halves_round_away_from_zero() {
    assert!(approx(round1(20.25), 20.3));
    assert!(approx(round1(-0.25), -0.3));

    let aggregator = ScoreAggregator::new(DimensionWeights::default()).unwrap();
    let (overall, breakdown) = aggregator.aggregate(&scores(81.0, 81.0, 81.0, 81.0));

    assert!(approx(breakdown.metadata_quality.weighted_contribution, 20.3));
    assert!(approx(breakdown.conversion_metrics.weighted_contribution, 20.3));
    assert!(approx(overall, 81.0));
}

#[test]
fn health_status_lower_bounds_are_inclusive() {
    assert_eq!(HealthStatus::from_score(100.0), HealthStatus::Excellent);
    assert_eq!(HealthStatus::from_score(80.0), HealthStatus::Excellent);
    assert_eq!(HealthStatus::from_score(79.9), HealthStatus::Good);
    assert_eq!(HealthStatus::from_score(65.0), HealthStatus::Good);
    assert_eq!(HealthStatus::from_score(64.9), HealthStatus::Fair);
    assert_eq!(HealthStatus::from_score(50.0), HealthStatus::Fair);
    assert_eq!(HealthStatus::from_score(49.9), HealthStatus::Poor);
    assert_eq!(HealthStatus::from_score(0.0), HealthStatus::Poor);
}

#[test]
fn boundary_scores_are_neither_strength_nor_weakness() {
    let aggregator = ScoreAggregator::new(DimensionWeights::default()).unwrap();
    let (_, breakdown) = aggregator.aggregate(&scores(75.0, 60.0, 74.9, 59.9));

    assert_eq!(identify_strengths(&breakdown), vec!["Metadata Quality: 75.0/100"]);
    assert_eq!(
        identify_weaknesses(&breakdown),
        vec!["Conversion Metrics: 59.9/100 - needs improvement"]
    );
}

#[test]
fn adequate_band_uses_fallback_messages() {
    let aggregator = ScoreAggregator::new(DimensionWeights::default()).unwrap();
    let (_, breakdown) = aggregator.aggregate(&scores(70.0, 70.0, 70.0, 70.0));

    assert_eq!(
        identify_strengths(&breakdown),
        vec!["Focus on building strengths across all areas"]
    );
    assert_eq!(identify_weaknesses(&breakdown), vec!["All areas performing adequately"]);
}

#[test]
fn recommendations_follow_score_thresholds() {
    let engine = RecommendationEngine::new();
    let generated = engine.generate(&scores(50.0, 70.0, 40.0, 90.0));

    let summary: Vec<(Dimension, Priority)> = generated
        .iter()
        .map(|recommendation| (recommendation.category, recommendation.priority))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Dimension::MetadataQuality, Priority::High),
            (Dimension::RatingsReviews, Priority::Medium),
            (Dimension::KeywordPerformance, Priority::High),
        ]
    );
    assert_eq!(generated[0].action, "Optimize app title and description");

    let boundaries = engine.generate(&scores(60.0, 80.0, 79.9, 59.9));
    let summary: Vec<(Dimension, Priority)> = boundaries
        .iter()
        .map(|recommendation| (recommendation.category, recommendation.priority))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Dimension::MetadataQuality, Priority::Medium),
            (Dimension::KeywordPerformance, Priority::Medium),
            (Dimension::ConversionMetrics, Priority::High),
        ]
    );
}

#[test]
fn priority_actions_put_high_first_then_dimension_order() {
    let engine = RecommendationEngine::new();
    let generated = engine.generate(&scores(50.0, 70.0, 40.0, 90.0));
    let prioritized = engine.prioritize(&generated);

    let order: Vec<Dimension> = prioritized.iter().map(|r| r.category).collect();
    assert_eq!(
        order,
        vec![
            Dimension::MetadataQuality,
            Dimension::KeywordPerformance,
            Dimension::RatingsReviews,
        ]
    );
}

#[test]
fn priority_ties_ignore_severity() {
    let engine = RecommendationEngine::new();
    let generated = engine.generate(&scores(55.0, 40.0, 30.0, 10.0));
    let prioritized = engine.prioritize(&generated);

    assert_eq!(generated.len(), 4);
    let order: Vec<Dimension> = prioritized.iter().map(|r| r.category).collect();
    assert_eq!(
        order,
        vec![
            Dimension::MetadataQuality,
            Dimension::RatingsReviews,
            Dimension::KeywordPerformance,
        ]
    );
}

#[test]
fn full_report_for_mixed_listing() {
    let scorer = AsoScorer::new(&AsoConfig::default()).unwrap();
    let report = scorer.calculate_overall_score(&sample_inputs());

    assert!(approx(report.score_breakdown.metadata_quality.score, 98.0));
    assert!(approx(report.score_breakdown.ratings_reviews.score, 26.5));
    assert!(approx(report.score_breakdown.keyword_performance.score, 67.5));
    assert!(approx(report.score_breakdown.conversion_metrics.score, 77.5));
    assert!(approx(report.overall_score, 67.4));
    assert_eq!(report.health_status, HealthStatus::Good);
    assert_eq!(
        report.health_summary,
        "Good - Competitive ASO with room for improvement"
    );
    assert_eq!(
        report.strengths,
        vec!["Metadata Quality: 98.0/100", "Conversion Metrics: 77.5/100"]
    );
    assert_eq!(
        report.weaknesses,
        vec!["Ratings Reviews: 26.5/100 - needs improvement"]
    );
    assert_eq!(report.recommendations.len(), 3);
    assert_eq!(report.priority_actions[0].category, Dimension::RatingsReviews);
    assert_eq!(report.priority_actions[0].priority, Priority::High);
}

#[test]
fn scoring_is_idempotent() {
    let scorer = AsoScorer::new(&AsoConfig::default()).unwrap();
    let inputs = sample_inputs();

    let first = scorer.calculate_overall_score(&inputs);
    let second = scorer.calculate_overall_score(&inputs);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn scorer_can_be_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AsoScorer>();

    let scorer = AsoScorer::new(&AsoConfig::default()).unwrap();
    let inputs = sample_inputs();
    let expected = scorer.calculate_overall_score(&inputs);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| scorer.calculate_overall_score(&inputs)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn convenience_entry_point_uses_defaults() {
    let report = calculate_aso_score(&AsoInputs::default()).unwrap();

    assert!(approx(report.score_breakdown.metadata_quality.score, 10.0));
    assert!(approx(report.score_breakdown.ratings_reviews.score, 15.0));
    assert!(approx(report.score_breakdown.keyword_performance.score, 0.0));
    assert!(approx(report.score_breakdown.conversion_metrics.score, 10.0));
    assert!(approx(report.overall_score, 8.8));
    assert_eq!(report.health_status, HealthStatus::Poor);
    assert_eq!(report.priority_actions.len(), 3);
}

#[test]
fn report_serializes_enums_in_snake_case() {
    let report = calculate_aso_score(&sample_inputs()).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["health_status"], "good");
    assert_eq!(value["priority_actions"][0]["priority"], "high");
    assert_eq!(value["priority_actions"][0]["category"], "ratings_reviews");
    assert_eq!(value["score_breakdown"]["metadata_quality"]["weight"], 25);
}
