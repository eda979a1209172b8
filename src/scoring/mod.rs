pub mod aggregate;
pub mod conversion;
pub mod keyword;
pub mod metadata;
pub mod ratings;

pub use aggregate::{DimensionScore, DimensionScores, DimensionWeights, ScoreAggregator, ScoreBreakdown};
pub use conversion::{ConversionScore, ConversionScorer, ConversionSnapshot, DownloadsTrend};
pub use keyword::{KeywordScore, KeywordScorer, KeywordSnapshot};
pub use metadata::{MetadataScore, MetadataScorer, MetadataSnapshot};
pub use ratings::{RatingsScore, RatingsScorer, RatingsSnapshot};

use crate::benchmarks::Benchmark;

/// Maps `value` onto `[floor, cap]` between a benchmark's `min` and
/// `target`. At or above `target` the cap is awarded; below `min` the score
/// scales proportionally from zero up to `floor`.
pub(crate) fn interpolate(value: f64, benchmark: &Benchmark, floor: f64, cap: f64) -> f64 {
    if value >= benchmark.target {
        cap
    } else if value >= benchmark.min {
        let proportion = (value - benchmark.min) / (benchmark.target - benchmark.min);
        floor + proportion * (cap - floor)
    } else if benchmark.min > 0.0 {
        (value / benchmark.min) * floor
    } else {
        0.0
    }
}

pub(crate) fn clamp_sub_score(value: f64, cap: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(cap)
}

/// Dimension totals are reported with one decimal and never leave `[0, 100]`.
pub(crate) fn finalize_total(sub_scores: &[f64]) -> f64 {
    round1(sub_scores.iter().sum::<f64>()).max(0.0).min(100.0)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
