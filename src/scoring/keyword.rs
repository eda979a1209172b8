use serde::{Deserialize, Serialize};

use crate::benchmarks::{Benchmark, BenchmarkTable};
use crate::scoring::{clamp_sub_score, finalize_total, interpolate};

const TOP_10_CAP: f64 = 50.0;
const TOP_10_FLOOR: f64 = 25.0;
const TOP_50_CAP: f64 = 30.0;
const TOP_50_FLOOR: f64 = 15.0;
const COVERAGE_CAP: f64 = 10.0;
const TREND_CAP: f64 = 10.0;

/// Top-100 rankings needed for full coverage credit.
const FULL_COVERAGE_KEYWORDS: f64 = 30.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSnapshot {
    pub top_10: u32,
    pub top_50: u32,
    pub top_100: u32,
    pub improving_keywords: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordScore {
    pub top_10_score: f64,
    pub top_50_score: f64,
    pub coverage_score: f64,
    pub trend_score: f64,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct KeywordScorer {
    keywords_top_10: Benchmark,
    keywords_top_50: Benchmark,
}

impl KeywordScorer {
    pub fn new(benchmarks: &BenchmarkTable) -> Self {
        Self {
            keywords_top_10: benchmarks.keywords_top_10,
            keywords_top_50: benchmarks.keywords_top_50,
        }
    }

    pub fn score(&self, snapshot: &KeywordSnapshot) -> KeywordScore {
        let top_10_score = clamp_sub_score(
            interpolate(
                f64::from(snapshot.top_10),
                &self.keywords_top_10,
                TOP_10_FLOOR,
                TOP_10_CAP,
            ),
            TOP_10_CAP,
        );
        let top_50_score = clamp_sub_score(
            interpolate(
                f64::from(snapshot.top_50),
                &self.keywords_top_50,
                TOP_50_FLOOR,
                TOP_50_CAP,
            ),
            TOP_50_CAP,
        );
        let coverage_score = clamp_sub_score(
            f64::from(snapshot.top_100) / FULL_COVERAGE_KEYWORDS * COVERAGE_CAP,
            COVERAGE_CAP,
        );
        let trend_score = match snapshot.improving_keywords {
            n if n > 5 => TREND_CAP,
            n if n > 0 => 5.0,
            _ => 0.0,
        };

        KeywordScore {
            top_10_score,
            top_50_score,
            coverage_score,
            trend_score,
            total: finalize_total(&[top_10_score, top_50_score, coverage_score, trend_score]),
        }
    }
}
