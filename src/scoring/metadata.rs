use serde::{Deserialize, Serialize};

use crate::benchmarks::{Benchmark, BenchmarkTable, DensityBenchmark};
use crate::scoring::{clamp_sub_score, finalize_total};

const TITLE_CAP: f64 = 35.0;
const DESCRIPTION_CAP: f64 = 35.0;
const DENSITY_CAP: f64 = 30.0;

/// Titles at or below this many characters leave store space unused.
const TITLE_LENGTH_FLOOR: u32 = 25;
const TITLE_LENGTH_PENALTY: f64 = 5.0;
const DESCRIPTION_QUALITY_BONUS: f64 = 10.0;
const UNDER_DENSITY_CAP: f64 = 20.0;
const OVER_DENSITY_PENALTY: f64 = 5.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSnapshot {
    pub title_keyword_count: u32,
    pub title_length: u32,
    pub description_length: u32,
    /// Editorial quality on a 0-1 scale.
    pub description_quality: f64,
    /// Keyword density in percent.
    pub keyword_density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataScore {
    pub title_score: f64,
    pub description_score: f64,
    pub keyword_density_score: f64,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct MetadataScorer {
    title_keyword_usage: Benchmark,
    description_length: Benchmark,
    keyword_density: DensityBenchmark,
}

impl MetadataScorer {
    pub fn new(benchmarks: &BenchmarkTable) -> Self {
        Self {
            title_keyword_usage: benchmarks.title_keyword_usage,
            description_length: benchmarks.description_length,
            keyword_density: benchmarks.keyword_density,
        }
    }

    pub fn score(&self, snapshot: &MetadataSnapshot) -> MetadataScore {
        let title_score = clamp_sub_score(self.title_score(snapshot), TITLE_CAP);
        let description_score = clamp_sub_score(self.description_score(snapshot), DESCRIPTION_CAP);
        let keyword_density_score =
            clamp_sub_score(self.density_score(snapshot.keyword_density), DENSITY_CAP);

        MetadataScore {
            title_score,
            description_score,
            keyword_density_score,
            total: finalize_total(&[title_score, description_score, keyword_density_score]),
        }
    }

    fn title_score(&self, snapshot: &MetadataSnapshot) -> f64 {
        let keywords = f64::from(snapshot.title_keyword_count);
        let tier = if keywords >= self.title_keyword_usage.target {
            35.0
        } else if keywords >= self.title_keyword_usage.min {
            25.0
        } else {
            10.0
        };

        if snapshot.title_length > TITLE_LENGTH_FLOOR {
            tier
        } else {
            tier - TITLE_LENGTH_PENALTY
        }
    }

    fn description_score(&self, snapshot: &MetadataSnapshot) -> f64 {
        let length = f64::from(snapshot.description_length);
        let tier = if length >= self.description_length.target {
            25.0
        } else if length >= self.description_length.min {
            15.0
        } else {
            5.0
        };

        tier + snapshot.description_quality * DESCRIPTION_QUALITY_BONUS
    }

    fn density_score(&self, density: f64) -> f64 {
        let benchmark = &self.keyword_density;
        if density >= benchmark.min && density <= benchmark.optimal {
            DENSITY_CAP
        } else if density < benchmark.min {
            (density / benchmark.min) * UNDER_DENSITY_CAP
        } else {
            let excess = density - benchmark.optimal;
            (DENSITY_CAP - excess * OVER_DENSITY_PENALTY).max(0.0)
        }
    }
}
