use serde::{Deserialize, Serialize};

use crate::benchmarks::{Benchmark, BenchmarkTable};
use crate::scoring::{clamp_sub_score, finalize_total, interpolate};

const QUALITY_CAP: f64 = 50.0;
const QUALITY_FLOOR: f64 = 30.0;
const VOLUME_CAP: f64 = 30.0;
const VOLUME_FLOOR: f64 = 15.0;
const VELOCITY_CAP: f64 = 20.0;

/// Ratings below the benchmark minimum but at or above this still earn the
/// upper of the two low bands.
const FAIR_RATING: f64 = 3.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingsSnapshot {
    /// Star average on a 0-5 scale.
    pub average_rating: f64,
    pub total_ratings: u64,
    pub recent_ratings_30d: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingsScore {
    pub rating_quality_score: f64,
    pub rating_volume_score: f64,
    pub velocity_score: f64,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct RatingsScorer {
    average_rating: Benchmark,
    ratings_count: Benchmark,
}

impl RatingsScorer {
    pub fn new(benchmarks: &BenchmarkTable) -> Self {
        Self {
            average_rating: benchmarks.average_rating,
            ratings_count: benchmarks.ratings_count,
        }
    }

    pub fn score(&self, snapshot: &RatingsSnapshot) -> RatingsScore {
        let rating_quality_score =
            clamp_sub_score(self.quality_score(snapshot.average_rating), QUALITY_CAP);
        let rating_volume_score = clamp_sub_score(
            interpolate(
                snapshot.total_ratings as f64,
                &self.ratings_count,
                VOLUME_FLOOR,
                VOLUME_CAP,
            ),
            VOLUME_CAP,
        );
        let velocity_score = clamp_sub_score(velocity_score(snapshot.recent_ratings_30d), VELOCITY_CAP);

        RatingsScore {
            rating_quality_score,
            rating_volume_score,
            velocity_score,
            total: finalize_total(&[rating_quality_score, rating_volume_score, velocity_score]),
        }
    }

    fn quality_score(&self, average_rating: f64) -> f64 {
        if average_rating >= self.average_rating.min {
            interpolate(average_rating, &self.average_rating, QUALITY_FLOOR, QUALITY_CAP)
        } else if average_rating >= FAIR_RATING {
            20.0
        } else {
            10.0
        }
    }
}

fn velocity_score(recent_ratings: u64) -> f64 {
    match recent_ratings {
        n if n > 100 => 20.0,
        n if n > 50 => 15.0,
        n if n > 10 => 10.0,
        _ => 5.0,
    }
}
