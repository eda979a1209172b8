use serde::{Deserialize, Serialize};

use crate::benchmarks::{Benchmark, BenchmarkTable};
use crate::scoring::{clamp_sub_score, finalize_total, interpolate};

const CONVERSION_CAP: f64 = 70.0;
const CONVERSION_FLOOR: f64 = 35.0;
const VELOCITY_CAP: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadsTrend {
    Up,
    #[default]
    Stable,
    Down,
}

impl DownloadsTrend {
    pub fn bonus(self) -> f64 {
        match self {
            DownloadsTrend::Up => 10.0,
            DownloadsTrend::Stable => 5.0,
            DownloadsTrend::Down => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSnapshot {
    /// Impression-to-install rate on a 0-1 scale.
    pub impression_to_install: f64,
    pub downloads_last_30_days: u64,
    pub downloads_trend: DownloadsTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionScore {
    pub conversion_rate_score: f64,
    pub download_velocity_score: f64,
    pub trend_score: f64,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct ConversionScorer {
    conversion_rate: Benchmark,
}

impl ConversionScorer {
    pub fn new(benchmarks: &BenchmarkTable) -> Self {
        Self {
            conversion_rate: benchmarks.conversion_rate,
        }
    }

    pub fn score(&self, snapshot: &ConversionSnapshot) -> ConversionScore {
        let conversion_rate_score = clamp_sub_score(
            interpolate(
                snapshot.impression_to_install,
                &self.conversion_rate,
                CONVERSION_FLOOR,
                CONVERSION_CAP,
            ),
            CONVERSION_CAP,
        );
        let download_velocity_score = match snapshot.downloads_last_30_days {
            n if n > 10_000 => VELOCITY_CAP,
            n if n > 1_000 => 15.0,
            n if n > 100 => 10.0,
            _ => 5.0,
        };
        let trend_score = snapshot.downloads_trend.bonus();

        ConversionScore {
            conversion_rate_score,
            download_velocity_score,
            trend_score,
            total: finalize_total(&[conversion_rate_score, download_velocity_score, trend_score]),
        }
    }
}
