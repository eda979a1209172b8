use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::benchmarks::{BenchmarkTable, CategoryTable, FunnelBenchmarkTable};
use crate::error::ConfigError;
use crate::listing::Platform;
use crate::scoring::DimensionWeights;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub platform: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            platform: Platform::Apple.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsoConfig {
    pub weights: DimensionWeights,
    pub benchmarks: BenchmarkTable,
    pub categories: CategoryTable,
    pub funnel: FunnelBenchmarkTable,
    pub listing: ListingConfig,
}

impl AsoConfig {
    /// Loads from `path`, `ASO_CONFIG_PATH` or `config/aso.toml`, falling back
    /// to built-in defaults when no file exists, then applies environment
    /// overrides and validates the result.
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                tracing::info!(path = %path.display(), "loaded config");
                toml::from_str(&contents)?
            }
            _ => AsoConfig::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AsoConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        self.benchmarks.validate()?;
        self.categories.validate()?;
        self.funnel.validate()?;
        self.listing.platform.parse::<Platform>()?;
        Ok(())
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(value) = env_u32("ASO_WEIGHT_METADATA") {
            self.weights.metadata_quality = value;
        }
        if let Some(value) = env_u32("ASO_WEIGHT_RATINGS") {
            self.weights.ratings_reviews = value;
        }
        if let Some(value) = env_u32("ASO_WEIGHT_KEYWORDS") {
            self.weights.keyword_performance = value;
        }
        if let Some(value) = env_u32("ASO_WEIGHT_CONVERSION") {
            self.weights.conversion_metrics = value;
        }
        if let Ok(platform) = env::var("ASO_PLATFORM") {
            if !platform.trim().is_empty() {
                self.listing.platform = platform;
            }
        }
    }
}

fn env_u32(name: &str) -> Option<u32> {
    env::var(name).ok().and_then(|value| value.trim().parse::<u32>().ok())
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ASO_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/aso.toml")))
}
