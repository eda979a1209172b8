// Sets process-wide environment variables; keep to a single test.

use aso_health::{AsoConfig, ConfigError, Platform};
use std::env;

const OVERRIDE_VARS: [&str; 6] = [
    "ASO_CONFIG_PATH",
    "ASO_WEIGHT_METADATA",
    "ASO_WEIGHT_RATINGS",
    "ASO_WEIGHT_KEYWORDS",
    "ASO_WEIGHT_CONVERSION",
    "ASO_PLATFORM",
];

#[test]
fn environment_overrides_apply_on_load() {
    let saved: Vec<(&str, Option<String>)> = OVERRIDE_VARS
        .iter()
        .map(|name| (*name, env::var(name).ok()))
        .collect();
    for name in OVERRIDE_VARS {
        env::remove_var(name);
    }

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("aso.toml");
    AsoConfig::default().write(&config_path).unwrap();
    env::set_var("ASO_CONFIG_PATH", &config_path);

    let (plain, loaded_from) = AsoConfig::load(None).unwrap();
    assert_eq!(loaded_from, Some(config_path.clone()));
    assert_eq!(plain, AsoConfig::default());

    env::set_var("ASO_WEIGHT_METADATA", "40");
    let err = AsoConfig::load(None).unwrap_err();
    assert!(matches!(err, ConfigError::WeightSum { sum: 115 }));

    env::set_var("ASO_WEIGHT_RATINGS", "20");
    env::set_var("ASO_WEIGHT_KEYWORDS", "20");
    env::set_var("ASO_WEIGHT_CONVERSION", " 20 ");
    env::set_var("ASO_PLATFORM", "google");
    let (overridden, _) = AsoConfig::load(None).unwrap();
    assert_eq!(overridden.weights.metadata_quality, 40);
    assert_eq!(overridden.weights.conversion_metrics, 20);
    assert_eq!(overridden.listing.platform, "google");
    assert_eq!(
        overridden.listing.platform.parse::<Platform>().unwrap(),
        Platform::Google
    );

    env::set_var("ASO_PLATFORM", "windows");
    let err = AsoConfig::load(None).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownPlatform(name) if name == "windows"));

    for (name, value) in saved {
        match value {
            Some(value) => env::set_var(name, value),
            None => env::remove_var(name),
        }
    }
}
