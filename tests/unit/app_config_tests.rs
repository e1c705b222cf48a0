/*!
 * Tests for application configuration functionality
 */

use docfill::app_config::{Config, LogLevel, NamingStrategy};
use docfill::document::RgbColor;
use docfill::errors::ConfigError;
use docfill::substitution::ColorPolicy;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert!(config.fill.normalize_color);
    assert_eq!(config.fill.color, RgbColor::BLACK);
    assert_eq!(config.naming.strategy, NamingStrategy::PlaceholderValue);
    assert_eq!(config.naming.token, "{FULL_NAME}");
    assert_eq!(config.naming.fallback, "unnamed");
    assert_eq!(config.naming.timestamp_format, "%Y%m%d_%H%M%S");
    assert_eq!(config.form.key_prefix, "ph:");
    assert_eq!(config.templates.extension, "json");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test that a partial config file gets defaults for everything it omits
#[test]
fn test_config_fromPartialJson_shouldFillDefaults() {
    let json = r#"{
        "fill": { "normalize_color": false },
        "naming": { "strategy": "timestamp" },
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.fill.color_policy(), ColorPolicy::Preserve);
    assert_eq!(config.fill.color, RgbColor::BLACK);
    assert_eq!(config.naming.strategy, NamingStrategy::Timestamp);
    assert_eq!(config.naming.token, "{FULL_NAME}");
    assert_eq!(config.form.key_prefix, "ph:");
    assert_eq!(config.log_level, LogLevel::Debug);
}

/// Test that a custom color is parsed from hex
#[test]
fn test_config_withCustomColor_shouldForceThatColor() {
    let json = r##"{ "fill": { "color": "#1F2E3D" } }"##;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(
        config.fill.color_policy(),
        ColorPolicy::Force(RgbColor::new(0x1F, 0x2E, 0x3D))
    );
}

/// Test that an invalid color is rejected at parse time
#[test]
fn test_config_withInvalidColor_shouldFailToParse() {
    let json = r#"{ "fill": { "color": "black" } }"#;
    assert!(serde_json::from_str::<Config>(json).is_err());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.naming.token = "FULL_NAME".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { ref field, .. }) if field == "naming.token"
    ));

    // The token is irrelevant for timestamp naming
    config.naming.strategy = NamingStrategy::Timestamp;
    assert!(config.validate().is_ok());
    config.naming.strategy = NamingStrategy::PlaceholderValue;
    config.naming.token = "{FULL_NAME}".to_string();

    config.naming.fallback = "???".to_string();
    assert!(config.validate().is_err());
    config.naming.fallback = "unnamed".to_string();

    config.form.key_prefix = String::new();
    assert!(config.validate().is_err());
    config.form.key_prefix = "ph:".to_string();

    config.templates.extension = ".".to_string();
    assert!(config.validate().is_err());
    config.templates.extension = ".json".to_string();
    assert!(config.validate().is_ok());
}

/// Test log level conversion
#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
}
