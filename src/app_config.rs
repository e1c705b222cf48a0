use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::document::RgbColor;
use crate::errors::ConfigError;
use crate::mapping::DEFAULT_KEY_PREFIX;
use crate::substitution::ColorPolicy;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Substitution settings
    #[serde(default)]
    pub fill: FillConfig,

    /// Output naming settings
    #[serde(default)]
    pub naming: NamingConfig,

    /// Form decoding settings
    #[serde(default)]
    pub form: FormConfig,

    /// Template discovery settings
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Substitution settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FillConfig {
    /// Whether runs receiving a value get their color forced
    #[serde(default = "default_true")]
    pub normalize_color: bool,

    /// Color forced onto replaced runs when normalization is on
    #[serde(default = "default_color")]
    pub color: RgbColor,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            normalize_color: default_true(),
            color: default_color(),
        }
    }
}

impl FillConfig {
    // @returns: Engine color policy for these settings
    pub fn color_policy(&self) -> ColorPolicy {
        if self.normalize_color {
            ColorPolicy::Force(self.color)
        } else {
            ColorPolicy::Preserve
        }
    }
}

/// How output file names are derived
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    // @strategy: "<value of token> <template stem>"
    #[default]
    PlaceholderValue,
    // @strategy: "<template stem>_<timestamp>"
    Timestamp,
}

impl std::fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlaceholderValue => write!(f, "placeholder_value"),
            Self::Timestamp => write!(f, "timestamp"),
        }
    }
}

impl std::str::FromStr for NamingStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "placeholder_value" | "placeholder" | "value" => Ok(Self::PlaceholderValue),
            "timestamp" | "time" => Ok(Self::Timestamp),
            _ => Err(anyhow!("Invalid naming strategy: {}", s)),
        }
    }
}

/// Output naming settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NamingConfig {
    /// Naming strategy
    #[serde(default)]
    pub strategy: NamingStrategy,

    /// Placeholder whose value prefixes output names
    #[serde(default = "default_naming_token")]
    pub token: String,

    /// Name used when the placeholder has no usable value
    #[serde(default = "default_naming_fallback")]
    pub fallback: String,

    /// chrono format string for timestamps
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            strategy: NamingStrategy::default(),
            token: default_naming_token(),
            fallback: default_naming_fallback(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

/// Form decoding settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FormConfig {
    /// Prefix marking placeholder fields
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
        }
    }
}

/// Template discovery settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TemplatesConfig {
    /// File extension of templates, without the dot
    #[serde(default = "default_template_extension")]
    pub extension: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            extension: default_template_extension(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_color() -> RgbColor {
    RgbColor::BLACK
}

fn default_naming_token() -> String {
    "{FULL_NAME}".to_string()
}

fn default_naming_fallback() -> String {
    "unnamed".to_string()
}

fn default_timestamp_format() -> String {
    "%Y%m%d_%H%M%S".to_string()
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

fn default_template_extension() -> String {
    "json".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.naming.strategy == NamingStrategy::PlaceholderValue
            && !crate::placeholder::is_placeholder(&self.naming.token)
        {
            return Err(ConfigError::InvalidValue {
                field: "naming.token".to_string(),
                message: format!("'{}' is not a placeholder token", self.naming.token),
            });
        }

        if crate::naming::sanitize_file_stem(&self.naming.fallback).is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "naming.fallback".to_string(),
                message: "fallback name is empty after removing illegal characters".to_string(),
            });
        }

        if self.naming.timestamp_format.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "naming.timestamp_format".to_string(),
                message: "timestamp format must not be empty".to_string(),
            });
        }

        if self.form.key_prefix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "form.key_prefix".to_string(),
                message: "key prefix must not be empty".to_string(),
            });
        }

        let extension = self.templates.extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(&['/', '\\'][..]) {
            return Err(ConfigError::InvalidValue {
                field: "templates.extension".to_string(),
                message: format!("'{}' is not a file extension", self.templates.extension),
            });
        }

        Ok(())
    }
}
