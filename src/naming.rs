/*!
 * Output file naming for filled documents.
 *
 * Two strategies are supported: names derived from the value of a reserved
 * placeholder (e.g. `{FULL_NAME}` → "Jane Doe contract.json") and names
 * derived from the generation time ("contract_20240501_101500.json").
 */

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Result, anyhow};
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::{NamingConfig, NamingStrategy};
use crate::mapping::Mapping;

/// Characters that are illegal in file names on common platforms
static ILLEGAL_FILENAME_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\\/*?:"<>|]"#).expect("Invalid filename regex")
});

/// Remove `\ / * ? : " < > |` and surrounding whitespace
pub fn sanitize_file_stem(value: &str) -> String {
    ILLEGAL_FILENAME_CHARS.replace_all(value, "").trim().to_string()
}

/// Derives output names according to the configured strategy
#[derive(Debug, Clone)]
pub struct OutputNamer {
    strategy: NamingStrategy,
    token: String,
    fallback: String,
    timestamp_format: String,
}

impl OutputNamer {
    pub fn from_config(config: &NamingConfig) -> Self {
        Self {
            strategy: config.strategy,
            token: config.token.clone(),
            fallback: config.fallback.clone(),
            timestamp_format: config.timestamp_format.clone(),
        }
    }

    /// Sanitized value of the naming placeholder, or the sanitized fallback
    pub fn subject(&self, mapping: &Mapping) -> String {
        let value = mapping
            .get(&self.token)
            .map(sanitize_file_stem)
            .unwrap_or_default();

        if value.is_empty() {
            sanitize_file_stem(&self.fallback)
        } else {
            value
        }
    }

    /// File name for the filled copy of `template`
    pub fn output_file_name(
        &self,
        template: &Path,
        mapping: &Mapping,
        extension: &str,
        now: DateTime<Local>,
    ) -> Result<String> {
        let stem = template
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| anyhow!("Template path has no file name: {:?}", template))?;
        let extension = extension.trim_start_matches('.');

        let name = match self.strategy {
            NamingStrategy::PlaceholderValue => {
                format!("{} {}.{}", self.subject(mapping), stem, extension)
            }
            NamingStrategy::Timestamp => {
                format!("{}_{}.{}", stem, self.timestamp(now)?, extension)
            }
        };

        Ok(name)
    }

    /// Suggested base name (no extension) for a batch of outputs
    pub fn bundle_stem(&self, mapping: &Mapping, now: DateTime<Local>) -> Result<String> {
        match self.strategy {
            NamingStrategy::PlaceholderValue => Ok(self.subject(mapping)),
            NamingStrategy::Timestamp => Ok(format!("documents_{}", self.timestamp(now)?)),
        }
    }

    fn timestamp(&self, now: DateTime<Local>) -> Result<String> {
        let mut stamp = String::new();
        write!(stamp, "{}", now.format(&self.timestamp_format))
            .map_err(|_| anyhow!("Invalid timestamp format: {}", self.timestamp_format))?;
        Ok(sanitize_file_stem(&stamp))
    }
}
