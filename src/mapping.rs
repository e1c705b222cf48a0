/*!
 * Placeholder-to-value mapping.
 *
 * Keys are raw placeholder tokens including their braces (`{NAME}`); values
 * are inserted literally. Submitted forms carry the tokens behind a fixed key
 * prefix (`ph:{NAME}`), which `Mapping::from_form_fields` strips.
 */

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use log::debug;
use serde::{Deserialize, Serialize};

/// Default prefix marking placeholder fields in a submitted form
pub const DEFAULT_KEY_PREFIX: &str = "ph:";

/// Flat dictionary from placeholder token to replacement text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    values: HashMap<String, String>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from form fields, keeping only keys that carry `prefix`
    pub fn from_form_fields<I, K, V>(fields: I, prefix: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut mapping = Self::new();
        for (key, value) in fields {
            if let Some(token) = key.as_ref().strip_prefix(prefix) {
                mapping.insert(token, value);
            }
        }
        debug!("Decoded {} placeholder values from form fields", mapping.len());
        mapping
    }

    /// Parse a `TOKEN=VALUE` assignment as given on the command line.
    ///
    /// The token may be written with or without braces; `NAME=Alex` and
    /// `{NAME}=Alex` both map `{NAME}`.
    pub fn parse_assignment(assignment: &str) -> Result<(String, String)> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid assignment '{}', expected TOKEN=VALUE", assignment))?;

        let key = key.trim();
        if key.is_empty() {
            return Err(anyhow!("Empty placeholder name in assignment '{}'", assignment));
        }

        let token = if key.starts_with('{') && key.ends_with('}') {
            key.to_string()
        } else {
            format!("{{{}}}", key)
        };

        Ok((token, value.to_string()))
    }

    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.values.insert(token.into(), value.into());
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.values.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge another mapping into this one; entries of `other` win
    pub fn extend(&mut self, other: Mapping) {
        self.values.extend(other.values);
    }

    /// Tokens in lexicographic order
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.values.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut mapping = Self::new();
        for (token, value) in iter {
            mapping.insert(token, value);
        }
        mapping
    }
}

impl From<HashMap<String, String>> for Mapping {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}
