use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use super::options::{default_options, ConfigOption};
use crate::error::{FlightAssistError, Result};

// ---------------------------------------------------------------------------
// Key/value config store backed by plain text
// ---------------------------------------------------------------------------

/// Parsed `key=value` configuration together with the text it persists to.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    options: Vec<ConfigOption>,
    values: BTreeMap<String, String>,
    text: String,
}

impl ConfigStore {
    /// Parse `text` against the default option table. Empty text is
    /// initialized with the defaults.
    pub fn parse(text: &str) -> Result<Self> {
        Self::with_options(text, default_options())
    }

    pub fn with_options(text: &str, options: Vec<ConfigOption>) -> Result<Self> {
        let mut store = Self { options, values: BTreeMap::new(), text: String::new() };
        if text.is_empty() {
            store.reset();
        } else {
            store.values = parse_lines(text)?;
            store.text = text.to_string();
            store.validate()?;
        }
        Ok(store)
    }

    /// Defaults for every option, freshly rendered.
    pub fn defaults() -> Self {
        let mut store = Self {
            options: default_options(),
            values: BTreeMap::new(),
            text: String::new(),
        };
        store.reset();
        store
    }

    /// Read a config file; a missing file starts from defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file missing, using defaults");
            return Ok(Self::defaults());
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.text)?;
        Ok(())
    }

    /// Drop all values and re-render the default config text.
    pub fn reset(&mut self) {
        self.values.clear();
        let mut text = String::new();
        for opt in &self.options {
            self.values.insert(opt.key.to_string(), opt.default.to_string());
            let requirement = if opt.required { "Required" } else { "Optional" };
            let _ = write!(
                text,
                "# {} {}\n{}={}\n\n",
                opt.description, requirement, opt.key, opt.default
            );
        }
        self.text = text;
        tracing::debug!(options = self.options.len(), "config reset to defaults");
    }

    /// Typed value for `key`, or the type default when absent or unparsable.
    pub fn get<T: FromStr + Default>(&self, key: &str) -> T {
        match self.values.get(key) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(key, value = %raw, "config value does not parse, using default");
                T::default()
            }),
            None => T::default(),
        }
    }

    /// Typed value for `key`; absence and parse failure are errors.
    pub fn require<T: FromStr>(&self, key: &str) -> Result<T> {
        let raw = self
            .values
            .get(key)
            .ok_or_else(|| FlightAssistError::MissingConfigKey { key: key.to_string() })?;
        raw.parse().map_err(|_| FlightAssistError::InvalidConfigValue {
            key: key.to_string(),
            value: raw.clone(),
        })
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Persisted text form.
    pub fn text(&self) -> &str {
        &self.text
    }

    fn validate(&self) -> Result<()> {
        for opt in self.options.iter().filter(|o| o.required) {
            if !self.values.contains_key(opt.key) {
                return Err(FlightAssistError::MissingConfigKey { key: opt.key.to_string() });
            }
        }
        Ok(())
    }
}

fn parse_lines(text: &str) -> Result<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();
    for line in text.split('\n') {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let words: Vec<&str> = line.split('=').collect();
        let (key, value) = match words.as_slice() {
            [key, value] => (key.trim(), value.trim()),
            _ => return Err(FlightAssistError::ConfigParse { line: line.to_string() }),
        };
        if key.is_empty() || value.is_empty() {
            return Err(FlightAssistError::ConfigParse { line: line.to_string() });
        }
        values.insert(key.to_string(), value.to_string());
    }
    Ok(values)
}
