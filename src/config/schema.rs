//! Config schema and deserialization

use crate::source::InvalidPolicy;
use serde::Deserialize;

/// Decimals shown for percentages when the config does not say
pub const DEFAULT_PRECISION: u8 = 1;

/// Root config structure for .prakritirc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Question file path (or URL with the `remote` feature)
    #[serde(default)]
    pub questions: Option<String>,

    /// What to do when the question file parses to an unusable set
    #[serde(default)]
    pub on_invalid: Option<InvalidPolicy>,

    /// Decimals shown for percentages. Default: 1
    #[serde(default)]
    pub precision: Option<u8>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        cli_questions: Option<&str>,
        cli_strict: bool,
        cli_precision: Option<u8>,
    ) -> Self {
        if let Some(questions) = cli_questions {
            self.questions = Some(questions.to_string());
        }
        if cli_strict {
            self.on_invalid = Some(InvalidPolicy::Error);
        }
        if cli_precision.is_some() {
            self.precision = cli_precision;
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values only fill what this config leaves unset
        if self.questions.is_none() {
            self.questions = base.questions;
        }
        if self.on_invalid.is_none() {
            self.on_invalid = base.on_invalid;
        }
        if self.precision.is_none() {
            self.precision = base.precision;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }
    }

    pub fn invalid_policy(&self) -> InvalidPolicy {
        self.on_invalid.unwrap_or_default()
    }

    pub fn precision(&self) -> usize {
        self.precision.unwrap_or(DEFAULT_PRECISION) as usize
    }
}
