//! Declarative rule configuration loaded from JSON.
//!
//! ```json
//! {
//!   "display": "simple",
//!   "columns": {
//!     "sku": [{ "rule": "strip" }, { "rule": "upc_a", "strict": true }],
//!     "qty": [{ "rule": "integer", "action": "zero" }]
//!   }
//! }
//! ```
//!
//! `columns` may also be an array of rule lists, addressing columns by
//! position.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::pipeline::{DisplayMode, Pipeline, RuleChain, RuleSet};
use crate::rule::{MissingAction, Rule};
use crate::rules::{
    Boolean, Bytes, CapitalizeWords, Cary, Contains, Drop, Float, Integer, Lower,
    NoneToEmptyString, RemoveLinebreaks, ReplaceValue, Static, Strip, Unique, UpcA, Upper,
};
use crate::value::Value;

/// Errors raised while loading or building a rule configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read rule configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid rule configuration.
    #[error("invalid rule configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// An encoding label is unknown or cannot be encoded to.
    #[error("unsupported encoding label '{label}'")]
    UnknownEncoding { label: String },
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

/// One rule as written in a configuration document.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case", deny_unknown_fields)]
pub enum RuleSpec {
    Integer(Integer),
    Float(Float),
    Boolean(Boolean),
    Bytes {
        #[serde(default = "default_encoding")]
        encoding: String,
    },
    Contains(Contains),
    Unique(Unique),
    Drop {},
    Strip(Strip),
    CapitalizeWords(CapitalizeWords),
    UpcA(UpcA),
    Lower {},
    Upper {},
    NoneToEmptyString {},
    RemoveLinebreaks {},
    ReplaceValue {
        replacements: IndexMap<String, Value>,
        #[serde(default)]
        missing: MissingAction,
    },
    Static(Static),
    Cary(Cary),
}

impl RuleSpec {
    /// Build a fresh rule instance.
    pub fn build(&self) -> Result<Box<dyn Rule>, ConfigError> {
        let rule: Box<dyn Rule> = match self {
            RuleSpec::Integer(rule) => Box::new(rule.clone()),
            RuleSpec::Float(rule) => Box::new(rule.clone()),
            RuleSpec::Boolean(rule) => Box::new(rule.clone()),
            RuleSpec::Bytes { encoding } => Box::new(Bytes::new(encoding)?),
            RuleSpec::Contains(rule) => Box::new(rule.clone()),
            RuleSpec::Unique(rule) => Box::new(Unique::new(rule.action)),
            RuleSpec::Drop {} => Box::new(Drop),
            RuleSpec::Strip(rule) => Box::new(rule.clone()),
            RuleSpec::CapitalizeWords(rule) => Box::new(rule.clone()),
            RuleSpec::UpcA(rule) => Box::new(rule.clone()),
            RuleSpec::Lower {} => Box::new(Lower),
            RuleSpec::Upper {} => Box::new(Upper),
            RuleSpec::NoneToEmptyString {} => Box::new(NoneToEmptyString),
            RuleSpec::RemoveLinebreaks {} => Box::new(RemoveLinebreaks),
            RuleSpec::ReplaceValue {
                replacements,
                missing,
            } => Box::new(ReplaceValue::new(
                replacements.iter().map(|(k, v)| (k.as_str(), v.clone())),
                missing.clone(),
            )),
            RuleSpec::Static(rule) => Box::new(rule.clone()),
            RuleSpec::Cary(rule) => Box::new(Cary::new(rule.action.clone())),
        };
        Ok(rule)
    }
}

/// Column rule lists, by position or by name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColumnsSpec {
    Indexed(Vec<Vec<RuleSpec>>),
    Named(IndexMap<String, Vec<RuleSpec>>),
}

/// A complete pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    #[serde(default)]
    pub display: DisplayMode,
    pub columns: ColumnsSpec,
}

fn build_chain(specs: &[RuleSpec]) -> Result<RuleChain, ConfigError> {
    specs.iter().map(RuleSpec::build).collect()
}

impl RulesConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Build a pipeline with freshly constructed rules.
    ///
    /// Each call yields independent rule state.
    pub fn build(&self) -> Result<Pipeline, ConfigError> {
        let rules = match &self.columns {
            ColumnsSpec::Indexed(columns) => RuleSet::Indexed(
                columns
                    .iter()
                    .map(|specs| build_chain(specs))
                    .collect::<Result<_, _>>()?,
            ),
            ColumnsSpec::Named(columns) => RuleSet::Named(
                columns
                    .iter()
                    .map(|(name, specs)| Ok((name.clone(), build_chain(specs)?)))
                    .collect::<Result<_, ConfigError>>()?,
            ),
        };
        Ok(Pipeline::new(rules).with_display(self.display))
    }
}
