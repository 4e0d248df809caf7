//! Parsing of the call-export bundle and of custom rule files.
//!
//! This is the only fallible boundary the core owns. The eight analysis
//! components themselves are total; a caller that already holds typed values
//! never sees these errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::call::CallState;
use crate::domain::trace::TraceEntry;
use crate::reconcile::DynamicVariables;
use crate::taxonomy::rules::TagRule;

/// Everything the surrounding system hands over for one finished call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallExport {
    pub call: CallState,
    pub transcript: Option<String>,
    pub dynamic_variables: Option<DynamicVariables>,
    pub trace: Vec<TraceEntry>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("call export is empty")]
    Empty,
    #[error("invalid call export: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn parse_export(raw: &str) -> Result<CallExport, ExportError> {
    if raw.trim().is_empty() {
        return Err(ExportError::Empty);
    }
    Ok(serde_json::from_str(raw)?)
}

#[derive(Debug, Error)]
pub enum RuleFileError {
    #[error("invalid rule file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RuleFile {
    rules: Vec<TagRule>,
}

/// Parses a TOML rule file into extra tag rules appended after the defaults.
///
/// ```toml
/// [[rules]]
/// category = "revenue"
/// tag = "DUCT_CLEANING_UPSELL"
/// phrases = ["duct cleaning"]
/// negation_aware = false
/// ```
pub fn parse_rule_file(raw: &str) -> Result<Vec<TagRule>, RuleFileError> {
    let file: RuleFile = toml::from_str(raw)?;
    Ok(file.rules)
}
