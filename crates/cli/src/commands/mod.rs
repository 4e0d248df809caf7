pub mod analyze;
pub mod audit;
pub mod classify;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use aftercall_core::{parse_export, parse_rule_file, CallExport, ExportError, RuleFileError, RuleSet};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    command: String,
    status: String,
    error_class: String,
    message: String,
}

impl CommandResult {
    pub fn success(output: String) -> Self {
        Self { exit_code: 0, output }
    }

    pub fn failure(command: &str, error: &anyhow::Error) -> Self {
        let envelope = ErrorEnvelope {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: error_class(error).to_string(),
            message: format!("{error:#}"),
        };
        let output = serde_json::to_string(&envelope).unwrap_or_else(|serialize_error| {
            format!(
                "{{\"command\":\"{command}\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
                serialize_error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
            )
        });
        Self { exit_code: 1, output }
    }
}

fn error_class(error: &anyhow::Error) -> &'static str {
    if error.downcast_ref::<ExportError>().is_some() {
        "export_parse"
    } else if error.downcast_ref::<RuleFileError>().is_some() {
        "rule_file"
    } else if error.downcast_ref::<std::io::Error>().is_some() {
        "file_read"
    } else {
        "internal"
    }
}

pub(crate) fn load_export(path: &Path) -> Result<CallExport> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read call export {}", path.display()))?;
    Ok(parse_export(&raw)?)
}

/// Default rule table, extended from a TOML file when one is given.
pub(crate) fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    let mut rules = RuleSet::default();
    if let Some(path) = path {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("could not read rule file {}", path.display()))?;
        rules.extend(parse_rule_file(&raw)?);
    }
    Ok(rules)
}

pub(crate) fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    output.context("could not serialize command output")
}
