use std::path::Path;

use anyhow::Result;
use chrono::Utc;

use aftercall_core::{classify_with_rules, reconcile};

use super::{load_export, load_rules, to_json, CommandResult};

pub fn run(file: &Path, rules: Option<&Path>, pretty: bool) -> CommandResult {
    match execute(file, rules, pretty) {
        Ok(output) => CommandResult::success(output),
        Err(error) => CommandResult::failure("classify", &error),
    }
}

fn execute(file: &Path, rules: Option<&Path>, pretty: bool) -> Result<String> {
    let mut export = load_export(file)?;
    let rules = load_rules(rules)?;

    // Reconcile first so metadata-driven tags see the merged state.
    reconcile(&mut export.call, export.dynamic_variables.as_ref());
    let tags = classify_with_rules(&rules, &export.call, export.transcript.as_deref(), Utc::now());

    to_json(&tags, pretty)
}
