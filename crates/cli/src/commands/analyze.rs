use std::path::Path;

use anyhow::Result;
use chrono::Utc;

use aftercall_core::analyze_with_rules;

use super::{load_export, load_rules, to_json, CommandResult};

pub fn run(file: &Path, rules: Option<&Path>, pretty: bool) -> CommandResult {
    match execute(file, rules, pretty) {
        Ok(output) => CommandResult::success(output),
        Err(error) => CommandResult::failure("analyze", &error),
    }
}

fn execute(file: &Path, rules: Option<&Path>, pretty: bool) -> Result<String> {
    let export = load_export(file)?;
    let rules = load_rules(rules)?;

    let analysis = analyze_with_rules(&rules, export, Utc::now());
    tracing::info!(
        call_id = %analysis.state.call_id,
        score = analysis.scorecard.score,
        tag_count = analysis.scorecard.tag_count,
        warnings = analysis.scorecard.warnings.len(),
        "call analyzed"
    );

    to_json(&analysis, pretty)
}
