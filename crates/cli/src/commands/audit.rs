use std::path::Path;

use anyhow::Result;

use aftercall_core::audit_trace;

use super::{load_export, to_json, CommandResult};

pub fn run(file: &Path, pretty: bool) -> CommandResult {
    match execute(file, pretty) {
        Ok(output) => CommandResult::success(output),
        Err(error) => CommandResult::failure("audit", &error),
    }
}

fn execute(file: &Path, pretty: bool) -> Result<String> {
    let export = load_export(file)?;
    let audit = audit_trace(&export.trace);

    if audit.slot_changed || audit.urgency_mismatch {
        tracing::warn!(
            call_id = %export.call.call_id,
            slot_changed = audit.slot_changed,
            urgency_mismatch = audit.urgency_mismatch,
            "booking drift detected"
        );
    }

    to_json(&audit, pretty)
}
