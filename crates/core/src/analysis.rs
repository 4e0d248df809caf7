//! The one-way post-call pipeline: reconcile, audit, infer, classify, score.
//!
//! `analyze_call` is what the surrounding system calls once per finished
//! call. Each stage only adds information; nothing here performs I/O or
//! fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::call::CallState;
use crate::domain::trace::TraceEntry;
use crate::export::CallExport;
use crate::inference::{classify_issue, infer_urgency};
use crate::reconcile::reconcile;
use crate::scorecard::{score_call, Scorecard};
use crate::taxonomy::rules::RuleSet;
use crate::taxonomy::{classify_with_rules, TaxonomyTags};
use crate::trace_audit::{audit_trace, BookingTraceAudit};
use crate::transcript::extract_problem_duration;

/// Everything derived from one call, ready for the persistence/dashboard
/// layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallAnalysis {
    pub state: CallState,
    pub tags: TaxonomyTags,
    pub booking_audit: BookingTraceAudit,
    pub scorecard: Scorecard,
}

pub fn analyze_call(export: CallExport) -> CallAnalysis {
    analyze_call_at(export, Utc::now())
}

pub fn analyze_call_at(export: CallExport, now: DateTime<Utc>) -> CallAnalysis {
    analyze_with_rules(&RuleSet::default(), export, now)
}

pub fn analyze_with_rules(rules: &RuleSet, export: CallExport, now: DateTime<Utc>) -> CallAnalysis {
    let CallExport { mut call, transcript, dynamic_variables, trace } = export;
    let transcript = transcript.as_deref();

    // Replay the tool-call log into the per-tool visit counter before
    // anything else reads the state.
    for entry in &trace {
        if let TraceEntry::ToolCallInvocation { name, .. } = entry {
            call.record_tool_visit(name);
        }
    }

    reconcile(&mut call, dynamic_variables.as_ref());

    // A successful booking result in the trace is authoritative: it confirms
    // the booking and supplies the slot when reconciliation did not.
    let booking_audit = audit_trace(&trace);
    if let Some(booked_slot) = &booking_audit.booked_slot {
        call.appointment_booked = true;
        if call.appointment_date_time.is_none() {
            call.appointment_date_time = Some(booked_slot.clone());
        }
    }

    // Fill inferred attributes the call itself never confirmed.
    if call.urgency.is_none() {
        call.urgency = infer_urgency(call.problem_description.as_deref(), transcript);
    }
    if call.hvac_issue_type.is_none() {
        call.hvac_issue_type = classify_issue(call.problem_description.as_deref(), transcript);
    }
    if call.problem_duration_category.is_none() {
        call.problem_duration_category =
            transcript.and_then(|text| extract_problem_duration(text).map(|found| found.category));
    }

    let tags = classify_with_rules(rules, &call, transcript, now);
    let scorecard = score_call(&call, &tags);

    CallAnalysis { state: call, tags, booking_audit, scorecard }
}
