//! Booking drift audit over the ordered tool-call log.
//!
//! Replays the invocation/result entries of one call to reconstruct what the
//! caller asked for versus what the booking provider confirmed. The
//! correlation map (tool_call_id to tool name) lives for one audit call and
//! is discarded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::trace::{
    is_booking_tool, BookingArguments, BookingResult, TraceEntry, TOOL_TRANSITION_TO_BOOKING,
};

/// Derived, read-only audit of one call's booking flow.
///
/// `requested_urgency` is the tier captured at the transition stage,
/// `booked_urgency` the tier actually sent to the booking tool; the two
/// vocabularies travel as raw strings and are compared case-sensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingTraceAudit {
    pub requested_slot: Option<String>,
    pub booked_slot: Option<String>,
    pub requested_urgency: Option<String>,
    pub booked_urgency: Option<String>,
    pub slot_changed: bool,
    pub urgency_mismatch: bool,
}

/// Walks the trace in the order supplied and derives the audit record.
/// Malformed entries never fail the audit; they are skipped.
pub fn audit_trace(entries: &[TraceEntry]) -> BookingTraceAudit {
    let mut audit = BookingTraceAudit::default();
    let mut invoked_tool: HashMap<&str, &str> = HashMap::new();
    let mut first_success_seen = false;

    for entry in entries {
        match entry {
            TraceEntry::ToolCallInvocation { name, arguments, tool_call_id } => {
                invoked_tool.insert(tool_call_id.as_str(), name.as_str());
                let args = parse_arguments(arguments.as_deref());

                if name == TOOL_TRANSITION_TO_BOOKING {
                    if audit.requested_slot.is_none() {
                        audit.requested_slot = args.preferred_time.clone();
                    }
                    if args.urgency.is_some() {
                        audit.requested_urgency = args.urgency;
                    }
                } else if is_booking_tool(name) {
                    // The booking tool's arguments are what actually went to
                    // the provider; they win over the transition stage.
                    if args.preferred_time.is_some() {
                        audit.requested_slot = args.preferred_time;
                    }
                    if args.urgency.is_some() {
                        audit.booked_urgency = args.urgency;
                    }
                }
            }
            TraceEntry::ToolCallResult { tool_call_id, successful, content } => {
                // Only the first confirmed booking result counts, even when
                // its payload carries no slot fields.
                if !successful || first_success_seen {
                    continue;
                }
                let from_booking_tool = invoked_tool
                    .get(tool_call_id.as_str())
                    .is_some_and(|name| is_booking_tool(name));
                if !from_booking_tool {
                    continue;
                }
                if let Some(result) = parse_result(content.as_deref()) {
                    if result.confirmed() {
                        first_success_seen = true;
                        audit.booked_slot = result.booked_slot();
                    }
                }
            }
        }
    }

    audit.slot_changed = match (&audit.requested_slot, &audit.booked_slot) {
        (Some(requested), Some(booked)) => normalize_slot(requested) != normalize_slot(booked),
        _ => false,
    };
    audit.urgency_mismatch = match (&audit.requested_urgency, &audit.booked_urgency) {
        (Some(requested), Some(booked)) => requested != booked,
        _ => false,
    };

    audit
}

/// Fail closed: an absent or unparsable argument bundle reads as empty.
fn parse_arguments(arguments: Option<&str>) -> BookingArguments {
    arguments.and_then(|raw| serde_json::from_str(raw).ok()).unwrap_or_default()
}

/// Fail closed: unparsable result payloads mean "no booking detected".
fn parse_result(content: Option<&str>) -> Option<BookingResult> {
    content.and_then(|raw| serde_json::from_str(raw).ok())
}

/// Trim, collapse internal whitespace, lower-case.
fn normalize_slot(slot: &str) -> String {
    slot.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
