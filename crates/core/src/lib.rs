pub mod analysis;
pub mod domain;
pub mod export;
pub mod inference;
pub mod reconcile;
pub mod scorecard;
pub mod signals;
pub mod taxonomy;
pub mod trace_audit;
pub mod transcript;

pub use analysis::{analyze_call, analyze_call_at, analyze_with_rules, CallAnalysis};
pub use domain::call::{
    CallState, DurationCategory, HvacIssueType, PropertyType, Urgency, END_REASON_SALES_LEAD,
    END_REASON_WRONG_NUMBER,
};
pub use domain::trace::{BookingArguments, BookingResult, TraceEntry};
pub use export::{parse_export, parse_rule_file, CallExport, ExportError, RuleFileError};
pub use inference::{classify_issue, infer_urgency};
pub use reconcile::{reconcile, DynamicVariables};
pub use scorecard::{score_call, Scorecard, ScorecardWarning};
pub use signals::{phrase_occurs, phrase_present};
pub use taxonomy::rules::{RuleSet, TagRule};
pub use taxonomy::{classify_call, classify_call_at, classify_with_rules, TagCategory, TaxonomyTags};
pub use trace_audit::{audit_trace, BookingTraceAudit};
pub use transcript::{caller_lines, extract_problem_duration, DurationMatch};
