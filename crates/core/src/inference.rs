//! Free-text inference: urgency level and HVAC issue category.
//!
//! Both classifiers run the same way: fixed phrase families evaluated in
//! priority order, first family to match wins. They are deliberately dumb --
//! no scoring, no model -- because downstream triage only needs a coarse,
//! predictable read.

use crate::domain::call::{HvacIssueType, Urgency};
use crate::signals::{any_phrase, phrase_present};

const HAZARD_PHRASES: [&str; 9] = [
    "gas leak",
    "smell gas",
    "gas smell",
    "carbon monoxide",
    "co alarm",
    "co detector",
    "fire",
    "smoke",
    "sparks",
];

const SEVERE_PHRASES: [&str; 8] = [
    "water leak",
    "leaking water",
    "flooding",
    "no heat",
    "no heating",
    "no ac",
    "no air",
    "not cooling",
];

const LOW_COMMITMENT_PHRASES: [&str; 6] =
    ["estimate", "quote", "no rush", "whenever", "just curious", "ballpark"];

const MAINTENANCE_PHRASES: [&str; 5] =
    ["tune-up", "tune up", "maintenance", "annual service", "seasonal check"];

/// Classifies combined problem description + transcript into an urgency
/// level. Hazards dominate, then severe outages, then explicit
/// low-commitment language; everything else is routine. `None` only when
/// both inputs are absent or empty.
pub fn infer_urgency(problem_description: Option<&str>, transcript: Option<&str>) -> Option<Urgency> {
    let text = combined_text(problem_description, transcript)?;

    // Hazard phrases are negation-aware; "no smoke anywhere" is not a fire.
    if HAZARD_PHRASES.iter().any(|phrase| phrase_present(&text, phrase)) {
        return Some(Urgency::Emergency);
    }
    // Outage phrases are themselves negative constructs ("no heat"), so a
    // plain containment check applies.
    if any_phrase(&text, &SEVERE_PHRASES, false) {
        return Some(Urgency::Urgent);
    }
    if any_phrase(&text, &LOW_COMMITMENT_PHRASES, false) {
        return Some(Urgency::Flexible);
    }
    if any_phrase(&text, &MAINTENANCE_PHRASES, false) {
        return Some(Urgency::Routine);
    }
    Some(Urgency::Routine)
}

/// Keyword families per issue category, most specific/urgent first. Order is
/// part of the contract: a leaking unit that also fails to cool reads as
/// `Leaking`.
const ISSUE_FAMILIES: [(HvacIssueType, &[&str]); 8] = [
    (HvacIssueType::Leaking, &["leak", "dripping", "puddle", "water damage"]),
    (
        HvacIssueType::NoCool,
        &["not cooling", "no cold air", "blowing warm", "warm air", "no ac", "not cold"],
    ),
    (
        HvacIssueType::NoHeat,
        &["no heat", "not heating", "blowing cold", "furnace not", "heater not"],
    ),
    (
        HvacIssueType::NoisySystem,
        &["rattling", "banging", "squealing", "grinding", "buzzing", "loud noise", "noisy"],
    ),
    (HvacIssueType::Odor, &["smell", "odor", "musty", "stink"]),
    (
        HvacIssueType::NotRunning,
        &["won't turn on", "not turning on", "won't start", "not running", "no power", "completely dead"],
    ),
    (HvacIssueType::Thermostat, &["thermostat", "display blank", "screen is blank"]),
    (HvacIssueType::Maintenance, &["tune-up", "tune up", "maintenance", "inspection", "filter"]),
];

/// Maps combined problem description + transcript to an issue category, or
/// `None` when no family matches or both inputs are absent.
pub fn classify_issue(
    problem_description: Option<&str>,
    transcript: Option<&str>,
) -> Option<HvacIssueType> {
    let text = combined_text(problem_description, transcript)?;
    ISSUE_FAMILIES
        .iter()
        .find(|(_, phrases)| any_phrase(&text, phrases, false))
        .map(|(issue, _)| *issue)
}

fn combined_text(problem_description: Option<&str>, transcript: Option<&str>) -> Option<String> {
    let combined = [problem_description.unwrap_or(""), transcript.unwrap_or("")]
        .join("\n")
        .trim()
        .to_lowercase();
    (!combined.is_empty()).then_some(combined)
}

#[cfg(test)]
mod tests {
    use crate::domain::call::{HvacIssueType, Urgency};

    use super::{classify_issue, infer_urgency};

    #[test]
    fn hazard_language_infers_emergency() {
        assert_eq!(infer_urgency(Some("I can smell gas in the hallway"), None), Some(Urgency::Emergency));
        assert_eq!(
            infer_urgency(None, Some("Caller: the carbon monoxide alarm keeps going off")),
            Some(Urgency::Emergency)
        );
    }

    #[test]
    fn negated_hazard_language_falls_through() {
        // "no gas smell" must not read as an emergency; with no other signal
        // the call is routine.
        assert_eq!(infer_urgency(Some("there is no gas smell at all"), None), Some(Urgency::Routine));
    }

    #[test]
    fn outage_language_infers_urgent() {
        assert_eq!(infer_urgency(Some("we have no heat upstairs"), None), Some(Urgency::Urgent));
        assert_eq!(infer_urgency(Some("unit is not cooling at all"), None), Some(Urgency::Urgent));
    }

    #[test]
    fn low_commitment_language_infers_flexible() {
        assert_eq!(
            infer_urgency(Some("just want an estimate, no rush"), None),
            Some(Urgency::Flexible)
        );
    }

    #[test]
    fn maintenance_and_default_infer_routine() {
        assert_eq!(infer_urgency(Some("time for the annual tune-up"), None), Some(Urgency::Routine));
        assert_eq!(infer_urgency(Some("something feels off"), None), Some(Urgency::Routine));
    }

    #[test]
    fn absent_inputs_infer_nothing() {
        assert_eq!(infer_urgency(None, None), None);
        assert_eq!(infer_urgency(Some("   "), Some("")), None);
        assert_eq!(classify_issue(None, None), None);
    }

    #[test]
    fn issue_families_apply_in_priority_order() {
        assert_eq!(
            classify_issue(Some("it's leaking and not cooling"), None),
            Some(HvacIssueType::Leaking)
        );
        assert_eq!(classify_issue(Some("blowing warm air"), None), Some(HvacIssueType::NoCool));
        assert_eq!(classify_issue(Some("furnace not heating"), None), Some(HvacIssueType::NoHeat));
        assert_eq!(classify_issue(Some("a loud noise at startup"), None), Some(HvacIssueType::NoisySystem));
        assert_eq!(classify_issue(Some("musty odor from the vents"), None), Some(HvacIssueType::Odor));
        assert_eq!(classify_issue(Some("the unit won't turn on"), None), Some(HvacIssueType::NotRunning));
        assert_eq!(classify_issue(Some("thermostat acting up"), None), Some(HvacIssueType::Thermostat));
        assert_eq!(classify_issue(Some("due for a filter change"), None), Some(HvacIssueType::Maintenance));
    }

    #[test]
    fn unmatched_text_yields_no_issue() {
        assert_eq!(classify_issue(Some("general question about pricing"), None), None);
    }
}
