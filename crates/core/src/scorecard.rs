//! Completeness scorecard for a reconciled call.
//!
//! A fixed-weight score out of 100 plus advisory warnings. Warnings never
//! move the score; they exist so the dashboard can surface calls that ended
//! without any forward action.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::call::{CallState, END_REASON_WRONG_NUMBER};
use crate::taxonomy::TaxonomyTags;

const WEIGHT_CUSTOMER_NAME: u8 = 15;
const WEIGHT_CUSTOMER_PHONE: u8 = 15;
const WEIGHT_SERVICE_ADDRESS: u8 = 15;
const WEIGHT_PROBLEM_DESCRIPTION: u8 = 15;
const WEIGHT_URGENCY: u8 = 10;
const WEIGHT_BOOKING_OR_CALLBACK: u8 = 20;
const WEIGHT_TAGS_FULL: u8 = 10;
const WEIGHT_TAGS_PARTIAL: u8 = 5;
/// Tag count at which the tag weight is awarded in full.
const FULL_TAG_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScorecardWarning {
    /// Classification produced no tags at all.
    ZeroTags,
    /// A resolvable call ended with no booking and no callback.
    CallbackGap,
}

impl ScorecardWarning {
    pub fn id(&self) -> &'static str {
        match self {
            Self::ZeroTags => "zero-tags",
            Self::CallbackGap => "callback-gap",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub has_customer_name: bool,
    pub has_customer_phone: bool,
    pub has_service_address: bool,
    pub has_problem_description: bool,
    pub has_urgency: bool,
    pub has_booking_or_callback: bool,
    pub tag_count: usize,
    pub score: u8,
    pub warnings: BTreeSet<ScorecardWarning>,
}

/// Computes the weighted completeness score and warnings for one call.
pub fn score_call(state: &CallState, tags: &TaxonomyTags) -> Scorecard {
    let mut card = Scorecard {
        has_customer_name: present(&state.customer_name),
        has_customer_phone: present(&state.customer_phone),
        has_service_address: present(&state.service_address),
        has_problem_description: present(&state.problem_description),
        has_urgency: state.urgency.is_some(),
        has_booking_or_callback: state.appointment_booked || state.callback_requested,
        tag_count: tags.total_count(),
        ..Scorecard::default()
    };

    let mut score = 0u8;
    if card.has_customer_name {
        score += WEIGHT_CUSTOMER_NAME;
    }
    if card.has_customer_phone {
        score += WEIGHT_CUSTOMER_PHONE;
    }
    if card.has_service_address {
        score += WEIGHT_SERVICE_ADDRESS;
    }
    if card.has_problem_description {
        score += WEIGHT_PROBLEM_DESCRIPTION;
    }
    if card.has_urgency {
        score += WEIGHT_URGENCY;
    }
    if card.has_booking_or_callback {
        score += WEIGHT_BOOKING_OR_CALLBACK;
    }
    if card.tag_count >= FULL_TAG_COUNT {
        score += WEIGHT_TAGS_FULL;
    } else if card.tag_count >= 1 {
        score += WEIGHT_TAGS_PARTIAL;
    }
    card.score = score.min(100);

    if card.tag_count == 0 {
        card.warnings.insert(ScorecardWarning::ZeroTags);
    }
    if !card.has_booking_or_callback && !state.ended_as(END_REASON_WRONG_NUMBER) {
        card.warnings.insert(ScorecardWarning::CallbackGap);
    }

    card
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use crate::domain::call::{CallState, Urgency};
    use crate::taxonomy::{TagCategory, TaxonomyTags};

    use super::{score_call, ScorecardWarning};

    fn populated_state() -> CallState {
        let mut state = CallState::new("call-1");
        state.customer_name = Some("Priya Raman".to_string());
        state.customer_phone = Some("+1-512-555-0134".to_string());
        state.service_address = Some("88 Cedar Loop, Austin".to_string());
        state.problem_description = Some("Furnace short-cycles overnight".to_string());
        state.urgency = Some(Urgency::Urgent);
        state.appointment_booked = true;
        state
    }

    fn three_tags() -> TaxonomyTags {
        let mut tags = TaxonomyTags::default();
        tags.insert(TagCategory::ServiceType, "REPAIR_HEATING");
        tags.insert(TagCategory::Urgency, "SAME_DAY");
        tags.insert(TagCategory::Customer, "OWNER_OCCUPIED");
        tags
    }

    #[test]
    fn empty_state_scores_zero_with_zero_tags_warning() {
        let card = score_call(&CallState::new("call-2"), &TaxonomyTags::default());

        assert_eq!(card.score, 0);
        assert!(!card.has_customer_name);
        assert!(!card.has_customer_phone);
        assert!(!card.has_service_address);
        assert!(!card.has_problem_description);
        assert!(!card.has_urgency);
        assert!(!card.has_booking_or_callback);
        assert!(card.warnings.contains(&ScorecardWarning::ZeroTags));
    }

    #[test]
    fn fully_populated_state_with_three_tags_scores_one_hundred() {
        let card = score_call(&populated_state(), &three_tags());
        assert_eq!(card.score, 100);
        assert!(card.warnings.is_empty());
    }

    #[test]
    fn partial_tag_count_earns_partial_weight() {
        let mut tags = TaxonomyTags::default();
        tags.insert(TagCategory::Customer, "OWNER_OCCUPIED");
        let card = score_call(&populated_state(), &tags);
        assert_eq!(card.score, 95);
    }

    #[test]
    fn callback_gap_fires_only_for_resolvable_calls_without_forward_action() {
        let mut state = CallState::new("call-3");
        state.customer_name = Some("Sam".to_string());
        let card = score_call(&state, &three_tags());
        assert!(card.warnings.contains(&ScorecardWarning::CallbackGap));

        let mut callback = state.clone();
        callback.callback_requested = true;
        assert!(!score_call(&callback, &three_tags())
            .warnings
            .contains(&ScorecardWarning::CallbackGap));

        let mut wrong_number = state.clone();
        wrong_number.end_call_reason = Some("wrong_number".to_string());
        assert!(!score_call(&wrong_number, &three_tags())
            .warnings
            .contains(&ScorecardWarning::CallbackGap));
    }

    #[test]
    fn warning_ids_are_stable() {
        assert_eq!(ScorecardWarning::ZeroTags.id(), "zero-tags");
        assert_eq!(ScorecardWarning::CallbackGap.id(), "callback-gap");
    }
}
