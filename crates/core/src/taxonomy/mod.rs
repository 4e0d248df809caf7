//! The tag taxonomy and the call classifier.
//!
//! Nine fixed categories describe a finished call for downstream triage. The
//! classifier combines transcript phrase matches (via the declarative rule
//! table), call-state metadata flags, and date context into one tag set,
//! applying the cross-category escalation rules on top.

pub mod rules;

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::call::{
    CallState, DurationCategory, PropertyType, END_REASON_SALES_LEAD, END_REASON_WRONG_NUMBER,
};
use crate::transcript::extract_problem_duration;

use rules::{
    RuleSet, TAG_AGING_EQUIPMENT, TAG_BOOKING_INCOMPLETE, TAG_CALLBACK_REQUESTED,
    TAG_COMMERCIAL_ACCOUNT, TAG_COMMERCIAL_JOB, TAG_CRITICAL_EVACUATE, TAG_DURATION_ACUTE,
    TAG_DURATION_ONGOING, TAG_DURATION_RECENT, TAG_ELDERLY_OCCUPANT, TAG_ESCALATED_TO_HUMAN,
    TAG_HOT_SALES_LEAD, TAG_OWNER_OCCUPIED, TAG_PEAK_SEASON_SUMMER, TAG_PEAK_SEASON_WINTER,
    TAG_WRONG_NUMBER, URGENCY_TAG_ORDER,
};

/// Equipment at or past this age is a replacement-revenue signal.
const AGING_EQUIPMENT_YEARS: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    Hazard,
    Urgency,
    ServiceType,
    Revenue,
    Recovery,
    Logistics,
    Customer,
    NonCustomer,
    Context,
}

/// The full multi-category tag set for one call. Sets forbid duplicates and
/// keep a stable order; the record is never mutated after classification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyTags {
    pub hazard: BTreeSet<String>,
    pub urgency: BTreeSet<String>,
    pub service_type: BTreeSet<String>,
    pub revenue: BTreeSet<String>,
    pub recovery: BTreeSet<String>,
    pub logistics: BTreeSet<String>,
    pub customer: BTreeSet<String>,
    pub non_customer: BTreeSet<String>,
    pub context: BTreeSet<String>,
}

impl TaxonomyTags {
    pub fn category(&self, category: TagCategory) -> &BTreeSet<String> {
        match category {
            TagCategory::Hazard => &self.hazard,
            TagCategory::Urgency => &self.urgency,
            TagCategory::ServiceType => &self.service_type,
            TagCategory::Revenue => &self.revenue,
            TagCategory::Recovery => &self.recovery,
            TagCategory::Logistics => &self.logistics,
            TagCategory::Customer => &self.customer,
            TagCategory::NonCustomer => &self.non_customer,
            TagCategory::Context => &self.context,
        }
    }

    fn category_mut(&mut self, category: TagCategory) -> &mut BTreeSet<String> {
        match category {
            TagCategory::Hazard => &mut self.hazard,
            TagCategory::Urgency => &mut self.urgency,
            TagCategory::ServiceType => &mut self.service_type,
            TagCategory::Revenue => &mut self.revenue,
            TagCategory::Recovery => &mut self.recovery,
            TagCategory::Logistics => &mut self.logistics,
            TagCategory::Customer => &mut self.customer,
            TagCategory::NonCustomer => &mut self.non_customer,
            TagCategory::Context => &mut self.context,
        }
    }

    pub fn insert(&mut self, category: TagCategory, tag: impl Into<String>) {
        self.category_mut(category).insert(tag.into());
    }

    /// Tag count across all nine categories.
    pub fn total_count(&self) -> usize {
        [
            TagCategory::Hazard,
            TagCategory::Urgency,
            TagCategory::ServiceType,
            TagCategory::Revenue,
            TagCategory::Recovery,
            TagCategory::Logistics,
            TagCategory::Customer,
            TagCategory::NonCustomer,
            TagCategory::Context,
        ]
        .iter()
        .map(|category| self.category(*category).len())
        .sum()
    }
}

/// Classifies a finished call with the default rule table, using the current
/// date for season context.
pub fn classify_call(state: &CallState, transcript: Option<&str>) -> TaxonomyTags {
    classify_call_at(state, transcript, Utc::now())
}

/// As `classify_call` with an explicit clock, for deterministic season tags.
pub fn classify_call_at(
    state: &CallState,
    transcript: Option<&str>,
    now: DateTime<Utc>,
) -> TaxonomyTags {
    classify_with_rules(&RuleSet::default(), state, transcript, now)
}

/// The full classification algorithm over an explicit rule table.
pub fn classify_with_rules(
    rules: &RuleSet,
    state: &CallState,
    transcript: Option<&str>,
    now: DateTime<Utc>,
) -> TaxonomyTags {
    let text = transcript.unwrap_or("");
    let mut tags = TaxonomyTags::default();

    for tag in rules.matching_tags(TagCategory::Hazard, text) {
        tags.insert(TagCategory::Hazard, tag);
    }

    for tag in urgency_tags(rules, state, text, !tags.hazard.is_empty()) {
        tags.insert(TagCategory::Urgency, tag);
    }

    if let Some(tag) = rules.first_matching_tag(TagCategory::ServiceType, text) {
        tags.insert(TagCategory::ServiceType, tag);
    }

    for tag in rules.matching_tags(TagCategory::Logistics, text) {
        tags.insert(TagCategory::Logistics, tag);
    }

    for tag in rules.matching_tags(TagCategory::Revenue, text) {
        tags.insert(TagCategory::Revenue, tag);
    }
    if state.commercial_property {
        tags.insert(TagCategory::Revenue, TAG_COMMERCIAL_JOB);
    }
    if state.equipment_age_years.is_some_and(|age| age >= AGING_EQUIPMENT_YEARS) {
        tags.insert(TagCategory::Revenue, TAG_AGING_EQUIPMENT);
    }
    if state.ended_as(END_REASON_SALES_LEAD) {
        tags.insert(TagCategory::Revenue, TAG_HOT_SALES_LEAD);
    }

    if state.commercial_property || state.property_type == Some(PropertyType::Commercial) {
        tags.insert(TagCategory::Customer, TAG_COMMERCIAL_ACCOUNT);
    } else if state.ended_as(END_REASON_WRONG_NUMBER) {
        tags.insert(TagCategory::NonCustomer, TAG_WRONG_NUMBER);
    } else {
        tags.insert(TagCategory::Customer, TAG_OWNER_OCCUPIED);
    }

    if state.escalation_requested {
        tags.insert(TagCategory::Recovery, TAG_ESCALATED_TO_HUMAN);
    }
    if state.callback_requested {
        tags.insert(TagCategory::Recovery, TAG_CALLBACK_REQUESTED);
    }
    if state.booking_attempted && !state.appointment_booked {
        tags.insert(TagCategory::Recovery, TAG_BOOKING_INCOMPLETE);
    }

    for tag in context_tags(state, transcript, now) {
        tags.insert(TagCategory::Context, tag);
    }

    tags
}

/// Base urgency matches plus the two escalation rules. The vulnerable-occupant
/// bump is derived from the base matches every run, never from previously
/// escalated output, so re-classifying is idempotent.
fn urgency_tags(
    rules: &RuleSet,
    state: &CallState,
    text: &str,
    hazard_present: bool,
) -> BTreeSet<String> {
    let mut urgency: BTreeSet<String> =
        rules.matching_tags(TagCategory::Urgency, text).into_iter().map(String::from).collect();

    if state.vulnerable_occupant && !urgency.is_empty() {
        let strongest = URGENCY_TAG_ORDER
            .iter()
            .rposition(|tag| urgency.contains(*tag));
        if let Some(index) = strongest {
            let bumped = URGENCY_TAG_ORDER[(index + 1).min(URGENCY_TAG_ORDER.len() - 1)];
            urgency.remove(URGENCY_TAG_ORDER[index]);
            urgency.insert(bumped.to_string());
        }
    }

    // Any hazard forces the evacuate tier regardless of phrase matches.
    if hazard_present {
        urgency.insert(TAG_CRITICAL_EVACUATE.to_string());
    }

    urgency
}

fn context_tags(state: &CallState, transcript: Option<&str>, now: DateTime<Utc>) -> Vec<String> {
    let mut context = Vec::new();

    match now.month() {
        6..=8 => context.push(TAG_PEAK_SEASON_SUMMER.to_string()),
        12 | 1 | 2 => context.push(TAG_PEAK_SEASON_WINTER.to_string()),
        _ => {}
    }

    if state.vulnerable_occupant {
        context.push(TAG_ELDERLY_OCCUPANT.to_string());
    }

    // Confirmed state wins over re-deriving the duration from the transcript.
    let duration = state
        .problem_duration_category
        .or_else(|| transcript.and_then(|text| extract_problem_duration(text).map(|found| found.category)));
    if let Some(category) = duration {
        context.push(
            match category {
                DurationCategory::Acute => TAG_DURATION_ACUTE,
                DurationCategory::Recent => TAG_DURATION_RECENT,
                DurationCategory::Ongoing => TAG_DURATION_ONGOING,
            }
            .to_string(),
        );
    }

    context
}
