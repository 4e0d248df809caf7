//! Declarative tag rules: one table, one matching engine.
//!
//! Phrase vocabularies are data, not conditionals, so adding a tag is a table
//! edit. The default table below covers the phrase-driven categories; tags
//! derived from metadata flags (commercial account, season, sales lead) are
//! applied by the classifier itself.

use serde::{Deserialize, Serialize};

use super::TagCategory;
use crate::signals::any_phrase;

// Tags the classifier references directly.
pub const TAG_CRITICAL_EVACUATE: &str = "CRITICAL_EVACUATE";
pub const TAG_SAME_DAY: &str = "SAME_DAY";
pub const TAG_PRIORITY_24H: &str = "PRIORITY_24H";
pub const TAG_ROUTINE_SCHEDULE: &str = "ROUTINE_SCHEDULE";
pub const TAG_COMMERCIAL_JOB: &str = "COMMERCIAL_JOB";
pub const TAG_AGING_EQUIPMENT: &str = "AGING_EQUIPMENT";
pub const TAG_HOT_SALES_LEAD: &str = "HOT_SALES_LEAD";
pub const TAG_COMMERCIAL_ACCOUNT: &str = "COMMERCIAL_ACCOUNT";
pub const TAG_OWNER_OCCUPIED: &str = "OWNER_OCCUPIED";
pub const TAG_WRONG_NUMBER: &str = "WRONG_NUMBER";
pub const TAG_PEAK_SEASON_SUMMER: &str = "PEAK_SEASON_SUMMER";
pub const TAG_PEAK_SEASON_WINTER: &str = "PEAK_SEASON_WINTER";
pub const TAG_ELDERLY_OCCUPANT: &str = "ELDERLY_OCCUPANT";
pub const TAG_DURATION_ACUTE: &str = "DURATION_ACUTE";
pub const TAG_DURATION_RECENT: &str = "DURATION_RECENT";
pub const TAG_DURATION_ONGOING: &str = "DURATION_ONGOING";
pub const TAG_ESCALATED_TO_HUMAN: &str = "ESCALATED_TO_HUMAN";
pub const TAG_CALLBACK_REQUESTED: &str = "CALLBACK_REQUESTED";
pub const TAG_BOOKING_INCOMPLETE: &str = "BOOKING_INCOMPLETE";

/// Urgency tags from least to most severe; vulnerable-occupant escalation
/// moves one step right, clamped.
pub const URGENCY_TAG_ORDER: [&str; 4] =
    [TAG_ROUTINE_SCHEDULE, TAG_PRIORITY_24H, TAG_SAME_DAY, TAG_CRITICAL_EVACUATE];

/// One declarative tagging rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRule {
    pub category: TagCategory,
    pub tag: String,
    pub phrases: Vec<String>,
    #[serde(default)]
    pub negation_aware: bool,
}

impl TagRule {
    fn new(category: TagCategory, tag: &str, phrases: &[&str], negation_aware: bool) -> Self {
        Self {
            category,
            tag: tag.to_string(),
            phrases: phrases.iter().map(|phrase| (*phrase).to_string()).collect(),
            negation_aware,
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        any_phrase(text, &self.phrases, self.negation_aware)
    }
}

/// Rule table plus the matching engine over it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    pub rules: Vec<TagRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self { rules: default_rules() }
    }
}

impl RuleSet {
    /// Tags of every rule in `category` whose phrase family matches.
    pub fn matching_tags<'a>(&'a self, category: TagCategory, text: &str) -> Vec<&'a str> {
        self.rules
            .iter()
            .filter(|rule| rule.category == category && rule.matches(text))
            .map(|rule| rule.tag.as_str())
            .collect()
    }

    /// First matching tag in declaration order, for categories where only one
    /// tag applies (service type).
    pub fn first_matching_tag<'a>(&'a self, category: TagCategory, text: &str) -> Option<&'a str> {
        self.rules
            .iter()
            .find(|rule| rule.category == category && rule.matches(text))
            .map(|rule| rule.tag.as_str())
    }

    /// Appends custom rules after the defaults; later rules never shadow
    /// earlier ones because matching is per-rule.
    pub fn extend(&mut self, extra: Vec<TagRule>) {
        self.rules.extend(extra);
    }
}

fn default_rules() -> Vec<TagRule> {
    use TagCategory::*;

    vec![
        // Hazards are negation-aware: "no gas smell reported" is not a leak.
        TagRule::new(Hazard, "GAS_LEAK", &["gas leak", "smell gas", "gas smell", "rotten egg"], true),
        TagRule::new(
            Hazard,
            "CARBON_MONOXIDE",
            &["carbon monoxide", "co alarm", "co detector"],
            true,
        ),
        TagRule::new(
            Hazard,
            "ELECTRICAL_BURNING",
            &["burning smell", "sparks", "smoke coming", "electrical smell"],
            true,
        ),
        // Urgency phrases are mostly negative constructs, so negation
        // scanning stays off.
        TagRule::new(
            Urgency,
            TAG_CRITICAL_EVACUATE,
            &["evacuate", "get out of the house", "everyone outside"],
            false,
        ),
        TagRule::new(
            Urgency,
            TAG_SAME_DAY,
            &["no heat", "no ac", "not cooling", "as soon as possible", "right away"],
            false,
        ),
        TagRule::new(
            Urgency,
            TAG_PRIORITY_24H,
            &["by tomorrow", "within a day", "can't wait long", "pretty urgent"],
            false,
        ),
        TagRule::new(
            Urgency,
            TAG_ROUTINE_SCHEDULE,
            &["whenever works", "next week", "no rush", "anytime"],
            false,
        ),
        // Service type: declaration order is the tie-break, cooling first.
        TagRule::new(
            ServiceType,
            "REPAIR_COOLING",
            &["air condition", "a/c", " ac ", "cooling", "cold air stopped"],
            false,
        ),
        TagRule::new(
            ServiceType,
            "REPAIR_HEATING",
            &["furnace", "heater", "heating", "boiler", "radiator"],
            false,
        ),
        TagRule::new(
            Logistics,
            "ACCESS_GATE_CODE",
            &["gate code", "keypad", "access code", "door code"],
            false,
        ),
        TagRule::new(
            Logistics,
            "ACCESS_ALARM",
            &["alarm system", "security alarm", "alarm code"],
            false,
        ),
        TagRule::new(
            Revenue,
            "FINANCING_INTEREST",
            &["financing", "payment plan", "monthly payments"],
            false,
        ),
        TagRule::new(Revenue, "LEGACY_REFRIGERANT", &["r-22", "r22", "freon"], false),
    ]
}

#[cfg(test)]
mod tests {
    use crate::taxonomy::TagCategory;

    use super::{RuleSet, TagRule};

    #[test]
    fn hazard_rules_are_negation_aware() {
        let rules = RuleSet::default();
        assert_eq!(rules.matching_tags(TagCategory::Hazard, "I smell gas near the stove"), vec!["GAS_LEAK"]);
        assert!(rules.matching_tags(TagCategory::Hazard, "no gas smell reported").is_empty());
    }

    #[test]
    fn service_type_takes_first_family_in_declaration_order() {
        let rules = RuleSet::default();
        assert_eq!(
            rules.first_matching_tag(TagCategory::ServiceType, "the air conditioner and the furnace"),
            Some("REPAIR_COOLING")
        );
        assert_eq!(
            rules.first_matching_tag(TagCategory::ServiceType, "the furnace is dead"),
            Some("REPAIR_HEATING")
        );
        assert_eq!(rules.first_matching_tag(TagCategory::ServiceType, "hello"), None);
    }

    #[test]
    fn logistics_tags_can_co_occur() {
        let rules = RuleSet::default();
        let tags = rules
            .matching_tags(TagCategory::Logistics, "gate code is 4411 and the alarm system is armed");
        assert_eq!(tags, vec!["ACCESS_GATE_CODE", "ACCESS_ALARM"]);
    }

    #[test]
    fn custom_rules_extend_the_table() {
        let mut rules = RuleSet::default();
        rules.extend(vec![TagRule {
            category: TagCategory::Revenue,
            tag: "DUCT_CLEANING_UPSELL".to_string(),
            phrases: vec!["duct cleaning".to_string()],
            negation_aware: false,
        }]);

        assert_eq!(
            rules.matching_tags(TagCategory::Revenue, "could you quote duct cleaning too"),
            vec!["DUCT_CLEANING_UPSELL"]
        );
    }
}
