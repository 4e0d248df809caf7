use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// End-call reason reported by the voice platform for a converted sales lead.
pub const END_REASON_SALES_LEAD: &str = "sales_lead";
/// End-call reason reported when the caller dialed the wrong business.
pub const END_REASON_WRONG_NUMBER: &str = "wrong_number";

/// Canonical urgency levels, ordered from least to most severe.
///
/// The ordering is load-bearing: vulnerable-occupant escalation bumps a level
/// by one, clamped at `Emergency`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Flexible,
    Routine,
    Urgent,
    Emergency,
}

impl Urgency {
    /// One level up, clamped at the top.
    pub fn escalate(self) -> Self {
        match self {
            Self::Flexible => Self::Routine,
            Self::Routine => Self::Urgent,
            Self::Urgent | Self::Emergency => Self::Emergency,
        }
    }

    /// Maps the booking-flow urgency-tier vocabulary into canonical levels.
    /// Unknown tiers yield `None` and leave reconciliation untouched.
    pub fn from_tier(tier: &str) -> Option<Self> {
        match tier.trim().to_ascii_lowercase().as_str() {
            "flexible" | "no_rush" => Some(Self::Flexible),
            "routine" | "standard" => Some(Self::Routine),
            "same_day" | "urgent" => Some(Self::Urgent),
            "emergency" | "immediate" => Some(Self::Emergency),
            _ => None,
        }
    }
}

/// Problem categories recognized by the issue classifier, most specific first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacIssueType {
    Leaking,
    NoCool,
    NoHeat,
    NoisySystem,
    Odor,
    NotRunning,
    Thermostat,
    Maintenance,
}

/// How long the caller says the problem has existed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationCategory {
    /// Less than a day old.
    Acute,
    /// Roughly one to seven days.
    Recent,
    /// Longer than a week.
    Ongoing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Residential,
    Commercial,
    MultiUnit,
}

/// Canonical record for one call, built up during the call and reconciled
/// once more after it ends.
///
/// `appointment_booked` is monotonic: once true, reconciliation never resets
/// it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallState {
    pub call_id: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub service_address: Option<String>,
    pub problem_description: Option<String>,
    pub urgency: Option<Urgency>,
    pub hvac_issue_type: Option<HvacIssueType>,
    pub problem_duration_category: Option<DurationCategory>,
    pub appointment_booked: bool,
    pub booking_attempted: bool,
    pub appointment_date_time: Option<String>,
    pub callback_requested: bool,
    pub end_call_reason: Option<String>,
    pub safety_hazard: bool,
    pub escalation_requested: bool,
    pub caller_known: Option<bool>,
    pub last_agent_state: Option<String>,
    pub commercial_property: bool,
    pub vulnerable_occupant: bool,
    pub property_type: Option<PropertyType>,
    pub equipment_age_years: Option<u8>,
    pub state_visit_counter: BTreeMap<String, u32>,
}

impl CallState {
    pub fn new(call_id: impl Into<String>) -> Self {
        Self { call_id: call_id.into(), ..Self::default() }
    }

    /// Bumps the per-tool visit counter for one webhook delivery.
    pub fn record_tool_visit(&mut self, tool_name: &str) {
        *self.state_visit_counter.entry(tool_name.to_string()).or_insert(0) += 1;
    }

    pub fn ended_as(&self, reason: &str) -> bool {
        self.end_call_reason.as_deref() == Some(reason)
    }
}
