//! Post-call reconciliation of agent-reported dynamic variables into the
//! canonical call state.
//!
//! Dynamic variables are a lower-trust snapshot of what the live agent
//! believed mid-call. Every rule is field-local and fill-only-if-empty unless
//! stated otherwise; running reconciliation twice with the same variables
//! changes nothing the second time.

use std::collections::BTreeMap;

use crate::domain::call::{CallState, Urgency};

/// Key-value snapshot reported by the live agent. Read-only input.
pub type DynamicVariables = BTreeMap<String, String>;

pub const VAR_CUSTOMER_NAME: &str = "customer_name";
pub const VAR_PROBLEM_SUMMARY: &str = "problem_summary";
pub const VAR_PROBLEM_DESCRIPTION: &str = "problem_description";
pub const VAR_HAS_APPOINTMENT: &str = "has_appointment";
pub const VAR_BOOKING_CONFIRMED: &str = "booking_confirmed";
pub const VAR_CALLER_KNOWN: &str = "caller_known";
pub const VAR_SERVICE_ADDRESS: &str = "service_address";
pub const VAR_ZIP_CODE: &str = "zip_code";
pub const VAR_CURRENT_AGENT_STATE: &str = "current_agent_state";
pub const VAR_URGENCY_TIER: &str = "urgency_tier";

/// Merges dynamic variables into `state`. No-op when `dyn_vars` is absent.
pub fn reconcile(state: &mut CallState, dyn_vars: Option<&DynamicVariables>) {
    let Some(vars) = dyn_vars else {
        return;
    };

    if is_blank(&state.customer_name) {
        state.customer_name = non_empty(vars.get(VAR_CUSTOMER_NAME));
    }

    // The detailed description outranks the short summary when both arrived.
    if is_blank(&state.problem_description) {
        state.problem_description = non_empty(vars.get(VAR_PROBLEM_DESCRIPTION))
            .or_else(|| non_empty(vars.get(VAR_PROBLEM_SUMMARY)));
    }

    // A confirmed booking always sticks; the weaker has_appointment signal
    // only counts when no booking attempt is in flight, and neither signal
    // can unset an already-true value.
    if truthy(vars.get(VAR_BOOKING_CONFIRMED)) {
        state.appointment_booked = true;
    } else if truthy(vars.get(VAR_HAS_APPOINTMENT)) && !state.booking_attempted {
        state.appointment_booked = true;
    }

    if is_blank(&state.service_address) {
        state.service_address = non_empty(vars.get(VAR_SERVICE_ADDRESS));
    }
    if let Some(zip) = non_empty(vars.get(VAR_ZIP_CODE)) {
        match &mut state.service_address {
            Some(address) if !address.contains(&zip) => {
                address.push_str(", ");
                address.push_str(&zip);
            }
            Some(_) => {}
            None => state.service_address = Some(zip),
        }
    }

    if state.urgency.is_none() {
        state.urgency =
            vars.get(VAR_URGENCY_TIER).and_then(|tier| Urgency::from_tier(tier));
    }

    if state.caller_known.is_none() {
        state.caller_known = vars.get(VAR_CALLER_KNOWN).map(|value| truthy(Some(value)));
    }

    if is_blank(&state.last_agent_state) {
        state.last_agent_state = non_empty(vars.get(VAR_CURRENT_AGENT_STATE));
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |value| value.trim().is_empty())
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|value| value.trim()).filter(|value| !value.is_empty()).map(str::to_string)
}

fn truthy(value: Option<&String>) -> bool {
    value.is_some_and(|value| {
        matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::call::{CallState, Urgency};

    use super::{reconcile, DynamicVariables};

    fn vars(pairs: &[(&str, &str)]) -> DynamicVariables {
        pairs.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect()
    }

    #[test]
    fn absent_variables_are_a_no_op() {
        let mut state = CallState::new("call-1");
        let before = state.clone();
        reconcile(&mut state, None);
        assert_eq!(state, before);
    }

    #[test]
    fn fills_unset_fields_but_never_overwrites() {
        let mut state = CallState::new("call-2");
        state.customer_name = Some("Dana Whitfield".to_string());

        let vars = vars(&[("customer_name", "D. Whitfield"), ("current_agent_state", "booking")]);
        reconcile(&mut state, Some(&vars));

        assert_eq!(state.customer_name.as_deref(), Some("Dana Whitfield"));
        assert_eq!(state.last_agent_state.as_deref(), Some("booking"));
    }

    #[test]
    fn detailed_problem_description_outranks_summary() {
        let mut state = CallState::new("call-3");
        let vars = vars(&[
            ("problem_summary", "AC broken"),
            ("problem_description", "AC blows warm air and trips the breaker"),
        ]);
        reconcile(&mut state, Some(&vars));

        assert_eq!(
            state.problem_description.as_deref(),
            Some("AC blows warm air and trips the breaker")
        );
    }

    #[test]
    fn booking_confirmed_sets_booked_even_mid_attempt() {
        let mut state = CallState::new("call-4");
        state.booking_attempted = true;
        reconcile(&mut state, Some(&vars(&[("booking_confirmed", "true")])));
        assert!(state.appointment_booked);
    }

    #[test]
    fn has_appointment_is_ignored_while_booking_is_attempted() {
        let mut state = CallState::new("call-5");
        state.booking_attempted = true;
        reconcile(&mut state, Some(&vars(&[("has_appointment", "true")])));
        assert!(!state.appointment_booked);

        let mut fresh = CallState::new("call-6");
        reconcile(&mut fresh, Some(&vars(&[("has_appointment", "true")])));
        assert!(fresh.appointment_booked);
    }

    #[test]
    fn appointment_booked_is_monotonic() {
        let mut state = CallState::new("call-7");
        state.appointment_booked = true;
        reconcile(
            &mut state,
            Some(&vars(&[("booking_confirmed", "false"), ("has_appointment", "false")])),
        );
        assert!(state.appointment_booked);
    }

    #[test]
    fn zip_code_appends_when_missing_from_address() {
        let mut state = CallState::new("call-8");
        state.service_address = Some("41 Pine St".to_string());
        reconcile(&mut state, Some(&vars(&[("zip_code", "78704")])));
        assert_eq!(state.service_address.as_deref(), Some("41 Pine St, 78704"));

        // Already present: no duplicate append.
        reconcile(&mut state, Some(&vars(&[("zip_code", "78704")])));
        assert_eq!(state.service_address.as_deref(), Some("41 Pine St, 78704"));
    }

    #[test]
    fn urgency_tier_maps_only_into_unset_urgency() {
        let mut state = CallState::new("call-9");
        reconcile(&mut state, Some(&vars(&[("urgency_tier", "same_day")])));
        assert_eq!(state.urgency, Some(Urgency::Urgent));

        reconcile(&mut state, Some(&vars(&[("urgency_tier", "emergency")])));
        assert_eq!(state.urgency, Some(Urgency::Urgent), "set urgency must not be overwritten");

        let mut unknown = CallState::new("call-10");
        reconcile(&mut unknown, Some(&vars(&[("urgency_tier", "sometime")])));
        assert_eq!(unknown.urgency, None);
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let vars = vars(&[
            ("customer_name", "Ray Okafor"),
            ("service_address", "9 Elm Ct"),
            ("zip_code", "30341"),
            ("urgency_tier", "emergency"),
            ("caller_known", "yes"),
            ("has_appointment", "true"),
        ]);

        let mut once = CallState::new("call-11");
        reconcile(&mut once, Some(&vars));
        let mut twice = once.clone();
        reconcile(&mut twice, Some(&vars));

        assert_eq!(once, twice);
    }
}
