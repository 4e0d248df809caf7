use serde::{Deserialize, Serialize};

pub const TOOL_TRANSITION_TO_BOOKING: &str = "transition_to_booking";
pub const TOOL_BOOK_SERVICE: &str = "book_service";
pub const TOOL_BOOK_APPOINTMENT: &str = "book_appointment";

/// True for tools that talk to the booking provider directly.
pub fn is_booking_tool(name: &str) -> bool {
    matches!(name, TOOL_BOOK_SERVICE | TOOL_BOOK_APPOINTMENT)
}

/// One entry of the ordered tool-call log the voice platform emits during a
/// call. `arguments` and `content` are serialized JSON carried as strings on
/// the wire; `tool_call_id` correlates an invocation with its result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum TraceEntry {
    ToolCallInvocation {
        name: String,
        #[serde(default)]
        arguments: Option<String>,
        tool_call_id: String,
    },
    ToolCallResult {
        tool_call_id: String,
        #[serde(default)]
        successful: bool,
        #[serde(default)]
        content: Option<String>,
    },
}

impl TraceEntry {
    pub fn invocation(
        name: impl Into<String>,
        arguments: impl Into<String>,
        tool_call_id: impl Into<String>,
    ) -> Self {
        Self::ToolCallInvocation {
            name: name.into(),
            arguments: Some(arguments.into()),
            tool_call_id: tool_call_id.into(),
        }
    }

    pub fn result(tool_call_id: impl Into<String>, successful: bool, content: impl Into<String>) -> Self {
        Self::ToolCallResult {
            tool_call_id: tool_call_id.into(),
            successful,
            content: Some(content.into()),
        }
    }
}

/// Argument bundle sent to booking-stage tools.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct BookingArguments {
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
}

/// Result payload returned by the booking provider. `booked` is the legacy
/// flag; `booking_confirmed` is the newer alias. Either must be an explicit
/// `true` to count as a confirmed booking.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct BookingResult {
    #[serde(default)]
    pub booked: Option<bool>,
    #[serde(default)]
    pub booking_confirmed: Option<bool>,
    #[serde(default)]
    pub appointment_date: Option<String>,
    #[serde(default)]
    pub appointment_time: Option<String>,
    #[serde(default)]
    pub booking_time: Option<String>,
}

impl BookingResult {
    pub fn confirmed(&self) -> bool {
        self.booked == Some(true) || self.booking_confirmed == Some(true)
    }

    /// Best available booked-slot string: combined date+time when both are
    /// present, else time alone, else the freeform booking time.
    pub fn booked_slot(&self) -> Option<String> {
        match (&self.appointment_date, &self.appointment_time) {
            (Some(date), Some(time)) => Some(format!("{date} at {time}")),
            (_, Some(time)) => Some(time.clone()),
            _ => self.booking_time.clone(),
        }
    }
}
