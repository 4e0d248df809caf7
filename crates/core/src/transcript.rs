//! Caller/agent transcript line handling and problem-duration extraction.
//!
//! Transcripts arrive as alternating labeled lines ("Agent: ..." /
//! "Caller: ..."). Duration extraction reads caller speech only; an agent
//! repeating "since Monday" back to the caller must not count.

use serde::{Deserialize, Serialize};

use crate::domain::call::DurationCategory;
use crate::signals::first_phrase;

const CALLER_LABELS: [&str; 3] = ["caller:", "customer:", "user:"];

/// Under a day old.
const ACUTE_PHRASES: [&str; 6] =
    ["this morning", "just started", "a few hours", "an hour ago", "tonight", "today"];

/// One to seven days. Checked before the dynamic "N days" / "since
/// <weekday>" forms; the trailing set after them.
const RECENT_LEAD_PHRASES: [&str; 2] = ["yesterday", "last night"];
const RECENT_TRAIL_PHRASES: [&str; 3] = ["a few days", "couple of days", "this week"];

/// Longer than a week.
const ONGOING_PHRASES: [&str; 9] = [
    "a couple weeks",
    "couple of weeks",
    "a few weeks",
    "weeks now",
    "a month",
    "for months",
    "for years",
    "a while",
    "for some time",
];

const WEEKDAYS: [&str; 7] =
    ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationMatch {
    pub phrase: String,
    pub category: DurationCategory,
}

/// Content of caller-labeled lines, label stripped.
pub fn caller_lines(transcript: &str) -> Vec<&str> {
    transcript.lines().filter_map(caller_content).collect()
}

fn caller_content(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let lowered = trimmed.to_lowercase();
    CALLER_LABELS
        .iter()
        .find(|label| lowered.starts_with(*label))
        .map(|label| trimmed[label.len()..].trim())
}

/// Finds the first temporal phrase in caller speech and buckets it.
///
/// Buckets are checked in declaration order (acute, then recent, then
/// ongoing), so a transcript mentioning both "today" and "for years" reads as
/// acute.
pub fn extract_problem_duration(transcript: &str) -> Option<DurationMatch> {
    if transcript.trim().is_empty() {
        return None;
    }
    let speech = caller_lines(transcript).join("\n");
    if speech.is_empty() {
        return None;
    }

    if let Some(phrase) = first_phrase(&speech, &ACUTE_PHRASES) {
        return Some(DurationMatch { phrase: phrase.to_string(), category: DurationCategory::Acute });
    }
    if let Some(phrase) = recent_phrase(&speech) {
        return Some(DurationMatch { phrase, category: DurationCategory::Recent });
    }
    first_phrase(&speech, &ONGOING_PHRASES).map(|phrase| DurationMatch {
        phrase: phrase.to_string(),
        category: DurationCategory::Ongoing,
    })
}

fn recent_phrase(speech: &str) -> Option<String> {
    first_phrase(speech, &RECENT_LEAD_PHRASES)
        .map(str::to_string)
        .or_else(|| number_of_days_phrase(speech))
        .or_else(|| since_weekday_phrase(speech))
        .or_else(|| first_phrase(speech, &RECENT_TRAIL_PHRASES).map(str::to_string))
}

/// Matches "3 days" / "2 day" style counts.
fn number_of_days_phrase(speech: &str) -> Option<String> {
    let tokens = speech.split_whitespace().collect::<Vec<_>>();
    for window in tokens.windows(2) {
        if let [count, unit] = window {
            let unit = unit.trim_matches(|character: char| !character.is_ascii_alphabetic());
            if (unit.eq_ignore_ascii_case("days") || unit.eq_ignore_ascii_case("day"))
                && !count.is_empty()
                && count.chars().all(|character| character.is_ascii_digit())
            {
                return Some(format!("{count} {unit}"));
            }
        }
    }
    None
}

/// Matches "since <weekday>", returned as it appeared in the transcript.
fn since_weekday_phrase(speech: &str) -> Option<String> {
    let tokens = speech.split_whitespace().collect::<Vec<_>>();
    for window in tokens.windows(2) {
        if let [lead, day] = window {
            let day = day.trim_matches(|character: char| !character.is_ascii_alphabetic());
            if lead.eq_ignore_ascii_case("since") && WEEKDAYS.contains(&day.to_lowercase().as_str())
            {
                return Some(format!("{lead} {day}"));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::domain::call::DurationCategory;

    use super::{caller_lines, extract_problem_duration};

    #[test]
    fn strips_caller_labels_and_ignores_agent_lines() {
        let transcript = "Agent: When did this start?\nCaller: It started yesterday.\nAgent: Got it.";
        assert_eq!(caller_lines(transcript), vec!["It started yesterday."]);
    }

    #[test]
    fn agent_only_temporal_phrases_yield_no_duration() {
        let transcript = "Agent: Did it start this morning?\nAgent: Or maybe since Monday?";
        assert_eq!(extract_problem_duration(transcript), None);
    }

    #[test]
    fn acute_bucket_wins_over_ongoing_mention() {
        let transcript =
            "Caller: The AC died today, though it has been weak for years honestly.";
        let found = extract_problem_duration(transcript).expect("duration expected");
        assert_eq!(found.category, DurationCategory::Acute);
        assert_eq!(found.phrase, "today");
    }

    #[test]
    fn numeric_day_counts_bucket_as_recent() {
        let transcript = "Agent: How long?\nCaller: About 3 days, I think.";
        let found = extract_problem_duration(transcript).expect("duration expected");
        assert_eq!(found.category, DurationCategory::Recent);
        assert_eq!(found.phrase, "3 days");
    }

    #[test]
    fn since_weekday_buckets_as_recent_and_keeps_transcript_casing() {
        let transcript = "Caller: The furnace has been rattling since Friday.";
        let found = extract_problem_duration(transcript).expect("duration expected");
        assert_eq!(found.category, DurationCategory::Recent);
        assert_eq!(found.phrase, "since Friday");
    }

    #[test]
    fn ongoing_phrases_bucket_last() {
        let transcript = "Customer: Honestly it has been doing this for months.";
        let found = extract_problem_duration(transcript).expect("duration expected");
        assert_eq!(found.category, DurationCategory::Ongoing);
        assert_eq!(found.phrase, "for months");

        let vague = "Caller: it has been doing this for some time.";
        let found = extract_problem_duration(vague).expect("duration expected");
        assert_eq!(found.category, DurationCategory::Ongoing);
        assert_eq!(found.phrase, "for some time");
    }

    #[test]
    fn empty_or_unlabeled_transcripts_yield_none() {
        assert_eq!(extract_problem_duration(""), None);
        assert_eq!(extract_problem_duration("hello there, no labels here"), None);
    }
}
