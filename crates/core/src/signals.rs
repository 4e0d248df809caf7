//! Negation-aware phrase matching over call transcripts.
//!
//! All matching is case-insensitive. A phrase counts as present only when at
//! least one occurrence is not preceded, within a fixed window, by a negation
//! marker ("no gas smell reported" must not read as a gas leak).

/// Characters scanned immediately before a match for a negation marker.
const NEGATION_WINDOW: usize = 40;

const NEGATION_MARKERS: [&str; 4] = ["no", "not", "never", "without"];

/// True if `phrase` occurs in `text` and at least one occurrence is not
/// negated. Total: empty text or phrase always yields false.
pub fn phrase_present(text: &str, phrase: &str) -> bool {
    if text.is_empty() || phrase.is_empty() {
        return false;
    }
    let text = text.to_lowercase();
    let phrase = phrase.to_lowercase();

    let mut from = 0;
    while let Some(offset) = text[from..].find(&phrase) {
        let start = from + offset;
        if !negated_before(&text, start) {
            return true;
        }
        from = start + 1;
    }
    false
}

/// Plain case-insensitive containment, for rules where negation does not
/// change the meaning (access codes, financing requests).
pub fn phrase_occurs(text: &str, phrase: &str) -> bool {
    if text.is_empty() || phrase.is_empty() {
        return false;
    }
    text.to_lowercase().contains(&phrase.to_lowercase())
}

/// Applies `phrase_present` or `phrase_occurs` across a phrase family.
pub fn any_phrase(text: &str, phrases: &[impl AsRef<str>], negation_aware: bool) -> bool {
    phrases.iter().any(|phrase| {
        if negation_aware {
            phrase_present(text, phrase.as_ref())
        } else {
            phrase_occurs(text, phrase.as_ref())
        }
    })
}

/// First phrase of the family found in `text`, in declaration order.
pub fn first_phrase<'a>(text: &str, phrases: &'a [&str]) -> Option<&'a str> {
    phrases.iter().copied().find(|phrase| phrase_occurs(text, phrase))
}

fn negated_before(text: &str, match_start: usize) -> bool {
    let mut window_start = match_start.saturating_sub(NEGATION_WINDOW);
    while !text.is_char_boundary(window_start) {
        window_start -= 1;
    }
    let window = &text[window_start..match_start];

    window
        .split(|character: char| !character.is_ascii_alphanumeric() && character != '\'')
        .any(|token| NEGATION_MARKERS.contains(&token) || token.ends_with("n't"))
}
