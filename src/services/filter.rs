use crate::models::{BookRecord, Emotion, TONES};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Sentinel accepted for both filters meaning "no preference".
pub const ALL: &str = "All";

static TONE_TABLE: Lazy<HashMap<String, Emotion>> = Lazy::new(|| {
    TONES
        .iter()
        .map(|(label, emotion)| (label.to_lowercase(), *emotion))
        .collect()
});

/// Hard category predicate: absent or "All" passes everything, otherwise
/// case-insensitive exact equality against the record's label. Unknown
/// labels simply never match; the predicate is total and never errors.
pub fn category_matches(record: &BookRecord, category: Option<&str>) -> bool {
    match category {
        None => true,
        Some(label) => {
            let label = label.trim();
            label.eq_ignore_ascii_case(ALL) || record.category.eq_ignore_ascii_case(label)
        }
    }
}

/// Resolve a user-facing tone label to the emotion column it ranks by.
/// Absent, "All", or unrecognized labels mean "no tone preference"; tone
/// is a soft ranking signal, never a hard filter, so a misspelled label
/// degrades to plain similarity order instead of an empty result.
pub fn tone_emotion(tone: Option<&str>) -> Option<Emotion> {
    let label = tone?.trim();
    if label.is_empty() || label.eq_ignore_ascii_case(ALL) {
        return None;
    }
    TONE_TABLE.get(&label.to_lowercase()).copied()
}

/// Tone labels exposed to the UI collaborator, "All" first.
pub fn tone_labels() -> Vec<String> {
    std::iter::once(ALL.to_string())
        .chain(TONES.iter().map(|(label, _)| label.to_string()))
        .collect()
}
