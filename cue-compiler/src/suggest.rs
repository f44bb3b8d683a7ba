//! Levenshtein-based suggestion engine shared by the name resolver and the
//! operation validator.
//!
//! Suggestions are advisory hints, never auto-applied: matching is
//! case-insensitive, candidates further than [`MAX_DISTANCE`] edits away are
//! dropped, survivors are ranked ascending by distance (ties
//! alphabetically) and capped at [`MAX_SUGGESTIONS`].

/// Maximum edit distance for a candidate to qualify as a suggestion.
pub const MAX_DISTANCE: usize = 3;

/// Maximum number of suggestions attached to one error.
pub const MAX_SUGGESTIONS: usize = 3;

/// Classic two-row Levenshtein distance over unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

/// Rank `candidates` against `input` and keep the closest few.
pub fn suggest<'a>(input: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let needle = input.to_lowercase();
    let mut scored: Vec<(usize, &str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let distance = levenshtein(&needle, &candidate.to_lowercase());
            (distance <= MAX_DISTANCE).then_some((distance, candidate))
        })
        .collect();

    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

/// Format suggestions as a "did you mean" hint, or `None` when there is
/// nothing close enough to offer.
pub fn did_you_mean(suggestions: &[String]) -> Option<String> {
    match suggestions {
        [] => None,
        [only] => Some(format!("did you mean '{only}'?")),
        many => {
            let quoted: Vec<String> = many.iter().map(|s| format!("'{s}'")).collect();
            Some(format!("did you mean one of {}?", quoted.join(", ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distances() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("selectElemnt", "selectElement"), 1);
    }

    #[test]
    fn test_suggest_is_case_insensitive() {
        let got = suggest("FADEIN", ["fadeIn", "fadeOut", "unrelated"]);
        assert_eq!(got, vec!["fadeIn".to_string()]);
    }

    #[test]
    fn test_suggest_ranks_ascending_and_caps_at_three() {
        let got = suggest("abc", ["abcd", "abcde", "abcdef", "abc", "zzzzzz"]);
        assert_eq!(got, vec!["abc", "abcd", "abcde"]);
    }

    #[test]
    fn test_suggest_drops_distant_candidates() {
        assert!(suggest("wait", ["broadcastEvent"]).is_empty());
    }

    #[test]
    fn test_everything_within_three_edits_is_suggested() {
        // Any candidate within three edits must show up.
        for candidate in ["fade", "fadeIn", "faded", "fad"] {
            let got = suggest("fade", [candidate]);
            assert_eq!(got, vec![candidate.to_string()], "candidate {candidate}");
        }
    }

    #[test]
    fn test_did_you_mean_phrasing() {
        assert_eq!(did_you_mean(&[]), None);
        assert_eq!(
            did_you_mean(&["wait".into()]).as_deref(),
            Some("did you mean 'wait'?")
        );
        assert_eq!(
            did_you_mean(&["wait".into(), "want".into()]).as_deref(),
            Some("did you mean one of 'wait', 'want'?")
        );
    }
}
