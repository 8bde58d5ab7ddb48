use std::collections::HashMap;

use crate::common::util::is_set;

/// Wildcard-aware string equality: an unset or empty pattern value matches
/// anything, a set pattern value requires the candidate value to be set and
/// string-equal.
pub(crate) fn strings_match(pattern_value: Option<&str>, candidate_value: Option<&str>) -> bool {
    if !is_set(pattern_value) {
        return true;
    }

    if is_set(candidate_value) {
        return pattern_value == candidate_value;
    }

    false
}

/// An empty pattern set matches anything; otherwise at least one candidate
/// entry must be contained in the pattern set.
pub(crate) fn arrays_intersect(pattern_values: &[String], candidate_values: &[String]) -> bool {
    if pattern_values.is_empty() {
        return true;
    }

    candidate_values
        .iter()
        .any(|entry| pattern_values.contains(entry))
}

/// Superset containment: every pattern entry must be present in the candidate
/// map with exact value equality. Extra candidate entries are ignored.
pub(crate) fn map_contains(
    pattern_map: &HashMap<String, String>,
    candidate_map: &HashMap<String, String>,
) -> bool {
    pattern_map
        .iter()
        .all(|(name, value)| candidate_map.get(name).map_or(false, |cv| cv == value))
}

/// Superset containment over ordered pair lists, same rule as
/// [`map_contains`].
pub(crate) fn pairs_contain(
    pattern_pairs: &[(String, String)],
    candidate_pairs: &[(String, String)],
) -> bool {
    pattern_pairs.iter().all(|(name, value)| {
        candidate_pairs
            .iter()
            .any(|(cn, cv)| cn == name && cv == value)
    })
}
