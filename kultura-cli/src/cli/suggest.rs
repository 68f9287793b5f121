//! Fuzzy country-name suggestions for error messages.
//!
//! A mistyped country name first tries case-insensitive containment (so
//! `brazil` finds `Brazil` and `states` finds `United States`), then falls
//! back to smallest edit distance within a small cap. Containment requires
//! at least three query characters; ties keep the first candidate in
//! iteration order.

const MAX_EDIT_DISTANCE: usize = 3;
const MIN_CONTAINMENT_LEN: usize = 3;

/// Picks the catalogued name closest to `query`, if any is plausible.
pub(super) fn closest_match<'a>(
    names: impl Iterator<Item = &'a str>,
    query: &str,
) -> Option<String> {
    let query_lower = query.to_lowercase();
    let mut containment: Option<&str> = None;
    let mut best: Option<(usize, &str)> = None;
    for name in names {
        let name_lower = name.to_lowercase();
        // Containment needs a few characters of signal, otherwise a stray
        // `u` would match the first name containing it.
        if containment.is_none()
            && query_lower.chars().count() >= MIN_CONTAINMENT_LEN
            && (name_lower.contains(&query_lower) || query_lower.contains(&name_lower))
        {
            containment = Some(name);
        }
        let distance = edit_distance(&name_lower, &query_lower);
        if best.is_none_or(|(lowest, _)| distance < lowest) {
            best = Some((distance, name));
        }
    }
    if let Some(name) = containment {
        return Some(name.to_owned());
    }
    best.and_then(|(distance, name)| (distance <= MAX_EDIT_DISTANCE).then(|| name.to_owned()))
}

/// Levenshtein distance over Unicode scalar values.
fn edit_distance(left: &str, right: &str) -> usize {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();
    if left.is_empty() {
        return right.len();
    }
    if right.is_empty() {
        return left.len();
    }

    let mut previous: Vec<usize> = (0..=right.len()).collect();
    let mut current = vec![0_usize; right.len() + 1];
    for (i, &l) in left.iter().enumerate() {
        current[0] = i + 1;
        for (j, &r) in right.iter().enumerate() {
            let substitution = previous[j] + usize::from(l != r);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[right.len()]
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const NAMES: [&str; 4] = ["Germany", "Japan", "United States", "Great Britain"];

    #[rstest]
    #[case("germany", "Germany")]
    #[case("states", "United States")]
    #[case("Japn", "Japan")]
    #[case("Grmany", "Germany")]
    fn plausible_typos_find_their_country(#[case] query: &str, #[case] expected: &str) {
        let found = closest_match(NAMES.iter().copied(), query);
        assert_eq!(found.as_deref(), Some(expected));
    }

    #[rstest]
    fn distant_queries_yield_nothing() {
        assert_eq!(closest_match(NAMES.iter().copied(), "Xyzzyplugh"), None);
        assert_eq!(closest_match(NAMES.iter().copied(), ""), None);
    }

    #[rstest]
    #[case("u")]
    #[case("us")]
    fn queries_too_short_for_containment_fall_through(#[case] query: &str) {
        // "United States" contains both, but a one- or two-character query
        // carries no signal; only the edit-distance cap applies, and every
        // name is farther than that.
        assert_eq!(closest_match(NAMES.iter().copied(), query), None);
    }

    #[rstest]
    #[case("", "abc", 3)]
    #[case("kitten", "sitting", 3)]
    #[case("Japan", "Japan", 0)]
    fn edit_distance_matches_known_values(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: usize,
    ) {
        assert_eq!(edit_distance(left, right), expected);
    }
}
