//! Weighted value selection.

use rand::Rng;

/// Draw one value from a weighted list with a cumulative scan.
///
/// The scan returns the first value whose cumulative weight strictly
/// exceeds a uniform anchor in `[0, 1)`, falling back to the first element
/// when the mass never crosses it. Callers may pass a filtered subset of a
/// distribution with its original weights; the fallback then favors the
/// leading values instead of renormalizing.
pub(crate) fn pick_weighted<'a>(choices: &[(&'a str, f64)], rng: &mut impl Rng) -> Option<&'a str> {
    let anchor: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (value, weight) in choices {
        cumulative += weight;
        if cumulative > anchor {
            return Some(value);
        }
    }
    choices.first().map(|(value, _)| *value)
}
