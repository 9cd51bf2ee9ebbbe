//! Similarity ranking of users by name.
//!
//! The score is the length of the longest run of characters shared
//! contiguously by the lower-cased query and the lower-cased name. Scoring is
//! O(|query|·|name|) per candidate, so callers are expected to pre-filter the
//! candidate set (by location) before ranking.

/// Length of the longest common contiguous substring of `a` and `b`, in chars.
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut best = 0;

    for i in 0..a.len() {
        for j in 0..b.len() {
            let run = a[i..]
                .iter()
                .zip(&b[j..])
                .take_while(|(x, y)| x == y)
                .count();
            best = best.max(run);
        }
    }

    best
}

/// Case-insensitive similarity between a query and a name.
pub fn similarity(query: &str, name: &str) -> usize {
    longest_common_substring(&query.to_lowercase(), &name.to_lowercase())
}

/// Reorders every candidate by descending similarity of `name_of(candidate)` to
/// `query`. Nothing is dropped; equal scores keep their input order.
pub fn rank_by_similarity<T, F>(query: &str, candidates: Vec<T>, name_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut scored: Vec<(usize, T)> = candidates
        .into_iter()
        .map(|c| {
            let score = similarity(query, name_of(&c));
            (score, c)
        })
        .collect();

    // stable: ties stay in input order
    scored.sort_by(|(a, _), (b, _)| b.cmp(a));
    scored.into_iter().map(|(_, c)| c).collect()
}
