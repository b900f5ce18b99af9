//! Majority-vote consensus over repeated samples

use std::borrow::Cow;
use std::hash::Hash;

use indexmap::IndexMap;

use super::normalize::normalize;

/// Most frequent key among `items`.
///
/// Ties go to the key whose first occurrence comes earliest in `items`, so the
/// result is stable across runs. Returns `None` for an empty slice.
pub fn majority_vote<T, K, F>(items: &[T], mut key: F) -> Option<K>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    // IndexMap keeps first-occurrence order for the tie-break.
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for item in items {
        *counts.entry(key(item)).or_insert(0) += 1;
    }

    let mut best: Option<(K, usize)> = None;
    for (candidate, count) in counts {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((candidate, count));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Representative prediction for one record's sampled answers.
///
/// A single answer is returned verbatim; several answers are normalized and
/// voted on.
pub fn resolve_consensus(answers: &[String]) -> Option<Cow<'_, str>> {
    match answers {
        [] => None,
        [only] => Some(Cow::Borrowed(only.as_str())),
        many => majority_vote(many, |answer| normalize(answer)).map(Cow::Owned),
    }
}
