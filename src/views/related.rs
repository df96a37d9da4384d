//! Related-content and featured subsets

use std::collections::HashSet;

use super::Listing;

/// Candidates sharing at least one tag with `current`, most shared tags first
///
/// `current` itself is excluded by slug. Ties keep candidate order.
pub fn related_by_tag_overlap<'a, C, T>(
    current: &C,
    candidates: &'a [T],
    limit: usize,
) -> Vec<&'a T>
where
    C: Listing + ?Sized,
    T: Listing,
{
    let current_tags = current.tags();
    if current_tags.is_empty() {
        return Vec::new();
    }
    let wanted: HashSet<&str> = current_tags.iter().map(String::as_str).collect();

    let mut scored: Vec<(usize, &T)> = candidates
        .iter()
        .filter(|candidate| candidate.slug() != current.slug())
        .filter_map(|candidate| {
            let overlap = candidate
                .tags()
                .iter()
                .filter(|tag| wanted.contains(tag.as_str()))
                .count();
            (overlap > 0).then_some((overlap, candidate))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, c)| c).collect()
}

/// Featured records in input order, at most `limit`
pub fn filter_featured<T: Listing>(records: &[T], limit: usize) -> Vec<&T> {
    records.iter().filter(|r| r.featured()).take(limit).collect()
}
