//! Orderings for list pages

use std::cmp::Ordering;

use super::Listing;

/// Newest first. Records without a usable date go last, in input order.
pub fn sort_by_date_desc<T: Listing>(records: &mut [T]) {
    // Option orders None below Some, so reversing puts undated records last
    records.sort_by(|a, b| b.date().cmp(&a.date()));
}

/// Featured records first, each partition newest first
pub fn sort_by_featured_then_date<T: Listing>(records: &mut [T]) {
    records.sort_by(|a, b| {
        b.featured()
            .cmp(&a.featured())
            .then_with(|| b.date().cmp(&a.date()))
    });
}

/// Highest rating first, then most recently added
pub fn sort_by_rating_then_date_added<T: Listing>(records: &mut [T]) {
    records.sort_by(|a, b| {
        cmp_rating(b.rating(), a.rating()).then_with(|| b.date_added().cmp(&a.date_added()))
    });
}

/// The `limit` newest records
pub fn latest<T: Listing>(mut records: Vec<T>, limit: usize) -> Vec<T> {
    sort_by_date_desc(&mut records);
    records.truncate(limit);
    records
}

/// Missing ratings rank below every rating, NaN included
fn cmp_rating(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
