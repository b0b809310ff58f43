//! Preference ordering.

use crate::core::types::Preference;
use std::cmp::Ordering;

/// Orders two preferences: higher quality first, then more parameters first.
#[inline]
#[must_use]
pub fn compare_preferences(a: &Preference, b: &Preference) -> Ordering {
    b.quality()
        .total_cmp(&a.quality())
        .then_with(|| b.specificity().cmp(&a.specificity()))
}

/// Sorts preferences in place by [`compare_preferences`].
///
/// The sort is stable, so entries that compare equal keep header order, and
/// sorting an already sorted slice leaves it unchanged.
pub fn sort_preferences(entries: &mut [Preference]) {
    entries.sort_by(compare_preferences);
}
