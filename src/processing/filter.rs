//! Element filtering for any [`crate::normalize::Collection`].

use crate::normalize::Collection;

/// Returns the elements of the normalized sequence for which `predicate` returns `true`.
///
/// Relative order is preserved. An empty `Vec` is returned when nothing matches.
pub fn filter<C, F>(collection: &C, mut predicate: F) -> Vec<C::Item>
where
    C: Collection + ?Sized,
    F: FnMut(&C::Item) -> bool,
{
    collection
        .normalize()
        .into_iter()
        .filter(|value| predicate(value))
        .collect()
}
