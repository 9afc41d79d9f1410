//! Side-effecting iteration over a collection.

use crate::normalize::Collection;

/// Calls `f` once per element of the normalized sequence, in order, and returns `collection`
/// itself so calls can be chained on the original value.
///
/// `each` never mutates `collection`; only `f` may have side effects.
pub fn each<'a, C, F>(collection: &'a C, mut f: F) -> &'a C
where
    C: Collection + ?Sized,
    F: FnMut(&C::Item),
{
    for value in &collection.normalize() {
        f(value);
    }
    collection
}
