//! Element mapping for any [`crate::normalize::Collection`].

use crate::normalize::Collection;

/// Returns a new `Vec` by applying `mapper` to every element of the normalized sequence.
///
/// The output has the same length and order as the input; the input is left untouched.
pub fn map<C, U, F>(collection: &C, mut mapper: F) -> Vec<U>
where
    C: Collection + ?Sized,
    F: FnMut(&C::Item) -> U,
{
    let values = collection.normalize();
    let mut out = Vec::with_capacity(values.len());
    for value in &values {
        out.push(mapper(value));
    }
    out
}
