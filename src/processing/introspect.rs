//! Small accessors built on normalization.

use crate::normalize::Collection;
use crate::types::{Truthy, Value};

/// Keys of a record (or decimal indices of a sequence) in enumeration order.
pub fn keys<C: Collection + ?Sized>(collection: &C) -> Vec<String> {
    collection.keys()
}

/// Values in enumeration order; identical to the normalized sequence.
pub fn values<C: Collection + ?Sized>(collection: &C) -> Vec<C::Item> {
    collection.normalize()
}

/// Number of elements (entries, for records).
pub fn size<C: Collection + ?Sized>(collection: &C) -> usize {
    collection.size()
}

/// First element, or `None` if the collection is empty.
pub fn first<C: Collection + ?Sized>(collection: &C) -> Option<C::Item> {
    collection.normalize().into_iter().next()
}

/// The first `n` elements; the whole sequence if it is shorter than `n`.
pub fn first_n<C: Collection + ?Sized>(collection: &C, n: usize) -> Vec<C::Item> {
    let mut values = collection.normalize();
    values.truncate(n);
    values
}

/// Last element, or `None` if the collection is empty.
pub fn last<C: Collection + ?Sized>(collection: &C) -> Option<C::Item> {
    collection.normalize().pop()
}

/// The last `n` elements in their original order; the whole sequence if it is shorter.
pub fn last_n<C: Collection + ?Sized>(collection: &C, n: usize) -> Vec<C::Item> {
    let mut values = collection.normalize();
    let start = values.len().saturating_sub(n);
    values.split_off(start)
}

/// Elements that are truthy (see [`Truthy`]), in order.
pub fn compact<C>(collection: &C) -> Vec<C::Item>
where
    C: Collection + ?Sized,
    C::Item: Truthy,
{
    collection
        .normalize()
        .into_iter()
        .filter(Truthy::is_truthy)
        .collect()
}

/// Sorted names of the entries whose value is a [`Value::Function`].
pub fn functions<C>(collection: &C) -> Vec<String>
where
    C: Collection<Item = Value> + ?Sized,
{
    let mut names: Vec<String> = collection
        .keys()
        .into_iter()
        .zip(collection.normalize())
        .filter(|(_, value)| matches!(value, Value::Function(_)))
        .map(|(key, _)| key)
        .collect();
    names.sort();
    names
}
