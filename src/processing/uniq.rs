//! Duplicate removal.
//!
//! Three policies are available:
//!
//! - [`Sortedness::Unsorted`] (default): first-seen-order dedup by equality. Quadratic in
//!   the worst case because only [`PartialEq`] is required; use [`uniq_hashed`] for large
//!   `Eq + Hash` inputs.
//! - [`Sortedness::Presorted`]: linear scan that drops only *adjacent* duplicates.
//! - [`uniq_by`]: elements are duplicates when their derived keys are equal.
//!
//! # Presorted precondition
//!
//! [`Sortedness::Presorted`] trusts the caller. On input whose equal elements are not
//! adjacent it silently keeps the later copies: `[1, 2, 1]` stays `[1, 2, 1]`. When the
//! element type is ordered, [`uniq_sorted_checked`] performs the same scan but rejects
//! unsorted input with [`CollectionError::NotSorted`].

use std::collections::HashSet;
use std::hash::Hash;

use tracing::warn;

use crate::error::{CollectionError, CollectionResult};
use crate::normalize::Collection;

/// Whether the caller guarantees that equal elements are adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sortedness {
    /// No ordering assumption.
    #[default]
    Unsorted,
    /// Input is sorted; only adjacent duplicates are removed.
    Presorted,
}

/// Remove duplicate elements, keeping the first occurrence of each.
///
/// See the module documentation for the [`Sortedness::Presorted`] precondition.
pub fn uniq<C>(collection: &C, sortedness: Sortedness) -> Vec<C::Item>
where
    C: Collection + ?Sized,
    C::Item: PartialEq,
{
    let values = collection.normalize();
    let mut out: Vec<C::Item> = Vec::with_capacity(values.len());
    for value in values {
        let duplicate = match sortedness {
            Sortedness::Unsorted => out.contains(&value),
            Sortedness::Presorted => out.last() == Some(&value),
        };
        if !duplicate {
            out.push(value);
        }
    }
    out
}

/// Remove elements whose `key_fn` result equals that of an earlier element.
///
/// The first-seen element (not merely its key) is kept, and output follows first-seen order.
/// With [`Sortedness::Presorted`], only consecutive equal keys are collapsed.
pub fn uniq_by<C, K, F>(collection: &C, sortedness: Sortedness, mut key_fn: F) -> Vec<C::Item>
where
    C: Collection + ?Sized,
    K: PartialEq,
    F: FnMut(&C::Item) -> K,
{
    let values = collection.normalize();
    let mut out = Vec::with_capacity(values.len());
    let mut seen: Vec<K> = Vec::new();
    for value in values {
        let key = key_fn(&value);
        let duplicate = match sortedness {
            Sortedness::Unsorted => seen.contains(&key),
            Sortedness::Presorted => seen.last() == Some(&key),
        };
        if !duplicate {
            match sortedness {
                Sortedness::Unsorted => seen.push(key),
                Sortedness::Presorted => seen = vec![key],
            }
            out.push(value);
        }
    }
    out
}

/// Linear-time first-seen-order dedup for hashable elements.
///
/// Produces the same result as `uniq(collection, Sortedness::Unsorted)`.
pub fn uniq_hashed<C>(collection: &C) -> Vec<C::Item>
where
    C: Collection + ?Sized,
    C::Item: Eq + Hash,
{
    let values = collection.normalize();
    let mut seen = HashSet::with_capacity(values.len());
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}

/// Adjacent-duplicate removal that verifies the input really is sorted.
///
/// Fails with [`CollectionError::NotSorted`] at the first element that is strictly less
/// than its predecessor. Incomparable neighbours are accepted.
pub fn uniq_sorted_checked<C>(collection: &C) -> CollectionResult<Vec<C::Item>>
where
    C: Collection + ?Sized,
    C::Item: PartialOrd,
{
    let values = collection.normalize();
    let mut out: Vec<C::Item> = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        if let Some(prev) = out.last() {
            if value < *prev {
                warn!(index, "uniq input declared sorted is out of order");
                return Err(CollectionError::NotSorted { index });
            }
            if value == *prev {
                continue;
            }
        }
        out.push(value);
    }
    Ok(out)
}
