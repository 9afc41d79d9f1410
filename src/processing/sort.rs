//! Key-based ordering.

use std::cmp::Ordering;

use crate::normalize::Collection;

/// Returns a new `Vec` ordered ascending by `key_fn(value)`.
///
/// Keys are derived once per element and compared with [`PartialOrd`]; keys that are
/// incomparable (e.g. `NaN`, or a string against a number) compare as equal. The sort is
/// stable, so elements with equal keys keep their original relative order, and it never
/// panics on key types without a total order.
pub fn sort_by<C, K, F>(collection: &C, mut key_fn: F) -> Vec<C::Item>
where
    C: Collection + ?Sized,
    K: PartialOrd,
    F: FnMut(&C::Item) -> K,
{
    let values = collection.normalize();
    let keys: Vec<K> = values.iter().map(&mut key_fn).collect();
    let order = stable_order(&keys);

    let mut slots: Vec<Option<C::Item>> = values.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}

/// Bottom-up merge sort over indices into `keys`.
///
/// `PartialOrd` keys need not form a total order, so this never relies on one: a
/// right-hand element only moves ahead of a left-hand one when it is strictly less.
fn stable_order<K: PartialOrd>(keys: &[K]) -> Vec<usize> {
    let n = keys.len();
    let mut order: Vec<usize> = (0..n).collect();
    let mut buf = order.clone();

    let mut width = 1;
    while width < n {
        for start in (0..n).step_by(2 * width) {
            let mid = (start + width).min(n);
            let end = (start + 2 * width).min(n);
            let (mut i, mut j) = (start, mid);
            for slot in &mut buf[start..end] {
                let take_right = j < end
                    && (i >= mid
                        || compare_keys(&keys[order[j]], &keys[order[i]]) == Ordering::Less);
                if take_right {
                    *slot = order[j];
                    j += 1;
                } else {
                    *slot = order[i];
                    i += 1;
                }
            }
        }
        std::mem::swap(&mut order, &mut buf);
        width *= 2;
    }
    order
}

fn compare_keys<K: PartialOrd>(a: &K, b: &K) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}
