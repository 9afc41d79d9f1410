//! Input normalization.
//!
//! Every utility first turns its collection argument into a *normalized sequence*: a freshly
//! allocated `Vec` of the collection's values in enumeration order. Sequences are copied
//! element by element; records contribute their values. The caller's storage is never
//! aliased or mutated.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;

use crate::types::{Record, Value};

/// A collection that can be normalized into an ordered sequence of values.
///
/// Implemented for sequences (`[T]`, `[T; N]`, `Vec<T>`, `VecDeque<T>`), records
/// ([`Record`], `BTreeMap`, `HashMap`) and [`Value`].
pub trait Collection {
    /// Element type of the normalized sequence.
    type Item: Clone;

    /// Returns a fresh, ordered copy of the collection's values.
    fn normalize(&self) -> Vec<Self::Item>;

    /// Returns the collection's keys in the same order as [`Self::normalize`].
    ///
    /// Sequences report their indices as decimal strings.
    fn keys(&self) -> Vec<String>;

    /// Number of values in the normalized sequence.
    fn size(&self) -> usize {
        self.normalize().len()
    }
}

fn index_keys(len: usize) -> Vec<String> {
    (0..len).map(|i| i.to_string()).collect()
}

impl<T: Clone> Collection for [T] {
    type Item = T;

    fn normalize(&self) -> Vec<T> {
        self.to_vec()
    }

    fn keys(&self) -> Vec<String> {
        index_keys(self.len())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: Clone, const N: usize> Collection for [T; N] {
    type Item = T;

    fn normalize(&self) -> Vec<T> {
        self.to_vec()
    }

    fn keys(&self) -> Vec<String> {
        index_keys(N)
    }

    fn size(&self) -> usize {
        N
    }
}

impl<T: Clone> Collection for Vec<T> {
    type Item = T;

    fn normalize(&self) -> Vec<T> {
        self.as_slice().normalize()
    }

    fn keys(&self) -> Vec<String> {
        index_keys(self.len())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T: Clone> Collection for VecDeque<T> {
    type Item = T;

    fn normalize(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    fn keys(&self) -> Vec<String> {
        index_keys(self.len())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<V: Clone> Collection for Record<V> {
    type Item = V;

    fn normalize(&self) -> Vec<V> {
        self.values().cloned().collect()
    }

    fn keys(&self) -> Vec<String> {
        Record::keys(self).map(str::to_string).collect()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<K: ToString, V: Clone> Collection for BTreeMap<K, V> {
    type Item = V;

    fn normalize(&self) -> Vec<V> {
        self.values().cloned().collect()
    }

    fn keys(&self) -> Vec<String> {
        BTreeMap::keys(self).map(ToString::to_string).collect()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

/// Enumeration follows the map's own (unspecified but stable) iteration order.
impl<K: ToString, V: Clone, S: BuildHasher> Collection for HashMap<K, V, S> {
    type Item = V;

    fn normalize(&self) -> Vec<V> {
        self.values().cloned().collect()
    }

    fn keys(&self) -> Vec<String> {
        HashMap::keys(self).map(ToString::to_string).collect()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

/// Lists and records normalize to their elements; scalars and functions have no
/// enumerable values and normalize to an empty sequence.
impl Collection for Value {
    type Item = Value;

    fn normalize(&self) -> Vec<Value> {
        match self {
            Value::List(items) => items.normalize(),
            Value::Record(record) => record.normalize(),
            _ => Vec::new(),
        }
    }

    fn keys(&self) -> Vec<String> {
        match self {
            Value::List(items) => index_keys(items.len()),
            Value::Record(record) => Collection::keys(record),
            _ => Vec::new(),
        }
    }

    fn size(&self) -> usize {
        match self {
            Value::List(items) => items.len(),
            Value::Record(record) => record.len(),
            _ => 0,
        }
    }
}

impl<C: Collection + ?Sized> Collection for &C {
    type Item = C::Item;

    fn normalize(&self) -> Vec<Self::Item> {
        (**self).normalize()
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }

    fn size(&self) -> usize {
        (**self).size()
    }
}

#[cfg(test)]
mod tests {
    use super::Collection;
    use crate::types::{Record, Value};
    use std::collections::BTreeMap;

    fn sample_record() -> Record<i64> {
        [("one", 1), ("two", 2), ("three", 3), ("four", 4)]
            .into_iter()
            .collect()
    }

    #[test]
    fn sequence_is_copied_in_order() {
        let input = vec![3, 1, 2];
        let mut out = input.normalize();
        out.push(9);
        assert_eq!(input, vec![3, 1, 2]);
        assert_eq!(out, vec![3, 1, 2, 9]);
        assert_eq!(input.keys(), vec!["0", "1", "2"]);
    }

    #[test]
    fn record_values_follow_insertion_order() {
        let r = sample_record();
        assert_eq!(r.normalize(), vec![1, 2, 3, 4]);
        assert_eq!(Collection::keys(&r), vec!["one", "two", "three", "four"]);
        assert_eq!(r.size(), 4);
    }

    #[test]
    fn btree_map_uses_key_order() {
        let m: BTreeMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(m.normalize(), vec![1, 2]);
        assert_eq!(Collection::keys(&m), vec!["a", "b"]);
    }

    #[test]
    fn value_dispatches_on_kind() {
        let list = Value::list([1, 2]);
        let rec = Value::record([("x", 10), ("y", 20)]);
        assert_eq!(list.normalize(), vec![Value::Int64(1), Value::Int64(2)]);
        assert_eq!(rec.normalize(), vec![Value::Int64(10), Value::Int64(20)]);
        assert_eq!(rec.keys(), vec!["x", "y"]);
        assert!(Value::Int64(5).normalize().is_empty());
        assert_eq!(Value::Null.size(), 0);
    }
}
