//! Linearizing nested sequences.

use crate::normalize::Collection;
use crate::types::Value;

/// An element that may itself be a sequence of elements of the same type.
pub trait Nested: Clone {
    /// Returns the children if this element is a sequence.
    fn as_sequence(&self) -> Option<&[Self]>;
}

impl Nested for Value {
    fn as_sequence(&self) -> Option<&[Value]> {
        self.as_list()
    }
}

impl Nested for serde_json::Value {
    fn as_sequence(&self) -> Option<&[serde_json::Value]> {
        self.as_array().map(Vec::as_slice)
    }
}

/// How far [`flatten`] unwraps nested sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    /// Unwrap every level; only non-sequence leaves remain.
    #[default]
    Deep,
    /// Unwrap only direct children; grandchild sequences stay nested.
    Shallow,
}

/// Flatten the normalized sequence of `collection` into a new `Vec`.
///
/// With [`Depth::Deep`], leaves are emitted depth-first, left to right, regardless of
/// nesting depth (traversal uses an explicit stack, so deep inputs cannot overflow the call
/// stack). With [`Depth::Shallow`], each direct child sequence is spliced into the output
/// as-is.
pub fn flatten<C>(collection: &C, depth: Depth) -> Vec<C::Item>
where
    C: Collection + ?Sized,
    C::Item: Nested,
{
    let values = collection.normalize();
    let mut out = Vec::with_capacity(values.len());

    match depth {
        Depth::Shallow => {
            for value in values {
                match value.as_sequence() {
                    Some(children) => out.extend_from_slice(children),
                    None => out.push(value),
                }
            }
        }
        Depth::Deep => {
            let mut stack = vec![values.iter()];
            while let Some(top) = stack.last_mut() {
                match top.next() {
                    Some(value) => match value.as_sequence() {
                        Some(children) => stack.push(children.iter()),
                        None => out.push(value.clone()),
                    },
                    None => {
                        stack.pop();
                    }
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{flatten, Depth};
    use crate::types::Value;
    use serde_json::json;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Int64).collect()
    }

    fn nested_sample() -> Value {
        // [1, [2, 3], [[4, 5], 6, [7, [8, 9]]]]
        Value::list([
            Value::from(1),
            Value::list([2, 3]),
            Value::list([
                Value::list([4, 5]),
                Value::from(6),
                Value::list([Value::from(7), Value::list([8, 9])]),
            ]),
        ])
    }

    #[test]
    fn deep_flatten_emits_all_leaves_in_order() {
        let input = nested_sample();
        assert_eq!(
            flatten(&input, Depth::default()),
            ints(&[1, 2, 3, 4, 5, 6, 7, 8, 9])
        );
    }

    #[test]
    fn shallow_flatten_unwraps_one_level() {
        let input = nested_sample();
        let out = flatten(&input, Depth::Shallow);
        assert_eq!(
            out,
            vec![
                Value::from(1),
                Value::from(2),
                Value::from(3),
                Value::list([4, 5]),
                Value::from(6),
                Value::list([Value::from(7), Value::list([8, 9])]),
            ]
        );
    }

    #[test]
    fn flatten_does_not_modify_input() {
        let input = nested_sample();
        let _ = flatten(&input, Depth::Deep);
        let _ = flatten(&input, Depth::Shallow);
        assert_eq!(input, nested_sample());
    }

    #[test]
    fn empty_children_disappear() {
        let input = Value::list([Value::list(Vec::<Value>::new()), Value::from(1)]);
        assert_eq!(flatten(&input, Depth::Deep), ints(&[1]));
        assert_eq!(flatten(&input, Depth::Shallow), ints(&[1]));
    }

    #[test]
    fn deep_nesting_is_handled() {
        let mut value = Value::from(0);
        for i in 1..2_000 {
            value = Value::List(vec![value, Value::from(i)]);
        }
        let out = flatten(&vec![value], Depth::Deep);
        assert_eq!(out.len(), 2_000);
        assert_eq!(out[0], Value::from(0));
        assert_eq!(out[1_999], Value::from(1_999));
    }

    #[test]
    fn flattens_json_arrays() {
        let input = json!([1, [2, [3, [4]]], "x"]);
        let out = flatten(input.as_array().unwrap(), Depth::Deep);
        assert_eq!(out, vec![json!(1), json!(2), json!(3), json!(4), json!("x")]);
    }
}
