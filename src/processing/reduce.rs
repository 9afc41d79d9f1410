//! Left folds over any [`crate::normalize::Collection`].

use crate::error::{CollectionError, CollectionResult};
use crate::normalize::Collection;

/// Fold the normalized sequence left-to-right into an accumulator.
///
/// `reducer` receives the accumulator, the current element and the sequence being folded.
///
/// - With `initial = Some(seed)`, folding starts from `seed` over every element. Any seed is
///   honored, including zero-like values.
/// - With `initial = None`, the first element seeds the accumulator and folding continues
///   over the remaining elements; the sequence passed to `reducer` is that remainder.
///
/// Returns [`CollectionError::EmptyWithoutSeed`] when the collection is empty and no seed was
/// given. An empty collection with a seed returns the seed unchanged.
pub fn reduce<C, F>(
    collection: &C,
    mut reducer: F,
    initial: Option<C::Item>,
) -> CollectionResult<C::Item>
where
    C: Collection + ?Sized,
    F: FnMut(C::Item, &C::Item, &[C::Item]) -> C::Item,
{
    let values = collection.normalize();
    let (seed, rest) = match initial {
        Some(seed) => (seed, values.as_slice()),
        None => match values.split_first() {
            Some((first, rest)) => (first.clone(), rest),
            None => return Err(CollectionError::EmptyWithoutSeed),
        },
    };

    Ok(rest.iter().fold(seed, |acc, value| reducer(acc, value, rest)))
}

/// Fold the normalized sequence into an accumulator of any type.
///
/// Unlike [`reduce`], the seed is mandatory, so this never fails.
pub fn fold<C, A, F>(collection: &C, init: A, mut folder: F) -> A
where
    C: Collection + ?Sized,
    F: FnMut(A, &C::Item) -> A,
{
    collection
        .normalize()
        .iter()
        .fold(init, |acc, value| folder(acc, value))
}

#[cfg(test)]
mod tests {
    use super::{fold, reduce};
    use crate::error::CollectionError;
    use crate::types::{Record, Value};

    fn sum_times_three(acc: i64, v: &i64, _seq: &[i64]) -> i64 {
        acc + v * 3
    }

    #[test]
    fn reduce_with_seed() {
        let input = vec![1, 2, 3, 4];
        assert_eq!(reduce(&input, sum_times_three, Some(10)).unwrap(), 40);
        assert_eq!(input, vec![1, 2, 3, 4]);
    }

    #[test]
    fn reduce_without_seed_uses_first_element() {
        let input = vec![1, 2, 3, 4];
        assert_eq!(reduce(&input, sum_times_three, None).unwrap(), 28);
    }

    #[test]
    fn reduce_honors_zero_seed() {
        let input = vec![1, 2, 3, 4];
        assert_eq!(reduce(&input, sum_times_three, Some(0)).unwrap(), 30);
    }

    #[test]
    fn reduce_over_record_values() {
        let r: Record<i64> = [("one", 1), ("two", 2), ("three", 3), ("four", 4)]
            .into_iter()
            .collect();
        assert_eq!(reduce(&r, sum_times_three, None).unwrap(), 28);
    }

    #[test]
    fn reduce_passes_the_folded_sequence() {
        let input = vec![1, 2, 3];
        let mut lens = Vec::new();
        let _ = reduce(
            &input,
            |acc, _, seq| {
                lens.push(seq.len());
                acc
            },
            None,
        );
        assert_eq!(lens, vec![2, 2]);
    }

    #[test]
    fn reduce_empty_without_seed_errors() {
        let input: Vec<i64> = Vec::new();
        let err = reduce(&input, sum_times_three, None).unwrap_err();
        assert!(matches!(err, CollectionError::EmptyWithoutSeed));
        assert!(err.to_string().contains("without an initial accumulator"));
    }

    #[test]
    fn reduce_empty_with_seed_returns_seed() {
        let input: Vec<i64> = Vec::new();
        assert_eq!(reduce(&input, sum_times_three, Some(7)).unwrap(), 7);
    }

    #[test]
    fn fold_can_change_accumulator_type() {
        let input = Value::list(["a", "bb", "ccc"]);
        let joined = fold(&input, String::new(), |mut acc, v| {
            acc.push_str(v.as_str().unwrap_or_default());
            acc
        });
        assert_eq!(joined, "abbccc");
    }
}
