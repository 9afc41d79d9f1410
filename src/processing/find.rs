//! First-match search for any [`crate::normalize::Collection`].

use crate::normalize::Collection;

/// Returns the first element of the normalized sequence for which `predicate` returns `true`.
///
/// The scan stops at the first match, so `predicate` is never called on later elements.
/// `None` means no element matched (including the empty collection).
pub fn find<C, F>(collection: &C, mut predicate: F) -> Option<C::Item>
where
    C: Collection + ?Sized,
    F: FnMut(&C::Item) -> bool,
{
    collection
        .normalize()
        .into_iter()
        .find(|value| predicate(value))
}

#[cfg(test)]
mod tests {
    use super::find;
    use crate::types::Value;

    const INTS: [i64; 10] = [-1, 4, 0, 1, 3, 2, 3, 4, 5, 6];

    #[test]
    fn find_returns_the_value_if_present() {
        assert_eq!(find(&INTS, |v| *v == 4), Some(4));

        let names = vec!["maru", "choux", "doge", "coco", "waychillgoldeneye", "trance"];
        assert_eq!(
            find(&names, |v| *v == "waychillgoldeneye"),
            Some("waychillgoldeneye")
        );

        let b = Value::record([("b", "b")]);
        let records = vec![Value::record([("a", "a")]), b.clone()];
        assert_eq!(find(&records, |v| *v == b), Some(b));
    }

    #[test]
    fn find_stops_at_first_match() {
        let mut calls = 0;
        let out = find(&INTS, |v| {
            calls += 1;
            *v == 0
        });
        assert_eq!(out, Some(0));
        assert_eq!(calls, 3);
    }

    #[test]
    fn find_returns_none_when_absent() {
        assert_eq!(find(&INTS, |v| *v == 7), None);
        let records = vec![Value::record([("a", "a")])];
        assert_eq!(find(&records, |v| *v == Value::record([("c", "c")])), None);

        let empty: Vec<i64> = Vec::new();
        assert_eq!(find(&empty, |_| true), None);
    }
}
