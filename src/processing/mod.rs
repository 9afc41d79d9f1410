//! Collection utilities.
//!
//! Every function here takes its collection by reference, normalizes it into a fresh ordered
//! sequence (see [`crate::normalize::Collection`]) and returns newly allocated output. No
//! function mutates its input.
//!
//! Currently implemented:
//!
//! - [`each()`], [`map()`], [`filter()`], [`find()`], [`reduce()`] / [`fold()`]: traversal
//! - [`sort_by()`]: stable ordering by a derived key
//! - [`flatten()`]: deep or shallow linearization of nested sequences
//! - [`uniq()`], [`uniq_by()`], [`uniq_hashed()`], [`uniq_sorted_checked()`]: dedup
//! - [`keys()`], [`values()`], [`size()`], [`first()`], [`first_n()`], [`last()`],
//!   [`last_n()`], [`compact()`], [`functions()`]: introspection
//!
//! ## Example: filter → map → reduce
//!
//! ```rust
//! use collection_utils::processing::{filter, map, reduce};
//! use collection_utils::types::Record;
//!
//! let scores: Record<i64> = [("ada", 98), ("grace", 87), ("linus", 42)]
//!     .into_iter()
//!     .collect();
//!
//! // Keep passing scores.
//! let passing = filter(&scores, |s| *s >= 50);
//!
//! // Curve them.
//! let curved = map(&passing, |s| s + 2);
//!
//! // Sum (the first element seeds the accumulator).
//! let total = reduce(&curved, |acc, s, _| acc + s, None).unwrap();
//! assert_eq!(total, 189);
//! ```

pub mod each;
pub mod filter;
pub mod find;
pub mod flatten;
pub mod introspect;
pub mod map;
pub mod reduce;
pub mod sort;
pub mod uniq;

pub use each::each;
pub use filter::filter;
pub use find::find;
pub use flatten::{flatten, Depth, Nested};
pub use introspect::{compact, first, first_n, functions, keys, last, last_n, size, values};
pub use map::map;
pub use reduce::{fold, reduce};
pub use sort::sort_by;
pub use uniq::{uniq, uniq_by, uniq_hashed, uniq_sorted_checked, Sortedness};
