//! `collection-utils` is a small library of stateless functional utilities over collections:
//! ordered sequences and key-value records.
//!
//! Every utility accepts anything implementing [`normalize::Collection`] (slices, arrays,
//! `Vec`, `VecDeque`, [`types::Record`], `BTreeMap`, `HashMap`, and the dynamic
//! [`types::Value`]). The collection is first normalized into a fresh ordered sequence of
//! its values, so no utility ever mutates or aliases its input.
//!
//! ## What you get
//!
//! - **Traversal**: [`processing::each`], [`processing::map`], [`processing::filter`],
//!   [`processing::find`], [`processing::reduce`] (plus [`processing::fold`])
//! - **Ordering**: [`processing::sort_by`] (stable, key derived once per element)
//! - **Flattening**: [`processing::flatten`] with [`processing::Depth::Deep`] or
//!   [`processing::Depth::Shallow`]
//! - **Dedup**: [`processing::uniq`], [`processing::uniq_by`], [`processing::uniq_hashed`],
//!   [`processing::uniq_sorted_checked`]
//! - **Introspection**: [`processing::keys`], [`processing::values`], [`processing::size`],
//!   [`processing::first`], [`processing::last`], [`processing::compact`],
//!   [`processing::functions`]
//!
//! ## Quick example
//!
//! ```rust
//! use collection_utils::processing::{flatten, reduce, sort_by, uniq, Depth, Sortedness};
//! use collection_utils::types::Value;
//!
//! // reduce: with and without a seed
//! let nums = vec![1, 2, 3, 4];
//! assert_eq!(reduce(&nums, |acc, v, _| acc + v * 3, Some(10)).unwrap(), 40);
//! assert_eq!(reduce(&nums, |acc, v, _| acc + v * 3, None).unwrap(), 28);
//!
//! // sort_by: stable on equal keys
//! assert_eq!(sort_by(&[3, 8, 5, 1, 9, 11, 8], |x| *x), vec![1, 3, 5, 8, 8, 9, 11]);
//!
//! // flatten: nested lists of dynamic values
//! let nested = Value::list([Value::from(1), Value::list([2, 3]), Value::list([Value::list([4])])]);
//! assert_eq!(flatten(&nested, Depth::Deep), Value::list([1, 2, 3, 4]).as_list().unwrap());
//!
//! // uniq: first-seen order
//! assert_eq!(uniq(&[1, 1, 2, 3, 2, 4, 5, 6, 1], Sortedness::Unsorted), vec![1, 2, 3, 4, 5, 6]);
//! ```
//!
//! ## Parallel execution
//!
//! [`execution::ExecutionEngine`] runs `map`/`filter`/`find` chunk by chunk on a dedicated
//! thread pool, with a bound on in-flight chunks, live metrics and observer hooks. Results
//! are identical to the sequential utilities.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use collection_utils::execution::{ExecutionEngine, ExecutionOptions, TracingExecutionObserver};
//!
//! # fn main() -> Result<(), collection_utils::CollectionError> {
//! let engine = ExecutionEngine::new(ExecutionOptions {
//!     chunk_size: 256,
//!     ..Default::default()
//! })?
//! .with_observer(Arc::new(TracingExecutionObserver));
//!
//! let input: Vec<i64> = (0..10_000).collect();
//! let squares = engine.map_parallel(&input, |x| x * x);
//! assert_eq!(squares[100], 10_000);
//! println!("{}", engine.metrics().snapshot());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`processing`]: the collection utilities
//! - [`normalize`]: the [`normalize::Collection`] trait
//! - [`types`]: dynamic [`types::Value`], ordered [`types::Record`], [`types::Truthy`]
//! - [`execution`]: parallel engine, metrics and observers
//! - [`json`]: building values from JSON / NDJSON text
//! - [`error`]: error types

pub mod error;
pub mod execution;
pub mod json;
pub mod normalize;
pub mod processing;
pub mod types;

pub use error::{CollectionError, CollectionResult};
pub use normalize::Collection;
