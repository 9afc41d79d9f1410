//! Execution engine for running collection utilities with configurable parallelism.
//!
//! This module sits "above" [`crate::processing`] and provides:
//!
//! - Parallel (chunked) execution for map/filter/find over a normalized sequence
//! - Resource limits / throttling (in-flight chunks)
//! - Real-time metrics + observer hooks for monitoring
//!
//! Results match the sequential utilities exactly: chunk outputs are reassembled in input
//! order, and [`ExecutionEngine::find_parallel`] still returns the *first* match.

mod observer;
mod semaphore;

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CollectionError, CollectionResult};
use crate::normalize::Collection;
use crate::processing::reduce;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver, Operation,
    StdErrExecutionObserver, TracingExecutionObserver,
};

use semaphore::Semaphore;

/// Configuration for the [`ExecutionEngine`].
///
/// Missing fields take their [`Default`] values when deserialized, so a host application can
/// embed this in its own configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Number of elements per chunk.
    pub chunk_size: usize,
    /// Upper bound on concurrently executing chunks.
    ///
    /// This is an additional throttle on top of `num_threads`.
    pub max_in_flight_chunks: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let n = available_parallelism();
        Self {
            num_threads: Some(n),
            chunk_size: 4_096,
            max_in_flight_chunks: n,
        }
    }
}

impl ExecutionOptions {
    /// Check that every limit is non-zero.
    pub fn validate(&self) -> CollectionResult<()> {
        let invalid = |message: &str| {
            Err(CollectionError::InvalidOptions {
                message: message.to_string(),
            })
        };
        if self.chunk_size == 0 {
            return invalid("chunk_size must be > 0");
        }
        if self.max_in_flight_chunks == 0 {
            return invalid("max_in_flight_chunks must be > 0");
        }
        if self.num_threads == Some(0) {
            return invalid("num_threads must be > 0 when set");
        }
        Ok(())
    }
}

fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// A configurable execution engine for collection utilities.
pub struct ExecutionEngine {
    pool: ThreadPool,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    ///
    /// Fails with [`CollectionError::InvalidOptions`] if a limit is zero, or
    /// [`CollectionError::ThreadPool`] if the worker pool cannot be started.
    pub fn new(opts: ExecutionOptions) -> CollectionResult<Self> {
        opts.validate()?;

        let n_threads = opts.num_threads.unwrap_or_else(available_parallelism);
        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .thread_name(|i| format!("collection-utils-{i}"))
            .build()?;
        debug!(
            n_threads,
            chunk_size = opts.chunk_size,
            max_in_flight_chunks = opts.max_in_flight_chunks,
            "execution engine ready"
        );

        Ok(Self {
            pool,
            opts,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.opts
    }

    /// Parallel [`crate::processing::map`]: same output, computed chunk by chunk.
    pub fn map_parallel<C, U, F>(&self, collection: &C, mapper: F) -> Vec<U>
    where
        C: Collection + ?Sized,
        C::Item: Send + Sync,
        U: Send,
        F: Fn(&C::Item) -> U + Send + Sync,
    {
        let values = collection.normalize();
        let per_chunk = self.run_chunked(Operation::Map, &values, |_, chunk, metrics| {
            let mut out = Vec::with_capacity(chunk.len());
            for value in chunk {
                metrics.on_element_processed();
                out.push(mapper(value));
            }
            let len = out.len();
            (out, len)
        });
        per_chunk.into_iter().flatten().collect()
    }

    /// Parallel [`crate::processing::filter`]: same output, computed chunk by chunk.
    pub fn filter_parallel<C, F>(&self, collection: &C, predicate: F) -> Vec<C::Item>
    where
        C: Collection + ?Sized,
        C::Item: Send + Sync,
        F: Fn(&C::Item) -> bool + Send + Sync,
    {
        let values = collection.normalize();
        let per_chunk = self.run_chunked(Operation::Filter, &values, |_, chunk, metrics| {
            let mut out = Vec::new();
            for value in chunk {
                metrics.on_element_processed();
                if predicate(value) {
                    out.push(value.clone());
                }
            }
            let len = out.len();
            (out, len)
        });
        per_chunk.into_iter().flatten().collect()
    }

    /// Parallel [`crate::processing::find`]: returns the first matching element in order.
    ///
    /// Chunks that start after an already-found match are skipped, but chunks running
    /// concurrently with the winning one may still evaluate `predicate` on later elements.
    pub fn find_parallel<C, F>(&self, collection: &C, predicate: F) -> Option<C::Item>
    where
        C: Collection + ?Sized,
        C::Item: Send + Sync,
        F: Fn(&C::Item) -> bool + Send + Sync,
    {
        let mut values = collection.normalize();
        let best = AtomicUsize::new(usize::MAX);
        let hits = self.run_chunked(Operation::Find, &values, |start, chunk, metrics| {
            for (offset, value) in chunk.iter().enumerate() {
                let idx = start + offset;
                if idx > best.load(Ordering::SeqCst) {
                    break;
                }
                metrics.on_element_processed();
                if predicate(value) {
                    best.fetch_min(idx, Ordering::SeqCst);
                    return (Some(idx), 1);
                }
            }
            (None, 0)
        });
        let first = hits.into_iter().flatten().min()?;
        Some(values.swap_remove(first))
    }

    /// [`crate::processing::reduce`], tracked via the observer/metrics hooks.
    ///
    /// Folding is inherently sequential, so this runs on the calling thread.
    pub fn reduce<C, F>(
        &self,
        collection: &C,
        mut reducer: F,
        initial: Option<C::Item>,
    ) -> CollectionResult<C::Item>
    where
        C: Collection + ?Sized,
        F: FnMut(C::Item, &C::Item, &[C::Item]) -> C::Item,
    {
        let start = Instant::now();
        self.begin_run(Operation::Reduce, collection.size());

        let out = reduce(
            collection,
            |acc, value, seq| {
                self.metrics.on_element_processed();
                reducer(acc, value, seq)
            },
            initial,
        );

        self.finish_run(Operation::Reduce, start);
        out
    }

    /// Split `values` into chunks and run `work` on each, in parallel on the engine's pool.
    ///
    /// `work` receives the chunk's start index, the chunk and the live metrics; it returns
    /// its result plus the number of output elements for the `ChunkFinished` event. Results
    /// come back in chunk order.
    fn run_chunked<T, R, W>(&self, operation: Operation, values: &[T], work: W) -> Vec<R>
    where
        T: Sync,
        R: Send,
        W: Fn(usize, &[T], &ExecutionMetrics) -> (R, usize) + Sync,
    {
        let start = Instant::now();
        self.begin_run(operation, values.len());

        let sem = Semaphore::new(self.opts.max_in_flight_chunks);
        let ranges = chunk_ranges(values.len(), self.opts.chunk_size);

        let out: Vec<R> = self.pool.install(|| {
            ranges
                .into_par_iter()
                .map(|range| {
                    let (_permit, waited) = sem.acquire();
                    if waited > Duration::ZERO {
                        self.metrics.on_throttle_wait(waited);
                        self.emit(ExecutionEvent::ThrottleWaited { duration: waited });
                    }

                    self.metrics.on_chunk_start();
                    self.emit(ExecutionEvent::ChunkStarted {
                        start_index: range.start,
                        len: range.len(),
                    });

                    let start_index = range.start;
                    let (result, output_len) =
                        work(start_index, &values[range], &self.metrics);

                    self.emit(ExecutionEvent::ChunkFinished {
                        start_index,
                        output_len,
                    });
                    self.metrics.on_chunk_end();
                    result
                })
                .collect()
        });

        self.finish_run(operation, start);
        out
    }

    fn begin_run(&self, operation: Operation, elements: usize) {
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted {
            operation,
            elements,
        });
    }

    fn finish_run(&self, operation: Operation, start: Instant) {
        let elapsed = start.elapsed();
        self.metrics.end_run(elapsed);
        self.emit(ExecutionEvent::RunFinished {
            operation,
            elapsed,
            metrics: self.metrics.snapshot(),
        });
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

fn chunk_ranges(len: usize, chunk_size: usize) -> Vec<Range<usize>> {
    (0..len)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{chunk_ranges, ExecutionEngine, ExecutionOptions};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::error::CollectionError;
    use crate::execution::{ExecutionEvent, ExecutionObserver};
    use crate::processing::{filter, find, map};

    fn engine(threads: usize, chunk_size: usize, max_in_flight_chunks: usize) -> ExecutionEngine {
        ExecutionEngine::new(ExecutionOptions {
            num_threads: Some(threads),
            chunk_size,
            max_in_flight_chunks,
        })
        .unwrap()
    }

    fn bump_max(dst: &AtomicUsize, now: usize) {
        dst.fetch_max(now, Ordering::SeqCst);
    }

    #[test]
    fn chunk_ranges_cover_input() {
        assert!(chunk_ranges(0, 4).is_empty());
        assert_eq!(chunk_ranges(10, 4), vec![0..4, 4..8, 8..10]);
        assert_eq!(chunk_ranges(3, 10), vec![0..3]);
    }

    #[test]
    fn invalid_options_are_rejected() {
        for opts in [
            ExecutionOptions {
                chunk_size: 0,
                ..Default::default()
            },
            ExecutionOptions {
                max_in_flight_chunks: 0,
                ..Default::default()
            },
            ExecutionOptions {
                num_threads: Some(0),
                ..Default::default()
            },
        ] {
            let err = ExecutionEngine::new(opts).err().unwrap();
            assert!(matches!(err, CollectionError::InvalidOptions { .. }));
        }
    }

    #[test]
    fn parallel_results_match_sequential() {
        let input: Vec<i64> = (0..1_000).map(|x| (x * 7919) % 1_009).collect();
        let eng = engine(4, 16, 4);

        assert_eq!(eng.map_parallel(&input, |x| x * 2), map(&input, |x| x * 2));
        assert_eq!(
            eng.filter_parallel(&input, |x| x % 3 == 0),
            filter(&input, |x| x % 3 == 0)
        );
        assert_eq!(
            eng.find_parallel(&input, |x| *x > 1_000),
            find(&input, |x| *x > 1_000)
        );
        assert_eq!(eng.find_parallel(&input, |x| *x < 0), None);
    }

    #[test]
    fn find_parallel_returns_first_match_across_chunks() {
        let mut input = vec![0; 500];
        input[137] = 1;
        input[420] = 1;
        input[499] = 1;
        let eng = engine(4, 8, 4);
        let indexed: Vec<(usize, i32)> = input.iter().copied().enumerate().collect();
        let hit = eng.find_parallel(&indexed, |(_, v)| *v == 1);
        assert_eq!(hit.map(|(i, _)| i), Some(137));
    }

    #[test]
    fn map_parallel_runs_with_concurrency() {
        let input: Vec<i64> = (0..400).collect();
        let eng = engine(4, 1, 4);

        let active = Arc::new(AtomicUsize::new(0));
        let max_active = Arc::new(AtomicUsize::new(0));

        let active2 = Arc::clone(&active);
        let max_active2 = Arc::clone(&max_active);

        let out = eng.map_parallel(&input, move |x| {
            let now = active2.fetch_add(1, Ordering::SeqCst) + 1;
            bump_max(&max_active2, now);
            std::thread::sleep(Duration::from_millis(2));
            active2.fetch_sub(1, Ordering::SeqCst);
            x + 1
        });

        assert_eq!(out.len(), input.len());
        assert_eq!(out[0], 1);
        assert_eq!(out[399], 400);
        assert!(max_active.load(Ordering::SeqCst) > 1);
    }

    struct ConcurrencyObserver {
        active_chunks: AtomicUsize,
        max_active_chunks: AtomicUsize,
    }

    impl ConcurrencyObserver {
        fn new() -> Self {
            Self {
                active_chunks: AtomicUsize::new(0),
                max_active_chunks: AtomicUsize::new(0),
            }
        }
        fn max(&self) -> usize {
            self.max_active_chunks.load(Ordering::SeqCst)
        }
    }

    impl ExecutionObserver for ConcurrencyObserver {
        fn on_event(&self, event: &ExecutionEvent) {
            match event {
                ExecutionEvent::ChunkStarted { .. } => {
                    let now = self.active_chunks.fetch_add(1, Ordering::SeqCst) + 1;
                    bump_max(&self.max_active_chunks, now);
                }
                ExecutionEvent::ChunkFinished { .. } => {
                    self.active_chunks.fetch_sub(1, Ordering::SeqCst);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn max_in_flight_chunks_throttles_chunk_concurrency() {
        let input: Vec<i64> = (0..100).collect();
        let observer = Arc::new(ConcurrencyObserver::new());
        let obs_trait: Arc<dyn ExecutionObserver> = observer.clone();
        let eng = engine(4, 1, 1).with_observer(obs_trait);

        let out = eng.filter_parallel(&input, |_| {
            // Make each chunk take long enough to overlap if not throttled.
            std::thread::sleep(Duration::from_millis(1));
            true
        });

        assert_eq!(out, input);
        assert_eq!(observer.max(), 1);
    }

    #[test]
    fn metrics_are_available_after_run() {
        let input: Vec<i64> = (0..60).collect();
        let eng = engine(4, 1, 1);
        let metrics = eng.metrics();

        let out = eng.map_parallel(&input, |_| {
            std::thread::sleep(Duration::from_millis(2));
            1
        });

        assert_eq!(out.len(), input.len());

        let snap = metrics.snapshot();
        assert_eq!(snap.run_id, 1);
        assert_eq!(snap.elements_processed, input.len() as u64);
        assert_eq!(snap.chunks_started, input.len() as u64);
        assert_eq!(snap.chunks_finished, input.len() as u64);
        assert_eq!(snap.max_active_chunks, 1);
        assert!(snap.throttle_wait > Duration::ZERO);
        assert!(snap.elapsed.is_some());
    }

    #[test]
    fn reduce_is_observed_and_counts_elements() {
        let input = vec![1, 2, 3, 4];
        let eng = engine(2, 2, 2);
        let out = eng.reduce(&input, |acc, v, _| acc + v * 3, None).unwrap();
        assert_eq!(out, 28);
        assert_eq!(eng.metrics().snapshot().elements_processed, 3);

        let empty: Vec<i32> = Vec::new();
        let err = eng.reduce(&empty, |acc, v, _| acc + v, None).unwrap_err();
        assert!(matches!(err, CollectionError::EmptyWithoutSeed));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: ExecutionOptions = serde_json::from_str(r#"{"chunk_size": 8}"#).unwrap();
        assert_eq!(opts.chunk_size, 8);
        assert_eq!(
            opts.max_in_flight_chunks,
            ExecutionOptions::default().max_in_flight_chunks
        );
        assert!(opts.validate().is_ok());
    }
}
