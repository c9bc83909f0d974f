// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Partition
//!
//! Fork-join execution of the two parallel phases. An index range is split into contiguous
//! chunks, one per worker, and every chunk writes only to its own slice of the output so the
//! result does not depend on the number of workers.

use crate::error::BuildError;
use rayon::prelude::*;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cooperative cancellation flag shared between the caller and every worker
#[derive(Clone, Debug, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that all workers stop at their next poll
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A fixed size worker pool which runs contiguous chunks of an index range
#[derive(Debug)]
pub struct WorkPartitioner {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkPartitioner {
    #[tracing::instrument(name = "Work partitioner", level = "info")]
    pub fn new(workers: usize) -> Result<Self, BuildError> {
        if workers == 0 {
            return Err(BuildError::NoWorkers);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("kkr-worker-{}", index))
            .build()?;
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// The length of every chunk but the last, which holds the remainder
    pub fn chunk_size(&self, length: usize) -> usize {
        ((length + self.workers - 1) / self.workers).max(1)
    }

    /// The index ranges handed to each worker for a range of `length` items
    pub fn chunks(&self, length: usize) -> Vec<Range<usize>> {
        let size = self.chunk_size(length);
        (0..length)
            .step_by(size)
            .map(|start| start..(start + size).min(length))
            .collect()
    }

    /// Runs `task` on every chunk in parallel, blocking until all have joined
    ///
    /// Chunks are handed over with their position in `chunks`, so a task can recover the offset
    /// of its slice in the full range.
    pub fn run_chunks<C, F>(&self, chunks: Vec<C>, task: F)
    where
        C: Send,
        F: Fn(usize, C) + Send + Sync,
    {
        tracing::debug!("Running {} chunks on {} workers", chunks.len(), self.workers);
        self.pool.install(|| {
            chunks
                .into_par_iter()
                .enumerate()
                .for_each(|(index, chunk)| task(index, chunk))
        });
    }
}

#[cfg(test)]
mod test {
    use super::{Cancellation, WorkPartitioner};
    use proptest::prelude::*;

    #[test]
    fn zero_workers_is_an_error() {
        assert!(WorkPartitioner::new(0).is_err());
    }

    #[test]
    fn last_chunk_holds_the_remainder() {
        let partitioner = WorkPartitioner::new(4).unwrap();
        assert_eq!(partitioner.chunk_size(850), 213);
        let chunks = partitioner.chunks(850);
        assert_eq!(chunks, vec![0..213, 213..426, 426..639, 639..850]);
    }

    #[test]
    fn short_ranges_leave_workers_idle() {
        let partitioner = WorkPartitioner::new(4).unwrap();
        assert_eq!(partitioner.chunks(2), vec![0..1, 1..2]);
        assert!(partitioner.chunks(0).is_empty());
    }

    #[test]
    fn chunks_write_disjoint_slices() {
        let partitioner = WorkPartitioner::new(3).unwrap();
        let mut values = vec![0_usize; 10];
        let size = partitioner.chunk_size(values.len());
        let chunks = values.chunks_mut(size).collect::<Vec<_>>();
        partitioner.run_chunks(chunks, |index, chunk| {
            for (offset, value) in chunk.iter_mut().enumerate() {
                *value = (index * size + offset).pow(2);
            }
        });
        assert_eq!(values, (0..10).map(|i| i * i).collect::<Vec<_>>());
    }

    #[test]
    fn cancellation_is_shared_between_clones() {
        let cancellation = Cancellation::new();
        let worker_view = cancellation.clone();
        assert!(!worker_view.is_cancelled());
        cancellation.cancel();
        assert!(worker_view.is_cancelled());
    }

    proptest! {
        #[test]
        fn chunks_tile_the_range(length in 0..5000_usize, workers in 1..16_usize) {
            let partitioner = WorkPartitioner::new(workers).unwrap();
            let chunks = partitioner.chunks(length);
            prop_assert!(chunks.len() <= workers);
            let mut next = 0;
            for chunk in chunks {
                prop_assert_eq!(chunk.start, next);
                prop_assert!(chunk.end > chunk.start);
                next = chunk.end;
            }
            prop_assert_eq!(next, length);
        }
    }
}
