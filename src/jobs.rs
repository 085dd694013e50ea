//! Job scheduling for batched data-parallel work
//!
//! Every generator and noise job is written as a pure function of a job
//! index. A [`JobScheduler`] decides whether those indices run one after the
//! other or across a rayon thread pool. Output order never depends on the
//! scheduler: results are always returned (or written) in index order.

#[cfg(feature = "parallel")]
use std::sync::Arc;

#[cfg(feature = "parallel")]
use log::{debug, trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use rayon::{ThreadPool, ThreadPoolBuilder};

#[cfg(feature = "parallel")]
use crate::error::{MeshError, Result};

/// Runs independent jobs and hands back their results in index order
pub trait JobScheduler: Sync {
    /// Run `body` for every index in `0..job_count`
    ///
    /// `batch_size` is a hint for how many consecutive indices one worker
    /// should take at a time.
    fn map<R, F>(&self, job_count: usize, batch_size: usize, body: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> R + Sync + Send;

    /// Run `body` over consecutive chunks of `items`, passing the chunk index
    fn for_each_chunk_mut<T, F>(&self, items: &mut [T], chunk_size: usize, body: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send;

    /// True when jobs run on the calling thread in index order
    fn is_sequential(&self) -> bool {
        false
    }
}

/// Runs every job on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl JobScheduler for Sequential {
    fn map<R, F>(&self, job_count: usize, _batch_size: usize, body: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> R + Sync + Send,
    {
        (0..job_count).map(body).collect()
    }

    fn for_each_chunk_mut<T, F>(&self, items: &mut [T], chunk_size: usize, body: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        for (index, chunk) in items.chunks_mut(chunk_size.max(1)).enumerate() {
            body(index, chunk);
        }
    }

    fn is_sequential(&self) -> bool {
        true
    }
}

/// Runs jobs on rayon, either the global pool or a dedicated one
#[cfg(feature = "parallel")]
#[derive(Debug, Clone, Default)]
pub struct Parallel {
    pool: Option<Arc<ThreadPool>>,
}

#[cfg(feature = "parallel")]
impl Parallel {
    /// Use rayon's global thread pool
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Build a dedicated pool with a fixed number of worker threads
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `threads` is 0 or the pool cannot be built
    pub fn with_threads(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(MeshError::InvalidConfig(
                "thread count must be >= 1".to_string(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("mesh-job-{index}"))
            .build()
            .map_err(|e| MeshError::InvalidConfig(format!("thread pool: {e}")))?;
        debug!("built dedicated job pool with {threads} threads");
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }

    /// Number of worker threads jobs are spread across
    pub fn thread_count(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

#[cfg(feature = "parallel")]
impl JobScheduler for Parallel {
    fn map<R, F>(&self, job_count: usize, batch_size: usize, body: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> R + Sync + Send,
    {
        trace!(
            "dispatching {job_count} jobs in batches of at least {batch_size} on {} threads",
            self.thread_count()
        );
        self.install(|| {
            (0..job_count)
                .into_par_iter()
                .with_min_len(batch_size.max(1))
                .map(body)
                .collect()
        })
    }

    fn for_each_chunk_mut<T, F>(&self, items: &mut [T], chunk_size: usize, body: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        trace!("dispatching {} items in chunks of {chunk_size}", items.len());
        self.install(|| {
            items
                .par_chunks_mut(chunk_size.max(1))
                .enumerate()
                .for_each(|(index, chunk)| body(index, chunk));
        });
    }
}

/// Scheduler used by the convenience entry points
#[cfg(feature = "parallel")]
pub type DefaultScheduler = Parallel;

/// Scheduler used by the convenience entry points
#[cfg(not(feature = "parallel"))]
pub type DefaultScheduler = Sequential;
