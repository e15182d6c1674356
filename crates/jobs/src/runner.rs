// crates/jobs/src/runner.rs
//! Job lifecycle coordinator.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::JobError;
use crate::executor;
use crate::id::{IdGenerator, UuidGenerator};
use crate::store::{JobStore, RetentionPolicy};
use crate::types::{JobId, JobSnapshot};

/// Central job runner that owns the job store.
///
/// Cheap to clone; clones share the same store. `submit` never waits on the
/// work it dispatches, and `status` is a point read of the current record.
pub struct JobRunner<R> {
    store: Arc<JobStore<R>>,
    ids: Arc<dyn IdGenerator>,
}

impl<R> Clone for JobRunner<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ids: Arc::clone(&self.ids),
        }
    }
}

impl<R> JobRunner<R>
where
    R: Clone + Send + Sync + 'static,
{
    /// Create a runner with the default retention policy.
    pub fn new() -> Self {
        Self::with_retention(RetentionPolicy::default())
    }

    pub fn with_retention(retention: RetentionPolicy) -> Self {
        Self {
            store: Arc::new(JobStore::with_retention(retention)),
            ids: Arc::new(UuidGenerator),
        }
    }

    /// Replace the identifier source.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &JobStore<R> {
        &self.store
    }

    /// Queue an async unit of work and return its id immediately.
    ///
    /// `work` is called once to build the future; the future itself runs
    /// on a separate task.
    pub fn submit<F, Fut, E>(&self, work: F) -> Result<JobId, JobError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let id = self.register()?;
        executor::dispatch(id.clone(), work(), Arc::clone(&self.store));
        Ok(id)
    }

    /// Queue a synchronous unit of work on the blocking pool.
    pub fn submit_blocking<F, E>(&self, work: F) -> Result<JobId, JobError>
    where
        F: FnOnce() -> Result<R, E> + Send + 'static,
        E: Display + Send + 'static,
    {
        let id = self.register()?;
        executor::dispatch_blocking(id.clone(), work, Arc::clone(&self.store));
        Ok(id)
    }

    fn register(&self) -> Result<JobId, JobError> {
        let id = self.ids.new_id();
        if let Err(e) = self.store.create(id.clone()) {
            tracing::error!(job_id = %id, error = %e, "Failed to register job");
            return Err(e);
        }
        tracing::debug!(job_id = %id, "Job queued");
        Ok(id)
    }

    /// Current snapshot of a job.
    pub fn status(&self, id: &JobId) -> Result<JobSnapshot<R>, JobError> {
        self.store.get(id)
    }

    /// Run work inline; on failure return `fallback(reason)` instead of an error.
    pub async fn run_now<Fut, E, F>(&self, work: Fut, fallback: F) -> R
    where
        Fut: Future<Output = Result<R, E>>,
        E: Display,
        F: FnOnce(&str) -> R,
    {
        executor::run_inline(work, fallback).await
    }

    /// Periodically sweep expired records according to the retention policy.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let every = every.max(Duration::from_millis(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = store.sweep(Utc::now());
                if evicted > 0 {
                    tracing::debug!(evicted, retained = store.len(), "Swept expired jobs");
                }
            }
        })
    }
}

impl<R> Default for JobRunner<R>
where
    R: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
