// crates/jobs/src/executor.rs
//! Runs work units outside the caller's request cycle.
//!
//! Every dispatched job gets exactly one `complete` or `fail` call on the
//! store, whether the work returns `Ok`, returns `Err`, or panics.

use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::task::{JoinError, JoinHandle};

use crate::store::JobStore;
use crate::types::JobId;

/// Failure reason recorded when a work unit panics.
pub const PANIC_REASON: &str = "work unit panicked";

/// Spawn `work` on the runtime and record its outcome in `store`.
///
/// The work runs on its own task; a second task awaits it so that a panic
/// still reaches the store as a failure.
pub fn dispatch<R, E, Fut>(id: JobId, work: Fut, store: Arc<JobStore<R>>) -> JoinHandle<()>
where
    R: Clone + Send + Sync + 'static,
    E: Display + Send + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    let inner = tokio::spawn(work);
    tokio::spawn(async move {
        let outcome = inner.await;
        record_outcome(&store, &id, outcome);
    })
}

/// Like [`dispatch`], for synchronous work that should not occupy an async
/// worker thread.
pub fn dispatch_blocking<R, E, F>(id: JobId, work: F, store: Arc<JobStore<R>>) -> JoinHandle<()>
where
    R: Clone + Send + Sync + 'static,
    E: Display + Send + 'static,
    F: FnOnce() -> Result<R, E> + Send + 'static,
{
    let inner = tokio::task::spawn_blocking(work);
    tokio::spawn(async move {
        let outcome = inner.await;
        record_outcome(&store, &id, outcome);
    })
}

fn record_outcome<R, E>(store: &JobStore<R>, id: &JobId, outcome: Result<Result<R, E>, JoinError>)
where
    R: Clone,
    E: Display,
{
    let update = match outcome {
        Ok(Ok(result)) => {
            tracing::info!(job_id = %id, "Job completed");
            store.complete(id, result)
        }
        Ok(Err(e)) => {
            tracing::warn!(job_id = %id, error = %e, "Job failed");
            store.fail(id, e.to_string())
        }
        Err(join_err) if join_err.is_panic() => {
            tracing::error!(job_id = %id, "Job panicked");
            store.fail(id, PANIC_REASON)
        }
        Err(join_err) => {
            tracing::warn!(job_id = %id, error = %join_err, "Job aborted");
            store.fail(id, join_err.to_string())
        }
    };

    if let Err(e) = update {
        tracing::error!(job_id = %id, error = %e, "Failed to record job outcome");
    }
}

/// Run `work` in the caller's task, substituting `fallback(reason)` if it
/// fails or panics.
pub async fn run_inline<R, E, Fut, F>(work: Fut, fallback: F) -> R
where
    E: Display,
    Fut: Future<Output = Result<R, E>>,
    F: FnOnce(&str) -> R,
{
    match AssertUnwindSafe(work).catch_unwind().await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            let reason = e.to_string();
            tracing::warn!(error = %reason, "Inline work failed, using fallback");
            fallback(&reason)
        }
        Err(_) => {
            tracing::error!("Inline work panicked, using fallback");
            fallback(PANIC_REASON)
        }
    }
}
