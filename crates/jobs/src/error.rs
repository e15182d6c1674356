// crates/jobs/src/error.rs
use thiserror::Error;

use crate::types::{JobId, JobStatus};

/// Structural errors raised by the job store and coordinator.
///
/// Failures of the work unit itself never surface here; they end up as a
/// `failed` record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("Job not found: {0}")]
    NotFound(JobId),

    #[error("Duplicate job id: {0}")]
    DuplicateId(JobId),

    #[error("Invalid transition for job {id}: {from} -> {to}")]
    InvalidTransition {
        id: JobId,
        from: JobStatus,
        to: JobStatus,
    },
}
