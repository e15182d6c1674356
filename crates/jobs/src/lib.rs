// crates/jobs/src/lib.rs
//! Asynchronous job subsystem for long-running units of work.
//!
//! Provides:
//! - `JobRunner` - submit work, poll status, or run inline with a fallback
//! - `JobStore` - sharded, concurrency-safe map of job records
//! - `executor` - out-of-band dispatch with guaranteed outcome recording
//! - `IdGenerator` - opaque, URL-safe job identifiers

pub mod error;
pub mod executor;
pub mod id;
pub mod runner;
pub mod store;
pub mod types;

pub use error::JobError;
pub use id::{new_id, IdGenerator, UuidGenerator};
pub use runner::JobRunner;
pub use store::{JobStore, RetentionPolicy};
pub use types::{JobCounts, JobId, JobSnapshot, JobStatus};
