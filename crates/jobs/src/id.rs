// crates/jobs/src/id.rs
//! Job identifier generation.

use uuid::Uuid;

use crate::types::JobId;

/// Generate a fresh job id: a random (v4) UUID in hyphenated form.
pub fn new_id() -> JobId {
    JobId::new(Uuid::new_v4().to_string())
}

/// Source of job identifiers used by `JobRunner`.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> JobId;
}

/// Default generator backed by `uuid` v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> JobId {
        new_id()
    }
}
