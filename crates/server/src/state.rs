// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;
use std::time::Instant;

use bhoomi_ai_core::{GenerateResponse, LocalGenerator, TextGenerator};
use bhoomi_ai_jobs::{JobRunner, RetentionPolicy};

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Queued generation jobs, polled through /generate/status.
    pub jobs: JobRunner<GenerateResponse>,
    /// Backend used by every generation route.
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, retention: RetentionPolicy) -> Arc<Self> {
        tracing::info!(
            model = generator.model(),
            max_records = retention.max_records,
            ttl_secs = retention.ttl.num_seconds(),
            "Initializing application state"
        );
        Arc::new(Self {
            start_time: Instant::now(),
            jobs: JobRunner::with_retention(retention),
            generator,
        })
    }

    /// State backed by the template generator and default retention.
    pub fn local() -> Arc<Self> {
        Self::new(Arc::new(LocalGenerator::new()), RetentionPolicy::default())
    }

    /// Get the server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
