// crates/jobs/src/store.rs
//! Concurrency-safe storage for job records.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::JobError;
use crate::types::{JobCounts, JobId, JobSnapshot, JobStatus};

/// How long finished records are kept, and how many records the store holds.
///
/// Only terminal records are ever evicted. A queued record stays until its
/// work unit reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Age (measured from `finished_at`) after which a terminal record expires.
    pub ttl: TimeDelta,
    /// Soft cap on the number of records.
    pub max_records: usize,
}

impl RetentionPolicy {
    /// Keep every record forever.
    pub fn unbounded() -> Self {
        Self {
            ttl: TimeDelta::MAX,
            max_records: usize::MAX,
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            ttl: TimeDelta::hours(1),
            max_records: 10_000,
        }
    }
}

enum JobState<R> {
    Queued,
    Done(R),
    Failed(String),
}

impl<R> JobState<R> {
    fn status(&self) -> JobStatus {
        match self {
            JobState::Queued => JobStatus::Queued,
            JobState::Done(_) => JobStatus::Done,
            JobState::Failed(_) => JobStatus::Failed,
        }
    }
}

struct JobRecord<R> {
    state: JobState<R>,
    created_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl<R: Clone> JobRecord<R> {
    fn snapshot(&self, id: &JobId) -> JobSnapshot<R> {
        let (result, error) = match &self.state {
            JobState::Queued => (None, None),
            JobState::Done(result) => (Some(result.clone()), None),
            JobState::Failed(reason) => (None, Some(reason.clone())),
        };
        JobSnapshot {
            id: id.clone(),
            status: self.state.status(),
            result,
            error,
            created_at: self.created_at,
            finished_at: self.finished_at,
        }
    }
}

/// Owns every job record.
///
/// Records live in a `DashMap`, so each operation locks only the shard that
/// holds its key. Callers only ever receive `JobSnapshot` copies.
///
/// `finished` lists terminal records in completion order so capacity
/// eviction pops from the front instead of scanning the map. Entries whose
/// record is gone or was replaced are skipped when popped. Lock order is
/// `finished` before any shard; a shard guard is never held while taking
/// `finished`.
pub struct JobStore<R> {
    records: DashMap<JobId, JobRecord<R>>,
    finished: Mutex<VecDeque<(DateTime<Utc>, JobId)>>,
    retention: RetentionPolicy,
}

impl<R: Clone> JobStore<R> {
    pub fn new() -> Self {
        Self::with_retention(RetentionPolicy::default())
    }

    pub fn with_retention(retention: RetentionPolicy) -> Self {
        Self {
            records: DashMap::new(),
            finished: Mutex::new(VecDeque::new()),
            retention,
        }
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Insert a new `queued` record.
    pub fn create(&self, id: JobId) -> Result<(), JobError> {
        if self.records.len() >= self.retention.max_records {
            self.evict_overflow(1);
        }

        match self.records.entry(id) {
            Entry::Occupied(entry) => Err(JobError::DuplicateId(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(JobRecord {
                    state: JobState::Queued,
                    created_at: Utc::now(),
                    finished_at: None,
                });
                Ok(())
            }
        }
    }

    /// Transition a queued record to `done` with its result.
    pub fn complete(&self, id: &JobId, result: R) -> Result<(), JobError> {
        self.finish(id, JobState::Done(result))
    }

    /// Transition a queued record to `failed`.
    pub fn fail(&self, id: &JobId, reason: impl Into<String>) -> Result<(), JobError> {
        self.finish(id, JobState::Failed(reason.into()))
    }

    fn finish(&self, id: &JobId, next: JobState<R>) -> Result<(), JobError> {
        let finished_at = {
            let mut record = self
                .records
                .get_mut(id)
                .ok_or_else(|| JobError::NotFound(id.clone()))?;

            let from = record.state.status();
            if from.is_terminal() {
                return Err(JobError::InvalidTransition {
                    id: id.clone(),
                    from,
                    to: next.status(),
                });
            }

            let now = Utc::now();
            record.state = next;
            record.finished_at = Some(now);
            now
        };

        self.finished_order().push_back((finished_at, id.clone()));
        Ok(())
    }

    fn finished_order(&self) -> MutexGuard<'_, VecDeque<(DateTime<Utc>, JobId)>> {
        self.finished.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the record at `id`.
    pub fn get(&self, id: &JobId) -> Result<JobSnapshot<R>, JobError> {
        self.records
            .get(id)
            .map(|record| record.snapshot(id))
            .ok_or_else(|| JobError::NotFound(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn counts(&self) -> JobCounts {
        let mut counts = JobCounts::default();
        for entry in self.records.iter() {
            match entry.state.status() {
                JobStatus::Queued => counts.queued += 1,
                JobStatus::Done => counts.done += 1,
                JobStatus::Failed => counts.failed += 1,
            }
        }
        counts
    }

    /// Drop expired terminal records, then trim down to `max_records`.
    ///
    /// Returns the number of records removed.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let ttl = self.retention.ttl;
        let mut expired = 0;
        self.records.retain(|_, record| match record.finished_at {
            Some(finished) if now.signed_duration_since(finished) >= ttl => {
                expired += 1;
                false
            }
            _ => true,
        });

        self.finished_order().retain(|(at, id)| {
            self.records
                .get(id)
                .is_some_and(|record| record.finished_at == Some(*at))
        });

        expired + self.evict_overflow(0)
    }

    /// Evict the oldest terminal records until `headroom` slots are free
    /// under `max_records`.
    fn evict_overflow(&self, headroom: usize) -> usize {
        let limit = self.retention.max_records.saturating_sub(headroom);
        if self.records.len() <= limit {
            return 0;
        }

        let mut order = self.finished_order();
        let mut evicted = 0;
        while self.records.len() > limit {
            let Some((at, id)) = order.pop_front() else {
                tracing::warn!(
                    len = self.records.len(),
                    max_records = self.retention.max_records,
                    "Job store over capacity with only queued records left"
                );
                break;
            };
            // Skip entries already swept or whose id now names a newer record.
            if self
                .records
                .remove_if(&id, |_, record| record.finished_at == Some(at))
                .is_some()
            {
                evicted += 1;
            }
        }
        evicted
    }
}

impl<R: Clone> Default for JobStore<R> {
    fn default() -> Self {
        Self::new()
    }
}
