//! Ingestion progress tracking
//!
//! Bounded map from task identifier to the latest progress record. Entries
//! expire after a TTL and the stalest entry is evicted once the map is at
//! capacity, so a long-running process does not accumulate finished tasks
//! forever.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Progress of one ingestion task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Human-readable stage description
    pub message: String,
    /// Percent complete in [0, 100]; a failure resets this to 0
    pub progress: u8,
}

impl ProgressRecord {
    /// Create a new progress record
    pub fn new(message: impl Into<String>, progress: u8) -> Self {
        Self {
            message: message.into(),
            progress,
        }
    }
}

#[derive(Debug, Clone)]
struct TaskEntry {
    record: ProgressRecord,
    updated_at: DateTime<Utc>,
}

/// Tracker for ingestion task progress
///
/// Writers for different task ids never interfere; writes to the same id
/// race with last-write-wins, acceptable because each task has exactly one
/// active writer.
pub struct IngestionTracker {
    /// Entries keyed by task id
    tasks: RwLock<HashMap<Uuid, TaskEntry>>,
    /// Maximum tracked tasks
    max_entries: usize,
    /// TTL for entries (seconds)
    ttl_seconds: u64,
}

impl IngestionTracker {
    /// Create a new tracker
    pub fn new(max_entries: usize, ttl_seconds: u64) -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            max_entries,
            ttl_seconds,
        }
    }

    /// Overwrite the record for a task. Last write wins.
    pub fn set(&self, task_id: Uuid, record: ProgressRecord) {
        self.set_at(task_id, record, Utc::now());
    }

    /// Current record for a task
    ///
    /// Fails with `TaskNotFound` if the id was never set or its entry
    /// expired.
    pub fn get(&self, task_id: &Uuid) -> Result<ProgressRecord> {
        self.get_at(task_id, Utc::now())
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    /// Check if the tracker is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }

    fn set_at(&self, task_id: Uuid, record: ProgressRecord, now: DateTime<Utc>) {
        let mut tasks = self.tasks.write();

        // Sweep expired entries before considering eviction
        let ttl = self.ttl_seconds;
        tasks.retain(|_, entry| {
            now.signed_duration_since(entry.updated_at).num_seconds() as u64 <= ttl
        });

        if tasks.len() >= self.max_entries && !tasks.contains_key(&task_id) {
            if let Some(oldest) = tasks
                .iter()
                .min_by_key(|(_, entry)| entry.updated_at)
                .map(|(id, _)| *id)
            {
                tasks.remove(&oldest);
                tracing::debug!("Evicted progress entry for task {}", oldest);
            }
        }

        tasks.insert(
            task_id,
            TaskEntry {
                record,
                updated_at: now,
            },
        );
    }

    fn get_at(&self, task_id: &Uuid, now: DateTime<Utc>) -> Result<ProgressRecord> {
        let tasks = self.tasks.read();
        let entry = tasks.get(task_id).ok_or(Error::TaskNotFound(*task_id))?;

        let age = now.signed_duration_since(entry.updated_at);
        if age.num_seconds() as u64 > self.ttl_seconds {
            return Err(Error::TaskNotFound(*task_id));
        }

        Ok(entry.record.clone())
    }
}
