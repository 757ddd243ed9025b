//! Asynchronous document ingestion pipeline
//!
//! `ingest` records an initial progress entry, spawns the staged work, and
//! returns the task id without waiting for any stage to run. Progress is
//! visible only through the tracker; a failed stage writes a terminal 0%
//! record and skips the remaining stages.

use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;
use crate::progress::{IngestionTracker, ProgressRecord};
use crate::providers::vector_index::VectorRecord;
use crate::providers::{EmbeddingProvider, VectorIndex};
use crate::types::document::{Document, DocumentMetadata};

/// Pipeline that embeds a document and upserts it into the vector index,
/// reporting progress at each stage
pub struct IngestionPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    tracker: Arc<IngestionTracker>,
}

impl IngestionPipeline {
    /// Create a new pipeline
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        tracker: Arc<IngestionTracker>,
    ) -> Self {
        Self {
            embedder,
            index,
            tracker,
        }
    }

    /// Accept a document for ingestion
    ///
    /// Returns a fresh task id immediately; the staged work runs in the
    /// background and reports through the tracker. Concurrent ingestions of
    /// the same title race at the upsert, last write wins.
    pub fn ingest(&self, document: Document) -> Uuid {
        let task_id = Uuid::new_v4();
        self.tracker
            .set(task_id, ProgressRecord::new("Document ingestion started.", 0));

        tracing::info!("Accepted document '{}' as task {}", document.title, task_id);

        let embedder = Arc::clone(&self.embedder);
        let index = Arc::clone(&self.index);
        let tracker = Arc::clone(&self.tracker);

        tokio::spawn(async move {
            if let Err(e) = run_stages(&*embedder, &*index, &tracker, task_id, document).await {
                tracing::error!("Ingestion task {} failed: {}", task_id, e);
                tracker.set(
                    task_id,
                    ProgressRecord::new(format!("Error during ingestion: {}", e), 0),
                );
            }
        });

        task_id
    }

    /// Tracker used by this pipeline
    pub fn tracker(&self) -> &IngestionTracker {
        &self.tracker
    }
}

/// The staged ingestion work: embed, then upsert keyed by title
async fn run_stages(
    embedder: &dyn EmbeddingProvider,
    index: &dyn VectorIndex,
    tracker: &IngestionTracker,
    task_id: Uuid,
    document: Document,
) -> Result<()> {
    tracker.set(task_id, ProgressRecord::new("Generating embeddings...", 20));
    let values = embedder.embed(&document.content).await?;
    tracker.set(
        task_id,
        ProgressRecord::new("Embeddings generated successfully.", 50),
    );

    tracker.set(
        task_id,
        ProgressRecord::new("Uploading embeddings to the vector index...", 70),
    );
    let record = VectorRecord {
        id: document.title.clone(),
        values,
        metadata: DocumentMetadata::from(&document),
    };
    index.upsert(record).await?;

    tracker.set(
        task_id,
        ProgressRecord::new(
            format!("Ingestion of '{}' completed successfully.", document.title),
            100,
        ),
    );
    tracing::info!("Ingested document '{}'", document.title);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::{RecordingIndex, StaticEmbedder};
    use std::time::Duration;

    fn document() -> Document {
        Document::new("A", "hello", vec!["x".to_string()])
    }

    /// Poll until the task reaches a terminal record (100% or an error)
    async fn wait_for_terminal(tracker: &IngestionTracker, task_id: Uuid) -> ProgressRecord {
        for _ in 0..500 {
            if let Ok(record) = tracker.get(&task_id) {
                if record.progress == 100 || record.message.starts_with("Error during ingestion:")
                {
                    return record;
                }
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("task {} never reached a terminal record", task_id);
    }

    #[tokio::test]
    async fn test_successful_run_reaches_completion() {
        let embedder = StaticEmbedder {
            vector: vec![0.1, 0.2, 0.3],
            fail: false,
        };
        let index = RecordingIndex::default();
        let tracker = IngestionTracker::new(16, 3600);
        let task_id = Uuid::new_v4();

        run_stages(&embedder, &index, &tracker, task_id, document())
            .await
            .unwrap();

        let record = tracker.get(&task_id).unwrap();
        assert_eq!(record.progress, 100);
        assert_eq!(record.message, "Ingestion of 'A' completed successfully.");

        let records = index.records.lock();
        let stored = records.get("A").unwrap();
        assert_eq!(stored.values, vec![0.1, 0.2, 0.3]);
        assert_eq!(stored.metadata.title, "A");
        assert_eq!(stored.metadata.tags, vec!["x".to_string()]);
        assert_eq!(stored.metadata.content, "hello");
    }

    #[tokio::test]
    async fn test_reingest_same_title_overwrites() {
        let embedder = StaticEmbedder {
            vector: vec![1.0],
            fail: false,
        };
        let index = RecordingIndex::default();
        let tracker = IngestionTracker::new(16, 3600);

        run_stages(&embedder, &index, &tracker, Uuid::new_v4(), document())
            .await
            .unwrap();
        let updated = Document::new("A", "hello again", vec!["y".to_string()]);
        run_stages(&embedder, &index, &tracker, Uuid::new_v4(), updated)
            .await
            .unwrap();

        let records = index.records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records.get("A").unwrap().metadata.content, "hello again");
    }

    #[tokio::test]
    async fn test_ingest_returns_distinct_ids_and_initial_record() {
        let pipeline = IngestionPipeline::new(
            Arc::new(StaticEmbedder {
                vector: vec![0.5],
                fail: false,
            }),
            Arc::new(RecordingIndex::default()),
            Arc::new(IngestionTracker::new(16, 3600)),
        );

        let first = pipeline.ingest(document());
        let second = pipeline.ingest(document());
        assert_ne!(first, second);

        // The id is visible immediately, at whatever stage the background
        // work has reached
        let record = pipeline.tracker().get(&first).unwrap();
        assert!(matches!(record.progress, 0 | 20 | 50 | 70 | 100));
    }

    #[tokio::test]
    async fn test_progress_ends_at_one_hundred() {
        let tracker = Arc::new(IngestionTracker::new(16, 3600));
        let pipeline = IngestionPipeline::new(
            Arc::new(StaticEmbedder {
                vector: vec![0.5],
                fail: false,
            }),
            Arc::new(RecordingIndex::default()),
            Arc::clone(&tracker),
        );

        let task_id = pipeline.ingest(document());

        // Every observed value is a stage of the successful lifecycle
        let stages = [0u8, 20, 50, 70, 100];
        let mut observed = Vec::new();
        for _ in 0..1000 {
            let record = tracker.get(&task_id).unwrap();
            assert!(stages.contains(&record.progress));
            if observed.last() != Some(&record.progress) {
                observed.push(record.progress);
            }
            if record.progress == 100 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert_eq!(observed.last(), Some(&100));

        // Observed sequence is a subsequence of the stage order
        let mut stage_iter = stages.iter();
        for value in &observed {
            assert!(
                stage_iter.any(|s| s == value),
                "unexpected progress order: {:?}",
                observed
            );
        }
    }

    #[tokio::test]
    async fn test_embedding_failure_writes_terminal_record() {
        let tracker = Arc::new(IngestionTracker::new(16, 3600));
        let index = Arc::new(RecordingIndex::default());
        let pipeline = IngestionPipeline::new(
            Arc::new(StaticEmbedder {
                vector: vec![],
                fail: true,
            }),
            Arc::clone(&index) as Arc<dyn VectorIndex>,
            Arc::clone(&tracker),
        );

        let task_id = pipeline.ingest(document());
        let record = wait_for_terminal(&tracker, task_id).await;

        assert_eq!(record.progress, 0);
        assert!(record.message.starts_with("Error during ingestion:"));
        assert!(index.records.lock().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_failure_writes_terminal_record() {
        let tracker = Arc::new(IngestionTracker::new(16, 3600));
        let index = Arc::new(RecordingIndex {
            fail_upsert: true,
            ..Default::default()
        });
        let pipeline = IngestionPipeline::new(
            Arc::new(StaticEmbedder {
                vector: vec![0.5],
                fail: false,
            }),
            Arc::clone(&index) as Arc<dyn VectorIndex>,
            Arc::clone(&tracker),
        );

        let task_id = pipeline.ingest(document());
        let record = wait_for_terminal(&tracker, task_id).await;

        assert_eq!(record.progress, 0);
        assert!(record.message.starts_with("Error during ingestion:"));
        assert!(index.records.lock().is_empty());
    }
}
