//! Persistence port for path records and the bundled adapters.
//!
//! - [`InMemoryPathRepository`]: process-local store for tests and embedding
//! - [`JsonFilePathRepository`]: single JSON document on disk, used by the CLI

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{NewPathRecord, PathRecord, RecordPage};

/// Storage collaborator for [`PathRecord`]s.
///
/// Implementations manage their own concurrency; the service never locks
/// around repository calls.
#[async_trait]
pub trait PathRepository: Send + Sync {
    /// Store a record and return its newly assigned id.
    async fn create(&self, record: NewPathRecord) -> Result<String>;

    async fn get(&self, id: &str) -> Result<Option<PathRecord>>;

    /// Records owned by `owner_id`, newest first, skipping `offset` and
    /// returning at most `limit`. `total_count` ignores the slice.
    async fn query(&self, owner_id: &str, limit: usize, offset: usize) -> Result<RecordPage>;

    /// Remove a record. Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Record map shared by both adapters.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordTable {
    records: HashMap<String, PathRecord>,
}

impl RecordTable {
    fn insert(&mut self, record: NewPathRecord) -> String {
        let id = Uuid::now_v7().to_string();
        self.records.insert(id.clone(), record.with_id(id.clone()));
        id
    }

    fn page(&self, owner_id: &str, limit: usize, offset: usize) -> RecordPage {
        let mut owned: Vec<&PathRecord> = self
            .records
            .values()
            .filter(|record| record.owner_id == owner_id)
            .collect();
        owned.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        RecordPage {
            total_count: owned.len(),
            records: owned
                .into_iter()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect(),
        }
    }
}

/// Process-local repository backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryPathRepository {
    table: RwLock<RecordTable>,
}

impl InMemoryPathRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all owners.
    pub async fn len(&self) -> usize {
        self.table.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PathRepository for InMemoryPathRepository {
    async fn create(&self, record: NewPathRecord) -> Result<String> {
        Ok(self.table.write().await.insert(record))
    }

    async fn get(&self, id: &str) -> Result<Option<PathRecord>> {
        Ok(self.table.read().await.records.get(id).cloned())
    }

    async fn query(&self, owner_id: &str, limit: usize, offset: usize) -> Result<RecordPage> {
        Ok(self.table.read().await.page(owner_id, limit, offset))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.table.write().await.records.remove(id);
        Ok(())
    }
}

/// Repository persisting every record in one JSON file.
///
/// Each mutation rewrites the document through a sibling temporary file and
/// a rename, so readers never observe a half-written store. A missing file is
/// an empty store.
#[derive(Debug)]
pub struct JsonFilePathRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFilePathRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<RecordTable> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(RecordTable::default()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| Error::Persistence {
                message: format!("corrupt store {}: {e}", self.path.display()),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RecordTable::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, table: &RecordTable) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(table)?;
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        tracing::debug!(
            path = %self.path.display(),
            records = table.records.len(),
            "path store written"
        );
        Ok(())
    }
}

#[async_trait]
impl PathRepository for JsonFilePathRepository {
    async fn create(&self, record: NewPathRecord) -> Result<String> {
        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        let id = table.insert(record);
        self.save(&table).await?;
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<PathRecord>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.records.remove(id))
    }

    async fn query(&self, owner_id: &str, limit: usize, offset: usize) -> Result<RecordPage> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.page(owner_id, limit, offset))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        if table.records.remove(id).is_some() {
            self.save(&table).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Point;
    use crate::model::PathMetadata;
    use crate::strategy::PathAlgorithm;
    use chrono::{Duration, TimeZone, Utc};

    fn record(owner: &str, minutes: i64) -> NewPathRecord {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(1.0, 1.0);
        NewPathRecord {
            owner_id: owner.to_string(),
            start,
            end,
            path: vec![start, end],
            distance: 157.2,
            duration_ms: 1,
            algorithm: PathAlgorithm::Bfs,
            metadata: PathMetadata::default(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(minutes),
            is_public: false,
        }
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let repo = InMemoryPathRepository::new();
        let a = repo.create(record("alice", 0)).await.unwrap();
        let b = repo.create(record("alice", 1)).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(repo.get(&a).await.unwrap().unwrap().id, a);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn query_orders_newest_first_and_counts_all() {
        let repo = InMemoryPathRepository::new();
        for minutes in [5, 1, 3] {
            repo.create(record("alice", minutes)).await.unwrap();
        }
        repo.create(record("bob", 10)).await.unwrap();

        let page = repo.query("alice", 2, 0).await.unwrap();
        assert_eq!(page.total_count, 3);
        let order: Vec<i64> = page
            .records
            .iter()
            .map(|r| r.created_at.timestamp() / 60 % 60)
            .collect();
        assert_eq!(order, vec![5, 3]);

        let tail = repo.query("alice", 2, 2).await.unwrap();
        assert_eq!(tail.records.len(), 1);
        assert_eq!(tail.total_count, 3);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryPathRepository::new();
        let id = repo.create(record("alice", 0)).await.unwrap();
        repo.delete(&id).await.unwrap();
        repo.delete(&id).await.unwrap();
        assert!(repo.get(&id).await.unwrap().is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn json_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("paths.json");

        let id = {
            let repo = JsonFilePathRepository::new(&path);
            repo.create(record("alice", 0)).await.unwrap()
        };

        let reopened = JsonFilePathRepository::new(&path);
        let stored = reopened.get(&id).await.unwrap().expect("record persisted");
        assert_eq!(stored.owner_id, "alice");
        assert_eq!(reopened.query("alice", 10, 0).await.unwrap().total_count, 1);
    }

    #[tokio::test]
    async fn json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFilePathRepository::new(dir.path().join("absent.json"));
        assert!(repo.get("nope").await.unwrap().is_none());
        assert_eq!(repo.query("alice", 10, 0).await.unwrap().total_count, 0);
    }

    #[tokio::test]
    async fn json_store_reports_corruption_as_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paths.json");
        std::fs::write(&path, b"{not json").unwrap();
        let repo = JsonFilePathRepository::new(&path);
        let err = repo.query("alice", 10, 0).await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Persistence);
    }

    #[tokio::test]
    async fn json_store_delete_removes_record() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFilePathRepository::new(dir.path().join("paths.json"));
        let id = repo.create(record("alice", 0)).await.unwrap();
        repo.delete(&id).await.unwrap();
        assert!(repo.get(&id).await.unwrap().is_none());
    }
}
