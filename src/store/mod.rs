//! Todo item storage
//!
//! The store keeps every item in memory behind a single lock. When a file path
//! is configured the full snapshot, including the id counter, is written back
//! after each mutation so ids are never handed out twice. A mutation whose
//! write fails leaves the in-memory state untouched.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::core::models::TodoItem;
use crate::errors::TodoError;

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<TodoItem>, TodoError>;
    async fn create(&self, task: &str, completed: bool) -> Result<TodoItem, TodoError>;
    async fn get(&self, id: u64) -> Result<Option<TodoItem>, TodoError>;
    async fn update(&self, id: u64, task: &str, completed: bool) -> Result<TodoItem, TodoError>;
    async fn delete(&self, id: u64) -> Result<(), TodoError>;

    /// Items with `completed == false`, in creation order.
    async fn list_pending(&self) -> Result<Vec<TodoItem>, TodoError> {
        let mut items = self.list_all().await?;
        items.retain(|item| !item.completed);
        Ok(items)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    next_id: u64,
    items: BTreeMap<u64, TodoItem>,
}

impl Snapshot {
    fn allocate_id(&mut self) -> u64 {
        // Ids start at 1 and only ever move forward.
        self.next_id = self.next_id.max(1);
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

pub struct TodoStore {
    state: RwLock<Snapshot>,
    path: Option<PathBuf>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl TodoStore {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(Snapshot::default()),
            path: None,
        }
    }

    /// Opens a store persisted at `path`, starting empty when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, TodoError> {
        let path = path.as_ref().to_path_buf();
        let snapshot = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let mut snapshot: Snapshot = serde_json::from_str(&content)?;
                let highest = snapshot.items.keys().next_back().copied().unwrap_or(0);
                snapshot.next_id = snapshot.next_id.max(highest + 1);
                snapshot
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(e.into()),
        };

        info!(
            path = %path.display(),
            items = snapshot.items.len(),
            "Opened todo store"
        );

        Ok(Self {
            state: RwLock::new(snapshot),
            path: Some(path),
        })
    }

    async fn persist(&self, snapshot: &Snapshot) -> Result<(), TodoError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = serde_json::to_string_pretty(snapshot)?;
        let tmp = path.with_extension("tmp");
        let written = match tokio::fs::write(&tmp, content).await {
            Ok(()) => tokio::fs::rename(&tmp, path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            warn!(path = %path.display(), "Failed to persist todo store: {}", e);
            return Err(e.into());
        }

        debug!(path = %path.display(), "Persisted todo store");
        Ok(())
    }

    /// Applies `change` to a copy of the snapshot. The copy replaces the live
    /// state only once it has been persisted.
    async fn commit<T, F>(&self, change: F) -> Result<T, TodoError>
    where
        F: FnOnce(&mut Snapshot) -> Result<T, TodoError> + Send,
        T: Send,
    {
        let mut state = self.state.write().await;
        let mut next = Snapshot::clone(&state);
        let out = change(&mut next)?;
        self.persist(&next).await?;
        *state = next;
        Ok(out)
    }
}

fn validate_task(task: &str) -> Result<&str, TodoError> {
    let trimmed = task.trim();
    if trimmed.is_empty() {
        return Err(TodoError::Validation("task must not be empty".to_string()));
    }
    Ok(trimmed)
}

#[async_trait]
impl ItemStore for TodoStore {
    async fn list_all(&self) -> Result<Vec<TodoItem>, TodoError> {
        let state = self.state.read().await;
        Ok(state.items.values().cloned().collect())
    }

    async fn create(&self, task: &str, completed: bool) -> Result<TodoItem, TodoError> {
        let task = validate_task(task)?;
        self.commit(|snapshot| {
            let id = snapshot.allocate_id();
            let item = TodoItem {
                id,
                task: task.to_string(),
                completed,
                created_at: Utc::now(),
            };
            snapshot.items.insert(id, item.clone());
            Ok(item)
        })
        .await
    }

    async fn get(&self, id: u64) -> Result<Option<TodoItem>, TodoError> {
        let state = self.state.read().await;
        Ok(state.items.get(&id).cloned())
    }

    async fn update(&self, id: u64, task: &str, completed: bool) -> Result<TodoItem, TodoError> {
        let task = validate_task(task)?;
        self.commit(|snapshot| {
            let Some(item) = snapshot.items.get_mut(&id) else {
                return Err(TodoError::NotFound(id));
            };
            item.task = task.to_string();
            item.completed = completed;
            Ok(item.clone())
        })
        .await
    }

    async fn delete(&self, id: u64) -> Result<(), TodoError> {
        self.commit(|snapshot| {
            snapshot
                .items
                .remove(&id)
                .map(|_| ())
                .ok_or(TodoError::NotFound(id))
        })
        .await
    }
}
