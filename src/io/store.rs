use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::Task;

/// Key under which the task list is stored
pub const TASKS_KEY: &str = "tasks";

/// Key receiving a copy of an unreadable task document
pub const BACKUP_KEY: &str = "tasks.bak";

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("could not serialize tasks: {0}")]
    Json(#[from] serde_json::Error),
}

/// Opaque string key-value storage
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, used by tests and as a scratch backend
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileKv { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io { path, source: e }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io {
            path: self.dir.clone(),
            source: e,
        })?;
        let path = self.path_for(key);
        atomic_write(&path, value.as_bytes()).map_err(|e| StoreError::Io { path, source: e })
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Loads and saves the whole task list under [`TASKS_KEY`]
#[derive(Debug)]
pub struct TaskStore<K> {
    kv: K,
}

impl<K: KvStore> TaskStore<K> {
    pub fn new(kv: K) -> Self {
        TaskStore { kv }
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut K {
        &mut self.kv
    }

    /// Read the task list. Absent key → empty list.
    /// An unparseable document is copied to [`BACKUP_KEY`] and treated as empty.
    pub fn load(&mut self) -> Result<Vec<Task>, StoreError> {
        let Some(content) = self.kv.get(TASKS_KEY)? else {
            tracing::debug!("no stored tasks, starting empty");
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Task>>(&content) {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "loaded tasks");
                Ok(tasks)
            }
            Err(e) => {
                tracing::warn!(error = %e, backup = BACKUP_KEY, "stored tasks unreadable, starting empty");
                self.kv.set(BACKUP_KEY, &content)?;
                Ok(Vec::new())
            }
        }
    }

    /// Rewrite the full task list
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        let content = serde_json::to_string(tasks)?;
        self.kv.set(TASKS_KEY, &content)?;
        tracing::debug!(count = tasks.len(), "saved tasks");
        Ok(())
    }
}
