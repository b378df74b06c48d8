use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

/// Name of the workspace directory
pub const WORKSPACE_DIR: &str = ".punch";

/// Storage slot for the task collection
pub const TASKS_KEY: &str = "tasks";
/// Storage slot for the undo log
pub const UNDO_KEY: &str = "undo";

/// Error type for workspace-level operations
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("not a punchlist workspace: no .punch/ directory found (run `punch init`)")]
    NotAWorkspace,
    #[error("workspace already initialized at {0} (use --force to reinitialize)")]
    AlreadyInitialized(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A keyed JSON store rooted at a workspace directory. Each key maps to
/// `<dir>/<key>.json`.
///
/// Reads are forgiving: a missing or unparseable file falls back to the
/// caller's default and never surfaces an error. Writes go through a
/// temp file + rename so a crash mid-write cannot corrupt a slot.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// The workspace directory this store reads and writes
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Discover the workspace by walking up from `start`, looking for a
    /// `.punch/` directory.
    pub fn discover(start: &Path) -> Result<Store, WorkspaceError> {
        let mut current = start.to_path_buf();
        loop {
            let dir = current.join(WORKSPACE_DIR);
            if dir.is_dir() {
                return Ok(Store { dir });
            }
            if !current.pop() {
                return Err(WorkspaceError::NotAWorkspace);
            }
        }
    }

    /// Open the store under an explicit root directory (the `-C` flag).
    pub fn open(root: &Path) -> Result<Store, WorkspaceError> {
        let dir = root.join(WORKSPACE_DIR);
        if !dir.is_dir() {
            return Err(WorkspaceError::NotAWorkspace);
        }
        Ok(Store { dir })
    }

    /// Create a new workspace directory under `root`.
    pub fn init(root: &Path, force: bool) -> Result<Store, WorkspaceError> {
        let dir = root.join(WORKSPACE_DIR);
        if dir.is_dir() && !force {
            return Err(WorkspaceError::AlreadyInitialized(dir));
        }
        fs::create_dir_all(&dir)?;
        Ok(Store { dir })
    }

    /// Load the value stored under `key`. Absence or a parse failure
    /// falls back to `default`; read problems are never surfaced.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Ok(text) = fs::read_to_string(self.key_path(key)) else {
            return default;
        };
        serde_json::from_str(&text).unwrap_or(default)
    }

    /// Serialize `value` and write it under `key` atomically.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> io::Result<()> {
        let content = serde_json::to_string_pretty(value)?;
        atomic_write(&self.key_path(key), content.as_bytes())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
