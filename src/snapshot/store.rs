// src/snapshot/store.rs

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::errors::{Result, WccError};

/// Extension of the checksum file.
pub const HASH_EXT: &str = "hash";

/// Extension of the content file.
pub const CONTENT_EXT: &str = "site";

/// Last observed state of a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub checksum: String,
    /// Raw bytes as fetched, before any decoding.
    pub content: Vec<u8>,
    /// When the snapshot was last written.
    pub modified: DateTime<Local>,
}

/// Flat-file snapshot storage rooted at a single directory.
///
/// The checksum file marks a snapshot as present. On save the content file
/// is replaced first and the checksum file last, each through a temporary
/// file renamed into place.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn hash_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.{HASH_EXT}"))
    }

    pub fn content_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.{CONTENT_EXT}"))
    }

    /// Load the snapshot for `id`, or `None` if the site was never seen.
    pub fn load(&self, id: &str) -> Result<Option<Snapshot>> {
        let hash_path = self.hash_path(id);
        if !hash_path.exists() {
            debug!(id, "no snapshot yet");
            return Ok(None);
        }

        debug!(id, path = %hash_path.display(), "loading snapshot");
        let raw_hash = fs::read_to_string(&hash_path)
            .map_err(|e| storage_error("reading", &hash_path, e))?;
        let checksum = raw_hash.lines().next().unwrap_or_default().trim().to_string();

        let modified = fs::metadata(&hash_path)
            .and_then(|meta| meta.modified())
            .map_err(|e| storage_error("reading mtime of", &hash_path, e))?;

        let content_path = self.content_path(id);
        let content = match fs::read(&content_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    id,
                    path = %content_path.display(),
                    "checksum without content file; treating site as never seen"
                );
                return Ok(None);
            }
            Err(e) => return Err(storage_error("reading", &content_path, e)),
        };

        Ok(Some(Snapshot {
            checksum,
            content,
            modified: DateTime::<Local>::from(modified),
        }))
    }

    /// Replace the snapshot for `id`.
    pub fn save(&self, id: &str, checksum: &str, content: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| storage_error("creating", &self.dir, e))?;

        self.write_atomic(&self.content_path(id), content)?;
        self.write_atomic(&self.hash_path(id), format!("{checksum}\n").as_bytes())?;

        debug!(id, checksum, bytes = content.len(), "stored snapshot");
        Ok(())
    }

    /// Remove every snapshot file in the storage directory.
    ///
    /// Returns the number of files removed. A missing directory counts as
    /// already clean.
    pub fn clean(&self) -> Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(storage_error("listing", &self.dir, e)),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry.map_err(|e| storage_error("listing", &self.dir, e))?.path();
            let is_snapshot_file = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == HASH_EXT || ext == CONTENT_EXT);
            if is_snapshot_file && path.is_file() {
                fs::remove_file(&path).map_err(|e| storage_error("removing", &path, e))?;
                removed += 1;
            }
        }

        info!(dir = %self.dir.display(), removed, "removed snapshot files");
        Ok(removed)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| storage_error("creating temp file in", &self.dir, e))?;
        tmp.write_all(contents)
            .and_then(|_| tmp.flush())
            .map_err(|e| storage_error("writing", tmp.path(), e))?;
        tmp.persist(path)
            .map_err(|e| storage_error("replacing", path, e.error))?;
        Ok(())
    }
}

fn storage_error(action: &str, path: &Path, err: io::Error) -> WccError {
    WccError::StorageError(format!("{action} {}: {err}", path.display()))
}
