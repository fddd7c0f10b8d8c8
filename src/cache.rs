use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::data::loader::{LoadError, load_file};
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// DatasetCache – memoized loads keyed by file identity
// ---------------------------------------------------------------------------

/// What identifies a file's contents well enough to skip re-reading it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: SystemTime,
    len: u64,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    stamp: FileStamp,
    table: Arc<Table>,
}

/// Caller-owned cache of loaded tables.
///
/// An entry is reused while the file's modification time and length are
/// unchanged. Failed loads are never stored.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table for `path`, reading the file only when it changed
    /// since the last successful load.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Table>, LoadError> {
        let key = path.to_path_buf();
        let stamp = match stamp(path) {
            Ok(stamp) => stamp,
            Err(e) => {
                self.entries.remove(&key);
                return Err(e);
            }
        };

        if let (Some(stamp), Some(entry)) = (stamp, self.entries.get(&key)) {
            if entry.stamp == stamp {
                log::debug!("cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.table));
            }
        }

        let table = Arc::new(load_file(path)?);
        match stamp {
            Some(stamp) => {
                self.entries.insert(
                    key,
                    CacheEntry {
                        stamp,
                        table: Arc::clone(&table),
                    },
                );
            }
            // No modification time on this platform: nothing safe to key on.
            None => {
                self.entries.remove(&key);
            }
        }
        Ok(table)
    }

    /// Forget the entry for `path`, forcing the next load to read the file.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn stamp(path: &Path) -> Result<Option<FileStamp>, LoadError> {
    let meta = std::fs::metadata(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(meta.modified().ok().map(|modified| FileStamp {
        modified,
        len: meta.len(),
    }))
}
