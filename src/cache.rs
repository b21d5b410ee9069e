use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::constants::{CACHE_DIR_NAME, CACHE_FILE_NAME, ENV_CACHE_PATH};
use crate::error::{HighlightError, Result};
use crate::model::{KanjiItem, VocabItem};
use crate::repository::{fetch_with_retry, ItemRepository, ItemSnapshot};
use crate::types::RetryPolicy;

#[derive(Serialize, Deserialize)]
struct CacheFile {
    kanji: Vec<KanjiItem>,
    vocab: Vec<VocabItem>,
}

/// JSON file holding a previously fetched snapshot, classification and
/// inflections included.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    /// Cache stored at `path`. Nothing is read until [`Self::load`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached snapshot.
    ///
    /// A missing file, an unparsable file and a cache with no items are all
    /// misses (`Ok(None)`) so the caller refetches; only I/O failures other
    /// than "not found" are errors.
    pub fn load(&self) -> Result<Option<ItemSnapshot>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot cache");
                return Ok(None);
            }
            Err(error) => {
                return Err(HighlightError::Cache(format!(
                    "failed to open {}: {error}",
                    self.path.display()
                )))
            }
        };

        let cached: CacheFile = match serde_json::from_reader(BufReader::new(file)) {
            Ok(cached) => cached,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "could not parse cached items, refetching");
                return Ok(None);
            }
        };

        if cached.kanji.is_empty() || cached.vocab.is_empty() {
            warn!(
                path = %self.path.display(),
                kanji = cached.kanji.len(),
                vocab = cached.vocab.len(),
                "cached items incomplete, refetching"
            );
            return Ok(None);
        }

        Ok(Some(ItemSnapshot::new(cached.kanji, cached.vocab)))
    }

    /// Writes the snapshot atomically: a temporary file in the target
    /// directory is persisted over the cache path.
    pub fn store(&self, snapshot: &ItemSnapshot) -> Result<()> {
        let parent_dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent_dir).map_err(|error| {
            HighlightError::Cache(format!(
                "failed to create cache directory {}: {error}",
                parent_dir.display()
            ))
        })?;

        let temp_file = NamedTempFile::new_in(parent_dir).map_err(|error| {
            HighlightError::Cache(format!("failed to create temporary cache file: {error}"))
        })?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            let contents = CacheFile {
                kanji: snapshot.kanji().to_vec(),
                vocab: snapshot.vocab().to_vec(),
            };
            serde_json::to_writer(&mut writer, &contents)?;
            writer.flush().map_err(|error| {
                HighlightError::Cache(format!("failed to write cache file: {error}"))
            })?;
        }
        temp_file.persist(&self.path).map_err(|error| {
            HighlightError::Cache(format!(
                "failed to persist cache file {}: {}",
                self.path.display(),
                error.error
            ))
        })?;
        debug!(path = %self.path.display(), "stored snapshot cache");
        Ok(())
    }

    /// Returns the cached snapshot, or fetches one from `repository` with
    /// bounded retry and caches it.
    pub fn load_or_fetch<R: ItemRepository + ?Sized>(
        &self,
        repository: &R,
        retry: &RetryPolicy,
    ) -> Result<ItemSnapshot> {
        if let Some(snapshot) = self.load()? {
            info!(
                kanji = snapshot.kanji().len(),
                vocab = snapshot.vocab().len(),
                "using cached items"
            );
            return Ok(snapshot);
        }

        let snapshot = fetch_with_retry(retry, |_| ItemSnapshot::from_repository(repository))?;
        info!(
            kanji = snapshot.kanji().len(),
            vocab = snapshot.vocab().len(),
            "fetched items"
        );
        if let Err(error) = self.store(&snapshot) {
            warn!(%error, "could not store snapshot cache");
        }
        Ok(snapshot)
    }
}

/// Default cache location: `KOTOBA_HIGHLIGHT_CACHE_PATH`, else the platform
/// cache directory.
pub fn default_cache_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(ENV_CACHE_PATH) {
        return Some(PathBuf::from(path));
    }
    resolve_cache_root().map(|root| root.join(CACHE_DIR_NAME).join(CACHE_FILE_NAME))
}

fn resolve_cache_root() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(path) = env::var_os("LOCALAPPDATA") {
            return Some(PathBuf::from(path));
        }
        if let Some(home) = env::var_os("USERPROFILE") {
            return Some(PathBuf::from(home).join("AppData").join("Local"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = env::var_os("HOME") {
            return Some(PathBuf::from(home).join("Library").join("Caches"));
        }
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        if let Some(path) = env::var_os("XDG_CACHE_HOME") {
            return Some(PathBuf::from(path));
        }
        if let Some(home) = env::var_os("HOME") {
            return Some(PathBuf::from(home).join(".cache"));
        }
    }

    None
}
