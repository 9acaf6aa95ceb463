// file.rs — GoalFile: a GoalStore persisted to a single text file.
//
// A missing file loads as an empty store. Saves go to a sibling temp file
// that is renamed over the target, so an interrupted save leaves the
// previous contents in place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use crate::codec;
use crate::error::GoalError;
use crate::store::GoalStore;

/// Location of a persisted goal store.
#[derive(Debug, Clone)]
pub struct GoalFile {
    path: PathBuf,
}

impl GoalFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store, or an empty one if the file does not exist yet.
    pub fn load(&self) -> Result<GoalStore, GoalError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no save file, starting empty");
                return Ok(GoalStore::new());
            }
            Err(source) => return Err(self.io_error(&self.path, source)),
        };

        let store = codec::load(BufReader::new(file)).map_err(|e| self.with_path(e))?;
        tracing::info!(
            path = %self.path.display(),
            goals = store.len(),
            score = store.total_score(),
            "loaded goals"
        );
        Ok(store)
    }

    /// Replace `store` with the file contents. `store` is untouched on error.
    pub fn reload_into(&self, store: &mut GoalStore) -> Result<(), GoalError> {
        let fresh = self.load()?;
        *store = fresh;
        Ok(())
    }

    /// Write `store` to the file, creating parent directories as needed.
    pub fn save(&self, store: &GoalStore) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(parent, source))?;
        }

        let tmp = self.tmp_path();
        let result = File::create(&tmp)
            .map_err(|source| self.io_error(&tmp, source))
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                codec::save(store, &mut writer).map_err(|e| self.with_path(e))?;
                let file = writer
                    .into_inner()
                    .map_err(|e| self.io_error(&tmp, e.into_error()))?;
                file.sync_all().map_err(|source| self.io_error(&tmp, source))
            })
            .and_then(|()| {
                fs::rename(&tmp, &self.path).map_err(|source| self.io_error(&self.path, source))
            });

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        tracing::info!(
            path = %self.path.display(),
            goals = store.len(),
            score = store.total_score(),
            "saved goals"
        );
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> GoalError {
        GoalError::IoError {
            path: path.display().to_string(),
            source,
        }
    }

    /// Attach the file path to bare stream errors from the codec.
    fn with_path(&self, err: GoalError) -> GoalError {
        match err {
            GoalError::Io(source) => self.io_error(&self.path, source),
            other => other,
        }
    }
}
