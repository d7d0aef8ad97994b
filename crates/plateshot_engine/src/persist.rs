use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {path} unusable: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl PersistError {
    fn output_dir(path: &Path, reason: impl ToString) -> Self {
        Self::OutputDir {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Creates `dir` if needed and checks that files can be created in it.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    fs::create_dir_all(dir).map_err(|e| PersistError::output_dir(dir, e))?;
    if !dir.is_dir() {
        return Err(PersistError::output_dir(dir, "not a directory"));
    }
    NamedTempFile::new_in(dir).map_err(|e| PersistError::output_dir(dir, e))?;
    Ok(())
}

/// Writes `{dir}/{filename}` through a temp file and a rename; a file is
/// either absent or complete.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    /// Fails if `dir` cannot hold output.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        ensure_output_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, filename: &str, content: impl AsRef<[u8]>) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_ref())?;
        tmp.as_file_mut().sync_all()?;
        // `persist` replaces an existing target.
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
