//! Upload persistence.
//!
//! The original uploaded bytes are kept on disk regardless of parse
//! outcome, so a failed parse can be recovered manually. Writes are
//! create-or-overwrite keyed by the uploaded filename; concurrent
//! uploads of the same name race and the last write wins.

use std::path::{Path, PathBuf};

use crate::error::{GatewayError, Result};

/// Filesystem store retaining original uploads.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Persist one upload, overwriting any previous file with that name.
    ///
    /// The filename is reduced to its final path component so a crafted
    /// name cannot escape the upload directory.
    pub fn save(&self, filename: &str, content: &[u8]) -> Result<PathBuf> {
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| GatewayError::Validation(format!("invalid filename: {filename}")))?;
        let path = self.dir.join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Directory the store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
