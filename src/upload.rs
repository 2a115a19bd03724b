//! Upload receiver: stores the single binary attachment a listing-creation
//! request may carry, and serves stored files back.
//!
//! Stored files are never deleted; removing a listing leaves its image
//! behind. That accumulation is an accepted trade-off of the design.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::StorageError;
use crate::protocol::multipart::FilePart;
use crate::util::time::now_ms;

/// Owns the uploads directory.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the attachment under a generated name and return the reference
    /// path handed back to clients (`/uploads/<name>`).
    pub fn store(&self, file: &FilePart) -> Result<String, StorageError> {
        let token: [u8; 4] = rand::random();
        let name = format!(
            "{}-{}{}",
            now_ms(),
            hex::encode(token),
            extension(&file.filename)
        );
        let path = self.dir.join(&name);
        fs::write(&path, &file.data).map_err(|source| StorageError::Write {
            path: path.display().to_string(),
            source,
        })?;
        info!("Stored upload {} ({} bytes)", name, file.data.len());
        Ok(format!("/uploads/{}", name))
    }

    /// Read a stored file back. Names with path separators or parent
    /// components are rejected.
    pub fn read(&self, name: &str) -> Option<Vec<u8>> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return None;
        }
        fs::read(self.dir.join(name)).ok()
    }
}

/// The original extension, dot included, or empty when there is none.
fn extension(filename: &str) -> String {
    match Path::new(filename).extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => String::new(),
    }
}
