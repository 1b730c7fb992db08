use crate::error::{Result, TranscribeError};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions accepted by `POST /transcribe`
pub const ALLOWED_EXTENSIONS: &[&str] = &[".wav", ".flac", ".mp3", ".m4a"];

/// Lowercased extension of `filename` (with the dot), if it is on the allow-list
pub fn allowed_extension(filename: &str) -> Result<String> {
    let ext = Path::new(filename)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(TranscribeError::UnsupportedFormat(format!(
            "'{}' is not one of {}",
            filename,
            ALLOWED_EXTENSIONS.join(", ")
        )))
    }
}

/// An uploaded file staged on disk for the lifetime of one request.
///
/// The name is a fresh UUID, never derived from the client's filename, so
/// concurrent uploads of the same name cannot collide. The file is removed
/// when the guard is dropped.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    pub async fn create(dir: &Path, ext: &str, data: &[u8]) -> Result<Self> {
        let upload = Self {
            path: dir.join(format!("{}{}", uuid::Uuid::new_v4(), ext)),
        };

        tokio::fs::write(&upload.path, data).await?;
        debug!("Staged {} bytes at {}", data.len(), upload.path.display());

        Ok(upload)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove upload {}: {}", self.path.display(), e),
        }
    }
}
