//! File repository for uploaded CSV blobs.
//!
//! Blobs live at `<root>/<username>/<filename>` with the username as the
//! sole namespace key. At most one live blob per (username, filename):
//! re-upload overwrites in place. Writes go through a temp file and a
//! rename, so a partial write never leaves a corrupt blob at the final path.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::warn;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Filesystem-backed blob store.
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`, creating the directory if absent.
    pub async fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| AppError::Io(format!("Failed to create data directory: {}", e)))?;
        Ok(FileStore { root })
    }

    /// Store `bytes` for (username, filename), overwriting any existing blob.
    pub async fn store(&self, username: &str, filename: &str, bytes: &[u8]) -> AppResult<()> {
        let final_path = self.blob_path(username, filename)?;
        let user_dir = final_path
            .parent()
            .ok_or_else(|| AppError::Io("blob path has no parent".to_string()))?
            .to_path_buf();

        tokio::fs::create_dir_all(&user_dir)
            .await
            .map_err(|e| AppError::Io(format!("Failed to create user directory: {}", e)))?;

        // Write to a temp file in the same directory, then rename into place
        let tmp_path = user_dir.join(format!(".upload-{}.tmp", Uuid::new_v4()));

        let write_result = async {
            let mut file = tokio::fs::File::create(&tmp_path)
                .await
                .map_err(|e| AppError::Io(format!("Failed to create temp file: {}", e)))?;
            file.write_all(bytes)
                .await
                .map_err(|e| AppError::Io(format!("Failed to write blob: {}", e)))?;
            file.flush()
                .await
                .map_err(|e| AppError::Io(format!("Failed to flush blob: {}", e)))?;
            Ok::<(), AppError>(())
        }
        .await;

        if let Err(e) = write_result {
            // No dangling partial file on failure
            if let Err(rm_err) = tokio::fs::remove_file(&tmp_path).await {
                warn!("Failed to clean up partial upload {:?}: {}", tmp_path, rm_err);
            }
            return Err(e);
        }

        tokio::fs::rename(&tmp_path, &final_path).await.map_err(|e| {
            let tmp = tmp_path.clone();
            tokio::spawn(async move {
                let _ = tokio::fs::remove_file(&tmp).await;
            });
            AppError::Io(format!("Failed to finalize blob: {}", e))
        })?;

        Ok(())
    }

    /// Load the blob for (username, filename).
    ///
    /// `NotFound` when the blob does not exist; a recoverable, user-visible
    /// condition (the log may reference a file removed externally).
    pub async fn load(&self, username: &str, filename: &str) -> AppResult<Vec<u8>> {
        let path = self.blob_path(username, filename)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("File '{}'", filename)))
            }
            Err(e) => Err(AppError::Io(format!("Failed to read blob: {}", e))),
        }
    }

    /// Remove the blob for (username, filename). Missing blobs are a no-op.
    pub async fn remove(&self, username: &str, filename: &str) -> AppResult<()> {
        let path = self.blob_path(username, filename)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(format!("Failed to remove blob: {}", e))),
        }
    }

    /// Resolve and validate the path for a blob.
    fn blob_path(&self, username: &str, filename: &str) -> AppResult<PathBuf> {
        validate_component(username, "username")?;
        validate_component(filename, "filename")?;
        Ok(self.root.join(username).join(filename))
    }
}

/// Reject path components that could escape the namespace.
fn validate_component(value: &str, what: &str) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::InvalidInput(format!("{} is empty", what)));
    }
    if value.contains("..")
        || value.contains('/')
        || value.contains('\\')
        || Path::new(value).is_absolute()
    {
        return Err(AppError::InvalidInput(format!(
            "Invalid {}: {}",
            what, value
        )));
    }
    Ok(())
}
