//! Filesystem helpers for the cache.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{SeisError, SeisResult};

pub(crate) fn default_cache_dir_impl() -> SeisResult<PathBuf> {
    let base = dirs::cache_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| SeisError::Cache {
            message: "could not determine cache directory".to_string(),
        })?;

    Ok(base.join("seisclient"))
}

/// Write to `<path>.tmp`, then rename over `path`.
pub(crate) async fn write_atomic_impl(path: &Path, content: &[u8]) -> SeisResult<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| SeisError::Cache {
            message: format!("cache path has no file name: {}", path.display()),
        })?
        .to_string_lossy();
    let temp_path = path.with_file_name(format!("{}.tmp", file_name));

    if let Err(e) = fs::write(&temp_path, content).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(SeisError::Cache {
            message: format!("failed to write temp file: {}", e),
        });
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(SeisError::Cache {
            message: format!("failed to rename temp file: {}", e),
        });
    }

    Ok(())
}
