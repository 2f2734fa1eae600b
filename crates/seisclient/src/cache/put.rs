//! Cache write path.

use std::path::PathBuf;

use tracing::debug;

use crate::bundle::FetchedBundle;
use crate::error::{SeisError, SeisResult};

use super::{io, BundleCache, CacheKey};

pub(crate) async fn put_impl(
    cache: &BundleCache,
    key: &CacheKey,
    bundle: &FetchedBundle,
) -> SeisResult<PathBuf> {
    let path = cache.path_for(key);

    let content = bundle.to_bytes().map_err(|e| SeisError::Cache {
        message: format!("failed to serialize bundle: {}", e),
    })?;
    io::write_atomic_impl(&path, &content).await?;

    debug!(key = %key, bytes = content.len(), "cached bundle");
    Ok(path)
}
