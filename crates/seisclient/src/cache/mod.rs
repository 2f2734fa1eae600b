//! Local on-disk cache for fetched bundles.
//!
//! One flat directory, one file per request key:
//!
//! ```text
//! {save_dir}/
//!   SOCAL3D.CI.SLA.34.0000.-118.0000.1000.SGT.ndjson
//!   SOCAL3D.CI.USC.35.6013.-117.5970.2810.DGF.ndjson
//! ```
//!
//! Files are written atomically and never evicted or expired by the client.

use std::path::{Path, PathBuf};

use crate::bundle::FetchedBundle;
use crate::error::SeisResult;
use crate::types::{DataType, Origin, Station};

mod io;
mod keys;
mod put;
mod read;

pub use keys::CacheKey;
pub(crate) use keys::format_coordinate;

/// Extension of cache files.
pub const CACHE_FILE_EXT: &str = "ndjson";

/// Read-through cache rooted at a save directory.
#[derive(Debug, Clone)]
pub struct BundleCache {
    save_dir: PathBuf,
}

impl BundleCache {
    /// Cache rooted at `save_dir`. The directory is not created.
    pub fn with_dir(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
        }
    }

    /// Platform cache location, e.g. `~/.cache/seisclient` on Linux.
    pub fn default_dir() -> SeisResult<PathBuf> {
        io::default_cache_dir_impl()
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Path of the cache file for a key.
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.save_dir.join(key.file_name())
    }

    /// Path of the cache file for a request.
    pub fn path_for_request(
        &self,
        model: &str,
        station: &Station,
        origin: &Origin,
        data_type: DataType,
    ) -> PathBuf {
        self.path_for(&CacheKey::new(model, station, origin, data_type))
    }

    /// Load a cached bundle.
    ///
    /// Returns `None` when the file is absent, unreadable or does not decode
    /// to a complete bundle.
    pub async fn get(&self, key: &CacheKey) -> Option<FetchedBundle> {
        read::get_impl(self, key).await
    }

    /// Store a bundle, replacing any existing file atomically.
    pub async fn put(&self, key: &CacheKey, bundle: &FetchedBundle) -> SeisResult<PathBuf> {
        put::put_impl(self, key, bundle).await
    }
}
