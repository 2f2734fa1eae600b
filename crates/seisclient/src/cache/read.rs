//! Cache read path. Every failure here degrades to a miss.

use std::io::ErrorKind;

use tokio::fs;
use tracing::{debug, warn};

use crate::bundle::FetchedBundle;

use super::{BundleCache, CacheKey};

pub(crate) async fn get_impl(cache: &BundleCache, key: &CacheKey) -> Option<FetchedBundle> {
    let path = cache.path_for(key);

    let bytes = match fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(key = %key, "bundle not in cache");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read cache file, refetching");
            return None;
        }
    };

    match FetchedBundle::from_bytes(&bytes) {
        Ok(bundle) => {
            debug!(key = %key, "cache hit");
            Some(bundle)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt cache file, refetching");
            None
        }
    }
}
