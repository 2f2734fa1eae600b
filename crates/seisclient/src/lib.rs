//! Client for precomputed Green's-function data served by SeisCloud.
//!
//! This crate provides:
//!
//! - HTTP client for the SeisCloud model and data endpoints
//! - Read-through on-disk cache of fetched SGT/DGF bundles
//! - A [`GreensEngine`] seam and the [`GreensClient`] façade that feeds
//!   fetched tensors into it
//!
//! # Quick Start
//!
//! ```no_run
//! use seisclient::{ClientConfig, DataType, Origin, SeisClient, Station};
//!
//! # async fn example() -> seisclient::SeisResult<()> {
//! let client = SeisClient::new(ClientConfig::from_env())?;
//!
//! let station = Station::new("CI", "SLA", 35.890, -117.283);
//! let origin = Origin::new(35.601333, -117.597, 2810.0);
//!
//! // First call downloads and caches; later calls read the cache file.
//! let sgt = client
//!     .fetch("SOCAL3D", &station, &origin, "/tmp/seis", DataType::Sgt)
//!     .await?;
//! println!("tensor shape {:?}, dt {}", sgt.tensor.shape, sgt.dt);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `SEISCLIENT_URL` | Service base URL (default: `https://seis.cloud`) |
//! | `SEISCLIENT_PORT` | Service port, appended as `url:port` |
//! | `SEISCLIENT_TIMEOUT` | Request timeout in seconds (default: 120) |

pub mod bundle;
pub mod cache;
pub mod client;
pub mod engine;
pub mod error;
pub mod greens;
pub mod types;

// Re-export main types
pub use bundle::{DecodeError, FetchedBundle, SourceTimeFunction, Tensor};
pub use cache::{BundleCache, CacheKey, CACHE_FILE_EXT};
pub use client::{BundleSource, ResolvedBundle, SeisClient, CLIENT_USER_AGENT};
pub use engine::{
    EngineInput, ForceVector, GreensEngine, MomentTensor, Orientation, Trace, Waveforms,
};
pub use error::{SeisError, SeisResult};
pub use greens::{FaultPatch, GreensClient, FK_UNIT_FACTOR};
pub use types::{ClientConfig, DataType, ModelInfo, Origin, Station};
