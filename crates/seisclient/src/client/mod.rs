//! SeisCloud client: model queries and the read-through bundle fetch.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info, warn};

use crate::bundle::FetchedBundle;
use crate::cache::{BundleCache, CacheKey};
use crate::error::{SeisError, SeisResult};
use crate::types::{ClientConfig, DataType, ModelInfo, Origin, Station};

mod helpers;
mod http;

use helpers::{bundle_url, model_info_url, validate_request};
use http::HttpBackend;

/// User-Agent sent with every request.
pub const CLIENT_USER_AGENT: &str = concat!("seisclient/", env!("CARGO_PKG_VERSION"));

/// Where a resolved bundle came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleSource {
    /// Decoded from an existing cache file.
    Cache,

    /// Fetched from the service and written to the cache.
    Remote,

    /// Fetched from the service; the cache write failed and was skipped.
    RemoteUnsaved { reason: String },
}

impl fmt::Display for BundleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cache => write!(f, "cache"),
            Self::Remote => write!(f, "remote"),
            Self::RemoteUnsaved { reason } => write!(f, "remote (not cached: {})", reason),
        }
    }
}

/// A bundle together with its provenance.
#[derive(Debug, Clone)]
pub struct ResolvedBundle {
    pub bundle: FetchedBundle,

    pub source: BundleSource,

    /// Cache file for the request key, whether or not it was written.
    pub path: PathBuf,
}

/// Client for the SeisCloud service.
#[derive(Debug, Clone)]
pub struct SeisClient {
    http: HttpBackend,
}

impl SeisClient {
    pub fn new(config: ClientConfig) -> SeisResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| SeisError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http: HttpBackend {
                client,
                endpoint: config.endpoint(),
            },
        })
    }

    pub fn from_env() -> SeisResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn endpoint(&self) -> &str {
        &self.http.endpoint
    }

    /// Query the grid bounds of a model. Never cached.
    ///
    /// Returns the parsed bounds and a multi-line summary.
    pub async fn get_model_info(&self, model: &str) -> SeisResult<(ModelInfo, String)> {
        if model.trim().is_empty() {
            return Err(SeisError::InvalidInput {
                message: "model identifier must not be empty".to_string(),
            });
        }

        let url = model_info_url(&self.http.endpoint, model)?;
        debug!(url = %url, "fetching model info");

        let info = self.http.fetch_model_info(&url).await?;
        let summary = info.summary();
        Ok((info, summary))
    }

    /// Fetch a bundle from the service, bypassing the cache.
    pub async fn request_bundle(
        &self,
        model: &str,
        station: &Station,
        origin: &Origin,
        data_type: DataType,
    ) -> SeisResult<FetchedBundle> {
        validate_request(model, station, origin)?;

        let url = bundle_url(&self.http.endpoint, model, station, origin, data_type)?;
        debug!(url = %url, "requesting bundle");

        self.http.fetch_bundle(&url).await
    }

    /// Read-through fetch, reporting where the bundle came from.
    ///
    /// A readable cache file wins. Otherwise one remote request is made; its
    /// failure is returned as-is and leaves `save_dir` untouched. A failed
    /// cache write after a successful fetch is reported through
    /// [`BundleSource::RemoteUnsaved`], never as an error.
    pub async fn fetch_resolved(
        &self,
        model: &str,
        station: &Station,
        origin: &Origin,
        save_dir: impl AsRef<Path>,
        data_type: DataType,
    ) -> SeisResult<ResolvedBundle> {
        validate_request(model, station, origin)?;

        let cache = BundleCache::with_dir(save_dir.as_ref());
        let key = CacheKey::new(model, station, origin, data_type);
        let path = cache.path_for(&key);

        if let Some(bundle) = cache.get(&key).await {
            return Ok(ResolvedBundle {
                bundle,
                source: BundleSource::Cache,
                path,
            });
        }

        let bundle = self
            .request_bundle(model, station, origin, data_type)
            .await?;

        let source = match cache.put(&key, &bundle).await {
            Ok(_) => {
                info!(key = %key, path = %path.display(), "fetched and cached bundle");
                BundleSource::Remote
            }
            Err(e) => {
                warn!(key = %key, error = %e, "could not cache fetched bundle");
                BundleSource::RemoteUnsaved {
                    reason: e.to_string(),
                }
            }
        };

        Ok(ResolvedBundle {
            bundle,
            source,
            path,
        })
    }

    /// Read-through fetch of a bundle.
    pub async fn fetch(
        &self,
        model: &str,
        station: &Station,
        origin: &Origin,
        save_dir: impl AsRef<Path>,
        data_type: DataType,
    ) -> SeisResult<FetchedBundle> {
        self.fetch_resolved(model, station, origin, save_dir, data_type)
            .await
            .map(|resolved| resolved.bundle)
    }

    /// Read-through fetch of a strain Green's tensor.
    pub async fn request_sgt(
        &self,
        model: &str,
        station: &Station,
        origin: &Origin,
        save_dir: impl AsRef<Path>,
    ) -> SeisResult<FetchedBundle> {
        self.fetch(model, station, origin, save_dir, DataType::Sgt)
            .await
    }

    /// Read-through fetch of a discrete Green's function.
    pub async fn request_dgf(
        &self,
        model: &str,
        station: &Station,
        origin: &Origin,
        save_dir: impl AsRef<Path>,
    ) -> SeisResult<FetchedBundle> {
        self.fetch(model, station, origin, save_dir, DataType::Dgf)
            .await
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::bundle::{SourceTimeFunction, Tensor};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> SeisClient {
        let config = ClientConfig::default()
            .with_url(mock_server.uri())
            .with_timeout_secs(5);
        SeisClient::new(config).expect("failed to create client")
    }

    fn test_bundle() -> FetchedBundle {
        FetchedBundle::new(
            Tensor::new(vec![3], vec![1.0, 2.0, 3.0]),
            0.02,
            SourceTimeFunction(vec![0.0, 1.0]),
        )
    }

    #[tokio::test]
    async fn test_get_model_info_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .and(query_param("model", "SOCAL3D"))
            .and(header("user-agent", CLIENT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "lat_min": 32.0, "lat_max": 36.0, "lat_delta": 0.01,
                "long_min": -121.0, "long_max": -114.0, "long_delta": 0.01,
                "depth_min": 0.0, "depth_max": 40000.0, "depth_delta": 500.0
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let (info, summary) = client.get_model_info("socal3d").await.unwrap();

        assert_eq!(info.lat_max, 36.0);
        assert_eq!(info.depth_delta, 500.0);
        assert!(summary.starts_with("minimum latitude: 32.0000 \n"));
    }

    #[tokio::test]
    async fn test_get_model_info_bad_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client.get_model_info("SOCAL3D").await.unwrap_err();

        match err {
            SeisError::Network { message } => assert_eq!(message, "HTTP 500: boom"),
            other => panic!("expected Network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_model_info_unparseable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"lat_min\": 1.0}"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client.get_model_info("SOCAL3D").await.unwrap_err();
        assert!(matches!(err, SeisError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_get_model_info_empty_model() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server);

        let err = client.get_model_info("").await.unwrap_err();
        assert!(matches!(err, SeisError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_request_bundle_query_params() {
        let mock_server = MockServer::start().await;
        let bundle = test_bundle();

        Mock::given(method("GET"))
            .and(path("/request"))
            .and(query_param("model", "SOCAL3D"))
            .and(query_param("network", "CI"))
            .and(query_param("station", "SLA"))
            .and(query_param("rlat", "35.8900"))
            .and(query_param("rlon", "-117.2830"))
            .and(query_param("data_type", "DGF"))
            .and(query_param("slat", "34.0000"))
            .and(query_param("slon", "-118.0000"))
            .and(query_param("sdepth_in_m", "1000"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(bundle.to_bytes().unwrap()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let fetched = client
            .request_bundle(
                "socal3d",
                &Station::new("CI", "SLA", 35.890, -117.283),
                &Origin::new(34.0, -118.0, 1000.0),
                DataType::Dgf,
            )
            .await
            .unwrap();

        assert_eq!(fetched, bundle);
    }

    #[tokio::test]
    async fn test_request_bundle_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/request"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client
            .request_bundle(
                "UNKNOWN",
                &Station::new("CI", "SLA", 35.890, -117.283),
                &Origin::new(34.0, -118.0, 1000.0),
                DataType::Sgt,
            )
            .await
            .unwrap_err();

        match err {
            SeisError::NotFound { what } => {
                assert!(what.starts_with("/request?model=UNKNOWN"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_request_bundle_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/request"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x80\x04\x95 pickle".to_vec()))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client
            .request_bundle(
                "SOCAL3D",
                &Station::new("CI", "SLA", 35.890, -117.283),
                &Origin::new(34.0, -118.0, 1000.0),
                DataType::Sgt,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SeisError::InvalidResponse { .. }));
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn test_port_is_appended_to_endpoint() {
        let config = ClientConfig::default()
            .with_url("http://127.0.0.1/")
            .with_port(8000);
        let client = SeisClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:8000");
    }
}
