//! Request descriptors, protocol response types and client configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeisError;

/// Kind of precomputed data served by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    /// Strain Green's tensor, used for moment-tensor sources.
    Sgt,
    /// Discrete Green's function, used for unit-force sources.
    Dgf,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sgt => "SGT",
            Self::Dgf => "DGF",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = SeisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("SGT") {
            Ok(Self::Sgt)
        } else if s.eq_ignore_ascii_case("DGF") {
            Ok(Self::Dgf)
        } else {
            Err(SeisError::InvalidInput {
                message: format!("unknown data type '{}': expected SGT or DGF", s),
            })
        }
    }
}

/// Receiver station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Network code (e.g., "CI").
    pub network: String,

    /// Station code (e.g., "SLA").
    pub station: String,

    /// Location code, often empty.
    #[serde(default)]
    pub location: String,

    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,
}

impl Station {
    pub fn new(
        network: impl Into<String>,
        station: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            network: network.into(),
            station: station.into(),
            location: String::new(),
            latitude,
            longitude,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

/// Source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,

    /// Depth below the surface in meters.
    pub depth_in_m: f64,

    /// Event or patch identifier.
    #[serde(default)]
    pub id: Option<String>,
}

impl Origin {
    pub fn new(latitude: f64, longitude: f64, depth_in_m: f64) -> Self {
        Self {
            latitude,
            longitude,
            depth_in_m,
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Depth in whole meters, truncated toward zero.
    pub fn depth_meters(&self) -> i64 {
        self.depth_in_m.trunc() as i64
    }
}

/// Grid bounds of a 3D model, as returned by `GET /models`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lat_delta: f64,
    pub long_min: f64,
    pub long_max: f64,
    pub long_delta: f64,
    pub depth_min: f64,
    pub depth_max: f64,
    pub depth_delta: f64,
}

impl ModelInfo {
    /// Human-readable multi-line summary of the grid.
    pub fn summary(&self) -> String {
        format!(
            "minimum latitude: {:.4} \n\
             maximum latitude: {:.4} \n\
             delta of latitude: {:.4} \n\
             minimum longitude: {:.4} \n\
             maximum longitude: {:.4} \n\
             delta of longitude: {:.4} \n\
             minimum depth (m): {:.2} \n\
             maximum depth (m): {:.2} \n\
             delta of depth (m): {:.2} \n",
            self.lat_min,
            self.lat_max,
            self.lat_delta,
            self.long_min,
            self.long_max,
            self.long_delta,
            self.depth_min,
            self.depth_max,
            self.depth_delta,
        )
    }
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the SeisCloud service.
    #[serde(default = "default_service_url")]
    pub url: String,

    /// Optional port appended to the URL as `url:port`.
    #[serde(default)]
    pub port: Option<u16>,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_service_url() -> String {
    "https://seis.cloud".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            port: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `SEISCLIENT_URL` | Service base URL |
    /// | `SEISCLIENT_PORT` | Service port |
    /// | `SEISCLIENT_TIMEOUT` | Request timeout in seconds |
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("SEISCLIENT_URL").unwrap_or_else(|_| default_service_url()),
            port: std::env::var("SEISCLIENT_PORT")
                .ok()
                .and_then(|v| v.parse().ok()),
            timeout_secs: std::env::var("SEISCLIENT_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        }
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Service endpoint every request path is appended to.
    pub fn endpoint(&self) -> String {
        let url = self.url.trim_end_matches('/');
        match self.port {
            Some(port) => format!("{}:{}", url, port),
            None => url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_data_type_parse() {
        assert_eq!("sgt".parse::<DataType>().unwrap(), DataType::Sgt);
        assert_eq!("DGF".parse::<DataType>().unwrap(), DataType::Dgf);
        assert!(matches!(
            "FK".parse::<DataType>(),
            Err(SeisError::InvalidInput { .. })
        ));
        assert_eq!(DataType::Sgt.to_string(), "SGT");
    }

    #[test]
    fn test_depth_meters_truncates() {
        assert_eq!(Origin::new(0.0, 0.0, 2810.9).depth_meters(), 2810);
        assert_eq!(Origin::new(0.0, 0.0, 1000.0).depth_meters(), 1000);
        assert_eq!(Origin::new(0.0, 0.0, 0.4).depth_meters(), 0);
    }

    #[test]
    fn test_model_info_summary() {
        let info = ModelInfo {
            lat_min: 30.0,
            lat_max: 37.5,
            lat_delta: 0.01,
            long_min: -121.0,
            long_max: -114.0,
            long_delta: 0.01,
            depth_min: 0.0,
            depth_max: 40000.0,
            depth_delta: 500.0,
        };
        let summary = info.summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "minimum latitude: 30.0000 ");
        assert_eq!(lines[4], "maximum longitude: -114.0000 ");
        assert_eq!(lines[8], "delta of depth (m): 500.00 ");
    }

    #[test]
    fn test_endpoint_with_port() {
        let config = ClientConfig::default()
            .with_url("http://10.0.0.5/")
            .with_port(8080);
        assert_eq!(config.endpoint(), "http://10.0.0.5:8080");

        let config = ClientConfig::default().with_url("http://10.0.0.5/");
        assert_eq!(config.endpoint(), "http://10.0.0.5");
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        std::env::remove_var("SEISCLIENT_URL");
        std::env::remove_var("SEISCLIENT_PORT");
        std::env::remove_var("SEISCLIENT_TIMEOUT");

        let config = ClientConfig::from_env();
        assert_eq!(config.url, "https://seis.cloud");
        assert!(config.port.is_none());
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    #[serial]
    fn test_config_from_env_overrides() {
        std::env::set_var("SEISCLIENT_URL", "http://localhost");
        std::env::set_var("SEISCLIENT_PORT", "5000");
        std::env::set_var("SEISCLIENT_TIMEOUT", "5");

        let config = ClientConfig::from_env();
        assert_eq!(config.endpoint(), "http://localhost:5000");
        assert_eq!(config.timeout_secs, 5);

        std::env::remove_var("SEISCLIENT_URL");
        std::env::remove_var("SEISCLIENT_PORT");
        std::env::remove_var("SEISCLIENT_TIMEOUT");
    }
}
