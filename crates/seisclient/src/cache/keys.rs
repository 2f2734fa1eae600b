//! Cache key derivation.

use std::fmt;

use crate::types::{DataType, Origin, Station};

use super::CACHE_FILE_EXT;

/// Rounded request identity.
///
/// Coordinates are rendered with 4 decimals and depth in whole meters, so
/// requests differing only below that precision share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    model: String,
    network: String,
    station: String,
    latitude: String,
    longitude: String,
    depth_m: i64,
    data_type: DataType,
}

impl CacheKey {
    pub fn new(model: &str, station: &Station, origin: &Origin, data_type: DataType) -> Self {
        Self {
            model: model.to_uppercase(),
            network: station.network.clone(),
            station: station.station.clone(),
            latitude: format_coordinate(origin.latitude),
            longitude: format_coordinate(origin.longitude),
            depth_m: origin.depth_meters(),
            data_type,
        }
    }

    /// `MODEL.NETWORK.STATION.LAT.LON.DEPTH.TYPE.ndjson`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self, CACHE_FILE_EXT)
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}.{}.{}.{}",
            self.model,
            self.network,
            self.station,
            self.latitude,
            self.longitude,
            self.depth_m,
            self.data_type
        )
    }
}

/// Fixed 4-decimal rendering used in both cache keys and request queries.
pub(crate) fn format_coordinate(value: f64) -> String {
    let rendered = format!("{:.4}", value);
    // -0.00001 and 0.00001 must land on the same key
    if rendered == "-0.0000" {
        "0.0000".to_string()
    } else {
        rendered
    }
}
