//! Pure helpers: request validation and URL construction (no HTTP, no status logic).

use url::Url;

use crate::cache::format_coordinate;
use crate::error::{SeisError, SeisResult};
use crate::types::{DataType, Origin, Station};

/// Reject requests the service could never answer.
pub(crate) fn validate_request(model: &str, station: &Station, origin: &Origin) -> SeisResult<()> {
    if model.trim().is_empty() {
        return Err(SeisError::InvalidInput {
            message: "model identifier must not be empty".to_string(),
        });
    }
    if station.network.is_empty() || station.station.is_empty() {
        return Err(SeisError::InvalidInput {
            message: "station network and station codes must not be empty".to_string(),
        });
    }

    let coordinates = [
        ("station latitude", station.latitude),
        ("station longitude", station.longitude),
        ("origin latitude", origin.latitude),
        ("origin longitude", origin.longitude),
        ("origin depth", origin.depth_in_m),
    ];
    for (name, value) in coordinates {
        if !value.is_finite() {
            return Err(SeisError::InvalidInput {
                message: format!("{} is not finite: {}", name, value),
            });
        }
    }

    Ok(())
}

fn endpoint_url(endpoint: &str, path: &str) -> SeisResult<Url> {
    let raw = format!("{}/{}", endpoint, path);
    Url::parse(&raw).map_err(|e| SeisError::Config {
        message: format!("invalid service endpoint '{}': {}", endpoint, e),
    })
}

/// `GET {endpoint}/models?model={MODEL}`
pub(crate) fn model_info_url(endpoint: &str, model: &str) -> SeisResult<Url> {
    let mut url = endpoint_url(endpoint, "models")?;
    url.query_pairs_mut()
        .append_pair("model", &model.to_uppercase());
    Ok(url)
}

/// `GET {endpoint}/request?model=..&network=..&station=..&rlat=..&rlon=..&data_type=..&slat=..&slon=..&sdepth_in_m=..`
pub(crate) fn bundle_url(
    endpoint: &str,
    model: &str,
    station: &Station,
    origin: &Origin,
    data_type: DataType,
) -> SeisResult<Url> {
    let mut url = endpoint_url(endpoint, "request")?;
    url.query_pairs_mut()
        .append_pair("model", &model.to_uppercase())
        .append_pair("network", &station.network.to_uppercase())
        .append_pair("station", &station.station.to_uppercase())
        .append_pair("rlat", &format_coordinate(station.latitude))
        .append_pair("rlon", &format_coordinate(station.longitude))
        .append_pair("data_type", data_type.as_str())
        .append_pair("slat", &format_coordinate(origin.latitude))
        .append_pair("slon", &format_coordinate(origin.longitude))
        .append_pair("sdepth_in_m", &origin.depth_meters().to_string());
    Ok(url)
}
