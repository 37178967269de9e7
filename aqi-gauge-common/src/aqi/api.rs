use core::fmt::Write;

use crate::types::{ConfigError, Endpoint, ENDPOINT_LEN};

pub const API_HOST_DEFAULT: &str = "api.waqi.info";
pub const STATION_DEFAULT: &str = "hangzhou";

/// `https://{host}/feed/{station}/?token={token}`
pub fn feed_endpoint(host: &str, station: &str, token: &str) -> Result<Endpoint, ConfigError> {
    if host.is_empty() {
        return Err(ConfigError::Invalid("host"));
    }
    if station.is_empty() || station.contains(&['/', '?', '#'][..]) {
        return Err(ConfigError::Invalid("station"));
    }
    if token.is_empty() || token.contains(&['&', '#', ' '][..]) {
        return Err(ConfigError::Invalid("token"));
    }

    let mut endpoint = Endpoint::new();
    write!(endpoint, "https://{}/feed/{}/?token={}", host, station, token)
        .map_err(|_| ConfigError::EndpointTooLong(ENDPOINT_LEN))?;
    Ok(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_endpoint_layout() {
        let endpoint = feed_endpoint(API_HOST_DEFAULT, STATION_DEFAULT, "demo").unwrap();
        assert_eq!(
            endpoint.as_str(),
            "https://api.waqi.info/feed/hangzhou/?token=demo"
        );
    }

    #[test]
    fn test_feed_endpoint_rejects_bad_parts() {
        assert_eq!(
            feed_endpoint("", "x", "t"),
            Err(ConfigError::Invalid("host"))
        );
        assert_eq!(
            feed_endpoint(API_HOST_DEFAULT, "a/b", "t"),
            Err(ConfigError::Invalid("station"))
        );
        assert_eq!(
            feed_endpoint(API_HOST_DEFAULT, "x", ""),
            Err(ConfigError::Invalid("token"))
        );
    }

    #[test]
    fn test_feed_endpoint_too_long() {
        let token = "t".repeat(ENDPOINT_LEN);
        assert_eq!(
            feed_endpoint(API_HOST_DEFAULT, STATION_DEFAULT, &token),
            Err(ConfigError::EndpointTooLong(ENDPOINT_LEN))
        );
    }
}
