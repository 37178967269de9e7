use std::path::PathBuf;

use aqi_gauge_common::*;
use embassy_time::Duration;

/// 公共演示 token，仅在回放本地文件时使用
const DEMO_TOKEN: &str = "demo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    pub poller: PollerConfig,
    /// 设置后回放该文件而不请求 API
    pub fixture: Option<PathBuf>,
}

impl SimulatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let fixture = var("AQI_FIXTURE").map(PathBuf::from);
        let host = var("AQI_API_HOST").unwrap_or_else(|| API_HOST_DEFAULT.to_string());
        let station = var("AQI_STATION").unwrap_or_else(|| STATION_DEFAULT.to_string());
        let token = match (var("AQI_TOKEN"), &fixture) {
            (Some(token), _) => token,
            (None, Some(_)) => DEMO_TOKEN.to_string(),
            (None, None) => return Err(ConfigError::Invalid("AQI_TOKEN")),
        };

        let mut poller = PollerConfig::new(&feed_endpoint(host.trim(), station.trim(), token.trim())?)?;
        if let Some(secs) = var("AQI_POLL_PERIOD_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("AQI_POLL_PERIOD_SECS"))?;
            poller = poller.with_poll_period(Duration::from_secs(secs));
        }
        if let Some(ms) = var("AQI_TIMEOUT_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("AQI_TIMEOUT_MS"))?;
            poller = poller.with_request_timeout(Duration::from_millis(ms));
        }
        poller.validate()?;

        Ok(Self { poller, fixture })
    }
}
