use embassy_time::Duration;

use crate::types::ConfigError;

pub const ENDPOINT_LEN: usize = 256;
pub const RESPONSE_BUFFER_CAPACITY: usize = 4096;

pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(1500);
pub const DEFAULT_RENDER_PERIOD: Duration = Duration::from_millis(10);
pub const DEFAULT_STALE_WARN_AFTER: u32 = 5;

pub type Endpoint = heapless::String<ENDPOINT_LEN>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    pub endpoint: Endpoint,
    pub poll_period: Duration,
    pub request_timeout: Duration,
    /// 连续失败多少个周期后告警数据过期，0 表示关闭
    pub stale_warn_after: u32,
}

impl PollerConfig {
    pub fn new(endpoint: &str) -> Result<Self, ConfigError> {
        let endpoint =
            Endpoint::try_from(endpoint).map_err(|_| ConfigError::EndpointTooLong(ENDPOINT_LEN))?;
        Ok(Self {
            endpoint,
            ..Self::default()
        })
    }

    pub fn with_poll_period(mut self, period: Duration) -> Self {
        self.poll_period = period;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_stale_warn_after(mut self, cycles: u32) -> Self {
        self.stale_warn_after = cycles;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if self.poll_period.as_ticks() == 0 {
            return Err(ConfigError::ZeroPollPeriod);
        }
        if self.request_timeout.as_ticks() == 0 {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        Ok(())
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::new(),
            poll_period: DEFAULT_POLL_PERIOD,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            stale_warn_after: DEFAULT_STALE_WARN_AFTER,
        }
    }
}
