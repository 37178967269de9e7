use std::path::PathBuf;

use aqi_gauge_common::*;
use embassy_time::Duration;

/// 与固件 HTTP 客户端每次回调交付的数据块大小一致
pub const FIXTURE_CHUNK_SIZE: usize = 512;

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// 客户端构建失败属于启动错误，原样交给调用方
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("aqi-gauge/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    type Session = ReqwestSession;

    async fn open(
        &mut self,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<ReqwestSession, TransportError> {
        debug!("HTTP GET {}", redact_token(endpoint));
        let response = self
            .client
            .get(endpoint)
            .timeout(std::time::Duration::from_millis(timeout.as_millis()))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        Ok(ReqwestSession {
            status: response.status().as_u16(),
            content_length: response.content_length().map(|len| len as usize),
            response,
            current: Vec::new(),
        })
    }
}

pub struct ReqwestSession {
    status: u16,
    content_length: Option<usize>,
    response: reqwest::Response,
    current: Vec<u8>,
}

impl HttpSession for ReqwestSession {
    fn status_code(&self) -> u16 {
        self.status
    }

    fn content_length(&self) -> Option<usize> {
        self.content_length
    }

    async fn next_event(&mut self) -> TransportEvent<'_> {
        match self.response.chunk().await {
            Ok(Some(bytes)) => {
                self.current.clear();
                self.current.extend_from_slice(&bytes);
                TransportEvent::Chunk(&self.current)
            }
            Ok(None) => TransportEvent::Finished,
            Err(e) => TransportEvent::Failed(map_reqwest_error(e)),
        }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    warn!("HTTP client error: {}", e);
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect
    } else {
        TransportError::Io
    }
}

/// 日志中隐藏 API token
pub fn redact_token(endpoint: &str) -> String {
    match endpoint.find("token=") {
        Some(pos) => format!("{}token=***", &endpoint[..pos]),
        None => endpoint.to_string(),
    }
}

/// 从磁盘回放 JSON 文件，模拟网络响应
pub struct FixtureTransport {
    path: PathBuf,
}

impl FixtureTransport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HttpTransport for FixtureTransport {
    type Session = FixtureSession;

    async fn open(
        &mut self,
        _endpoint: &str,
        _timeout: Duration,
    ) -> Result<FixtureSession, TransportError> {
        let body = tokio::fs::read(&self.path).await.map_err(|e| {
            warn!("Failed to read fixture {}: {}", self.path.display(), e);
            TransportError::Connect
        })?;
        Ok(FixtureSession { body, offset: 0 })
    }
}

pub struct FixtureSession {
    body: Vec<u8>,
    offset: usize,
}

impl HttpSession for FixtureSession {
    fn status_code(&self) -> u16 {
        200
    }

    fn content_length(&self) -> Option<usize> {
        Some(self.body.len())
    }

    async fn next_event(&mut self) -> TransportEvent<'_> {
        if self.offset >= self.body.len() {
            return TransportEvent::Finished;
        }
        let start = self.offset;
        self.offset = (start + FIXTURE_CHUNK_SIZE).min(self.body.len());
        TransportEvent::Chunk(&self.body[start..self.offset])
    }
}

/// 启动时按配置选择的传输层
pub enum SimulatorTransport {
    Http(ReqwestTransport),
    Fixture(FixtureTransport),
}

pub enum SimulatorSession {
    Http(ReqwestSession),
    Fixture(FixtureSession),
}

impl HttpTransport for SimulatorTransport {
    type Session = SimulatorSession;

    async fn open(
        &mut self,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<SimulatorSession, TransportError> {
        match self {
            SimulatorTransport::Http(t) => t.open(endpoint, timeout).await.map(SimulatorSession::Http),
            SimulatorTransport::Fixture(t) => {
                t.open(endpoint, timeout).await.map(SimulatorSession::Fixture)
            }
        }
    }
}

impl HttpSession for SimulatorSession {
    fn status_code(&self) -> u16 {
        match self {
            SimulatorSession::Http(s) => s.status_code(),
            SimulatorSession::Fixture(s) => s.status_code(),
        }
    }

    fn content_length(&self) -> Option<usize> {
        match self {
            SimulatorSession::Http(s) => s.content_length(),
            SimulatorSession::Fixture(s) => s.content_length(),
        }
    }

    async fn next_event(&mut self) -> TransportEvent<'_> {
        match self {
            SimulatorSession::Http(s) => s.next_event().await,
            SimulatorSession::Fixture(s) => s.next_event().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_builds() {
        assert!(ReqwestTransport::new().is_ok());
    }

    #[test]
    fn test_redact_token() {
        assert_eq!(
            redact_token("https://api.waqi.info/feed/hangzhou/?token=secret"),
            "https://api.waqi.info/feed/hangzhou/?token=***"
        );
        assert_eq!(redact_token("https://example.org/"), "https://example.org/");
    }

    #[test]
    fn test_fixture_session_streams_in_fixed_chunks() {
        let mut session = FixtureSession {
            body: vec![b'x'; FIXTURE_CHUNK_SIZE * 2 + 10],
            offset: 0,
        };
        let mut sizes = Vec::new();
        loop {
            match futures_executor::block_on(session.next_event()) {
                TransportEvent::Chunk(chunk) => sizes.push(chunk.len()),
                TransportEvent::Finished => break,
                TransportEvent::Failed(e) => panic!("unexpected failure: {e}"),
            }
        }
        assert_eq!(sizes, vec![FIXTURE_CHUNK_SIZE, FIXTURE_CHUNK_SIZE, 10]);
    }

    #[tokio::test]
    async fn test_fixture_feeds_a_full_cycle() {
        use aqi_gauge_core::{PollerService, SharedDisplayState};
        use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

        let state = SharedDisplayState::<CriticalSectionRawMutex>::new();
        let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/hangzhou.json");
        let config = PollerConfig::new("https://api.waqi.info/feed/hangzhou/?token=demo").unwrap();
        let mut poller = PollerService::<_, _, RESPONSE_BUFFER_CAPACITY>::new(
            FixtureTransport::new(fixture),
            config,
            &state,
        );

        assert_eq!(poller.on_tick(0).await, Ok(0));
        let snapshot = state.read().await.unwrap();
        assert_eq!(snapshot.reading.index(), 87);
        assert_eq!(snapshot.reading.category_code(), "pm25");
        assert_eq!(snapshot.reading.timestamp(), "2024-10-19 14:00:00");
        assert_eq!(snapshot.category.level, AqiLevel::Moderate);
    }

    #[tokio::test]
    async fn test_missing_fixture_is_a_connect_error() {
        let mut transport = FixtureTransport::new("/nonexistent/feed.json");
        let result = transport.open("", Duration::from_millis(10)).await;
        assert!(matches!(result, Err(TransportError::Connect)));
    }
}
