use thiserror::Error;

pub type CycleResult<T> = core::result::Result<T, CycleError>;

/// 网络传输错误，发生在建立连接或接收响应体期间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed")]
    Connect,
    #[error("TLS session failed")]
    Tls,
    #[error("request timed out")]
    Timeout,
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("connection closed while reading the body")]
    Io,
}

/// 响应超出接收缓冲区容量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{attempted} bytes do not fit in a {capacity}-byte response buffer")]
pub struct Overflow {
    pub capacity: usize,
    pub attempted: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// 上游返回的 `status` 不是 `"ok"`
    #[error("upstream status is not ok")]
    StatusNotOk,
    /// 结构不符，携带出错字段名
    #[error("malformed field `{0}`")]
    Malformed(&'static str),
}

/// 提前结束轮询周期的所有错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    #[error("overflow: {0}")]
    Overflow(#[from] Overflow),
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("endpoint is empty")]
    EmptyEndpoint,
    #[error("endpoint does not fit in {0} bytes")]
    EndpointTooLong(usize),
    #[error("poll period must be non-zero")]
    ZeroPollPeriod,
    #[error("request timeout must be non-zero")]
    ZeroRequestTimeout,
    #[error("invalid value for {0}")]
    Invalid(&'static str),
}
