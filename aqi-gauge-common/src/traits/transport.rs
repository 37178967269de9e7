//! 网络传输接口
//!
//! HTTPS/TLS 会话的建立与证书管理由平台实现，核心只消费响应事件流。

use embassy_time::Duration;

use crate::types::TransportError;

/// 流式响应体中的一个事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent<'a> {
    Chunk(&'a [u8]),
    Finished,
    Failed(TransportError),
}

/// 已收到响应头的 HTTP 会话
///
/// `next_event` 先产生零个或多个 [`TransportEvent::Chunk`]，最后恰好产生一个
/// [`TransportEvent::Finished`] 或 [`TransportEvent::Failed`]。终止事件之后再调用的行为未定义。
pub trait HttpSession {
    fn status_code(&self) -> u16;

    /// 服务器给出的 `Content-Length`
    fn content_length(&self) -> Option<usize>;

    async fn next_event(&mut self) -> TransportEvent<'_>;
}

pub trait HttpTransport {
    type Session: HttpSession;

    async fn open(
        &mut self,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<Self::Session, TransportError>;
}
