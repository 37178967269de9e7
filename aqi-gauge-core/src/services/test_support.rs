//! 按脚本回放响应的内存传输层

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use aqi_gauge_common::*;
use embassy_time::{Duration, Timer};

pub const OK_PAYLOAD: &[u8] =
    br#"{"status":"ok","data":{"aqi":42,"dominentpol":"pm25","time":{"s":"2024-01-01 00:00:00"}}}"#;

#[derive(Debug, Clone)]
pub enum Script {
    Respond {
        status: u16,
        content_length: Option<usize>,
        chunks: Vec<Vec<u8>>,
        end: Result<(), TransportError>,
    },
    Refuse(TransportError),
    Hang,
}

impl Script {
    pub fn ok(body: &[u8]) -> Self {
        Self::ok_in_chunks(body, body.len().max(1))
    }

    pub fn ok_in_chunks(body: &[u8], chunk_size: usize) -> Self {
        Script::Respond {
            status: 200,
            content_length: None,
            chunks: body.chunks(chunk_size).map(<[u8]>::to_vec).collect(),
            end: Ok(()),
        }
    }

    pub fn refuse(err: TransportError) -> Self {
        Script::Refuse(err)
    }

    pub fn hang() -> Self {
        Script::Hang
    }

    pub fn with_status(mut self, code: u16) -> Self {
        if let Script::Respond { status, .. } = &mut self {
            *status = code;
        }
        self
    }

    pub fn with_content_length(mut self, length: usize) -> Self {
        if let Script::Respond { content_length, .. } = &mut self {
            *content_length = Some(length);
        }
        self
    }

    pub fn then_fail(mut self, err: TransportError) -> Self {
        if let Script::Respond { end, .. } = &mut self {
            *end = Err(err);
        }
        self
    }
}

pub struct ScriptedTransport {
    scripts: VecDeque<Script>,
    opened: Vec<(String, Duration)>,
    delivered: Rc<Cell<usize>>,
    open_delay: Duration,
}

impl ScriptedTransport {
    pub fn new(scripts: &[Script]) -> Self {
        Self {
            scripts: scripts.iter().cloned().collect(),
            opened: Vec::new(),
            delivered: Rc::new(Cell::new(0)),
            open_delay: Duration::from_ticks(0),
        }
    }

    /// 每次建立连接前先等待 `delay`
    pub fn with_open_delay(mut self, delay: Duration) -> Self {
        self.open_delay = delay;
        self
    }

    pub fn opened(&self) -> &[(String, Duration)] {
        &self.opened
    }

    pub fn chunks_delivered(&self) -> usize {
        self.delivered.get()
    }
}

impl HttpTransport for ScriptedTransport {
    type Session = ScriptedSession;

    async fn open(
        &mut self,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<ScriptedSession, TransportError> {
        self.opened.push((endpoint.into(), timeout));
        if self.open_delay.as_ticks() > 0 {
            Timer::after(self.open_delay).await;
        }
        match self.scripts.pop_front() {
            Some(Script::Respond {
                status,
                content_length,
                chunks,
                end,
            }) => Ok(ScriptedSession {
                status,
                content_length,
                chunks: chunks.into(),
                current: Vec::new(),
                end: Some(end),
                hang: false,
                delivered: self.delivered.clone(),
            }),
            Some(Script::Hang) => Ok(ScriptedSession {
                status: 200,
                content_length: None,
                chunks: VecDeque::new(),
                current: Vec::new(),
                end: None,
                hang: true,
                delivered: self.delivered.clone(),
            }),
            Some(Script::Refuse(err)) => Err(err),
            None => Err(TransportError::Connect),
        }
    }
}

pub struct ScriptedSession {
    status: u16,
    content_length: Option<usize>,
    chunks: VecDeque<Vec<u8>>,
    current: Vec<u8>,
    end: Option<Result<(), TransportError>>,
    hang: bool,
    delivered: Rc<Cell<usize>>,
}

impl HttpSession for ScriptedSession {
    fn status_code(&self) -> u16 {
        self.status
    }

    fn content_length(&self) -> Option<usize> {
        self.content_length
    }

    async fn next_event(&mut self) -> TransportEvent<'_> {
        if self.hang {
            core::future::pending::<()>().await;
        }
        if let Some(chunk) = self.chunks.pop_front() {
            self.delivered.set(self.delivered.get() + 1);
            self.current = chunk;
            return TransportEvent::Chunk(&self.current);
        }
        match self.end.take() {
            Some(Ok(())) | None => TransportEvent::Finished,
            Some(Err(err)) => TransportEvent::Failed(err),
        }
    }
}
