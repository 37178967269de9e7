use aqi_gauge_common::*;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{with_timeout, Duration, Instant, Timer};

use crate::services::display_state::SharedDisplayState;
use crate::services::response_buffer::ResponseBuffer;
use crate::services::schedule::TickSchedule;

/// 轮询器状态
///
/// 周期执行期间轮询器被 `&mut self` 独占，`Fetching` 只在守卫和 trace 日志中可见。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Fetching,
}

/// 轮询统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollerStats {
    pub cycles: u32,
    pub successes: u32,
    pub failures: u32,
    pub consecutive_failures: u32,
    pub skipped_ticks: u64,
    pub last_success_tick: Option<u64>,
}

/// 周期性执行 获取 → 解析 → 分级 → 发布
///
/// 每个周期都可变借用轮询器，两个周期不可能共用接收缓冲区。
pub struct PollerService<'a, T: HttpTransport, M: RawMutex, const N: usize> {
    transport: T,
    config: PollerConfig,
    buffer: ResponseBuffer<N>,
    display: &'a SharedDisplayState<M>,
    state: PollerState,
    stats: PollerStats,
}

impl<'a, T: HttpTransport, M: RawMutex, const N: usize> PollerService<'a, T, M, N> {
    pub fn new(transport: T, config: PollerConfig, display: &'a SharedDisplayState<M>) -> Self {
        Self {
            transport,
            config,
            buffer: ResponseBuffer::new(),
            display,
            state: PollerState::Idle,
            stats: PollerStats::default(),
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn stats(&self) -> PollerStats {
        self.stats
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// 连续失败次数达到 `stale_warn_after` 时显示数据视为过期；阈值为 0 时不判定
    pub fn is_stale(&self) -> bool {
        self.config.stale_warn_after != 0
            && self.stats.consecutive_failures >= self.config.stale_warn_after
    }

    /// 执行 `tick` 对应的一个周期。失败在这里记录日志后吞掉，显示保留上一次发布的数据。
    pub async fn on_tick(&mut self, tick: u64) -> CycleResult<u32> {
        self.stats.cycles = self.stats.cycles.wrapping_add(1);
        let result = self.poll_once().await;

        match result {
            Ok(sequence) => {
                info!("Tick {}: published reading #{}", tick, sequence);
                self.stats.successes = self.stats.successes.wrapping_add(1);
                self.stats.consecutive_failures = 0;
                self.stats.last_success_tick = Some(tick);
            }
            Err(ref e) => {
                self.stats.failures = self.stats.failures.wrapping_add(1);
                self.stats.consecutive_failures = self.stats.consecutive_failures.saturating_add(1);
                self.report_failure(tick, e);
                if self.config.stale_warn_after != 0
                    && self.stats.consecutive_failures == self.config.stale_warn_after
                {
                    warn!(
                        "{} polls in a row failed, display is showing stale data (last good tick: {:?})",
                        self.stats.consecutive_failures, self.stats.last_success_tick
                    );
                }
            }
        }

        result
    }

    /// 单个 获取-解析-分级-发布 周期
    pub async fn poll_once(&mut self) -> CycleResult<u32> {
        let Self {
            transport,
            config,
            buffer,
            display,
            state,
            ..
        } = self;

        let _fetching = FetchingGuard::enter(state);

        match with_timeout(
            config.request_timeout,
            fetch_into(transport, buffer, &config.endpoint, config.request_timeout),
        )
        .await
        {
            Ok(fetched) => fetched?,
            Err(_) => return Err(TransportError::Timeout.into()),
        }

        let payload = buffer.finalize();
        debug!("Deserialize {} bytes", payload.len());
        let reading = match decode(payload) {
            Ok(reading) => reading,
            Err(DecodeError::StatusNotOk) => {
                if let Some(message) = upstream_message(payload) {
                    debug!("Upstream message: {}", message.as_str());
                }
                return Err(DecodeError::StatusNotOk.into());
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            "aqi={} dominentpol={} measure time={}",
            reading.index(),
            reading.category_code(),
            reading.timestamp()
        );

        let category = classify(reading.index());
        debug!("Category {} color {:06x}", category.label, category.color.to_hex());

        Ok(display.publish(reading, category).await)
    }

    /// 按配置周期无限轮询，启动时立即执行第一次
    pub async fn run(&mut self) {
        let schedule = TickSchedule::new(Instant::now(), self.config.poll_period);
        info!(
            "Poller started, period {}ms, timeout {}ms",
            self.config.poll_period.as_millis(),
            self.config.request_timeout.as_millis()
        );

        let mut tick = 0;
        loop {
            let _ = self.on_tick(tick).await;

            let next = schedule.next_after(tick, Instant::now());
            if next.skipped > 0 {
                warn!(
                    "Cycle for tick {} overran the poll period, skipping {} tick(s)",
                    tick, next.skipped
                );
                self.stats.skipped_ticks = self.stats.skipped_ticks.saturating_add(next.skipped);
            }

            Timer::at(next.deadline).await;
            tick = next.tick;
        }
    }

    fn report_failure(&self, tick: u64, err: &CycleError) {
        match err {
            CycleError::Decode(DecodeError::StatusNotOk) => {
                warn!("Tick {}: upstream status is not ok, keeping last reading", tick);
            }
            CycleError::Decode(DecodeError::Malformed(field)) => {
                error!("Tick {}: error parsing JSON response, field `{}`", tick, field);
            }
            CycleError::Overflow(overflow) => {
                error!(
                    "Tick {}: response too large ({} > {} bytes), raise the buffer capacity",
                    tick, overflow.attempted, overflow.capacity
                );
            }
            CycleError::Transport(e) => {
                error!("Tick {}: error performing http request: {}", tick, e);
            }
        }
    }
}

async fn fetch_into<T: HttpTransport, const N: usize>(
    transport: &mut T,
    buffer: &mut ResponseBuffer<N>,
    endpoint: &str,
    timeout: Duration,
) -> CycleResult<()> {
    buffer.reset();

    let mut session = transport.open(endpoint, timeout).await?;

    let status = session.status_code();
    let content_length = session.content_length();
    info!("HTTPS Status = {}, content_length = {:?}", status, content_length);

    if !(200..300).contains(&status) {
        return Err(TransportError::Status(status).into());
    }

    if let Some(length) = content_length {
        if length > buffer.capacity() {
            return Err(Overflow {
                capacity: buffer.capacity(),
                attempted: length,
            }
            .into());
        }
    }

    loop {
        match session.next_event().await {
            TransportEvent::Chunk(chunk) => {
                trace!("HTTP_EVENT_ON_DATA, len={}", chunk.len());
                buffer.append(chunk)?;
            }
            TransportEvent::Finished => {
                trace!("HTTP_EVENT_ON_FINISH, total={}", buffer.len());
                return Ok(());
            }
            TransportEvent::Failed(e) => return Err(e.into()),
        }
    }
}

/// 周期内保持 `Fetching`，无论周期如何结束（包括 future 被丢弃）都回到 `Idle`
struct FetchingGuard<'s> {
    state: &'s mut PollerState,
}

impl<'s> FetchingGuard<'s> {
    fn enter(state: &'s mut PollerState) -> Self {
        trace!("Poller {:?} -> Fetching", *state);
        *state = PollerState::Fetching;
        Self { state }
    }
}

impl Drop for FetchingGuard<'_> {
    fn drop(&mut self) {
        trace!("Poller {:?} -> Idle", *self.state);
        *self.state = PollerState::Idle;
    }
}
