use embassy_time::{Duration, Instant};

/// 从固定起点计数的定周期 tick
///
/// 截止时间为 `origin + k * period`，超时的周期不会推迟后续 tick，错过的截止时间直接跳过。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    origin: Instant,
    period: Duration,
}

/// 周期结束后要等待的 tick 以及跳过的数量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextTick {
    pub tick: u64,
    pub deadline: Instant,
    pub skipped: u64,
}

impl TickSchedule {
    /// `period` 不能为 0，见 `PollerConfig::validate`
    pub fn new(origin: Instant, period: Duration) -> Self {
        Self { origin, period }
    }

    pub fn origin(&self) -> Instant {
        self.origin
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn deadline(&self, tick: u64) -> Instant {
        Instant::from_ticks(
            self.origin
                .as_ticks()
                .saturating_add(self.period.as_ticks().saturating_mul(tick)),
        )
    }

    /// `current` 执行完后，严格晚于 `now` 的第一个 tick
    pub fn next_after(&self, current: u64, now: Instant) -> NextTick {
        let period = self.period.as_ticks().max(1);
        let elapsed = now.saturating_duration_since(self.origin).as_ticks();
        let tick = (elapsed / period + 1).max(current + 1);
        NextTick {
            tick,
            deadline: self.deadline(tick),
            skipped: tick - current - 1,
        }
    }
}
