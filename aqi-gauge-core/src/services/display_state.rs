use aqi_gauge_common::*;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

/// 轮询任务与渲染任务之间的共享显示状态
///
/// 锁只保护内存中的数据，任何一方都不会在网络或渲染调用期间持锁。
pub struct SharedDisplayState<M: RawMutex> {
    inner: Mutex<M, Slot>,
}

struct Slot {
    snapshot: Option<DisplaySnapshot>,
    next_sequence: u32,
}

impl<M: RawMutex> SharedDisplayState<M> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Slot {
                snapshot: None,
                next_sequence: 0,
            }),
        }
    }

    /// 同时替换读数和分级，返回新的序号
    pub async fn publish(&self, reading: Reading, category: Category) -> u32 {
        let mut slot = self.inner.lock().await;
        let sequence = slot.next_sequence;
        slot.next_sequence = sequence.wrapping_add(1);
        slot.snapshot = Some(DisplaySnapshot {
            reading,
            category,
            sequence,
        });
        sequence
    }

    pub async fn read(&self) -> Option<DisplaySnapshot> {
        self.inner.lock().await.snapshot.clone()
    }

    pub async fn sequence(&self) -> Option<u32> {
        self.inner
            .lock()
            .await
            .snapshot
            .as_ref()
            .map(|snapshot| snapshot.sequence)
    }
}

impl<M: RawMutex> Default for SharedDisplayState<M> {
    fn default() -> Self {
        Self::new()
    }
}
