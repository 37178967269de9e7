use aqi_gauge_common::*;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Ticker};

use crate::services::display_state::SharedDisplayState;

/// 渲染服务：从共享状态复制最新快照交给渲染器，渲染器只由本服务调用
pub struct DisplayService<'a, M: RawMutex, R: GaugeRenderer> {
    state: &'a SharedDisplayState<M>,
    renderer: R,
    drawn_sequence: Option<u32>,
    initialized: bool,
}

impl<'a, M: RawMutex, R: GaugeRenderer> DisplayService<'a, M, R> {
    pub fn new(state: &'a SharedDisplayState<M>, renderer: R) -> Self {
        Self {
            state,
            renderer,
            drawn_sequence: None,
            initialized: false,
        }
    }

    pub fn initialize(&mut self) {
        info!("Initializing display service");
        self.renderer.show_waiting();
        self.initialized = true;
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// 快照比屏幕上的新时才重绘
    pub async fn refresh(&mut self) -> bool {
        if !self.initialized {
            self.initialize();
        }

        let Some(snapshot) = self.state.read().await else {
            return false;
        };
        if self.drawn_sequence == Some(snapshot.sequence) {
            return false;
        }

        debug!("Update UI with reading #{}", snapshot.sequence);
        self.renderer.update_display(
            gauge_value(snapshot.reading.index()),
            snapshot.reading.category_code(),
            snapshot.category.label,
            snapshot.category.color,
        );
        self.drawn_sequence = Some(snapshot.sequence);
        true
    }

    pub async fn run(&mut self, frame_period: Duration) {
        let mut ticker = Ticker::every(frame_period);
        loop {
            self.refresh().await;
            ticker.next().await;
        }
    }
}
