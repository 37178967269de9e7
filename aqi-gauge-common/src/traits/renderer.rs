//! 显示接口

use crate::types::Rgb;

/// 渲染协作方
///
/// 由渲染任务独占持有，只有渲染任务会调用它。
pub trait GaugeRenderer {
    /// 首次数据到达前显示的占位画面
    fn show_waiting(&mut self) {}

    /// `index` 已经按表盘量程截断
    fn update_display(&mut self, index: u16, category_code: &str, label: &str, color: Rgb);
}
