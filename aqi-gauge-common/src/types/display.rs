use crate::types::{Category, Reading};

/// 渲染任务从共享显示状态中复制出的快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub reading: Reading,
    pub category: Category,
    /// 每次发布加一
    pub sequence: u32,
}
