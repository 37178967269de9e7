use aqi_gauge_common::Overflow;
use heapless::Vec;

/// 定长接收缓冲区，按数据块填充
pub struct ResponseBuffer<const N: usize> {
    data: Vec<u8, N>,
}

impl<const N: usize> ResponseBuffer<N> {
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// 整块追加，放不下则不追加
    pub fn append(&mut self, chunk: &[u8]) -> Result<(), Overflow> {
        let attempted = self.data.len() + chunk.len();
        if attempted > N {
            return Err(Overflow {
                capacity: N,
                attempted,
            });
        }
        self.data.extend_from_slice(chunk).map_err(|_| Overflow {
            capacity: N,
            attempted,
        })
    }

    /// 上次 reset 以来追加的全部数据
    pub fn finalize(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn remaining(&self) -> usize {
        N - self.data.len()
    }
}

impl<const N: usize> Default for ResponseBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
