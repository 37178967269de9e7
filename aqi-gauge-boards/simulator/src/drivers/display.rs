use std::io::Write;

use aqi_gauge_common::*;

const BAR_WIDTH: usize = 40;

/// 终端版仪表盘：按 `GAUGE_MAX` 缩放的真彩色进度条，后接指数、首要污染物和等级
pub struct ConsoleGauge<W: Write> {
    out: W,
}

impl ConsoleGauge<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleGauge<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            warn!("Failed to write gauge frame: {}", e);
        }
    }
}

impl<W: Write> GaugeRenderer for ConsoleGauge<W> {
    fn show_waiting(&mut self) {
        self.emit(&format_frame(0, "", "Connecting...", None));
    }

    fn update_display(&mut self, index: u16, category_code: &str, label: &str, color: Rgb) {
        info!("Gauge {} ({}) {} #{:06x}", index, category_code, label, color.to_hex());
        self.emit(&format_frame(index, category_code, label, Some(color)));
    }
}

/// 生成一行仪表输出，`color` 为 `None` 时不着色
pub fn format_frame(index: u16, category_code: &str, label: &str, color: Option<Rgb>) -> String {
    let value = index.min(GAUGE_MAX) as usize;
    let filled = value * BAR_WIDTH / GAUGE_MAX as usize;

    let mut line = String::with_capacity(BAR_WIDTH * 4 + 64);
    line.push('[');
    if let Some(Rgb { r, g, b }) = color {
        line.push_str(&format!("\x1b[38;2;{};{};{}m", r, g, b));
        line.push_str(&"#".repeat(filled));
        line.push_str("\x1b[0m");
    } else {
        line.push_str(&"#".repeat(filled));
    }
    line.push_str(&" ".repeat(BAR_WIDTH - filled));
    line.push(']');
    line.push_str(&format!(" {:>3}", index));
    if !category_code.is_empty() {
        line.push_str(&format!(" {}", category_code));
    }
    line.push_str(&format!(" {}", label));
    line
}
