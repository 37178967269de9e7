use heapless::String;

/// 污染物代码长度，如 `pm25`、`o3`
pub const POLLUTANT_CODE_LEN: usize = 5;
/// 站点时间戳长度，`YYYY-MM-DD hh:mm:ss`
pub const TIMESTAMP_LEN: usize = 19;

pub type PollutantCode = String<POLLUTANT_CODE_LEN>;
pub type MeasureTime = String<TIMESTAMP_LEN>;

/// 解析后的一条空气质量读数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    index: i32,
    category_code: PollutantCode,
    timestamp: MeasureTime,
}

impl Reading {
    pub fn new(index: i32, category_code: PollutantCode, timestamp: MeasureTime) -> Self {
        Self {
            index,
            category_code,
            timestamp,
        }
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    /// 站点报告的首要污染物
    pub fn category_code(&self) -> &str {
        &self.category_code
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// 24 位显示颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiLevel {
    pub const ALL: [AqiLevel; 6] = [
        AqiLevel::Good,
        AqiLevel::Moderate,
        AqiLevel::UnhealthyForSensitiveGroups,
        AqiLevel::Unhealthy,
        AqiLevel::VeryUnhealthy,
        AqiLevel::Hazardous,
    ];

    pub const fn color(self) -> Rgb {
        match self {
            AqiLevel::Good => Rgb::from_hex(0x009966),
            AqiLevel::Moderate => Rgb::from_hex(0xffde33),
            AqiLevel::UnhealthyForSensitiveGroups => Rgb::from_hex(0xff9933),
            AqiLevel::Unhealthy => Rgb::from_hex(0xcc0033),
            AqiLevel::VeryUnhealthy => Rgb::from_hex(0x660099),
            AqiLevel::Hazardous => Rgb::from_hex(0x7e0023),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiLevel::Unhealthy => "Unhealthy",
            AqiLevel::VeryUnhealthy => "Very Unhealthy",
            AqiLevel::Hazardous => "Hazardous",
        }
    }
}

/// 读数的显示分级：仪表颜色与文字
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub level: AqiLevel,
    pub color: Rgb,
    pub label: &'static str,
}

impl From<AqiLevel> for Category {
    fn from(level: AqiLevel) -> Self {
        Self {
            level,
            color: level.color(),
            label: level.label(),
        }
    }
}
