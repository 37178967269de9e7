use crate::types::{AqiLevel, Category};

/// 仪表量程上限，超出部分停在满刻度
pub const GAUGE_MAX: u16 = 400;

/// 除最后一档外各档的上限（含）
const BANDS: [(i32, AqiLevel); 5] = [
    (50, AqiLevel::Good),
    (100, AqiLevel::Moderate),
    (150, AqiLevel::UnhealthyForSensitiveGroups),
    (250, AqiLevel::Unhealthy),
    (300, AqiLevel::VeryUnhealthy),
];

/// 负数指数归入 `Good`，不拒绝
pub fn classify(index: i32) -> Category {
    let level = BANDS
        .iter()
        .find(|(upper, _)| index <= *upper)
        .map(|(_, level)| *level)
        .unwrap_or(AqiLevel::Hazardous);
    Category::from(level)
}

pub fn gauge_value(index: i32) -> u16 {
    index.clamp(0, GAUGE_MAX as i32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        let edges = [
            (50, AqiLevel::Good, AqiLevel::Moderate),
            (100, AqiLevel::Moderate, AqiLevel::UnhealthyForSensitiveGroups),
            (150, AqiLevel::UnhealthyForSensitiveGroups, AqiLevel::Unhealthy),
            (250, AqiLevel::Unhealthy, AqiLevel::VeryUnhealthy),
            (300, AqiLevel::VeryUnhealthy, AqiLevel::Hazardous),
        ];
        for (edge, below, above) in edges {
            assert_eq!(classify(edge).level, below, "index {}", edge);
            assert_eq!(classify(edge + 1).level, above, "index {}", edge + 1);
        }
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(classify(0).level, AqiLevel::Good);
        assert_eq!(classify(500).level, AqiLevel::Hazardous);
        assert_eq!(classify(i32::MAX).level, AqiLevel::Hazardous);
    }

    #[test]
    fn test_negative_index_passes_through_as_good() {
        assert_eq!(classify(-1).level, AqiLevel::Good);
        assert_eq!(classify(i32::MIN).level, AqiLevel::Good);
    }

    #[test]
    fn test_category_carries_level_color_and_label() {
        let category = classify(120);
        assert_eq!(category.label, "Unhealthy for Sensitive Groups");
        assert_eq!(category.color.to_hex(), 0xff9933);
    }

    #[test]
    fn test_gauge_value_is_clamped() {
        assert_eq!(gauge_value(42), 42);
        assert_eq!(gauge_value(400), 400);
        assert_eq!(gauge_value(401), 400);
        assert_eq!(gauge_value(999), GAUGE_MAX);
        assert_eq!(gauge_value(-5), 0);
    }

    #[test]
    fn test_gauge_clamp_is_independent_of_bands() {
        // 300 以上都是 Hazardous，仪表仍走到 400
        assert_eq!(classify(350).level, classify(450).level);
        assert_ne!(gauge_value(350), gauge_value(450));
    }
}
