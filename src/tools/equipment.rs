//! Travel equipment advice keyed on a weather condition.

use super::ToolOutcome;

/// Keyword → advice, scanned in order. The first keyword contained in the
/// lower-cased status wins.
pub const EQUIPMENT_ADVICE: &[(&str, &str)] = &[
    ("rain", "請攜帶輕便雨衣, 雨傘"),
    ("drizzle", "請攜帶輕便雨衣, 雨傘"),
    ("thunderstorm", "請攜帶避雷裝備, 防水鞋"),
    ("snow", "請攜帶保暖衣物、手套、暖暖包"),
    ("fog", "反光衣物, 手電筒，視線不佳請小心行駛"),
    ("mist", "反光衣物, 手電筒，視線不佳請小心行駛"),
    ("haze", "反光衣物, 手電筒，視線不佳請小心行駛"),
    ("clear", "請攜帶太陽眼鏡, 防曬乳，並記得多補充水分"),
    ("sun", "請攜帶太陽眼鏡, 防曬乳，並記得多補充水分"),
    ("cloud", "建議採【洋蔥式穿搭】，隨身帶件薄外套"),
    ("overcast", "請攜帶輕便雨衣, 雨傘"),
];

/// Look up the advice for a status, if any keyword matches.
fn advice_for(weather_status: &str) -> Option<&'static str> {
    let status = weather_status.to_lowercase();
    EQUIPMENT_ADVICE
        .iter()
        .find(|(keyword, _)| status.contains(keyword))
        .map(|(_, advice)| *advice)
}

/// Recommend travel equipment for a weather status such as "Clear" or "Rain".
pub fn get_travel_equipment(weather_status: &str) -> ToolOutcome {
    let equipment = match advice_for(weather_status) {
        Some(advice) => advice.to_string(),
        None => format!("無特別建議 (因為我沒辨識出 '{}' 對應的裝備)", weather_status),
    };

    ToolOutcome::report(format!(
        "The weather is {}, recommended travel equipment: {}.",
        weather_status, equipment
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain() {
        let outcome = get_travel_equipment("Rain");
        assert!(outcome.text().contains("輕便雨衣"));
        assert!(outcome.text().starts_with("The weather is Rain,"));
    }

    #[test]
    fn test_substring_match() {
        let outcome = get_travel_equipment("clear sky");
        assert!(outcome.text().contains("太陽眼鏡"));
    }

    #[test]
    fn test_first_match_wins() {
        // "thunderstorm with rain" contains both; "rain" comes first in the table.
        assert_eq!(advice_for("thunderstorm with rain"), Some("請攜帶輕便雨衣, 雨傘"));
        // "sunny clouds": "sun" precedes "cloud".
        assert_eq!(
            advice_for("Sunny Clouds"),
            Some("請攜帶太陽眼鏡, 防曬乳，並記得多補充水分")
        );
    }

    #[test]
    fn test_unrecognized_status_echoes_input() {
        let outcome = get_travel_equipment("Tornado");
        assert!(outcome.is_success());
        assert!(outcome.text().contains("無特別建議"));
        assert!(outcome.text().contains("'Tornado'"));
    }
}
