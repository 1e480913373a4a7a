//! Current time in an IANA time zone.

use super::ToolOutcome;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Return the current time in the given zone (e.g. "Asia/Taipei").
pub fn get_current_time(tz_identifier: &str) -> ToolOutcome {
    current_time_at(tz_identifier, Utc::now())
}

/// Format `now` in the given zone.
pub fn current_time_at(tz_identifier: &str, now: DateTime<Utc>) -> ToolOutcome {
    match tz_identifier.trim().parse::<Tz>() {
        Ok(tz) => {
            let local = now.with_timezone(&tz);
            ToolOutcome::report(format!(
                "The current time is {}",
                local.format("%Y-%m-%d %H:%M:%S %Z%z")
            ))
        }
        Err(e) => ToolOutcome::error(format!(
            "An error occurred while fetching the current time: {}",
            e
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_taipei_time() {
        let now = Utc.with_ymd_and_hms(2025, 10, 13, 4, 30, 0).unwrap();
        let outcome = current_time_at("Asia/Taipei", now);
        assert_eq!(
            outcome,
            ToolOutcome::report("The current time is 2025-10-13 12:30:00 CST+0800")
        );
    }

    #[test]
    fn test_unknown_zone() {
        let outcome = get_current_time("Mars/Olympus_Mons");
        assert!(!outcome.is_success());
        assert!(outcome
            .text()
            .starts_with("An error occurred while fetching the current time:"));
    }
}
