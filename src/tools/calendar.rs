//! Static NCU academic calendar.

use super::ToolOutcome;

/// Days without classes at National Central University (中央大學行事曆).
const NCU_NO_CLASS_DAYS: &str = "9/29, 10/6 不上課";

/// Return the NCU academic calendar.
pub fn get_ncu_calendar() -> ToolOutcome {
    ToolOutcome::success("calendar", NCU_NO_CLASS_DAYS)
}
