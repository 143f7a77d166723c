//! Display helpers shared by the timers and the usage view.

/// `HH:MM:SS`, two-digit minimum per field. Hours grow past 99 instead of
/// wrapping.
pub fn format_hms(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// `MM:SS` for the pomodoro countdown. Minutes are not capped either.
pub fn format_mmss(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
