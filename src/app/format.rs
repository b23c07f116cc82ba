/// Format a second count as `MM:SS`.
///
/// NaN, infinite and negative inputs render as `00:00`.
pub fn seconds_to_minutes_seconds(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let secs = seconds.floor() as u64;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// The `elapsed / total` label.
pub fn time_label(elapsed: f64, total: f64) -> String {
    format!(
        "{} / {}",
        seconds_to_minutes_seconds(elapsed),
        seconds_to_minutes_seconds(total)
    )
}

/// Position of `elapsed` along `total`, in percent. Zero when `total` is unknown.
pub fn progress_percent(elapsed: f64, total: f64) -> f64 {
    if !total.is_finite() || total <= 0.0 || !elapsed.is_finite() {
        return 0.0;
    }
    (elapsed / total * 100.0).clamp(0.0, 100.0)
}
