//! Time label formatting

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up.
///
/// Negative and non-finite inputs render as `0:00`.
pub fn neat_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// `"current / total"` label, or `None` while the duration is unknown
pub fn time_label(current: f64, duration: f64) -> Option<String> {
    if !duration.is_finite() || duration <= 0.0 {
        return None;
    }
    Some(format!("{} / {}", neat_time(current), neat_time(duration)))
}
