const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// Renders a minute count as `"1d 2h 3m"`, omitting zero units.
pub fn format_minutes(minutes: i64) -> String {
    if minutes <= 0 {
        return "0m".to_string();
    }

    let days = minutes / MINUTES_PER_DAY;
    let hours = (minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
    let mins = minutes % MINUTES_PER_HOUR;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if mins > 0 {
        parts.push(format!("{}m", mins));
    }
    parts.join(" ")
}
