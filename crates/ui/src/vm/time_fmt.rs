use chrono::Duration;

/// Countdown label such as `"04:07"`; negative durations show `"00:00"`.
#[must_use]
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_remaining(Duration::seconds(247)), "04:07");
        assert_eq!(format_remaining(Duration::minutes(12)), "12:00");
        assert_eq!(format_remaining(Duration::seconds(-3)), "00:00");
    }
}
