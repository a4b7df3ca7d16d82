/// Format seconds into a compact human-readable duration (e.g. 59s, 1m, 1h 30m, 1d).
pub fn format_compact_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        return if hours > 0 {
            format!("{days}d {hours}h")
        } else {
            format!("{days}d")
        };
    }

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{seconds}s"));
    }
    parts.join(" ")
}

/// Break `@everyone`/`@here` style pings in user-supplied text.
pub fn sanitize_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

/// `Total: 2/3` progress label used in warning replies.
pub fn warning_progress(count: u64, threshold: u64) -> String {
    format!("Total: {count}/{threshold}")
}

#[cfg(test)]
mod tests {
    use super::{format_compact_duration, sanitize_mentions, warning_progress};

    #[test]
    fn compact_duration_formatting() {
        assert_eq!(format_compact_duration(0), "0s");
        assert_eq!(format_compact_duration(59), "59s");
        assert_eq!(format_compact_duration(60), "1m");
        assert_eq!(format_compact_duration(61), "1m 1s");
        assert_eq!(format_compact_duration(3600), "1h");
        assert_eq!(format_compact_duration(3670), "1h 1m 10s");
        assert_eq!(format_compact_duration(3605), "1h 5s");
        assert_eq!(format_compact_duration(86400), "1d");
        assert_eq!(format_compact_duration(90000), "1d 1h");
    }

    #[test]
    fn mentions_are_neutralized() {
        assert_eq!(sanitize_mentions("hi @everyone"), "hi @\u{200B}everyone");
    }

    #[test]
    fn progress_label() {
        assert_eq!(warning_progress(2, 3), "Total: 2/3");
    }
}
