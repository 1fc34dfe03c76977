use regex::Regex;
use std::sync::LazyLock;

/// Shown in place of a duration that does not look like `PT[nH][nM][nS]`
pub const INVALID_DURATION: &str = "Invalid duration format";

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern is valid")
});

/// Convert an ISO 8601 time duration to text.
///
/// `PT1H30M` becomes `1 hour 30 min`. Only hours are pluralized. A duration
/// whose components are all zero formats as an empty string.
pub fn format_duration(duration: &str) -> String {
    let Some(caps) = DURATION_RE.captures(duration) else {
        return INVALID_DURATION.to_string();
    };

    let component = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let (hours, minutes, seconds) = (component(1), component(2), component(3));

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours > 1 { "s" } else { "" }));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} min"));
    }
    if seconds > 0 {
        parts.push(format!("{seconds} sec"));
    }

    parts.join(" ")
}

/// Text for a time field: `PT`-prefixed values are formatted, anything else
/// (e.g. "about an hour") passes through untouched.
pub fn display_time(raw: &str) -> String {
    if raw.starts_with("PT") {
        format_duration(raw)
    } else {
        raw.to_string()
    }
}
