//! Centralized text formatting for notification copy.
//!
//! Every number that ends up in a buff notification goes through this
//! module so on-screen messages and log lines agree on sign and time style.

/// Format a stat delta with an explicit sign.
///
/// Positive values get a leading `+`; negative values already carry their
/// own `-`. Zero is formatted as-is (callers normally skip zero deltas).
///
/// # Examples
/// ```
/// use buffwatch_types::formatting::format_delta;
/// assert_eq!(format_delta(2), "+2");
/// assert_eq!(format_delta(-3), "-3");
/// assert_eq!(format_delta(0), "0");
/// ```
pub fn format_delta(value: i32) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

/// Format a stat entry as `"<Label> <signed value>"`.
///
/// # Examples
/// ```
/// use buffwatch_types::formatting::format_stat;
/// assert_eq!(format_stat("Speed", 2), "Speed +2");
/// assert_eq!(format_stat("Max Energy", -10), "Max Energy -10");
/// ```
pub fn format_stat(label: &str, value: i32) -> String {
    format!("{} {}", label, format_delta(value))
}

/// Format remaining buff time for a warning message.
///
/// - Values >= 60s: `M:SS`
/// - Values below a minute: whole seconds with an `s` suffix
/// - Zero: `"moments"` (the buff is in its final second)
///
/// # Examples
/// ```
/// use buffwatch_types::formatting::format_remaining;
/// assert_eq!(format_remaining(9), "9s");
/// assert_eq!(format_remaining(75), "1:15");
/// assert_eq!(format_remaining(0), "moments");
/// ```
pub fn format_remaining(secs: u64) -> String {
    match secs {
        0 => "moments".to_string(),
        s if s >= 60 => format_duration(s),
        s => format!("{}s", s),
    }
}

/// Format a duration as `M:SS`.
///
/// # Examples
/// ```
/// use buffwatch_types::formatting::format_duration;
/// assert_eq!(format_duration(125), "2:05");
/// assert_eq!(format_duration(59), "0:59");
/// assert_eq!(format_duration(0), "0:00");
/// ```
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
