//! Human-friendly time formatting.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Format a timestamp as a relative time string (e.g., "2 minutes ago").
pub fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    format_relative_to(timestamp, Utc::now())
}

/// Format `timestamp` relative to `now`.
pub fn format_relative_to(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(timestamp).num_seconds();

    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days < 30 {
        return if days == 1 {
            "yesterday".to_string()
        } else {
            format!("{} days ago", days)
        };
    }

    let months = days / 30;
    if months < 12 {
        return plural(months, "month");
    }

    plural(months / 12, "year")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Format a duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}
