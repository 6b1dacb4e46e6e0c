use chrono::{DateTime, Utc};

pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

/// Short relative age used by the console feeds: `just now`, `42s ago`, `3m ago`.
pub fn format_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds();
    if secs < 5 {
        "just now".to_string()
    } else if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn relative_ages() {
        let now = utc_now();
        assert_eq!(format_relative(now, now), "just now");
        assert_eq!(format_relative(now + Duration::seconds(3), now), "just now");
        assert_eq!(format_relative(now - Duration::seconds(42), now), "42s ago");
        assert_eq!(format_relative(now - Duration::seconds(185), now), "3m ago");
        assert_eq!(format_relative(now - Duration::hours(2), now), "2h ago");
    }
}
