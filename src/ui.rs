use ratatui::prelude::*;

use crate::store::state::NoticeLevel;

/// Format a price for display
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

/// Human-readable age of a record created at `create_time` (unix seconds)
pub fn format_age(create_time: i64, now: i64) -> String {
    let secs = (now - create_time).max(0);
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

/// Color for the transient notice banner
pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Error => Color::Red,
    }
}

/// Marker shown in the status column
pub fn used_marker(used: bool) -> &'static str {
    if used {
        "[x]"
    } else {
        "[ ]"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_show_two_decimals() {
        assert_eq!(format_price(9.9), "9.90");
        assert_eq!(format_price(10.0), "10.00");
        assert_eq!(format_price(0.125), "0.13");
    }

    #[test]
    fn ages_pick_the_largest_unit() {
        let now = 1_700_000_000;
        assert_eq!(format_age(now - 5, now), "5s ago");
        assert_eq!(format_age(now - 120, now), "2m ago");
        assert_eq!(format_age(now - 7200, now), "2h ago");
        assert_eq!(format_age(now - 200_000, now), "2d ago");
        // Clock skew never yields negative ages
        assert_eq!(format_age(now + 60, now), "0s ago");
    }
}
