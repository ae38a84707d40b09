//! Conversion between the stored 24-hour `HH:MM` form and the 12-hour
//! `h:mm AM/PM` form shown everywhere in the UI.

use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;

static TWELVE_HOUR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<hour>\d{1,2}):(?P<minute>\d{2})\s*(?P<meridiem>[AaPp])[Mm]$").unwrap()
});

/// Format a wall-clock time as `h:mm AM/PM` with an unpadded hour.
pub fn to_12h(time: NaiveTime) -> String {
    let hour24 = time.hour();
    let meridiem = if hour24 < 12 { "AM" } else { "PM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour12, time.minute(), meridiem)
}

/// Parse `h:mm AM/PM` back into a wall-clock time.
///
/// 12 AM maps to hour 0 and PM adds 12 except for 12 PM itself.
pub fn parse_12h(s: &str) -> Option<NaiveTime> {
    let caps = TWELVE_HOUR_RE.captures(s.trim())?;
    let hour12: u32 = caps["hour"].parse().ok()?;
    let minute: u32 = caps["minute"].parse().ok()?;
    if hour12 == 0 || hour12 > 12 {
        return None;
    }
    let pm = caps["meridiem"].eq_ignore_ascii_case("p");
    let hour24 = match (pm, hour12) {
        (false, 12) => 0,
        (false, h) => h,
        (true, 12) => 12,
        (true, h) => h + 12,
    };
    NaiveTime::from_hms_opt(hour24, minute, 0)
}

/// Format as the stored 24-hour `HH:MM` form.
pub fn to_24h(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Parse the stored 24-hour `HH:MM` form.
pub fn parse_24h(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn afternoon() {
        assert_eq!(to_12h(hm(14, 5)), "2:05 PM");
        assert_eq!(parse_12h("2:05 PM"), Some(hm(14, 5)));
    }

    #[test]
    fn midnight_and_noon() {
        assert_eq!(to_12h(hm(0, 30)), "12:30 AM");
        assert_eq!(to_12h(hm(12, 0)), "12:00 PM");
        assert_eq!(parse_12h("12:30 AM"), Some(hm(0, 30)));
        assert_eq!(parse_12h("12:00 PM"), Some(hm(12, 0)));
    }

    #[test]
    fn morning() {
        assert_eq!(to_12h(hm(9, 30)), "9:30 AM");
        assert_eq!(parse_12h("9:30 am"), Some(hm(9, 30)));
    }

    #[test]
    fn invalid_12h() {
        assert_eq!(parse_12h("0:30 AM"), None);
        assert_eq!(parse_12h("13:00 PM"), None);
        assert_eq!(parse_12h("9:30"), None);
    }

    #[test]
    fn stored_form_round_trip() {
        assert_eq!(to_24h(hm(14, 5)), "14:05");
        assert_eq!(parse_24h("14:05"), Some(hm(14, 5)));
        assert_eq!(parse_24h("9:61"), None);
    }
}
