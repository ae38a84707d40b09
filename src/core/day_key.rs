use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static DAY_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<year>\d{4})-(?P<month>\d{1,2})-(?P<day>\d{1,2})$").unwrap()
});

/// Composite year/month/day key for the calendar event map.
///
/// Wraps a `NaiveDate` so two serialized spellings of the same date (padded
/// or not) always collapse to the same key. Serializes as the unpadded
/// `"{year}-{month}-{day}"` string the persisted layout uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Date-only "is in the past" check used by the drop-target rules.
    pub fn is_before(&self, today: NaiveDate) -> bool {
        self.0 < today
    }

    pub fn parse(s: &str) -> Option<Self> {
        let caps = DAY_KEY_RE.captures(s)?;
        let year: i32 = caps["year"].parse().ok()?;
        let month: u32 = caps["month"].parse().ok()?;
        let day: u32 = caps["day"].parse().ok()?;
        Self::from_ymd(year, month, day)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.0.year(), self.0.month(), self.0.day())
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| de::Error::custom(format!("invalid day key: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_unpadded() {
        let key = DayKey::from_ymd(2026, 9, 1).unwrap();
        assert_eq!(key.to_string(), "2026-9-1");
    }

    #[test]
    fn padded_and_unpadded_collapse() {
        let padded = DayKey::parse("2026-09-01").unwrap();
        let unpadded = DayKey::parse("2026-9-1").unwrap();
        assert_eq!(padded, unpadded);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(DayKey::parse("2026-9"), None);
        assert_eq!(DayKey::parse("not-a-date"), None);
        assert_eq!(DayKey::parse("2026-13-1"), None);
        assert_eq!(DayKey::parse("2026-2-30"), None);
    }

    #[test]
    fn adjacent_months_are_distinct() {
        let sept = DayKey::from_ymd(2026, 9, 1).unwrap();
        let oct = DayKey::from_ymd(2026, 10, 1).unwrap();
        assert_ne!(sept, oct);
    }

    #[test]
    fn serde_round_trip_as_map_key() {
        let mut map = std::collections::HashMap::new();
        map.insert(DayKey::from_ymd(2026, 9, 14).unwrap(), 3u32);
        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains("\"2026-9-14\""));
        let back: std::collections::HashMap<DayKey, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn is_before_is_date_only() {
        let today = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        assert!(DayKey::from_ymd(2026, 9, 13).unwrap().is_before(today));
        assert!(!DayKey::from_ymd(2026, 9, 14).unwrap().is_before(today));
        assert!(!DayKey::from_ymd(2026, 9, 15).unwrap().is_before(today));
    }
}
