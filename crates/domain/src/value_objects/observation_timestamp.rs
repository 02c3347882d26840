//! Observation timestamp value object
//!
//! UTC timestamp truncated to minute precision. Observations are keyed by
//! (location id, timestamp), so all sub-minute components are dropped to
//! give every provider reading within the same minute the same key.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// UTC timestamp with minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ObservationTimestamp(DateTime<Utc>);

impl ObservationTimestamp {
    /// Create a timestamp, truncating seconds and sub-second components
    #[must_use]
    pub fn new(at: DateTime<Utc>) -> Self {
        let truncated = at
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(at);
        Self(truncated)
    }

    /// The current minute
    #[must_use]
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// Create from a Unix timestamp in seconds (as reported by the provider)
    #[must_use]
    pub fn from_unix(secs: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(secs, 0).map(Self::new)
    }

    /// Get the underlying UTC instant
    #[must_use]
    pub const fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// RFC 3339 representation used for persistence
    #[must_use]
    pub fn to_rfc3339(self) -> String {
        self.0.to_rfc3339()
    }

    /// Shift by a signed number of minutes
    #[must_use]
    pub fn offset_minutes(self, minutes: i64) -> Self {
        Self::new(self.0 + Duration::minutes(minutes))
    }
}

impl From<DateTime<Utc>> for ObservationTimestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self::new(at)
    }
}

impl fmt::Display for ObservationTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M UTC"))
    }
}

/// Custom deserialization that re-truncates to minute precision
impl<'de> Deserialize<'de> for ObservationTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let at = DateTime::<Utc>::deserialize(deserializer)?;
        Ok(Self::new(at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncates_to_minute() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let ts = ObservationTimestamp::new(at);
        assert_eq!(ts.as_datetime().second(), 0);
        assert_eq!(ts.as_datetime().minute(), 26);
    }

    #[test]
    fn test_same_minute_same_key() {
        let a = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 3).unwrap();
        let b = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 59).unwrap();
        assert_eq!(ObservationTimestamp::new(a), ObservationTimestamp::new(b));
    }

    #[test]
    fn test_from_unix() {
        let ts = ObservationTimestamp::from_unix(1_700_000_000).unwrap();
        assert_eq!(ts.as_datetime().second(), 0);
        assert!(ObservationTimestamp::from_unix(i64::MAX).is_none());
    }

    #[test]
    fn test_offset_minutes() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 0).unwrap();
        let ts = ObservationTimestamp::new(at);
        assert_eq!(ts.offset_minutes(30).as_datetime().minute(), 56);
        assert_eq!(ts.offset_minutes(-26).as_datetime().minute(), 0);
    }

    #[test]
    fn test_ordering() {
        let earlier = ObservationTimestamp::from_unix(1_700_000_000).unwrap();
        let later = earlier.offset_minutes(1);
        assert!(earlier < later);
    }

    #[test]
    fn test_display_format() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let ts = ObservationTimestamp::new(at);
        assert_eq!(ts.to_string(), "2026-03-14 09:26 UTC");
    }

    #[test]
    fn test_serde_round_trip_truncates() {
        let json = "\"2026-03-14T09:26:53Z\"";
        let ts: ObservationTimestamp = serde_json::from_str(json).expect("deserialize");
        assert_eq!(ts.as_datetime().second(), 0);
    }
}
