//! ISO-8601 timestamps used for ordering products.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A parsed timestamp that remembers its source text.
///
/// Accepts RFC 3339 (`2024-03-01T09:30:00Z`, `...+09:00`), naive date-times
/// (`2024-03-01T09:30:00`, read as UTC) and plain dates (`2024-03-01`, midnight
/// UTC). Serializes back to the original text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    raw: String,
    instant: DateTime<Utc>,
}

impl Timestamp {
    /// Parse an ISO-8601 timestamp.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let trimmed = raw.trim();
        let instant = parse_instant(trimmed)
            .ok_or_else(|| CatalogError::InvalidTimestamp(raw.to_string()))?;
        Ok(Self {
            raw: trimmed.to_string(),
            instant,
        })
    }

    /// Current time, rendered as RFC 3339 with millisecond precision.
    pub fn now() -> Self {
        let instant = Utc::now();
        Self {
            raw: instant.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            instant,
        }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant
            .cmp(&other.instant)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Timestamp {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.raw
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let date = Timestamp::parse("2024-01-01").unwrap();
        let naive = Timestamp::parse("2024-01-01T00:00:00").unwrap();
        let zulu = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
        let offset = Timestamp::parse("2024-01-01T09:00:00+09:00").unwrap();

        assert_eq!(date.instant(), zulu.instant());
        assert_eq!(naive.instant(), zulu.instant());
        assert_eq!(offset.instant(), zulu.instant());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn test_ordering() {
        let a = Timestamp::parse("2024-01-01").unwrap();
        let b = Timestamp::parse("2024-02-01T12:00:00Z").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_serde_keeps_source_text() {
        let ts: Timestamp = serde_json::from_str("\"2024-03-01T10:00:00.000Z\"").unwrap();
        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            "\"2024-03-01T10:00:00.000Z\""
        );
        assert!(serde_json::from_str::<Timestamp>("\"nope\"").is_err());
    }
}
