use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Deserialize, Deserializer};

/// Parse an RFC 3339 timestamp, or an offset-less
/// `YYYY-MM-DDTHH:MM:SS[.fff]` one, which is read as local time.
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive: NaiveDateTime = s.parse().ok()?;
    let utc = Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        // Skipped by a DST jump: no local reading exists.
        .unwrap_or_else(|| naive.and_utc());
    Some(utc)
}

/// `deserialize_with` helper accepting either format [`parse`] does.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp {s:?}")))
}
