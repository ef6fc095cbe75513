use chrono::{DateTime, Local, SecondsFormat, Utc};

/// ISO-8601 with millisecond precision and a `Z` suffix, e.g. `2025-01-07T09:30:00.123Z`.
pub fn to_iso_millis(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Wall-clock time of day in the server's local zone, e.g. `9:30:00 AM`.
pub fn local_time_of_day(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%-I:%M:%S %p").to_string()
}

/// Serde adapter so persisted timestamps keep the millisecond layout
/// regardless of how precise the clock reading was.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_iso_millis(at))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
