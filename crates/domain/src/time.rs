//! Time and timestamp helpers.

use chrono::{DateTime, SubsecRound, Utc};

/// UTC timestamp used for `created_at` and `updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to millisecond precision.
///
/// Stored documents only keep milliseconds, so truncating here keeps a
/// freshly created record equal to the same record read back from storage.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(3)
}

/// Render a timestamp as ISO-8601 with milliseconds and a `Z` suffix.
#[must_use]
pub fn format(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 / ISO-8601 timestamp into UTC.
///
/// # Errors
///
/// Returns [`chrono::ParseError`] when `value` is not a valid RFC 3339 string.
pub fn parse(value: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|ts| ts.with_timezone(&Utc))
}

/// Serde adapter writing timestamps the way [`format`] does.
pub mod iso8601 {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    /// Serialize a [`Timestamp`] as an ISO-8601 string with milliseconds.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(ts))
    }

    /// Deserialize a [`Timestamp`] from any RFC 3339 string.
    ///
    /// # Errors
    ///
    /// Fails when the value is not a string or not a valid RFC 3339 timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw).map_err(serde::de::Error::custom)
    }
}
