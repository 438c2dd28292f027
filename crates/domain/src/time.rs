//! Time and timestamp helpers.
//!
//! The device speaks epoch milliseconds. In memory every instant is a
//! [`Timestamp`]; display formatting happens in a caller-supplied offset.

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Utc};

/// UTC timestamp used for scan times, log entries and export envelopes.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Build a timestamp from epoch milliseconds, if representable.
#[must_use]
pub fn from_epoch_millis(millis: i64) -> Option<Timestamp> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Wall-clock time of day, 24-hour (`13:05:09`).
#[must_use]
pub fn format_time_of_day(ts: Timestamp, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format("%H:%M:%S").to_string()
}

/// Date and time of day (`2024-03-01 13:05:09`).
#[must_use]
pub fn format_date_time(ts: Timestamp, offset: FixedOffset) -> String {
    ts.with_timezone(&offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// ISO-8601 UTC with millisecond precision (`2024-03-01T13:05:09.123Z`).
#[must_use]
pub fn format_iso8601(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for epoch-millisecond timestamps.
///
/// Accepts a JSON number or a numeric string on input; always writes a number.
pub mod epoch_millis {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Timestamp, from_epoch_millis};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    #[allow(clippy::cast_possible_truncation)]
    fn to_millis<E: serde::de::Error>(raw: Raw) -> Result<i64, E> {
        match raw {
            Raw::Int(v) => Ok(v),
            Raw::Float(v) if v.is_finite() => Ok(v.trunc() as i64),
            Raw::Float(v) => Err(E::custom(format!("invalid timestamp {v}"))),
            Raw::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| E::custom(format!("invalid timestamp {s:?}"))),
        }
    }

    /// Serialize as epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(ts.timestamp_millis())
    }

    /// Deserialize from epoch milliseconds (number or numeric string).
    ///
    /// # Errors
    ///
    /// Fails when the value is not numeric or out of range.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let millis = to_millis(Raw::deserialize(deserializer)?)?;
        from_epoch_millis(millis).ok_or_else(|| D::Error::custom("timestamp out of range"))
    }

    /// Same as the parent module, for optional fields.
    pub mod option {
        use serde::de::Error as _;
        use serde::{Deserialize, Deserializer, Serializer};

        use super::{Raw, to_millis};
        use crate::time::{Timestamp, from_epoch_millis};

        /// Serialize as epoch milliseconds or `null`.
        ///
        /// # Errors
        ///
        /// Propagates serializer errors.
        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            ts: &Option<Timestamp>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => serializer.serialize_i64(ts.timestamp_millis()),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize from epoch milliseconds, `null`, or absence.
        ///
        /// # Errors
        ///
        /// Fails when a present value is not numeric or out of range.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Timestamp>, D::Error> {
            match Option::<Raw>::deserialize(deserializer)? {
                Some(raw) => {
                    let millis = to_millis(raw)?;
                    from_epoch_millis(millis)
                        .map(Some)
                        .ok_or_else(|| D::Error::custom("timestamp out of range"))
                }
                None => Ok(None),
            }
        }
    }

    /// Optional timestamps that never fail to decode.
    ///
    /// A missing, `null`, non-numeric or out-of-range value becomes `None`,
    /// so one bad record does not poison the collection around it.
    pub mod lenient {
        use serde::de::IgnoredAny;
        use serde::{Deserialize, Deserializer};

        use super::{Raw, to_millis};
        use crate::time::{Timestamp, from_epoch_millis};

        pub use super::option::serialize;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Lenient {
            Raw(Raw),
            Other(IgnoredAny),
        }

        /// Deserialize from epoch milliseconds, treating anything unusable as absent.
        ///
        /// # Errors
        ///
        /// Only fails when the underlying deserializer does.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Timestamp>, D::Error> {
            Ok(match Option::<Lenient>::deserialize(deserializer)? {
                Some(Lenient::Raw(raw)) => to_millis::<serde::de::value::Error>(raw)
                    .ok()
                    .and_then(from_epoch_millis),
                Some(Lenient::Other(_)) | None => None,
            })
        }
    }
}
