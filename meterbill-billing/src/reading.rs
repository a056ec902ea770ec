use bon::Builder;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use itertools::Itertools;
use meterbill_quantities::KilowattHours;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_with::{DeserializeAs, SerializeAs, serde_as};

/// Stable identifier assigned by whoever stores the readings.
#[derive(
    Clone,
    Debug,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Display,
    derive_more::From,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct ReadingId(pub String);

impl From<&str> for ReadingId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Cumulative meter value taken at a point in time.
#[serde_as]
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Builder)]
pub struct Reading {
    #[builder(into)]
    pub id: ReadingId,

    /// Date-only readings are taken at midnight.
    #[serde_as(as = "MeterDate")]
    #[builder(into)]
    pub date: NaiveDateTime,

    #[builder(into)]
    pub value: KilowattHours,
}

/// Stable sort by date: readings sharing a date keep their original order.
#[must_use]
pub fn sort_chronologically(readings: &[Reading]) -> Vec<&Reading> {
    readings.iter().sorted_by_key(|reading| reading.date).collect()
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse either a bare `YYYY-MM-DD` date, a naive ISO 8601 date-time,
/// or an RFC 3339 timestamp (keeping its wall-clock time).
#[must_use]
pub fn parse_meter_date(text: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map(NaiveDateTime::from)
        .or_else(|_| text.parse::<NaiveDateTime>())
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|timestamp| timestamp.naive_local()))
        .ok()
}

/// Serialize midnight as a bare date and anything else as a full date-time.
pub struct MeterDate;

impl SerializeAs<NaiveDateTime> for MeterDate {
    fn serialize_as<S: Serializer>(
        source: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if source.time() == NaiveTime::MIN {
            serializer.collect_str(&source.format(DATE_FORMAT))
        } else {
            serializer.collect_str(&source.format(DATE_TIME_FORMAT))
        }
    }
}

impl<'de> DeserializeAs<'de, NaiveDateTime> for MeterDate {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_meter_date(&text)
            .ok_or_else(|| D::Error::custom(format!("invalid reading date `{text}`")))
    }
}
