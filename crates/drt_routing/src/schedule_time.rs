use std::{fmt::Display, str::FromStr};

use jiff::{
    SignedDuration, Timestamp, Zoned,
    fmt::temporal::{Pieces, PiecesOffset},
    tz::Offset,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseScheduleTimeError {
    #[error("Invalid timestamp: {0}")]
    Invalid(#[from] jiff::Error),

    #[error("Timestamp {0:?} has no UTC offset")]
    MissingOffset(String),
}

/// An instant together with the UTC offset it is displayed in.
///
/// Schedules are computed on the instant; the offset of the route's start
/// time is carried along so every arrival and departure is rendered in the
/// operator's local time, e.g. `2026-02-05T08:02:00+09:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTime {
    timestamp: Timestamp,
    offset: Offset,
}

impl ScheduleTime {
    pub fn new(timestamp: Timestamp, offset: Offset) -> Self {
        Self { timestamp, offset }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn duration_since(&self, earlier: &ScheduleTime) -> SignedDuration {
        self.timestamp.duration_since(earlier.timestamp)
    }

    /// Fails when the result leaves the range jiff can represent.
    pub fn checked_add(self, duration: SignedDuration) -> Result<ScheduleTime, jiff::Error> {
        let timestamp = self.timestamp.checked_add(duration)?;
        Ok(ScheduleTime::new(timestamp, self.offset))
    }
}

impl From<&Zoned> for ScheduleTime {
    fn from(zoned: &Zoned) -> Self {
        ScheduleTime::new(zoned.timestamp(), zoned.offset())
    }
}

impl Display for ScheduleTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.timestamp.display_with_offset(self.offset))
    }
}

impl FromStr for ScheduleTime {
    type Err = ParseScheduleTimeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let pieces = Pieces::parse(input)?;
        let offset = match pieces.offset() {
            Some(PiecesOffset::Zulu) => Offset::UTC,
            Some(PiecesOffset::Numeric(numeric)) => numeric.offset(),
            _ => return Err(ParseScheduleTimeError::MissingOffset(input.to_string())),
        };
        let timestamp: Timestamp = input.parse()?;

        Ok(ScheduleTime::new(timestamp, offset))
    }
}

impl Serialize for ScheduleTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScheduleTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_offset_when_adding() {
        let start: ScheduleTime = "2026-02-05T08:00:00+09:00".parse().unwrap();
        let later = start.checked_add(SignedDuration::from_mins(2)).unwrap();

        assert_eq!(later.to_string(), "2026-02-05T08:02:00+09:00");
        assert_eq!(later.duration_since(&start), SignedDuration::from_secs(120));
    }

    #[test]
    fn should_fail_past_representable_range() {
        let start: ScheduleTime = "9999-12-31T00:00:00+09:00".parse().unwrap();
        assert!(start.checked_add(SignedDuration::from_hours(48)).is_err());
    }

    #[test]
    fn should_parse_zulu_as_utc() {
        let time: ScheduleTime = "2026-02-04T23:00:00Z".parse().unwrap();

        assert_eq!(time.offset(), Offset::UTC);
        assert_eq!(time.to_string(), "2026-02-04T23:00:00+00:00");
    }

    #[test]
    fn should_tolerate_time_zone_annotation() {
        let time: ScheduleTime = "2026-02-05T08:00:00+09:00[Asia/Tokyo]".parse().unwrap();
        assert_eq!(time.to_string(), "2026-02-05T08:00:00+09:00");
    }

    #[test]
    fn should_reject_missing_offset() {
        let result = "2026-02-05T08:00:00".parse::<ScheduleTime>();
        assert!(result.is_err());
    }

    #[test]
    fn should_compare_instants_across_offsets() {
        let tokyo: ScheduleTime = "2026-02-05T08:00:00+09:00".parse().unwrap();
        let utc: ScheduleTime = "2026-02-04T23:00:00Z".parse().unwrap();

        assert_eq!(tokyo.timestamp(), utc.timestamp());
        assert_ne!(tokyo, utc);
    }

    #[test]
    fn should_serialize_as_string() {
        let time: ScheduleTime = "2026-02-05T08:00:00+09:00".parse().unwrap();
        let json = serde_json::to_string(&time).unwrap();

        assert_eq!(json, "\"2026-02-05T08:00:00+09:00\"");
        assert_eq!(serde_json::from_str::<ScheduleTime>(&json).unwrap(), time);
    }
}
