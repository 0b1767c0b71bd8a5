use chrono::{DateTime, Datelike, FixedOffset, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::MedicalError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub sex: String,
    pub age: u32,
}

impl Patient {
    pub fn validate(&self) -> Result<(), MedicalError> {
        if self.id.trim().is_empty() {
            return Err(MedicalError::InvalidRequest("patient id must not be empty".to_string()));
        }
        Ok(())
    }
}

/// A weekday plus a minute-precision time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(with = "weekday_name")]
    pub day: Weekday,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
}

impl Slot {
    /// Seconds and sub-seconds are dropped.
    pub fn new(day: Weekday, time: NaiveTime) -> Self {
        let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        Self { day, time }
    }

    pub fn at(day: Weekday, hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self { day, time })
    }

    /// Weekday and time are read in the timestamp's own offset.
    pub fn from_timestamp(timestamp: &DateTime<FixedOffset>) -> Self {
        Self::new(timestamp.weekday(), timestamp.naive_local().time())
    }

    pub fn parse(day: &str, time: &str) -> Result<Self, MedicalError> {
        let weekday = day
            .trim()
            .parse::<Weekday>()
            .map_err(|_| MedicalError::InvalidSlot(format!("unknown day '{}'", day)))?;
        let time = hh_mm::parse(time.trim())
            .ok_or_else(|| MedicalError::InvalidSlot(format!("unreadable time '{}'", time)))?;
        Ok(Self::new(weekday, time))
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.time.minute()
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", weekday_name::full(self.day), self.time.format(hh_mm::FORMAT))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub id: String,
    pub patient: Patient,
    #[serde(flatten)]
    pub slot: Slot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<FixedOffset>>,
}

/// The visit part of a booking, without the patient reference.
///
/// Either `schedule` (RFC 3339) or `day` + `time` describes when; when both
/// are sent, `schedule` wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleVisitRequest {
    pub id: String,
    #[serde(default)]
    pub schedule: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

impl ScheduleVisitRequest {
    pub fn for_slot(id: &str, day: &str, time: &str) -> Self {
        Self {
            id: id.to_string(),
            schedule: None,
            day: Some(day.to_string()),
            time: Some(time.to_string()),
        }
    }

    pub fn for_timestamp(id: &str, schedule: DateTime<FixedOffset>) -> Self {
        Self {
            id: id.to_string(),
            schedule: Some(schedule),
            day: None,
            time: None,
        }
    }

    /// `Ok(None)` means no time was given at all. A zero timestamp
    /// (`0001-01-01T00:00:00Z`) counts as not given.
    pub fn requested_slot(&self) -> Result<Option<Slot>, MedicalError> {
        if let Some(schedule) = self.schedule.as_ref().filter(|s| !is_zero_timestamp(s)) {
            return Ok(Some(Slot::from_timestamp(schedule)));
        }

        let day = self.day.as_deref().filter(|d| !d.trim().is_empty());
        let time = self.time.as_deref().filter(|t| !t.trim().is_empty());

        match (day, time) {
            (None, None) => Ok(None),
            (Some(day), Some(time)) => Slot::parse(day, time).map(Some),
            _ => Err(MedicalError::InvalidSlot(
                "both day and time are required".to_string(),
            )),
        }
    }
}

/// Unix seconds of `0001-01-01T00:00:00Z`, the encoding of an unset time by
/// clients whose zero value is a date rather than null.
const ZERO_TIMESTAMP_SECS: i64 = -62_135_596_800;

fn is_zero_timestamp(timestamp: &DateTime<FixedOffset>) -> bool {
    timestamp.timestamp() == ZERO_TIMESTAMP_SECS && timestamp.timestamp_subsec_nanos() == 0
}

/// Body of `POST /medical/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVisitRequest {
    pub patient_id: String,
    #[serde(flatten)]
    pub visit: ScheduleVisitRequest,
}

pub mod weekday_name {
    use chrono::Weekday;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn full(day: Weekday) -> &'static str {
        match day {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    pub fn serialize<S>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(full(*day))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Weekday, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse::<Weekday>()
            .map_err(|_| D::Error::custom(format!("unknown day '{}'", raw)))
    }
}

pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .ok()
    }

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(raw.trim()).ok_or_else(|| D::Error::custom(format!("unreadable time '{}'", raw)))
    }
}
