use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// Half-open interval overlap: `[a_start, a_end)` intersects `[b_start, b_end)`.
///
/// Ranges that merely touch (one ends exactly where the other starts) do not
/// overlap, so back-to-back bookings on the same pitch are always legal.
pub fn ranges_overlap<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && b_start < a_end
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "reserved")]
    Reserved,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Available => "available",
            SlotStatus::Reserved => "reserved",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "available" => Some(SlotStatus::Available),
            "reserved" => Some(SlotStatus::Reserved),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub pitch_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: SlotStatus,
    pub tariff: Option<f64>,
    pub holder_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated slot fields, produced from a create/update request.
#[derive(Debug, Clone)]
pub struct SlotSpec {
    pub pitch_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: SlotStatus,
    pub tariff: Option<f64>,
    pub holder_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    pub pitch_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub status: Option<String>,
    pub tariff: Option<f64>,
    pub holder_name: Option<String>,
}

impl CreateSlotRequest {
    pub fn validate(self) -> BookingResult<SlotSpec> {
        let pitch_id = self
            .pitch_id
            .ok_or_else(|| BookingError::Validation("pitch_id is required".to_string()))?;
        let date = self
            .date
            .ok_or_else(|| BookingError::Validation("date is required".to_string()))?;
        let start_time = self
            .start_time
            .ok_or_else(|| BookingError::Validation("start_time is required".to_string()))?;
        let end_time = self
            .end_time
            .ok_or_else(|| BookingError::Validation("end_time is required".to_string()))?;

        if end_time <= start_time {
            return Err(BookingError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }

        let status = match self.status {
            Some(label) => SlotStatus::parse(&label).ok_or_else(|| {
                BookingError::InvalidStatus(format!("unknown slot status '{label}'"))
            })?,
            None => SlotStatus::Available,
        };

        if let Some(tariff) = self.tariff {
            if tariff < 0.0 {
                return Err(BookingError::Validation(
                    "tariff must not be negative".to_string(),
                ));
            }
        }

        Ok(SlotSpec {
            pitch_id,
            date,
            start_time,
            end_time,
            status,
            tariff: self.tariff,
            holder_name: self.holder_name,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkCreateSlotsRequest {
    pub slots: Vec<CreateSlotRequest>,
}
