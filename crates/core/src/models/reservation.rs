//! Reservation entity and its status lifecycle.
//!
//! Status labels are serialized with the operator-facing French wire values
//! ("en attente", "confirmée", "annulée", "terminée"). Transitions are
//! validated centrally through [`ReservationStatus::can_transition_to`]
//! rather than left to caller discipline.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[serde(rename = "en attente")]
    Pending,
    #[serde(rename = "confirmée")]
    Confirmed,
    #[serde(rename = "annulée")]
    Cancelled,
    #[serde(rename = "terminée")]
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "en attente",
            ReservationStatus::Confirmed => "confirmée",
            ReservationStatus::Cancelled => "annulée",
            ReservationStatus::Completed => "terminée",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "en attente" => Some(ReservationStatus::Pending),
            "confirmée" => Some(ReservationStatus::Confirmed),
            "annulée" => Some(ReservationStatus::Cancelled),
            "terminée" => Some(ReservationStatus::Completed),
            _ => None,
        }
    }

    /// A reservation still holding its time window.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::Completed
        )
    }

    /// Transition table for the booking lifecycle.
    ///
    /// Re-applying the current status is a permitted no-op; re-confirming an
    /// already-confirmed reservation resends the confirmation notification.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        if *self == next {
            return true;
        }
        match self {
            ReservationStatus::Pending => matches!(
                next,
                ReservationStatus::Confirmed | ReservationStatus::Cancelled
            ),
            ReservationStatus::Confirmed => matches!(
                next,
                ReservationStatus::Cancelled | ReservationStatus::Completed
            ),
            ReservationStatus::Cancelled | ReservationStatus::Completed => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub client_id: Uuid,
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub pitch_id: Uuid,
    pub pitch_name: String,
    pub pitch_kind: String,
    pub pitch_surface: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub tariff: f64,
    pub status: ReservationStatus,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated reservation fields, produced from a create/update request.
#[derive(Debug, Clone)]
pub struct ReservationSpec {
    pub client_id: Uuid,
    pub pitch_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: ReservationStatus,
    pub tariff: Option<f64>,
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub client_id: Option<Uuid>,
    pub pitch_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub status: Option<String>,
    pub tariff: Option<f64>,
    pub cancellation_reason: Option<String>,
}

impl CreateReservationRequest {
    pub fn validate(self) -> BookingResult<ReservationSpec> {
        let client_id = self
            .client_id
            .ok_or_else(|| BookingError::Validation("client_id is required".to_string()))?;
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
        let status_label = self
            .status
            .ok_or_else(|| BookingError::Validation("status is required".to_string()))?;

        if end_time <= start_time {
            return Err(BookingError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }

        let status = ReservationStatus::parse(&status_label).ok_or_else(|| {
            BookingError::InvalidStatus(format!("unknown reservation status '{status_label}'"))
        })?;

        if let Some(tariff) = self.tariff {
            if tariff < 0.0 {
                return Err(BookingError::Validation(
                    "tariff must not be negative".to_string(),
                ));
            }
        }

        Ok(ReservationSpec {
            client_id,
            pitch_id,
            date,
            start_time,
            end_time,
            status,
            tariff: self.tariff,
            cancellation_reason: self.cancellation_reason,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationResponse {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub email_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_error: Option<String>,
}
