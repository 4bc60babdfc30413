use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::eyre;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use pitchbook_core::models::{
    client::{Client, Subscription},
    pitch::Pitch,
    reservation::{Reservation, ReservationStatus},
    slot::{Slot, SlotStatus},
    user::User,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPitch {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub surface: String,
    pub tariff: f64,
    pub equipment: Option<Vec<String>>,
    pub client_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl DbPitch {
    pub fn into_model(self) -> Pitch {
        Pitch {
            id: self.id,
            name: self.name,
            kind: self.kind,
            surface: self.surface,
            tariff: self.tariff,
            equipment: self.equipment,
            client_id: self.client_id,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub pitch_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub tariff: Option<f64>,
    pub holder_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbSlot {
    pub fn into_model(self) -> eyre::Result<Slot> {
        let status = SlotStatus::parse(&self.status)
            .ok_or_else(|| eyre!("stored slot status '{}' is not recognized", self.status))?;
        Ok(Slot {
            id: self.id,
            pitch_id: self.pitch_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            status,
            tariff: self.tariff,
            holder_name: self.holder_name,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservation {
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
    pub status: String,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbReservation {
    pub fn into_model(self) -> eyre::Result<Reservation> {
        let status = ReservationStatus::parse(&self.status).ok_or_else(|| {
            eyre!(
                "stored reservation status '{}' is not recognized",
                self.status
            )
        })?;
        Ok(Reservation {
            id: self.id,
            client_id: self.client_id,
            client_name: self.client_name,
            client_email: self.client_email,
            client_phone: self.client_phone,
            pitch_id: self.pitch_id,
            pitch_name: self.pitch_name,
            pitch_kind: self.pitch_kind,
            pitch_surface: self.pitch_surface,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            tariff: self.tariff,
            status,
            cancellation_reason: self.cancellation_reason,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClient {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subscription_kind: Option<String>,
    pub subscription_start: Option<NaiveDate>,
    pub subscription_end: Option<NaiveDate>,
    pub subscription_price: Option<f64>,
    pub payment_mode: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbClient {
    pub fn into_model(self) -> Client {
        let subscription = self.subscription_kind.map(|kind| Subscription {
            kind,
            start_date: self.subscription_start,
            end_date: self.subscription_end,
            price: self.subscription_price,
            payment_mode: self.payment_mode,
        });
        Client {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            subscription,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl DbUser {
    pub fn into_model(self) -> User {
        User {
            id: self.id,
            username: self.username,
            role: self.role,
            created_at: self.created_at,
        }
    }
}
