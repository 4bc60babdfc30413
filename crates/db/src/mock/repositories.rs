use chrono::NaiveDate;
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbClient, DbPitch, DbReservation, DbSlot};
use pitchbook_core::errors::BookingError;
use pitchbook_core::models::client::{ClientSpec, UpdateSubscriptionRequest};
use pitchbook_core::models::pitch::PitchSpec;
use pitchbook_core::models::reservation::{ReservationSpec, ReservationStatus};
use pitchbook_core::models::slot::SlotSpec;

// Mock repositories for testing
mock! {
    pub PitchRepo {
        pub async fn create_pitch(&self, spec: PitchSpec) -> eyre::Result<DbPitch>;

        pub async fn get_pitch_by_id(&self, id: Uuid) -> eyre::Result<Option<DbPitch>>;

        pub async fn list_pitches(&self) -> eyre::Result<Vec<DbPitch>>;

        pub async fn update_pitch(&self, id: Uuid, spec: PitchSpec) -> eyre::Result<Option<DbPitch>>;

        pub async fn pitch_is_referenced(&self, id: Uuid) -> eyre::Result<bool>;

        pub async fn delete_pitch(&self, id: Uuid) -> eyre::Result<Option<DbPitch>>;
    }
}

mock! {
    pub SlotRepo {
        pub async fn create_slot(&self, spec: SlotSpec) -> Result<DbSlot, BookingError>;

        pub async fn get_slot_by_id(&self, id: Uuid) -> eyre::Result<Option<DbSlot>>;

        pub async fn list_slots(
            &self,
            date: Option<NaiveDate>,
            pitch_id: Option<Uuid>,
            kind: Option<String>,
            surface: Option<String>,
        ) -> eyre::Result<Vec<DbSlot>>;

        pub async fn update_slot(&self, id: Uuid, spec: SlotSpec) -> Result<Option<DbSlot>, BookingError>;

        pub async fn delete_slot(&self, id: Uuid) -> Result<Option<DbSlot>, BookingError>;
    }
}

mock! {
    pub ReservationRepo {
        pub async fn list_reservations(
            &self,
            client_id: Option<Uuid>,
            name: Option<String>,
            email: Option<String>,
            status: Option<String>,
            date: Option<NaiveDate>,
        ) -> eyre::Result<Vec<DbReservation>>;

        pub async fn get_reservation_by_id(&self, id: Uuid) -> eyre::Result<Option<DbReservation>>;

        pub async fn create_reservation(&self, spec: ReservationSpec) -> Result<DbReservation, BookingError>;

        pub async fn update_reservation(
            &self,
            id: Uuid,
            spec: ReservationSpec,
        ) -> Result<Option<DbReservation>, BookingError>;

        pub async fn set_status(
            &self,
            id: Uuid,
            next: ReservationStatus,
            cancellation_reason: Option<String>,
        ) -> Result<Option<DbReservation>, BookingError>;

        pub async fn delete_reservation(&self, id: Uuid) -> Result<Option<DbReservation>, BookingError>;
    }
}

mock! {
    pub ClientRepo {
        pub async fn create_client(&self, spec: ClientSpec) -> Result<DbClient, BookingError>;

        pub async fn get_client_by_id(&self, id: Uuid) -> eyre::Result<Option<DbClient>>;

        pub async fn list_clients(&self) -> eyre::Result<Vec<DbClient>>;

        pub async fn update_client(&self, id: Uuid, spec: ClientSpec) -> Result<Option<DbClient>, BookingError>;

        pub async fn update_subscription(
            &self,
            id: Uuid,
            update: UpdateSubscriptionRequest,
        ) -> eyre::Result<Option<DbClient>>;

        pub async fn client_is_referenced(&self, id: Uuid) -> eyre::Result<bool>;

        pub async fn delete_client(&self, id: Uuid) -> eyre::Result<Option<DbClient>>;
    }
}
