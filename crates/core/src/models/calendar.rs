//! Free-form calendar queries over the slot grid.
//!
//! Bookable windows live only in the slot grid; these types answer ad hoc
//! range questions (conflict probe, day view) against slots and active
//! reservations with the same half-open overlap predicate the booking path
//! uses.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One window that intersects a probed range, from either side of the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictWindow {
    /// "slot" or "reservation".
    pub source: String,
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub has_conflict: bool,
    pub conflicts: Vec<ConflictWindow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayViewResponse {
    pub pitch_id: Uuid,
    pub date: NaiveDate,
    pub windows: Vec<ConflictWindow>,
}
