use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pitch {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub surface: String,
    pub tariff: f64,
    pub equipment: Option<Vec<String>>,
    pub client_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Validated pitch fields, produced from a create/update request.
#[derive(Debug, Clone)]
pub struct PitchSpec {
    pub name: String,
    pub kind: String,
    pub surface: String,
    pub tariff: f64,
    pub equipment: Option<Vec<String>>,
    pub client_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePitchRequest {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub surface: Option<String>,
    pub tariff: Option<f64>,
    #[serde(default)]
    pub equipment: Option<Vec<String>>,
    pub client_id: Option<Uuid>,
}

impl CreatePitchRequest {
    /// Checks required fields and value ranges, returning the validated spec.
    pub fn validate(self) -> BookingResult<PitchSpec> {
        let name = non_empty("name", self.name)?;
        let kind = non_empty("kind", self.kind)?;
        let surface = non_empty("surface", self.surface)?;
        let tariff = self
            .tariff
            .ok_or_else(|| BookingError::Validation("tariff is required".to_string()))?;

        if tariff < 0.0 {
            return Err(BookingError::Validation(
                "tariff must not be negative".to_string(),
            ));
        }

        Ok(PitchSpec {
            name,
            kind,
            surface,
            tariff,
            equipment: self.equipment,
            client_id: self.client_id,
        })
    }
}

fn non_empty(field: &str, value: Option<String>) -> BookingResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BookingError::Validation(format!("{field} is required"))),
    }
}
