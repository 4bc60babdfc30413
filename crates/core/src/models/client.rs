use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subscription: Option<Subscription>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub kind: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub payment_mode: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClientSpec {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CreateClientRequest {
    pub fn validate(self) -> BookingResult<ClientSpec> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(BookingError::Validation("name is required".to_string())),
        };
        let email = match self.email {
            Some(e) if e.contains('@') => e,
            Some(_) => {
                return Err(BookingError::Validation(
                    "email must be a valid address".to_string(),
                ));
            }
            None => return Err(BookingError::Validation("email is required".to_string())),
        };

        Ok(ClientSpec {
            name,
            email,
            phone: self.phone,
        })
    }
}

/// Partial update of the subscription block; omitted fields are left as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub kind: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub payment_mode: Option<String>,
}
