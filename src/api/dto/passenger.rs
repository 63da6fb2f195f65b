//! DTOs for passenger endpoints.

use crate::api::dto::user::UserResponse;
use crate::domain::entities::{NewPassenger, Passenger, PassengerPatch, PaymentMethod};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a passenger profile for an existing user.
///
/// `user_id` is write-only; responses carry the resolved user object
/// instead.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePassengerRequest {
    pub user_id: i64,

    pub preferred_payment_method: PaymentMethod,

    #[validate(length(min = 1, max = 300))]
    pub home_address: String,
}

impl CreatePassengerRequest {
    pub fn into_new_passenger(self) -> NewPassenger {
        NewPassenger {
            user_id: self.user_id,
            preferred_payment_method: self.preferred_payment_method,
            home_address: self.home_address,
        }
    }
}

/// Partial passenger update. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePassengerRequest {
    pub preferred_payment_method: Option<PaymentMethod>,

    #[validate(length(min = 1, max = 300))]
    pub home_address: Option<String>,
}

impl UpdatePassengerRequest {
    pub fn into_patch(self) -> PassengerPatch {
        PassengerPatch {
            preferred_payment_method: self.preferred_payment_method,
            home_address: self.home_address,
        }
    }
}

/// JSON representation of a passenger with its resolved user.
#[derive(Debug, Serialize)]
pub struct PassengerResponse {
    pub id: i64,
    pub user: UserResponse,
    pub preferred_payment_method: PaymentMethod,
    pub home_address: String,
}

impl From<Passenger> for PassengerResponse {
    fn from(passenger: Passenger) -> Self {
        Self {
            id: passenger.id,
            user: passenger.user.into(),
            preferred_payment_method: passenger.preferred_payment_method,
            home_address: passenger.home_address,
        }
    }
}
