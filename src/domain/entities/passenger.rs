//! Passenger entity: a profile attached to exactly one user account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// How a passenger prefers to pay for rides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Cash,
    Wallet,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Wallet => "wallet",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "card" => Ok(PaymentMethod::Card),
            "cash" => Ok(PaymentMethod::Cash),
            "wallet" => Ok(PaymentMethod::Wallet),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

/// A passenger profile.
///
/// Holds a non-owning reference to its [`User`], resolved at read time via
/// a join. The embedded user is a snapshot: when it sits in a cached
/// passenger value, it is only as fresh as the passenger cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    pub id: i64,
    pub user: User,
    pub preferred_payment_method: PaymentMethod,
    pub home_address: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a passenger profile.
#[derive(Debug, Clone)]
pub struct NewPassenger {
    pub user_id: i64,
    pub preferred_payment_method: PaymentMethod,
    pub home_address: String,
}

/// Partial update for an existing passenger. `None` fields are unchanged.
#[derive(Debug, Clone, Default)]
pub struct PassengerPatch {
    pub preferred_payment_method: Option<PaymentMethod>,
    pub home_address: Option<String>,
}
