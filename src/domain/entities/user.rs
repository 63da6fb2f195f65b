//! User entity and its input types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of an account in the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Passenger,
    Driver,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Passenger => "passenger",
            UserType::Driver => "driver",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for UserType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "passenger" => Ok(UserType::Passenger),
            "driver" => Ok(UserType::Driver),
            other => Err(format!("unknown user type: {}", other)),
        }
    }
}

/// A registered account.
///
/// `id` is assigned by the database on insert; callers never choose it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    #[sqlx(try_from = "String")]
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub user_type: UserType,
}

/// Partial update for an existing user.
///
/// `None` fields are left unchanged. `phone_number: Some(None)` clears the
/// stored number; `Some(Some(n))` replaces it.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub user_type: Option<UserType>,
}
