//! Repository trait for passenger persistence.

use crate::domain::entities::{NewPassenger, Passenger, PassengerPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing passenger profiles.
///
/// Every returned [`Passenger`] has its user resolved via a join; there is
/// no operation that yields a passenger without its user snapshot.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPassengerRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PassengerRepository: Send + Sync {
    /// Lists all passengers with their users, ordered by id.
    async fn list(&self) -> Result<Vec<Passenger>, AppError>;

    /// Finds a passenger by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Passenger>, AppError>;

    /// Creates a passenger profile for an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced user does not
    /// exist or is not a passenger-type account, and [`AppError::Conflict`]
    /// if the user already has a profile.
    async fn create(&self, new_passenger: NewPassenger) -> Result<Passenger, AppError>;

    /// Partially updates a passenger. `None` fields in the patch are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no passenger matches `id`.
    async fn update(&self, id: i64, patch: PassengerPatch) -> Result<Passenger, AppError>;

    /// Deletes a passenger profile.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if the id did
    /// not exist. The referenced user is left untouched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
