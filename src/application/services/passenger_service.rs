//! Passenger CRUD orchestration with cache consistency.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewPassenger, Passenger, PassengerPatch};
use crate::domain::repositories::PassengerRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{Resource, ResourceCache};

/// Service coordinating the passenger repository and the cache layer.
///
/// Mirrors [`crate::application::services::UserService`] over the
/// `passenger_*` key family. Passenger invalidation never touches
/// `user_*` keys even though cached passengers embed user data; the
/// embedded snapshot goes stale no faster than the passenger entry's own
/// TTL.
pub struct PassengerService {
    repository: Arc<dyn PassengerRepository>,
    cache: Arc<ResourceCache>,
}

impl PassengerService {
    pub fn new(repository: Arc<dyn PassengerRepository>, cache: Arc<ResourceCache>) -> Self {
        Self { repository, cache }
    }

    /// Lists all passengers, cached under `passenger_list`.
    pub async fn list(&self) -> Result<Vec<Passenger>, AppError> {
        let repository = self.repository.clone();
        self.cache
            .read_through(Resource::Passenger, None, move || async move {
                repository.list().await
            })
            .await
    }

    /// Retrieves a passenger by id, cached under `passenger_<id>`.
    pub async fn get(&self, id: i64) -> Result<Passenger, AppError> {
        let repository = self.repository.clone();
        self.cache
            .read_through(Resource::Passenger, Some(id), move || async move {
                repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Passenger not found", json!({ "id": id })))
            })
            .await
    }

    /// Creates a passenger profile, then invalidates the collection cache.
    pub async fn create(&self, new_passenger: NewPassenger) -> Result<Passenger, AppError> {
        let passenger = self.repository.create(new_passenger).await?;
        self.cache.on_create(Resource::Passenger).await;
        Ok(passenger)
    }

    /// Updates a passenger, then writes the fresh value through to the cache.
    pub async fn update(&self, id: i64, patch: PassengerPatch) -> Result<Passenger, AppError> {
        let passenger = self.repository.update(id, patch).await?;
        self.cache.on_update(Resource::Passenger, id, &passenger).await;
        Ok(passenger)
    }

    /// Deletes a passenger, then invalidates both its cache keys.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("Passenger not found", json!({ "id": id })));
        }
        self.cache.on_delete(Resource::Passenger, id).await;
        Ok(())
    }

    /// Pre-populates the passenger cache family with the extended TTL.
    pub async fn warm(&self) -> Result<usize, AppError> {
        let passengers = self.repository.list().await?;
        Ok(self
            .cache
            .warm(Resource::Passenger, &passengers, |p| p.id)
            .await)
    }
}
