//! User CRUD orchestration with cache consistency.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{Resource, ResourceCache};

/// Service coordinating the user repository and the cache layer.
///
/// Reads go through the cache-aside path; writes commit to the repository
/// first and only then touch the cache, so a failed write never evicts a
/// still-valid entry.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    cache: Arc<ResourceCache>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, cache: Arc<ResourceCache>) -> Self {
        Self { repository, cache }
    }

    /// Lists all users, cached under `user_list`.
    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let repository = self.repository.clone();
        self.cache
            .read_through(Resource::User, None, move || async move {
                repository.list().await
            })
            .await
    }

    /// Retrieves a user by id, cached under `user_<id>`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id does not exist. Not-found
    /// is a repository answer, never a cache condition; a cache miss just
    /// means the repository is asked.
    pub async fn get(&self, id: i64) -> Result<User, AppError> {
        let repository = self.repository.clone();
        self.cache
            .read_through(Resource::User, Some(id), move || async move {
                repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
            })
            .await
    }

    /// Creates a user, then invalidates the collection cache.
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = self.repository.create(new_user).await?;
        self.cache.on_create(Resource::User).await;
        Ok(user)
    }

    /// Updates a user, then writes the fresh value through to the cache.
    pub async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let user = self.repository.update(id, patch).await?;
        self.cache.on_update(Resource::User, id, &user).await;
        Ok(user)
    }

    /// Deletes a user, then invalidates both its cache keys.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id does not exist; the cache
    /// is left untouched in that case.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("User not found", json!({ "id": id })));
        }
        self.cache.on_delete(Resource::User, id).await;
        Ok(())
    }

    /// Pre-populates the user cache family with the extended TTL.
    ///
    /// Returns the number of users cached.
    pub async fn warm(&self) -> Result<usize, AppError> {
        let users = self.repository.list().await?;
        Ok(self.cache.warm(Resource::User, &users, |u| u.id).await)
    }

    /// Number of registered users. Used by the health check.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserType;
    use crate::domain::repositories::MockUserRepository;
    use crate::infrastructure::cache::MemoryStore;
    use chrono::Utc;

    fn sample_user(id: i64, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone_number: None,
            user_type: UserType::Passenger,
            created_at: Utc::now(),
        }
    }

    fn service(repo: MockUserRepository) -> UserService {
        let cache = Arc::new(ResourceCache::new(Arc::new(MemoryStore::new()), 300, 3600));
        UserService::new(Arc::new(repo), cache)
    }

    #[tokio::test]
    async fn test_list_hits_repository_once() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .times(1)
            .returning(|| Ok(vec![sample_user(1, "a@b.test")]));

        let service = service(repo);

        assert_eq!(service.list().await.unwrap().len(), 1);
        // Served from cache; the mock would panic on a second call.
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_write_through_skips_repository_read() {
        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .times(1)
            .returning(|id, _| Ok(sample_user(id, "new@b.test")));
        // The point of write-through: the follow-up retrieve never reads
        // the repository.
        repo.expect_find_by_id().times(0);

        let service = service(repo);

        service
            .update(5, UserPatch { email: Some("new@b.test".to_string()), ..Default::default() })
            .await
            .unwrap();

        let user = service.get(5).await.unwrap();
        assert_eq!(user.email, "new@b.test");
    }

    #[tokio::test]
    async fn test_delete_then_get_reaches_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .times(2)
            .returning(|id| Ok(Some(sample_user(id, "a@b.test"))));
        repo.expect_delete().times(1).returning(|_| Ok(true));

        let service = service(repo);

        // Populate the singular key, then delete.
        service.get(3).await.unwrap();
        service.delete(3).await.unwrap();

        // Cache miss forces the second repository read.
        service.get(3).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = service(repo);

        assert!(matches!(
            service.delete(404).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_invalidates_collection_exactly_once() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .times(2)
            .returning(|| Ok(vec![sample_user(1, "a@b.test")]));
        repo.expect_create()
            .times(1)
            .returning(|n| Ok(sample_user(2, &n.email)));

        let service = service(repo);

        service.list().await.unwrap();
        service
            .create(NewUser {
                email: "b@b.test".to_string(),
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                phone_number: None,
                user_type: UserType::Passenger,
            })
            .await
            .unwrap();

        // Collection key was dropped: exactly one more repository list,
        // after which the cache serves again.
        service.list().await.unwrap();
        service.list().await.unwrap();
    }

    #[tokio::test]
    async fn test_warm_returns_member_count() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .times(1)
            .returning(|| Ok(vec![sample_user(1, "a@b.test"), sample_user(2, "b@b.test")]));
        repo.expect_find_by_id().times(0);

        let service = service(repo);

        assert_eq!(service.warm().await.unwrap(), 2);
        // Both singular keys were pre-populated.
        assert_eq!(service.get(1).await.unwrap().id, 1);
        assert_eq!(service.get(2).await.unwrap().id, 2);
    }
}
