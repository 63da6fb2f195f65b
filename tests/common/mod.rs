#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use passenger_registry::application::services::{PassengerService, UserService};
use passenger_registry::domain::entities::{
    NewPassenger, NewUser, Passenger, PassengerPatch, PaymentMethod, User, UserPatch, UserType,
};
use passenger_registry::domain::repositories::{PassengerRepository, UserRepository};
use passenger_registry::error::AppError;
use passenger_registry::infrastructure::cache::{MemoryStore, ResourceCache};
use passenger_registry::state::AppState;

/// In-memory user repository with call counters.
///
/// Counts repository reads so tests can assert whether a request was
/// served from cache or fell through to the "database".
#[derive(Default)]
pub struct FakeUserRepository {
    users: Mutex<BTreeMap<i64, User>>,
    next_id: AtomicI64,
    pub list_calls: AtomicUsize,
    pub find_calls: AtomicUsize,
}

impl FakeUserRepository {
    /// Inserts a user directly, bypassing the counters.
    pub fn seed(&self, email: &str, user_type: UserType) -> User {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone_number: None,
            user_type,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().insert(id, user.clone());
        user
    }

    fn lookup(&self, id: i64) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lookup(id))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "email": new_user.email }),
            ));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            phone_number: new_user.phone_number,
            user_type: new_user.user_type,
            created_at: Utc::now(),
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;

        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        if let Some(phone_number) = patch.phone_number {
            user.phone_number = phone_number;
        }
        if let Some(user_type) = patch.user_type {
            user.user_type = user_type;
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.users.lock().unwrap().remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

/// In-memory passenger repository with call counters.
///
/// Resolves users through the shared [`FakeUserRepository`], mirroring the
/// SQL join in the real implementation.
pub struct FakePassengerRepository {
    passengers: Mutex<BTreeMap<i64, Passenger>>,
    next_id: AtomicI64,
    users: Arc<FakeUserRepository>,
    pub list_calls: AtomicUsize,
    pub find_calls: AtomicUsize,
}

impl FakePassengerRepository {
    pub fn new(users: Arc<FakeUserRepository>) -> Self {
        Self {
            passengers: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(0),
            users,
            list_calls: AtomicUsize::new(0),
            find_calls: AtomicUsize::new(0),
        }
    }

    /// Inserts a profile for an already-seeded user, bypassing the counters.
    pub fn seed(&self, user: &User) -> Passenger {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let passenger = Passenger {
            id,
            user: user.clone(),
            preferred_payment_method: PaymentMethod::Card,
            home_address: "12 Example St".to_string(),
            created_at: Utc::now(),
        };
        self.passengers.lock().unwrap().insert(id, passenger.clone());
        passenger
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PassengerRepository for FakePassengerRepository {
    async fn list(&self) -> Result<Vec<Passenger>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.passengers.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Passenger>, AppError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.passengers.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, new_passenger: NewPassenger) -> Result<Passenger, AppError> {
        let user = self.users.lookup(new_passenger.user_id).ok_or_else(|| {
            AppError::bad_request(
                "Referenced user does not exist",
                json!({ "user_id": new_passenger.user_id }),
            )
        })?;

        if user.user_type != UserType::Passenger {
            return Err(AppError::bad_request(
                "User is not a passenger account",
                json!({ "user_id": user.id, "user_type": user.user_type.as_str() }),
            ));
        }

        let mut passengers = self.passengers.lock().unwrap();
        if passengers.values().any(|p| p.user.id == user.id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "user_id": user.id }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let passenger = Passenger {
            id,
            user,
            preferred_payment_method: new_passenger.preferred_payment_method,
            home_address: new_passenger.home_address,
            created_at: Utc::now(),
        };
        passengers.insert(id, passenger.clone());
        Ok(passenger)
    }

    async fn update(&self, id: i64, patch: PassengerPatch) -> Result<Passenger, AppError> {
        let mut passengers = self.passengers.lock().unwrap();
        let passenger = passengers
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Passenger not found", json!({ "id": id })))?;

        if let Some(method) = patch.preferred_payment_method {
            passenger.preferred_payment_method = method;
        }
        if let Some(home_address) = patch.home_address {
            passenger.home_address = home_address;
        }
        Ok(passenger.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.passengers.lock().unwrap().remove(&id).is_some())
    }
}

/// Everything a handler test needs: the state plus handles to the fakes
/// and the cache for assertions.
pub struct TestContext {
    pub state: AppState,
    pub users: Arc<FakeUserRepository>,
    pub passengers: Arc<FakePassengerRepository>,
    pub cache: Arc<ResourceCache>,
}

/// Builds application state backed by in-memory fakes and a MemoryStore
/// cache with the default TTLs (300s read, 3600s warm).
pub fn create_test_state() -> TestContext {
    create_test_state_with_ttl(300, 3600)
}

pub fn create_test_state_with_ttl(read_ttl: u64, warm_ttl: u64) -> TestContext {
    let users = Arc::new(FakeUserRepository::default());
    let passengers = Arc::new(FakePassengerRepository::new(users.clone()));
    let cache = Arc::new(ResourceCache::new(
        Arc::new(MemoryStore::new()),
        read_ttl,
        warm_ttl,
    ));

    let user_service = Arc::new(UserService::new(users.clone(), cache.clone()));
    let passenger_service = Arc::new(PassengerService::new(passengers.clone(), cache.clone()));

    TestContext {
        state: AppState::new(user_service, passenger_service, cache.clone()),
        users,
        passengers,
        cache,
    }
}
