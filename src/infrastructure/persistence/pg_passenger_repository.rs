//! PostgreSQL implementation of the passenger repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    NewPassenger, Passenger, PassengerPatch, PaymentMethod, User, UserType,
};
use crate::domain::repositories::PassengerRepository;
use crate::error::AppError;
use serde_json::json;

const PASSENGER_SELECT: &str = r#"
    SELECT p.id, p.preferred_payment_method, p.home_address, p.created_at,
           u.id AS user_id, u.email, u.first_name, u.last_name,
           u.phone_number, u.user_type, u.created_at AS user_created_at
    FROM passengers p
    JOIN users u ON u.id = p.user_id
"#;

/// Flat join row; folded into the nested [`Passenger`] shape in
/// [`PassengerRow::into_entity`].
#[derive(sqlx::FromRow)]
struct PassengerRow {
    id: i64,
    preferred_payment_method: String,
    home_address: String,
    created_at: DateTime<Utc>,
    user_id: i64,
    email: String,
    first_name: String,
    last_name: String,
    phone_number: Option<String>,
    user_type: String,
    user_created_at: DateTime<Utc>,
}

impl PassengerRow {
    fn into_entity(self) -> Result<Passenger, AppError> {
        let user_type = UserType::try_from(self.user_type)
            .map_err(|e| AppError::internal("Corrupt user row", json!({ "reason": e })))?;
        let preferred_payment_method = PaymentMethod::try_from(self.preferred_payment_method)
            .map_err(|e| AppError::internal("Corrupt passenger row", json!({ "reason": e })))?;

        Ok(Passenger {
            id: self.id,
            user: User {
                id: self.user_id,
                email: self.email,
                first_name: self.first_name,
                last_name: self.last_name,
                phone_number: self.phone_number,
                user_type,
                created_at: self.user_created_at,
            },
            preferred_payment_method,
            home_address: self.home_address,
            created_at: self.created_at,
        })
    }
}

/// PostgreSQL repository for passenger profiles.
///
/// Every read resolves the owning user in the same query; the `users` join
/// is the only place the association is materialized.
pub struct PgPassengerRepository {
    pool: Arc<PgPool>,
}

impl PgPassengerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Passenger>, AppError> {
        let row = sqlx::query_as::<_, PassengerRow>(&format!("{} WHERE p.id = $1", PASSENGER_SELECT))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(PassengerRow::into_entity).transpose()
    }
}

#[async_trait]
impl PassengerRepository for PgPassengerRepository {
    async fn list(&self) -> Result<Vec<Passenger>, AppError> {
        let rows = sqlx::query_as::<_, PassengerRow>(&format!("{} ORDER BY p.id", PASSENGER_SELECT))
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(PassengerRow::into_entity).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Passenger>, AppError> {
        self.fetch_by_id(id).await
    }

    async fn create(&self, new_passenger: NewPassenger) -> Result<Passenger, AppError> {
        // Only passenger-type accounts may carry a profile; checked here so
        // the caller gets a 400 instead of an opaque constraint error.
        let user_type: Option<String> =
            sqlx::query_scalar("SELECT user_type FROM users WHERE id = $1")
                .bind(new_passenger.user_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        match user_type.as_deref() {
            None => {
                return Err(AppError::bad_request(
                    "Referenced user does not exist",
                    json!({ "user_id": new_passenger.user_id }),
                ));
            }
            Some("passenger") => {}
            Some(other) => {
                return Err(AppError::bad_request(
                    "User is not a passenger account",
                    json!({ "user_id": new_passenger.user_id, "user_type": other }),
                ));
            }
        }

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO passengers (user_id, preferred_payment_method, home_address)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(new_passenger.user_id)
        .bind(new_passenger.preferred_payment_method.as_str())
        .bind(&new_passenger.home_address)
        .fetch_one(self.pool.as_ref())
        .await?;

        self.fetch_by_id(id).await?.ok_or_else(|| {
            AppError::internal("Passenger vanished after insert", json!({ "id": id }))
        })
    }

    async fn update(&self, id: i64, patch: PassengerPatch) -> Result<Passenger, AppError> {
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE passengers SET
                preferred_payment_method = COALESCE($2, preferred_payment_method),
                home_address             = COALESCE($3, home_address)
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(patch.preferred_payment_method.map(|m| m.as_str()))
        .bind(&patch.home_address)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match updated {
            Some(id) => self.fetch_by_id(id).await?.ok_or_else(|| {
                AppError::internal("Passenger vanished after update", json!({ "id": id }))
            }),
            None => Err(AppError::not_found("Passenger not found", json!({ "id": id }))),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM passengers WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
