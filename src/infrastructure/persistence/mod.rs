//! PostgreSQL-backed repository implementations.

mod pg_passenger_repository;
mod pg_user_repository;

pub use pg_passenger_repository::PgPassengerRepository;
pub use pg_user_repository::PgUserRepository;
