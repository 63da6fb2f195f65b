//! Repository traits decoupling services from storage.

mod passenger_repository;
mod user_repository;

pub use passenger_repository::PassengerRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use passenger_repository::MockPassengerRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
