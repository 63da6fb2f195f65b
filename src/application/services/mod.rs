//! Application services orchestrating repositories and the cache layer.

mod passenger_service;
mod user_service;

pub use passenger_service::PassengerService;
pub use user_service::UserService;
