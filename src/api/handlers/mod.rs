//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod cache_stats;
pub mod health;
pub mod passengers;
pub mod users;

pub use cache_stats::cache_stats_handler;
pub use health::health_handler;
pub use passengers::{
    create_passenger_handler, delete_passenger_handler, get_passenger_handler,
    list_passengers_handler, update_passenger_handler,
};
pub use users::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    update_user_handler,
};
