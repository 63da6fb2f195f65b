//! API route configuration.

use crate::api::handlers::{
    cache_stats_handler, create_passenger_handler, create_user_handler, delete_passenger_handler,
    delete_user_handler, get_passenger_handler, get_user_handler, list_passengers_handler,
    list_users_handler, update_passenger_handler, update_user_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /users`            - List users (cached)
/// - `POST   /users`            - Register a user
/// - `GET    /users/{id}`       - Retrieve a user (cached)
/// - `PUT    /users/{id}`       - Update a user (write-through)
/// - `DELETE /users/{id}`       - Delete a user
/// - same five under `/passengers`
/// - `GET    /cache-stats`      - Cache key/TTL diagnostics
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .route(
            "/passengers",
            get(list_passengers_handler).post(create_passenger_handler),
        )
        .route(
            "/passengers/{id}",
            get(get_passenger_handler)
                .put(update_passenger_handler)
                .delete(delete_passenger_handler),
        )
        .route("/cache-stats", get(cache_stats_handler))
}
