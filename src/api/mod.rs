mod handlers;

pub use handlers::{MapResponse, OutcomeResponse, RawSeat, ReserveInput};

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use seatbook_core::service::SharedService;

pub fn create_router(service: SharedService) -> Router {
    let api = Router::new()
        // Reservations
        .route("/reservations", post(handlers::reserve))
        .route("/reservations/{seat}", delete(handlers::cancel))
        // Occupancy
        .route("/map", get(handlers::map))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
