use crate::handlers::{self, order};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let order_routes = Router::new()
        .route("/orders", post(order::create_order))
        .route("/orders/{id}", get(order::get_order));

    Router::new()
        .merge(order_routes)
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
