use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::{info, warn};
use types::order::{OrderRequest, OrderSnapshot};

pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<OrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let order = state.engine.submit(payload).map_err(|e| {
        warn!(error = %e, "Order rejected");
        AppError::from(e)
    })?;

    info!(order_id = %order.id, "Order placed");

    let location = format!("/orders/{}", order.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderSnapshot>, AppError> {
    let order = state.engine.lookup(&order_id).map_err(|e| {
        warn!(order_id = %order_id, "Order lookup failed");
        AppError::from(e)
    })?;

    Ok(Json(order))
}
