//! Route table for the address API

use crate::addresses::AppState;
use crate::addresses::handlers::{
    create_address, delete_address, export_addresses, get_address, list_addresses,
    update_address,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Build address routes
///
/// - GET /api/addresses - List addresses (search + pagination)
/// - POST /api/addresses - Create an address
/// - GET /api/addresses/export - Download matching addresses as CSV
/// - GET /api/addresses/{id} - Get an address
/// - PUT, PATCH /api/addresses/{id} - Update an address
/// - DELETE /api/addresses/{id} - Delete an address
pub fn build_address_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/addresses", get(list_addresses).post(create_address))
        .route("/api/addresses/export", get(export_addresses))
        .route(
            "/api/addresses/{id}",
            get(get_address)
                .put(update_address)
                .patch(update_address)
                .delete(delete_address),
        )
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME")
    }))
}
