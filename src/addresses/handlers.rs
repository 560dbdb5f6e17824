//! HTTP handlers for address operations
//!
//! Handlers resolve the session, call the service, and map the outcome's
//! error kind to a status code. They perform no classification of their own.

use axum::{
    Json,
    extract::{FromRequestParts, Path, Query, State},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

use super::service::AddressService;
use crate::core::auth::{RequestContext, SessionResolver};
use crate::core::query::ListParams;
use crate::core::validation::FormInput;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AddressService>,
    pub resolver: Arc<dyn SessionResolver>,
}

/// Resolves the request's session through the configured [`SessionResolver`]
///
/// A resolver failure is logged and treated as an anonymous request.
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.resolver.resolve(&parts.headers).await {
            Ok(session) => Ok(session.into()),
            Err(e) => {
                tracing::warn!("session resolution failed: {:#}", e);
                Ok(RequestContext::anonymous())
            }
        }
    }
}

/// Query string of the export endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParams {
    #[serde(default)]
    pub search_query: Option<String>,
}

/// List addresses
///
/// GET /api/addresses?searchQuery=...&page=...&pageSize=...
///
/// `pageSize` is clamped to `pagination.max_page_size`; the size actually
/// applied is echoed in `pagination.pageSize`.
pub async fn list_addresses(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(params): Query<ListParams>,
) -> Response {
    let outcome = state.service.list_addresses(&ctx, &params).await;
    (outcome.status_code(StatusCode::OK), Json(outcome)).into_response()
}

/// Get one address
///
/// GET /api/addresses/{id}
pub async fn get_address(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Response {
    let outcome = state.service.get_address_by_id(&ctx, &id).await;
    (outcome.status_code(StatusCode::OK), Json(outcome)).into_response()
}

/// Create an address
///
/// POST /api/addresses
pub async fn create_address(
    State(state): State<AppState>,
    ctx: RequestContext,
    input: FormInput,
) -> Response {
    let outcome = state.service.create_address(&ctx, &input).await;
    (outcome.status_code(StatusCode::CREATED), Json(outcome)).into_response()
}

/// Update an address
///
/// PUT or PATCH /api/addresses/{id}
pub async fn update_address(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    input: FormInput,
) -> Response {
    let outcome = state.service.update_address(&ctx, &id, &input).await;
    (outcome.status_code(StatusCode::OK), Json(outcome)).into_response()
}

/// Delete an address
///
/// DELETE /api/addresses/{id}
pub async fn delete_address(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Response {
    let outcome = state.service.delete_address(&ctx, &id).await;
    (outcome.status_code(StatusCode::OK), Json(outcome)).into_response()
}

/// Download every matching address as CSV
///
/// GET /api/addresses/export?searchQuery=...
///
/// Failures are answered with the JSON outcome instead of a file.
pub async fn export_addresses(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(params): Query<ExportParams>,
) -> Response {
    let outcome = state
        .service
        .export_addresses(&ctx, params.search_query.as_deref())
        .await;

    let status = outcome.status_code(StatusCode::OK);
    match outcome.csv {
        Some(csv) => (
            status,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, attachment_header()),
            ],
            csv,
        )
            .into_response(),
        None => (status, Json(outcome)).into_response(),
    }
}

/// `attachment; filename="addresses_<YYYY-MM-DD>.csv"` for today's date
pub fn attachment_header() -> String {
    format!(
        "attachment; filename=\"addresses_{}.csv\"",
        chrono::Local::now().format("%Y-%m-%d")
    )
}
