//! Trendyol handlers: store listing, working status, working hours.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::Value;

use crate::api::dto::{
    MessageResponse, StatusUpdateRequest, StoreListResponse, WorkingHoursUpdateResponse,
};
use crate::app_state::AppState;
use crate::auth::{api_key_pair, basic_credentials, integrator_identity};
use crate::domain::StoreWorkingHours;
use crate::error::ApiError;

use super::parse_json_body;

/// `GET /trendyol/suppliers/{supplierId}/stores` — Paged store list.
///
/// Query values are parsed leniently: a non-numeric `page` or `size`
/// falls back to the default rather than rejecting the request.
///
/// # Errors
///
/// 401 on a missing or mismatched `api-key`/`api-secret` header pair.
#[utoipa::path(
    get,
    path = "/api/trendyol/suppliers/{supplierId}/stores",
    tag = "Trendyol",
    summary = "List supplier stores",
    params(
        ("supplierId" = String, Path, description = "Supplier id"),
        ("page" = Option<i64>, Query, description = "1-indexed page"),
        ("size" = Option<i64>, Query, description = "Page size, max 50"),
    ),
    responses(
        (status = 200, description = "Paged store list", body = StoreListResponse),
        (status = 401, description = "Bad API credentials"),
    )
)]
pub async fn list_stores(
    State(state): State<AppState>,
    Path(supplier_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    state
        .trendyol
        .check_api_credentials(api_key_pair(&headers))?;

    let page = params.get("page").and_then(|v| v.parse().ok());
    let size = params.get("size").and_then(|v| v.parse().ok());
    let result = state.trendyol.list_stores(&supplier_id, page, size).await?;
    Ok(Json(StoreListResponse::from(result)))
}

/// `PUT /trendyol/suppliers/{supplierId}/stores/{storeId}/status` —
/// Set a store's working status.
///
/// # Errors
///
/// 401 on bad API credentials, 400 on a status outside `OPEN`/`CLOSED`
/// or the simulated conflict, 404 on an unknown store.
#[utoipa::path(
    put,
    path = "/api/trendyol/suppliers/{supplierId}/stores/{storeId}/status",
    tag = "Trendyol",
    summary = "Update store working status",
    params(
        ("supplierId" = String, Path, description = "Supplier id"),
        ("storeId" = String, Path, description = "Store id"),
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status applied"),
        (status = 400, description = "Bad status or simulated conflict"),
        (status = 401, description = "Bad API credentials"),
        (status = 404, description = "Unknown store"),
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path((supplier_id, store_id)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    state
        .trendyol
        .check_api_credentials(api_key_pair(&headers))?;

    let req: StatusUpdateRequest = parse_json_body(&body)?;
    let message = state
        .trendyol
        .update_status(&supplier_id, &store_id, req.status.as_deref())
        .await?;
    Ok(Json(MessageResponse { message }))
}

/// `PUT /trendyol/suppliers/{supplierId}/stores/{storeId}/working-hours`
/// — Replace a store's working hours.
///
/// Authenticated by the `x-integrator-info` header plus Basic auth; the
/// decoded key/secret must match the record's own columns.
///
/// # Errors
///
/// 403 on a missing or mismatched integrator header, 401 on malformed
/// Basic auth, 400 on a missing or malformed `workingHours` array, 404
/// when no record matches the full identity set.
#[utoipa::path(
    put,
    path = "/api/trendyol/suppliers/{supplierId}/stores/{storeId}/working-hours",
    tag = "Trendyol",
    summary = "Update store working hours",
    params(
        ("supplierId" = String, Path, description = "Supplier id"),
        ("storeId" = String, Path, description = "Store id"),
    ),
    request_body(
        content = String,
        content_type = "application/json",
        description = "Object with a workingHours array of day windows",
    ),
    responses(
        (status = 200, description = "Hours applied", body = WorkingHoursUpdateResponse),
        (status = 400, description = "Bad workingHours payload"),
        (status = 401, description = "Bad Basic auth"),
        (status = 403, description = "Bad integrator identity"),
        (status = 404, description = "Unknown store identity"),
    )
)]
pub async fn update_working_hours(
    State(state): State<AppState>,
    Path((supplier_id, store_id)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let identity = integrator_identity(&headers)
        .filter(|i| i.supplier_id == supplier_id)
        .ok_or_else(|| {
            ApiError::Forbidden("Forbidden: Invalid or missing Integrator Info".to_string())
        })?;
    let credentials = basic_credentials(&headers).ok_or_else(|| {
        ApiError::Unauthorized("Unauthorized: Invalid Basic Auth".to_string())
    })?;

    let payload: Value = parse_json_body(&body)?;
    let Some(items) = payload.get("workingHours").and_then(Value::as_array) else {
        return Err(ApiError::InvalidInput("Missing workingHours array".to_string()));
    };
    let hours = parse_working_hours(items)?;

    state
        .trendyol
        .update_working_hours(
            &supplier_id,
            &store_id,
            &identity.integrator,
            &credentials.api_key,
            &credentials.api_secret,
            &hours,
        )
        .await?;

    Ok(Json(WorkingHoursUpdateResponse {
        message: "Working hours updated successfully.".to_string(),
        working_hours: hours,
    }))
}

/// Validates every entry carries the three non-empty string fields.
fn parse_working_hours(items: &[Value]) -> Result<Vec<StoreWorkingHours>, ApiError> {
    let mut hours = Vec::with_capacity(items.len());
    for item in items {
        let day_of_week = item.get("dayOfWeek").and_then(Value::as_str);
        let opening_time = item.get("openingTime").and_then(Value::as_str);
        let closing_time = item.get("closingTime").and_then(Value::as_str);
        match (day_of_week, opening_time, closing_time) {
            (Some(day), Some(open), Some(close))
                if !day.is_empty() && !open.is_empty() && !close.is_empty() =>
            {
                hours.push(StoreWorkingHours {
                    day_of_week: day.to_string(),
                    opening_time: open.to_string(),
                    closing_time: close.to_string(),
                });
            }
            _ => {
                return Err(ApiError::InvalidInput(
                    "Invalid workingHours format".to_string(),
                ));
            }
        }
    }
    Ok(hours)
}

/// Trendyol routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trendyol/suppliers/{supplier_id}/stores", get(list_stores))
        .route(
            "/trendyol/suppliers/{supplier_id}/stores/{store_id}/status",
            put(update_status),
        )
        .route(
            "/trendyol/suppliers/{supplier_id}/stores/{store_id}/working-hours",
            put(update_working_hours),
        )
}
