//! Getir handlers: secret-key login, restaurant info, status, hours.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::Value;

use crate::api::dto::{
    CloseRequest, GetirLoginRequest, GetirLoginResponse, MessageResponse, RestaurantResponse,
    WorkingHoursResponse,
};
use crate::app_state::AppState;
use crate::error::ApiError;

use super::parse_json_body;

fn token_header(headers: &HeaderMap) -> Option<&str> {
    headers.get("token").and_then(|v| v.to_str().ok())
}

/// `POST /getir/login` — Exchange the secret-key pair for a token.
///
/// # Errors
///
/// 400 on malformed JSON or missing secrets, 401 on an unknown pair.
#[utoipa::path(
    post,
    path = "/api/getir/login",
    tag = "Getir",
    summary = "Restaurant login",
    request_body = GetirLoginRequest,
    responses(
        (status = 200, description = "Grant issued", body = GetirLoginResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Unknown secret pair"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: GetirLoginRequest = parse_json_body(&body)?;
    let grant = state
        .getir
        .login(req.app_secret_key.as_deref(), req.restaurant_secret_key.as_deref())
        .await?;
    Ok(Json(GetirLoginResponse::from(grant)))
}

/// `GET /getir/restaurants` — Info for the restaurant owning the token.
///
/// # Errors
///
/// 400 on a missing `token` header, 401 on an unknown token.
#[utoipa::path(
    get,
    path = "/api/getir/restaurants",
    tag = "Getir",
    summary = "Restaurant info",
    responses(
        (status = 200, description = "Restaurant info", body = RestaurantResponse),
        (status = 400, description = "Missing token"),
        (status = 401, description = "Unknown token"),
    )
)]
pub async fn restaurant_info(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let restaurant = state.getir.authenticate(token_header(&headers)).await?;
    Ok(Json(RestaurantResponse::from(restaurant)))
}

/// `PUT /getir/restaurants/status/open` — Reopen the restaurant.
///
/// # Errors
///
/// Token errors as the info endpoint.
#[utoipa::path(
    put,
    path = "/api/getir/restaurants/status/open",
    tag = "Getir",
    summary = "Open the restaurant",
    responses(
        (status = 200, description = "Restaurant opened", body = MessageResponse),
        (status = 400, description = "Missing token"),
        (status = 401, description = "Unknown token"),
    )
)]
pub async fn open_restaurant(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let message = state.getir.open(token_header(&headers)).await?;
    Ok(Json(MessageResponse { message }))
}

/// `PUT /getir/restaurants/status/close` — Close for a fixed duration.
///
/// Responds with a bare JSON string, matching the emulated platform.
///
/// # Errors
///
/// Token errors as the info endpoint, 400 on malformed JSON or a
/// duration outside 15/30/45.
#[utoipa::path(
    put,
    path = "/api/getir/restaurants/status/close",
    tag = "Getir",
    summary = "Close the restaurant",
    request_body = CloseRequest,
    responses(
        (status = 200, description = "Restaurant closed", body = String),
        (status = 400, description = "Bad duration or missing token"),
        (status = 401, description = "Unknown token"),
    )
)]
pub async fn close_restaurant(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    // Token errors win over body errors.
    let token = token_header(&headers);
    state.getir.authenticate(token).await?;

    let req: CloseRequest = parse_json_body(&body)?;
    let message = state.getir.close(token, req.time_off_amount).await?;
    Ok(Json(message))
}

/// `GET /getir/restaurants/working-hours` — Weekly schedules.
///
/// # Errors
///
/// 401 on any token failure.
#[utoipa::path(
    get,
    path = "/api/getir/restaurants/working-hours",
    tag = "Getir",
    summary = "Weekly working hours",
    responses(
        (status = 200, description = "Weekly schedules", body = WorkingHoursResponse),
        (status = 401, description = "Bad token"),
    )
)]
pub async fn working_hours(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let (restaurant_working_hours, restaurant_courier_hours) =
        state.getir.hours(token_header(&headers)).await?;
    Ok(Json(WorkingHoursResponse {
        restaurant_working_hours,
        restaurant_courier_hours,
    }))
}

/// `PUT /getir/restaurants/working-hours` — Merge day entries into the
/// stored week. Responds with a bare JSON string.
///
/// # Errors
///
/// 401 on any token failure, 400 on malformed JSON or a
/// `restaurantWorkingHours` field that is not an array.
#[utoipa::path(
    put,
    path = "/api/getir/restaurants/working-hours",
    tag = "Getir",
    summary = "Update weekly working hours",
    request_body(
        content = String,
        content_type = "application/json",
        description = "Object with a restaurantWorkingHours array of day entries",
    ),
    responses(
        (status = 200, description = "Hours updated", body = String),
        (status = 400, description = "Bad payload"),
        (status = 401, description = "Bad token"),
    )
)]
pub async fn update_working_hours(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    // Token errors win over body errors.
    let token = token_header(&headers);
    state.getir.authenticate_lenient(token).await?;

    let payload: Value = parse_json_body(&body)?;
    let Some(items) = payload
        .get("restaurantWorkingHours")
        .and_then(Value::as_array)
    else {
        return Err(ApiError::InvalidInput("Invalid format".to_string()));
    };

    let message = state.getir.update_hours(token, items).await?;
    Ok(Json(message))
}

/// Getir routes. Login is mounted at both the plain and `auth/` paths.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getir/login", post(login))
        .route("/getir/auth/login", post(login))
        .route("/getir/restaurants", get(restaurant_info))
        .route("/getir/restaurants/status/open", put(open_restaurant))
        .route("/getir/restaurants/status/close", put(close_restaurant))
        .route(
            "/getir/restaurants/working-hours",
            get(working_hours).put(update_working_hours),
        )
}
