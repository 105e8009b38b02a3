//! Getir service: secret-key login, status toggles, weekly hours.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::getir::TIME_OFF_AMOUNTS;
use crate::domain::{DaySchedule, RestaurantRecord, RestaurantStatus, WorkingWindow};
use crate::error::ApiError;
use crate::storage::PlatformStore;

/// Issued login grant: the restaurant id and its session token.
#[derive(Debug, Clone)]
pub struct RestaurantGrant {
    /// Platform restaurant identifier.
    pub restaurant_id: String,
    /// Token for the `token` request header.
    pub token: String,
}

/// Orchestrates the Getir endpoints over the injected store.
#[derive(Debug, Clone)]
pub struct GetirService {
    store: Arc<dyn PlatformStore>,
}

impl GetirService {
    /// Creates a new service.
    #[must_use]
    pub fn new(store: Arc<dyn PlatformStore>) -> Self {
        Self { store }
    }

    /// Exchanges the app/restaurant secret pair for a grant.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when either secret is missing, `Unauthorized` when
    /// no restaurant owns the pair, `Backend` on lookup failure.
    pub async fn login(
        &self,
        app_secret_key: Option<&str>,
        restaurant_secret_key: Option<&str>,
    ) -> Result<RestaurantGrant, ApiError> {
        let (Some(app_secret), Some(restaurant_secret)) = (app_secret_key, restaurant_secret_key)
        else {
            return Err(ApiError::InvalidInput("Missing required fields".to_string()));
        };
        if app_secret.is_empty() || restaurant_secret.is_empty() {
            return Err(ApiError::InvalidInput("Missing required fields".to_string()));
        }

        let restaurant = self
            .store
            .restaurant_by_secret(restaurant_secret)
            .await
            .map_err(|_| ApiError::Backend("Database error".to_string()))?;

        match restaurant {
            Some(r) if r.app_secret_key == app_secret => Ok(RestaurantGrant {
                restaurant_id: r.restaurant_id,
                token: r.token,
            }),
            _ => Err(ApiError::Unauthorized("Invalid credentials".to_string())),
        }
    }

    /// Resolves the restaurant owning a `token` header, with the info
    /// endpoints' error split: missing header is 400, unknown token 401.
    ///
    /// # Errors
    ///
    /// `InvalidInput`, `Unauthorized`, or `Backend` as above.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<RestaurantRecord, ApiError> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Err(ApiError::InvalidInput("Missing token".to_string()));
        };
        self.store
            .restaurant_by_token(token)
            .await
            .map_err(|_| ApiError::Backend("Database error".to_string()))?
            .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))
    }

    /// Resolves the restaurant owning a `token` header for the
    /// working-hours endpoints, where every failure is a plain 401.
    ///
    /// # Errors
    ///
    /// `Unauthorized` on a missing or unknown token, `Backend` on lookup
    /// failure.
    pub async fn authenticate_lenient(
        &self,
        token: Option<&str>,
    ) -> Result<RestaurantRecord, ApiError> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Err(ApiError::Unauthorized("Unauthorized".to_string()));
        };
        self.store
            .restaurant_by_token(token)
            .await
            .map_err(|_| ApiError::Backend("Database error".to_string()))?
            .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))
    }

    /// Reopens the restaurant.
    ///
    /// # Errors
    ///
    /// Token errors as [`Self::authenticate`]; `Backend` on write failure.
    pub async fn open(&self, token: Option<&str>) -> Result<String, ApiError> {
        let restaurant = self.authenticate(token).await?;
        self.store
            .update_restaurant_status(&restaurant.restaurant_id, RestaurantStatus::Open, None)
            .await
            .map_err(|_| ApiError::Backend("Database error".to_string()))?;

        tracing::info!(restaurant_id = %restaurant.restaurant_id, "restaurant opened");
        Ok("Restaurant is now open".to_string())
    }

    /// Closes the restaurant for one of the allowed time-off durations.
    ///
    /// # Errors
    ///
    /// Token errors as [`Self::authenticate`]; `InvalidInput` when the
    /// duration is not 15/30/45; `Backend` on write failure.
    pub async fn close(
        &self,
        token: Option<&str>,
        time_off_amount: Option<i64>,
    ) -> Result<String, ApiError> {
        let restaurant = self.authenticate(token).await?;

        let Some(minutes) = time_off_amount.filter(|m| TIME_OFF_AMOUNTS.contains(m)) else {
            return Err(ApiError::InvalidInput(
                "Invalid timeOffAmount. Must be one of: 15, 30, 45".to_string(),
            ));
        };

        self.store
            .update_restaurant_status(
                &restaurant.restaurant_id,
                RestaurantStatus::Closed,
                Some(minutes),
            )
            .await
            .map_err(|_| ApiError::Backend("Database error".to_string()))?;

        tracing::info!(
            restaurant_id = %restaurant.restaurant_id,
            minutes,
            "restaurant closed"
        );
        Ok(format!("Restaurant closed for {minutes} minutes"))
    }

    /// Returns the weekly restaurant and courier hours.
    ///
    /// # Errors
    ///
    /// Token errors as [`Self::authenticate_lenient`].
    pub async fn hours(
        &self,
        token: Option<&str>,
    ) -> Result<(Vec<DaySchedule>, Vec<DaySchedule>), ApiError> {
        let restaurant = self.authenticate_lenient(token).await?;
        Ok((restaurant.working_hours, restaurant.courier_hours))
    }

    /// Merges submitted day entries into the stored week and persists it.
    ///
    /// Entries without a numeric day 0–6 are ignored, matching the
    /// emulated platform. `startTime`/`endTime` default to empty strings;
    /// `closed` may sit on the entry or nested under `workingHours`.
    ///
    /// # Errors
    ///
    /// Token errors as [`Self::authenticate_lenient`]; `Backend` on write
    /// failure.
    pub async fn update_hours(
        &self,
        token: Option<&str>,
        items: &[Value],
    ) -> Result<String, ApiError> {
        let restaurant = self.authenticate_lenient(token).await?;

        let mut week = restaurant.working_hours;
        for item in items {
            let Some(day) = item.get("day").and_then(Value::as_i64) else {
                continue;
            };
            if !(0..=6).contains(&day) {
                continue;
            }
            let nested = item.get("workingHours");
            let start_time = nested
                .and_then(|w| w.get("startTime"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            let end_time = nested
                .and_then(|w| w.get("endTime"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            let closed = item
                .get("closed")
                .and_then(Value::as_bool)
                .or_else(|| nested.and_then(|w| w.get("closed")).and_then(Value::as_bool))
                .unwrap_or(false);

            if let Some(entry) = week.iter_mut().find(|e| e.day == day) {
                entry.working_hours = WorkingWindow {
                    start_time: start_time.to_string(),
                    end_time: end_time.to_string(),
                    closed,
                };
            }
        }

        self.store
            .update_restaurant_hours(&restaurant.restaurant_id, &week)
            .await
            .map_err(|_| ApiError::Backend("Database error".to_string()))?;

        tracing::info!(restaurant_id = %restaurant.restaurant_id, "working hours updated");
        Ok("Working hours updated successfully".to_string())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    const TOKEN: &str = "mock-jwt-token-abc123xyz";

    fn make_service() -> GetirService {
        GetirService::new(Arc::new(MemoryStore::seeded()))
    }

    #[tokio::test]
    async fn login_returns_grant_for_matching_secret_pair() {
        let service = make_service();
        let Ok(grant) = service
            .login(Some("yourAppSecretKey"), Some("yourRestaurantSecretKey"))
            .await
        else {
            panic!("login should succeed");
        };
        assert_eq!(grant.restaurant_id, "mock-restaurant-123");
        assert_eq!(grant.token, TOKEN);
    }

    #[tokio::test]
    async fn login_rejects_wrong_or_missing_secrets() {
        let service = make_service();
        let Err(ApiError::Unauthorized(msg)) = service
            .login(Some("wrong"), Some("yourRestaurantSecretKey"))
            .await
        else {
            panic!("expected unauthorized");
        };
        assert_eq!(msg, "Invalid credentials");

        let Err(ApiError::InvalidInput(msg)) =
            service.login(None, Some("yourRestaurantSecretKey")).await
        else {
            panic!("expected invalid input");
        };
        assert_eq!(msg, "Missing required fields");
    }

    #[tokio::test]
    async fn token_errors_split_between_missing_and_invalid() {
        let service = make_service();
        let Err(ApiError::InvalidInput(msg)) = service.authenticate(None).await else {
            panic!("expected invalid input");
        };
        assert_eq!(msg, "Missing token");

        let Err(ApiError::Unauthorized(msg)) = service.authenticate(Some("forged")).await else {
            panic!("expected unauthorized");
        };
        assert_eq!(msg, "Invalid token");
    }

    #[tokio::test]
    async fn close_validates_the_time_off_set() {
        let service = make_service();
        let Err(ApiError::InvalidInput(msg)) = service.close(Some(TOKEN), Some(20)).await else {
            panic!("expected invalid input");
        };
        assert_eq!(msg, "Invalid timeOffAmount. Must be one of: 15, 30, 45");

        // The stored status is unchanged.
        let Ok(restaurant) = service.authenticate(Some(TOKEN)).await else {
            panic!("restaurant should resolve");
        };
        assert_eq!(restaurant.status, RestaurantStatus::Open);
    }

    #[tokio::test]
    async fn close_then_open_round_trips_status() {
        let service = make_service();
        let Ok(message) = service.close(Some(TOKEN), Some(45)).await else {
            panic!("close should succeed");
        };
        assert_eq!(message, "Restaurant closed for 45 minutes");

        let Ok(restaurant) = service.authenticate(Some(TOKEN)).await else {
            panic!("restaurant should resolve");
        };
        assert_eq!(restaurant.status, RestaurantStatus::Closed);
        assert_eq!(restaurant.time_off_amount, Some(45));
        assert!(restaurant.is_status_changed_by_user);

        let Ok(message) = service.open(Some(TOKEN)).await else {
            panic!("open should succeed");
        };
        assert_eq!(message, "Restaurant is now open");

        let Ok(restaurant) = service.authenticate(Some(TOKEN)).await else {
            panic!("restaurant should resolve");
        };
        assert_eq!(restaurant.status, RestaurantStatus::Open);
        assert_eq!(restaurant.closed_source, 0);
    }

    #[tokio::test]
    async fn seven_day_schedule_round_trips_in_day_order() {
        let service = make_service();
        let items: Vec<Value> = (0..7)
            .map(|day| {
                json!({
                    "day": day,
                    "workingHours": {
                        "startTime": format!("0{day}:00"),
                        "endTime": "22:00",
                        "closed": false,
                    },
                })
            })
            .collect();

        let Ok(_) = service.update_hours(Some(TOKEN), &items).await else {
            panic!("update should succeed");
        };

        let Ok((week, _courier)) = service.hours(Some(TOKEN)).await else {
            panic!("hours should resolve");
        };
        assert_eq!(week.len(), 7);
        for (i, entry) in week.iter().enumerate() {
            assert_eq!(entry.day, i as i64);
            assert_eq!(entry.working_hours.start_time, format!("0{i}:00"));
            assert_eq!(entry.working_hours.end_time, "22:00");
        }
    }

    #[tokio::test]
    async fn out_of_range_days_are_ignored() {
        let service = make_service();
        let items = vec![
            json!({"day": 9, "workingHours": {"startTime": "00:00", "endTime": "01:00"}}),
            json!({"day": "monday"}),
            json!({"day": 2, "closed": true}),
        ];
        let Ok(_) = service.update_hours(Some(TOKEN), &items).await else {
            panic!("update should succeed");
        };

        let Ok((week, _)) = service.hours(Some(TOKEN)).await else {
            panic!("hours should resolve");
        };
        let Some(tuesday) = week.iter().find(|e| e.day == 2) else {
            panic!("day 2 should exist");
        };
        assert!(tuesday.working_hours.closed);
        // Untouched day keeps the seeded window.
        let Some(monday) = week.iter().find(|e| e.day == 1) else {
            panic!("day 1 should exist");
        };
        assert_eq!(monday.working_hours.start_time, "09:00");
    }

    #[tokio::test]
    async fn working_hours_auth_is_plain_unauthorized() {
        let service = make_service();
        let Err(ApiError::Unauthorized(msg)) = service.hours(None).await else {
            panic!("expected unauthorized");
        };
        assert_eq!(msg, "Unauthorized");
    }
}
