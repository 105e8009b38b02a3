//! PostgreSQL implementation of the `PlatformStore` interface.
//!
//! One table per platform, equality-filtered selects and updates keyed by
//! the identity columns. List fields live in JSON-encoded TEXT columns and
//! `changeable` is a loosely-typed TEXT column; rows go through the
//! [`crate::domain::codec`] helpers on read so inconsistently encoded
//! seed data still decodes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{PlatformStore, StorageError};
use crate::domain::codec::{coerce_bool, coerce_i64, decode_json_list, encode_json_list};
use crate::domain::{
    AvailabilityState, AvailabilityUpdate, DaySchedule, RestaurantRecord, RestaurantStatus,
    StoreRecord, StoreWorkingHours, VendorRecord, WorkingStatus,
};

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw `deliveryhero_restaurants` row before column coercion.
#[derive(Debug, sqlx::FromRow)]
struct VendorRow {
    chain_code: String,
    pos_vendor_id: String,
    platform_restaurant_id: String,
    username: String,
    password: String,
    access_token: String,
    platform_id: String,
    platform_type: String,
    platform_key: String,
    availability_state: String,
    changeable: String,
    closing_reason: Option<String>,
    closing_minutes: String,
    closed_until: Option<DateTime<Utc>>,
    next_opening_at: Option<DateTime<Utc>>,
    availability_states: String,
    closing_reasons: String,
}

const VENDOR_COLUMNS: &str = "chain_code, pos_vendor_id, platform_restaurant_id, username, \
     password, access_token, platform_id, platform_type, platform_key, availability_state, \
     changeable, closing_reason, closing_minutes, closed_until, next_opening_at, \
     availability_states, closing_reasons";

impl VendorRow {
    /// Normalizes the loosely-typed columns into the domain record.
    fn decode(self) -> VendorRecord {
        let availability_state = self
            .availability_state
            .parse()
            .unwrap_or(AvailabilityState::Unknown);
        let availability_states = decode_json_list::<String>(&self.availability_states)
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        VendorRecord {
            chain_code: self.chain_code,
            pos_vendor_id: self.pos_vendor_id,
            platform_restaurant_id: self.platform_restaurant_id,
            username: self.username,
            password: self.password,
            access_token: self.access_token,
            platform_id: self.platform_id,
            platform_type: self.platform_type,
            platform_key: self.platform_key,
            availability_state,
            changeable: coerce_bool(&self.changeable),
            closing_reason: self.closing_reason,
            closing_minutes: coerce_i64(&self.closing_minutes, 30),
            closed_until: self.closed_until,
            next_opening_at: self.next_opening_at,
            availability_states,
            closing_reasons: decode_json_list(&self.closing_reasons),
        }
    }
}

/// Raw `getir_restaurants` row.
#[derive(Debug, sqlx::FromRow)]
struct RestaurantRow {
    restaurant_id: String,
    app_secret_key: String,
    restaurant_secret_key: String,
    token: String,
    name: String,
    average_preparation_time: i64,
    status: i32,
    is_courier_available: bool,
    is_status_changed_by_user: bool,
    closed_source: i64,
    time_off_amount: Option<i64>,
    working_hours: String,
    courier_hours: String,
}

const RESTAURANT_COLUMNS: &str = "restaurant_id, app_secret_key, restaurant_secret_key, token, \
     name, average_preparation_time, status, is_courier_available, is_status_changed_by_user, \
     closed_source, time_off_amount, working_hours, courier_hours";

impl RestaurantRow {
    fn decode(self) -> RestaurantRecord {
        RestaurantRecord {
            restaurant_id: self.restaurant_id,
            app_secret_key: self.app_secret_key,
            restaurant_secret_key: self.restaurant_secret_key,
            token: self.token,
            name: self.name,
            average_preparation_time: self.average_preparation_time,
            status: RestaurantStatus::from_code(self.status),
            is_courier_available: self.is_courier_available,
            is_status_changed_by_user: self.is_status_changed_by_user,
            closed_source: self.closed_source,
            time_off_amount: self.time_off_amount,
            working_hours: decode_json_list(&self.working_hours),
            courier_hours: decode_json_list(&self.courier_hours),
        }
    }
}

/// Raw `trendyol_restaurants` row.
#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: i64,
    supplier_id: i64,
    integrator: String,
    api_key: String,
    api_secret: String,
    name: String,
    address: String,
    longitude: String,
    latitude: String,
    phone_number: String,
    email: String,
    working_status: String,
    average_order_preparation_time_in_min: i64,
    delivery_type: String,
    creation_date: i64,
    last_modified_date: i64,
    working_hours: String,
}

const STORE_COLUMNS: &str = "id, supplier_id, integrator, api_key, api_secret, name, address, \
     longitude, latitude, phone_number, email, working_status, \
     average_order_preparation_time_in_min, delivery_type, creation_date, last_modified_date, \
     working_hours";

impl StoreRow {
    fn decode(self) -> StoreRecord {
        StoreRecord {
            id: self.id,
            supplier_id: self.supplier_id,
            integrator: self.integrator,
            api_key: self.api_key,
            api_secret: self.api_secret,
            name: self.name,
            address: self.address,
            longitude: self.longitude,
            latitude: self.latitude,
            phone_number: self.phone_number,
            email: self.email,
            working_status: self.working_status.parse().unwrap_or(WorkingStatus::Closed),
            average_order_preparation_time_in_min: self.average_order_preparation_time_in_min,
            delivery_type: self.delivery_type,
            creation_date: self.creation_date,
            last_modified_date: self.last_modified_date,
            working_hours: decode_json_list(&self.working_hours),
        }
    }
}

fn backend_err<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Backend(e.to_string())
}

#[async_trait]
impl PlatformStore for PostgresStore {
    async fn vendor_by_username(
        &self,
        username: &str,
    ) -> Result<Option<VendorRecord>, StorageError> {
        let row = sqlx::query_as::<_, VendorRow>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM deliveryhero_restaurants WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_err)?;

        Ok(row.map(VendorRow::decode))
    }

    async fn vendor_token_exists(&self, token: &str) -> Result<bool, StorageError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM deliveryhero_restaurants WHERE access_token = $1",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(backend_err)?;

        Ok(count > 0)
    }

    async fn vendors_by_key(
        &self,
        chain_code: &str,
        pos_vendor_id: &str,
    ) -> Result<Vec<VendorRecord>, StorageError> {
        let rows = sqlx::query_as::<_, VendorRow>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM deliveryhero_restaurants \
             WHERE chain_code = $1 AND pos_vendor_id = $2"
        ))
        .bind(chain_code)
        .bind(pos_vendor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(backend_err)?;

        Ok(rows.into_iter().map(VendorRow::decode).collect())
    }

    async fn vendor_by_identity(
        &self,
        chain_code: &str,
        pos_vendor_id: &str,
        platform_restaurant_id: &str,
    ) -> Result<Option<VendorRecord>, StorageError> {
        let row = sqlx::query_as::<_, VendorRow>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM deliveryhero_restaurants \
             WHERE chain_code = $1 AND pos_vendor_id = $2 AND platform_restaurant_id = $3"
        ))
        .bind(chain_code)
        .bind(pos_vendor_id)
        .bind(platform_restaurant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_err)?;

        Ok(row.map(VendorRow::decode))
    }

    async fn update_vendor_availability(
        &self,
        chain_code: &str,
        pos_vendor_id: &str,
        platform_restaurant_id: &str,
        update: &AvailabilityUpdate,
    ) -> Result<(), StorageError> {
        // COALESCE keeps columns untouched when the request omitted them.
        sqlx::query(
            "UPDATE deliveryhero_restaurants SET \
                 availability_state = $1, \
                 closing_reason = COALESCE($2, closing_reason), \
                 closing_minutes = COALESCE($3, closing_minutes), \
                 closed_until = COALESCE($4, closed_until), \
                 next_opening_at = COALESCE($4, next_opening_at) \
             WHERE chain_code = $5 AND pos_vendor_id = $6 AND platform_restaurant_id = $7",
        )
        .bind(update.availability_state.as_str())
        .bind(update.closing_reason.as_deref())
        .bind(update.closing_minutes.map(|m| m.to_string()))
        .bind(update.closed_until)
        .bind(chain_code)
        .bind(pos_vendor_id)
        .bind(platform_restaurant_id)
        .execute(&self.pool)
        .await
        .map_err(backend_err)?;

        Ok(())
    }

    async fn restaurant_by_secret(
        &self,
        restaurant_secret_key: &str,
    ) -> Result<Option<RestaurantRecord>, StorageError> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM getir_restaurants WHERE restaurant_secret_key = $1"
        ))
        .bind(restaurant_secret_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_err)?;

        Ok(row.map(RestaurantRow::decode))
    }

    async fn restaurant_by_token(
        &self,
        token: &str,
    ) -> Result<Option<RestaurantRecord>, StorageError> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM getir_restaurants WHERE token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_err)?;

        Ok(row.map(RestaurantRow::decode))
    }

    async fn update_restaurant_status(
        &self,
        restaurant_id: &str,
        status: RestaurantStatus,
        time_off_amount: Option<i64>,
    ) -> Result<(), StorageError> {
        let closed_source: i64 = match status {
            RestaurantStatus::Open => 0,
            RestaurantStatus::Closed => 1,
        };
        sqlx::query(
            "UPDATE getir_restaurants SET \
                 status = $1, is_status_changed_by_user = TRUE, \
                 time_off_amount = $2, closed_source = $3 \
             WHERE restaurant_id = $4",
        )
        .bind(status.code())
        .bind(time_off_amount)
        .bind(closed_source)
        .bind(restaurant_id)
        .execute(&self.pool)
        .await
        .map_err(backend_err)?;

        Ok(())
    }

    async fn update_restaurant_hours(
        &self,
        restaurant_id: &str,
        hours: &[DaySchedule],
    ) -> Result<(), StorageError> {
        let encoded = encode_json_list(hours).map_err(backend_err)?;
        sqlx::query("UPDATE getir_restaurants SET working_hours = $1 WHERE restaurant_id = $2")
            .bind(encoded)
            .bind(restaurant_id)
            .execute(&self.pool)
            .await
            .map_err(backend_err)?;

        Ok(())
    }

    async fn stores_by_supplier(
        &self,
        supplier_id: i64,
    ) -> Result<Vec<StoreRecord>, StorageError> {
        let rows = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {STORE_COLUMNS} FROM trendyol_restaurants WHERE supplier_id = $1 ORDER BY id"
        ))
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await
        .map_err(backend_err)?;

        Ok(rows.into_iter().map(StoreRow::decode).collect())
    }

    async fn store_by_identity(
        &self,
        supplier_id: i64,
        store_id: i64,
        integrator: &str,
        api_key: &str,
        api_secret: &str,
    ) -> Result<Option<StoreRecord>, StorageError> {
        let row = sqlx::query_as::<_, StoreRow>(&format!(
            "SELECT {STORE_COLUMNS} FROM trendyol_restaurants \
             WHERE supplier_id = $1 AND id = $2 AND integrator = $3 \
               AND api_key = $4 AND api_secret = $5"
        ))
        .bind(supplier_id)
        .bind(store_id)
        .bind(integrator)
        .bind(api_key)
        .bind(api_secret)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_err)?;

        Ok(row.map(StoreRow::decode))
    }

    async fn update_store_status(
        &self,
        supplier_id: i64,
        store_id: i64,
        status: WorkingStatus,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE trendyol_restaurants SET working_status = $1, last_modified_date = $2 \
             WHERE supplier_id = $3 AND id = $4",
        )
        .bind(status.as_str())
        .bind(Utc::now().timestamp_millis())
        .bind(supplier_id)
        .bind(store_id)
        .execute(&self.pool)
        .await
        .map_err(backend_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_store_hours(
        &self,
        supplier_id: i64,
        store_id: i64,
        integrator: &str,
        api_key: &str,
        api_secret: &str,
        hours: &[StoreWorkingHours],
    ) -> Result<bool, StorageError> {
        let encoded = encode_json_list(hours).map_err(backend_err)?;
        let result = sqlx::query(
            "UPDATE trendyol_restaurants SET working_hours = $1, last_modified_date = $2 \
             WHERE supplier_id = $3 AND id = $4 AND integrator = $5 \
               AND api_key = $6 AND api_secret = $7",
        )
        .bind(encoded)
        .bind(Utc::now().timestamp_millis())
        .bind(supplier_id)
        .bind(store_id)
        .bind(integrator)
        .bind(api_key)
        .bind(api_secret)
        .execute(&self.pool)
        .await
        .map_err(backend_err)?;

        Ok(result.rows_affected() > 0)
    }
}
