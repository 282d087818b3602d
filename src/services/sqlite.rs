use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use crate::models::Hotel;

/// Errors that can occur when interacting with the sqlite store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

const CREATE_HOTELS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS hotels (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        district TEXT NOT NULL,
        price REAL NOT NULL,
        rating REAL NOT NULL,
        capacity INTEGER NOT NULL DEFAULT 1,
        amenities TEXT NOT NULL DEFAULT '[]',
        available_from TEXT NOT NULL,
        available_to TEXT NOT NULL
    )
"#;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// sqlite-backed hotel store
///
/// Amenities are kept as a JSON array in a text column and availability
/// dates as ISO `YYYY-MM-DD` text.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database and make sure the schema exists
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        tracing::info!("Connecting to sqlite with URL: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        sqlx::query(CREATE_HOTELS_TABLE).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Load every hotel, ordered by id
    pub async fn load_hotels(&self) -> Result<Vec<Hotel>, StoreError> {
        let query = r#"
            SELECT id, name, district, price, rating, capacity, amenities,
                   available_from, available_to
            FROM hotels
            ORDER BY id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let hotels = rows
            .iter()
            .map(hotel_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} hotels from sqlite", hotels.len());

        Ok(hotels)
    }

    /// Insert hotels, replacing rows with the same id
    pub async fn upsert_hotels(&self, hotels: &[Hotel]) -> Result<u64, StoreError> {
        let query = r#"
            INSERT INTO hotels (id, name, district, price, rating, capacity, amenities,
                                available_from, available_to)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                district = EXCLUDED.district,
                price = EXCLUDED.price,
                rating = EXCLUDED.rating,
                capacity = EXCLUDED.capacity,
                amenities = EXCLUDED.amenities,
                available_from = EXCLUDED.available_from,
                available_to = EXCLUDED.available_to
        "#;

        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for hotel in hotels {
            let amenities = serde_json::to_string(&hotel.amenities)
                .map_err(|e| StoreError::InvalidRow(format!("hotel {}: {}", hotel.id, e)))?;

            let result = sqlx::query(query)
                .bind(hotel.id as i64)
                .bind(&hotel.name)
                .bind(&hotel.district)
                .bind(hotel.price)
                .bind(hotel.rating)
                .bind(hotel.capacity as i64)
                .bind(amenities)
                .bind(hotel.available_from.format(DATE_FORMAT).to_string())
                .bind(hotel.available_to.format(DATE_FORMAT).to_string())
                .execute(&mut *tx)
                .await?;

            written += result.rows_affected();
        }

        tx.commit().await?;

        tracing::info!("Upserted {} hotels into sqlite", written);

        Ok(written)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn hotel_from_row(row: &SqliteRow) -> Result<Hotel, StoreError> {
    let id: i64 = row.try_get("id")?;
    let capacity: i64 = row.try_get("capacity")?;
    let amenities: String = row.try_get("amenities")?;
    let available_from: String = row.try_get("available_from")?;
    let available_to: String = row.try_get("available_to")?;

    let invalid = |what: &str, detail: String| StoreError::InvalidRow(format!("hotel {}: {} {}", id, what, detail));

    Ok(Hotel {
        id: u32::try_from(id).map_err(|e| invalid("id", e.to_string()))?,
        name: row.try_get("name")?,
        district: row.try_get("district")?,
        price: row.try_get("price")?,
        rating: row.try_get("rating")?,
        capacity: u32::try_from(capacity).map_err(|e| invalid("capacity", e.to_string()))?,
        amenities: serde_json::from_str(&amenities).map_err(|e| invalid("amenities", e.to_string()))?,
        available_from: NaiveDate::parse_from_str(&available_from, DATE_FORMAT)
            .map_err(|e| invalid("available_from", e.to_string()))?,
        available_to: NaiveDate::parse_from_str(&available_to, DATE_FORMAT)
            .map_err(|e| invalid("available_to", e.to_string()))?,
    })
}
