use crate::domain::{models::show::{Show, ShowFields, ShowListing}, ports::ShowRepository};
use crate::error::AppError;
use crate::infra::repositories::SHOW_LISTING_SELECT;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteShowRepo {
    pool: SqlitePool,
}

impl SqliteShowRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShowRepository for SqliteShowRepo {
    async fn create(&self, fields: &ShowFields) -> Result<Show, AppError> {
        sqlx::query_as::<_, Show>(
            "INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?) RETURNING *"
        )
            .bind(fields.artist_id)
            .bind(fields.venue_id)
            .bind(fields.start_time)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<ShowListing>, AppError> {
        let sql = format!("{} ORDER BY s.id ASC", SHOW_LISTING_SELECT);
        sqlx::query_as::<_, ShowListing>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_venue(&self, venue_id: i64) -> Result<Vec<ShowListing>, AppError> {
        let sql = format!("{} WHERE s.venue_id = ? ORDER BY s.id ASC", SHOW_LISTING_SELECT);
        sqlx::query_as::<_, ShowListing>(&sql)
            .bind(venue_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_artist(&self, artist_id: i64) -> Result<Vec<ShowListing>, AppError> {
        let sql = format!("{} WHERE s.artist_id = ? ORDER BY s.id ASC", SHOW_LISTING_SELECT);
        sqlx::query_as::<_, ShowListing>(&sql)
            .bind(artist_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
