use crate::domain::{models::venue::{Venue, VenueFields}, ports::VenueRepository};
use crate::error::AppError;
use crate::infra::repositories::name_matches;
use async_trait::async_trait;
use sqlx::{types::Json, SqlitePool};

pub struct SqliteVenueRepo {
    pool: SqlitePool,
}

impl SqliteVenueRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueRepository for SqliteVenueRepo {
    async fn create(&self, fields: &VenueFields) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            r#"INSERT INTO venues (
                name, address, city, state, phone, website_link, image_link,
                facebook_link, genres, seeking_talent, seeking_description
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&fields.name)
            .bind(&fields.address)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.phone)
            .bind(&fields.website_link)
            .bind(&fields.image_link)
            .bind(&fields.facebook_link)
            .bind(Json(&fields.genres))
            .bind(fields.seeking_talent)
            .bind(&fields.seeking_description)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Venue>, AppError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Venue>, AppError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<Venue>, AppError> {
        let venues = sqlx::query_as::<_, Venue>("SELECT * FROM venues ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(venues.into_iter().filter(|row| name_matches(&row.name, term)).collect())
    }

    async fn update(&self, id: i64, fields: &VenueFields) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            r#"UPDATE venues SET
                name=?, address=?, city=?, state=?, phone=?, website_link=?,
                image_link=?, facebook_link=?, genres=?, seeking_talent=?, seeking_description=?
               WHERE id=? RETURNING *"#
        )
            .bind(&fields.name)
            .bind(&fields.address)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.phone)
            .bind(&fields.website_link)
            .bind(&fields.image_link)
            .bind(&fields.facebook_link)
            .bind(Json(&fields.genres))
            .bind(fields.seeking_talent)
            .bind(&fields.seeking_description)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM shows WHERE venue_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Venue {} not found", id)));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
