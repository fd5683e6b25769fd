use crate::domain::{models::venue::{Venue, VenueFields}, ports::VenueRepository};
use crate::error::AppError;
use crate::infra::repositories::like_pattern;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

pub struct PostgresVenueRepo {
    pool: PgPool,
}

impl PostgresVenueRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueRepository for PostgresVenueRepo {
    async fn create(&self, fields: &VenueFields) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            r#"INSERT INTO venues (
                name, address, city, state, phone, website_link, image_link,
                facebook_link, genres, seeking_talent, seeking_description
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
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
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
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
        sqlx::query_as::<_, Venue>(
            r"SELECT * FROM venues WHERE name ILIKE $1 ESCAPE '\' ORDER BY id ASC",
        )
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, id: i64, fields: &VenueFields) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            r#"UPDATE venues SET
                name=$1, address=$2, city=$3, state=$4, phone=$5, website_link=$6,
                image_link=$7, facebook_link=$8, genres=$9, seeking_talent=$10, seeking_description=$11
               WHERE id=$12 RETURNING *"#
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

        sqlx::query("DELETE FROM shows WHERE venue_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
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
