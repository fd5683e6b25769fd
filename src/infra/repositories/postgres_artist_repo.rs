use crate::domain::{models::artist::{Artist, ArtistFields}, ports::ArtistRepository};
use crate::error::AppError;
use crate::infra::repositories::like_pattern;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

pub struct PostgresArtistRepo {
    pool: PgPool,
}

impl PostgresArtistRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArtistRepository for PostgresArtistRepo {
    async fn create(&self, fields: &ArtistFields) -> Result<Artist, AppError> {
        sqlx::query_as::<_, Artist>(
            r#"INSERT INTO artists (
                name, city, state, phone, website_link, image_link,
                facebook_link, genres, seeking_venue, seeking_description
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *"#
        )
            .bind(&fields.name)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.phone)
            .bind(&fields.website_link)
            .bind(&fields.image_link)
            .bind(&fields.facebook_link)
            .bind(Json(&fields.genres))
            .bind(fields.seeking_venue)
            .bind(&fields.seeking_description)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Artist>, AppError> {
        sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Artist>, AppError> {
        sqlx::query_as::<_, Artist>("SELECT * FROM artists ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<Artist>, AppError> {
        sqlx::query_as::<_, Artist>(
            r"SELECT * FROM artists WHERE name ILIKE $1 ESCAPE '\' ORDER BY id ASC",
        )
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, id: i64, fields: &ArtistFields) -> Result<Artist, AppError> {
        sqlx::query_as::<_, Artist>(
            r#"UPDATE artists SET
                name=$1, city=$2, state=$3, phone=$4, website_link=$5, image_link=$6,
                facebook_link=$7, genres=$8, seeking_venue=$9, seeking_description=$10
               WHERE id=$11 RETURNING *"#
        )
            .bind(&fields.name)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.phone)
            .bind(&fields.website_link)
            .bind(&fields.image_link)
            .bind(&fields.facebook_link)
            .bind(Json(&fields.genres))
            .bind(fields.seeking_venue)
            .bind(&fields.seeking_description)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM shows WHERE artist_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Artist {} not found", id)));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
