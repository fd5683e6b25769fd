use crate::domain::models::{
    artist::{Artist, ArtistFields},
    show::{Show, ShowFields, ShowListing},
    venue::{Venue, VenueFields},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn create(&self, fields: &VenueFields) -> Result<Venue, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Venue>, AppError>;
    /// All venues in insertion order.
    async fn list(&self) -> Result<Vec<Venue>, AppError>;
    /// Case-insensitive partial match on the venue name.
    async fn search_by_name(&self, term: &str) -> Result<Vec<Venue>, AppError>;
    async fn update(&self, id: i64, fields: &VenueFields) -> Result<Venue, AppError>;
    /// Removes the venue together with every show booked at it.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait ArtistRepository: Send + Sync {
    async fn create(&self, fields: &ArtistFields) -> Result<Artist, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Artist>, AppError>;
    async fn list(&self) -> Result<Vec<Artist>, AppError>;
    async fn search_by_name(&self, term: &str) -> Result<Vec<Artist>, AppError>;
    async fn update(&self, id: i64, fields: &ArtistFields) -> Result<Artist, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait ShowRepository: Send + Sync {
    async fn create(&self, fields: &ShowFields) -> Result<Show, AppError>;
    async fn list(&self) -> Result<Vec<ShowListing>, AppError>;
    async fn list_by_venue(&self, venue_id: i64) -> Result<Vec<ShowListing>, AppError>;
    async fn list_by_artist(&self, artist_id: i64) -> Result<Vec<ShowListing>, AppError>;
}
