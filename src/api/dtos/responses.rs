use crate::domain::models::{artist::Artist, show::ShowListing};
use crate::domain::services::classifier::START_TIME_FORMAT;
use serde::Serialize;

#[derive(Serialize)]
pub struct ArtistRow {
    pub id: i64,
    pub name: String,
}

impl From<&Artist> for ArtistRow {
    fn from(artist: &Artist) -> Self {
        Self { id: artist.id, name: artist.name.clone() }
    }
}

#[derive(Serialize)]
pub struct ShowRow {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<&ShowListing> for ShowRow {
    fn from(show: &ShowListing) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name.clone(),
            artist_id: show.artist_id,
            artist_name: show.artist_name.clone(),
            artist_image_link: show.artist_image_link.clone(),
            start_time: show.start_time.format(START_TIME_FORMAT).to_string(),
        }
    }
}
