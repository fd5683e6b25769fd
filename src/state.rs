use std::sync::Arc;
use axum::response::Html;
use tera::{Context, Tera};
use crate::config::Config;
use crate::domain::ports::{ArtistRepository, ShowRepository, VenueRepository};
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub venue_repo: Arc<dyn VenueRepository>,
    pub artist_repo: Arc<dyn ArtistRepository>,
    pub show_repo: Arc<dyn ShowRepository>,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn render(&self, template: &str, context: &Context) -> Result<Html<String>, AppError> {
        Ok(Html(self.templates.render(template, context)?))
    }
}
