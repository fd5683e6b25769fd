use fyyur_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    domain::models::{artist::{Artist, ArtistFields}, show::{Show, ShowFields}, venue::{Venue, VenueFields}},
    domain::services::forms::ValidationMode,
    infra::repositories::{
        sqlite_artist_repo::SqliteArtistRepo,
        sqlite_show_repo::SqliteShowRepo,
        sqlite_venue_repo::SqliteVenueRepo,
    },
    infra::templates::load_templates,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
    Router,
};
use chrono::{DateTime, Duration, Utc};
use std::str::FromStr;
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_mode(ValidationMode::Strict).await
    }

    pub async fn with_mode(validation_mode: ValidationMode) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            validation_mode,
        };

        let state = Arc::new(AppState {
            config,
            venue_repo: Arc::new(SqliteVenueRepo::new(pool.clone())),
            artist_repo: Arc::new(SqliteArtistRepo::new(pool.clone())),
            show_repo: Arc::new(SqliteShowRepo::new(pool.clone())),
            templates: Arc::new(load_templates().expect("Failed to load templates")),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        ).await.unwrap();
        read_body(response).await
    }

    pub async fn post_form(&self, uri: &str, pairs: &[(&str, &str)]) -> Response {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();

        self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap()
        ).await.unwrap()
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        ).await.unwrap();
        read_body(response).await
    }

    pub async fn seed_venue(&self, name: &str, city: &str, state: &str) -> Venue {
        self.state.venue_repo.create(&VenueFields {
            name: name.to_string(),
            address: "1015 Folsom Street".to_string(),
            city: city.to_string(),
            state: state.to_string(),
            phone: Some("123-123-1234".to_string()),
            website_link: None,
            image_link: None,
            facebook_link: None,
            genres: vec!["Jazz".to_string()],
            seeking_talent: false,
            seeking_description: None,
        }).await.expect("Failed to seed venue")
    }

    pub async fn seed_artist(&self, name: &str) -> Artist {
        self.state.artist_repo.create(&ArtistFields {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: None,
            website_link: None,
            image_link: Some("https://images.example.com/artist.jpg".to_string()),
            facebook_link: None,
            genres: vec!["Rock n Roll".to_string()],
            seeking_venue: true,
            seeking_description: Some("Looking for shows".to_string()),
        }).await.expect("Failed to seed artist")
    }

    pub async fn seed_show(&self, artist_id: i64, venue_id: i64, start_time: DateTime<Utc>) -> Show {
        self.state.show_repo.create(&ShowFields { artist_id, venue_id, start_time })
            .await
            .expect("Failed to seed show")
    }
}

#[allow(dead_code)]
pub async fn read_body(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[allow(dead_code)]
pub fn days_from_now(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
