use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{artist, home, show, venue};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health_check))

        // Venues
        .route("/venues", get(venue::list_venues))
        .route("/venues/search", post(venue::search_venues))
        .route("/venues/create", get(venue::create_venue_form).post(venue::create_venue_submission))
        .route("/venues/{venue_id}", get(venue::show_venue).delete(venue::delete_venue))
        .route("/venues/{venue_id}/edit", get(venue::edit_venue).post(venue::edit_venue_submission))

        // Artists
        .route("/artists", get(artist::list_artists))
        .route("/artists/search", post(artist::search_artists))
        .route("/artists/create", get(artist::create_artist_form).post(artist::create_artist_submission))
        .route("/artists/{artist_id}", get(artist::show_artist).delete(artist::delete_artist))
        .route("/artists/{artist_id}/edit", get(artist::edit_artist).post(artist::edit_artist_submission))

        // Shows
        .route("/shows", get(show::list_shows))
        .route("/shows/create", get(show::create_show_form).post(show::create_show_submission))

        .fallback(home::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
