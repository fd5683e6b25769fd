use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use crate::state::AppState;
use crate::api::dtos::{requests::SearchRequest, responses::ArtistRow};
use crate::api::handlers::{form_context, home::home_with_notice, parse_id, FormPage};
use crate::domain::services::{
    aggregator::summarize_artists,
    classifier::{classify_shows, ShowOwner},
    forms::{parse_artist, FieldErrors, FormData},
};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tera::Context;
use tracing::{error, info, warn};

const ARTIST_FIELDS: [&str; 8] = [
    "name", "city", "state", "phone",
    "image_link", "facebook_link", "website_link", "seeking_description",
];

fn render_artist_form(
    state: &AppState,
    page: FormPage<'_>,
    form: &FormData,
    errors: &FieldErrors,
    status: StatusCode,
) -> Result<Response, AppError> {
    let mut ctx = form_context(&page, form, &ARTIST_FIELDS, errors);
    ctx.insert("seeking", &form.flag("seeking_venue"));
    let html = state.render("forms/artist.html", &ctx)?;
    Ok((status, html).into_response())
}

pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let artists = state.artist_repo.list().await?;
    let rows: Vec<ArtistRow> = artists.iter().map(ArtistRow::from).collect();

    let mut ctx = Context::new();
    ctx.insert("artists", &rows);
    state.render("pages/artists.html", &ctx)
}

pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<SearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let term = payload.term();
    let artists = state.artist_repo.search_by_name(term).await?;
    let shows = state.show_repo.list().await?;

    let results = summarize_artists(&artists, &shows, now);
    info!("Artist search '{}' matched {}", term, results.count);

    let mut ctx = Context::new();
    ctx.insert("results", &results);
    ctx.insert("search_term", term);
    state.render("pages/search_artists.html", &ctx)
}

pub async fn show_artist(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let artist_id = parse_id(&raw_id, "Artist")?;
    let now = Utc::now();
    let artist = state.artist_repo.find_by_id(artist_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", artist_id)))?;
    let shows = state.show_repo.list_by_artist(artist_id).await?;

    let classified = classify_shows(&shows, ShowOwner::Artist, now);

    let mut ctx = Context::new();
    ctx.insert("artist", &artist);
    ctx.insert("past_shows_count", &classified.past.len());
    ctx.insert("upcoming_shows_count", &classified.upcoming.len());
    ctx.insert("shows", &classified);
    state.render("pages/show_artist.html", &ctx)
}

pub async fn create_artist_form(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let page = FormPage { title: "List a new artist", action: "/artists/create", submit_label: "Create Artist" };
    render_artist_form(&state, page, &FormData::default(), &FieldErrors::default(), StatusCode::OK)
}

pub async fn create_artist_submission(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = FormData::from_pairs(pairs);

    let fields = match parse_artist(&form, state.config.validation_mode) {
        Ok(fields) => fields,
        Err(errors) => {
            warn!("Artist form rejected: {}", errors.summary());
            let page = FormPage { title: "List a new artist", action: "/artists/create", submit_label: "Create Artist" };
            return render_artist_form(&state, page, &form, &errors, StatusCode::UNPROCESSABLE_ENTITY);
        }
    };

    match state.artist_repo.create(&fields).await {
        Ok(artist) => {
            info!("Artist created: {} ({})", artist.name, artist.id);
            home_with_notice(&state, &format!("Artist {} was successfully listed!", artist.name), StatusCode::OK)
        }
        Err(e) => {
            error!("Failed to create artist {}: {}", fields.name, e);
            home_with_notice(
                &state,
                &format!("An error occurred. Artist {} could not be listed.", fields.name),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

pub async fn edit_artist(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let artist_id = parse_id(&raw_id, "Artist")?;
    let artist = state.artist_repo.find_by_id(artist_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", artist_id)))?;

    let action = format!("/artists/{}/edit", artist_id);
    let page = FormPage { title: "Edit artist", action: &action, submit_label: "Save" };
    render_artist_form(&state, page, &FormData::from(&artist), &FieldErrors::default(), StatusCode::OK)
}

pub async fn edit_artist_submission(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let artist_id = parse_id(&raw_id, "Artist")?;
    state.artist_repo.find_by_id(artist_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", artist_id)))?;

    let form = FormData::from_pairs(pairs);
    match parse_artist(&form, state.config.validation_mode) {
        Ok(fields) => {
            let updated = state.artist_repo.update(artist_id, &fields).await?;
            info!("Artist updated: {} ({})", updated.name, updated.id);
            Ok(Redirect::to(&format!("/artists/{}", artist_id)).into_response())
        }
        Err(errors) => {
            warn!("Artist {} edit rejected: {}", artist_id, errors.summary());
            let action = format!("/artists/{}/edit", artist_id);
            let page = FormPage { title: "Edit artist", action: &action, submit_label: "Save" };
            render_artist_form(&state, page, &form, &errors, StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let artist_id = parse_id(&raw_id, "Artist")?;
    state.artist_repo.delete(artist_id).await?;
    info!("Artist deleted: {}", artist_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
