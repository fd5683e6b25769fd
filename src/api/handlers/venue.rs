use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use crate::state::AppState;
use crate::api::dtos::requests::SearchRequest;
use crate::api::handlers::{form_context, home::home_with_notice, parse_id, FormPage};
use crate::domain::services::{
    aggregator::{aggregate_areas, summarize_venues},
    classifier::{classify_shows, ShowOwner},
    forms::{parse_venue, FieldErrors, FormData},
};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tera::Context;
use tracing::{error, info, warn};

const VENUE_FIELDS: [&str; 9] = [
    "name", "city", "state", "address", "phone",
    "image_link", "facebook_link", "website_link", "seeking_description",
];

fn render_venue_form(
    state: &AppState,
    page: FormPage<'_>,
    form: &FormData,
    errors: &FieldErrors,
    status: StatusCode,
) -> Result<Response, AppError> {
    let mut ctx = form_context(&page, form, &VENUE_FIELDS, errors);
    ctx.insert("seeking", &form.flag("seeking_talent"));
    let html = state.render("forms/venue.html", &ctx)?;
    Ok((status, html).into_response())
}

pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let venues = state.venue_repo.list().await?;
    let shows = state.show_repo.list().await?;

    let areas = aggregate_areas(&venues, &shows, now)?;

    let mut ctx = Context::new();
    ctx.insert("areas", &areas);
    state.render("pages/venues.html", &ctx)
}

pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<SearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let term = payload.term();
    let venues = state.venue_repo.search_by_name(term).await?;
    let shows = state.show_repo.list().await?;

    let results = summarize_venues(&venues, &shows, now);
    info!("Venue search '{}' matched {}", term, results.count);

    let mut ctx = Context::new();
    ctx.insert("results", &results);
    ctx.insert("search_term", term);
    state.render("pages/search_venues.html", &ctx)
}

pub async fn show_venue(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let venue_id = parse_id(&raw_id, "Venue")?;
    let now = Utc::now();
    let venue = state.venue_repo.find_by_id(venue_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", venue_id)))?;
    let shows = state.show_repo.list_by_venue(venue_id).await?;

    let classified = classify_shows(&shows, ShowOwner::Venue, now);

    let mut ctx = Context::new();
    ctx.insert("venue", &venue);
    ctx.insert("past_shows_count", &classified.past.len());
    ctx.insert("upcoming_shows_count", &classified.upcoming.len());
    ctx.insert("shows", &classified);
    state.render("pages/show_venue.html", &ctx)
}

pub async fn create_venue_form(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let page = FormPage { title: "List a new venue", action: "/venues/create", submit_label: "Create Venue" };
    render_venue_form(&state, page, &FormData::default(), &FieldErrors::default(), StatusCode::OK)
}

pub async fn create_venue_submission(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = FormData::from_pairs(pairs);

    let fields = match parse_venue(&form) {
        Ok(fields) => fields,
        Err(errors) => {
            warn!("Venue form rejected: {}", errors.summary());
            let page = FormPage { title: "List a new venue", action: "/venues/create", submit_label: "Create Venue" };
            return render_venue_form(&state, page, &form, &errors, StatusCode::UNPROCESSABLE_ENTITY);
        }
    };

    match state.venue_repo.create(&fields).await {
        Ok(venue) => {
            info!("Venue created: {} ({})", venue.name, venue.id);
            home_with_notice(&state, &format!("Venue {} was successfully listed!", venue.name), StatusCode::OK)
        }
        Err(e) => {
            error!("Failed to create venue {}: {}", fields.name, e);
            home_with_notice(
                &state,
                &format!("An error occurred. Venue {} could not be listed.", fields.name),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

pub async fn edit_venue(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let venue_id = parse_id(&raw_id, "Venue")?;
    let venue = state.venue_repo.find_by_id(venue_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", venue_id)))?;

    let action = format!("/venues/{}/edit", venue_id);
    let page = FormPage { title: "Edit venue", action: &action, submit_label: "Save" };
    render_venue_form(&state, page, &FormData::from(&venue), &FieldErrors::default(), StatusCode::OK)
}

pub async fn edit_venue_submission(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let venue_id = parse_id(&raw_id, "Venue")?;
    state.venue_repo.find_by_id(venue_id).await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", venue_id)))?;

    let form = FormData::from_pairs(pairs);
    match parse_venue(&form) {
        Ok(fields) => {
            let updated = state.venue_repo.update(venue_id, &fields).await?;
            info!("Venue updated: {} ({})", updated.name, updated.id);
            Ok(Redirect::to(&format!("/venues/{}", venue_id)).into_response())
        }
        Err(errors) => {
            warn!("Venue {} edit rejected: {}", venue_id, errors.summary());
            let action = format!("/venues/{}/edit", venue_id);
            let page = FormPage { title: "Edit venue", action: &action, submit_label: "Save" };
            render_venue_form(&state, page, &form, &errors, StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let venue_id = parse_id(&raw_id, "Venue")?;
    state.venue_repo.delete(venue_id).await?;
    info!("Venue deleted: {}", venue_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
