use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use crate::state::AppState;
use crate::api::dtos::responses::ShowRow;
use crate::api::handlers::{form_context, home::home_with_notice, FormPage};
use crate::domain::models::show::ShowFields;
use crate::domain::services::{
    classifier::START_TIME_FORMAT,
    forms::{parse_show, FieldErrors, FormData, MSG_UNKNOWN_REFERENCE},
};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tera::Context;
use tracing::{error, info, warn};

const SHOW_FIELDS: [&str; 3] = ["artist_id", "venue_id", "start_time"];

const CREATE_PAGE: FormPage<'static> = FormPage {
    title: "List a new show",
    action: "/shows/create",
    submit_label: "Create Show",
};

fn render_show_form(
    state: &AppState,
    form: &FormData,
    errors: &FieldErrors,
    status: StatusCode,
) -> Result<Response, AppError> {
    let ctx = form_context(&CREATE_PAGE, form, &SHOW_FIELDS, errors);
    let html = state.render("forms/show.html", &ctx)?;
    Ok((status, html).into_response())
}

/// Field errors for references that do not resolve to a stored row.
async fn check_references(state: &AppState, fields: &ShowFields) -> Result<FieldErrors, AppError> {
    let mut errors = FieldErrors::default();
    if state.artist_repo.find_by_id(fields.artist_id).await?.is_none() {
        errors.push("artist_id", MSG_UNKNOWN_REFERENCE);
    }
    if state.venue_repo.find_by_id(fields.venue_id).await?.is_none() {
        errors.push("venue_id", MSG_UNKNOWN_REFERENCE);
    }
    Ok(errors)
}

pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let shows = state.show_repo.list().await?;
    let rows: Vec<ShowRow> = shows.iter().map(ShowRow::from).collect();

    let mut ctx = Context::new();
    ctx.insert("shows", &rows);
    state.render("pages/shows.html", &ctx)
}

pub async fn create_show_form(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let mut form = FormData::default();
    form.insert("start_time", Utc::now().format(START_TIME_FORMAT).to_string());
    render_show_form(&state, &form, &FieldErrors::default(), StatusCode::OK)
}

pub async fn create_show_submission(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = FormData::from_pairs(pairs);

    let fields = match parse_show(&form) {
        Ok(fields) => fields,
        Err(errors) => {
            warn!("Show form rejected: {}", errors.summary());
            return render_show_form(&state, &form, &errors, StatusCode::UNPROCESSABLE_ENTITY);
        }
    };

    let errors = check_references(&state, &fields).await?;
    if !errors.is_empty() {
        warn!("Show form references unknown rows: {}", errors.summary());
        return render_show_form(&state, &form, &errors, StatusCode::UNPROCESSABLE_ENTITY);
    }

    match state.show_repo.create(&fields).await {
        Ok(show) => {
            info!("Show created: {} (artist {}, venue {})", show.id, show.artist_id, show.venue_id);
            home_with_notice(&state, "Show was successfully listed!", StatusCode::OK)
        }
        Err(e) => {
            error!("Failed to create show: {}", e);
            home_with_notice(
                &state,
                "An error occurred. Show could not be listed.",
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}
