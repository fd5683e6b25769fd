use axum::{extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use crate::state::AppState;
use crate::error::AppError;
use std::sync::Arc;
use tera::Context;

pub async fn index(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    state.render("pages/home.html", &Context::new())
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn not_found(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let page = state.render("errors/404.html", &Context::new())?;
    Ok((StatusCode::NOT_FOUND, page))
}

/// Home page carrying the outcome of a form submission.
pub(crate) fn home_with_notice(state: &AppState, notice: &str, status: StatusCode) -> Result<Response, AppError> {
    let mut ctx = Context::new();
    ctx.insert("notice", notice);
    ctx.insert("notice_kind", if status.is_success() { "success" } else { "error" });
    let page = state.render("pages/home.html", &ctx)?;
    Ok((status, page).into_response())
}
