pub mod artist;
pub mod home;
pub mod show;
pub mod venue;

use crate::domain::models::{genre::Genre, state_code::STATE_CODES};
use crate::domain::services::forms::{FieldErrors, FormData};
use crate::error::AppError;
use tera::Context;

pub(crate) struct FormPage<'a> {
    pub title: &'a str,
    pub action: &'a str,
    pub submit_label: &'a str,
}

/// Context for a listing form: submitted values, inline errors and the
/// select choices.
pub(crate) fn form_context(page: &FormPage<'_>, form: &FormData, fields: &[&str], errors: &FieldErrors) -> Context {
    let mut ctx = Context::new();
    ctx.insert("title", page.title);
    ctx.insert("action", page.action);
    ctx.insert("submit_label", page.submit_label);
    ctx.insert("values", &form.text_values(fields));
    ctx.insert("selected_genres", &form.values("genres"));
    ctx.insert("errors", errors);
    if !errors.is_empty() {
        ctx.insert("error_summary", &errors.summary());
    }
    ctx.insert("genre_choices", &Genre::codes());
    ctx.insert("state_choices", &STATE_CODES[..]);
    ctx
}

/// Path ids that are not integers name no record, so they 404 like unknown ids.
pub(crate) fn parse_id(raw: &str, kind: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("{} {} not found", kind, raw)))
}
