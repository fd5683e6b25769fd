use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
    #[error("Malformed reference: {0}")]
    MalformedReference(String),
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<!doctype html><html><head><title>{code} {title}</title></head>\
         <body><h1>{code} {title}</h1><p>{message}</p><a href=\"/\">Back to Fyyur</a></body></html>",
        code = status.as_u16(),
        title = title,
        message = escape_html(message),
    );
    (status, Html(body)).into_response()
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let code = db_err.code().unwrap_or_default();

                    // 2067 / 787 = SQLite unique / foreign key constraint
                    // 23505 / 23503 = PostgreSQL unique / foreign key violation
                    if matches!(code.as_ref(), "2067" | "787" | "23505" | "23503") {
                        return error_page(
                            StatusCode::CONFLICT,
                            "The listing conflicts with existing data.",
                        );
                    }
                }

                error!("Database error: {:?}", e);
                error_page(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::NotFound(msg) => error_page(StatusCode::NOT_FOUND, msg),
            AppError::Template(e) => {
                error!("Template error: {:?}", e);
                error_page(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::MalformedReference(msg) => {
                error!("Malformed reference: {}", msg);
                error_page(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
