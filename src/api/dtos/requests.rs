use serde::Deserialize;

#[derive(Deserialize)]
pub struct SearchRequest {
    pub search_term: Option<String>,
}

impl SearchRequest {
    pub fn term(&self) -> &str {
        self.search_term.as_deref().map(str::trim).unwrap_or_default()
    }
}
