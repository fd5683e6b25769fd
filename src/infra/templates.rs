use crate::domain::services::forms::parse_datetime;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tera::{Tera, Value};

const MEDIUM_FORMAT: &str = "%a %m, %d, %Y %-I:%M%p";
const FULL_FORMAT: &str = "%A %B, %-d, %Y at %-I:%M%p";

pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("layouts/main.html", include_str!("../../templates/layouts/main.html")),
        ("macros.html", include_str!("../../templates/macros.html")),
        ("pages/home.html", include_str!("../../templates/pages/home.html")),
        ("pages/venues.html", include_str!("../../templates/pages/venues.html")),
        ("pages/show_venue.html", include_str!("../../templates/pages/show_venue.html")),
        ("pages/search_venues.html", include_str!("../../templates/pages/search_venues.html")),
        ("pages/artists.html", include_str!("../../templates/pages/artists.html")),
        ("pages/show_artist.html", include_str!("../../templates/pages/show_artist.html")),
        ("pages/search_artists.html", include_str!("../../templates/pages/search_artists.html")),
        ("pages/shows.html", include_str!("../../templates/pages/shows.html")),
        ("forms/venue.html", include_str!("../../templates/forms/venue.html")),
        ("forms/artist.html", include_str!("../../templates/forms/artist.html")),
        ("forms/show.html", include_str!("../../templates/forms/show.html")),
        ("errors/404.html", include_str!("../../templates/errors/404.html")),
    ])?;
    tera.register_filter("datetime", datetime_filter);
    Ok(tera)
}

/// `medium` (default) or `full`.
pub fn format_datetime(value: DateTime<Utc>, style: &str) -> String {
    let fmt = if style == "full" { FULL_FORMAT } else { MEDIUM_FORMAT };
    value.format(fmt).to_string()
}

fn datetime_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("datetime filter expects a string"))?;
    let parsed = parse_datetime(raw)
        .ok_or_else(|| tera::Error::msg(format!("'{}' is not a date-time", raw)))?;
    let style = args.get("format").and_then(Value::as_str).unwrap_or("medium");

    Ok(Value::String(format_datetime(parsed, style)))
}
