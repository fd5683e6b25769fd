pub mod sqlite_artist_repo;
pub mod sqlite_show_repo;
pub mod sqlite_venue_repo;

pub mod postgres_artist_repo;
pub mod postgres_show_repo;
pub mod postgres_venue_repo;

/// Shows joined with both ends of the booking; callers append WHERE/ORDER BY.
pub(crate) const SHOW_LISTING_SELECT: &str = "SELECT s.id, s.artist_id, a.name AS artist_name, \
    a.image_link AS artist_image_link, s.venue_id, v.name AS venue_name, \
    v.image_link AS venue_image_link, s.start_time \
    FROM shows s \
    JOIN artists a ON a.id = s.artist_id \
    JOIN venues v ON v.id = s.venue_id";

/// Wraps a search term for a `LIKE ... ESCAPE '\'` partial match.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .replace('\\', r"\\")
        .replace('%', r"\%")
        .replace('_', r"\_");
    format!("%{}%", escaped)
}

/// Unicode case-insensitive partial match. SQLite's `LIKE` and `lower()` only
/// fold ASCII, so SQLite searches filter with this instead.
pub(crate) fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.trim().to_lowercase())
}
