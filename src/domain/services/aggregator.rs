use crate::domain::models::{artist::Artist, show::ShowListing, venue::Venue};
use crate::domain::services::classifier::{count_upcoming, ShowOwner};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<ListingSummary>,
}

/// Buckets shows by the venue or artist that owns them, keeping retrieval order.
pub fn group_by_owner(shows: &[ShowListing], owner: ShowOwner) -> HashMap<i64, Vec<ShowListing>> {
    let mut grouped: HashMap<i64, Vec<ShowListing>> = HashMap::new();
    for show in shows {
        grouped.entry(owner.owner_id(show)).or_default().push(show.clone());
    }
    grouped
}

/// Groups venues by (city, state) in first-seen order. Every show must
/// belong to one of `venues`.
pub fn aggregate_areas(
    venues: &[Venue],
    shows: &[ShowListing],
    now: DateTime<Utc>,
) -> Result<Vec<Area>, AppError> {
    let by_venue = group_by_owner(shows, ShowOwner::Venue);

    let known: HashSet<i64> = venues.iter().map(|v| v.id).collect();
    if let Some(orphan) = by_venue.keys().find(|id| !known.contains(*id)) {
        return Err(AppError::MalformedReference(format!(
            "show references venue {} which was not loaded",
            orphan
        )));
    }

    let mut areas: Vec<Area> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for venue in venues {
        let num_upcoming_shows = by_venue
            .get(&venue.id)
            .map(|shows| count_upcoming(shows, ShowOwner::Venue, now))
            .unwrap_or(0);

        let summary = ListingSummary {
            id: venue.id,
            name: venue.name.clone(),
            num_upcoming_shows,
        };

        let key = (venue.city.as_str(), venue.state.as_str());
        if let Some(&i) = index.get(&key) {
            areas[i].venues.push(summary);
        } else {
            index.insert(key, areas.len());
            areas.push(Area {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: vec![summary],
            });
        }
    }

    Ok(areas)
}

fn summarize<'a>(
    entries: impl Iterator<Item = (i64, &'a str)>,
    shows: &[ShowListing],
    owner: ShowOwner,
    now: DateTime<Utc>,
) -> SearchResults {
    let grouped = group_by_owner(shows, owner);

    let data: Vec<ListingSummary> = entries
        .map(|(id, name)| ListingSummary {
            id,
            name: name.to_string(),
            num_upcoming_shows: grouped
                .get(&id)
                .map(|s| count_upcoming(s, owner, now))
                .unwrap_or(0),
        })
        .collect();

    SearchResults { count: data.len(), data }
}

pub fn summarize_venues(venues: &[Venue], shows: &[ShowListing], now: DateTime<Utc>) -> SearchResults {
    summarize(venues.iter().map(|v| (v.id, v.name.as_str())), shows, ShowOwner::Venue, now)
}

pub fn summarize_artists(artists: &[Artist], shows: &[ShowListing], now: DateTime<Utc>) -> SearchResults {
    summarize(artists.iter().map(|a| (a.id, a.name.as_str())), shows, ShowOwner::Artist, now)
}
