use crate::domain::models::show::ShowListing;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whose shows are being classified. The projected record always describes
/// the other end of the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOwner {
    Venue,
    Artist,
}

impl ShowOwner {
    pub fn owner_id(&self, show: &ShowListing) -> i64 {
        match self {
            ShowOwner::Venue => show.venue_id,
            ShowOwner::Artist => show.artist_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowSummary {
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: String,
}

impl ShowSummary {
    fn project(show: &ShowListing, owner: ShowOwner) -> Self {
        let (counterpart_id, counterpart_name, counterpart_image_link) = match owner {
            ShowOwner::Venue => (show.artist_id, &show.artist_name, &show.artist_image_link),
            ShowOwner::Artist => (show.venue_id, &show.venue_name, &show.venue_image_link),
        };

        Self {
            counterpart_id,
            counterpart_name: counterpart_name.clone(),
            counterpart_image_link: counterpart_image_link.clone(),
            start_time: show.start_time.format(START_TIME_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedShows {
    pub past: Vec<ShowSummary>,
    pub upcoming: Vec<ShowSummary>,
}

/// Splits one venue's or artist's shows around `now`, keeping retrieval
/// order inside each half. A show starting exactly at `now` is upcoming.
pub fn classify_shows(shows: &[ShowListing], owner: ShowOwner, now: DateTime<Utc>) -> ClassifiedShows {
    let mut classified = ClassifiedShows::default();

    for show in shows {
        let summary = ShowSummary::project(show, owner);
        if show.start_time < now {
            classified.past.push(summary);
        } else {
            classified.upcoming.push(summary);
        }
    }

    classified
}

pub fn count_upcoming(shows: &[ShowListing], owner: ShowOwner, now: DateTime<Utc>) -> usize {
    classify_shows(shows, owner, now).upcoming.len()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    pub fn listing(id: i64, artist_id: i64, venue_id: i64, start_time: DateTime<Utc>) -> ShowListing {
        ShowListing {
            id,
            artist_id,
            artist_name: format!("Artist {}", artist_id),
            artist_image_link: Some(format!("https://img.example.com/artists/{}.jpg", artist_id)),
            venue_id,
            venue_name: format!("Venue {}", venue_id),
            venue_image_link: None,
            start_time,
        }
    }
}
