use crate::domain::models::{
    artist::{Artist, ArtistFields},
    genre::Genre,
    show::ShowFields,
    state_code::is_valid_state,
    venue::{Venue, VenueFields},
};
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::LazyLock;
use url::Url;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_URL: &str = "Invalid URL.";
pub const MSG_PHONE: &str = "Invalid phone number.";
pub const MSG_GENRES: &str = "Invalid genres.";
pub const MSG_STATE: &str = "Invalid state.";
pub const MSG_INTEGER: &str = "Not a valid integer value.";
pub const MSG_DATETIME: &str = "Not a valid datetime value.";
pub const MSG_UNKNOWN_REFERENCE: &str = "Not a valid choice.";

// Optional `+CC` or bare `1` country code, optional bracketed area code, then
// digit groups. Separators only ever sit between groups.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:\+[0-9]{1,3}|1)[\s.-]?)?(?:\([0-9]{2,4}\)[\s.-]?)?[0-9]{1,4}(?:[\s.-]?[0-9]{1,4}){1,5}$")
        .expect("phone pattern is valid")
});

const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Which listing kinds get genre/state membership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Venues and artists.
    #[default]
    Strict,
    /// Venues only; artist genres and states are accepted as submitted.
    Legacy,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "legacy" => Ok(ValidationMode::Legacy),
            other => Err(format!("unknown validation mode '{}'", other)),
        }
    }
}

/// One submitted form: field name to every raw value sent under that name.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, Vec<String>>,
}

impl FormData {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        for (name, value) in pairs {
            form.insert(name, value);
        }
        form
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    /// First non-blank value, trimmed.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values(name).into_iter().next()
    }

    /// Every non-blank value, trimmed, in submission order.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.fields
            .get(name)
            .map(|vals| {
                vals.iter()
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Checkbox semantics: present with anything but an explicit "off" value.
    pub fn flag(&self, name: &str) -> bool {
        self.value(name)
            .is_some_and(|v| !matches!(v.to_ascii_lowercase().as_str(), "false" | "off" | "0"))
    }

    /// Text values for re-rendering a form; missing fields map to "".
    pub fn text_values(&self, names: &[&str]) -> BTreeMap<String, String> {
        names
            .iter()
            .map(|name| (name.to_string(), self.value(name).unwrap_or_default().to_string()))
            .collect()
    }

    fn optional(&self, name: &str) -> Option<String> {
        self.value(name).map(str::to_string)
    }

    fn required(&self, name: &str) -> String {
        self.value(name).unwrap_or_default().to_string()
    }

    fn insert_optional(&mut self, name: &str, value: &Option<String>) {
        if let Some(v) = value {
            self.insert(name, v.clone());
        }
    }
}

impl From<&Venue> for FormData {
    fn from(venue: &Venue) -> Self {
        let mut form = FormData::default();
        form.insert("name", venue.name.clone());
        form.insert("address", venue.address.clone());
        form.insert("city", venue.city.clone());
        form.insert("state", venue.state.clone());
        form.insert_optional("phone", &venue.phone);
        form.insert_optional("website_link", &venue.website_link);
        form.insert_optional("image_link", &venue.image_link);
        form.insert_optional("facebook_link", &venue.facebook_link);
        for genre in venue.genres.iter() {
            form.insert("genres", genre.clone());
        }
        if venue.seeking_talent {
            form.insert("seeking_talent", "y");
        }
        form.insert_optional("seeking_description", &venue.seeking_description);
        form
    }
}

impl From<&Artist> for FormData {
    fn from(artist: &Artist) -> Self {
        let mut form = FormData::default();
        form.insert("name", artist.name.clone());
        form.insert("city", artist.city.clone());
        form.insert("state", artist.state.clone());
        form.insert_optional("phone", &artist.phone);
        form.insert_optional("website_link", &artist.website_link);
        form.insert_optional("image_link", &artist.image_link);
        form.insert_optional("facebook_link", &artist.facebook_link);
        for genre in artist.genres.iter() {
            form.insert("genres", genre.clone());
        }
        if artist.seeking_venue {
            form.insert("seeking_venue", "y");
        }
        form.insert_optional("seeking_description", &artist.seeking_description);
        form
    }
}

/// Field name to its violation messages, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0.entry(field.to_string()).or_default().push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// One-line digest, e.g. `genres Invalid genres.; name This field is required.`
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|(field, messages)| format!("{} {}", field, messages.join("|")))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A single field-level check. Each rule reads the form and reports at most
/// one message for its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required(&'static str),
    RequiredList(&'static str),
    Url(&'static str),
    Phone(&'static str),
    GenreMembers(&'static str),
    StateMember(&'static str),
    Integer(&'static str),
    DateTime(&'static str),
}

impl Rule {
    pub fn field(&self) -> &'static str {
        match *self {
            Rule::Required(f)
            | Rule::RequiredList(f)
            | Rule::Url(f)
            | Rule::Phone(f)
            | Rule::GenreMembers(f)
            | Rule::StateMember(f)
            | Rule::Integer(f)
            | Rule::DateTime(f) => f,
        }
    }

    pub fn check(&self, form: &FormData) -> Option<&'static str> {
        let field = self.field();
        let failed = match self {
            Rule::Required(_) => form.value(field).is_none(),
            Rule::RequiredList(_) => form.values(field).is_empty(),
            Rule::Url(_) => form.value(field).is_some_and(|v| !is_absolute_url(v)),
            Rule::Phone(_) => form.value(field).is_some_and(|v| !is_phone(v)),
            Rule::GenreMembers(_) => form.values(field).iter().any(|g| g.parse::<Genre>().is_err()),
            Rule::StateMember(_) => form.value(field).is_some_and(|s| !is_valid_state(s)),
            Rule::Integer(_) => form.value(field).is_some_and(|v| v.parse::<i64>().is_err()),
            Rule::DateTime(_) => form.value(field).is_some_and(|v| parse_datetime(v).is_none()),
        };

        failed.then_some(self.message())
    }

    fn message(&self) -> &'static str {
        match self {
            Rule::Required(_) | Rule::RequiredList(_) => MSG_REQUIRED,
            Rule::Url(_) => MSG_URL,
            Rule::Phone(_) => MSG_PHONE,
            Rule::GenreMembers(_) => MSG_GENRES,
            Rule::StateMember(_) => MSG_STATE,
            Rule::Integer(_) => MSG_INTEGER,
            Rule::DateTime(_) => MSG_DATETIME,
        }
    }
}

/// Ordered rules for one form. `specific` rules only run once every
/// `generic` rule has passed.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub generic: Vec<Rule>,
    pub specific: Vec<Rule>,
}

impl RuleSet {
    pub fn venue() -> Self {
        Self {
            generic: vec![
                Rule::Required("name"),
                Rule::Required("city"),
                Rule::Required("state"),
                Rule::Required("address"),
                Rule::RequiredList("genres"),
                Rule::Url("facebook_link"),
                Rule::Url("website_link"),
            ],
            specific: vec![
                Rule::Phone("phone"),
                Rule::GenreMembers("genres"),
                Rule::StateMember("state"),
            ],
        }
    }

    pub fn artist(mode: ValidationMode) -> Self {
        let mut specific = vec![Rule::Phone("phone")];
        if mode == ValidationMode::Strict {
            specific.push(Rule::GenreMembers("genres"));
            specific.push(Rule::StateMember("state"));
        }

        Self {
            generic: vec![
                Rule::Required("name"),
                Rule::Required("city"),
                Rule::Required("state"),
                Rule::RequiredList("genres"),
                Rule::Url("facebook_link"),
                Rule::Url("website_link"),
            ],
            specific,
        }
    }

    pub fn show() -> Self {
        Self {
            generic: vec![
                Rule::Required("artist_id"),
                Rule::Required("venue_id"),
                Rule::Required("start_time"),
            ],
            specific: vec![
                Rule::Integer("artist_id"),
                Rule::Integer("venue_id"),
                Rule::DateTime("start_time"),
            ],
        }
    }

    pub fn validate(&self, form: &FormData) -> Result<(), FieldErrors> {
        let errors = run_rules(&self.generic, form);
        if !errors.is_empty() {
            return Err(errors);
        }

        let errors = run_rules(&self.specific, form);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn run_rules(rules: &[Rule], form: &FormData) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for rule in rules {
        if let Some(message) = rule.check(form) {
            errors.push(rule.field(), message);
        }
    }
    errors
}

/// Shape check only; 7 to 15 digits in total, as E.164 allows.
pub fn is_phone(value: &str) -> bool {
    PHONE_RE.is_match(value) && PHONE_DIGITS.contains(&value.chars().filter(char::is_ascii_digit).count())
}

pub fn is_absolute_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Accepts RFC 3339 or a naive `YYYY-MM-DD HH:MM[:SS]` (space or `T`
/// separated), the latter read as UTC.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn parse_venue(form: &FormData) -> Result<VenueFields, FieldErrors> {
    RuleSet::venue().validate(form)?;

    Ok(VenueFields {
        name: form.required("name"),
        address: form.required("address"),
        city: form.required("city"),
        state: form.required("state"),
        phone: form.optional("phone"),
        website_link: form.optional("website_link"),
        image_link: form.optional("image_link"),
        facebook_link: form.optional("facebook_link"),
        genres: form.values("genres").into_iter().map(str::to_string).collect(),
        seeking_talent: form.flag("seeking_talent"),
        seeking_description: form.optional("seeking_description"),
    })
}

pub fn parse_artist(form: &FormData, mode: ValidationMode) -> Result<ArtistFields, FieldErrors> {
    RuleSet::artist(mode).validate(form)?;

    Ok(ArtistFields {
        name: form.required("name"),
        city: form.required("city"),
        state: form.required("state"),
        phone: form.optional("phone"),
        website_link: form.optional("website_link"),
        image_link: form.optional("image_link"),
        facebook_link: form.optional("facebook_link"),
        genres: form.values("genres").into_iter().map(str::to_string).collect(),
        seeking_venue: form.flag("seeking_venue"),
        seeking_description: form.optional("seeking_description"),
    })
}

pub fn parse_show(form: &FormData) -> Result<ShowFields, FieldErrors> {
    RuleSet::show().validate(form)?;

    let id = |field: &str| {
        form.value(field)
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or_else(|| FieldErrors::single(field, MSG_INTEGER))
    };

    let start_time = form
        .value("start_time")
        .and_then(parse_datetime)
        .ok_or_else(|| FieldErrors::single("start_time", MSG_DATETIME))?;

    Ok(ShowFields {
        artist_id: id("artist_id")?,
        venue_id: id("venue_id")?,
        start_time,
    })
}
