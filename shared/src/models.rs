//! Eventbrite listing models.
//!
//! Only the fields the calendar renderer reads are modelled. Every event field
//! is optional so a sparse record still renders instead of failing the page.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One page of the `showmore` listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ShowMorePage {
    pub data: ShowMoreData,
}

#[derive(Debug, Deserialize)]
pub struct ShowMoreData {
    pub events: Vec<EventRecord>,
    pub has_next_page: bool,
}

/// Event as returned by the `showmore` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<TextField>,
    #[serde(default)]
    pub description: Option<TextField>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub start: Option<EventTime>,
    #[serde(default)]
    pub end: Option<EventTime>,
    #[serde(default)]
    pub organizer: Option<Organizer>,
    #[serde(default)]
    pub venue: Option<Venue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextField {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventTime {
    #[serde(default)]
    pub utc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Organizer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "string_or_number")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub longitude: Option<String>,
    #[serde(default)]
    pub localized_address_display: Option<String>,
}

impl EventRecord {
    pub fn title(&self) -> &str {
        text_of(&self.name)
    }

    pub fn description_text(&self) -> &str {
        text_of(&self.description)
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    pub fn published(&self) -> &str {
        self.published.as_deref().unwrap_or_default()
    }

    pub fn start_utc(&self) -> &str {
        utc_of(&self.start)
    }

    pub fn end_utc(&self) -> &str {
        utc_of(&self.end)
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

impl Venue {
    /// Latitude and longitude, only when both are present and non-empty.
    pub fn coordinates(&self) -> Option<(&str, &str)> {
        let address = self.address.as_ref()?;
        let lat = address.latitude.as_deref().filter(|s| !s.is_empty())?;
        let lon = address.longitude.as_deref().filter(|s| !s.is_empty())?;
        Some((lat, lon))
    }

    /// Venue name and localized address joined with `", "`, or whichever exists.
    pub fn location(&self) -> Option<String> {
        let name = self.name.as_deref().filter(|s| !s.is_empty());
        let display = self
            .address
            .as_ref()
            .and_then(|a| a.localized_address_display.as_deref())
            .filter(|s| !s.is_empty());

        match (name, display) {
            (Some(name), Some(display)) => Some(format!("{}, {}", name, display)),
            (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
            (None, None) => None,
        }
    }
}

fn text_of(field: &Option<TextField>) -> &str {
    field
        .as_ref()
        .and_then(|f| f.text.as_deref())
        .unwrap_or_default()
}

fn utc_of(time: &Option<EventTime>) -> &str {
    time.as_ref()
        .and_then(|t| t.utc.as_deref())
        .unwrap_or_default()
}

/// Eventbrite sends ids and coordinates as strings, but accept bare numbers too.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
