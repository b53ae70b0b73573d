//! Eventbrite organizer listing client.
//!
//! The public API cannot list an organizer's events, so this scrapes the
//! `showmore` pagination endpoint the organizer page itself uses.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use tracing::{debug, info, warn};

use crate::models::{EventRecord, ShowMorePage};
use crate::{Config, Error, Result};

/// Which half of an organizer's listing to page through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingType {
    Future,
    Past,
}

impl ListingType {
    /// Listing types in the order they are fetched.
    pub const ALL: [ListingType; 2] = [ListingType::Future, ListingType::Past];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Future => "future",
            ListingType::Past => "past",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL of one `showmore` page.
pub fn showmore_url(base_url: &str, organizer_id: &str, listing: ListingType, page: u32) -> String {
    format!(
        "{}/org/{}/showmore/?type={}&page={}",
        base_url.trim_end_matches('/'),
        organizer_id,
        listing,
        page
    )
}

/// Response exactly as Eventbrite sent it, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of `showmore` pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Issue a GET for `url`. Any response, including non-2xx, is `Ok`.
    async fn get(&self, url: &str) -> Result<RawResponse>;
}

/// HTTP page source backed by reqwest.
#[derive(Debug, Clone)]
pub struct EventbriteClient {
    http_client: reqwest::Client,
}

impl EventbriteClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl PageSource for EventbriteClient {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        let transport = |e: reqwest::Error| Error::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.http_client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        let headers = header_map(response.headers());
        let bytes = response.bytes().await.map_err(transport)?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Flattens headers, joining repeated names with `", "`.
fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        map.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    map
}

/// Interprets one page response.
fn parse_page(url: &str, response: RawResponse) -> Result<ShowMorePage> {
    if !response.is_success() {
        return Err(Error::Upstream {
            url: url.to_string(),
            code: response.status,
            reason: response.reason,
            headers: response.headers,
            body: response.body,
        });
    }

    serde_json::from_str(&response.body).map_err(|e| {
        warn!("Unparseable Eventbrite page {}: {}", url, e);
        Error::MalformedResponse {
            url: url.to_string(),
            status: response.status,
            body: response.body.clone(),
        }
    })
}

/// Fetches every future and past event for an organizer.
///
/// Pages are requested one after another; the first failure aborts.
pub async fn fetch_all_events<S>(
    source: &S,
    base_url: &str,
    organizer_id: &str,
) -> Result<Vec<EventRecord>>
where
    S: PageSource + ?Sized,
{
    let mut events = Vec::new();

    for listing in ListingType::ALL {
        let before = events.len();
        let mut page = 1u32;

        loop {
            let url = showmore_url(base_url, organizer_id, listing, page);
            debug!("Fetching {}", url);

            let response = source.get(&url).await?;
            let parsed = parse_page(&url, response)?;

            events.extend(parsed.data.events);
            if !parsed.data.has_next_page {
                break;
            }
            page += 1;
        }

        info!(
            "Fetched {} {} events for organizer {} across {} pages",
            events.len() - before,
            listing,
            organizer_id,
            page
        );
    }

    Ok(events)
}
