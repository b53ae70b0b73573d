//! Request handler for the organizer calendar endpoint.
//!
//! `GET /?organizer={id or organizer URL}` returns every future and past event
//! of that Eventbrite organizer as an `.ics` download.

use chrono::Utc;
use lambda_http::{Body, Request, Response};
use tracing::{error, info, warn};

use crate::eventbrite::{fetch_all_events, EventbriteClient, PageSource};
use crate::http::{calendar_response, error_response};
use crate::{ical, organizer, Config, Error, Result};

/// State shared by every invocation of the Lambda.
pub struct AppState<S = EventbriteClient> {
    pub config: Config,
    pub source: S,
}

impl AppState<EventbriteClient> {
    pub fn new(config: Config) -> Result<Self> {
        let source = EventbriteClient::new(&config)?;
        Ok(Self { config, source })
    }
}

impl<S: PageSource> AppState<S> {
    pub fn with_source(config: Config, source: S) -> Self {
        Self { config, source }
    }

    /// Fetch and render the calendar for a raw query string.
    pub async fn calendar_for_query(&self, query: &str) -> Result<Vec<u8>> {
        let organizer_id = organizer::organizer_from_query(query).ok_or(Error::UnknownOrganizer)?;
        info!("Building calendar for organizer {}", organizer_id);

        let events = fetch_all_events(&self.source, &self.config.base_url, &organizer_id).await?;
        info!(
            "Rendering {} events for organizer {}",
            events.len(),
            organizer_id
        );

        Ok(ical::render(events, Utc::now()))
    }
}

/// Handle one HTTP request. Any method is accepted.
pub async fn handler<S: PageSource>(
    state: &AppState<S>,
    event: Request,
) -> std::result::Result<Response<Body>, lambda_http::Error> {
    let query = event.uri().query().unwrap_or_default();

    match state.calendar_for_query(query).await {
        Ok(document) => calendar_response(document),
        Err(e) => {
            match &e {
                Error::UnknownOrganizer => warn!("Rejected organizer query {:?}", query),
                e if e.is_upstream() => warn!("Eventbrite request failed: {}", e),
                e => error!("Failed to build calendar: {}", e),
            }
            error_response(&e)
        }
    }
}
