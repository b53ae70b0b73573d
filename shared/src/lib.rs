//! Shared library for the Eventbrite organizer calendar Lambda.
//!
//! Scrapes an organizer's listing from Eventbrite and renders it as an
//! iCalendar feed.

pub mod config;
pub mod error;
pub mod eventbrite;
pub mod handler;
pub mod http;
pub mod ical;
pub mod models;
pub mod organizer;

pub use config::Config;
pub use error::{Error, Result};
pub use eventbrite::{fetch_all_events, EventbriteClient, ListingType, PageSource, RawResponse};
pub use handler::{handler, AppState};
pub use models::{EventRecord, ShowMorePage};
