//! Organizer Calendar Lambda - Serves an Eventbrite organizer's events as iCalendar.

use lambda_http::{run, service_fn, Error};
use shared::{AppState, Config};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    info!("Fetching organizer listings from {}", config.base_url);

    let state = Arc::new(AppState::new(config)?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { shared::handler(&state, event).await }
    }))
    .await
}
