use std::sync::Arc;
use std::time::Duration;

use planora_booking::{BookingClient, StaffDirectory};

pub mod assets;
pub mod cli;
pub mod config;
pub mod language;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod template;

pub use routes::AppState;

rust_i18n::i18n!("locales", fallback = "en");

/// Builds the application router from a validated configuration.
///
/// Also the entry point for integration tests, which point the upstream at a
/// stub booking API instead of starting the full server.
pub fn create_app(config: config::Config) -> anyhow::Result<axum::Router> {
    let week_start = config
        .planning
        .week_start_weekday()
        .map_err(anyhow::Error::msg)?;

    let booking = BookingClient::new(
        &config.upstream.base_url,
        Duration::from_secs(config.upstream.timeout_seconds),
        config.upstream.retry_attempts,
    )?;

    let staff = Arc::new(StaffDirectory::new(
        booking.clone(),
        Duration::from_secs(config.upstream.staff_ttl_seconds),
    ));

    let state = AppState {
        config,
        week_start,
        booking,
        staff,
    };

    Ok(routes::router(state))
}
