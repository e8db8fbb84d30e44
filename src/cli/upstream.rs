use anyhow::Result;
use planora_booking::BookingClient;
use planora_scheduling::{WeekNavigator, today_in};
use std::time::Duration;

/// Probes the booking API and prints what the planning views would see for
/// the current week. Meant for deploy-time smoke checks.
pub async fn check(config: crate::config::Config) -> Result<()> {
    let week_start = config
        .planning
        .week_start_weekday()
        .map_err(anyhow::Error::msg)?;
    let booking = BookingClient::new(
        &config.upstream.base_url,
        Duration::from_secs(config.upstream.timeout_seconds),
        config.upstream.retry_attempts,
    )?;

    booking.ping().await?;
    println!("booking api at {} is reachable", booking.base_url());

    let staff = booking.list_staff().await?;
    println!("staff directory: {} members", staff.len());

    let navigator = WeekNavigator::containing(today_in(&config.planning.timezone), week_start);
    let appointments = booking
        .list_appointments(navigator.anchor(), navigator.last_day())
        .await?;
    println!(
        "current week ({} - {}): {} appointments",
        navigator.anchor(),
        navigator.last_day(),
        appointments.len()
    );

    Ok(())
}
