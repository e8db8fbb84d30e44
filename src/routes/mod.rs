use std::sync::Arc;

use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};
use planora_booking::{BookingClient, StaffDirectory};
use time::Weekday;

use crate::template::{NotFoundTemplate, Template};

mod health;
mod planning;
mod staff;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub week_start: Weekday,
    pub booking: BookingClient,
    pub staff: Arc<StaffDirectory>,
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.render(NotFoundTemplate)
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/", get(planning::index))
        .route("/planning/week/{offset}", get(planning::week_page))
        .route("/planning/week/{offset}/grid", get(planning::week_grid))
        .route("/planning/month/{year}/{month}", get(planning::month_page))
        .route("/planning/appointments", post(planning::create_action))
        .route("/staff", get(staff::page))
        .fallback(fallback)
        .nest_service("/static", crate::assets::AssetsService::new())
        .with_state(app_state)
}
