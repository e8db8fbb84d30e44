//! End-to-end tests of the planning views against a stub booking API.

mod common;

use common::{
    create_app, get_page, post_form, spawn_upstream, team_staff, this_week_appointments,
};
use serde_json::json;

#[tokio::test]
async fn week_page_shows_the_current_week_appointments() {
    let upstream = spawn_upstream(this_week_appointments(), team_staff()).await;
    let app = create_app(&upstream);

    let (status, body) = get_page(&app, "/planning/week/0").await;

    assert_eq!(status, 200);
    assert!(body.contains("Nora Blanc"));
    assert!(body.contains("Paul Arnaud"));
    assert!(body.contains("balayage"));
    // appointments are tagged with the owning staff member's color
    assert!(body.contains("#a855f7"));
    assert!(body.contains("#f59e0b"));
    // price is displayed when the API provides one
    assert!(body.contains("65.00"));
}

#[tokio::test]
async fn staff_filter_scopes_the_grid_to_one_member() {
    let upstream = spawn_upstream(this_week_appointments(), team_staff()).await;
    let app = create_app(&upstream);

    let (status, body) = get_page(&app, "/planning/week/0?mode=individual&staff=s1").await;

    assert_eq!(status, 200);
    assert!(body.contains("Nora Blanc"));
    assert!(!body.contains("Paul Arnaud"));
}

#[tokio::test]
async fn individual_mode_without_selection_shows_no_staff() {
    let upstream = spawn_upstream(this_week_appointments(), team_staff()).await;
    let app = create_app(&upstream);

    let (status, body) = get_page(&app, "/planning/week/0?mode=individual").await;

    assert_eq!(status, 200);
    // the staff legend never falls back to the whole team
    assert!(!body.contains("staff-legend"));
    // the grid itself stays unfiltered without a selection
    assert!(body.contains("Nora Blanc"));
    assert!(body.contains("Paul Arnaud"));
}

#[tokio::test]
async fn grid_partial_renders_without_the_page_chrome() {
    let upstream = spawn_upstream(this_week_appointments(), team_staff()).await;
    let app = create_app(&upstream);

    let (status, body) = get_page(&app, "/planning/week/0/grid").await;

    assert_eq!(status, 200);
    assert!(body.contains("planning-grid"));
    assert!(body.contains("Nora Blanc"));
    assert!(!body.contains("<html"));
}

#[tokio::test]
async fn week_navigation_moves_off_the_current_week() {
    let upstream = spawn_upstream(this_week_appointments(), team_staff()).await;
    let app = create_app(&upstream);

    let (status, body) = get_page(&app, "/planning/week/1").await;

    assert_eq!(status, 200);
    // this week's appointments are not on next week's grid
    assert!(!body.contains("Nora Blanc"));
    assert!(body.contains("/planning/week/0"));
    assert!(body.contains("/planning/week/2"));
}

#[tokio::test]
async fn month_page_renders_a_month_grid() {
    let upstream = spawn_upstream(this_week_appointments(), team_staff()).await;
    let app = create_app(&upstream);

    let (status, body) = get_page(&app, "/planning/month/2025/2").await;

    assert_eq!(status, 200);
    assert!(body.contains("month-grid"));
    assert!(body.contains("/planning/month/2025/1"));
    assert!(body.contains("/planning/month/2025/3"));
}

#[tokio::test]
async fn month_page_rejects_an_impossible_month() {
    let upstream = spawn_upstream(json!([]), json!([])).await;
    let app = create_app(&upstream);

    let (_, body) = get_page(&app, "/planning/month/2025/13").await;

    assert!(body.contains("404"));
}

#[tokio::test]
async fn empty_slot_click_forwards_creation_to_the_booking_api() {
    let upstream = spawn_upstream(json!([]), team_staff()).await;
    let app = create_app(&upstream);

    let (status, body) = post_form(
        &app,
        "/planning/appointments",
        &[("date", "2025-01-27"), ("time", "14:00"), ("staff_id", "s1")],
    )
    .await;

    assert_eq!(status, 200);
    assert!(body.contains("toast success"));
}

#[tokio::test]
async fn malformed_slot_is_rejected_before_reaching_the_api() {
    let upstream = spawn_upstream(json!([]), team_staff()).await;
    let app = create_app(&upstream);

    let (status, body) = post_form(
        &app,
        "/planning/appointments",
        &[("date", "2025-01-27"), ("time", "2pm")],
    )
    .await;

    assert_eq!(status, 200);
    assert!(body.contains("toast error"));
}

#[tokio::test]
async fn unreachable_booking_api_degrades_to_an_empty_grid() {
    // nothing listens on port 9; the page must still render
    let app = create_app("http://127.0.0.1:9");

    let (status, body) = get_page(&app, "/planning/week/0").await;

    assert_eq!(status, 200);
    assert!(body.contains("planning-grid"));
    assert!(body.contains("No appointments this week"));
}

#[tokio::test]
async fn staff_page_lists_the_team() {
    let upstream = spawn_upstream(json!([]), team_staff()).await;
    let app = create_app(&upstream);

    let (status, body) = get_page(&app, "/staff").await;

    assert_eq!(status, 200);
    assert!(body.contains("Ines Morel"));
    assert!(body.contains("Lucas Robin"));
    assert!(body.contains("coloration"));
}

#[tokio::test]
async fn unknown_route_renders_the_not_found_page() {
    let upstream = spawn_upstream(json!([]), json!([])).await;
    let app = create_app(&upstream);

    let (_, body) = get_page(&app, "/does-not-exist").await;

    assert!(body.contains("404"));
}
