use std::str::FromStr;

use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect},
};
use planora_booking::{DATE_FORMAT, NewAppointment};
use planora_scheduling::{
    SlotGrid, StaffPalette, StaffScope, ViewMode, WeekNavigator, bucket_by_day, hour_range,
    month_weeks, today_in,
};
use planora_shared::ClockTime;
use serde::Deserialize;
use time::{Date, Month};

use crate::{
    routes::AppState,
    template::{Template, ToastErrorTemplate, ToastSuccessTemplate, filters},
};

const FALLBACK_COLOR: &str = "#94a3b8";

// Week offsets are relative to today's week; five years out is already more
// than the booking API keeps.
const MAX_WEEK_OFFSET: i64 = 260;

#[derive(Debug, Clone)]
pub struct DayHeader {
    pub date: Date,
    pub is_today: bool,
}

#[derive(Debug, Clone)]
pub struct AppointmentCard {
    pub client_name: String,
    pub service_name: String,
    pub start_label: String,
    pub end_label: String,
    pub color: String,
    pub status: String,
    pub price_cents: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct SlotCell {
    pub date_param: String,
    pub time_param: String,
    pub appointments: Vec<AppointmentCard>,
}

#[derive(Debug, Clone)]
pub struct HourRow {
    pub hour: u8,
    pub cells: Vec<SlotCell>,
}

#[derive(Debug, Clone)]
pub struct StaffChip {
    pub id: String,
    pub name: String,
    pub color: String,
    pub selected: bool,
}

#[derive(askama::Template)]
#[template(path = "planning.html")]
pub struct PlanningTemplate {
    pub current_path: String,
    pub offset: i64,
    pub prev_offset: i64,
    pub next_offset: i64,
    pub query_suffix: String,
    pub mode: String,
    pub selected_staff: String,
    pub week_start_day: Date,
    pub week_end_day: Date,
    pub month_year: i32,
    pub month_number: u8,
    pub days: Vec<DayHeader>,
    pub rows: Vec<HourRow>,
    pub legend: Vec<StaffChip>,
    pub staff_options: Vec<StaffChip>,
    pub total: usize,
}

/// Grid-only partial, swapped in when the staff filter changes without a full
/// page reload.
#[derive(askama::Template)]
#[template(path = "partials/planning-grid.html")]
pub struct PlanningGridTemplate {
    pub days: Vec<DayHeader>,
    pub rows: Vec<HourRow>,
    pub selected_staff: String,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct PlanningQuery {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub staff: Option<String>,
}

impl PlanningQuery {
    fn scope(&self) -> StaffScope {
        StaffScope {
            mode: self
                .mode
                .as_deref()
                .and_then(|mode| ViewMode::from_str(mode).ok())
                .unwrap_or_default(),
            selected: self.staff.clone().filter(|staff| !staff.is_empty()),
        }
    }
}

struct WeekView {
    days: Vec<DayHeader>,
    rows: Vec<HourRow>,
    legend: Vec<StaffChip>,
    staff_options: Vec<StaffChip>,
    total: usize,
}

/// GET / - the planning entry point is always the current week.
pub async fn index() -> Redirect {
    Redirect::to("/planning/week/0")
}

#[tracing::instrument(skip(template, app))]
pub async fn week_page(
    template: Template,
    State(app): State<AppState>,
    Path((offset,)): Path<(i64,)>,
    Query(query): Query<PlanningQuery>,
) -> impl IntoResponse {
    let offset = offset.clamp(-MAX_WEEK_OFFSET, MAX_WEEK_OFFSET);
    let navigator = navigator_at(&app, offset);
    let scope = query.scope();
    let view = load_week_view(&app, navigator, &scope).await;

    let mut query_suffix = format!("?mode={}", scope.mode);
    if let Some(staff) = &scope.selected {
        query_suffix.push_str(&format!("&staff={staff}"));
    }

    let anchor = navigator.anchor();

    template
        .render(PlanningTemplate {
            current_path: "planning".to_owned(),
            offset,
            prev_offset: offset - 1,
            next_offset: offset + 1,
            query_suffix,
            mode: scope.mode.to_string(),
            selected_staff: scope.selected.clone().unwrap_or_default(),
            week_start_day: anchor,
            week_end_day: navigator.last_day(),
            month_year: anchor.year(),
            month_number: anchor.month() as u8,
            days: view.days,
            rows: view.rows,
            legend: view.legend,
            staff_options: view.staff_options,
            total: view.total,
        })
        .into_response()
}

#[tracing::instrument(skip(template, app))]
pub async fn week_grid(
    template: Template,
    State(app): State<AppState>,
    Path((offset,)): Path<(i64,)>,
    Query(query): Query<PlanningQuery>,
) -> impl IntoResponse {
    let offset = offset.clamp(-MAX_WEEK_OFFSET, MAX_WEEK_OFFSET);
    let navigator = navigator_at(&app, offset);
    let scope = query.scope();
    let view = load_week_view(&app, navigator, &scope).await;

    template
        .render(PlanningGridTemplate {
            days: view.days,
            rows: view.rows,
            selected_staff: scope.selected.unwrap_or_default(),
            total: view.total,
        })
        .into_response()
}

fn navigator_at(app: &AppState, offset: i64) -> WeekNavigator {
    let mut navigator = WeekNavigator::today(&app.config.planning.timezone, app.week_start);

    for _ in 0..offset.abs() {
        navigator = if offset > 0 {
            navigator.next()
        } else {
            navigator.prev()
        };
    }

    navigator
}

/// Loads collaborator data and projects it onto the week grid. A failing
/// upstream degrades to an empty collection, so the page still renders an
/// empty planning grid instead of an error page.
async fn load_week_view(app: &AppState, navigator: WeekNavigator, scope: &StaffScope) -> WeekView {
    let appointments = match app
        .booking
        .list_appointments(navigator.anchor(), navigator.last_day())
        .await
    {
        Ok(appointments) => appointments,
        Err(err) => {
            tracing::error!(err = %err, "failed to load appointments, rendering an empty grid");
            Vec::new()
        }
    };

    let staff = match app.staff.list().await {
        Ok(staff) => staff,
        Err(err) => {
            tracing::error!(err = %err, "failed to load staff directory");
            Vec::new()
        }
    };

    let days = navigator.days();
    let hours = hour_range(
        app.config.planning.day_start_hour,
        app.config.planning.day_end_hour,
    );
    let grid = SlotGrid::build(&appointments, &days, &hours, scope.filter_id());
    let palette = StaffPalette::new(&staff);

    let today = today_in(&app.config.planning.timezone);
    let day_headers = days
        .iter()
        .map(|date| DayHeader {
            date: *date,
            is_today: *date == today,
        })
        .collect();

    let rows = grid
        .hours()
        .iter()
        .map(|hour| HourRow {
            hour: *hour,
            cells: days
                .iter()
                .map(|day| SlotCell {
                    date_param: format_date(*day),
                    time_param: format!("{hour:02}:00"),
                    appointments: grid
                        .bucket(*day, *hour)
                        .iter()
                        .map(|appointment| AppointmentCard {
                            client_name: appointment.client_name.clone(),
                            service_name: appointment.service_name.clone(),
                            start_label: appointment.start_time.to_string(),
                            end_label: appointment.end_time.to_string(),
                            color: palette
                                .color_for(appointment.staff_id.as_deref())
                                .unwrap_or(FALLBACK_COLOR)
                                .to_owned(),
                            status: appointment.status.to_string(),
                            price_cents: appointment.price_cents,
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    let legend = scope
        .visible(&staff)
        .into_iter()
        .map(|member| StaffChip {
            selected: scope.selected.as_deref() == Some(member.id.as_str()),
            name: member.full_name(),
            color: member.color.clone(),
            id: member.id,
        })
        .collect();

    let staff_options = staff
        .into_iter()
        .map(|member| StaffChip {
            selected: scope.selected.as_deref() == Some(member.id.as_str()),
            name: member.full_name(),
            color: member.color.clone(),
            id: member.id,
        })
        .collect();

    WeekView {
        days: day_headers,
        rows,
        legend,
        staff_options,
        total: grid.len(),
    }
}

#[derive(Debug, Clone)]
pub struct MonthEntry {
    pub start_label: String,
    pub client_name: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct MonthDay {
    pub date: Date,
    pub in_month: bool,
    pub is_today: bool,
    pub entries: Vec<MonthEntry>,
    pub overflow: usize,
}

#[derive(askama::Template)]
#[template(path = "month.html")]
pub struct MonthTemplate {
    pub current_path: String,
    pub first_of_month: Date,
    pub prev_year: i32,
    pub prev_month: u8,
    pub next_year: i32,
    pub next_month: u8,
    pub weeks: Vec<Vec<MonthDay>>,
}

const MONTH_DAY_ENTRIES: usize = 3;

#[tracing::instrument(skip(template, app))]
pub async fn month_page(
    template: Template,
    State(app): State<AppState>,
    Path((year, month)): Path<(i32, u8)>,
) -> impl IntoResponse {
    let Ok(month) = Month::try_from(month) else {
        return template
            .render(crate::template::NotFoundTemplate)
            .into_response();
    };

    let weeks = month_weeks(year, month, app.week_start);
    let first_day = weeks[0][0];
    let last_day = weeks[weeks.len() - 1][6];

    let appointments = match app.booking.list_appointments(first_day, last_day).await {
        Ok(appointments) => appointments,
        Err(err) => {
            tracing::error!(err = %err, "failed to load appointments, rendering an empty month");
            Vec::new()
        }
    };

    let staff = match app.staff.list().await {
        Ok(staff) => staff,
        Err(err) => {
            tracing::error!(err = %err, "failed to load staff directory");
            Vec::new()
        }
    };
    let palette = StaffPalette::new(&staff);

    let today = today_in(&app.config.planning.timezone);
    let month_weeks_view = weeks
        .iter()
        .map(|week| {
            let buckets = bucket_by_day(&appointments, week);

            week.iter()
                .zip(buckets)
                .map(|(date, bucket)| MonthDay {
                    date: *date,
                    in_month: date.month() == month,
                    is_today: *date == today,
                    overflow: bucket.len().saturating_sub(MONTH_DAY_ENTRIES),
                    entries: bucket
                        .into_iter()
                        .take(MONTH_DAY_ENTRIES)
                        .map(|appointment| MonthEntry {
                            start_label: appointment.start_time.to_string(),
                            client_name: appointment.client_name,
                            color: palette
                                .color_for(appointment.staff_id.as_deref())
                                .unwrap_or(FALLBACK_COLOR)
                                .to_owned(),
                        })
                        .collect(),
                })
                .collect()
        })
        .collect();

    let (prev_year, prev_month) = match month {
        Month::January => (year - 1, Month::December),
        _ => (year, month.previous()),
    };
    let (next_year, next_month) = match month {
        Month::December => (year + 1, Month::January),
        _ => (year, month.next()),
    };

    template
        .render(MonthTemplate {
            current_path: "planning".to_owned(),
            first_of_month: Date::from_calendar_date(year, month, 1)
                .unwrap_or(first_day),
            prev_year,
            prev_month: prev_month as u8,
            next_year,
            next_month: next_month as u8,
            weeks: month_weeks_view,
        })
        .into_response()
}

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentInput {
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub staff_id: Option<String>,
}

/// POST /planning/appointments - an empty slot was clicked. Creation belongs
/// to the booking API; this only forwards the picked slot and reports back.
#[tracing::instrument(skip_all, fields(date = %input.date, time = %input.time))]
pub async fn create_action(
    template: Template,
    State(app): State<AppState>,
    Form(input): Form<CreateAppointmentInput>,
) -> impl IntoResponse {
    let (Ok(date), Ok(start_time)) = (
        Date::parse(&input.date, DATE_FORMAT),
        ClockTime::from_str(&input.time),
    ) else {
        return template.render(ToastErrorTemplate {
            message: "invalid_slot",
        });
    };

    let new_appointment = NewAppointment {
        date,
        start_time,
        staff_id: input.staff_id.filter(|staff| !staff.is_empty()),
    };

    match app.booking.create_appointment(&new_appointment).await {
        Ok(created) => {
            tracing::info!(id = %created.id, "appointment created from the planning grid");

            template.render(ToastSuccessTemplate {
                message: "appointment_created",
            })
        }
        Err(err) => {
            tracing::error!(err = %err, "failed to create appointment");

            template.render(ToastErrorTemplate {
                message: "appointment_create_failed",
            })
        }
    }
}

fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .expect("formatting a date as [year]-[month]-[day] cannot fail")
}
